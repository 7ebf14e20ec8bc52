//! The closed set of categories a record may belong to, plus curated landing
//! page details for some of them.

/// Categories used by the AI tools directory.
pub const AI_CATEGORIES: &[&str] = &[
    "Large Language Models",
    "Code Generation",
    "Design & Creative Tools",
    "Design Tools",
    "Writing Assistants",
    "AI Platforms & Services",
    "Agent Frameworks",
    "Developer Tools",
    "Video Generation",
    "Voice & Audio",
    "Specialized Tools",
    "Image Generation",
    "Data Analysis",
    "Automation Tools",
    "Chatbots & Conversational AI",
    "Research Tools",
    "Business Intelligence",
];

/// Categories used by the web-development tools directory.
pub const WEB_DEV_CATEGORIES: &[&str] = &[
    "Frontend Frameworks",
    "Backend Frameworks",
    "Database Tools",
    "Testing Tools",
    "Build Tools",
    "Package Managers",
    "Code Editors & IDEs",
    "Version Control",
    "DevOps & CI/CD",
    "Design Tools",
    "CSS Frameworks",
    "JavaScript Libraries",
    "Development Tools",
    "Deployment Platforms",
    "Monitoring & Analytics",
    "Security Tools",
    "Mobile Development",
    "Desktop Development",
    "API Tools",
    "Documentation Tools",
];

/// Exact, case-sensitive membership test against both registries.
pub fn is_registered(category: &str) -> bool {
    AI_CATEGORIES.contains(&category) || WEB_DEV_CATEGORIES.contains(&category)
}

/// URL slug for a category: lower-cased ASCII alphanumerics, every other run
/// of characters collapsed to a single `-`. The result is always one path
/// segment.
///
/// "Large Language Models" -> "large-language-models",
/// "DevOps & CI/CD" -> "devops-ci-cd".
pub fn slugify(category: &str) -> String {
    category
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Editorial description of a category, shown on its landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub name: &'static str,
    pub slug: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub featured: bool,
    pub use_cases: &'static [&'static str],
    pub trends: &'static [&'static str],
}

/// Categories with a curated landing page. These resolve by slug even when no
/// record currently uses them.
pub const CATEGORY_INFO: &[CategoryInfo] = &[
    CategoryInfo {
        name: "Large Language Models",
        slug: "large-language-models",
        description: "Advanced AI models capable of understanding and generating human-like text across various domains and languages.",
        icon: "\u{1F916}",
        featured: true,
        use_cases: &[
            "Content creation and writing assistance",
            "Code generation and debugging",
            "Language translation and localization",
            "Question answering and research",
            "Creative writing and storytelling",
            "Business communication and emails",
            "Document analysis and summarization",
            "Educational tutoring and explanation",
        ],
        trends: &[
            "Multimodal capabilities (text, image, audio)",
            "Longer context windows (1M+ tokens)",
            "Improved reasoning and mathematical abilities",
            "Real-time processing and streaming",
            "Domain-specific fine-tuning",
            "Reduced hallucination rates",
            "Better factual accuracy",
            "Enhanced code understanding",
        ],
    },
    CategoryInfo {
        name: "Code Generation",
        slug: "code-generation",
        description: "AI-powered tools that assist developers in writing, debugging, and optimizing code across multiple programming languages.",
        icon: "\u{1F4BB}",
        featured: true,
        use_cases: &[
            "Code completion and suggestions",
            "Bug detection and fixing",
            "Code refactoring and optimization",
            "Documentation generation",
            "Test case creation",
            "API integration assistance",
            "Database query generation",
            "Code translation between languages",
        ],
        trends: &[
            "IDE integration improvements",
            "Context-aware code suggestions",
            "Multi-language support expansion",
            "Real-time collaboration features",
            "Security vulnerability detection",
            "Performance optimization suggestions",
            "Natural language to code conversion",
            "Code review automation",
        ],
    },
    CategoryInfo {
        name: "Design Tools",
        slug: "design-tools",
        description: "AI-powered design platforms that automate creative processes and enhance visual content creation.",
        icon: "\u{1F3A8}",
        featured: true,
        use_cases: &[
            "Automated layout generation",
            "Brand identity creation",
            "UI/UX design assistance",
            "Image enhancement and editing",
            "Logo and graphics generation",
            "Color palette suggestions",
            "Typography recommendations",
            "Responsive design optimization",
        ],
        trends: &[
            "AI-powered design systems",
            "Automated A/B testing for designs",
            "Real-time collaboration features",
            "Brand consistency enforcement",
            "Accessibility optimization",
            "Cross-platform design sync",
            "Voice-controlled design",
            "Generative design exploration",
        ],
    },
    CategoryInfo {
        name: "Chatbots & Conversational AI",
        slug: "chatbots-conversational-ai",
        description: "Intelligent chatbot platforms and conversational interfaces for customer service and engagement.",
        icon: "\u{1F4AC}",
        featured: true,
        use_cases: &[
            "Customer support automation",
            "Lead generation and qualification",
            "E-commerce shopping assistance",
            "Educational tutoring and Q&A",
            "Healthcare information and triage",
            "Banking and financial services",
            "Travel planning and booking",
            "HR and employee assistance",
            "Social media marketing automation",
            "FAQ automation and deflection",
            "Appointment scheduling",
            "Multi-language customer service",
        ],
        trends: &[
            "LLM integration (ChatGPT, Claude)",
            "Voice-enabled interactions",
            "Multimodal conversation capabilities",
            "Emotional intelligence integration",
            "Seamless human handoff",
            "Personalization and memory",
            "Industry-specific specialization",
            "Real-time language translation",
            "Integration with IoT devices",
            "Predictive response suggestions",
            "No-code bot development",
            "Advanced analytics and insights",
        ],
    },
    CategoryInfo {
        name: "Data Analysis",
        slug: "data-analysis",
        description: "AI-powered platforms that transform raw data into actionable insights through advanced analytics and visualization.",
        icon: "\u{1F4CA}",
        featured: true,
        use_cases: &[
            "Business intelligence and reporting",
            "Predictive analytics and forecasting",
            "Customer behavior analysis",
            "Financial risk assessment",
            "Market trend identification",
            "Operational efficiency optimization",
            "Fraud detection and prevention",
            "Supply chain optimization",
        ],
        trends: &[
            "Natural language query interfaces",
            "Automated insight generation",
            "Real-time analytics processing",
            "Self-service analytics platforms",
            "Advanced data visualization",
            "Machine learning integration",
            "Cloud-based analytics solutions",
            "Collaborative data exploration",
        ],
    },
    CategoryInfo {
        name: "Agent Frameworks",
        slug: "agent-frameworks",
        description: "Autonomous AI agents that can reason, plan, and execute complex tasks with minimal human intervention.",
        icon: "\u{1F916}",
        featured: true,
        use_cases: &[
            "Automated task execution",
            "Multi-step problem solving",
            "Data analysis and research",
            "Customer service automation",
            "Content planning and creation",
            "System integration and monitoring",
        ],
        trends: &[
            "Goal-oriented task completion",
            "Multi-tool integration",
            "Self-improving capabilities",
            "Human-AI collaboration",
            "Ethical decision making",
            "Domain-specific specialization",
        ],
    },
];

pub fn category_info(name: &str) -> Option<&'static CategoryInfo> {
    CATEGORY_INFO.iter().find(|info| info.name == name)
}

pub fn category_info_by_slug(slug: &str) -> Option<&'static CategoryInfo> {
    CATEGORY_INFO.iter().find(|info| info.slug == slug)
}

/// Slug used in URLs for `category`: the curated slug when one exists,
/// otherwise [`slugify`].
pub fn category_slug(category: &str) -> String {
    category_info(category)
        .map(|info| info.slug.to_string())
        .unwrap_or_else(|| slugify(category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_is_case_sensitive() {
        assert!(is_registered("Code Generation"));
        assert!(is_registered("Build Tools"));
        assert!(!is_registered("code generation"));
        assert!(!is_registered("Quantum Tools"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Large Language Models"), "large-language-models");
        assert_eq!(slugify("Voice  &\tAudio"), "voice-audio");
        assert_eq!(slugify("API Tools"), "api-tools");
    }

    #[test]
    fn test_slugify_yields_single_path_segment() {
        assert_eq!(slugify("DevOps & CI/CD"), "devops-ci-cd");
        assert_eq!(slugify("Chatbots & Conversational AI"), "chatbots-conversational-ai");
        assert!(!slugify("Code Editors & IDEs").contains(&['/', '&'][..]));
    }

    #[test]
    fn test_category_info_is_registered_and_consistent() {
        for info in CATEGORY_INFO {
            assert!(is_registered(info.name), "{} is not registered", info.name);
            assert_eq!(info.slug, slugify(info.name));
            assert_eq!(category_info_by_slug(info.slug), Some(info));
        }
        assert_eq!(category_slug("DevOps & CI/CD"), "devops-ci-cd");
        assert!(category_info("Build Tools").is_none());
    }
}

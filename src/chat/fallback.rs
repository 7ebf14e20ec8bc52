//! Hand-authored assistant replies used when the upstream model is
//! unavailable. One text per failure class.

use crate::chat::gemini::ChatFailure;

/// Missing credential, transport failure, or an unreadable request.
pub const GREETING: &str = "Hello! I'm the assistant for the AI Ecosystem Explorer.

I can help you:
- Discover AI tools for any purpose
- Compare different AI platforms
- Learn about AI capabilities and pricing
- Find free and open-source alternatives

What would you like to know about AI tools today?";

/// The upstream answered with a non-success status.
pub const DIRECTORY: &str = "I'm here to help you explore AI tools, but I'm having some technical difficulties right now.

Here are some popular tools from the directory:

- Language models: GPT-4, Claude 3.5, Gemini Pro
- Coding: GitHub Copilot, Cursor, Replit AI
- Design: Midjourney, DALL-E 3, Canva AI
- Writing: Jasper, Copy.ai, Grammarly

Browse the full directory to find more tools in each category. What kind of AI tool are you looking for?";

/// The upstream answered successfully but the body had no usable text.
pub const INTRODUCTION: &str =
    "I'm your assistant for exploring AI tools! How can I help you find the right AI solution for your needs?";

pub fn for_failure(failure: &ChatFailure) -> &'static str {
    match failure {
        ChatFailure::MissingCredential | ChatFailure::Transport(_) => GREETING,
        ChatFailure::UpstreamStatus { .. } => DIRECTORY,
        ChatFailure::MalformedResponse(_) => INTRODUCTION,
    }
}

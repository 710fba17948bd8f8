//! Clients for the two remote collaborators: the content store serving
//! questions and lesson notes, and the chat-completion endpoint that
//! writes short explanations for wrong answers.

mod content;
mod explain;

pub use content::ContentClient;
pub use explain::{Explanation, ExplanationClient, ExplanationRequest};

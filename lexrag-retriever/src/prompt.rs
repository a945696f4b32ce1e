//! Wraps retrieved context into chat messages for a language model.
//!
//! Only the message text is produced here; sending it to a model is left to the
//! caller.

use crate::retrieval::{RetrievedContext, Retriever};
use serde::Serialize;

/// Instruction placed ahead of the context block in the system message.
pub const SYSTEM_INSTRUCTION: &str =
    "Use ONLY the given context. If the context is not helpful, answer normally.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

/// Build the system and user messages for `user_message` given its context.
///
/// ```
/// use lexrag_retriever::prompt::{Role, build_messages};
///
/// let messages = build_messages("cats sleep a lot", "do cats sleep?");
/// assert_eq!(messages[0].role, Role::System);
/// assert!(messages[0].content.ends_with("### CONTEXT ###\ncats sleep a lot\n### END CONTEXT ###"));
/// assert_eq!(messages[1].content, "do cats sleep?");
/// ```
pub fn build_messages(context: &str, user_message: &str) -> Vec<PromptMessage> {
    vec![
        PromptMessage {
            role: Role::System,
            content: format!(
                "{SYSTEM_INSTRUCTION}\n\n### CONTEXT ###\n{context}\n### END CONTEXT ###"
            ),
        },
        PromptMessage {
            role: Role::User,
            content: user_message.to_string(),
        },
    ]
}

/// Retrieve context for `user_message` and build the messages around it.
pub fn messages_for_query(
    retriever: &Retriever,
    user_message: &str,
    top_k: usize,
) -> (RetrievedContext, Vec<PromptMessage>) {
    let context = retriever.retrieve(user_message, top_k);
    let messages = build_messages(context.as_str(), user_message);
    (context, messages)
}

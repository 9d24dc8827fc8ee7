use chorus_types::models::Message;
use serde::Serialize;

use crate::registry::{Personality, PersonalityRegistry};

/// How many trailing thread messages are shown to the model.
pub const CONTEXT_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

impl PromptMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Chat transcript asking `personality` to answer `content` posted by `user`,
/// with the tail of the thread as context.
pub fn build_prompt(
    registry: &PersonalityRegistry,
    personality: &Personality,
    content: &str,
    context: &[Message],
    user: &str,
) -> Vec<PromptMessage> {
    let mut messages = vec![PromptMessage::new(Role::System, personality.system_prompt)];

    let start = context.len().saturating_sub(CONTEXT_WINDOW);
    for msg in &context[start..] {
        let role = if registry.is_personality(&msg.created_by) {
            Role::Assistant
        } else {
            Role::User
        };
        messages.push(PromptMessage::new(
            role,
            format!("{}: {}", msg.created_by, msg.content),
        ));
    }

    messages.push(PromptMessage::new(
        Role::User,
        format!("{} posted: {}", user, content),
    ));

    messages.push(PromptMessage::new(
        Role::System,
        format!(
            "Respond as {} with your {} personality. Keep it conversational, engaging, and under \
             150 characters. Write in lowercase (except for 'I' and proper nouns). DO NOT include \
             your name in the response - it will be shown separately.",
            personality.name, personality.style
        ),
    ));

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn msg(id: i64, by: &str, content: &str) -> Message {
        let now = Utc::now();
        Message {
            id,
            parent_id: if id == 1 { None } else { Some(1) },
            created_by: by.into(),
            created_at: now,
            updated_at: now,
            content: content.into(),
            likes: Default::default(),
            is_automated: false,
            personality_tag: None,
        }
    }

    #[test]
    fn prompt_frames_context_and_post() {
        let registry = PersonalityRegistry::builtin();
        let curious = registry.find_by_name("CuriousAI").unwrap();
        let context = vec![
            msg(1, "alice", "first"),
            msg(2, "bob", "second"),
            msg(3, "OptimistAI", "third"),
            msg(4, "carol", "fourth"),
        ];

        let prompt = build_prompt(&registry, curious, "what now?", &context, "dave");

        // system + 3 context + post + instruction
        assert_eq!(prompt.len(), 6);
        assert_eq!(prompt[0], PromptMessage::new(Role::System, curious.system_prompt));
        assert_eq!(prompt[1].content, "bob: second");
        assert_eq!(prompt[2].role, Role::Assistant);
        assert_eq!(prompt[3].role, Role::User);
        assert_eq!(prompt[4], PromptMessage::new(Role::User, "dave posted: what now?"));
        assert_eq!(prompt[5].role, Role::System);
        assert!(prompt[5].content.starts_with("Respond as CuriousAI with your curious personality"));
    }

    #[test]
    fn prompt_without_context() {
        let registry = PersonalityRegistry::builtin();
        let newbie = registry.find_by_name("NewbieAI").unwrap();
        let prompt = build_prompt(&registry, newbie, "hi", &[], "alice");
        assert_eq!(prompt.len(), 3);
    }
}

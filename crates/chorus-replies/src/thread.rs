use std::collections::{HashMap, HashSet};

use chorus_types::models::Message;

/// Walk parent pointers from `reference_id` up to the top of its chain.
///
/// Stops at a message with no parent, at a parent id that is not in
/// `messages`, or on a cycle; the last message reached is the root.
/// Returns `None` if `reference_id` itself is unknown.
pub fn thread_root(reference_id: i64, messages: &[Message]) -> Option<i64> {
    let index: HashMap<i64, &Message> = messages.iter().map(|m| (m.id, m)).collect();
    ascend(reference_id, &index)
}

fn ascend(reference_id: i64, index: &HashMap<i64, &Message>) -> Option<i64> {
    let mut current = *index.get(&reference_id)?;
    let mut visited = HashSet::from([current.id]);

    while let Some(parent_id) = current.parent_id {
        match index.get(&parent_id) {
            Some(&parent) if visited.insert(parent_id) => current = parent,
            _ => break,
        }
    }
    Some(current.id)
}

/// Conversation around `reference_id`: its root plus every message whose
/// chain leads to that root, at any depth, ordered by `created_at` then `id`.
///
/// Empty when `reference_id` is `None` or unknown.
pub fn resolve_context(reference_id: Option<i64>, messages: &[Message]) -> Vec<Message> {
    let Some(reference_id) = reference_id else {
        return Vec::new();
    };

    let index: HashMap<i64, &Message> = messages.iter().map(|m| (m.id, m)).collect();
    let Some(root) = ascend(reference_id, &index) else {
        return Vec::new();
    };

    let mut thread: Vec<Message> = messages
        .iter()
        .filter(|m| ascend(m.id, &index) == Some(root))
        .cloned()
        .collect();

    thread.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    thread
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    fn msg(id: i64, parent_id: Option<i64>, secs: i64) -> Message {
        Message {
            id,
            parent_id,
            created_by: format!("user{}", id),
            created_at: at(secs),
            updated_at: at(secs),
            content: format!("message {}", id),
            likes: Default::default(),
            is_automated: false,
            personality_tag: None,
        }
    }

    fn ids(thread: &[Message]) -> Vec<i64> {
        thread.iter().map(|m| m.id).collect()
    }

    #[test]
    fn none_or_unknown_reference_is_empty() {
        let messages = vec![msg(1, None, 0)];
        assert!(resolve_context(None, &messages).is_empty());
        assert!(resolve_context(Some(99), &messages).is_empty());
        assert_eq!(thread_root(99, &messages), None);
    }

    #[test]
    fn root_and_direct_replies_exclude_other_threads() {
        let messages = vec![
            msg(1, None, 0),
            msg(2, None, 1),
            msg(3, Some(1), 2),
            msg(4, Some(2), 3),
            msg(5, Some(1), 4),
        ];

        assert_eq!(ids(&resolve_context(Some(1), &messages)), vec![1, 3, 5]);
        assert_eq!(ids(&resolve_context(Some(2), &messages)), vec![2, 4]);
    }

    #[test]
    fn any_member_resolves_the_same_thread() {
        let messages = vec![msg(1, None, 0), msg(2, Some(1), 1), msg(3, Some(1), 2)];
        assert_eq!(resolve_context(Some(3), &messages), resolve_context(Some(1), &messages));
        assert_eq!(thread_root(3, &messages), Some(1));
    }

    #[test]
    fn deep_chains_flatten_into_the_root_bucket() {
        let messages = vec![
            msg(1, None, 0),
            msg(2, Some(1), 1),
            msg(3, Some(2), 2),
            msg(4, Some(3), 3),
            msg(5, None, 4),
        ];

        assert_eq!(thread_root(4, &messages), Some(1));
        assert_eq!(ids(&resolve_context(Some(4), &messages)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn sorted_by_time_then_id() {
        let messages = vec![
            msg(1, None, 10),
            msg(4, Some(1), 5),
            msg(3, Some(1), 5),
            msg(2, Some(1), 20),
        ];

        let thread = resolve_context(Some(1), &messages);
        assert_eq!(ids(&thread), vec![3, 4, 1, 2]);
        assert!(thread.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[test]
    fn dangling_parent_stops_at_deepest_known_ancestor() {
        let messages = vec![msg(2, Some(1), 0), msg(3, Some(2), 1), msg(4, Some(2), 2)];
        assert_eq!(thread_root(3, &messages), Some(2));
        assert_eq!(ids(&resolve_context(Some(4), &messages)), vec![2, 3, 4]);
    }

    #[test]
    fn cycles_terminate() {
        let messages = vec![msg(1, Some(2), 0), msg(2, Some(1), 1)];
        assert!(thread_root(1, &messages).is_some());
        let thread = resolve_context(Some(1), &messages);
        assert!(!thread.is_empty());
    }

    #[test]
    fn input_is_not_reordered() {
        let messages = vec![msg(2, Some(1), 1), msg(1, None, 0)];
        let before = messages.clone();
        let _ = resolve_context(Some(1), &messages);
        assert_eq!(messages, before);
    }
}

use rand::seq::IndexedRandom;

use crate::registry::Personality;

/// Generic stand-ins for template placeholders.
const STAND_INS: &[(&str, &str)] = &[
    ("topic", "this"),
    ("speculation", "something interesting happened"),
    ("connection", "something related"),
    ("practical_point", "the main issue"),
    ("innovation", "a new approach"),
    ("trend", "innovation"),
    ("time_period", "the past"),
    ("historical_parallel", "similar patterns"),
    ("historical_event", "history"),
    ("concept", "the concept"),
    ("question", "this is important"),
];

const LAST_RESORT: &str = "Interesting perspective!";

/// Replace every known `{name}` slot with its stand-in. Unknown slots are
/// left untouched.
pub fn fill(template: &str) -> String {
    STAND_INS
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
}

/// A random fallback reply for `personality`, placeholders filled.
pub fn fallback_reply(personality: &Personality) -> String {
    let template = personality
        .fallback_templates
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(LAST_RESORT);
    fill(template)
}

/// Every reply `fallback_reply` can produce for `personality`.
pub fn possible_fallbacks(personality: &Personality) -> Vec<String> {
    if personality.fallback_templates.is_empty() {
        return vec![LAST_RESORT.to_string()];
    }
    personality.fallback_templates.iter().map(|t| fill(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{PersonalityRegistry, Style};

    #[test]
    fn fill_replaces_known_placeholders() {
        assert_eq!(
            fill("I wonder what would happen if {speculation}?"),
            "I wonder what would happen if something interesting happened?"
        );
        assert_eq!(fill("{topic} and {topic}"), "this and this");
        assert_eq!(fill("keep {unknown} as is"), "keep {unknown} as is");
    }

    #[test]
    fn fallback_reply_comes_from_the_personality() {
        let registry = PersonalityRegistry::builtin();
        for p in registry.all() {
            let options = possible_fallbacks(p);
            for _ in 0..10 {
                let reply = fallback_reply(p);
                assert!(options.contains(&reply), "{} produced {:?}", p.name, reply);
                assert!(!reply.contains('{'));
            }
        }
    }

    #[test]
    fn empty_template_list_uses_last_resort() {
        let bare = Personality {
            name: "QuietAI",
            style: Style::Curious,
            system_prompt: "",
            traits: &[],
            fallback_templates: &[],
        };
        assert_eq!(fallback_reply(&bare), LAST_RESORT);
        assert_eq!(possible_fallbacks(&bare), vec![LAST_RESORT.to_string()]);
    }
}

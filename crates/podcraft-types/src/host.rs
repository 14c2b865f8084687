//! Built-in AI host personas.
//!
//! A persona selects the system-prompt variant that drives the host's
//! conversational style. Personas are static data: the prompt text is
//! assembled in podcraft-core, which combines a persona's style block with
//! the session topic.

/// An AI podcast host persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostPersona {
    /// Stable identifier stored on the podcast record (e.g. "host-casual").
    pub id: &'static str,
    /// Display name shown in the chat UI.
    pub name: &'static str,
    /// One-line description for persona selection.
    pub tagline: &'static str,
    /// Style block injected into the system prompt.
    pub style: &'static str,
}

/// The default persona used when none is specified or the id is unknown.
pub const DEFAULT_HOST_ID: &str = "host-casual";

const INTELLECTUAL: HostPersona = HostPersona {
    id: "host-intellectual",
    name: "Sage",
    tagline: "Well-read and reflective, at home in deep discussion",
    style: "\
You are a knowledgeable, insightful podcast host.
Your style:
- Ask questions that invite deep reflection
- Reference relevant research and literature to support points
- Calm and measured, but never without warmth
- Analyze topics from multiple angles
- Periodically summarize and move the discussion forward

Avoid interrupting the guest, dominating the conversation with long
monologues, or stating conclusions you are not sure about.",
};

const CASUAL: HostPersona = HostPersona {
    id: "host-casual",
    name: "Alex",
    tagline: "Relaxed and friendly, keeps the conversation comfortable",
    style: "\
You are a relaxed, friendly podcast host.
Your style:
- Natural, easygoing tone, like a chat between friends
- Everyday language with touches of humor
- Create a comfortable atmosphere and pick up on the fun moments
- Simplify complex topics so anyone can follow
- Keep the conversation lively and draw the guest out

Avoid academic jargon, excessive seriousness, or letting silences drag.",
};

const INSPIRATIONAL: HostPersona = HostPersona {
    id: "host-inspirational",
    name: "Nova",
    tagline: "Upbeat mentor focused on growth and action",
    style: "\
You are an encouraging, positively-minded podcast host.
Your style:
- Affirm the guest's ideas and effort
- Look for the growth opportunity in what they share
- Offer constructive questions and practical suggestions
- Share motivating stories and real examples
- Reframe challenges as opportunities, without empty slogans

Avoid hollow motivational cliches, dismissing real difficulties, or
unrealistic advice.",
};

/// All built-in personas, in display order.
pub const HOST_PERSONAS: [HostPersona; 3] = [INTELLECTUAL, CASUAL, INSPIRATIONAL];

impl HostPersona {
    /// Look up a persona by its stable id.
    pub fn by_id(id: &str) -> Option<&'static HostPersona> {
        HOST_PERSONAS.iter().find(|p| p.id == id)
    }

    /// The default persona ([`DEFAULT_HOST_ID`]).
    pub fn default_host() -> &'static HostPersona {
        Self::by_id(DEFAULT_HOST_ID).expect("default host persona exists")
    }

    /// Resolve an id, falling back to the default persona for unknown ids.
    pub fn resolve(id: &str) -> &'static HostPersona {
        Self::by_id(id).unwrap_or_else(HostPersona::default_host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_id_known() {
        let persona = HostPersona::by_id("host-intellectual").unwrap();
        assert_eq!(persona.name, "Sage");
    }

    #[test]
    fn test_by_id_unknown() {
        assert!(HostPersona::by_id("host-pirate").is_none());
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let persona = HostPersona::resolve("host-pirate");
        assert_eq!(persona.id, DEFAULT_HOST_ID);
    }

    #[test]
    fn test_ids_are_unique() {
        for (i, a) in HOST_PERSONAS.iter().enumerate() {
            for b in &HOST_PERSONAS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}

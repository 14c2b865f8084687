//! Prompt assembly.
//!
//! The system prompt is reconstructed locally from the host persona and the
//! session topic on every load -- it is never persisted to the message store
//! and never taken from storage.

use podcraft_types::host::HostPersona;
use podcraft_types::turn::{Turn, TurnRole};

/// Build the system prompt for a session.
pub fn system_prompt(host: &HostPersona, topic: &str, description: &str) -> String {
    let mut prompt = format!(
        "You are {name}, the host of a podcast episode about \"{topic}\".\n\n{style}\n",
        name = host.name,
        topic = topic,
        style = host.style,
    );
    if !description.trim().is_empty() {
        prompt.push_str(&format!("\nEpisode notes: {}\n", description.trim()));
    }
    prompt.push_str(
        "\nKeep replies conversational and podcast-length: a few sentences, \
         ending with something that invites the guest to continue.",
    );
    prompt
}

/// Build the hidden welcome instruction for an empty session.
///
/// This synthetic request is submitted directly to the completion provider;
/// it is never recorded as a user turn and never persisted.
pub fn welcome_instruction(host: &HostPersona, topic: &str) -> String {
    format!(
        "Open the episode: briefly introduce yourself as {name}, welcome the \
         guest to the podcast, mention that today's topic is \"{topic}\", and \
         ask the guest an opening question about it.",
        name = host.name,
        topic = topic,
    )
}

/// Render the conversation as a readable transcript.
///
/// Used both for the summarizer input and the `export` command. System
/// turns are skipped; assistant turns are attributed to the host by name.
pub fn transcript(turns: &[Turn], host_name: &str) -> String {
    turns
        .iter()
        .filter(|t| t.role != TurnRole::System)
        .map(|t| {
            let speaker = match t.role {
                TurnRole::Assistant => host_name,
                _ => "Guest",
            };
            format!("**{speaker}**: {}", t.content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

//! Podcast lifecycle CLI commands: new, list, hosts, export, delete, publish.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::{Confirm, Input};
use uuid::Uuid;

use podcraft_core::prompt;
use podcraft_core::session::duration::estimate_duration;
use podcraft_core::store::{MessageStore, PodcastStore};
use podcraft_types::host::{HOST_PERSONAS, HostPersona};
use podcraft_types::podcast::{Podcast, PodcastStatus};

use crate::state::AppState;

/// Parse a podcast id argument.
fn parse_id(id: &str) -> Result<Uuid> {
    id.parse::<Uuid>()
        .map_err(|_| anyhow::anyhow!("'{id}' is not a valid podcast id (expected a UUID)"))
}

/// Look up a podcast or fail with a friendly message.
pub(crate) async fn require_podcast(state: &AppState, id: &str) -> Result<Podcast> {
    let id = parse_id(id)?;
    state
        .podcast_store()
        .get(&id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no podcast with id {id}"))
}

/// Format a duration in seconds as `MMm SSs`.
fn format_duration(seconds: u32) -> String {
    format!("{}m {:02}s", seconds / 60, seconds % 60)
}

/// Create a new episode draft via flags or interactive prompts.
///
/// # Examples
///
/// ```bash
/// # Interactive
/// podcraft new
///
/// # One-shot with flags
/// podcraft new --title "Creativity" --host host-intellectual
/// ```
pub async fn create_podcast(
    state: &AppState,
    title: Option<String>,
    description: Option<String>,
    host: Option<String>,
    json: bool,
) -> Result<()> {
    let title = match title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("Episode topic")
            .interact_text()?,
    };

    let description = match description {
        Some(d) => d,
        None => Input::<String>::new()
            .with_prompt("Episode notes (optional)")
            .allow_empty(true)
            .interact_text()?,
    };

    let host_id = host.unwrap_or_else(|| state.config.default_host.clone());
    let Some(persona) = HostPersona::by_id(&host_id) else {
        let available: Vec<&str> = HOST_PERSONAS.iter().map(|p| p.id).collect();
        anyhow::bail!(
            "unknown host '{host_id}'; available hosts: {}",
            available.join(", ")
        );
    };

    let podcast = Podcast::draft(title, description, host_id.clone());
    state.podcast_store().create(&podcast).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&podcast)?);
        return Ok(());
    }

    println!();
    println!("  {} Episode created!", style("✓").green().bold());
    println!();
    println!("  {}  {}", style("Topic:").bold(), style(&podcast.title).cyan());
    println!(
        "  {}   {} ({})",
        style("Host:").bold(),
        persona.name,
        style(persona.id).dim()
    );
    println!(
        "  {}     {}",
        style("ID:").bold(),
        style(podcast.id.to_string()).dim()
    );
    println!();
    println!(
        "  Start the conversation: {}",
        style(format!("podcraft chat {}", podcast.id)).yellow()
    );
    println!();

    Ok(())
}

/// List all episodes in a table, most recent first.
pub async fn list_podcasts(state: &AppState, json: bool) -> Result<()> {
    let podcasts = state.podcast_store().list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&podcasts)?);
        return Ok(());
    }

    if podcasts.is_empty() {
        println!();
        println!(
            "  {} No episodes yet. Create one with: {}",
            style("i").blue().bold(),
            style("podcraft new").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Topic").fg(Color::White),
        Cell::new("Host").fg(Color::White),
        Cell::new("Status").fg(Color::White),
        Cell::new("Duration").fg(Color::White),
        Cell::new("Id").fg(Color::White),
    ]);

    for podcast in &podcasts {
        let status_cell = match podcast.status {
            PodcastStatus::Draft => Cell::new("○ draft").fg(Color::Yellow),
            PodcastStatus::Published => Cell::new("● published").fg(Color::Green),
        };
        let duration = if podcast.duration_seconds == 0 {
            "-".to_string()
        } else {
            format_duration(podcast.duration_seconds)
        };
        let host = HostPersona::resolve(&podcast.host_id);

        table.add_row(vec![
            Cell::new(&podcast.title).fg(Color::Cyan),
            Cell::new(host.name),
            status_cell,
            Cell::new(duration),
            Cell::new(podcast.id.to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} episode{}",
        style(podcasts.len()).bold(),
        if podcasts.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// List the built-in host personas.
pub fn list_hosts(json: bool) -> Result<()> {
    if json {
        let hosts: Vec<serde_json::Value> = HOST_PERSONAS
            .iter()
            .map(|p| {
                serde_json::json!({
                    "id": p.id,
                    "name": p.name,
                    "tagline": p.tagline,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&hosts)?);
        return Ok(());
    }

    println!();
    for persona in &HOST_PERSONAS {
        println!(
            "  {} {} {}",
            style(persona.name).cyan().bold(),
            style(format!("({})", persona.id)).dim(),
            persona.tagline
        );
    }
    println!();
    Ok(())
}

/// Export an episode transcript as text to stdout.
pub async fn export_podcast(state: &AppState, id: &str) -> Result<()> {
    let podcast = require_podcast(state, id).await?;
    let host = HostPersona::resolve(&podcast.host_id);
    let turns = state.turn_store().list_turns(&podcast.id).await?;

    println!("# {}", podcast.title);
    println!();
    println!("Host: {} ({})", host.name, host.id);
    println!("Created: {}", podcast.created_at.format("%Y-%m-%d %H:%M UTC"));
    if podcast.duration_seconds > 0 {
        println!("Duration: {}", format_duration(podcast.duration_seconds));
    }
    println!();

    let transcript = prompt::transcript(&turns, host.name);
    if transcript.is_empty() {
        println!("(no conversation yet)");
    } else {
        println!("{transcript}");
    }

    if let Some(ref summary) = podcast.summary {
        println!();
        println!("## Summary");
        println!();
        println!("{summary}");
    }

    Ok(())
}

/// Delete an episode and, by cascade, its conversation history.
pub async fn delete_podcast(state: &AppState, id: &str, force: bool, json: bool) -> Result<()> {
    let podcast = require_podcast(state, id).await?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete '{}' and its conversation history?",
                podcast.title
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  {}", style("Cancelled.").dim());
            return Ok(());
        }
    }

    state.podcast_store().delete(&podcast.id).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "deleted": podcast.id.to_string() })
        );
    } else {
        println!(
            "  {} Deleted '{}'",
            style("✓").green().bold(),
            style(&podcast.title).cyan()
        );
    }
    Ok(())
}

/// Publish a finished episode, recomputing the duration from the stored turns.
pub async fn publish_podcast(state: &AppState, id: &str, json: bool) -> Result<()> {
    let podcast = require_podcast(state, id).await?;

    if podcast.status == PodcastStatus::Published {
        anyhow::bail!("'{}' is already published", podcast.title);
    }

    let turns = state.turn_store().list_turns(&podcast.id).await?;
    if turns.is_empty() {
        anyhow::bail!(
            "'{}' has no conversation yet; run `podcraft chat {}` first",
            podcast.title,
            podcast.id
        );
    }

    let duration_seconds = estimate_duration(&turns);
    state
        .podcast_store()
        .update_duration(&podcast.id, duration_seconds)
        .await?;
    state.podcast_store().publish(&podcast.id).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "published": podcast.id.to_string() })
        );
    } else {
        println!(
            "  {} Published '{}' ({})",
            style("✓").green().bold(),
            style(&podcast.title).cyan(),
            format_duration(duration_seconds)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0m 00s");
        assert_eq!(format_duration(65), "1m 05s");
        assert_eq!(format_duration(600), "10m 00s");
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert!(parse_id("not-a-uuid").is_err());
        assert!(parse_id(&Uuid::now_v7().to_string()).is_ok());
    }
}

//! Main chat loop orchestration.
//!
//! Coordinates the complete episode conversation: session open (with
//! welcome generation or history resume), the input loop with streaming
//! replies, slash commands, and the finish flow.

use std::io::Write;

use console::style;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use podcraft_core::llm::CompletionStream;
use podcraft_core::session::SessionOrchestrator;
use podcraft_infra::config;
use podcraft_infra::llm::deepseek::{DeepSeekConfig, DeepSeekProvider};
use podcraft_infra::sqlite::{SqlitePodcastStore, SqliteTurnStore};
use podcraft_infra::summarizer::LlmSummarizer;
use podcraft_types::error::SessionError;
use podcraft_types::llm::StreamEvent;
use podcraft_types::turn::TurnRole;

use crate::state::AppState;

use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};

type Orchestrator = SessionOrchestrator<
    SqliteTurnStore,
    SqlitePodcastStore,
    DeepSeekProvider,
    LlmSummarizer<DeepSeekProvider>,
>;

fn thinking_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Run the interactive chat loop for an episode.
pub async fn run_chat_loop(state: &AppState, podcast_id: &str) -> anyhow::Result<()> {
    let podcast = crate::cli::podcast::require_podcast(state, podcast_id).await?;
    let host = podcraft_types::host::HostPersona::resolve(&podcast.host_id);
    let params = state.config.model_params();

    let api_key = config::api_key()?;
    let provider = DeepSeekProvider::new(DeepSeekConfig::new(api_key.clone(), &params.model));
    let summarizer = LlmSummarizer::new(
        DeepSeekProvider::new(DeepSeekConfig::new(api_key, &params.model)),
        params.clone(),
    );

    let mut orchestrator: Orchestrator = SessionOrchestrator::new(
        state.turn_store(),
        state.podcast_store(),
        provider,
        summarizer,
        params,
    );

    // Banner
    println!();
    println!(
        "  {} {}",
        style("🎙").bold(),
        style(&podcast.title).cyan().bold()
    );
    println!(
        "  {} {} {}",
        style("Hosted by").dim(),
        host.name,
        style(format!("· {}", podcast.id)).dim()
    );
    println!(
        "  {}",
        style("Type /help for commands, /finish to wrap up.").dim()
    );

    // The input handler must exist before any stream is driven: Readline
    // holds the terminal in raw mode, so Ctrl+C arrives as an input event
    // on stdin rather than as SIGINT.
    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    // Open the session; an empty history streams a welcome from the host.
    let spinner = thinking_spinner("warming up...");
    let welcome = match orchestrator
        .open_session(podcast.id, &podcast.title, &podcast.description, host.id)
        .await
    {
        Ok(stream) => stream,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    };

    match welcome {
        Some(stream) => {
            drive_stream(&mut orchestrator, &mut chat_input, stream, spinner, host.name).await;
        }
        None => {
            spinner.finish_and_clear();
            info!(turn_count = orchestrator.turns().len(), "Resumed episode");
            println!();
            println!(
                "  {}",
                style(format!(
                    "Resuming conversation ({} turns so far). Use /history to review.",
                    orchestrator.turns().len()
                ))
                .dim()
            );
            println!();
        }
    }

    // Input loop
    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Draft saved. See you next time.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!(
                    "\n  {}",
                    style("Press Ctrl+D to exit, or keep chatting.").dim()
                );
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => {
                            commands::print_help();
                            continue;
                        }
                        ChatCommand::Clear => {
                            chat_input.clear();
                            continue;
                        }
                        ChatCommand::History => {
                            print_history(&orchestrator, host.name);
                            continue;
                        }
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Draft saved. See you next time.").dim());
                            break;
                        }
                        ChatCommand::Finish => {
                            if finish_episode(&mut orchestrator).await? {
                                break;
                            }
                            continue;
                        }
                        ChatCommand::Unknown(cmd_name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(cmd_name).dim()
                            );
                            continue;
                        }
                    }
                }

                let spinner = thinking_spinner("thinking...");
                let stream = match orchestrator.submit_user_input(&text).await {
                    Ok(stream) => stream,
                    Err(SessionError::EmptyInput) => {
                        spinner.finish_and_clear();
                        continue;
                    }
                    Err(e) => {
                        spinner.finish_and_clear();
                        println!("\n  {} {e}\n", style("!").yellow().bold());
                        continue;
                    }
                };

                drive_stream(&mut orchestrator, &mut chat_input, stream, spinner, host.name).await;
            }
        }
    }

    Ok(())
}

/// What to do with an input event that arrives while a reply is streaming.
#[derive(Debug, PartialEq)]
enum StreamInterrupt {
    Cancel,
    Ignore,
}

/// Ctrl+C and Ctrl+D cancel the in-flight reply; lines typed ahead while
/// the host is speaking are dropped rather than queued.
fn classify_mid_stream(event: &InputEvent) -> StreamInterrupt {
    match event {
        InputEvent::Interrupted | InputEvent::Eof => StreamInterrupt::Cancel,
        InputEvent::Message(_) => StreamInterrupt::Ignore,
    }
}

/// Consume a completion stream, feeding events into the orchestrator and
/// rendering tokens as they arrive. Ctrl+C cancels the stream; the partial
/// reply is discarded and the guest can retry.
async fn drive_stream(
    orchestrator: &mut Orchestrator,
    chat_input: &mut ChatInput,
    mut stream: CompletionStream,
    spinner: ProgressBar,
    host_name: &str,
) {
    let mut first_token_received = false;

    loop {
        tokio::select! {
            input = chat_input.read_line() => {
                if classify_mid_stream(&input) == StreamInterrupt::Cancel {
                    spinner.finish_and_clear();
                    orchestrator.cancel_stream();
                    println!("\n\n  {}", style("Reply cancelled.").dim());
                    println!();
                    return;
                }
            }
            event = stream.next() => {
                let Some(event) = event else { break };
                match event {
                    Ok(StreamEvent::Connected) => {}
                    Ok(StreamEvent::TextDelta { text }) => {
                        if !first_token_received {
                            spinner.finish_and_clear();
                            first_token_received = true;
                            print!("\n  {} ", style(host_name).cyan().bold());
                            let _ = std::io::stdout().flush();
                        }
                        print!("{text}");
                        let _ = std::io::stdout().flush();
                        orchestrator.on_stream_token(&text);
                    }
                    Ok(StreamEvent::Usage(_)) => {}
                    Ok(StreamEvent::Done) => break,
                    Err(e) => {
                        spinner.finish_and_clear();
                        orchestrator.on_stream_error(&e);
                        eprintln!("\n  {} Host error: {e}", style("!").red().bold());
                        eprintln!(
                            "  {}",
                            style("Type a message to retry, /exit to leave.").dim()
                        );
                        println!();
                        return;
                    }
                }
            }
        }
    }

    if !first_token_received {
        spinner.finish_and_clear();
    }
    if let Err(e) = orchestrator.on_stream_complete().await {
        eprintln!("\n  {} {e}", style("!").red().bold());
    }
    println!();
    println!();
}

/// Print the conversation so far.
fn print_history(orchestrator: &Orchestrator, host_name: &str) {
    let turns = orchestrator.turns();
    if turns.is_empty() {
        println!("\n  {}\n", style("Nothing said yet.").dim());
        return;
    }
    println!();
    for turn in turns {
        let speaker = match turn.role {
            TurnRole::Assistant => format!("{}", style(host_name).cyan().bold()),
            _ => format!("{}", style("You").green().bold()),
        };
        println!("  {speaker} {}", turn.content);
        println!();
    }
}

/// Run the finish flow. Returns `true` when the episode was completed and
/// the loop should end.
async fn finish_episode(orchestrator: &mut Orchestrator) -> anyhow::Result<bool> {
    let spinner = thinking_spinner("wrapping up the episode...");
    match orchestrator.finish_conversation().await {
        Ok(report) => {
            spinner.finish_and_clear();
            println!();
            println!("  {} Episode finished!", style("✓").green().bold());
            println!(
                "  {}  {}m {:02}s",
                style("Duration:").bold(),
                report.duration_seconds / 60,
                report.duration_seconds % 60
            );
            match report.summary {
                Some(summary) => {
                    println!("  {}   {}", style("Summary:").bold(), summary);
                }
                None => {
                    println!(
                        "  {}   {}",
                        style("Summary:").bold(),
                        style("unavailable (try `podcraft export` for the raw transcript)").dim()
                    );
                }
            }
            println!();
            Ok(true)
        }
        Err(e) => {
            spinner.finish_and_clear();
            println!("\n  {} {e}\n", style("!").yellow().bold());
            Ok(false)
        }
    }
}

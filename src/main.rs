use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;

use yapmeter::analysis::aggregator::Aggregator;
use yapmeter::analysis::scoring::{compute_word_ranking, compute_yap_ranking, YapWeights};
use yapmeter::chat::auth;
use yapmeter::chat::client::ChatClient;
use yapmeter::config::{self, Settings};
use yapmeter::menu::{self, MenuAction};
use yapmeter::output::{report, terminal};

/// Yapmeter: yap-leaderboard chat statistics for Twitch chat.
///
/// Counts every chatter's letters, messages, and vocabulary for one
/// session, then ranks them by a distribution-relative "yap cost".
#[derive(Parser)]
#[command(name = "yapmeter", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to the configured channel and count chat until Ctrl-C
    Run {
        /// Channel to join, overriding the configured one for this run
        #[arg(long)]
        channel: Option<String>,
    },

    /// Edit settings interactively (default when no command is given)
    Settings,

    /// Show current settings without connecting
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("yapmeter=info")),
        )
        .init();

    let cli = Cli::parse();

    let settings_path = PathBuf::from(config::SETTINGS_FILE);
    let mut settings = Settings::load(&settings_path)?;

    match cli.command.unwrap_or(Commands::Settings) {
        Commands::Run { channel } => {
            if let Some(channel) = channel {
                settings.target_channel = channel.trim().to_lowercase();
            }
            run_bot(&settings).await?;
        }

        Commands::Settings => {
            if menu::settings_loop(&mut settings, &settings_path)? == MenuAction::StartBot {
                run_bot(&settings).await?;
            }
        }

        Commands::Status => {
            menu::print_summary(&settings);
            println!(
                "Reports are written to {}/<channel>/ at the end of each run.",
                report::OUTPUT_DIR
            );
        }
    }

    Ok(())
}

/// One full session: connect, count until shutdown, score, report.
async fn run_bot(settings: &Settings) -> Result<()> {
    settings.require_channel()?;

    let auth = auth::resolve_auth().await?;
    let mut aggregator = Aggregator::new(settings.run_config());
    let mut client = ChatClient::connect(&settings.target_channel, &auth).await?;

    println!(
        "Bot is ready for work, counting chat in #{}",
        settings.target_channel
    );
    println!("Press Ctrl-C to stop and save stats");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            result = client.next_message() => match result {
                Ok(Some(message)) => aggregator.handle_message(&message.sender, &message.text),
                Ok(None) => {
                    warn!("Chat connection closed by server");
                    break;
                }
                Err(err) => {
                    warn!(error = %err, "Chat read failed");
                    break;
                }
            },
            _ = &mut ctrl_c => {
                println!("\nStopping...");
                break;
            }
        }
    }

    client.quit().await;

    // Score once on the final state, after the last counted message
    println!("Saving stats");
    let session = aggregator.into_session();
    let weights = YapWeights::default();
    let yap_ranking = compute_yap_ranking(session.users.iter(), &weights);
    let word_ranking = compute_word_ranking(session.words.snapshot());

    let dir = report::write_reports(
        &session.started_at,
        &settings.target_channel,
        &yap_ranking,
        &word_ranking,
        settings.padding,
    )?;

    terminal::display_yap_ranking(&yap_ranking);
    terminal::display_word_ranking(&word_ranking);
    println!("\nReports written to {}", dir.display());

    Ok(())
}

// Interactive settings menu — a line-oriented prompt loop.
//
// Commands are a small tagged enum with one parser and one handler per
// variant. Every applied edit is saved immediately, so quitting the menu
// at any point leaves a consistent file behind.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::{Settings, TOKEN_ENV_VAR};

/// What the caller should do after the menu loop ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartBot,
    Quit,
}

/// The menu's command set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuCommand {
    SetChannel,
    ToggleExcluded,
    ToggleLogging,
    SetPadding,
    Run,
    Quit,
}

impl MenuCommand {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "1" => Some(Self::SetChannel),
            "2" => Some(Self::ToggleExcluded),
            "3" => Some(Self::ToggleLogging),
            "4" => Some(Self::SetPadding),
            "r" => Some(Self::Run),
            "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Show current settings and where the chat token comes from.
pub fn print_summary(settings: &Settings) {
    match Settings::chat_token() {
        Some(_) => println!("Chat token: set via {TOKEN_ENV_VAR} (authenticated)"),
        None => println!("Chat token: not set (anonymous read-only)"),
    }

    let channel = if settings.target_channel.is_empty() {
        "(not set)".to_string()
    } else {
        settings.target_channel.clone()
    };
    println!("Target channel: {channel}");

    let excluded: Vec<&str> = settings.excluded_users.iter().map(String::as_str).collect();
    println!("Excluded users: [{}]", excluded.join(", "));

    let logging = if settings.logging { "Enabled" } else { "Disabled" };
    println!("Logging: {logging}");
    println!("Padding: {}\n", settings.padding);
}

fn print_options() {
    println!("1. Set target channel");
    println!("2. Toggle excluded user");
    println!("3. Toggle logging");
    println!("4. Set padding\n");
    println!("r. Start bot");
    println!("q. Quit\n");
}

/// Run the menu until the user starts the bot or quits.
///
/// `path` is where edits are saved. Empty input cancels an edit; invalid
/// input is rejected without saving.
pub fn settings_loop(settings: &mut Settings, path: &Path) -> Result<MenuAction> {
    loop {
        print_summary(settings);
        print_options();

        let input = prompt("Enter option: ")?;
        let Some(command) = MenuCommand::parse(&input) else {
            println!("{}\n", "Unknown option".dimmed());
            continue;
        };

        match command {
            MenuCommand::Run => return Ok(MenuAction::StartBot),
            MenuCommand::Quit => return Ok(MenuAction::Quit),

            MenuCommand::SetChannel => {
                let value = prompt("Enter target channel (empty cancels): ")?;
                if !value.is_empty() {
                    settings.target_channel = value.to_lowercase();
                    settings.save(path)?;
                }
            }

            MenuCommand::ToggleExcluded => {
                let value = prompt("Enter user to toggle (empty cancels): ")?;
                if !value.is_empty() {
                    let excluded = settings.toggle_excluded(&value);
                    settings.save(path)?;
                    let verb = if excluded { "now excluded" } else { "no longer excluded" };
                    println!("{} is {verb}\n", value.to_lowercase());
                }
            }

            MenuCommand::ToggleLogging => {
                settings.logging = !settings.logging;
                settings.save(path)?;
            }

            MenuCommand::SetPadding => {
                let value = prompt("Enter padding (empty cancels): ")?;
                if value.is_empty() {
                    continue;
                }
                match value.parse::<usize>() {
                    Ok(padding) => {
                        settings.padding = padding;
                        settings.save(path)?;
                    }
                    Err(_) => println!("{}\n", "Invalid padding".dimmed()),
                }
            }
        }
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

//! Interactive session
//!
//! Line-oriented loop: set the project ID and preview key, then run usage
//! queries repeatedly. A failing query is reported and the loop continues.

use anyhow::{Context, Result};
use colored::*;
use is_terminal::IsTerminal;
use std::io::{self, BufRead, Write};

use super::commands::usage::handler::connect;
use super::{GlobalArgs, OutputFormat, output};
use crate::config::{Settings, is_unset};

const BANNER: &str = "Item Usage Helper
Enter a command
To set the project ID, enter 'setID Your_Project_ID'
To set the preview key, enter 'setKey Your_Preview_API_Key'
To list items which are not referenced by any other item, enter 'unused'
To list items which are referenced, enter 'used'
To list linked item (a.k.a. modular content) and rich text elements which exist in your \
project, enter 'elements'
To leave, enter 'exit'";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    SetProjectId(String),
    SetPreviewKey(String),
    Unused,
    Used,
    Elements,
    Help,
    Exit,
    Empty,
    /// Right command, wrong number of arguments
    Usage(&'static str),
    TooManyArguments,
    Unknown(String),
}

/// Parse one input line. Command words are case-insensitive.
pub fn parse_command(line: &str) -> ShellCommand {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() > 2 {
        return ShellCommand::TooManyArguments;
    }

    let Some(command) = parts.first() else {
        return ShellCommand::Empty;
    };
    let argument = parts.get(1).map(|s| s.to_string());

    match (command.to_ascii_lowercase().as_str(), argument) {
        ("setid", Some(id)) => ShellCommand::SetProjectId(id),
        ("setid", None) => ShellCommand::Usage("setID Your_Project_ID"),
        ("setkey", Some(key)) => ShellCommand::SetPreviewKey(key),
        ("setkey", None) => ShellCommand::Usage("setKey Your_Preview_API_Key"),
        ("unused", None) => ShellCommand::Unused,
        ("used", None) => ShellCommand::Used,
        ("elements", None) => ShellCommand::Elements,
        ("help", None) => ShellCommand::Help,
        ("exit" | "quit", None) => ShellCommand::Exit,
        ("unused", Some(_)) => ShellCommand::Usage("unused"),
        ("used", Some(_)) => ShellCommand::Usage("used"),
        ("elements", Some(_)) => ShellCommand::Usage("elements"),
        _ => ShellCommand::Unknown(command.to_string()),
    }
}

/// Settings the session works with; starts from the file and flags
#[derive(Debug, Clone)]
pub struct ShellState {
    pub settings: Settings,
    pub format: OutputFormat,
}

impl ShellState {
    /// Project ID, once one has been set
    fn ready(&self) -> Option<&str> {
        self.settings
            .project_id
            .as_deref()
            .filter(|id| !is_unset(id))
    }
}

/// Run one command. Returns `false` when the session should end.
pub async fn execute<W: Write>(
    state: &mut ShellState,
    command: ShellCommand,
    out: &mut W,
) -> Result<bool> {
    match command {
        ShellCommand::SetProjectId(id) => {
            writeln!(out, "Project ID set to {}", id)?;
            state.settings.project_id = Some(id);
        }
        ShellCommand::SetPreviewKey(key) => {
            state.settings.preview_key = Some(key);
            writeln!(out, "Preview key set")?;
        }
        ShellCommand::Unused | ShellCommand::Used | ShellCommand::Elements => {
            run_query(state, &command, out).await?;
        }
        ShellCommand::Help => writeln!(out, "{}", BANNER)?,
        ShellCommand::Exit => return Ok(false),
        ShellCommand::Empty => {}
        ShellCommand::Usage(usage) => writeln!(out, "Usage: {}", usage)?,
        ShellCommand::TooManyArguments => writeln!(
            out,
            "Please enter a single command, using a space between the command and its \
             parameter if applicable"
        )?,
        ShellCommand::Unknown(command) => {
            log::debug!("Unrecognized shell command: {}", command);
            writeln!(out, "Command Not Recognized")?
        }
    }
    Ok(true)
}

async fn run_query<W: Write>(
    state: &ShellState,
    command: &ShellCommand,
    out: &mut W,
) -> Result<()> {
    if state.ready().is_none() {
        writeln!(out, "Please set the project ID first.")?;
        return Ok(());
    }

    let options = state.settings.to_delivery_options();
    let usage = match connect(&options) {
        Ok(usage) => usage,
        Err(e) => {
            writeln!(out, "Error creating delivery client\n{:#}", e)?;
            return Ok(());
        }
    };

    let rendered = match command {
        ShellCommand::Unused => usage
            .unused_items()
            .await
            .context("Failed to find unused items")
            .and_then(|items| output::render_items(&items, state.format)),
        ShellCommand::Used => usage
            .used_items()
            .await
            .context("Failed to find used items")
            .and_then(|items| output::render_items(&items, state.format)),
        _ => usage
            .reference_fields()
            .await
            .context("Failed to scan content types")
            .and_then(|fields| output::render_fields(&fields, state.format)),
    };

    match rendered {
        Ok(text) => writeln!(out, "{}", text)?,
        Err(e) => writeln!(out, "{} {:#}", "Error:".red().bold(), e)?,
    }
    Ok(())
}

/// Source of input lines: a prompt on a terminal, plain lines otherwise
enum LineReader {
    Prompt,
    Piped(io::Lines<io::StdinLock<'static>>),
}

impl LineReader {
    fn new() -> Self {
        if io::stdin().is_terminal() {
            Self::Prompt
        } else {
            Self::Piped(io::stdin().lock().lines())
        }
    }

    /// Next line, or `None` at end of input
    fn next_line(&mut self) -> Result<Option<String>> {
        match self {
            Self::Prompt => {
                let line = dialoguer::Input::<String>::new()
                    .with_prompt("item-usage")
                    .allow_empty(true)
                    .interact_text()
                    .context("Failed to read command")?;
                Ok(Some(line))
            }
            Self::Piped(lines) => lines.next().transpose().context("Failed to read command"),
        }
    }
}

pub async fn run(global: &GlobalArgs) -> Result<()> {
    let settings = crate::config::load()?.merge(global.to_settings());
    let mut state = ShellState {
        settings,
        format: global.format,
    };

    println!("{}", BANNER);
    let mut reader = LineReader::new();
    let mut stdout = io::stdout();

    while let Some(line) = reader.next_line()? {
        if !execute(&mut state, parse_command(&line), &mut stdout).await? {
            break;
        }
        println!("\n{}", "Enter a command".dimmed());
    }
    Ok(())
}

// src/cli.rs
//! Line-oriented chat front-end.
//!
//! Reads from any async line source and writes to any `Write`, so the same
//! loop drives the terminal binary and the integration tests.

use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::persona::PersonalityStore;
use crate::session::{ChatController, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Say(String),
    Switch(String),
    List,
    Mood,
    History,
    Help,
    Exit,
    Empty,
    Unknown(String),
}

impl Command {
    /// Chat text is kept exactly as typed; only command detection looks at
    /// the trimmed line.
    pub fn parse(raw: &str) -> Self {
        let line = raw.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            return Command::Exit;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Say(raw.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        match (name.to_lowercase().as_str(), arg) {
            ("persona", id) if !id.is_empty() => Command::Switch(id.to_string()),
            ("list", _) => Command::List,
            ("mood", _) => Command::Mood,
            ("history", _) => Command::History,
            ("help", _) => Command::Help,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

const HELP: &str = "Commands: /persona <id>, /list, /mood, /history, /help, exit";

/// Resolve the user's answer to the selection prompt: a 1-based number, an
/// identifier, or nothing for the default.
pub fn resolve_selection(store: &PersonalityStore, answer: &str) -> Option<String> {
    let available = store.list_available();
    let answer = answer.trim();
    if answer.is_empty() {
        return available.into_iter().next();
    }
    if let Ok(n) = answer.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| available.get(i).cloned());
    }
    available.into_iter().find(|id| id == answer)
}

fn write_listing<W: Write>(out: &mut W, store: &PersonalityStore, current: Option<&str>) -> Result<()> {
    for (i, id) in store.list_available().iter().enumerate() {
        let marker = if Some(id.as_str()) == current { " *" } else { "" };
        writeln!(out, "{}. {}{}", i + 1, id, marker)?;
    }
    Ok(())
}

fn write_banner<W: Write>(out: &mut W, session: &Session) -> Result<()> {
    let personality = session.personality();
    writeln!(out, "\nTalking to: {}", personality.name)?;
    writeln!(out, "Traits: {}", personality.traits)?;
    writeln!(out, "Current Mood: {}", session.emotion())?;
    writeln!(out, "Enter your messages below (type 'exit' to quit, '/help' for commands).\n")?;
    Ok(())
}

/// Run the chat loop until `exit` or end of input. Returns the final
/// session.
pub async fn run<R, W>(
    controller: &ChatController,
    store: &PersonalityStore,
    preferred: Option<&str>,
    input: R,
    mut out: W,
) -> Result<Option<Session>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    let identifier = match preferred {
        Some(id) => id.to_string(),
        None => {
            writeln!(out, "Welcome to ShaiMind!\nAvailable personalities:")?;
            write_listing(&mut out, store, None)?;
            loop {
                write!(out, "Select a personality by number: ")?;
                out.flush()?;
                let Some(answer) = lines.next_line().await? else {
                    return Ok(None);
                };
                match resolve_selection(store, &answer) {
                    Some(id) => break id,
                    None => writeln!(out, "No personality matches '{}'.", answer.trim())?,
                }
            }
        }
    };

    let mut session = Session::open(store, Some(&identifier))
        .with_context(|| format!("cannot start a conversation with '{}'", identifier))?;
    write_banner(&mut out, &session)?;

    loop {
        write!(out, "You: ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Command::Empty => continue,
            Command::Exit => {
                writeln!(out, "Goodbye!")?;
                break;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Unknown(cmd) => writeln!(out, "Unknown command '{}'. {}", cmd, HELP)?,
            Command::List => write_listing(&mut out, store, Some(session.identifier()))?,
            Command::Mood => writeln!(out, "Current Mood: {}", session.emotion())?,
            Command::History => writeln!(out, "{}", session.history().render(&session.personality().name))?,
            Command::Switch(id) => match controller.switch(&mut session, store, &id) {
                Ok(()) => write_banner(&mut out, &session)?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            Command::Say(text) => {
                let outcome = controller.handle_turn(&mut session, &text).await;
                debug!("Reply source: {:?}", outcome.source);
                writeln!(out, "\n{}:\n{}\n", session.personality().name, outcome.reply)?;
            }
        }
    }

    Ok(Some(session))
}

//! Parsing of one REPL input line into a [`Command`].

use crate::error::{Error, Result};

pub const ADD_USAGE: &str = "add <Имя> <Роль>";
pub const LIST_USAGE: &str = "list | list --role <Роль>";
pub const REMOVE_USAGE: &str = "remove <Имя>";

/// A single parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add <name> <role...>`: name is one token, role is the rest joined by spaces.
    Add { name: String, role: String },
    /// `list` or `list --role <role...>`.
    List { role: Option<String> },
    Count,
    /// `remove <name...>`
    Remove { name: String },
    Help,
    Exit,
}

impl Command {
    /// Parse a line. Blank lines yield `Ok(None)`.
    ///
    /// Arguments are whitespace tokens; the command word is matched
    /// case-insensitively.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(first) = parts.first() else {
            return Ok(None);
        };

        let command = match first.to_lowercase().as_str() {
            "exit" | "quit" => Command::Exit,
            "help" | "--help" | "-h" => Command::Help,
            "add" => {
                if parts.len() < 3 {
                    return Err(Error::CommandUsage { usage: ADD_USAGE });
                }
                Command::Add {
                    name: parts[1].to_string(),
                    role: parts[2..].join(" "),
                }
            }
            "list" => match parts.as_slice() {
                [_] => Command::List { role: None },
                [_, "--role", role @ ..] if !role.is_empty() => Command::List {
                    role: Some(role.join(" ")),
                },
                _ => return Err(Error::CommandUsage { usage: LIST_USAGE }),
            },
            "count" => Command::Count,
            "remove" => {
                if parts.len() < 2 {
                    return Err(Error::CommandUsage { usage: REMOVE_USAGE });
                }
                Command::Remove {
                    name: parts[1..].join(" "),
                }
            }
            other => {
                return Err(Error::UnknownCommand {
                    command: other.to_string(),
                })
            }
        };

        Ok(Some(command))
    }
}

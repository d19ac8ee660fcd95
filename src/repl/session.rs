//! Command dispatch and output formatting for the REPL.
//!
//! A [`Session`] owns the store and an output sink. Every outcome, success or
//! failure, is written to the sink as a single `OK: ...` / `ERR: ...` line or
//! a listing; nothing here terminates the process.

use std::io::{self, Write};

use tracing::debug;

use crate::error::{Error, Result};
use crate::roster::{Member, Store};

use super::command::Command;

pub const BANNER: &str =
    "Учёт экспедиции (CLI). Введите \"help\" для справки, \"exit\" для выхода.";

const EMPTY_LIST: &str = "нет записей";

const HELP: &[&str] = &[
    "Доступные команды:",
    "  add <Имя> <Роль>",
    "  list",
    "  list --role <Роль>",
    "  count",
    "  remove <Имя>",
    "  help | exit",
];

/// Whether the input loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session<W: Write> {
    store: Store,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(store: Store, out: W) -> Self {
        Self { store, out }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", BANNER)
    }

    pub fn prompt(&mut self, prompt: &str) -> io::Result<()> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()
    }

    /// Terminate a pending prompt line, used on end of input and interrupt.
    pub fn finish_line(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Print the outcome of a failed startup load.
    pub fn report(&mut self, err: &Error) -> io::Result<()> {
        writeln!(self.out, "ERR: {}", err)
    }

    /// Parse and execute one input line.
    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                debug!(error = %e.format_for_log(), line = %line.trim(), "Rejected input");
                self.reply(Err(e))?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Exit => return Ok(Flow::Exit),
            Command::Help => {
                for line in HELP {
                    writeln!(self.out, "{}", line)?;
                }
                writeln!(self.out, "Роли: {}", self.store.roles())?;
            }
            Command::Add { name, role } => {
                let result = self
                    .store
                    .add(&name, &role)
                    .map(|m| format!("добавлен \"{}\" ({})", m.name, m.role));
                self.reply(result)?;
            }
            Command::List { role: None } => {
                let items = self.store.list_all();
                print_list(&mut self.out, &items)?;
            }
            Command::List { role: Some(role) } => {
                let items = self.store.list_by_role(&role);
                print_list(&mut self.out, &items)?;
            }
            Command::Count => {
                writeln!(self.out, "Всего участников: {}", self.store.count())?;
            }
            Command::Remove { name } => {
                let shown = name.trim().to_string();
                let result = self
                    .store
                    .remove(&name)
                    .map(|_| format!("удалён \"{}\"", shown));
                self.reply(result)?;
            }
        }

        self.out.flush()?;
        Ok(Flow::Continue)
    }

    fn reply(&mut self, result: Result<String>) -> io::Result<()> {
        match result {
            Ok(message) => writeln!(self.out, "OK: {}", message),
            Err(e) => {
                debug!(
                    code = %e.code(),
                    validation = e.is_validation(),
                    error = %e.format_for_log(),
                    "Command failed"
                );
                writeln!(self.out, "ERR: {}", e)
            }
        }
    }
}

fn print_list<W: Write>(out: &mut W, items: &[&Member]) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "{}", EMPTY_LIST);
    }
    for (i, member) in items.iter().enumerate() {
        writeln!(out, "{}) {}", i + 1, member)?;
    }
    Ok(())
}

//! Interactive command loop.
//!
//! Lines are read asynchronously so that Ctrl+C can be raced against input in
//! a single `select!`. Store operations themselves are synchronous.

mod command;
mod session;

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::error::Result;

pub use session::{Flow, Session};

/// Read commands from `input` until `exit`, end of input, or Ctrl+C.
pub async fn run<R, W>(session: &mut Session<W>, input: R, prompt: &str) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.split(b'\n');

    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    loop {
        session.prompt(prompt)?;

        tokio::select! {
            _ = &mut interrupt => {
                info!("Interrupt received, leaving command loop");
                session.finish_line()?;
                break;
            }

            segment = lines.next_segment() => {
                let Some(bytes) = segment? else {
                    debug!("End of input");
                    session.finish_line()?;
                    break;
                };

                let line = String::from_utf8_lossy(&bytes);
                if session.handle_line(line.trim_end_matches('\r'))? == Flow::Exit {
                    debug!("Exit command received");
                    break;
                }
            }
        }
    }

    info!(members = session.store().count(), "Command loop finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{RoleSet, Store};
    use tempfile::TempDir;

    async fn run_script(dir: &TempDir, script: &str) -> String {
        let store = Store::new(dir.path().join("members.json"), RoleSet::default());
        let mut session = Session::new(store, Vec::new());
        run(&mut session, script.as_bytes(), "> ").await.unwrap();
        String::from_utf8(session.into_output()).unwrap()
    }

    #[tokio::test]
    async fn test_exit_stops_reading() {
        let dir = TempDir::new().unwrap();
        let out = run_script(&dir, "count\nexit\ncount\n").await;
        assert_eq!(out, "> Всего участников: 0\n> ");
    }

    #[tokio::test]
    async fn test_end_of_input_ends_loop() {
        let dir = TempDir::new().unwrap();
        let out = run_script(&dir, "add Ivan механик").await;
        assert_eq!(out, "> OK: добавлен \"Ivan\" (механик)\n> \n");
    }

    #[tokio::test]
    async fn test_crlf_and_invalid_utf8_lines() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("members.json"), RoleSet::default());
        let mut session = Session::new(store, Vec::new());
        let input: &[u8] = b"count\r\n\xff\xfe\nexit\n";

        run(&mut session, input, "").await.unwrap();

        let out = String::from_utf8(session.into_output()).unwrap();
        assert_eq!(out, "Всего участников: 0\nERR: unknown command\n");
    }
}

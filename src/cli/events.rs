//! Session event sources
//!
//! Stdin lines and Ctrl-C are forwarded into one channel so the session
//! loop handles a single event at a time.

use std::io::BufRead;

#[cfg(test)]
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::debug;

use super::input::{UnknownCommand, UserCommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Command(UserCommand),
    Unknown(UnknownCommand),
    /// Ctrl-C
    Interrupt,
    /// Stdin reached EOF
    InputClosed,
}

pub struct SessionEvents {
    receiver: mpsc::Receiver<SessionEvent>,
}

impl SessionEvents {
    /// Listen on stdin and for Ctrl-C
    pub fn start() -> Self {
        let (tx, rx) = mpsc::channel(16);

        // A plain thread: a pending tokio stdin read would hold up runtime shutdown
        let tx_lines = tx.clone();
        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let event = match line {
                    Ok(line) => parse_event(&line),
                    Err(_) => break,
                };
                if tx_lines.blocking_send(event).is_err() {
                    return;
                }
            }
            let _ = tx_lines.blocking_send(SessionEvent::InputClosed);
        });

        let tx_int = tx;
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("interrupt received");
                let _ = tx_int.send(SessionEvent::Interrupt).await;
            }
        });

        Self { receiver: rx }
    }

    /// Events fed from an arbitrary reader, without signal handling
    #[cfg(test)]
    pub(crate) fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(forward_lines(reader, tx));
        Self { receiver: rx }
    }

    /// Wait for the next event
    pub async fn recv(&mut self) -> Option<SessionEvent> {
        self.receiver.recv().await
    }
}

fn parse_event(line: &str) -> SessionEvent {
    match line.parse::<UserCommand>() {
        Ok(command) => SessionEvent::Command(command),
        Err(unknown) => SessionEvent::Unknown(unknown),
    }
}

#[cfg(test)]
async fn forward_lines<R>(reader: R, tx: mpsc::Sender<SessionEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let event = match lines.next_line().await {
            Ok(Some(line)) => parse_event(&line),
            Ok(None) | Err(_) => SessionEvent::InputClosed,
        };
        let closed = event == SessionEvent::InputClosed;
        if tx.send(event).await.is_err() || closed {
            return;
        }
    }
}

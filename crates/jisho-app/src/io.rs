use std::io::BufRead;
use std::thread::{self, JoinHandle};

use kanal::Sender;

use crate::events::AppEvent;

/// Read terminal lines on a dedicated thread and forward them as events
pub fn spawn_stdin_reader(tx: Sender<AppEvent>) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("jisho-stdin".into())
        .spawn(move || {
            let stdin = std::io::stdin();

            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::error!("Failed to read stdin: {}", e);
                        break;
                    }
                };

                let event = AppEvent::parse(&line);
                let quit = matches!(event, AppEvent::Quit);

                if tx.send(event).is_err() || quit {
                    return;
                }
            }

            tracing::debug!("stdin closed");
            let _ = tx.send(AppEvent::Eof);
        })
}

use std::sync::Arc;

use jisho_core::SearchController;
use kanal::{AsyncReceiver, Sender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::{AppEvent, event_loop};
use crate::io::spawn_stdin_reader;
use crate::render::render_loop;

/// Centralized channel management
pub struct ChannelSet {
    /// Terminal input to the event loop
    pub input: (Sender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        let (tx, rx) = kanal::bounded(64);
        Self {
            input: (tx, rx.to_async()),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    search: Arc<SearchController>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(search: Arc<SearchController>) -> Self {
        Self {
            channels: ChannelSet::new(),
            search,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self) -> anyhow::Result<JoinSet<anyhow::Result<()>>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.search.clone(),
            self.channels.input.1.clone(),
            self.cancel_token.child_token(),
        ));

        // Render loop
        tasks.spawn(render_loop(
            self.search.subscribe(),
            self.cancel_token.child_token(),
            std::io::stdout(),
        ));

        // Blocking stdin reader, left detached on shutdown
        spawn_stdin_reader(self.channels.input.0.clone())?;

        let metadata = self.search.lookup().metadata();
        tracing::info!("Searching {} ({})", metadata.name, metadata.base_url);

        Ok(tasks)
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

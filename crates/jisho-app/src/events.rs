use std::sync::Arc;

use jisho_core::SearchController;
use jisho_types::Entry;
use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;

/// Terminal input, one event per line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Replace the query with the typed text
    Search(String),
    Clear,
    /// Follow the first cross-reference of the n-th result (1-based)
    FollowSeeAlso(usize),
    /// Search the kana suggestion instead
    AcceptSuggestion,
    /// Stop right away
    Quit,
    /// Input closed; stop once the current search has settled
    Eof,
}

impl AppEvent {
    pub fn parse(line: &str) -> Self {
        let command = line.trim();

        match command {
            ":q" | ":quit" => return AppEvent::Quit,
            ":clear" => return AppEvent::Clear,
            ":kana" => return AppEvent::AcceptSuggestion,
            _ => {}
        }

        if let Some(index) = command
            .strip_prefix(":see")
            .and_then(|n| n.trim().parse().ok())
        {
            return AppEvent::FollowSeeAlso(index);
        }

        AppEvent::Search(line.to_string())
    }
}

/// Cross-reference of the n-th result, counting from 1
pub fn see_also_target(results: &[Entry], index: usize) -> Option<&str> {
    results
        .get(index.checked_sub(1)?)?
        .senses
        .iter()
        .find_map(|sense| sense.see_also_target())
}

/// App's main loop
pub async fn event_loop(
    search: Arc<SearchController>,
    input_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::debug!("[EVENT_LOOP] Waiting for input");

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = input_rx.recv() => event?,
        };

        tracing::debug!("[EVENT_LOOP] {:?}", event);
        match event {
            AppEvent::Quit => break,
            AppEvent::Eof => {
                wait_for_idle(&search, &cancel).await?;
                break;
            }
            event => handle_event(&search, event),
        }
    }

    Ok(())
}

/// Wait until no fetch is outstanding, or until shutdown
async fn wait_for_idle(
    search: &SearchController,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let mut snapshots = search.subscribe();

    tokio::select! {
        _ = cancel.cancelled() => {}
        idle = snapshots.wait_for(|s| !s.pending) => {
            idle?;
        }
    }

    Ok(())
}

fn handle_event(search: &SearchController, event: AppEvent) {
    match event {
        AppEvent::Search(text) => search.set_query(text, None),
        AppEvent::Clear => search.clear(),
        AppEvent::FollowSeeAlso(index) => {
            let results = search.results();
            match see_also_target(&results, index) {
                Some(target) => search.follow_reference(target),
                None => tracing::warn!("Result {} has no cross-reference", index),
            }
        }
        AppEvent::AcceptSuggestion => {
            if !search.accept_suggestion() {
                tracing::warn!("No kana suggestion for the current query");
            }
        }
        AppEvent::Quit | AppEvent::Eof => {}
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use jisho_core::{LookupError, LookupMetadata, RemoteLookup, SearchPolicy};
    use jisho_types::{JapaneseForm, Sense};
    use tokio::time::timeout;

    use super::*;
    use crate::render::{SharedBuffer, render_loop};

    /// Answers every query with one entry after a delay
    struct SlowLookup;

    #[async_trait::async_trait]
    impl RemoteLookup for SlowLookup {
        async fn fetch(&self, _query: &str, _page: u32) -> Result<Vec<Entry>, LookupError> {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok(vec![Entry {
                slug: "日本語".to_string(),
                japanese: vec![JapaneseForm {
                    word: Some("日本語".to_string()),
                    reading: "にほんご".to_string(),
                }],
                ..Entry::default()
            }])
        }

        fn metadata(&self) -> LookupMetadata {
            LookupMetadata {
                name: "slow".to_string(),
                base_url: String::new(),
            }
        }
    }

    fn slow_search() -> Arc<SearchController> {
        Arc::new(SearchController::new(Arc::new(SlowLookup), SearchPolicy::default()).unwrap())
    }

    #[tokio::test]
    async fn closed_input_waits_for_results() {
        let search = slow_search();
        let (tx, rx) = kanal::unbounded_async();
        let cancel = CancellationToken::new();
        let output = SharedBuffer::default();
        let render = tokio::spawn(render_loop(
            search.subscribe(),
            cancel.child_token(),
            output.clone(),
        ));

        tx.send(AppEvent::Search("nihongo".to_string())).await.unwrap();
        tx.send(AppEvent::Eof).await.unwrap();

        let events = event_loop(search.clone(), rx, cancel.child_token());
        timeout(Duration::from_secs(2), events)
            .await
            .expect("event loop never finished")
            .unwrap();

        assert!(!search.is_pending());
        assert_eq!(search.results().len(), 1);

        cancel.cancel();
        timeout(Duration::from_secs(2), render)
            .await
            .expect("render loop never finished")
            .unwrap()
            .unwrap();

        assert!(output.contents().contains("1. 日本語 【にほんご】"));
    }

    #[tokio::test]
    async fn quit_stops_without_waiting() {
        let search = slow_search();
        let (tx, rx) = kanal::unbounded_async();

        tx.send(AppEvent::Search("nihongo".to_string())).await.unwrap();
        tx.send(AppEvent::Quit).await.unwrap();

        timeout(
            Duration::from_millis(50),
            event_loop(search.clone(), rx, CancellationToken::new()),
        )
        .await
        .expect("quit should not wait for the search")
        .unwrap();

        assert!(search.is_pending());
    }

    #[test]
    fn parses_commands() {
        assert_eq!(AppEvent::parse(":q"), AppEvent::Quit);
        assert_eq!(AppEvent::parse(" :clear "), AppEvent::Clear);
        assert_eq!(AppEvent::parse(":kana"), AppEvent::AcceptSuggestion);
        assert_eq!(AppEvent::parse(":see 2"), AppEvent::FollowSeeAlso(2));
    }

    #[test]
    fn anything_else_is_a_search() {
        assert_eq!(AppEvent::parse("kara"), AppEvent::Search("kara".to_string()));
        assert_eq!(AppEvent::parse(" "), AppEvent::Search(" ".to_string()));
        assert_eq!(AppEvent::parse(":see x"), AppEvent::Search(":see x".to_string()));
    }

    #[test]
    fn finds_first_cross_reference() {
        let results = vec![
            Entry::default(),
            Entry {
                senses: vec![
                    Sense::default(),
                    Sense {
                        see_also: vec!["空っぽ".to_string()],
                        ..Sense::default()
                    },
                ],
                ..Entry::default()
            },
        ];

        assert_eq!(see_also_target(&results, 2), Some("空っぽ"));
        assert_eq!(see_also_target(&results, 1), None);
        assert_eq!(see_also_target(&results, 0), None);
        assert_eq!(see_also_target(&results, 3), None);
    }
}

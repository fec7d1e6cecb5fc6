//! Scripted UI automation for assistant-triggered searches
//!
//! When the assistant invokes a search, the dashboard does not jump straight
//! to fetching: it plays a short scripted sequence that highlights the search
//! input, visibly types the ticker one character at a time, highlights the
//! submit control, and only then dispatches the real search. The sequence is
//! an explicit state machine driven by a generation counter; bumping the
//! counter (a new run or an external cancel) makes the superseded run stop at
//! its next transition without dispatching.

use crate::error::{DashError, Result};
use crate::model::FocusTarget;
use async_trait::async_trait;
use lens_core::Ticker;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::sleep;

/// UI side effects of an automation run: the highlight overlay and the
/// visible query text. Implemented by `SessionStore` in production.
#[async_trait]
pub trait AutomationSurface: Send + Sync {
    /// Point the highlight overlay at a UI element with an explanatory label
    async fn focus(&self, target: FocusTarget, label: &str);

    /// Set the visible text of the search input
    async fn set_query(&self, text: &str);

    /// Tear the highlight overlay down
    async fn clear_overlay(&self);
}

/// The terminal step of an automation run. Implemented by
/// `SearchOrchestrator` in production.
#[async_trait]
pub trait SearchDispatch: Send + Sync {
    /// Run a search for the fully-typed ticker and wait for its primary
    /// fetch group to settle.
    async fn dispatch(&self, ticker: &str);
}

/// Phases of one automation run, strictly linear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    HighlightInput,
    ClearInput,
    Typing(usize),
    HighlightButton,
    Dispose,
    Dispatch,
}

/// Cancellable, timed sequence of highlight and keystroke steps ending in a
/// real search. At most one run is active; starting another supersedes it.
pub struct AutomationSequencer {
    surface: Arc<dyn AutomationSurface>,
    dispatch: Arc<dyn SearchDispatch>,
    type_delay: Duration,
    pause_delay: Duration,
    generation: AtomicU64,
}

impl AutomationSequencer {
    /// Create a sequencer over the given surface and dispatcher
    pub fn new(
        surface: Arc<dyn AutomationSurface>,
        dispatch: Arc<dyn SearchDispatch>,
        type_delay: Duration,
        pause_delay: Duration,
    ) -> Self {
        Self {
            surface,
            dispatch,
            type_delay,
            pause_delay,
            generation: AtomicU64::new(0),
        }
    }

    /// Play the scripted sequence for `raw_ticker` and dispatch the search.
    ///
    /// Resolves with a confirmation string once the search has been
    /// dispatched, or [`DashError::Cancelled`] when a newer run or an
    /// external [`cancel`](Self::cancel) superseded this one mid-sequence.
    pub async fn run(&self, raw_ticker: &str) -> Result<String> {
        let ticker = Ticker::parse(raw_ticker).ok_or(DashError::EmptyTicker)?;

        // Taking the next generation supersedes any run still in flight;
        // its pending steps become no-ops at their next guard check.
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.surface.clear_overlay().await;
        tracing::debug!(%ticker, run = id, "starting automation run");

        let mut phase = Phase::HighlightInput;
        loop {
            self.guard(id)?;
            phase = match phase {
                Phase::HighlightInput => {
                    self.surface
                        .focus(FocusTarget::SearchInput, &format!("Searching for {ticker}"))
                        .await;
                    Phase::ClearInput
                },
                Phase::ClearInput => {
                    self.surface.set_query("").await;
                    sleep(self.pause_delay).await;
                    Phase::Typing(0)
                },
                Phase::Typing(i) => {
                    self.surface.set_query(&ticker.prefix(i + 1)).await;
                    sleep(self.type_delay).await;
                    if i + 1 < ticker.len() {
                        Phase::Typing(i + 1)
                    } else {
                        Phase::HighlightButton
                    }
                },
                Phase::HighlightButton => {
                    self.surface
                        .focus(FocusTarget::SearchButton, "Running the search")
                        .await;
                    sleep(self.pause_delay).await;
                    Phase::Dispose
                },
                Phase::Dispose => {
                    // The overlay must never remain visible while data loads
                    self.surface.clear_overlay().await;
                    Phase::Dispatch
                },
                Phase::Dispatch => {
                    self.dispatch.dispatch(ticker.as_str()).await;
                    return Ok(format!("Searched for {ticker}"));
                },
            };
        }
    }

    /// Cancel the active run, if any, and tear its overlay down
    pub async fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.surface.clear_overlay().await;
    }

    fn guard(&self, id: u64) -> Result<()> {
        if self.generation.load(Ordering::SeqCst) == id {
            Ok(())
        } else {
            tracing::debug!(run = id, "automation run superseded");
            Err(DashError::Cancelled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Focus(FocusTarget, String),
        Query(String),
        Clear,
    }

    /// Records every surface call; optionally fires a oneshot when a
    /// particular query text is typed.
    #[derive(Default)]
    struct RecordingSurface {
        events: Mutex<Vec<Event>>,
        trigger_on: Option<String>,
        trigger: Mutex<Option<oneshot::Sender<()>>>,
    }

    impl RecordingSurface {
        fn with_trigger(text: &str) -> (Arc<Self>, oneshot::Receiver<()>) {
            let (tx, rx) = oneshot::channel();
            let surface = Arc::new(Self {
                events: Mutex::new(Vec::new()),
                trigger_on: Some(text.to_string()),
                trigger: Mutex::new(Some(tx)),
            });
            (surface, rx)
        }

        fn queries(&self) -> Vec<String> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter_map(|e| match e {
                    Event::Query(q) => Some(q.clone()),
                    _ => None,
                })
                .collect()
        }

        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AutomationSurface for RecordingSurface {
        async fn focus(&self, target: FocusTarget, label: &str) {
            self.events
                .lock()
                .unwrap()
                .push(Event::Focus(target, label.to_string()));
        }

        async fn set_query(&self, text: &str) {
            self.events.lock().unwrap().push(Event::Query(text.to_string()));
            if self.trigger_on.as_deref() == Some(text) {
                if let Some(tx) = self.trigger.lock().unwrap().take() {
                    let _ = tx.send(());
                }
            }
        }

        async fn clear_overlay(&self) {
            self.events.lock().unwrap().push(Event::Clear);
        }
    }

    #[derive(Default)]
    struct RecordingDispatch {
        dispatched: Mutex<Vec<String>>,
    }

    impl RecordingDispatch {
        fn dispatched(&self) -> Vec<String> {
            self.dispatched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchDispatch for RecordingDispatch {
        async fn dispatch(&self, ticker: &str) {
            self.dispatched.lock().unwrap().push(ticker.to_string());
        }
    }

    fn sequencer(
        surface: Arc<RecordingSurface>,
        dispatch: Arc<RecordingDispatch>,
    ) -> AutomationSequencer {
        AutomationSequencer::new(
            surface,
            dispatch,
            Duration::from_millis(120),
            Duration::from_millis(400),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_types_every_prefix_then_dispatches() {
        let surface = Arc::new(RecordingSurface::default());
        let dispatch = Arc::new(RecordingDispatch::default());
        let seq = sequencer(Arc::clone(&surface), Arc::clone(&dispatch));

        let message = seq.run("aapl").await.unwrap();
        assert!(message.contains("AAPL"));

        // Cleared first, then every prefix in order
        assert_eq!(surface.queries(), vec!["", "A", "AA", "AAP", "AAPL"]);
        assert_eq!(dispatch.dispatched(), vec!["AAPL"]);

        // Input highlighted before typing, button after, overlay gone last
        let events = surface.events();
        let input_focus = events
            .iter()
            .position(|e| matches!(e, Event::Focus(FocusTarget::SearchInput, _)))
            .unwrap();
        let button_focus = events
            .iter()
            .position(|e| matches!(e, Event::Focus(FocusTarget::SearchButton, _)))
            .unwrap();
        assert!(input_focus < button_focus);
        assert_eq!(events.last(), Some(&Event::Clear));
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_label_names_the_ticker() {
        let surface = Arc::new(RecordingSurface::default());
        let dispatch = Arc::new(RecordingDispatch::default());
        let seq = sequencer(Arc::clone(&surface), dispatch);

        seq.run("tsla").await.unwrap();

        let labels: Vec<String> = surface
            .events()
            .iter()
            .filter_map(|e| match e {
                Event::Focus(FocusTarget::SearchInput, label) => Some(label.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["Searching for TSLA"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_typing_and_skips_dispatch() {
        let (surface, typed_aa) = RecordingSurface::with_trigger("AA");
        let dispatch = Arc::new(RecordingDispatch::default());
        let seq = Arc::new(sequencer(Arc::clone(&surface), Arc::clone(&dispatch)));

        let runner = Arc::clone(&seq);
        let handle = tokio::spawn(async move { runner.run("aapl").await });

        typed_aa.await.unwrap();
        seq.cancel().await;

        let result = handle.await.unwrap();
        assert!(matches!(result, Err(DashError::Cancelled)));

        // Remaining keystrokes never ran, nothing was dispatched
        assert_eq!(surface.queries(), vec!["", "A", "AA"]);
        assert!(dispatch.dispatched().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_run_supersedes_first() {
        let (surface, typed_aa) = RecordingSurface::with_trigger("AA");
        let dispatch = Arc::new(RecordingDispatch::default());
        let seq = Arc::new(sequencer(Arc::clone(&surface), Arc::clone(&dispatch)));

        let first_seq = Arc::clone(&seq);
        let first = tokio::spawn(async move { first_seq.run("aapl").await });

        typed_aa.await.unwrap();
        let message = seq.run("msft").await.unwrap();
        assert!(message.contains("MSFT"));

        let result = first.await.unwrap();
        assert!(matches!(result, Err(DashError::Cancelled)));

        // The first run's remaining prefixes never appear
        let queries = surface.queries();
        assert!(!queries.contains(&"AAP".to_string()));
        assert!(!queries.contains(&"AAPL".to_string()));
        assert_eq!(queries.last(), Some(&"MSFT".to_string()));

        // Only the superseding run dispatched
        assert_eq!(dispatch.dispatched(), vec!["MSFT"]);
    }

    #[tokio::test]
    async fn test_empty_ticker_rejected() {
        let surface = Arc::new(RecordingSurface::default());
        let dispatch = Arc::new(RecordingDispatch::default());
        let seq = sequencer(Arc::clone(&surface), dispatch);

        let result = seq.run("   ").await;
        assert!(matches!(result, Err(DashError::EmptyTicker)));
        assert!(surface.events().is_empty());
    }
}

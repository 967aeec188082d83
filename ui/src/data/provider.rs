//! Shared fetch-and-cache provider.
//!
//! One component (the dashboard root) owns the [`ResultSet`] and every view
//! reads it through [`ResultsContext`]. Fetches are numbered; a completion from
//! anything but the newest request is dropped.

use std::rc::Rc;

use api::{ResultClient, ResultSet};
use dioxus::prelude::*;
use futures::StreamExt;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Loaded(Rc<ResultSet>),
    Failed(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<Rc<ResultSet>> {
        match self {
            FetchState::Loaded(set) => Some(set.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchTracker {
    generation: u64,
    state: FetchState,
}

impl FetchTracker {
    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Generation of the newest request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Enter `Loading` and hand out the new request's generation.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = FetchState::Loading;
        self.generation
    }

    /// Record a completion. Returns `false` when `generation` is stale and the
    /// result was discarded.
    pub fn complete(&mut self, generation: u64, outcome: Result<ResultSet, String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.state = match outcome {
            Ok(set) => FetchState::Loaded(Rc::new(set)),
            Err(message) => FetchState::Failed(message),
        };
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsCommand {
    Refresh,
}

#[derive(Clone, Copy)]
pub struct ResultsContext {
    tracker: Signal<FetchTracker>,
    commands: Coroutine<ResultsCommand>,
}

impl ResultsContext {
    pub fn state(&self) -> FetchState {
        self.tracker.read().state().clone()
    }

    pub fn generation(&self) -> u64 {
        self.tracker.read().generation()
    }

    /// Refetch. Also serves as Retry after a failure.
    pub fn refresh(&self) {
        self.commands.send(ResultsCommand::Refresh);
    }
}

/// Install the provider in the current component and fetch once on mount.
pub fn use_results_provider(client: ResultClient) -> ResultsContext {
    let tracker = use_signal(FetchTracker::default);

    let commands = use_coroutine(move |mut rx: UnboundedReceiver<ResultsCommand>| {
        let client = client.clone();
        async move {
            start_fetch(client.clone(), tracker);
            while let Some(ResultsCommand::Refresh) = rx.next().await {
                info!("refreshing load-test results");
                start_fetch(client.clone(), tracker);
            }
        }
    });

    use_context_provider(|| ResultsContext { tracker, commands })
}

pub fn use_results() -> ResultsContext {
    use_context::<ResultsContext>()
}

fn start_fetch(client: ResultClient, mut tracker: Signal<FetchTracker>) {
    let generation = tracker.write().begin();
    spawn(async move {
        let outcome = client.fetch().await.map_err(|err| {
            warn!(generation, error = %err, "result fetch failed");
            err.to_string()
        });
        if !tracker.write().complete(generation, outcome) {
            debug!(generation, "discarding superseded fetch");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_then_fail_then_retry() {
        let mut tracker = FetchTracker::default();
        assert_eq!(tracker.state(), &FetchState::Idle);

        let first = tracker.begin();
        assert!(tracker.state().is_loading());
        assert!(tracker.complete(first, Ok(Vec::new())));
        assert_eq!(tracker.state().data().map(|set| set.len()), Some(0));

        let second = tracker.begin();
        assert!(tracker.complete(second, Err("Server responded with HTTP 500".into())));
        assert_eq!(
            tracker.state(),
            &FetchState::Failed("Server responded with HTTP 500".into())
        );

        tracker.begin();
        assert!(tracker.state().is_loading());
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut tracker = FetchTracker::default();
        let old = tracker.begin();
        let new = tracker.begin();

        assert!(tracker.complete(new, Ok(Vec::new())));
        assert!(!tracker.complete(old, Err("late failure".into())));
        assert!(matches!(tracker.state(), FetchState::Loaded(_)));
        assert_eq!(tracker.generation(), new);
    }
}

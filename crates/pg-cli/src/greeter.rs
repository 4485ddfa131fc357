use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use pg_core::{History, HistoryEntry, HistoryStore, Record, Selector};
use pg_fetch::{CatalogSource, RetryPolicy, fetch_with_retry};
use pg_render::{Template, render_card};
use rand::Rng;

use crate::error::{RunError, RunResult};
use crate::publish::publish;

/// Stages of a run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Setting up collaborators.
    Start,
    /// Drawing an id.
    Select,
    /// Retrieving the record.
    Fetch,
    /// Rendering the card.
    Render,
    /// Appending to and saving the history.
    PersistHistory,
    /// Overwriting the README.
    Publish,
    /// Finished.
    Done,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Select => "select",
            Self::Fetch => "fetch",
            Self::Render => "render",
            Self::PersistHistory => "persist-history",
            Self::Publish => "publish",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// A rendered card and the record behind it.
#[derive(Debug, Clone)]
pub struct Greeting {
    /// The selected id.
    pub id: u32,
    /// The fetched record.
    pub record: Record,
    /// The rendered card.
    pub content: String,
    /// Timestamp printed on the card.
    pub rendered_at: DateTime<Utc>,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// What was published.
    pub greeting: Greeting,
    /// Where it was published.
    pub readme: PathBuf,
    /// Whether the history file now includes this run.
    pub history_saved: bool,
}

/// Drives one greeting run over a catalog, a history store, and an RNG.
pub struct Greeter<S, H, R> {
    source: S,
    store: H,
    rng: R,
    selector: Selector,
    retry: RetryPolicy,
}

impl<S: CatalogSource, H: HistoryStore, R: Rng> Greeter<S, H, R> {
    /// Create a greeter with the default retry policy.
    pub fn new(source: S, store: H, rng: R, selector: Selector) -> Self {
        Self {
            source,
            store,
            rng,
            selector,
            retry: RetryPolicy::default(),
        }
    }

    /// Set the retry policy for fetches.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The history store.
    pub fn store(&self) -> &H {
        &self.store
    }

    /// Select, fetch and render against `history`. Touches no files.
    pub fn compose(&mut self, history: &History, now: DateTime<Utc>) -> RunResult<Greeting> {
        let id = self.selector.select(&mut self.rng, history);
        tracing::info!(step = %Step::Select, id, seen = history.len(), "selected id");

        let record = fetch_with_retry(&self.source, id, &self.retry)
            .map_err(|source| RunError::Fetch { id, source })?;

        let template = Template::random(&mut self.rng);
        let content = render_card(&record, &template, now)
            .map_err(|source| RunError::Render { id, source })?;
        tracing::info!(step = %Step::Render, id, bytes = content.len(), "rendered card");

        Ok(Greeting {
            id,
            record,
            content,
            rendered_at: now,
        })
    }

    /// Compose a greeting against the stored history without writing anything.
    pub fn preview(&mut self) -> RunResult<Greeting> {
        let history = self.store.load();
        self.compose(&history, Utc::now())
    }

    /// The full run: compose, record in history, overwrite `readme`.
    ///
    /// A fetch or render failure leaves both the history and `readme`
    /// untouched. A history write failure is logged and the run continues.
    pub fn run(&mut self, readme: &Path) -> RunResult<Outcome> {
        let mut history = self.store.load();
        let greeting = self.compose(&history, Utc::now())?;

        let entry = HistoryEntry {
            id: greeting.id,
            ..HistoryEntry::for_record(&greeting.record, greeting.rendered_at)
        };
        let history_saved = match self.store.record(&mut history, entry) {
            Ok(()) => {
                tracing::info!(step = %Step::PersistHistory, entries = history.len(), "history saved");
                true
            }
            Err(e) => {
                tracing::warn!(step = %Step::PersistHistory, id = greeting.id, "{e}; continuing");
                false
            }
        };

        publish(readme, &greeting.content).map_err(|source| RunError::Publish {
            id: greeting.id,
            path: readme.to_path_buf(),
            source,
        })?;
        tracing::info!(
            step = %Step::Done,
            id = greeting.id,
            name = %greeting.record.name,
            path = %readme.display(),
            "greeting published"
        );

        Ok(Outcome {
            greeting,
            readme: readme.to_path_buf(),
            history_saved,
        })
    }
}

use std::path::PathBuf;

use miette::Diagnostic;
use pg_fetch::FetchError;
use pg_render::RenderError;

use crate::greeter::Step;

/// Alias for `Result<T, RunError>`.
pub type RunResult<T> = Result<T, RunError>;

/// A failure that aborts the run.
///
/// History problems never show up here: they are logged and the run goes on.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum RunError {
    /// The catalog client could not be set up.
    #[error("cannot set up the catalog client")]
    #[diagnostic(code(pokegreet::setup))]
    Setup(#[source] FetchError),

    /// The record could not be retrieved.
    #[error("failed to fetch Pokémon #{id}")]
    #[diagnostic(
        code(pokegreet::fetch),
        help("check network access to the catalog, or raise --retries / --timeout-secs")
    )]
    Fetch {
        /// The selected id.
        id: u32,
        /// What went wrong.
        #[source]
        source: FetchError,
    },

    /// The record could not be rendered.
    #[error("failed to render Pokémon #{id}")]
    #[diagnostic(code(pokegreet::render))]
    Render {
        /// The selected id.
        id: u32,
        /// What went wrong.
        #[source]
        source: RenderError,
    },

    /// The rendered card could not be written.
    #[error("cannot write {}", path.display())]
    #[diagnostic(
        code(pokegreet::publish),
        help("make sure the README path exists and is writable")
    )]
    Publish {
        /// The selected id.
        id: u32,
        /// Destination path.
        path: PathBuf,
        /// What went wrong.
        #[source]
        source: std::io::Error,
    },
}

impl RunError {
    /// The step that failed.
    pub fn step(&self) -> Step {
        match self {
            Self::Setup(_) => Step::Start,
            Self::Fetch { .. } => Step::Fetch,
            Self::Render { .. } => Step::Render,
            Self::Publish { .. } => Step::Publish,
        }
    }

    /// The id being processed, when one had been selected.
    pub fn id(&self) -> Option<u32> {
        match self {
            Self::Setup(_) => None,
            Self::Fetch { id, .. } | Self::Render { id, .. } | Self::Publish { id, .. } => {
                Some(*id)
            }
        }
    }
}

//! The greeting run: select, fetch, render, record, publish.
//!
//! [`Greeter`] owns the flow and is generic over its three collaborators (the
//! catalog, the history store and the RNG) so tests can drive it without a
//! network or a filesystem.

/// Run-level error type.
pub mod error;
/// The orchestrated greeting flow.
pub mod greeter;
/// Writing the rendered card to its destination.
pub mod publish;

/// Re-export error types.
pub use error::{RunError, RunResult};
/// Re-export the orchestrator.
pub use greeter::{Greeter, Greeting, Outcome, Step};

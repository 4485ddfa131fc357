/// Alias for `Result<T, RenderError>`.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering a greeting card.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The record has no usable display name.
    #[error("record #{id} has no name")]
    MissingName {
        /// Id of the offending record.
        id: u32,
    },
}

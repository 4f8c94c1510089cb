use plush_core::{CoreError, ThingId};

/// Alias for `Result<T, TriggerError>`.
pub type TriggerResult<T> = Result<T, TriggerError>;

/// Errors raised while setting up, saving, or loading triggers.
///
/// Nothing in the tick path returns these: a tick always runs to completion.
#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    /// Component defaults the trigger cannot run with.
    #[error("invalid trigger properties: {0}")]
    InvalidProps(String),

    /// The host object the component should attach to does not exist.
    #[error("thing not found: {0}")]
    ThingNotFound(ThingId),

    /// A save file with a version this build cannot read.
    #[error("unsupported save version {found} (expected {expected})")]
    UnsupportedSaveVersion {
        /// Version found in the file.
        found: u32,
        /// Version this build writes.
        expected: u32,
    },

    /// Host world error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// File I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why an effect dispatch was abandoned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The primary buff effect definition is missing; nothing was applied.
    #[error("buff effect definition \"{0}\" not found")]
    MissingBuffEffect(String),
}

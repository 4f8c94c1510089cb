use crate::actor::ActorId;
use crate::thing::ThingId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when manipulating a world.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested actor ID does not exist in the world.
    #[error("actor not found: {0}")]
    ActorNotFound(ActorId),

    /// The requested thing ID does not exist in the world.
    #[error("thing not found: {0}")]
    ThingNotFound(ThingId),

    /// An actor with the same name already exists.
    #[error("name already taken: \"{0}\"")]
    DuplicateName(String),

    /// A thing with the same ID already exists.
    #[error("thing already exists: {0}")]
    DuplicateThing(ThingId),
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// A declined operation. The engine state is untouched whenever one of these
/// is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("need at least {required} items to start a session, have {available}")]
    NotEnoughItems { required: usize, available: usize },

    #[error("duplicate item ID: {0}")]
    DuplicateId(i64),

    #[error("unknown item ID: {0}")]
    UnknownItem(i64),

    #[error("item {0} is not part of the current group")]
    NotInGroup(i64),

    #[error("no session is running")]
    NoActiveSession,

    #[error("items cannot be changed while a session is running")]
    SessionInProgress,

    #[error("nothing has been compared yet")]
    NothingViewed,
}

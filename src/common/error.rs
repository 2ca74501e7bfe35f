use thiserror::Error;

/// Reasons path text is refused. Any of these aborts the
/// whole parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathParseError {
    #[error("Empty path input")]
    EmptyInput,

    #[error("Empty path detected on line {line}")]
    EmptyPath { line: usize },

    #[error("Invalid coordinate: {token}")]
    InvalidCoordinate { token: String },

    #[error("Coordinate out of bounds: {x},{y} (grid size {grid_size})")]
    OutOfBounds { x: i64, y: i64, grid_size: usize },
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid command: {reason}")]
    InvalidCommand { reason: String },

    #[error("Path input rejected: {0}")]
    PathParse(#[from] PathParseError),

    #[error("Agent not found: {id}")]
    AgentNotFound { id: u32 },

    #[error("Invalid message: {reason}")]
    InvalidMessage { reason: String },

    #[error("External service error: {0}")]
    ExternalService(String),
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;

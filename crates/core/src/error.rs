use beanscope_api::{ApiError, SymbolRef};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BeanscopeError {
    #[error("missing identifier for {symbol}")]
    MissingIdentifier { symbol: SymbolRef },
    #[error("internal resolution error: {0}")]
    InternalResolution(String),
    #[error("unknown symbol: {0}")]
    UnknownSymbol(SymbolRef),
    #[error("declaration rejected: {0}")]
    Rejected(String),
    #[error("artifact for {0} is already finalized")]
    Frozen(String),
    #[error("output sink error: {0}")]
    Sink(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("host error: {0}")]
    Host(#[from] ApiError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BeanscopeError>;

/// A per-declaration failure, kept with the declaration it aborted.
#[derive(Debug)]
pub struct DeclarationFailure {
    pub declaration: SymbolRef,
    pub error: BeanscopeError,
}

impl DeclarationFailure {
    pub fn new(declaration: SymbolRef, error: BeanscopeError) -> Self {
        Self { declaration, error }
    }
}

impl std::fmt::Display for DeclarationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.declaration, self.error)
    }
}

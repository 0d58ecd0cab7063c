/// Errors raised by host adapters while loading or checking a symbol graph.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("undeclared symbol referenced: {0}")]
    UndeclaredSymbol(String),
    #[error("malformed symbol graph: {0}")]
    MalformedGraph(#[from] serde_json::Error),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

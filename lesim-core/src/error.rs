use serde::Deserialize;
use thiserror::Error;

/// Failure raised by a chart backend (Plotly call, DOM mutation).
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{0}")]
pub struct BackendError(pub String);

impl BackendError {
    pub fn new(msg: impl Into<String>) -> Self {
        BackendError(msg.into())
    }
}

#[derive(Debug, Error)]
pub enum PostprocError {
    /// The response body is not a command list at all.
    #[error("malformed command list: {0}")]
    Wire(#[from] serde_json::Error),
    /// One of the double-encoded payloads inside a command could not be parsed.
    #[error("command {index}: cannot parse '{field}': {source}")]
    Decode {
        index: usize,
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("command {index}: invalid subplot specification {spec:?}")]
    SubplotSpec { index: usize, spec: Vec<i64> },
    #[error("subplot flush requested with no collected plots")]
    EmptySubplotFlush,
    #[error("chart backend: {0}")]
    Backend(#[from] BackendError),
}

/// Error object returned by the server instead of a command list when the
/// script fails to parse or run.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ServerError {
    pub err_msg: String,
    #[serde(default)]
    pub stack_trace: Option<String>,
    #[serde(default)]
    pub lineno: Option<i64>,
}

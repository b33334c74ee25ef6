use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::directive::{ExportLink, WireDirective};
use crate::error::{PostprocError, ServerError};

/// Body of a run request: either the script's output or the error the
/// server reports for it.
#[derive(Clone, Debug)]
pub enum RunResponse<T> {
    Failed(ServerError),
    Completed(T),
}

/// Output of a run in image mode: figures rendered by matplotlib on the
/// server, plus the files written by `@export`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ImageRun {
    #[serde(default)]
    pub imgfiles: Vec<String>,
    #[serde(default)]
    pub exportcmds: Vec<ExportLink>,
}

/// Reply of the save endpoints (`/save`, `/save_settings`).
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SaveReply {
    #[serde(default)]
    pub error: Option<String>,
}

impl SaveReply {
    /// The server's error message, if it reported a non-empty one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

/// Reply of `/get_demo/<name>`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct DemoScript {
    #[serde(default)]
    pub name: Option<String>,
    pub code: String,
}

pub type PlotRunResponse = RunResponse<Vec<WireDirective>>;
pub type ImageRunResponse = RunResponse<ImageRun>;

impl<T: DeserializeOwned> RunResponse<T> {
    /// Any object carrying `err_msg` is an error report, whatever else it
    /// holds.
    pub fn parse(text: &str) -> Result<Self, PostprocError> {
        let value: Value = serde_json::from_str(text)?;
        if value.get("err_msg").is_some() {
            Ok(RunResponse::Failed(serde_json::from_value(value)?))
        } else {
            Ok(RunResponse::Completed(serde_json::from_value(value)?))
        }
    }
}

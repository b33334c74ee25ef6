//! Browser-independent part of the simulator front-end: decoding the
//! drawing commands a script run produces and laying them out as Plotly
//! charts, plus the small pieces of page logic that need no DOM.

pub mod cache;
pub mod constants;
pub mod directive;
pub mod editor;
pub mod error;
pub mod grid;
pub mod images;
pub mod interpreter;
pub mod layout;
pub mod lookahead;
pub mod response;
pub mod settings;
pub mod trace;

pub use cache::{ScriptCache, UiScript};
pub use directive::{Directive, ExportLink, WireDirective, parse_commands};
pub use error::{BackendError, PostprocError, ServerError};
pub use interpreter::{ChartBackend, ContainerSummary, RunSummary, run, run_wire};
pub use layout::{Layout, LegendUpdate, ResizeUpdate, grid_visibility_update};
pub use response::{
    DemoScript, ImageRun, ImageRunResponse, PlotRunResponse, RunResponse, SaveReply,
};
pub use settings::Settings;
pub use trace::Trace;

/// Chart size used until the user's settings arrive (px).
pub const DEFAULT_PLOT_WIDTH: f64 = 600.0;
pub const DEFAULT_PLOT_HEIGHT: f64 = 400.0;
/// Legend position in paper coordinates, just right of the plot area.
pub const DEFAULT_LEGEND_X: f64 = 1.02;
pub const DEFAULT_LEGEND_Y: f64 = 1.0;
pub const DEFAULT_LEGEND_X_ANCHOR: &str = "left";
pub const DEFAULT_LEGEND_Y_ANCHOR: &str = "top";
pub const DEFAULT_BGCOLOR: &str = "#ffffff";
/// Plotly trace type used for every series.
pub const TRACE_TYPE: &str = "scatter";
/// Suffix appended to PDF figure URLs to hide the viewer toolbar.
pub const PDF_VIEWER_SUFFIX: &str = "#toolbar=0";
pub const IMAGE_ALT_TEXT: &str = "Matplotlib chart";

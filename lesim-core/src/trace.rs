use serde::Serialize;

use crate::constants::TRACE_TYPE;
use crate::directive::Series;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum TraceMode {
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "lines+markers")]
    LinesMarkers,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct LineStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl LineStyle {
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.color.is_none()
    }
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct MarkerStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl MarkerStyle {
    pub fn is_empty(&self) -> bool {
        self.symbol.is_none() && self.size.is_none()
    }
}

/// One Plotly trace. Unset style fields are left out of the serialized
/// object so Plotly applies its own defaults.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Trace {
    pub x: Vec<usize>,
    pub y: Vec<Option<f64>>,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: TraceMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "LineStyle::is_empty")]
    pub line: LineStyle,
    #[serde(skip_serializing_if = "MarkerStyle::is_empty")]
    pub marker: MarkerStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

impl Trace {
    pub fn from_series(series: &Series) -> Self {
        let style = &series.style;
        // Zero widths and empty strings count as "not given".
        let line = LineStyle {
            width: style.linewidth.filter(|w| *w != 0.0),
            color: style.color.clone().filter(|c| !c.is_empty()),
        };
        let (mode, marker) = match style.marker.as_deref() {
            Some(m) if !m.is_empty() => (
                TraceMode::LinesMarkers,
                MarkerStyle {
                    symbol: Some(marker_symbol(m).to_string()),
                    size: style.markersize.filter(|s| *s != 0.0),
                },
            ),
            _ => (TraceMode::Lines, MarkerStyle::default()),
        };
        Trace {
            x: (1..=series.ydata.len()).collect(),
            y: series.ydata.clone(),
            kind: TRACE_TYPE,
            mode,
            name: style.label.clone(),
            line,
            marker,
            xaxis: None,
            yaxis: None,
        }
    }

    /// Bind the trace to the axes of subplot cell `cell` (1-based).
    pub fn place_in_cell(&mut self, cell: u32) {
        self.xaxis = Some(format!("x{cell}"));
        self.yaxis = Some(format!("y{cell}"));
    }
}

/// Translate every series of a `plot` command, in order.
pub fn series_to_traces(series: &[Series]) -> Vec<Trace> {
    series.iter().map(Trace::from_series).collect()
}

/// Map a matplotlib marker code to the Plotly symbol name. Unknown codes are
/// passed through, so Plotly names can be used directly.
fn marker_symbol(mpl: &str) -> &str {
    match mpl {
        "o" | "." | "," => "circle",
        "s" => "square",
        "^" => "triangle-up",
        "v" => "triangle-down",
        "<" => "triangle-left",
        ">" => "triangle-right",
        "d" => "diamond-tall",
        "D" => "diamond",
        "+" => "cross-thin-open",
        "x" => "x-thin-open",
        "X" => "x",
        "P" => "cross",
        "*" => "star",
        "p" => "pentagon",
        "h" | "H" => "hexagon",
        other => other,
    }
}

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::settings::Settings;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Title {
    pub text: String,
}

/// Overrides for one numbered axis.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Grid {
    pub rows: u32,
    pub columns: u32,
    pub pattern: &'static str,
}

impl Grid {
    /// Grid whose cells each get their own x and y axis.
    pub fn independent(rows: u32, columns: u32) -> Self {
        Grid {
            rows,
            columns,
            pattern: "independent",
        }
    }
}

/// Layout passed to `Plotly.react` when a container receives its first
/// traces.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Layout {
    pub showlegend: bool,
    pub plot_bgcolor: String,
    pub paper_bgcolor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    /// Numbered axes (`xaxis`, `yaxis2`, ...) keyed by their layout name.
    #[serde(flatten)]
    pub axes: BTreeMap<String, Axis>,
}

impl Layout {
    /// Layout every render starts from. The legend stays off until a
    /// `legend` command asks for it.
    pub fn base(title: &str, settings: &Settings) -> Self {
        Layout {
            showlegend: false,
            plot_bgcolor: settings.plot_bgcolor().to_string(),
            paper_bgcolor: settings.paper_color().to_string(),
            title: (!title.is_empty()).then(|| Title {
                text: title.to_string(),
            }),
            grid: None,
            axes: BTreeMap::new(),
        }
    }
}

/// Layout key of the x or y axis belonging to subplot cell `cell`. Plotly
/// names the first axis plainly (`xaxis`), the rest with a number.
pub fn axis_key(letter: char, cell: u32) -> String {
    if cell <= 1 {
        format!("{letter}axis")
    } else {
        format!("{letter}axis{cell}")
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LegendPlacement {
    pub x: f64,
    pub y: f64,
    pub xanchor: String,
    pub yanchor: String,
    pub orientation: &'static str,
}

/// Argument of `Plotly.relayout` that shows or hides the legend.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LegendUpdate {
    pub showlegend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendPlacement>,
}

impl LegendUpdate {
    pub fn shown(settings: &Settings) -> Self {
        LegendUpdate {
            showlegend: true,
            legend: Some(LegendPlacement {
                x: settings.legend_x(),
                y: settings.legend_y(),
                xanchor: settings.legend_x_anchor().to_string(),
                yanchor: settings.legend_y_anchor().to_string(),
                orientation: settings.legend_orientation(),
            }),
        }
    }

    pub fn hidden() -> Self {
        LegendUpdate {
            showlegend: false,
            legend: None,
        }
    }

    /// Update for the legend toggle button of a chart.
    pub fn toggled(currently_shown: bool, settings: &Settings) -> Self {
        if currently_shown {
            Self::hidden()
        } else {
            Self::shown(settings)
        }
    }
}

/// Argument of `Plotly.relayout` after the user resized a chart container.
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct ResizeUpdate {
    pub width: f64,
    pub height: f64,
}

/// Relayout that switches the grid lines of every axis in a chart. `layout_keys`
/// are the keys of the chart's live layout; numbered axes among them are
/// included next to the primary pair.
pub fn grid_visibility_update<'a>(
    layout_keys: impl IntoIterator<Item = &'a str>,
    visible: bool,
) -> Map<String, Value> {
    let mut update = Map::new();
    for key in ["xaxis", "yaxis"] {
        update.insert(format!("{key}.showgrid"), Value::Bool(visible));
    }
    for key in layout_keys {
        if is_numbered_axis(key) {
            update.insert(format!("{key}.showgrid"), Value::Bool(visible));
        }
    }
    update
}

fn is_numbered_axis(key: &str) -> bool {
    let Some(num) = key
        .strip_prefix("xaxis")
        .or_else(|| key.strip_prefix("yaxis"))
    else {
        return false;
    };
    !num.is_empty() && num.bytes().all(|b| b.is_ascii_digit())
}

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{
    DEFAULT_BGCOLOR, DEFAULT_LEGEND_X, DEFAULT_LEGEND_X_ANCHOR, DEFAULT_LEGEND_Y,
    DEFAULT_LEGEND_Y_ANCHOR, DEFAULT_PLOT_HEIGHT, DEFAULT_PLOT_WIDTH,
};

/// Per-user render settings as stored by the server.
///
/// Values typed into the settings form travel as strings, values read back
/// from the database as numbers; numeric fields accept either. Every field
/// is optional and the accessors supply the defaults.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub plot_type: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub plot_orientation: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub plot_width: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub plot_height: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub legend_x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub legend_y: Option<f64>,
    #[serde(default)]
    pub legend_x_anchor: Option<String>,
    #[serde(default)]
    pub legend_y_anchor: Option<String>,
    #[serde(default)]
    pub legend_orientation: Option<String>,
    #[serde(default)]
    pub paper_color: Option<String>,
    #[serde(default)]
    pub plot_bgcolor: Option<String>,
    #[serde(default)]
    pub keep_plots: Option<bool>,
}

/// Output format of server-rendered (matplotlib) figures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileType {
    Png,
    Svg,
    Pdf,
    Other,
}

impl Settings {
    /// True when figures are rendered by matplotlib on the server and shown
    /// as images instead of Plotly charts.
    pub fn is_image_mode(&self) -> bool {
        self.plot_type.as_deref() == Some("image")
    }

    pub fn file_type(&self) -> FileType {
        match self.file_type.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("png") => FileType::Png,
            Some("svg") => FileType::Svg,
            Some("pdf") => FileType::Pdf,
            _ => FileType::Other,
        }
    }

    /// Charts are laid out side by side instead of stacked.
    pub fn is_horizontal(&self) -> bool {
        self.plot_orientation.as_deref() == Some("horizontal")
    }

    pub fn plot_width(&self) -> f64 {
        positive_or(self.plot_width, DEFAULT_PLOT_WIDTH)
    }

    pub fn plot_height(&self) -> f64 {
        positive_or(self.plot_height, DEFAULT_PLOT_HEIGHT)
    }

    pub fn legend_x(&self) -> f64 {
        self.legend_x.unwrap_or(DEFAULT_LEGEND_X)
    }

    pub fn legend_y(&self) -> f64 {
        self.legend_y.unwrap_or(DEFAULT_LEGEND_Y)
    }

    pub fn legend_x_anchor(&self) -> &str {
        non_empty_or(&self.legend_x_anchor, DEFAULT_LEGEND_X_ANCHOR)
    }

    pub fn legend_y_anchor(&self) -> &str {
        non_empty_or(&self.legend_y_anchor, DEFAULT_LEGEND_Y_ANCHOR)
    }

    /// Plotly spells legend orientation `"v"` / `"h"`.
    pub fn legend_orientation(&self) -> &'static str {
        match self.legend_orientation.as_deref() {
            Some(o) if o.starts_with('h') => "h",
            _ => "v",
        }
    }

    pub fn paper_color(&self) -> &str {
        non_empty_or(&self.paper_color, DEFAULT_BGCOLOR)
    }

    pub fn plot_bgcolor(&self) -> &str {
        non_empty_or(&self.plot_bgcolor, DEFAULT_BGCOLOR)
    }

    pub fn keep_plots(&self) -> bool {
        self.keep_plots.unwrap_or(false)
    }
}

fn positive_or(v: Option<f64>, default: f64) -> f64 {
    v.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(default)
}

fn non_empty_or<'a>(v: &'a Option<String>, default: &'a str) -> &'a str {
    match v.as_deref() {
        Some(s) if !s.trim().is_empty() => s,
        _ => default,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(v)) => Some(v),
        Some(NumberOrText::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_numbers_as_text() {
        let s: Settings = serde_json::from_value(json!({
            "plot_type": "plotly",
            "plot_width": "800",
            "plot_height": 500,
            "legend_x": "0.5",
            "legend_y": null,
            "legend_orientation": "horizontal",
            "keep_plots": true
        }))
        .unwrap();
        assert_eq!(s.plot_width(), 800.0);
        assert_eq!(s.plot_height(), 500.0);
        assert_eq!(s.legend_x(), 0.5);
        assert_eq!(s.legend_y(), DEFAULT_LEGEND_Y);
        assert_eq!(s.legend_orientation(), "h");
        assert!(s.keep_plots());
        assert!(!s.is_image_mode());
    }

    #[test]
    fn missing_and_junk_values_fall_back_to_defaults() {
        let s: Settings = serde_json::from_value(json!({
            "plot_width": "wide",
            "plot_height": 0,
            "paper_color": "  "
        }))
        .unwrap();
        assert_eq!(s.plot_width(), DEFAULT_PLOT_WIDTH);
        assert_eq!(s.plot_height(), DEFAULT_PLOT_HEIGHT);
        assert_eq!(s.paper_color(), DEFAULT_BGCOLOR);
        assert_eq!(s.legend_x_anchor(), DEFAULT_LEGEND_X_ANCHOR);
        assert_eq!(s.legend_orientation(), "v");
        assert_eq!(s.file_type(), FileType::Other);
    }

    #[test]
    fn image_mode_and_file_type() {
        let s = Settings {
            plot_type: Some("image".into()),
            file_type: Some("PDF".into()),
            ..Settings::default()
        };
        assert!(s.is_image_mode());
        assert_eq!(s.file_type(), FileType::Pdf);
    }
}

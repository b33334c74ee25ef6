use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::PostprocError;

/// One drawing command exactly as the server emits it.
///
/// The payloads of `subplot` and `plot` are JSON documents that the server
/// encodes a second time into strings; they are kept opaque here and decoded
/// by [`Directive::decode`].
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WireDirective {
    Figure {
        #[serde(default)]
        title: Option<String>,
    },
    Subplot {
        spec_list: Value,
        #[serde(default)]
        mpl_prop: Option<Value>,
    },
    Plot {
        ydatas: Value,
        plot_args: Value,
    },
    Legend,
    Export(ExportLink),
}

/// Download link for a file written by an `@export` statement.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ExportLink {
    #[serde(rename = "filename")]
    pub path: String,
    #[serde(rename = "filename_no_path", default)]
    pub display_name: Option<String>,
}

impl ExportLink {
    /// Text shown for the link; falls back to the full path.
    pub fn label(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.path,
        }
    }
}

/// Axis properties a subplot may carry. Other matplotlib keys are ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct AxisProps {
    pub xlim: Option<[f64; 2]>,
    pub ylim: Option<[f64; 2]>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Subplot {
    pub rows: u32,
    pub cols: u32,
    /// 1-based cell number, row-major.
    pub index: u32,
    pub axes: AxisProps,
}

/// Per-series style arguments as given to `plt.plot`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SeriesStyle {
    pub label: Option<String>,
    pub linewidth: Option<f64>,
    pub color: Option<String>,
    pub marker: Option<String>,
    pub markersize: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Values plotted against the implicit x-sequence `1..=len`. `None`
    /// leaves a gap in the line.
    pub ydata: Vec<Option<f64>>,
    pub style: SeriesStyle,
}

/// A drawing command with all payloads decoded.
#[derive(Clone, Debug, PartialEq)]
pub enum Directive {
    Figure { title: Option<String> },
    Subplot(Subplot),
    Plot { series: Vec<Series> },
    Legend,
    Export(ExportLink),
}

impl Directive {
    /// Command name as it appears in the `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Directive::Figure { .. } => "figure",
            Directive::Subplot(_) => "subplot",
            Directive::Plot { .. } => "plot",
            Directive::Legend => "legend",
            Directive::Export(_) => "export",
        }
    }

    /// Decode one wire command. `index` is its position in the command list
    /// and is only used for error reporting.
    pub fn decode(index: usize, wire: WireDirective) -> Result<Self, PostprocError> {
        Ok(match wire {
            WireDirective::Figure { title } => Directive::Figure { title },
            WireDirective::Subplot {
                spec_list,
                mpl_prop,
            } => {
                let spec: Vec<i64> = nested(index, "spec_list", spec_list)?;
                let axes = match mpl_prop {
                    Some(Value::Null) | None => AxisProps::default(),
                    Some(v) => nested(index, "mpl_prop", v)?,
                };
                Directive::Subplot(subplot_from_spec(index, &spec, axes)?)
            }
            WireDirective::Plot { ydatas, plot_args } => {
                let ydatas: Vec<Vec<Option<f64>>> = nested(index, "ydatas", ydatas)?;
                let mut styles: Vec<SeriesStyle> = nested(index, "plot_args", plot_args)?;
                // Missing style records mean "no style"; surplus ones are dropped.
                styles.resize_with(ydatas.len(), SeriesStyle::default);
                let series = ydatas
                    .into_iter()
                    .zip(styles)
                    .map(|(ydata, style)| Series { ydata, style })
                    .collect();
                Directive::Plot { series }
            }
            WireDirective::Legend => Directive::Legend,
            WireDirective::Export(link) => Directive::Export(link),
        })
    }
}

/// Decode a whole command list, failing on the first malformed command.
pub fn decode_all(wire: Vec<WireDirective>) -> Result<Vec<Directive>, PostprocError> {
    wire.into_iter()
        .enumerate()
        .map(|(i, w)| Directive::decode(i, w))
        .collect()
}

/// Parse and decode a command list from the text of a `/run` response.
pub fn parse_commands(text: &str) -> Result<Vec<Directive>, PostprocError> {
    let wire: Vec<WireDirective> = serde_json::from_str(text)?;
    decode_all(wire)
}

fn nested<T: DeserializeOwned>(
    index: usize,
    field: &'static str,
    value: Value,
) -> Result<T, PostprocError> {
    let parsed = match value {
        Value::String(text) => serde_json::from_str(&text),
        other => serde_json::from_value(other),
    };
    parsed.map_err(|source| PostprocError::Decode {
        index,
        field,
        source,
    })
}

fn subplot_from_spec(index: usize, spec: &[i64], axes: AxisProps) -> Result<Subplot, PostprocError> {
    let invalid = || PostprocError::SubplotSpec {
        index,
        spec: spec.to_vec(),
    };
    let &[rows, cols, cell] = spec else {
        return Err(invalid());
    };
    let positive = |v: i64| u32::try_from(v).ok().filter(|v| *v > 0);
    let (Some(rows), Some(cols), Some(cell)) = (positive(rows), positive(cols), positive(cell))
    else {
        return Err(invalid());
    };
    if u64::from(cell) > u64::from(rows) * u64::from(cols) {
        return Err(invalid());
    }
    Ok(Subplot {
        rows,
        cols,
        index: cell,
        axes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode_value(v: Value) -> Result<Vec<Directive>, PostprocError> {
        parse_commands(&v.to_string())
    }

    #[test]
    fn decodes_double_encoded_payloads() {
        let cmds = decode_value(json!([
            {"type": "figure", "title": "Run 1", "mpl_prop": "{}"},
            {"type": "subplot", "spec_list": "[2, 1, 2]",
             "mpl_prop": "{\"xlim\": [0, 10], \"ylabel\": \"v\", \"title\": null}"},
            {"type": "plot", "ydatas": "[[1, 2, 3], [4, 5]]",
             "plot_args": "[{\"label\": \"a\", \"color\": \"red\"}, {\"marker\": \"o\"}]"},
            {"type": "legend", "mpl_prop": "{}"},
            {"type": "export", "filename": "/out/x.csv", "filename_no_path": "x.csv"}
        ]))
        .unwrap();

        assert_eq!(
            cmds[0],
            Directive::Figure {
                title: Some("Run 1".into())
            }
        );
        let Directive::Subplot(sp) = &cmds[1] else {
            panic!("expected subplot, got {:?}", cmds[1]);
        };
        assert_eq!((sp.rows, sp.cols, sp.index), (2, 1, 2));
        assert_eq!(sp.axes.xlim, Some([0.0, 10.0]));
        assert_eq!(sp.axes.ylabel.as_deref(), Some("v"));
        assert_eq!(sp.axes.ylim, None);

        let Directive::Plot { series } = &cmds[2] else {
            panic!("expected plot, got {:?}", cmds[2]);
        };
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].ydata, vec![Some(1.0), Some(2.0), Some(3.0)]);
        assert_eq!(series[0].style.color.as_deref(), Some("red"));
        assert_eq!(series[1].style.marker.as_deref(), Some("o"));

        assert_eq!(cmds[3], Directive::Legend);
        let Directive::Export(link) = &cmds[4] else {
            panic!("expected export");
        };
        assert_eq!(link.label(), "x.csv");
    }

    #[test]
    fn accepts_inline_payloads_and_null_values() {
        let cmds = decode_value(json!([
            {"type": "figure", "title": null},
            {"type": "subplot", "spec_list": [1, 2, 1], "mpl_prop": null},
            {"type": "plot", "ydatas": [[1.5, null, 2]], "plot_args": [{}]}
        ]))
        .unwrap();
        assert_eq!(cmds[0], Directive::Figure { title: None });
        assert!(matches!(&cmds[1], Directive::Subplot(sp) if sp.axes == AxisProps::default()));
        let Directive::Plot { series } = &cmds[2] else {
            panic!("expected plot");
        };
        assert_eq!(series[0].ydata, vec![Some(1.5), None, Some(2.0)]);
    }

    #[test]
    fn pads_missing_style_records() {
        let cmds = decode_value(json!([
            {"type": "plot", "ydatas": "[[1], [2], [3]]", "plot_args": "[{\"label\": \"only\"}]"}
        ]))
        .unwrap();
        let Directive::Plot { series } = &cmds[0] else {
            panic!("expected plot");
        };
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].style.label.as_deref(), Some("only"));
        assert_eq!(series[2].style, SeriesStyle::default());
    }

    #[test]
    fn reports_the_failing_field() {
        let err = decode_value(json!([
            {"type": "legend"},
            {"type": "plot", "ydatas": "[[1, 2", "plot_args": "[]"}
        ]))
        .unwrap_err();
        match err {
            PostprocError::Decode { index, field, .. } => {
                assert_eq!(index, 1);
                assert_eq!(field, "ydatas");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_subplot_specs() {
        for spec in ["[2, 1]", "[0, 1, 1]", "[2, 2, 5]", "[1, 1, -1]", "[1, 1, 1, 1]"] {
            let err = decode_value(json!([
                {"type": "subplot", "spec_list": spec, "mpl_prop": "{}"}
            ]))
            .unwrap_err();
            assert!(
                matches!(err, PostprocError::SubplotSpec { index: 0, .. }),
                "{spec}: {err:?}"
            );
        }
    }

    #[test]
    fn unknown_command_type_is_a_wire_error() {
        let err = decode_value(json!([{"type": "bar"}])).unwrap_err();
        assert!(matches!(err, PostprocError::Wire(_)));
    }

    #[test]
    fn export_label_falls_back_to_path() {
        let link = ExportLink {
            path: "/tmp/a.csv".into(),
            display_name: None,
        };
        assert_eq!(link.label(), "/tmp/a.csv");
    }
}

//! Post-processing interpreter: turns the command list of one script run
//! into chart containers.
//!
//! The walk is a single pass over the commands. A `figure` always opens a
//! new container; `subplot` and `plot` open one only when none is open.
//! Plots that follow a `subplot` are collected and drawn together as one
//! grid once [`is_last_plot_for_subplot`] says the subplot run is over.
//! Export links are gathered up front and appended after all charts.

use crate::directive::{Directive, ExportLink, Subplot, WireDirective, decode_all};
use crate::error::{BackendError, PostprocError};
use crate::grid::{PendingSubplot, flush_subplots};
use crate::layout::{Layout, LegendUpdate};
use crate::lookahead::is_last_plot_for_subplot;
use crate::settings::Settings;
use crate::trace::{Trace, series_to_traces};

/// Drawing primitives the interpreter needs from the charting library and
/// the page.
pub trait ChartBackend {
    /// Handle of one chart container.
    type Container: Clone;

    /// Remove every chart of the drawing region and release library state.
    fn purge(&mut self) -> Result<(), BackendError>;

    /// Add an empty container of the given size (px) to the drawing region
    /// and start observing it for user resizes.
    fn create_container(&mut self, width: f64, height: f64)
    -> Result<Self::Container, BackendError>;

    /// Initialise an empty container with traces and layout in one call.
    fn draw(
        &mut self,
        container: &Self::Container,
        traces: &[Trace],
        layout: &Layout,
    ) -> Result<(), BackendError>;

    /// Append traces to a container that already shows a plot, keeping its
    /// layout.
    fn add_traces(&mut self, container: &Self::Container, traces: &[Trace])
    -> Result<(), BackendError>;

    fn show_legend(
        &mut self,
        container: &Self::Container,
        update: &LegendUpdate,
    ) -> Result<(), BackendError>;

    /// Append the block of download links below the charts.
    fn add_export_links(&mut self, links: &[ExportLink]) -> Result<(), BackendError>;
}

/// What one container ended up showing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContainerSummary {
    pub title: String,
    pub trace_count: usize,
    /// Grid shape, when the container was initialised by a subplot flush.
    pub grid: Option<(u32, u32)>,
    pub legend: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub containers: Vec<ContainerSummary>,
    pub export_links: usize,
}

/// Purge the drawing region, then interpret `commands`.
pub fn run<B: ChartBackend>(
    backend: &mut B,
    settings: &Settings,
    commands: &[Directive],
) -> Result<RunSummary, PostprocError> {
    backend.purge()?;
    interpret(backend, settings, commands)
}

/// Purge the drawing region, decode the wire commands and interpret them.
/// A malformed command aborts the run before anything is drawn.
pub fn run_wire<B: ChartBackend>(
    backend: &mut B,
    settings: &Settings,
    wire: Vec<WireDirective>,
) -> Result<RunSummary, PostprocError> {
    backend.purge()?;
    let commands = decode_all(wire)?;
    interpret(backend, settings, &commands)
}

fn interpret<B: ChartBackend>(
    backend: &mut B,
    settings: &Settings,
    commands: &[Directive],
) -> Result<RunSummary, PostprocError> {
    log::debug!("postproc: {} commands", commands.len());
    let exports: Vec<ExportLink> = commands
        .iter()
        .filter_map(|cmd| match cmd {
            Directive::Export(link) => Some(link.clone()),
            _ => None,
        })
        .collect();

    let mut pass = Pass::new(backend, settings);
    for (i, cmd) in commands.iter().enumerate() {
        log::debug!("postproc: #{i} {}", cmd.kind());
        pass.step(cmd, &commands[i + 1..])?;
    }
    if !pass.pending.is_empty() {
        log::warn!(
            "postproc: {} subplot plot(s) never reached the end of their run",
            pass.pending.len()
        );
    }

    if !exports.is_empty() {
        pass.backend.add_export_links(&exports)?;
    }
    let mut summary = pass.summary;
    summary.export_links = exports.len();
    Ok(summary)
}

struct OpenContainer<C> {
    handle: C,
    contains_plot: bool,
    title: String,
    /// A `legend` arrived before the container had anything to show.
    pending_legend: bool,
}

/// Run-scoped interpreter state. A fresh one is built for every run so
/// nothing carries over between runs.
struct Pass<'a, B: ChartBackend> {
    backend: &'a mut B,
    settings: &'a Settings,
    current: Option<OpenContainer<B::Container>>,
    /// Subplot the next `plot` belongs to; `Some` while collecting.
    collecting: Option<Subplot>,
    pending: Vec<PendingSubplot>,
    summary: RunSummary,
}

impl<'a, B: ChartBackend> Pass<'a, B> {
    fn new(backend: &'a mut B, settings: &'a Settings) -> Self {
        Pass {
            backend,
            settings,
            current: None,
            collecting: None,
            pending: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    fn step(&mut self, cmd: &Directive, rest: &[Directive]) -> Result<(), PostprocError> {
        match cmd {
            Directive::Figure { title } => {
                self.open_container()?;
                let title = title.clone().unwrap_or_default();
                if let Some(open) = self.current.as_mut() {
                    open.title.clone_from(&title);
                }
                if let Some(entry) = self.summary.containers.last_mut() {
                    entry.title = title;
                }
            }
            Directive::Subplot(sp) => {
                if self.current.is_none() {
                    self.open_container()?;
                }
                self.collecting = Some(sp.clone());
            }
            Directive::Plot { series } => {
                if self.current.is_none() {
                    self.open_container()?;
                }
                let traces = series_to_traces(series);
                let layout = self.base_layout();
                match self.collecting.clone() {
                    Some(subplot) => {
                        self.pending.push(PendingSubplot {
                            traces,
                            subplot,
                            layout,
                        });
                        if is_last_plot_for_subplot(rest) {
                            self.collecting = None;
                            self.flush_pending()?;
                        }
                    }
                    None => self.render(traces, layout)?,
                }
            }
            Directive::Legend => self.legend()?,
            Directive::Export(_) => {}
        }
        Ok(())
    }

    fn legend(&mut self) -> Result<(), PostprocError> {
        let collecting = self.collecting.is_some();
        let Some(open) = self.current.as_mut() else {
            log::warn!("postproc: legend before any figure ignored");
            return Ok(());
        };
        if !collecting && open.contains_plot {
            self.backend
                .show_legend(&open.handle, &LegendUpdate::shown(self.settings))?;
            if let Some(entry) = self.summary.containers.last_mut() {
                entry.legend = true;
            }
        } else {
            open.pending_legend = true;
        }
        Ok(())
    }

    /// Draw the collected subplot traces as one grid into the current
    /// container. Only the lookahead triggers it: a `figure` inside a subplot
    /// run moves the collected traces on to the new container, and traces
    /// still collected when the list ends are not drawn.
    fn flush_pending(&mut self) -> Result<(), PostprocError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let pending = std::mem::take(&mut self.pending);
        let (traces, layout) = flush_subplots(pending)?;
        self.render(traces, layout)
    }

    fn render(&mut self, traces: Vec<Trace>, layout: Layout) -> Result<(), PostprocError> {
        let (Some(open), Some(entry)) = (self.current.as_mut(), self.summary.containers.last_mut())
        else {
            return Err(BackendError::new("no open chart container").into());
        };
        if open.contains_plot {
            self.backend.add_traces(&open.handle, &traces)?;
        } else {
            self.backend.draw(&open.handle, &traces, &layout)?;
            entry.grid = layout.grid.as_ref().map(|g| (g.rows, g.columns));
        }
        open.contains_plot = true;
        entry.trace_count += traces.len();

        if open.pending_legend {
            self.backend
                .show_legend(&open.handle, &LegendUpdate::shown(self.settings))?;
            open.pending_legend = false;
            entry.legend = true;
        }
        Ok(())
    }

    fn open_container(&mut self) -> Result<(), PostprocError> {
        let handle = self
            .backend
            .create_container(self.settings.plot_width(), self.settings.plot_height())?;
        self.current = Some(OpenContainer {
            handle,
            contains_plot: false,
            title: String::new(),
            pending_legend: false,
        });
        self.summary.containers.push(ContainerSummary::default());
        Ok(())
    }

    fn base_layout(&self) -> Layout {
        let title = self.current.as_ref().map_or("", |c| c.title.as_str());
        Layout::base(title, self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Purge,
        Create { id: usize, width: f64, height: f64 },
        Draw { id: usize, traces: Vec<Trace>, layout: Layout },
        AddTraces { id: usize, traces: Vec<Trace> },
        Legend { id: usize },
        Exports(Vec<String>),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        next_id: usize,
    }

    impl Recorder {
        fn calls_since_last_purge(&self) -> &[Call] {
            let start = self
                .calls
                .iter()
                .rposition(|c| *c == Call::Purge)
                .map_or(0, |i| i + 1);
            &self.calls[start..]
        }
    }

    impl ChartBackend for Recorder {
        type Container = usize;

        fn purge(&mut self) -> Result<(), BackendError> {
            self.calls.push(Call::Purge);
            Ok(())
        }

        fn create_container(&mut self, width: f64, height: f64) -> Result<usize, BackendError> {
            let id = self.next_id;
            self.next_id += 1;
            self.calls.push(Call::Create { id, width, height });
            Ok(id)
        }

        fn draw(&mut self, id: &usize, traces: &[Trace], layout: &Layout) -> Result<(), BackendError> {
            self.calls.push(Call::Draw {
                id: *id,
                traces: traces.to_vec(),
                layout: layout.clone(),
            });
            Ok(())
        }

        fn add_traces(&mut self, id: &usize, traces: &[Trace]) -> Result<(), BackendError> {
            self.calls.push(Call::AddTraces {
                id: *id,
                traces: traces.to_vec(),
            });
            Ok(())
        }

        fn show_legend(&mut self, id: &usize, update: &LegendUpdate) -> Result<(), BackendError> {
            assert!(update.showlegend);
            self.calls.push(Call::Legend { id: *id });
            Ok(())
        }

        fn add_export_links(&mut self, links: &[ExportLink]) -> Result<(), BackendError> {
            self.calls
                .push(Call::Exports(links.iter().map(|l| l.label().to_string()).collect()));
            Ok(())
        }
    }

    fn wire(v: Value) -> Vec<WireDirective> {
        serde_json::from_value(v).unwrap()
    }

    fn plot(ys: Value) -> Value {
        let n = ys.as_array().map_or(0, Vec::len);
        let args: Vec<Value> = (0..n).map(|_| json!({})).collect();
        json!({"type": "plot", "ydatas": ys.to_string(), "plot_args": Value::from(args).to_string()})
    }

    fn subplot(rows: u32, cols: u32, index: u32) -> Value {
        json!({
            "type": "subplot",
            "spec_list": format!("[{rows}, {cols}, {index}]"),
            "mpl_prop": "{\"title\": null}"
        })
    }

    fn export(name: &str) -> Value {
        json!({"type": "export", "filename": format!("/files/{name}"), "filename_no_path": name})
    }

    fn run_json(rec: &mut Recorder, settings: &Settings, cmds: Value) -> RunSummary {
        run_wire(rec, settings, wire(cmds)).unwrap()
    }

    #[test]
    fn empty_input_purges_and_creates_nothing() {
        let mut rec = Recorder::default();
        let summary = run_json(&mut rec, &Settings::default(), json!([]));
        assert_eq!(rec.calls, vec![Call::Purge]);
        assert_eq!(summary, RunSummary::default());
    }

    #[test]
    fn bare_plot_opens_its_own_container() {
        let mut rec = Recorder::default();
        let settings = Settings {
            plot_width: Some(320.0),
            plot_height: Some(240.0),
            ..Settings::default()
        };
        let summary = run_json(&mut rec, &settings, json!([plot(json!([[1, 2, 3]]))]));

        assert_eq!(summary.containers.len(), 1);
        assert_eq!(summary.containers[0].trace_count, 1);
        assert_eq!(
            rec.calls[1],
            Call::Create {
                id: 0,
                width: 320.0,
                height: 240.0
            }
        );
        let Call::Draw { id, traces, layout } = &rec.calls[2] else {
            panic!("expected draw, got {:?}", rec.calls[2]);
        };
        assert_eq!(*id, 0);
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].x, vec![1, 2, 3]);
        assert_eq!(traces[0].y.len(), 3);
        assert!(!layout.showlegend);
        assert!(layout.title.is_none());
        assert_eq!(rec.calls.len(), 3);
    }

    #[test]
    fn plots_after_a_figure_accumulate_in_one_container() {
        let mut rec = Recorder::default();
        let summary = run_json(
            &mut rec,
            &Settings::default(),
            json!([
                {"type": "figure", "title": "T"},
                plot(json!([[1, 2]])),
                plot(json!([[3, 4]]))
            ]),
        );
        assert_eq!(summary.containers.len(), 1);
        assert_eq!(summary.containers[0].title, "T");
        assert_eq!(summary.containers[0].trace_count, 2);

        let Call::Draw { layout, .. } = &rec.calls[2] else {
            panic!("expected draw");
        };
        assert_eq!(layout.title.as_ref().map(|t| t.text.as_str()), Some("T"));
        assert!(matches!(&rec.calls[3], Call::AddTraces { id: 0, traces } if traces.len() == 1));
    }

    #[test]
    fn each_figure_opens_a_new_container() {
        let mut rec = Recorder::default();
        let summary = run_json(
            &mut rec,
            &Settings::default(),
            json!([
                plot(json!([[1]])),
                {"type": "figure", "title": "second"},
                plot(json!([[2]])),
                {"type": "figure"}
            ]),
        );
        let titles: Vec<_> = summary.containers.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["", "second", ""]);
        assert_eq!(summary.containers[2].trace_count, 0);
    }

    #[test]
    fn subplots_are_flushed_once_after_the_last_plot() {
        let mut rec = Recorder::default();
        let summary = run_json(
            &mut rec,
            &Settings::default(),
            json!([
                subplot(2, 1, 1),
                plot(json!([[1, 2]])),
                subplot(2, 1, 2),
                plot(json!([[3, 4]]))
            ]),
        );
        let calls = rec.calls_since_last_purge();
        assert_eq!(calls.len(), 2, "{calls:?}");
        assert!(matches!(calls[0], Call::Create { id: 0, .. }));
        let Call::Draw { traces, layout, .. } = &calls[1] else {
            panic!("expected one grid draw, got {:?}", calls[1]);
        };
        let axes: Vec<_> = traces.iter().map(|t| t.xaxis.as_deref().unwrap()).collect();
        assert_eq!(axes, vec!["x1", "x2"]);
        assert_eq!(traces[1].yaxis.as_deref(), Some("y2"));
        assert_eq!(layout.grid.as_ref().map(|g| (g.rows, g.columns)), Some((2, 1)));
        assert_eq!(summary.containers.len(), 1);
        assert_eq!(summary.containers[0].grid, Some((2, 1)));
    }

    #[test]
    fn subplot_axis_properties_land_on_their_own_axes() {
        let mut rec = Recorder::default();
        run_json(
            &mut rec,
            &Settings::default(),
            json!([
                {"type": "figure", "title": "grid"},
                subplot(1, 2, 1),
                plot(json!([[1]])),
                {"type": "subplot", "spec_list": "[1, 2, 2]",
                 "mpl_prop": "{\"xlim\": [0, 3], \"ylabel\": \"p\"}"},
                plot(json!([[2]]))
            ]),
        );
        let Call::Draw { layout, .. } = rec.calls.last().unwrap() else {
            panic!("expected draw");
        };
        let v = serde_json::to_value(layout).unwrap();
        assert_eq!(v["title"]["text"], "grid");
        assert_eq!(v["xaxis2"]["range"], json!([0.0, 3.0]));
        assert_eq!(v["yaxis2"]["title"]["text"], "p");
        assert_eq!(v["xaxis"], json!({}));
    }

    #[test]
    fn a_figure_ends_the_subplot_run() {
        let mut rec = Recorder::default();
        let summary = run_json(
            &mut rec,
            &Settings::default(),
            json!([
                subplot(2, 1, 1),
                plot(json!([[1]])),
                {"type": "figure", "title": "next"},
                plot(json!([[2]]))
            ]),
        );
        assert_eq!(summary.containers.len(), 2);
        assert_eq!(summary.containers[0].grid, Some((2, 1)));
        assert_eq!(summary.containers[1].grid, None);
        assert_eq!(summary.containers[1].trace_count, 1);
    }

    #[test]
    fn collected_traces_move_on_to_the_next_figure() {
        let mut rec = Recorder::default();
        let summary = run_json(
            &mut rec,
            &Settings::default(),
            json!([
                subplot(2, 1, 1),
                plot(json!([[1]])),
                subplot(2, 1, 2),
                {"type": "figure", "title": "other"},
                plot(json!([[2], [3]]))
            ]),
        );
        assert_eq!(summary.containers.len(), 2);
        assert_eq!(summary.containers[0].trace_count, 0);
        assert_eq!(summary.containers[0].grid, None);
        assert_eq!(summary.containers[1].trace_count, 3);
        assert_eq!(summary.containers[1].grid, Some((2, 1)));

        let calls = rec.calls_since_last_purge();
        assert_eq!(calls.len(), 3, "{calls:?}");
        let Call::Draw { id, traces, .. } = &calls[2] else {
            panic!("expected one grid draw, got {:?}", calls[2]);
        };
        assert_eq!(*id, 1);
        let axes: Vec<_> = traces.iter().map(|t| t.xaxis.as_deref().unwrap()).collect();
        assert_eq!(axes, vec!["x1", "x2", "x2"]);
    }

    #[test]
    fn trailing_subplot_leaves_collected_plots_undrawn() {
        let mut rec = Recorder::default();
        let summary = run_json(
            &mut rec,
            &Settings::default(),
            json!([subplot(1, 2, 1), plot(json!([[1]])), subplot(1, 2, 2)]),
        );
        assert_eq!(summary.containers.len(), 1);
        assert_eq!(summary.containers[0].trace_count, 0);
        assert_eq!(summary.containers[0].grid, None);
        let calls = rec.calls_since_last_purge();
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], Call::Create { id: 0, .. }));
    }

    #[test]
    fn subplots_after_a_plot_are_appended() {
        let mut rec = Recorder::default();
        let summary = run_json(
            &mut rec,
            &Settings::default(),
            json!([
                {"type": "figure"},
                plot(json!([[1]])),
                subplot(1, 1, 1),
                plot(json!([[2]]))
            ]),
        );
        assert_eq!(summary.containers.len(), 1);
        assert_eq!(summary.containers[0].trace_count, 2);
        assert_eq!(summary.containers[0].grid, None);
        let Call::AddTraces { traces, .. } = rec.calls.last().unwrap() else {
            panic!("expected appended traces");
        };
        assert_eq!(traces[0].xaxis.as_deref(), Some("x1"));
    }

    #[test]
    fn legend_inside_subplot_run_is_applied_after_the_flush() {
        let mut rec = Recorder::default();
        let summary = run_json(
            &mut rec,
            &Settings::default(),
            json!([subplot(1, 1, 1), {"type": "legend"}, plot(json!([[1, 2]]))]),
        );
        let calls = rec.calls_since_last_purge();
        assert!(matches!(calls[0], Call::Create { .. }));
        assert!(matches!(calls[1], Call::Draw { .. }));
        assert_eq!(calls[2], Call::Legend { id: 0 });
        assert_eq!(calls.len(), 3);
        assert!(summary.containers[0].legend);
    }

    #[test]
    fn legend_after_a_plot_is_applied_at_once() {
        let mut rec = Recorder::default();
        run_json(
            &mut rec,
            &Settings::default(),
            json!([plot(json!([[1]])), {"type": "legend"}, plot(json!([[2]]))]),
        );
        let calls = rec.calls_since_last_purge();
        assert_eq!(calls[2], Call::Legend { id: 0 });
        assert!(matches!(calls[3], Call::AddTraces { .. }));
    }

    #[test]
    fn legend_before_the_first_plot_waits_for_it() {
        let mut rec = Recorder::default();
        let summary = run_json(
            &mut rec,
            &Settings::default(),
            json!([{"type": "figure"}, {"type": "legend"}, plot(json!([[1]]))]),
        );
        assert_eq!(rec.calls.last(), Some(&Call::Legend { id: 0 }));
        assert!(summary.containers[0].legend);
    }

    #[test]
    fn legend_without_a_container_is_dropped() {
        let mut rec = Recorder::default();
        let summary = run_json(
            &mut rec,
            &Settings::default(),
            json!([{"type": "legend"}, {"type": "figure"}, plot(json!([[1]]))]),
        );
        assert!(!rec.calls.iter().any(|c| matches!(c, Call::Legend { .. })));
        assert!(!summary.containers[0].legend);
    }

    #[test]
    fn pending_legend_does_not_follow_into_a_new_figure() {
        let mut rec = Recorder::default();
        run_json(
            &mut rec,
            &Settings::default(),
            json!([
                {"type": "figure"},
                {"type": "legend"},
                {"type": "figure"},
                plot(json!([[1]]))
            ]),
        );
        assert!(!rec.calls.iter().any(|c| matches!(c, Call::Legend { .. })));
    }

    #[test]
    fn exports_come_last_in_original_order() {
        let mut rec = Recorder::default();
        let summary = run_json(
            &mut rec,
            &Settings::default(),
            json!([
                export("a.csv"),
                plot(json!([[1]])),
                export("b.csv"),
                {"type": "figure"},
                plot(json!([[2]])),
                export("c.csv")
            ]),
        );
        assert_eq!(
            rec.calls.last(),
            Some(&Call::Exports(vec!["a.csv".into(), "b.csv".into(), "c.csv".into()]))
        );
        let export_calls = rec
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Exports(_)))
            .count();
        assert_eq!(export_calls, 1);
        assert_eq!(summary.export_links, 3);
    }

    #[test]
    fn exports_only_render_no_containers() {
        let mut rec = Recorder::default();
        let summary = run_json(&mut rec, &Settings::default(), json!([export("x.csv")]));
        assert!(summary.containers.is_empty());
        assert_eq!(rec.calls.len(), 2);
    }

    #[test]
    fn rerun_gives_the_same_result() {
        let cmds = json!([
            {"type": "figure", "title": "A"},
            subplot(2, 2, 1),
            {"type": "legend"},
            plot(json!([[1, 2], [3, 4]])),
            subplot(2, 2, 4),
            plot(json!([[5]])),
            export("out.csv")
        ]);
        let settings = Settings::default();
        let mut rec = Recorder::default();
        let first = run_json(&mut rec, &settings, cmds.clone());
        let first_calls = rec.calls.clone();

        rec.next_id = 0;
        let second = run_json(&mut rec, &settings, cmds);
        assert_eq!(first, second);
        assert_eq!(rec.calls_since_last_purge(), &first_calls[1..]);
        assert_eq!(first.containers[0].grid, Some((2, 2)));
        assert_eq!(first.containers[0].trace_count, 3);
    }

    #[test]
    fn malformed_payload_stops_the_run_before_drawing() {
        let mut rec = Recorder::default();
        let err = run_wire(
            &mut rec,
            &Settings::default(),
            wire(json!([
                plot(json!([[1]])),
                {"type": "plot", "ydatas": "[[1,", "plot_args": "[]"}
            ])),
        )
        .unwrap_err();
        assert!(matches!(err, PostprocError::Decode { index: 1, .. }));
        assert_eq!(rec.calls, vec![Call::Purge]);
    }

    #[test]
    fn backend_failures_propagate() {
        struct Broken;
        impl ChartBackend for Broken {
            type Container = ();
            fn purge(&mut self) -> Result<(), BackendError> {
                Ok(())
            }
            fn create_container(&mut self, _: f64, _: f64) -> Result<(), BackendError> {
                Err(BackendError::new("Plotly is not loaded"))
            }
            fn draw(&mut self, _: &(), _: &[Trace], _: &Layout) -> Result<(), BackendError> {
                Ok(())
            }
            fn add_traces(&mut self, _: &(), _: &[Trace]) -> Result<(), BackendError> {
                Ok(())
            }
            fn show_legend(&mut self, _: &(), _: &LegendUpdate) -> Result<(), BackendError> {
                Ok(())
            }
            fn add_export_links(&mut self, _: &[ExportLink]) -> Result<(), BackendError> {
                Ok(())
            }
        }

        let cmds = vec![Directive::Figure { title: None }];
        let err = run(&mut Broken, &Settings::default(), &cmds).unwrap_err();
        assert_eq!(err.to_string(), "chart backend: Plotly is not loaded");
    }
}

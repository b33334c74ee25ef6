use crate::directive::Subplot;
use crate::error::PostprocError;
use crate::layout::{Axis, Grid, Layout, Title, axis_key};
use crate::trace::Trace;

/// Traces of one `plot` command collected while a subplot run is open,
/// together with the subplot they belong to and the layout they were
/// translated with.
#[derive(Clone, Debug)]
pub struct PendingSubplot {
    pub traces: Vec<Trace>,
    pub subplot: Subplot,
    pub layout: Layout,
}

/// Per-axis overrides taken from a subplot's matplotlib properties.
fn cell_axes(subplot: &Subplot) -> (Axis, Axis) {
    let props = &subplot.axes;
    let title = |t: &Option<String>| t.as_ref().map(|text| Title { text: text.clone() });
    (
        Axis {
            range: props.xlim,
            title: title(&props.xlabel),
        },
        Axis {
            range: props.ylim,
            title: title(&props.ylabel),
        },
    )
}

/// Merge the collected subplot traces into one grid render.
///
/// The first entry's layout is the base; each subplot contributes the
/// overrides of its own numbered axes and every trace is bound to the axes
/// of its cell. When entries disagree on the grid shape the last one wins.
pub fn flush_subplots(pending: Vec<PendingSubplot>) -> Result<(Vec<Trace>, Layout), PostprocError> {
    let Some(first) = pending.first() else {
        return Err(PostprocError::EmptySubplotFlush);
    };
    let mut layout = first.layout.clone();
    let (mut rows, mut cols) = (first.subplot.rows, first.subplot.cols);
    let mut traces = Vec::new();

    for entry in pending {
        let sp = &entry.subplot;
        if (sp.rows, sp.cols) != (rows, cols) {
            log::warn!(
                "subplot grid changes from {rows}x{cols} to {}x{} within one figure; using the latter",
                sp.rows,
                sp.cols
            );
        }
        rows = sp.rows;
        cols = sp.cols;

        let (x, y) = cell_axes(sp);
        layout.axes.insert(axis_key('x', sp.index), x);
        layout.axes.insert(axis_key('y', sp.index), y);

        for mut trace in entry.traces {
            trace.place_in_cell(sp.index);
            traces.push(trace);
        }
    }

    layout.grid = Some(Grid::independent(rows, cols));
    Ok((traces, layout))
}

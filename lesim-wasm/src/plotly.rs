//! `ChartBackend` over the page's global `Plotly` object.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Reflect};
use lesim_core::layout::grid_visibility_update;
use lesim_core::{
    BackendError, ChartBackend, ExportLink, Layout, LegendUpdate, ResizeUpdate, Settings, Trace,
};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, ResizeObserver, ResizeObserverEntry};

use crate::constants::{
    CHART_ACTION_ATTR, CHART_BORDER, CHART_CLASS, FIGURE_CLASS, GRID_ATTR, PLOTAREA_DEMO,
    PLOTAREA_HORIZ, PLOTAREA_VERT,
};
use crate::dom::{append_export_links, clear_children, create_html, px, set_style};
use crate::state::State;
use crate::utils::js_error_text;

fn plotly_call(name: &str, args: &[&JsValue]) -> Result<JsValue, JsValue> {
    let plotly = Reflect::get(&js_sys::global(), &JsValue::from_str("Plotly"))?;
    if plotly.is_undefined() {
        return Err(JsValue::from_str("Plotly is not loaded"));
    }
    let func: Function = Reflect::get(&plotly, &JsValue::from_str(name))?.dyn_into()?;
    let args: Array = args.iter().copied().collect();
    func.apply(&plotly, &args)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

pub fn relayout<T: Serialize + ?Sized>(chart: &Element, update: &T) -> Result<(), JsValue> {
    let target: &JsValue = chart;
    plotly_call("relayout", &[target, &to_js(update)?])?;
    Ok(())
}

/// Release Plotly state of every chart in `area`, stop observing them and
/// empty the area.
pub fn purge_region(area: &Element, observer: &ResizeObserver) -> Result<(), JsValue> {
    let charts = area.get_elements_by_class_name(CHART_CLASS);
    for i in 0..charts.length() {
        if let Some(chart) = charts.item(i) {
            release_chart(&chart, observer)?;
        }
    }
    clear_children(area)
}

fn release_chart(chart: &Element, observer: &ResizeObserver) -> Result<(), JsValue> {
    observer.unobserve(chart);
    let target: &JsValue = chart;
    plotly_call("purge", &[target])?;
    Ok(())
}

/// Regions cleared before output lands in `area`: the area itself and, for
/// the user's regions, the other orientation's region too.
pub fn regions_to_purge(document: &Document, area: &Element) -> Vec<Element> {
    let mut regions = vec![area.clone()];
    let sibling = match area.id().as_str() {
        PLOTAREA_VERT => Some(PLOTAREA_HORIZ),
        PLOTAREA_HORIZ => Some(PLOTAREA_VERT),
        _ => None,
    };
    if let Some(el) = sibling.and_then(|id| document.get_element_by_id(id)) {
        regions.push(el);
    }
    regions
}

/// Observer relayouting a chart after the user drags its resize handle.
pub fn chart_resize_observer() -> Result<ResizeObserver, JsValue> {
    let on_resize = Closure::<dyn FnMut(Array)>::wrap(Box::new(move |entries: Array| {
        // Observing new containers reports them all at once; only single
        // entries come from the user.
        if entries.length() != 1 {
            return;
        }
        let Ok(entry) = entries.get(0).dyn_into::<ResizeObserverEntry>() else {
            return;
        };
        let chart = entry.target();
        let update = ResizeUpdate {
            width: chart.client_width() as f64,
            height: chart.client_height() as f64,
        };
        if let Err(e) = relayout(&chart, &update) {
            log::warn!("resize relayout failed: {}", js_error_text(&e));
        }
    }));
    let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();
    Ok(observer)
}

fn backend_error(e: JsValue) -> BackendError {
    BackendError::new(js_error_text(&e))
}

/// Buttons of a chart's toolbar, named by their `data-chart-action`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartAction {
    Legend,
    Grid,
    Close,
}

impl ChartAction {
    const ALL: [ChartAction; 3] = [ChartAction::Legend, ChartAction::Grid, ChartAction::Close];

    pub fn attr(self) -> &'static str {
        match self {
            ChartAction::Legend => "legend",
            ChartAction::Grid => "grid",
            ChartAction::Close => "close",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartAction::Legend => "Legend",
            ChartAction::Grid => "Grid",
            ChartAction::Close => "Close",
        }
    }

    pub fn from_attr(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.attr() == value)
    }
}

/// One click listener per drawing region serves the toolbars of every chart
/// drawn into it, so containers carry no handlers of their own.
pub fn attach_chart_controls(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();
    for id in [PLOTAREA_VERT, PLOTAREA_HORIZ, PLOTAREA_DEMO] {
        let Some(area) = doc.get_element_by_id(id) else {
            continue;
        };
        let st = state.clone();
        let on_click = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |e: Event| {
            if let Err(err) = chart_action(&st, &e) {
                log::error!("chart action failed: {}", js_error_text(&err));
            }
        }));
        area.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

fn chart_action(state: &Rc<RefCell<State>>, event: &Event) -> Result<(), JsValue> {
    let Some(button) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return Ok(());
    };
    let Some(action) = button
        .get_attribute(CHART_ACTION_ATTR)
        .and_then(|a| ChartAction::from_attr(&a))
    else {
        return Ok(());
    };
    let Some(figure) = button.closest(&format!(".{FIGURE_CLASS}"))? else {
        return Ok(());
    };
    let Some(chart) = figure.query_selector(&format!(".{CHART_CLASS}"))? else {
        return Ok(());
    };
    let (settings, observer) = {
        let s = state.borrow();
        (s.settings.clone(), s.resize_observer.clone())
    };
    match action {
        ChartAction::Legend => toggle_legend(&chart, &settings),
        ChartAction::Grid => toggle_grid(&chart),
        ChartAction::Close => {
            release_chart(&chart, &observer)?;
            figure.remove();
            Ok(())
        }
    }
}

/// Draws into one region of the page. Each container is a wrapper holding a
/// small toolbar and the resizable div Plotly renders into.
pub struct PlotlyBackend {
    document: Document,
    area: HtmlElement,
    observer: ResizeObserver,
}

impl PlotlyBackend {
    pub fn new(document: Document, area: HtmlElement, observer: ResizeObserver) -> Self {
        PlotlyBackend {
            document,
            area,
            observer,
        }
    }

    fn build_container(&self, width: f64, height: f64) -> Result<HtmlElement, JsValue> {
        let figure = create_html(&self.document, "div")?;
        figure.set_class_name(FIGURE_CLASS);
        if self.area.id() == PLOTAREA_HORIZ {
            set_style(&figure, "float", "left");
        }

        let chart = create_html(&self.document, "div")?;
        chart.set_class_name(CHART_CLASS);
        set_style(&chart, "width", &px(width));
        set_style(&chart, "height", &px(height));
        set_style(&chart, "resize", "both");
        set_style(&chart, "overflow", "hidden");
        set_style(&chart, "border", CHART_BORDER);
        chart.set_attribute(GRID_ATTR, "on")?;

        let toolbar = create_html(&self.document, "div")?;
        toolbar.set_class_name("lesim-chart-toolbar");
        for action in ChartAction::ALL {
            let button = create_html(&self.document, "button")?;
            button.set_text_content(Some(action.label()));
            button.set_attribute(CHART_ACTION_ATTR, action.attr())?;
            toolbar.append_child(&button)?;
        }

        figure.append_child(&toolbar)?;
        figure.append_child(&chart)?;
        self.area.append_child(&figure)?;
        self.observer.observe(&chart);
        Ok(chart)
    }
}

/// Live layout Plotly keeps on the chart div.
fn live_layout(chart: &Element) -> Result<JsValue, JsValue> {
    Reflect::get(chart, &JsValue::from_str("layout"))
}

fn toggle_legend(chart: &Element, settings: &Settings) -> Result<(), JsValue> {
    let layout = live_layout(chart)?;
    let shown = if layout.is_object() {
        Reflect::get(&layout, &JsValue::from_str("showlegend"))?
            .as_bool()
            .unwrap_or(false)
    } else {
        false
    };
    relayout(chart, &LegendUpdate::toggled(shown, settings))
}

fn toggle_grid(chart: &Element) -> Result<(), JsValue> {
    let visible = chart.get_attribute(GRID_ATTR).as_deref() != Some("off");
    let layout = live_layout(chart)?;
    let keys: Vec<String> = match layout.dyn_ref::<js_sys::Object>() {
        Some(obj) => js_sys::Object::keys(obj)
            .iter()
            .filter_map(|k| k.as_string())
            .collect(),
        None => Vec::new(),
    };
    let update = grid_visibility_update(keys.iter().map(String::as_str), !visible);
    relayout(chart, &update)?;
    chart.set_attribute(GRID_ATTR, if visible { "off" } else { "on" })?;
    Ok(())
}

impl ChartBackend for PlotlyBackend {
    type Container = HtmlElement;

    fn purge(&mut self) -> Result<(), BackendError> {
        for region in regions_to_purge(&self.document, &self.area) {
            purge_region(&region, &self.observer).map_err(backend_error)?;
        }
        Ok(())
    }

    fn create_container(&mut self, width: f64, height: f64) -> Result<HtmlElement, BackendError> {
        self.build_container(width, height).map_err(backend_error)
    }

    fn draw(
        &mut self,
        container: &HtmlElement,
        traces: &[Trace],
        layout: &Layout,
    ) -> Result<(), BackendError> {
        let traces = to_js(traces).map_err(backend_error)?;
        let layout = to_js(layout).map_err(backend_error)?;
        let target: &JsValue = container;
        plotly_call("react", &[target, &traces, &layout]).map_err(backend_error)?;
        Ok(())
    }

    fn add_traces(
        &mut self,
        container: &HtmlElement,
        traces: &[Trace],
    ) -> Result<(), BackendError> {
        let traces = to_js(traces).map_err(backend_error)?;
        let target: &JsValue = container;
        plotly_call("addTraces", &[target, &traces]).map_err(backend_error)?;
        Ok(())
    }

    fn show_legend(
        &mut self,
        container: &HtmlElement,
        update: &LegendUpdate,
    ) -> Result<(), BackendError> {
        relayout(container, update).map_err(backend_error)
    }

    fn add_export_links(&mut self, links: &[ExportLink]) -> Result<(), BackendError> {
        append_export_links(&self.document, &self.area, links).map_err(backend_error)
    }
}

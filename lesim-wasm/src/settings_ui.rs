//! The settings panel: loading the user's settings, mirroring them in the
//! form and saving them back.

use std::cell::RefCell;
use std::rc::Rc;

use lesim_core::{SaveReply, Settings};
use serde_json::json;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlInputElement, HtmlSelectElement};

use crate::constants::*;
use crate::dom::{set_style, set_visible};
use crate::state::State;
use crate::utils::{
    alert, element, fetch_text, js_error_text, optional_element, path_segment, post_json,
};

/// Id of the user's settings record, carried by the script editor. Absent
/// when nobody is signed in.
fn settings_id(document: &Document) -> Option<String> {
    optional_element::<HtmlElement>(document, TEXTAREA_CODE)?
        .dataset()
        .get("settingsid")
}

fn field(document: &Document, id: &str) -> Option<String> {
    let el = document.get_element_by_id(id)?;
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    el.dyn_ref::<HtmlSelectElement>().map(|s| s.value())
}

fn set_field(document: &Document, id: &str, value: &str) {
    let Some(el) = document.get_element_by_id(id) else {
        return;
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    }
}

fn number(value: Option<String>) -> Option<f64> {
    value?.trim().parse().ok()
}

fn number_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn read_form(document: &Document) -> Settings {
    Settings {
        plot_type: field(document, SETTINGS_PLOT_TYPE),
        file_type: field(document, SETTINGS_FILE_TYPE),
        plot_orientation: field(document, SETTINGS_ORIENTATION),
        plot_width: number(field(document, SETTINGS_WIDTH)),
        plot_height: number(field(document, SETTINGS_HEIGHT)),
        legend_x: number(field(document, SETTINGS_LEGEND_X)),
        legend_y: number(field(document, SETTINGS_LEGEND_Y)),
        legend_x_anchor: field(document, SETTINGS_LEGEND_X_ANCHOR),
        legend_y_anchor: field(document, SETTINGS_LEGEND_Y_ANCHOR),
        legend_orientation: field(document, SETTINGS_LEGEND_ORIENTATION),
        paper_color: field(document, SETTINGS_PAPER_COLOR),
        plot_bgcolor: field(document, SETTINGS_PLOT_BGCOLOR),
        keep_plots: optional_element::<HtmlInputElement>(document, SETTINGS_KEEP)
            .map(|c| c.checked()),
    }
}

pub fn write_form(document: &Document, s: &Settings) {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    set_field(document, SETTINGS_PLOT_TYPE, &text(&s.plot_type));
    set_field(document, SETTINGS_FILE_TYPE, &text(&s.file_type));
    set_field(document, SETTINGS_ORIENTATION, &text(&s.plot_orientation));
    set_field(document, SETTINGS_WIDTH, &number_text(s.plot_width));
    set_field(document, SETTINGS_HEIGHT, &number_text(s.plot_height));
    set_field(document, SETTINGS_LEGEND_X, &number_text(s.legend_x));
    set_field(document, SETTINGS_LEGEND_Y, &number_text(s.legend_y));
    set_field(document, SETTINGS_LEGEND_X_ANCHOR, &text(&s.legend_x_anchor));
    set_field(document, SETTINGS_LEGEND_Y_ANCHOR, &text(&s.legend_y_anchor));
    set_field(document, SETTINGS_LEGEND_ORIENTATION, &text(&s.legend_orientation));
    set_field(document, SETTINGS_PAPER_COLOR, &text(&s.paper_color));
    set_field(document, SETTINGS_PLOT_BGCOLOR, &text(&s.plot_bgcolor));
    if let Some(keep) = optional_element::<HtmlInputElement>(document, SETTINGS_KEEP) {
        keep.set_checked(s.keep_plots());
    }
}

/// Show the Plotly or the matplotlib group of the form, following the
/// selected plot type.
pub fn update_mode_visibility(document: &Document) {
    let image = field(document, SETTINGS_PLOT_TYPE).as_deref() == Some("image");
    set_class_visible(document, SETTINGS_PLOTLY_CLASS, !image);
    set_class_visible(document, SETTINGS_MPL_CLASS, image);
    if let Some(label) = document.get_element_by_id(SETTINGS_SIZE_LABEL) {
        label.set_text_content(Some(if image { "Image size" } else { "Plot size" }));
    }
}

fn set_class_visible(document: &Document, class: &str, visible: bool) {
    let els = document.get_elements_by_class_name(class);
    for i in 0..els.length() {
        if let Some(el) = els.item(i).and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
            set_visible(&el, visible);
        }
    }
}

/// Fetch the user's settings and fill the form with them.
pub fn load_settings(state: Rc<RefCell<State>>) {
    let (window, document) = {
        let s = state.borrow();
        (s.window.clone(), s.document.clone())
    };
    let Some(id) = settings_id(&document) else {
        log::debug!("no settings id; keeping defaults");
        return;
    };
    let url = format!("{GET_SETTINGS_URL}{}", path_segment(&id));
    wasm_bindgen_futures::spawn_local(async move {
        let text = match fetch_text(&window, &url).await {
            Ok(t) => t,
            Err(e) => {
                log::error!("cannot load settings: {}", js_error_text(&e));
                return;
            }
        };
        match serde_json::from_str::<Settings>(&text) {
            Ok(settings) => {
                write_form(&document, &settings);
                update_mode_visibility(&document);
                state.borrow_mut().settings = settings;
            }
            Err(e) => log::error!("malformed settings: {e}"),
        }
    });
}

/// Take the settings from the form and store them on the server. The page
/// state is updated right away; the request finishes in the background.
pub fn save_settings(state: &Rc<RefCell<State>>) -> Result<(), JsValue> {
    let (window, document) = {
        let s = state.borrow();
        (s.window.clone(), s.document.clone())
    };
    let Some(id) = settings_id(&document) else {
        return Ok(());
    };
    let settings = read_form(&document);
    state.borrow_mut().settings = settings.clone();
    let body = json!({ "id": id, "settings": settings });
    wasm_bindgen_futures::spawn_local(async move {
        let reply = post_json(&window, SAVE_SETTINGS_URL, &body)
            .await
            .and_then(|text| {
                serde_json::from_str::<SaveReply>(&text)
                    .map_err(|e| JsValue::from_str(&e.to_string()))
            });
        match reply {
            Ok(reply) => {
                if let Some(err) = reply.error() {
                    alert(&window, err);
                }
            }
            Err(e) => log::error!("cannot save settings: {}", js_error_text(&e)),
        }
    });
    Ok(())
}

/// Settings button and plot-type selector.
pub fn attach_settings_panel(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();

    if let Some(plot_type) = optional_element::<HtmlElement>(&doc, SETTINGS_PLOT_TYPE) {
        let d = doc.clone();
        let on_change = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            update_mode_visibility(&d);
        }));
        plot_type.set_onchange(Some(on_change.as_ref().unchecked_ref()));
        on_change.forget();
    }
    update_mode_visibility(&doc);

    let Some(button) = optional_element::<HtmlElement>(&doc, BUTTON_SETTINGS) else {
        return Ok(());
    };
    let panel: HtmlElement = element(&doc, DIV_SETTINGS)?;
    let btn = button.clone();
    let on_click = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        let open = panel
            .style()
            .get_property_value("display")
            .is_ok_and(|d| d == "block");
        set_style(&panel, "display", if open { "none" } else { "block" });
        btn.set_text_content(Some(if open { ">>" } else { "<<" }));
        let editor_style = if open {
            EDITOR_STYLE_PLAIN
        } else {
            EDITOR_STYLE_WITH_SETTINGS
        };
        if let Some(editor) = doc.get_element_by_id(EDITOR)
            && let Err(e) = editor.set_attribute("style", editor_style)
        {
            log::warn!("cannot resize editor: {}", js_error_text(&e));
        }
    }));
    button.set_onclick(Some(on_click.as_ref().unchecked_ref()));
    on_click.forget();
    Ok(())
}

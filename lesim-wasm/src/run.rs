use std::cell::RefCell;
use std::rc::Rc;

use lesim_core::constants::IMAGE_ALT_TEXT;
use lesim_core::editor::line_selection;
use lesim_core::images::{ImageElement, image_panels};
use lesim_core::{
    ImageRun, ImageRunResponse, PlotRunResponse, RunResponse, ServerError, Settings, run_wire,
};
use serde_json::json;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlTextAreaElement, ResizeObserver};

use crate::constants::*;
use crate::dom::{append_export_links, create_html, is_visible, px, set_style, set_visible};
use crate::plotly::{PlotlyBackend, purge_region, regions_to_purge};
use crate::settings_ui;
use crate::state::State;
use crate::utils::{alert, element, js_error_text, optional_element, post_json};

/// Wire the run buttons. The user's button only exists for signed-in users.
pub fn attach_run_buttons(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();
    if let Some(button) = optional_element::<HtmlElement>(&doc, BUTTON_RUN) {
        attach_run(&button, state.clone(), false);
    }
    let demo_button: HtmlElement = element(&doc, BUTTON_RUN_DEMO)?;
    attach_run(&demo_button, state, true);
    Ok(())
}

fn attach_run(button: &HtmlElement, state: Rc<RefCell<State>>, demo: bool) {
    let cb = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        if let Err(e) = run_clicked(&state, demo) {
            let msg = js_error_text(&e);
            log::error!("run failed: {msg}");
            alert(&state.borrow().window, &msg);
        }
    }));
    button.set_onclick(Some(cb.as_ref().unchecked_ref()));
    cb.forget();
}

fn run_clicked(state: &Rc<RefCell<State>>, demo: bool) -> Result<(), JsValue> {
    if !demo {
        settings_ui::save_settings(state)?;
    }
    let (window, document, settings) = {
        let s = state.borrow();
        (s.window.clone(), s.document.clone(), s.settings.clone())
    };
    let area_id = if demo {
        PLOTAREA_DEMO
    } else if settings.is_horizontal() {
        PLOTAREA_HORIZ
    } else {
        PLOTAREA_VERT
    };
    let area: HtmlElement = element(&document, area_id)?;
    let code_id = if demo { TEXTAREA_CODE_DEMO } else { TEXTAREA_CODE };
    let code = element::<HtmlTextAreaElement>(&document, code_id)?.value();

    let image_mode = settings.is_image_mode();
    let url = if image_mode { RUN_IMAGES_URL } else { RUN_URL };
    let payload = json!({ "code": code, "settings": settings });
    log::info!("running {} script via {url}", if demo { "demo" } else { "user" });

    let st = state.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let text = match post_json(&window, url, &payload).await {
            Ok(text) => text,
            Err(e) => {
                let msg = js_error_text(&e);
                log::error!("run request failed: {msg}");
                alert(&window, &msg);
                return;
            }
        };
        if let Err(e) = show_run_output(&st, &area, image_mode, &settings, &text) {
            let msg = js_error_text(&e);
            log::error!("cannot show run output: {msg}");
            alert(&window, &msg);
        }
    });
    Ok(())
}

fn show_run_output(
    state: &Rc<RefCell<State>>,
    area: &HtmlElement,
    image_mode: bool,
    settings: &Settings,
    text: &str,
) -> Result<(), JsValue> {
    let (document, observer) = {
        let s = state.borrow();
        (s.document.clone(), s.resize_observer.clone())
    };
    let to_js = |e: lesim_core::PostprocError| JsValue::from_str(&e.to_string());
    if image_mode {
        match ImageRunResponse::parse(text).map_err(to_js)? {
            RunResponse::Failed(err) => show_server_error(&document, &err),
            RunResponse::Completed(run) => {
                render_images(&document, &observer, area, settings, &run)
            }
        }
    } else {
        match PlotRunResponse::parse(text).map_err(to_js)? {
            RunResponse::Failed(err) => show_server_error(&document, &err),
            RunResponse::Completed(wire) => {
                let mut backend = PlotlyBackend::new(document, area.clone(), observer);
                let summary = run_wire(&mut backend, settings, wire).map_err(to_js)?;
                log::info!(
                    "drew {} chart(s), {} export link(s)",
                    summary.containers.len(),
                    summary.export_links
                );
                Ok(())
            }
        }
    }
}

/// Show figures rendered on the server, one container per file.
fn render_images(
    document: &Document,
    observer: &ResizeObserver,
    area: &HtmlElement,
    settings: &Settings,
    run: &ImageRun,
) -> Result<(), JsValue> {
    for region in regions_to_purge(document, area) {
        purge_region(&region, observer)?;
    }
    for (i, panel) in image_panels(&run.imgfiles, settings).iter().enumerate() {
        let holder = create_html(document, "div")?;
        holder.set_id(&format!("div-mpl-{i}"));
        set_style(&holder, "border", IMAGE_BORDER);
        if let Some((w, h)) = panel.size {
            set_style(&holder, "width", &px(w));
            set_style(&holder, "height", &px(h));
        }
        if panel.resizable {
            set_style(&holder, "resize", "both");
            set_style(&holder, "overflow", "hidden");
        }
        if settings.is_horizontal() {
            set_style(&holder, "float", "left");
        }

        let tag = match panel.element {
            ImageElement::Frame => "iframe",
            ImageElement::Img => "img",
        };
        let img = create_html(document, tag)?;
        img.set_attribute("src", &panel.src)?;
        img.set_attribute("alt", IMAGE_ALT_TEXT)?;
        if panel.fill {
            set_style(&img, "width", "100%");
            set_style(&img, "height", "100%");
        }
        holder.append_child(&img)?;
        area.append_child(&holder)?;
    }
    if !run.exportcmds.is_empty() {
        append_export_links(document, area, &run.exportcmds)?;
    }
    log::info!("showing {} image(s)", run.imgfiles.len());
    Ok(())
}

fn show_server_error(document: &Document, err: &ServerError) -> Result<(), JsValue> {
    log::warn!("script error: {}", err.err_msg);
    if let Some(lineno) = err.lineno {
        select_line(document, lineno)?;
    }
    show_error_dialog(document, err)
}

/// Highlight line `lineno` (1-based) of the user's script. Out-of-range
/// lines are ignored.
pub fn select_line(document: &Document, lineno: i64) -> Result<(), JsValue> {
    let Some(editor) = optional_element::<HtmlTextAreaElement>(document, TEXTAREA_CODE) else {
        return Ok(());
    };
    if let Some((start, end)) = line_selection(&editor.value(), lineno) {
        editor.focus()?;
        editor.set_selection_range(start, end)?;
    }
    Ok(())
}

fn show_error_dialog(document: &Document, err: &ServerError) -> Result<(), JsValue> {
    element::<HtmlElement>(document, ERRDLG_MESSAGE)?.set_text_content(Some(&err.err_msg));
    let details: HtmlTextAreaElement = element(document, ERRDLG_DETAILS)?;
    details.set_value(err.stack_trace.as_deref().unwrap_or_default());
    set_visible(&details, false);
    element::<HtmlElement>(document, ERRDLG_DETAILS_BUTTON)?.set_text_content(Some(DETAILS_SHOW));
    set_visible(&element::<HtmlElement>(document, ERRDLG_MODAL_BG)?, true);
    Ok(())
}

/// Details toggle and close button of the error dialog.
pub fn attach_error_dialog(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();

    let details_button: HtmlElement = element(&doc, ERRDLG_DETAILS_BUTTON)?;
    let details: HtmlElement = element(&doc, ERRDLG_DETAILS)?;
    let button = details_button.clone();
    let on_details = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        let show = !is_visible(&details);
        set_visible(&details, show);
        button.set_text_content(Some(if show { DETAILS_HIDE } else { DETAILS_SHOW }));
    }));
    details_button.set_onclick(Some(on_details.as_ref().unchecked_ref()));
    on_details.forget();

    let close: HtmlElement = element(&doc, ERRDLG_CLOSE)?;
    let modal_bg: HtmlElement = element(&doc, ERRDLG_MODAL_BG)?;
    let on_close = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        set_visible(&modal_bg, false);
        // Focus brings back the selection of the failing line.
        if let Some(editor) = optional_element::<HtmlElement>(&doc, TEXTAREA_CODE)
            && let Err(e) = editor.focus()
        {
            log::warn!("cannot focus the editor: {}", js_error_text(&e));
        }
    }));
    close.set_onclick(Some(on_close.as_ref().unchecked_ref()));
    on_close.forget();
    Ok(())
}

/// Remove every chart and image from the user's drawing regions.
pub fn attach_close_all(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let (doc, observer) = {
        let s = state.borrow();
        (s.document.clone(), s.resize_observer.clone())
    };
    let button: HtmlElement = element(&doc, BUTTON_CLOSE_ALL)?;
    let cb = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        for id in [PLOTAREA_VERT, PLOTAREA_HORIZ] {
            if let Some(area) = doc.get_element_by_id(id)
                && let Err(e) = purge_region(&area, &observer)
            {
                log::error!("cannot clear #{id}: {}", js_error_text(&e));
            }
        }
    }));
    button.set_onclick(Some(cb.as_ref().unchecked_ref()));
    cb.forget();
    Ok(())
}

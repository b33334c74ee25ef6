//! Saving the user's script and loading demo scripts.

use std::cell::RefCell;
use std::rc::Rc;

use lesim_core::{DemoScript, SaveReply};
use serde_json::json;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::constants::*;
use crate::dom::{px, set_style};
use crate::settings_ui;
use crate::state::State;
use crate::utils::{
    alert, element, fetch_text, js_error_text, optional_element, path_segment, post_json,
};

/// Demo scripts share the cache with user scripts; keep their keys apart.
fn demo_key(name: &str) -> String {
    format!("demo:{name}")
}

pub fn attach_save_script(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();
    let Some(button) = optional_element::<HtmlElement>(&doc, BUTTON_SAVE_SCRIPT) else {
        return Ok(());
    };
    let cb = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        if let Err(e) = save_script(&state) {
            log::error!("cannot save script: {}", js_error_text(&e));
        }
        if let Err(e) = settings_ui::save_settings(&state) {
            log::error!("cannot save settings: {}", js_error_text(&e));
        }
    }));
    button.set_onclick(Some(cb.as_ref().unchecked_ref()));
    cb.forget();
    Ok(())
}

fn save_script(state: &Rc<RefCell<State>>) -> Result<(), JsValue> {
    let (window, document) = {
        let s = state.borrow();
        (s.window.clone(), s.document.clone())
    };
    let editor: HtmlTextAreaElement = element(&document, TEXTAREA_CODE)?;
    let name = element::<HtmlInputElement>(&document, INPUT_SCRIPT_NAME)?.value();
    let code = editor.value();
    let Some(id) = editor.dataset().get("scriptid") else {
        return Err(JsValue::from_str("the editor carries no script id"));
    };

    let body = json!({ "id": id, "name": name, "code": code });
    let st = state.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let reply = post_json(&window, SAVE_SCRIPT_URL, &body)
            .await
            .and_then(|text| {
                serde_json::from_str::<SaveReply>(&text)
                    .map_err(|e| JsValue::from_str(&e.to_string()))
            });
        match reply {
            Ok(reply) => match reply.error() {
                Some(err) => alert(&window, err),
                None => {
                    st.borrow_mut().scripts.update(&id, &name, &code);
                    log::info!("saved script {id} ({name})");
                }
            },
            Err(e) => {
                let msg = js_error_text(&e);
                log::error!("save request failed: {msg}");
                alert(&window, &msg);
            }
        }
    });
    Ok(())
}

/// Selecting a demo shows its code in the demo editor.
pub fn attach_demo_scripts(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();
    let select: HtmlSelectElement = element(&doc, SELECT_DEMO_SCRIPTS)?;
    let sel = select.clone();
    let cb = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        if let Err(e) = show_demo(&state, &sel.value()) {
            log::error!("cannot show demo: {}", js_error_text(&e));
        }
    }));
    select.set_onchange(Some(cb.as_ref().unchecked_ref()));
    cb.forget();

    attach_demo_toggle(&doc)
}

fn show_demo(state: &Rc<RefCell<State>>, name: &str) -> Result<(), JsValue> {
    let (window, document, cached) = {
        let s = state.borrow();
        let cached = s.scripts.cached(&demo_key(name)).map(|d| d.code.clone());
        (s.window.clone(), s.document.clone(), cached)
    };
    let editor: HtmlTextAreaElement = element(&document, TEXTAREA_CODE_DEMO)?;
    if let Some(code) = cached {
        editor.set_value(&code);
        return Ok(());
    }

    let url = format!("{GET_DEMO_URL}{}", path_segment(name));
    let name = name.to_string();
    let st = state.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let demo = fetch_text(&window, &url).await.and_then(|text| {
            serde_json::from_str::<DemoScript>(&text).map_err(|e| JsValue::from_str(&e.to_string()))
        });
        match demo {
            Ok(demo) => {
                editor.set_value(&demo.code);
                st.borrow_mut()
                    .scripts
                    .update(&demo_key(&name), &name, &demo.code);
            }
            Err(e) => log::error!("cannot load demo '{name}': {}", js_error_text(&e)),
        }
    });
    Ok(())
}

/// The button folding the demo section open and closed.
fn attach_demo_toggle(doc: &web_sys::Document) -> Result<(), JsValue> {
    let Some(button) = optional_element::<HtmlElement>(doc, BUTTON_SHOW_DEMO) else {
        return Ok(());
    };
    let div: HtmlElement = element(doc, DIV_DEMO)?;
    let btn = button.clone();
    let cb = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        if let Err(e) = btn.class_list().toggle("active") {
            log::warn!("cannot toggle the demo button: {}", js_error_text(&e));
        }
        let style = div.style();
        let open = style
            .get_property_value("max-height")
            .is_ok_and(|h| !h.is_empty());
        if open {
            if let Err(e) = style.remove_property("max-height") {
                log::warn!("cannot fold the demo section: {}", js_error_text(&e));
            }
        } else {
            set_style(&div, "max-height", &px(div.scroll_height() as f64));
        }
    }));
    button.set_onclick(Some(cb.as_ref().unchecked_ref()));
    cb.forget();
    Ok(())
}

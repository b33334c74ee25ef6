use std::cell::RefCell;
use std::rc::Rc;

use lesim_core::editor::insert_tab;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlTextAreaElement, KeyboardEvent};

use crate::constants::{LINE_COUNTER, TEXTAREA_CODE};
use crate::state::State;
use crate::utils::{element, js_error_text, optional_element};

/// Line-number gutter, Tab key and scroll sync of the user's script editor.
pub fn attach_editor(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();
    let Some(code) = optional_element::<HtmlTextAreaElement>(&doc, TEXTAREA_CODE) else {
        return Ok(());
    };
    let counter: HtmlTextAreaElement = element(&doc, LINE_COUNTER)?;

    let (c, lc) = (code.clone(), counter.clone());
    let on_scroll = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        lc.set_scroll_top(c.scroll_top());
        lc.set_scroll_left(c.scroll_left());
    }));
    code.set_onscroll(Some(on_scroll.as_ref().unchecked_ref()));
    on_scroll.forget();

    let c = code.clone();
    let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(move |e: KeyboardEvent| {
        if e.key() != "Tab" {
            return;
        }
        e.prevent_default();
        let (Ok(Some(start)), Ok(Some(end))) = (c.selection_start(), c.selection_end()) else {
            return;
        };
        let (value, caret) = insert_tab(&c.value(), start, end);
        c.set_value(&value);
        if let Err(e) = c.set_selection_range(caret, caret) {
            log::warn!("cannot move the caret: {}", js_error_text(&e));
        }
    }));
    code.set_onkeydown(Some(on_keydown.as_ref().unchecked_ref()));
    on_keydown.forget();

    let st = state.clone();
    let (c, lc) = (code.clone(), counter.clone());
    let on_input = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        refresh_line_counter(&st, &c, &lc);
    }));
    code.set_oninput(Some(on_input.as_ref().unchecked_ref()));
    on_input.forget();

    refresh_line_counter(&state, &code, &counter);
    Ok(())
}

fn refresh_line_counter(
    state: &Rc<RefCell<State>>,
    code: &HtmlTextAreaElement,
    counter: &HtmlTextAreaElement,
) {
    if let Some(numbers) = state.borrow_mut().line_counter.refresh(&code.value()) {
        counter.set_value(&numbers);
    }
}

//! WebAssembly front-end of the simulator's home page: the script editor,
//! the settings panel and the Plotly rendering of run output.

use std::cell::RefCell;
use std::rc::Rc;

use lesim_core::editor::LineCounter;
use lesim_core::{ScriptCache, Settings};
use wasm_bindgen::prelude::*;

mod constants;
mod dom;
mod editor;
mod plotly;
mod run;
mod scripts;
mod settings_ui;
mod state;
mod utils;

use constants::DIV_HOME;
use state::State;

fn init_logging() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    init_logging();
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    // Only the home page carries the editor and the plot areas.
    if document.get_element_by_id(DIV_HOME).is_none() {
        return Ok(());
    }

    let resize_observer = plotly::chart_resize_observer()?;
    let state = Rc::new(RefCell::new(State {
        window,
        document,
        settings: Settings::default(),
        scripts: ScriptCache::new(),
        line_counter: LineCounter::default(),
        resize_observer,
    }));

    editor::attach_editor(state.clone())?;
    settings_ui::attach_settings_panel(state.clone())?;
    settings_ui::load_settings(state.clone());
    run::attach_error_dialog(state.clone())?;
    run::attach_run_buttons(state.clone())?;
    run::attach_close_all(state.clone())?;
    plotly::attach_chart_controls(state.clone())?;
    scripts::attach_save_script(state.clone())?;
    scripts::attach_demo_scripts(state)?;
    log::info!("home page ready");
    Ok(())
}

use lesim_core::editor::LineCounter;
use lesim_core::{ScriptCache, Settings};
use web_sys::{Document, ResizeObserver, Window};

/// Page state shared by the event handlers behind an `Rc<RefCell<_>>`.
/// Handlers borrow it briefly and never across an `await`.
#[derive(Clone)]
pub struct State {
    pub window: Window,
    pub document: Document,
    /// Settings of the signed-in user, or defaults until they arrive.
    pub settings: Settings,
    pub scripts: ScriptCache,
    pub line_counter: LineCounter,
    /// Shared by every chart container of the page.
    pub resize_observer: ResizeObserver,
}

use lesim_core::ExportLink;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

pub fn set_style(el: &HtmlElement, prop: &str, value: &str) {
    if let Err(e) = el.style().set_property(prop, value) {
        log::warn!("cannot set {prop}: {e:?}");
    }
}

pub fn set_visible(el: &HtmlElement, visible: bool) {
    set_style(el, "display", if visible { "block" } else { "none" });
}

pub fn is_visible(el: &HtmlElement) -> bool {
    el.style()
        .get_property_value("display")
        .is_ok_and(|d| d != "none")
}

pub fn create_html(document: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    document
        .create_element(tag)?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)
}

pub fn px(v: f64) -> String {
    format!("{v}px")
}

pub fn clear_children(el: &Element) -> Result<(), JsValue> {
    while let Some(child) = el.last_child() {
        el.remove_child(&child)?;
    }
    Ok(())
}

/// Append the block of download links for files written by `@export`.
pub fn append_export_links(
    document: &Document,
    area: &Element,
    links: &[ExportLink],
) -> Result<(), JsValue> {
    let block = create_html(document, "div")?;
    block.set_class_name("lesim-exports");
    for link in links {
        let a = document.create_element("a")?;
        a.set_attribute("href", &link.path)?;
        a.set_text_content(Some(link.label()));
        block.append_child(&a)?;
        let br = document.create_element("br")?;
        block.append_child(&br)?;
    }
    area.append_child(&block)?;
    Ok(())
}

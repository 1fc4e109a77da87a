use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::error::{Result, SiteError};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(SiteError::NoWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(SiteError::NoDocument)
}

/// Current vertical page offset (`pageYOffset`), 0 when unavailable.
pub fn page_offset(window: &Window) -> f64 {
    window.page_y_offset().unwrap_or(0.0)
}

/// First match for `selector`. Invalid selectors count as no match.
pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn require(document: &Document, selector: &str) -> Result<Element> {
    query(document, selector).ok_or_else(|| SiteError::MissingElement(selector.to_string()))
}

pub fn require_id(document: &Document, id: &str) -> Result<Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SiteError::MissingElement(format!("#{}", id)))
}

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn as_html(element: &Element) -> Option<&HtmlElement> {
    element.dyn_ref::<HtmlElement>()
}

/// Writes inline style properties in order. Non-HTML elements are skipped.
pub fn set_styles(element: &Element, properties: &[(&str, &str)]) -> Result<()> {
    if let Some(html) = as_html(element) {
        let style = html.style();
        for (name, value) in properties {
            style.set_property(name, value)?;
        }
    }
    Ok(())
}

pub fn remove_style(element: &Element, name: &str) -> Result<()> {
    if let Some(html) = as_html(element) {
        html.style().remove_property(name)?;
    }
    Ok(())
}

/// Attaches `handler` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Runs `f` once the document has been parsed: right away if that already
/// happened, otherwise on `DOMContentLoaded`.
pub fn on_ready<F>(document: &Document, f: F) -> Result<()>
where
    F: FnOnce() + 'static,
{
    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }
    let mut f = Some(f);
    listen(document, "DOMContentLoaded", move |_| {
        if let Some(f) = f.take() {
            f();
        }
    })
}

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::{RevealGroup, SiteConfig};
use crate::dom;
use crate::error::Result;
use crate::motion;

/// Section fade-ins are wired straight away; the staggered groups and the
/// body `loaded` class wait for the document to be parsed.
pub fn install(document: &Document, config: &Rc<SiteConfig>) -> Result<()> {
    observe_group(document, &config.sections)?;

    let ready_document = document.clone();
    let config = Rc::clone(config);
    dom::on_ready(document, move || {
        if let Err(e) = install_on_ready(&ready_document, &config) {
            warn!("reveal animations: {}", e);
        }
    })
}

fn install_on_ready(document: &Document, config: &SiteConfig) -> Result<()> {
    if let Some(body) = document.body() {
        body.class_list().add_1(&config.loaded_class)?;
    }
    for group in &config.staggered {
        observe_group(document, group)?;
    }
    info!("reveal animations wired");
    Ok(())
}

fn hide(element: &Element, group: &RevealGroup) -> Result<()> {
    dom::set_styles(
        element,
        &[
            ("opacity", "0"),
            ("transform", group.hidden_transform.as_str()),
            ("transition", group.transition().as_str()),
        ],
    )
}

fn show(element: &Element, shown_transform: &str) -> Result<()> {
    dom::set_styles(element, &[("opacity", "1"), ("transform", shown_transform)])
}

fn observer_init(group: &RevealGroup) -> IntersectionObserverInit {
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(group.threshold));
    if let Some(margin) = &group.root_margin {
        init.set_root_margin(margin);
    }
    init
}

fn observe_group(document: &Document, group: &RevealGroup) -> Result<()> {
    let elements = dom::query_all(document, &group.selector)?;
    if elements.is_empty() {
        debug!("nothing to reveal for {}", group.selector);
        return Ok(());
    }

    let shown: Rc<str> = Rc::from(group.shown_transform.as_str());
    let stagger = group.stagger_ms;
    let selector = group.selector.clone();

    let callback = Closure::wrap(Box::new(move |entries: Array| {
        debug!("{}: {} intersection entries", selector, entries.length());
        // Stagger index counts the whole batch, not just the visible entries.
        for (index, entry) in entries.iter().enumerate() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if !entry.is_intersecting() {
                continue;
            }
            let target = entry.target();
            match stagger {
                None => {
                    if let Err(e) = show(&target, &shown) {
                        warn!("reveal {}: {}", selector, e);
                    }
                }
                Some(step) => {
                    let shown = Rc::clone(&shown);
                    Timeout::new(motion::stagger_delay(index, step), move || {
                        if let Err(e) = show(&target, &shown) {
                            warn!("reveal: {}", e);
                        }
                    })
                    .forget();
                }
            }
        }
    }) as Box<dyn FnMut(Array)>);

    let observer = IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &observer_init(group),
    )?;
    callback.forget();

    for element in &elements {
        hide(element, group)?;
        observer.observe(element);
    }
    debug!("observing {} x {}", elements.len(), group.selector);
    Ok(())
}

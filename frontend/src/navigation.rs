use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::config::SiteConfig;
use crate::dom;
use crate::error::Result;
use crate::motion;

/// The nav toggle button and the link list it opens on small screens.
#[derive(Clone)]
struct MobileMenu {
    toggle: Element,
    links: Element,
    active_class: String,
}

impl MobileMenu {
    fn find(document: &Document, config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            toggle: dom::require(document, &config.nav_toggle_selector)?,
            links: dom::require(document, &config.nav_links_selector)?,
            active_class: config.active_class.clone(),
        })
    }

    fn is_open(&self) -> bool {
        self.links.class_list().contains(&self.active_class)
    }

    fn toggle(&self) -> Result<()> {
        self.toggle.class_list().toggle(&self.active_class)?;
        self.links.class_list().toggle(&self.active_class)?;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.links.class_list().remove_1(&self.active_class)?;
        self.toggle.class_list().remove_1(&self.active_class)?;
        Ok(())
    }
}

/// In-page anchors scroll smoothly to their target below the nav. Works
/// without a mobile menu on the page; an open one is closed after scrolling.
pub fn install_smooth_scroll(window: &Window, document: &Document, config: &Rc<SiteConfig>) -> Result<()> {
    let menu = MobileMenu::find(document, config).ok();
    let anchors = dom::query_all(document, &config.anchor_selector)?;
    debug!("smooth scroll on {} anchors", anchors.len());

    for anchor in anchors {
        let window = window.clone();
        let document = document.clone();
        let config = Rc::clone(config);
        let menu = menu.clone();
        let href_source = anchor.clone();

        dom::listen(&anchor, "click", move |event: Event| {
            event.prevent_default();
            let href = href_source.get_attribute("href").unwrap_or_default();
            if let Err(e) = scroll_to_anchor(&window, &document, &config, menu.as_ref(), &href) {
                warn!("scroll to {} failed: {}", href, e);
            }
        })?;
    }
    info!("smooth scroll wired");
    Ok(())
}

fn scroll_to_anchor(
    window: &Window,
    document: &Document,
    config: &SiteConfig,
    menu: Option<&MobileMenu>,
    href: &str,
) -> Result<()> {
    let Some(target) = dom::query(document, href) else {
        debug!("anchor {:?} has no target", href);
        return Ok(());
    };

    let nav_height = dom::query(document, &config.nav_selector)
        .and_then(|nav| nav.dyn_into::<HtmlElement>().ok())
        .map(|nav| f64::from(nav.offset_height()))
        .unwrap_or(0.0);
    let top = motion::anchor_scroll_top(
        target.get_bounding_client_rect().top(),
        dom::page_offset(window),
        nav_height,
    );
    debug!("scrolling to {} at {}", href, top);

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);

    if let Some(menu) = menu.filter(|m| m.is_open()) {
        menu.close()?;
    }
    Ok(())
}

/// Toggles the scrolled class on the nav bar as the page moves past the
/// threshold.
pub fn install_scroll_state(window: &Window, document: &Document, config: &Rc<SiteConfig>) -> Result<()> {
    let nav = dom::require_id(document, &config.nav_id)?;
    let config = Rc::clone(config);
    let scroll_window = window.clone();

    dom::listen(window, "scroll", move |_| {
        let offset = dom::page_offset(&scroll_window);
        let classes = nav.class_list();
        let result = if motion::is_scrolled(offset, config.scrolled_threshold) {
            classes.add_1(&config.scrolled_class)
        } else {
            classes.remove_1(&config.scrolled_class)
        };
        if let Err(e) = result {
            warn!("nav scroll state: {:?}", e);
        }
    })?;
    info!("nav scroll state wired");
    Ok(())
}

/// Burger toggle plus closing the menu on any click outside the nav.
pub fn install_mobile_menu(document: &Document, config: &Rc<SiteConfig>) -> Result<()> {
    let menu = MobileMenu::find(document, config)?;
    let toggle_menu = menu.clone();
    dom::listen(&menu.toggle, "click", move |_| {
        if let Err(e) = toggle_menu.toggle() {
            warn!("nav toggle: {}", e);
        }
    })?;

    let container = config.nav_container_selector.clone();
    dom::listen(document, "click", move |event: Event| {
        let inside = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&container).ok().flatten())
            .is_some();
        if !inside {
            if let Err(e) = menu.close() {
                warn!("nav close: {}", e);
            }
        }
    })?;
    info!("mobile menu wired");
    Ok(())
}

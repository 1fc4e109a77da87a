use std::rc::Rc;

use log::{debug, info, warn};
use web_sys::{Document, Element, Window};

use crate::config::SiteConfig;
use crate::debounce::debounce;
use crate::dom;
use crate::error::Result;
use crate::motion;

fn shift(window: &Window, hero: &Element, rate: f64) {
    let offset = motion::parallax_offset(dom::page_offset(window), rate);
    let transform = motion::translate_y(offset);
    if let Err(e) = dom::set_styles(hero, &[("transform", transform.as_str())]) {
        warn!("parallax: {}", e);
    }
}

/// Moves the hero background at a fraction of the scroll speed. Pages without
/// a hero background are left alone.
pub fn install(window: &Window, document: &Document, config: &Rc<SiteConfig>) -> Result<()> {
    let Some(hero) = dom::query(document, &config.hero_background_selector) else {
        debug!("no {} on this page", config.hero_background_selector);
        return Ok(());
    };
    let rate = config.parallax_rate;

    let scroll_window = window.clone();
    let scroll_hero = hero.clone();
    dom::listen(window, "scroll", move |_| shift(&scroll_window, &scroll_hero, rate))?;

    // Trailing update once scrolling settles.
    let settle_window = window.clone();
    let mut settle = debounce(config.parallax_debounce_ms, move || {
        shift(&settle_window, &hero, rate)
    });
    dom::listen(window, "scroll", move |_| settle())?;

    info!("parallax wired");
    Ok(())
}

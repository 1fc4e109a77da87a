//! Interactive behaviour for the static marketing page: smooth anchor
//! scrolling, the mobile nav, scroll reveal animations, hero parallax and the
//! contact form. Everything attaches to markup that is already on the page.

use std::rc::Rc;

use log::{error, info, warn};
use web_sys::Document;

pub mod config;
pub mod contact;
pub mod debounce;
pub mod dom;
pub mod error;
pub mod motion;
pub mod navigation;
pub mod parallax;
pub mod reveal;

use config::{SiteConfig, CONFIG_SCRIPT_ID};
use error::Result;

/// Reads the page's JSON override if there is one. Bad JSON falls back to the
/// defaults.
pub fn load_config(document: &Document) -> SiteConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content())
    else {
        return SiteConfig::default();
    };

    match SiteConfig::from_json(&raw) {
        Ok(config) => {
            info!("using page config from #{}", CONFIG_SCRIPT_ID);
            config
        }
        Err(e) => {
            warn!("ignoring #{}: {}", CONFIG_SCRIPT_ID, e);
            SiteConfig::default()
        }
    }
}

/// Wires every routine. A routine that fails is logged and skipped so the
/// rest of the page still works.
pub fn start() -> Result<()> {
    let window = dom::window()?;
    let document = dom::document()?;
    let config = Rc::new(load_config(&document));

    let routines: [(&str, Result<()>); 6] = [
        ("smooth scroll", navigation::install_smooth_scroll(&window, &document, &config)),
        ("nav scroll state", navigation::install_scroll_state(&window, &document, &config)),
        ("mobile menu", navigation::install_mobile_menu(&document, &config)),
        ("reveal", reveal::install(&document, &config)),
        ("contact", contact::install(&window, &document, &config)),
        ("parallax", parallax::install(&window, &document, &config)),
    ];
    for (name, result) in routines {
        if let Err(e) = result {
            error!("{} not wired: {}", name, e);
        }
    }
    Ok(())
}

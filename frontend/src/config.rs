use log::Level;
use serde::Deserialize;

/// Id of the optional `<script type="application/json">` block that overrides
/// any field of [`SiteConfig`].
pub const CONFIG_SCRIPT_ID: &str = "site-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Chatty console while developing with trunk serve
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Everything the wiring routines look up on the page, plus the timings and
/// labels they apply. Defaults describe the stock marketing page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub nav_id: String,
    pub nav_selector: String,
    pub nav_toggle_selector: String,
    pub nav_links_selector: String,
    pub nav_container_selector: String,
    pub anchor_selector: String,
    pub hero_background_selector: String,
    pub contact_form_id: String,
    pub submit_button_selector: String,

    pub active_class: String,
    pub scrolled_class: String,
    pub loaded_class: String,

    /// Nav gets the scrolled class once the page offset is strictly above this.
    pub scrolled_threshold: f64,
    pub parallax_rate: f64,
    pub parallax_debounce_ms: u32,

    /// POST target for the contact form. `None` posts to the current page path.
    pub form_endpoint: Option<String>,
    pub feedback_reset_ms: u32,
    pub sending_label: String,
    pub success_label: String,
    pub success_background: String,
    pub error_label: String,
    pub error_background: String,

    pub sections: RevealGroup,
    pub staggered: Vec<RevealGroup>,
}

/// One family of elements that fade/slide in when they enter the viewport.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealGroup {
    pub selector: String,
    pub hidden_transform: String,
    pub shown_transform: String,
    /// Seconds, used for both the opacity and transform transitions.
    pub duration_secs: f64,
    pub threshold: f64,
    pub root_margin: Option<String>,
    /// Delay between consecutive entries of one observer batch. `None`
    /// reveals immediately.
    pub stagger_ms: Option<u32>,
}

impl RevealGroup {
    fn staggered(selector: &str, hidden: &str, shown: &str, duration_secs: f64, step: u32) -> Self {
        Self {
            selector: selector.to_string(),
            hidden_transform: hidden.to_string(),
            shown_transform: shown.to_string(),
            duration_secs,
            threshold: 0.2,
            root_margin: None,
            stagger_ms: Some(step),
        }
    }

    pub fn transition(&self) -> String {
        format!(
            "opacity {d}s ease, transform {d}s ease",
            d = self.duration_secs
        )
    }
}

impl Default for RevealGroup {
    fn default() -> Self {
        Self {
            selector: ".section".to_string(),
            hidden_transform: "translateY(30px)".to_string(),
            shown_transform: "translateY(0)".to_string(),
            duration_secs: 0.8,
            threshold: 0.1,
            root_margin: Some("0px 0px -50px 0px".to_string()),
            stagger_ms: None,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            nav_id: "nav".to_string(),
            nav_selector: ".nav".to_string(),
            nav_toggle_selector: ".nav-toggle".to_string(),
            nav_links_selector: ".nav-links".to_string(),
            nav_container_selector: ".nav-container".to_string(),
            anchor_selector: "a[href^=\"#\"]".to_string(),
            hero_background_selector: ".hero-background".to_string(),
            contact_form_id: "contact-form".to_string(),
            submit_button_selector: "button[type=\"submit\"]".to_string(),

            active_class: "active".to_string(),
            scrolled_class: "scrolled".to_string(),
            loaded_class: "loaded".to_string(),

            scrolled_threshold: 100.0,
            parallax_rate: 0.3,
            parallax_debounce_ms: 10,

            form_endpoint: None,
            feedback_reset_ms: 3000,
            sending_label: "Sending...".to_string(),
            success_label: "Message sent! ✓".to_string(),
            success_background: "#10B981".to_string(),
            error_label: "Error. Please try again.".to_string(),
            error_background: "#EF4444".to_string(),

            sections: RevealGroup::default(),
            staggered: vec![
                RevealGroup::staggered(".stat-card", "translateY(30px)", "translateY(0)", 0.6, 100),
                RevealGroup::staggered(".benefit-item", "translateY(20px)", "translateY(0)", 0.6, 100),
                RevealGroup::staggered(".pillar", "translateY(30px)", "translateY(0)", 0.8, 150),
                RevealGroup::staggered(".capability-item", "translateX(-20px)", "translateX(0)", 0.6, 100),
            ],
        }
    }
}

impl SiteConfig {
    /// Parses the page-embedded override. Fields left out keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

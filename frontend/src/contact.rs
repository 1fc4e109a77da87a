use std::rc::Rc;

use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{self, Array};
use web_sys::{Document, Event, File, FormData, HtmlButtonElement, HtmlFormElement, Window};

use crate::config::SiteConfig;
use crate::dom;
use crate::error::{Result, SiteError};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// How a submission settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Sent,
    Failed,
}

impl Outcome {
    pub fn label(self, config: &SiteConfig) -> &str {
        match self {
            Outcome::Sent => &config.success_label,
            Outcome::Failed => &config.error_label,
        }
    }

    pub fn background(self, config: &SiteConfig) -> &str {
        match self {
            Outcome::Sent => &config.success_background,
            Outcome::Failed => &config.error_background,
        }
    }
}

/// `application/x-www-form-urlencoded` body: `+` for spaces, `&` between pairs.
pub fn encode_form<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k.as_ref()), encode_component(v.as_ref())))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(raw: &str) -> String {
    // A literal '%' is itself escaped, so every "%XX" here came from the
    // encoder. URLSearchParams keeps '*' and escapes '~'.
    urlencoding::encode(raw)
        .replace("%20", "+")
        .replace("%2A", "*")
        .replace('~', "%7E")
}

/// The submit button while a message is in flight. Remembers the label it had
/// before the first submit so it can be put back.
struct FeedbackButton {
    button: HtmlButtonElement,
    original_label: String,
}

impl FeedbackButton {
    fn begin(button: HtmlButtonElement, config: &SiteConfig) -> Self {
        let original_label = button.text_content().unwrap_or_default();
        button.set_disabled(true);
        button.set_text_content(Some(&config.sending_label));
        Self {
            button,
            original_label,
        }
    }

    fn settle(self, outcome: Outcome, config: &SiteConfig) {
        self.button.set_text_content(Some(outcome.label(config)));
        if let Err(e) = dom::set_styles(&self.button, &[("background", outcome.background(config))]) {
            warn!("feedback colour: {}", e);
        }
        Timeout::new(config.feedback_reset_ms, move || self.restore()).forget();
    }

    fn restore(self) {
        self.button.set_disabled(false);
        self.button.set_text_content(Some(&self.original_label));
        if let Err(e) = dom::remove_style(&self.button, "background") {
            warn!("feedback reset: {}", e);
        }
    }
}

fn form_pairs(form: &HtmlFormElement) -> Result<Vec<(String, String)>> {
    let data = FormData::new_with_form(form)?;
    let entries = js_sys::try_iter(&data)?
        .ok_or_else(|| SiteError::Js("FormData is not iterable".to_string()))?;

    let mut pairs = Vec::new();
    for entry in entries {
        let entry: Array = entry?.unchecked_into();
        let name = entry.get(0).as_string().unwrap_or_default();
        let value = entry.get(1);
        let value = match value.dyn_ref::<File>() {
            Some(file) => file.name(),
            None => value.as_string().unwrap_or_default(),
        };
        pairs.push((name, value));
    }
    Ok(pairs)
}

/// Where the form posts: the configured endpoint, otherwise the current page
/// path.
fn endpoint(window: &Window, config: &SiteConfig) -> String {
    if let Some(url) = config.form_endpoint.as_ref().filter(|u| !u.is_empty()) {
        return url.clone();
    }
    window
        .location()
        .pathname()
        .ok()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| "/".to_string())
}

async fn post_form(url: &str, body: String) -> Result<()> {
    let response = Request::post(url)
        .header("Content-Type", FORM_CONTENT_TYPE)
        .body(JsValue::from_str(&body))
        .send()
        .await?;

    if response.ok() {
        Ok(())
    } else {
        Err(SiteError::Status(response.status()))
    }
}

fn submit_button(form: &HtmlFormElement, config: &SiteConfig) -> Option<HtmlButtonElement> {
    form.query_selector(&config.submit_button_selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
}

/// Runs inside the submit event: the button is locked before the listener
/// returns, only the request and the feedback wait for the network.
fn on_submit(form: &HtmlFormElement, window: &Window, config: &Rc<SiteConfig>) {
    let Some(button) = submit_button(form, config) else {
        warn!("contact form has no submit button, not sending");
        return;
    };
    if button.disabled() {
        debug!("submission already in flight");
        return;
    }

    let feedback = FeedbackButton::begin(button, config);
    let url = endpoint(window, config);
    let pairs = form_pairs(form);
    wasm_bindgen_futures::spawn_local(send(form.clone(), url, pairs, feedback, Rc::clone(config)));
}

async fn send(
    form: HtmlFormElement,
    url: String,
    pairs: Result<Vec<(String, String)>>,
    feedback: FeedbackButton,
    config: Rc<SiteConfig>,
) {
    let result = match pairs {
        Ok(pairs) => {
            debug!("posting {} fields to {}", pairs.len(), url);
            post_form(&url, encode_form(&pairs)).await
        }
        Err(e) => Err(e),
    };

    let outcome = match result {
        Ok(()) => {
            info!("contact message sent");
            form.reset();
            Outcome::Sent
        }
        Err(e) => {
            warn!("contact form submission failed: {}", e);
            Outcome::Failed
        }
    };
    feedback.settle(outcome, &config);
}

pub fn install(window: &Window, document: &Document, config: &Rc<SiteConfig>) -> Result<()> {
    let form: HtmlFormElement = dom::require_id(document, &config.contact_form_id)?
        .dyn_into()
        .map_err(|_| SiteError::MissingElement(format!("form#{}", config.contact_form_id)))?;

    let window = window.clone();
    let config = Rc::clone(config);
    let submit_form = form.clone();
    dom::listen(&form, "submit", move |event: Event| {
        event.prevent_default();
        on_submit(&submit_form, &window, &config);
    })?;

    info!("contact form wired");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_pairs_like_a_browser_form() {
        let body = encode_form(&[
            ("name", "Ada Lovelace"),
            ("email", "ada@example.com"),
            ("message", "Hi & welcome, 100% sure?"),
        ]);
        assert_eq!(
            body,
            "name=Ada+Lovelace&email=ada%40example.com&message=Hi+%26+welcome%2C+100%25+sure%3F"
        );
    }

    #[test]
    fn star_and_tilde_match_url_search_params() {
        assert_eq!(encode_form(&[("a", "*~-._")]), "a=*%7E-._");
    }

    #[test]
    fn keeps_literal_percent_twenty() {
        assert_eq!(encode_form(&[("q", "%20")]), "q=%2520");
    }

    #[test]
    fn encodes_unicode_and_empty_values() {
        assert_eq!(encode_form(&[("note", "✓"), ("empty", "")]), "note=%E2%9C%93&empty=");
        assert_eq!(encode_form::<&str, &str>(&[]), "");
    }

    #[test]
    fn repeated_names_are_kept_in_order() {
        let pairs = vec![
            ("topic".to_string(), "a".to_string()),
            ("topic".to_string(), "b".to_string()),
        ];
        assert_eq!(encode_form(&pairs), "topic=a&topic=b");
    }

    #[test]
    fn outcome_feedback() {
        let config = SiteConfig::default();
        assert_eq!(Outcome::Sent.label(&config), "Message sent! ✓");
        assert_eq!(Outcome::Sent.background(&config), "#10B981");
        assert_eq!(Outcome::Failed.label(&config), "Error. Please try again.");
        assert_eq!(Outcome::Failed.background(&config), "#EF4444");
    }
}

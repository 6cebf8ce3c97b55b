use wasm_bindgen::JsValue;

use crate::model::normalize_ticker;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_INITIAL_TICKER: &str = "MSFT";

const META_API_BASE: &str = "options-api-base";
const META_INITIAL_TICKER: &str = "options-initial-ticker";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    /// Ticker fetched on mount. `None` leaves the table on placeholders
    /// until the user searches.
    pub initial_ticker: Option<String>,
}

impl AppConfig {
    /// Page `<meta>` tags win over the values baked in at build time
    /// (`OPTIONS_API_BASE_URL`, `OPTIONS_INITIAL_TICKER`).
    pub fn load() -> Self {
        let base = meta_content(META_API_BASE)
            .ok()
            .flatten()
            .or_else(|| option_env!("OPTIONS_API_BASE_URL").map(String::from));
        let initial = meta_content(META_INITIAL_TICKER)
            .ok()
            .flatten()
            .or_else(|| option_env!("OPTIONS_INITIAL_TICKER").map(String::from));
        Self::resolve(base.as_deref(), initial.as_deref())
    }

    pub fn resolve(base: Option<&str>, initial_ticker: Option<&str>) -> Self {
        let api_base_url = base
            .map(|b| b.trim().trim_end_matches('/'))
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .to_string();
        // An explicitly empty value disables the mount-time fetch.
        let initial_ticker = match initial_ticker {
            Some(t) => normalize_ticker(t),
            None => Some(DEFAULT_INITIAL_TICKER.to_string()),
        };
        Self { api_base_url, initial_ticker }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/options-strategy-pnl", self.api_base_url)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

fn meta_content(name: &str) -> Result<Option<String>, JsValue> {
    let selector = format!("meta[name=\"{name}\"]");
    let element = gloo::utils::document().query_selector(&selector)?;
    Ok(element.and_then(|e| e.get_attribute("content")))
}

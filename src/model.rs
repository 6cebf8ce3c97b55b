use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Underlying quote and the strike/expiry the P/L table was evaluated at.
#[derive(Clone, Debug, PartialEq)]
pub struct StockSummary {
    pub ticker: String,
    pub current_price: f64,
    pub atm_strike: f64,
    pub expiry: String,
}

impl Default for StockSummary {
    fn default() -> Self {
        Self {
            ticker: "MSFT".into(),
            current_price: 438.17,
            atm_strike: 437.5,
            expiry: "2025-05-09".into(),
        }
    }
}

/// One row of the server's P/L table: the hypothetical expiry price plus a
/// value per strategy id, kept as the server sent it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StrategyRow {
    #[serde(rename = "Price at Expiry", deserialize_with = "de_dollar_price")]
    pub price_at_expiry: f64,
    #[serde(flatten)]
    pub values: HashMap<String, Value>,
}

/// Summary and rows from a single successful lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub summary: StockSummary,
    pub rows: Vec<StrategyRow>,
}

/// Trim and upper-case user input; `None` when nothing is left to look up.
pub fn normalize_ticker(input: &str) -> Option<String> {
    let t = input.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_uppercase())
    }
}

/// Parses "$437.50" / "-$5" style prices. Thousands separators are tolerated.
pub fn parse_dollar_price(s: &str) -> Option<f64> {
    let s = s.trim().replace(['$', ','], "");
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn de_dollar_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(n) => Ok(n),
        RawPrice::Text(s) => parse_dollar_price(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid price at expiry: {s:?}"))),
    }
}

//! Client for the options-strategy P/L service.

use gloo::console;
use gloo::net::http::Request;
use serde::Deserialize;
use thiserror::Error;

use crate::config::AppConfig;
use crate::model::{Snapshot, StockSummary, StrategyRow};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Request never produced a response (DNS, CORS, offline, ...)
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server returned HTTP {0}")]
    Status(u16),

    /// Body was not the expected JSON shape
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// What the page shows; every failure reads the same to the user.
    pub fn user_message(ticker: &str) -> String {
        format!("Could not fetch data for ticker: {ticker}")
    }
}

#[derive(Debug, Deserialize)]
struct PnlResponse {
    ticker: String,
    current_price: f64,
    atm_strike_used: f64,
    expiry: String,
    strategies: Vec<StrategyRow>,
}

impl From<PnlResponse> for Snapshot {
    fn from(r: PnlResponse) -> Self {
        Snapshot {
            summary: StockSummary {
                ticker: r.ticker,
                current_price: r.current_price,
                atm_strike: r.atm_strike_used,
                expiry: r.expiry,
            },
            rows: r.strategies,
        }
    }
}

/// Decodes a response body into a snapshot.
pub fn decode(body: &str) -> Result<Snapshot, FetchError> {
    serde_json::from_str::<PnlResponse>(body)
        .map(Snapshot::from)
        .map_err(|e| FetchError::Malformed(e.to_string()))
}

/// Fetches the P/L table for an already-normalized ticker.
pub async fn fetch(config: &AppConfig, ticker: &str) -> Result<Snapshot, FetchError> {
    let url = config.endpoint();
    console::log!(format!("GET {url}?ticker={ticker}"));

    let resp = Request::get(&url)
        .query([("ticker", ticker)])
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;
    if !resp.ok() {
        return Err(FetchError::Status(resp.status()));
    }
    let body = resp
        .text()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;
    let snapshot = decode(&body)?;

    console::log!(format!(
        "{}: {} rows, spot {}, strike {}",
        snapshot.summary.ticker,
        snapshot.rows.len(),
        snapshot.summary.current_price,
        snapshot.summary.atm_strike
    ));
    Ok(snapshot)
}

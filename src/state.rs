use std::rc::Rc;

use yew::Reducible;

use crate::api::FetchError;
use crate::model::{normalize_ticker, Snapshot, StockSummary, StrategyRow};

/// Token tying a completion back to the submit that issued it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestId(u64);

/// Issues increasing request ids; lives outside the reducer so a submit
/// knows its id before the request is spawned.
#[derive(Debug, Default)]
pub struct RequestSeq {
    last: u64,
}

impl RequestSeq {
    pub fn issue(&mut self) -> RequestId {
        self.last += 1;
        RequestId(self.last)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FetchStatus {
    Idle,
    Loading { request: RequestId, ticker: String },
    Loaded { rows: Rc<Vec<StrategyRow>> },
    Failed { ticker: String, reason: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum SummaryEdit {
    CurrentPrice(f64),
    AtmStrike(f64),
    Expiry(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    InputChanged(String),
    SubmitRequested { request: RequestId, ticker: String },
    FetchSucceeded { request: RequestId, snapshot: Snapshot },
    FetchFailed { request: RequestId, error: FetchError },
    SummaryEdited(SummaryEdit),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageState {
    pub input: String,
    pub summary: StockSummary,
    pub status: FetchStatus,
    pub has_searched: bool,
    latest: Option<RequestId>,
}

impl Default for PageState {
    fn default() -> Self {
        let summary = StockSummary::default();
        Self {
            input: summary.ticker.clone(),
            summary,
            status: FetchStatus::Idle,
            has_searched: false,
            latest: None,
        }
    }
}

impl PageState {
    pub fn apply(mut self, event: PageEvent) -> Self {
        match event {
            PageEvent::InputChanged(text) => {
                if text != self.input {
                    self.input = text;
                    // Rows belong to the old input; drop them.
                    if matches!(self.status, FetchStatus::Loaded { .. }) {
                        self.status = FetchStatus::Idle;
                    }
                }
            }
            PageEvent::SubmitRequested { request, ticker } => {
                self.latest = Some(request);
                self.status = FetchStatus::Loading { request, ticker };
            }
            PageEvent::FetchSucceeded { request, snapshot } => {
                let Some(ticker) = self.pending_ticker(request) else {
                    return self;
                };
                self.has_searched = true;
                if normalize_ticker(&self.input).as_deref() == Some(ticker.as_str()) {
                    self.summary = snapshot.summary;
                    self.status = FetchStatus::Loaded { rows: Rc::new(snapshot.rows) };
                } else {
                    // Input moved on while the request was in flight.
                    self.status = FetchStatus::Idle;
                }
            }
            PageEvent::FetchFailed { request, error } => {
                let Some(ticker) = self.pending_ticker(request) else {
                    return self;
                };
                self.has_searched = true;
                if normalize_ticker(&self.input).as_deref() == Some(ticker.as_str()) {
                    self.status = FetchStatus::Failed { ticker, reason: error.to_string() };
                } else {
                    self.status = FetchStatus::Idle;
                }
            }
            PageEvent::SummaryEdited(edit) => match edit {
                SummaryEdit::CurrentPrice(v) => self.summary.current_price = v,
                SummaryEdit::AtmStrike(v) => self.summary.atm_strike = v,
                SummaryEdit::Expiry(v) => self.summary.expiry = v,
            },
        }
        self
    }

    /// Ticker of the in-flight request if `request` is the latest one issued.
    fn pending_ticker(&self, request: RequestId) -> Option<String> {
        match &self.status {
            FetchStatus::Loading { request: r, ticker } if *r == request && self.latest == Some(request) => {
                Some(ticker.clone())
            }
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, FetchStatus::Loading { .. })
    }

    /// Server rows for the ticker currently in the input, if any.
    pub fn rows(&self) -> &[StrategyRow] {
        match &self.status {
            FetchStatus::Loaded { rows } => rows.as_slice(),
            _ => &[],
        }
    }

    pub fn has_data_for_input(&self) -> bool {
        !self.rows().is_empty()
    }

    /// Technical cause of the last failure.
    pub fn failure_reason(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Failed { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match &self.status {
            FetchStatus::Failed { ticker, .. } => Some(FetchError::user_message(ticker)),
            _ => None,
        }
    }
}

impl Reducible for PageState {
    type Action = PageEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new((*self).clone().apply(action))
    }
}

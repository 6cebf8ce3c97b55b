use gloo::console;
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew::TargetCast;

use crate::api;
use crate::catalog::Strategy;
use crate::cells;
use crate::config::AppConfig;
use crate::model::normalize_ticker;
use crate::prices;
use crate::state::{PageEvent, PageState, RequestSeq, SummaryEdit};

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| AppConfig::load());
    let state = use_reducer(PageState::default);
    let seq = use_mut_ref(RequestSeq::default);
    let settings_open = use_state(|| false);

    // Lookup: tag the request, mark loading, then resolve off the event loop.
    let submit = {
        let state = state.clone();
        let seq = seq.clone();
        let config = config.clone();
        Callback::from(move |raw: String| {
            let Some(ticker) = normalize_ticker(&raw) else {
                return;
            };
            let request = seq.borrow_mut().issue();
            state.dispatch(PageEvent::SubmitRequested { request, ticker: ticker.clone() });

            let state = state.clone();
            let config = config.clone();
            spawn_local(async move {
                let event = match api::fetch(&config, &ticker).await {
                    Ok(snapshot) => PageEvent::FetchSucceeded { request, snapshot },
                    Err(error) => {
                        console::error!(format!("{ticker}: {error}"));
                        PageEvent::FetchFailed { request, error }
                    }
                };
                state.dispatch(event);
            });
        })
    };

    {
        let state = state.clone();
        let submit = submit.clone();
        let initial = config.initial_ticker.clone();
        use_effect_with((), move |_| {
            if let Some(ticker) = initial {
                state.dispatch(PageEvent::InputChanged(ticker.clone()));
                submit.emit(ticker);
            }
            || ()
        });
    }

    // Handlers
    let on_ticker_input = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            state.dispatch(PageEvent::InputChanged(target.value()));
        })
    };
    let on_ticker_keydown = {
        let submit = submit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                let target: HtmlInputElement = e.target_unchecked_into();
                submit.emit(target.value());
            }
        })
    };
    let on_toggle_settings = {
        let settings_open = settings_open.clone();
        Callback::from(move |_: MouseEvent| settings_open.set(!*settings_open))
    };
    let on_price_edit = |make: fn(f64) -> SummaryEdit| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            // Half-typed numbers keep the previous value.
            if let Some(v) = target.value().trim().parse::<f64>().ok().filter(|v| v.is_finite()) {
                state.dispatch(PageEvent::SummaryEdited(make(v)));
            }
        })
    };
    let on_current_price = on_price_edit(SummaryEdit::CurrentPrice);
    let on_atm_strike = on_price_edit(SummaryEdit::AtmStrike);
    let on_expiry = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            state.dispatch(PageEvent::SummaryEdited(SummaryEdit::Expiry(target.value())));
        })
    };

    // Derived
    let summary = &state.summary;
    let rows = state.rows();
    let points = prices::synthesize(summary, rows);
    let loading = state.is_loading();
    let live = state.has_data_for_input();
    let error = state.error_message();

    html! {
        <div class="container">
            <header>
                <h1>{"Options Strategies"}</h1>
                <input
                    type="text"
                    placeholder={"Search ticker..."}
                    value={state.input.clone()}
                    oninput={on_ticker_input}
                    onkeydown={on_ticker_keydown}
                    disabled={loading}
                    aria-label="Ticker symbol" />
            </header>

            <div class="card">
                <h2>
                    { if let Some(msg) = &error {
                        html!{ <span class="danger" title={state.failure_reason().unwrap_or_default().to_string()}>{ msg.clone() }</span> }
                    } else {
                        html!{ <span>{format!("{} — Current Price: ${}", summary.ticker, summary.current_price)}</span> }
                    }}
                    <button onclick={on_toggle_settings} aria-expanded={(*settings_open).to_string()}>
                        { if *settings_open { "Settings ▴" } else { "Settings ▾" } }
                    </button>
                </h2>
                { if error.is_none() {
                    html!{
                        <div class="muted">
                            {format!("ATM Strike: {}", summary.atm_strike)}
                            {" | "}
                            {format!("Expiry: {}", summary.expiry)}
                        </div>
                    }
                } else { html!{} }}

                { if *settings_open {
                    html!{
                        <>
                            <div class="section-divider"></div>
                            <div class="row three">
                                <div class="input-group">
                                    <label>{"Current Price"}</label>
                                    <input
                                        type="number"
                                        step="0.01"
                                        value={summary.current_price.to_string()}
                                        oninput={on_current_price}
                                        aria-label="Current price" />
                                </div>
                                <div class="input-group">
                                    <label>{"ATM Strike"}</label>
                                    <input
                                        type="number"
                                        step="0.5"
                                        value={summary.atm_strike.to_string()}
                                        oninput={on_atm_strike}
                                        aria-label="ATM strike" />
                                </div>
                                <div class="input-group">
                                    <label>{"Expiry Date"}</label>
                                    <input
                                        type="date"
                                        value={summary.expiry.clone()}
                                        oninput={on_expiry}
                                        aria-label="Expiry date" />
                                </div>
                            </div>
                        </>
                    }
                } else { html!{} }}
            </div>

            <div class="card table-card">
                { if loading {
                    html!{ <div class="hint placeholder">{"Loading..."}</div> }
                } else {
                    html!{
                        <>
                            { if !live {
                                let hint = if state.has_searched {
                                    "No data for this ticker yet. Press Enter to look it up."
                                } else {
                                    "Type a ticker and press Enter to load strategy P/L."
                                };
                                html!{ <div class="hint">{ hint }</div> }
                            } else { html!{} }}
                            <table>
                                <thead>
                                    <tr>
                                        <th class="sticky">{"Price at Expiry"}</th>
                                        { for Strategy::all().iter().map(|(_, name)| html!{ <th>{ *name }</th> }) }
                                    </tr>
                                </thead>
                                <tbody>
                                    { for points.iter().enumerate().map(|(i, p)| {
                                        let strike = prices::is_strike(p.price, summary.atm_strike);
                                        html!{
                                            <tr class={classes!(if i % 2 == 0 { "even" } else { "odd" }, strike.then_some("strike"))}>
                                                <td class="sticky">
                                                    {format!("${}", p.price)}
                                                    { if strike { " (Strike)" } else { "" } }
                                                </td>
                                                { for Strategy::all().iter().map(|(s, _)| {
                                                    let v = cells::value_for(rows, *s, i);
                                                    html!{
                                                        <td><span class={cells::tone(&v).css_class()}>{ cells::format(&v) }</span></td>
                                                    }
                                                }) }
                                            </tr>
                                        }
                                    }) }
                                </tbody>
                            </table>
                        </>
                    }
                }}
            </div>

            <footer>
                { if live {
                    html!{ <span class="status-indicator success">{"Live data"}</span> }
                } else {
                    html!{ <span class="status-indicator warning">{"Placeholder grid"}</span> }
                }}
                {" P/L values are computed by the strategy service at "}
                { config.api_base_url.clone() }
            </footer>
        </div>
    }
}

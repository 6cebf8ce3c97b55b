use serde_json::Value;

use crate::catalog::Strategy;
use crate::model::StrategyRow;

/// A P/L table cell: either a bare number or a string the server already
/// formatted (e.g. "+$12.50").
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Gain,
    Loss,
    Neutral,
}

impl Tone {
    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Gain => "success",
            Tone::Loss => "danger",
            Tone::Neutral => "",
        }
    }
}

/// Looks up a strategy's value in a server row. Missing rows, missing keys
/// and falsy JSON values all resolve to zero.
pub fn value_for(rows: &[StrategyRow], strategy: Strategy, row_index: usize) -> CellValue {
    let Some(raw) = rows.get(row_index).and_then(|r| r.values.get(strategy.id())) else {
        return CellValue::Number(0.0);
    };
    match raw {
        Value::String(s) if !s.is_empty() => CellValue::Text(s.clone()),
        Value::Number(n) => CellValue::Number(n.as_f64().unwrap_or(0.0)),
        // Truthy but not an amount; shown blank rather than as money.
        Value::Bool(true) => CellValue::Text(String::new()),
        _ => CellValue::Number(0.0),
    }
}

pub fn format(value: &CellValue) -> String {
    match value {
        CellValue::Text(s) => s.clone(),
        CellValue::Number(n) if *n == 0.0 || n.is_nan() => "$0".into(),
        CellValue::Number(n) if *n > 0.0 => format!("+${}", n.abs()),
        CellValue::Number(n) => format!("-${}", n.abs()),
    }
}

/// Colouring follows the server's sign; bare numbers stay neutral.
pub fn tone(value: &CellValue) -> Tone {
    match value {
        CellValue::Text(s) if s.starts_with('+') => Tone::Gain,
        CellValue::Text(s) if s.starts_with('-') => Tone::Loss,
        _ => Tone::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<StrategyRow> {
        serde_json::from_value(json!([
            {
                "Price at Expiry": "$430",
                "LongCall": "-$8.20",
                "LongPut": "+$4.10",
                "Straddle": 0,
                "Strangle": null,
                "IronCondor": "",
                "ButterflySpread": true
            },
            {
                "Price at Expiry": "$440",
                "LongCall": 25,
                "LongPut": -3.5
            }
        ]))
        .unwrap()
    }

    #[test]
    fn formats_numbers_with_sign_and_currency() {
        assert_eq!(format(&CellValue::Number(0.0)), "$0");
        assert_eq!(format(&CellValue::Number(25.0)), "+$25");
        assert_eq!(format(&CellValue::Number(-25.0)), "-$25");
        assert_eq!(format(&CellValue::Number(12.5)), "+$12.5");
    }

    #[test]
    fn formatted_strings_pass_through() {
        assert_eq!(format(&CellValue::Text("+$10".into())), "+$10");
        assert_eq!(format(&CellValue::Text("-$3.25".into())), "-$3.25");
    }

    #[test]
    fn resolves_values_from_rows() {
        let rows = rows();
        assert_eq!(value_for(&rows, Strategy::LongCall, 0), CellValue::Text("-$8.20".into()));
        assert_eq!(value_for(&rows, Strategy::LongCall, 1), CellValue::Number(25.0));
        assert_eq!(value_for(&rows, Strategy::LongPut, 1), CellValue::Number(-3.5));
    }

    #[test]
    fn missing_or_falsy_values_are_zero() {
        let rows = rows();
        for strategy in [Strategy::Straddle, Strategy::Strangle, Strategy::IronCondor, Strategy::CoveredCall] {
            assert_eq!(value_for(&rows, strategy, 0), CellValue::Number(0.0), "{strategy:?}");
        }
        assert_eq!(value_for(&rows, Strategy::LongCall, 7), CellValue::Number(0.0));
        assert_eq!(value_for(&[], Strategy::LongCall, 0), CellValue::Number(0.0));
        assert_eq!(format(&value_for(&[], Strategy::LongCall, 0)), "$0");
    }

    #[test]
    fn boolean_cell_is_not_a_dollar_amount() {
        let v = value_for(&rows(), Strategy::ButterflySpread, 0);
        assert_eq!(v, CellValue::Text(String::new()));
        assert_eq!(format(&v), "");
        assert_eq!(tone(&v), Tone::Neutral);
    }

    #[test]
    fn tone_follows_string_sign() {
        assert_eq!(tone(&CellValue::Text("+$1".into())), Tone::Gain);
        assert_eq!(tone(&CellValue::Text("-$1".into())), Tone::Loss);
        assert_eq!(tone(&CellValue::Text("$0".into())), Tone::Neutral);
        assert_eq!(tone(&CellValue::Number(-4.0)), Tone::Neutral);
        assert_eq!(Tone::Gain.css_class(), "success");
    }
}

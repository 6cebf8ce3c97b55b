use crate::model::{StockSummary, StrategyRow};

/// Number of rows in the fallback price grid.
pub const GRID_POINTS: usize = 11;
/// Fallback grid spacing as a fraction of the current price.
const STEP_FRACTION: f64 = 0.02;
/// Grid prices are rounded to cents, so a narrower step would repeat rows.
const MIN_STEP: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PricePoint {
    pub price: f64,
}

/// Row keys for the P/L table.
///
/// With server rows the expiry prices are taken as-is, in server order.
/// Without them an 11-point grid is built around the current price in 2%
/// steps (never less than a cent), always containing the ATM strike
/// exactly once.
pub fn synthesize(summary: &StockSummary, rows: &[StrategyRow]) -> Vec<PricePoint> {
    if !rows.is_empty() {
        return rows
            .iter()
            .map(|r| PricePoint { price: r.price_at_expiry })
            .collect();
    }
    fallback_grid(summary.current_price, summary.atm_strike)
}

fn fallback_grid(current: f64, strike: f64) -> Vec<PricePoint> {
    // Below a cent per step the grid walks whole cents from the rounded
    // price, otherwise half-cent candidates could round onto each other.
    let (centre, step) = match current * STEP_FRACTION {
        s if s < MIN_STEP => (round2(current), MIN_STEP),
        s => (current, s),
    };
    let half = GRID_POINTS as i32 / 2;
    let mut points: Vec<PricePoint> = (-half..=half)
        .map(|i| PricePoint { price: round2(centre + i as f64 * step) })
        .collect();

    // Snap the nearest candidate onto the strike so the two never sit in
    // adjacent rows a few cents apart.
    let nearest = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, (p.price - strike).abs()))
        .min_by(|a, b| a.1.total_cmp(&b.1));
    match nearest {
        Some((i, dist)) if dist < step / 2.0 => {
            points[i].price = strike;
        }
        _ => {
            points.push(PricePoint { price: strike });
            points.sort_by(|a, b| a.price.total_cmp(&b.price));
            if points.len() > GRID_POINTS {
                if strike < current {
                    points.pop();
                } else {
                    points.remove(0);
                }
            }
        }
    }
    points
}

/// Whether a row's price is the ATM strike (to the cent).
pub fn is_strike(price: f64, atm_strike: f64) -> bool {
    (price - atm_strike).abs() < 0.01
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(current: f64, strike: f64) -> StockSummary {
        StockSummary {
            ticker: "TEST".into(),
            current_price: current,
            atm_strike: strike,
            expiry: "2025-05-09".into(),
        }
    }

    fn prices(points: &[PricePoint]) -> Vec<f64> {
        points.iter().map(|p| p.price).collect()
    }

    fn assert_grid_invariants(current: f64, strike: f64) {
        let points = synthesize(&summary(current, strike), &[]);
        assert_eq!(points.len(), GRID_POINTS, "len for {current}/{strike}");
        assert!(
            points.windows(2).all(|w| w[0].price <= w[1].price),
            "unsorted for {current}/{strike}: {:?}",
            prices(&points)
        );
        let hits = points.iter().filter(|p| p.price == strike).count();
        assert_eq!(hits, 1, "strike count for {current}/{strike}: {:?}", prices(&points));
    }

    #[test]
    fn default_quote_snaps_strike_into_grid() {
        let points = synthesize(&summary(438.17, 437.5), &[]);
        assert_eq!(points.len(), 11);
        assert!(points.iter().any(|p| p.price == 437.5));
        assert!(!points.iter().any(|p| p.price == 438.17));
        assert_eq!(points[0].price, round2(438.17 - 5.0 * 438.17 * 0.02));
    }

    #[test]
    fn grid_invariants_hold_across_quotes() {
        let quotes = [
            (438.17, 437.5),
            (100.0, 100.0),
            (100.0, 50.0),
            (100.0, 250.0),
            (100.0, 101.0),
            (100.0, 103.0),
            (100.0, 97.0),
            (12.34, 0.0),
            (1.0, 1.01),
            (2500.0, 2400.0),
            (57.9, 60.0),
        ];
        for (current, strike) in quotes {
            assert_grid_invariants(current, strike);
        }
    }

    #[test]
    fn sub_dollar_quotes_use_one_cent_steps() {
        let points = synthesize(&summary(0.33, 0.32), &[]);
        assert_eq!(
            prices(&points),
            vec![0.28, 0.29, 0.3, 0.31, 0.32, 0.33, 0.34, 0.35, 0.36, 0.37, 0.38]
        );
        for (current, strike) in [(0.03, 0.03), (0.07, 0.08), (0.06, 0.06), (0.33, 0.32), (0.2, 0.9), (0.125, 0.08), (0.005, 0.0)] {
            assert_grid_invariants(current, strike);
        }
    }

    #[test]
    fn grid_invariants_hold_for_cent_quotes() {
        for cents in 1..=300_i64 {
            for offset in -40..=40_i64 {
                let current = cents as f64 / 100.0;
                let strike = (cents + offset) as f64 / 100.0;
                assert_grid_invariants(current, strike);
            }
        }
    }

    #[test]
    fn far_strike_below_drops_highest_point() {
        let points = synthesize(&summary(100.0, 50.0), &[]);
        assert_eq!(points[0].price, 50.0);
        assert_eq!(points[1].price, 90.0);
        assert_eq!(points[10].price, 108.0);
    }

    #[test]
    fn far_strike_above_drops_lowest_point() {
        let points = synthesize(&summary(100.0, 250.0), &[]);
        assert_eq!(points[0].price, 92.0);
        assert_eq!(points[9].price, 110.0);
        assert_eq!(points[10].price, 250.0);
    }

    #[test]
    fn strike_on_candidate_needs_no_trim() {
        // 102 is exactly the +1 step candidate.
        let points = synthesize(&summary(100.0, 102.0), &[]);
        assert_eq!(
            prices(&points),
            vec![90.0, 92.0, 94.0, 96.0, 98.0, 100.0, 102.0, 104.0, 106.0, 108.0, 110.0]
        );
    }

    #[test]
    fn server_rows_define_the_points() {
        let rows: Vec<StrategyRow> = serde_json::from_value(json!([
            { "Price at Expiry": "$430" },
            { "Price at Expiry": "$440" }
        ]))
        .unwrap();
        let points = synthesize(&summary(438.17, 437.5), &rows);
        assert_eq!(points, vec![PricePoint { price: 430.0 }, PricePoint { price: 440.0 }]);
    }

    #[test]
    fn server_row_order_is_kept() {
        let rows: Vec<StrategyRow> = serde_json::from_value(json!([
            { "Price at Expiry": "$450" },
            { "Price at Expiry": "$420" },
            { "Price at Expiry": "$435" }
        ]))
        .unwrap();
        let points = synthesize(&summary(1.0, 1.0), &rows);
        assert_eq!(prices(&points), vec![450.0, 420.0, 435.0]);
    }

    #[test]
    fn synthesize_is_deterministic() {
        let s = summary(438.17, 437.5);
        assert_eq!(synthesize(&s, &[]), synthesize(&s, &[]));
        let s = summary(100.0, 250.0);
        assert_eq!(synthesize(&s, &[]), synthesize(&s, &[]));
    }

    #[test]
    fn strike_detection_is_cent_precise() {
        assert!(is_strike(437.5, 437.5));
        assert!(is_strike(437.505, 437.5));
        assert!(!is_strike(437.52, 437.5));
    }
}

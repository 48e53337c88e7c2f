//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Window arithmetic — the trailing window spans exactly the lookback
//! 2. Normalizer ordering — output dates are strictly increasing
//! 3. Normalizer idempotence — re-normalizing canonical records is a no-op
//! 4. Adjusted close — always equal to close

use chrono::NaiveDate;
use histfeed_core::{normalize, FetchWindow, RawBar};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    // Any day in 2000-01-01..2030-12-31 via day offsets from the epoch date.
    (0i64..11_322).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + chrono::Duration::days(offset)
    })
}

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..5000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_bar() -> impl Strategy<Value = RawBar> {
    (arb_date(), arb_price(), 0.0..50.0_f64, 0u64..1_000_000_000).prop_map(
        |(date, close, spread, volume)| RawBar {
            date,
            open: close - spread / 2.0,
            high: close + spread,
            low: (close - spread).max(0.01),
            close,
            volume,
        },
    )
}

// ── 1. Window arithmetic ─────────────────────────────────────────────

proptest! {
    /// For every valid lookback, `end - start` is exactly that many days.
    #[test]
    fn trailing_window_spans_lookback_exactly(
        end in arb_date(),
        lookback in 1u32..5_000,
    ) {
        let window = FetchWindow::trailing(end, lookback).unwrap();
        prop_assert_eq!(window.days(), i64::from(lookback));
        prop_assert_eq!(window.end, end);
        prop_assert!(window.start < window.end);
    }
}

// ── 2–4. Normalizer properties ───────────────────────────────────────

proptest! {
    /// Output dates are strictly increasing regardless of input order.
    #[test]
    fn normalized_dates_strictly_increase(bars in prop::collection::vec(arb_bar(), 0..50)) {
        let records = normalize(bars).unwrap();
        for pair in records.windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }
    }

    /// Normalizing an already-normalized dataset (mapped back to the raw
    /// shape) yields the same records.
    #[test]
    fn normalize_is_idempotent(bars in prop::collection::vec(arb_bar(), 0..50)) {
        let once = normalize(bars).unwrap();

        let raw_again: Vec<RawBar> = once
            .iter()
            .map(|r| RawBar {
                date: r.date,
                open: r.open,
                high: r.high,
                low: r.low,
                close: r.close,
                volume: r.volume,
            })
            .collect();

        let twice = normalize(raw_again).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// The adjusted close mirrors the close on every record.
    #[test]
    fn adj_close_always_equals_close(bars in prop::collection::vec(arb_bar(), 0..50)) {
        let records = normalize(bars).unwrap();
        for r in &records {
            prop_assert_eq!(r.adj_close, r.close);
        }
    }
}

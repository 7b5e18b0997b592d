//! Signal-row cleaning: dedup, invalid-quote and coercion drops.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;
use trigger_trade_core::{RawSignal, SignalKind, SignalRow};

/// Cleans a batch of feed rows into typed signals.
///
/// - Duplicate (date, time, symbol) identities collapse to the **last**
///   occurrence in the batch.
/// - Rows with a zero bid or ask are dropped (invalid quote).
/// - Rows where any numeric field fails coercion are dropped.
/// - Rows whose signal label is not a known trigger are dropped.
///
/// All drops are row-level input defects: logged at debug, never escalated.
/// Pure function of the input batch.
#[must_use]
pub fn normalize(rows: &[SignalRow]) -> Vec<RawSignal> {
    let mut index: HashMap<(String, String, String), usize> = HashMap::new();
    let mut cleaned: Vec<RawSignal> = Vec::new();

    for row in rows {
        let Some(signal) = coerce(row) else {
            continue;
        };
        if signal.bid.is_zero() || signal.ask.is_zero() {
            debug!(symbol = %signal.symbol, "zero quote, dropping row");
            continue;
        }

        let key = (
            signal.date.clone(),
            signal.time.clone(),
            signal.symbol.clone(),
        );
        match index.get(&key) {
            // Later rows override earlier ones for the same identity.
            Some(&i) => cleaned[i] = signal,
            None => {
                index.insert(key, cleaned.len());
                cleaned.push(signal);
            }
        }
    }

    cleaned
}

fn coerce(row: &SignalRow) -> Option<RawSignal> {
    let Some(kind) = SignalKind::parse(&row.signal) else {
        debug!(symbol = %row.symbol, signal = %row.signal, "unknown signal label, dropping row");
        return None;
    };

    let parse = |field: &str| Decimal::from_str(field.trim()).ok();
    let (Some(bid), Some(ask), Some(last), Some(eq_price), Some(eq_level), Some(bias)) = (
        parse(&row.bid),
        parse(&row.ask),
        parse(&row.last),
        parse(&row.eq_price),
        parse(&row.eq_level),
        parse(&row.bias),
    ) else {
        debug!(symbol = %row.symbol, "numeric coercion failed, dropping row");
        return None;
    };

    Some(RawSignal {
        date: row.date.trim().to_string(),
        time: row.time.trim().to_string(),
        symbol: row.symbol.trim().to_string(),
        kind,
        bid,
        ask,
        last,
        eq_price,
        eq_level,
        bias,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(date: &str, time: &str, symbol: &str, signal: &str, bid: &str, last: &str) -> SignalRow {
        SignalRow {
            date: date.to_string(),
            time: time.to_string(),
            symbol: symbol.to_string(),
            signal: signal.to_string(),
            bid: bid.to_string(),
            ask: "100.10".to_string(),
            last: last.to_string(),
            eq_price: "101.0".to_string(),
            eq_level: "10.0".to_string(),
            bias: "1".to_string(),
        }
    }

    #[test]
    fn keeps_last_occurrence_of_duplicate_identity() {
        let rows = vec![
            row("2025-08-01", "09:30:00", "AAPL", "LongTrigger", "100.00", "100.05"),
            row("2025-08-01", "09:30:00", "AAPL", "LongTrigger", "100.50", "100.55"),
        ];
        let cleaned = normalize(&rows);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].bid, dec!(100.50));
        assert_eq!(cleaned[0].last, dec!(100.55));
    }

    #[test]
    fn distinct_identities_are_preserved_in_order() {
        let rows = vec![
            row("2025-08-01", "09:30:00", "AAPL", "LongTrigger", "100.00", "100.05"),
            row("2025-08-01", "09:31:00", "AAPL", "ShortTrigger", "100.20", "100.15"),
            row("2025-08-01", "09:30:00", "MSFT", "LongTrigger", "410.00", "410.10"),
        ];
        let cleaned = normalize(&rows);
        assert_eq!(cleaned.len(), 3);
        assert_eq!(cleaned[0].symbol, "AAPL");
        assert_eq!(cleaned[1].time, "09:31:00");
        assert_eq!(cleaned[2].symbol, "MSFT");
    }

    #[test]
    fn drops_rows_with_zero_quotes() {
        let rows = vec![
            row("2025-08-01", "09:30:00", "AAPL", "LongTrigger", "0", "100.05"),
            {
                let mut r = row("2025-08-01", "09:31:00", "AAPL", "LongTrigger", "100.00", "100.05");
                r.ask = "0".to_string();
                r
            },
        ];
        assert!(normalize(&rows).is_empty());
    }

    #[test]
    fn drops_rows_failing_numeric_coercion() {
        let mut bad = row("2025-08-01", "09:30:00", "AAPL", "LongTrigger", "100.00", "100.05");
        bad.eq_level = "n/a".to_string();
        let good = row("2025-08-01", "09:31:00", "AAPL", "LongTrigger", "100.00", "100.05");
        let cleaned = normalize(&[bad, good]);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].time, "09:31:00");
    }

    #[test]
    fn drops_rows_with_unknown_signal_label() {
        let rows = vec![row("2025-08-01", "09:30:00", "AAPL", "Breakout", "100.00", "100.05")];
        assert!(normalize(&rows).is_empty());
    }

    #[test]
    fn rerunning_the_same_batch_is_idempotent() {
        let rows = vec![
            row("2025-08-01", "09:30:00", "AAPL", "LongTrigger", "100.00", "100.05"),
            row("2025-08-01", "09:30:00", "AAPL", "LongTrigger", "100.50", "100.55"),
            row("2025-08-01", "09:30:00", "EURUSD", "ShortTrigger", "1.0850", "1.0849"),
        ];
        assert_eq!(normalize(&rows), normalize(&rows));
    }
}

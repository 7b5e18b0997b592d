//! Per-cycle audit snapshot of annotated signals.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use trigger_trade_core::NormalizedSignal;

/// Writes the cycle's annotated signals to CSV, overwriting the previous
/// snapshot. Ladder prices are `;`-joined in rung order.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_snapshot(path: &Path, signals: &[NormalizedSignal]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create snapshot file: {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record([
        "SignalDate",
        "SignalTime",
        "Symbol",
        "Signal",
        "EntryPrice",
        "PositionSize",
        "SdTicks",
        "SdPrice",
        "PyramidOrders",
        "StopLossAction",
        "CancelRemainingOrders",
        "LastUpdated",
    ])?;

    for normalized in signals {
        let ladder = normalized
            .ladder
            .iter()
            .map(|entry| entry.price.to_string())
            .collect::<Vec<_>>()
            .join(";");
        writer.write_record(&[
            normalized.signal.date.clone(),
            normalized.signal.time.clone(),
            normalized.signal.symbol.clone(),
            normalized.signal.kind.to_string(),
            normalized.entry_price.to_string(),
            normalized.position_size.to_string(),
            normalized.deviation.ticks.to_string(),
            normalized.deviation.price.to_string(),
            ladder,
            normalized.stop_loss.to_string(),
            normalized.cancel_remaining.to_string(),
            normalized
                .annotated_at
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use trigger_trade_core::{
        DeviationUnit, OrderLadderEntry, OrderSide, RawSignal, SignalKind, StopLossDirective,
    };

    fn normalized() -> NormalizedSignal {
        NormalizedSignal {
            signal: RawSignal {
                date: "2025-08-01".to_string(),
                time: "09:30:00".to_string(),
                symbol: "AAPL".to_string(),
                kind: SignalKind::LongTrigger,
                bid: dec!(100.00),
                ask: dec!(100.10),
                last: dec!(100.05),
                eq_price: dec!(101.05),
                eq_level: dec!(10),
                bias: dec!(1),
            },
            deviation: DeviationUnit {
                raw: dec!(0.1),
                ticks: 10,
                price: dec!(0.10),
            },
            entry_price: dec!(100.00),
            position_size: dec!(47),
            ladder: vec![
                OrderLadderEntry {
                    price: dec!(100.10),
                    side: OrderSide::Buy,
                },
                OrderLadderEntry {
                    price: dec!(100.20),
                    side: OrderSide::Buy,
                },
            ],
            stop_loss: StopLossDirective::Trail { bps: 4 },
            cancel_remaining: false,
            annotated_at: Utc::now(),
        }
    }

    #[test]
    fn snapshot_contains_one_line_per_signal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.csv");
        write_snapshot(&path, &[normalized()]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("AAPL"));
        assert!(contents.contains("100.10;100.20"));
        assert!(contents.contains("trail(4bps)"));
    }

    #[test]
    fn snapshot_overwrites_previous_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.csv");
        write_snapshot(&path, &[normalized(), normalized()]).unwrap();
        write_snapshot(&path, &[]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
    }
}

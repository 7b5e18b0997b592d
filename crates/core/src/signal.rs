//! Signal types flowing through the translation pipeline.
//!
//! A [`SignalRow`] is the untyped tabular row the feed hands us. The
//! normalizer turns surviving rows into [`RawSignal`]s, and the pipeline
//! annotates those into [`NormalizedSignal`]s ready for dispatch.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of an incoming trigger signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    LongTrigger,
    ShortTrigger,
}

impl SignalKind {
    /// Parses the feed's `Signal` column. Unknown labels are `None` and the
    /// row is treated as an input defect.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "LongTrigger" => Some(Self::LongTrigger),
            "ShortTrigger" => Some(Self::ShortTrigger),
            _ => None,
        }
    }

    /// Order side for entries generated by this signal.
    #[must_use]
    pub const fn side(self) -> OrderSide {
        match self {
            Self::LongTrigger => OrderSide::Buy,
            Self::ShortTrigger => OrderSide::Sell,
        }
    }
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LongTrigger => write!(f, "LongTrigger"),
            Self::ShortTrigger => write!(f, "ShortTrigger"),
        }
    }
}

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// The side of a protective exit order for a position opened on `self`.
    #[must_use]
    pub const fn exit_side(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// One raw row from the tabular signal feed, before any coercion.
///
/// All value fields are kept as strings here: coercion failures are
/// row-level defects decided by the normalizer, not parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRow {
    pub date: String,
    pub time: String,
    pub symbol: String,
    pub signal: String,
    pub bid: String,
    pub ask: String,
    pub last: String,
    pub eq_price: String,
    pub eq_level: String,
    pub bias: String,
}

/// A signal after normalization: deduplicated and numerically coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSignal {
    pub date: String,
    pub time: String,
    pub symbol: String,
    pub kind: SignalKind,
    pub bid: Decimal,
    pub ask: Decimal,
    pub last: Decimal,
    pub eq_price: Decimal,
    pub eq_level: Decimal,
    pub bias: Decimal,
}

impl RawSignal {
    /// Durable identity of this signal.
    #[must_use]
    pub fn identity(&self) -> SignalIdentity {
        SignalIdentity {
            date: self.date.clone(),
            time: self.time.clone(),
            symbol: self.symbol.clone(),
            kind: self.kind,
        }
    }
}

/// Identity of one logical signal, used for ledger membership.
///
/// Two signals with equal identity are the same event. Within a batch the
/// normalizer collapses rows on (date, time, symbol) keeping the last; the
/// ledger key additionally carries the kind so a long and a short trigger
/// on the same bar stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalIdentity {
    pub date: String,
    pub time: String,
    pub symbol: String,
    pub kind: SignalKind,
}

impl SignalIdentity {
    /// Stable key string persisted in the execution ledger.
    #[must_use]
    pub fn ledger_key(&self) -> String {
        format!("{} {}|{}|{}", self.date, self.time, self.symbol, self.kind)
    }
}

/// Quantized deviation unit (SD) for one signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviationUnit {
    /// Unquantized |eq_price - last| / |eq_level|.
    pub raw: Decimal,
    /// Tick count, rounded up.
    pub ticks: i64,
    /// Quantized deviation in price units (`ticks` x tick size).
    pub price: Decimal,
}

impl DeviationUnit {
    /// Degenerate unit produced when the reference level is zero.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            raw: Decimal::ZERO,
            ticks: 0,
            price: Decimal::ZERO,
        }
    }

    /// A unit is usable as ladder spacing only if its price is positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.price > Decimal::ZERO
    }
}

/// A single rung of the pyramid ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLadderEntry {
    pub price: Decimal,
    pub side: OrderSide,
}

/// Stop-loss directive staged from realized profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopLossDirective {
    /// No stop action for this signal.
    None,
    /// Place a trailing stop at the given distance in basis points.
    Trail { bps: i64 },
    /// Hard stop hit: exit and cancel any remaining ladder orders.
    ExitFull,
}

impl StopLossDirective {
    /// True iff still-open ladder orders should be cancelled.
    #[must_use]
    pub const fn cancels_remaining(self) -> bool {
        matches!(self, Self::ExitFull)
    }

    /// Trail distance as a price fraction (bps / 10_000), if trailing.
    #[must_use]
    pub fn trail_amount(self) -> Option<Decimal> {
        match self {
            Self::Trail { bps } => Some(Decimal::new(bps, 4)),
            _ => None,
        }
    }
}

impl std::fmt::Display for StopLossDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Trail { bps } => write!(f, "trail({bps}bps)"),
            Self::ExitFull => write!(f, "exit-full"),
        }
    }
}

/// Fully annotated signal, the pipeline's per-cycle output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedSignal {
    pub signal: RawSignal,
    pub deviation: DeviationUnit,
    pub entry_price: Decimal,
    pub position_size: Decimal,
    pub ladder: Vec<OrderLadderEntry>,
    pub stop_loss: StopLossDirective,
    pub cancel_remaining: bool,
    pub annotated_at: DateTime<Utc>,
}

//! The pure signal-processing pipeline.
//!
//! Raw feed rows go through [`normalizer::normalize`], then each surviving
//! signal is run through [`annotate::annotate`], which composes the
//! deviation unit, position size, pyramid ladder, and stop-loss directive
//! into one [`trigger_trade_core::NormalizedSignal`]. Everything here is a
//! function of its inputs; durable state lives with the orchestrator.

pub mod annotate;
pub mod deviation;
pub mod normalizer;
pub mod pyramid;
pub mod sizing;
pub mod stop_loss;

pub use annotate::annotate;
pub use normalizer::normalize;

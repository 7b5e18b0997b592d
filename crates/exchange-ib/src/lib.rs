//! Interactive Brokers integration.
//!
//! Provides IB Gateway/TWS session management, contract mapping for the
//! equity and forex symbols the engine trades, and the live
//! `OrderGateway` implementation bound to a session.

pub mod client;
pub mod contracts;
pub mod gateway;

pub use client::IbSession;
pub use gateway::IbGateway;

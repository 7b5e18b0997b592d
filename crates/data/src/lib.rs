//! Storage collaborators: the tabular signal feed, the per-symbol
//! configuration table, the durable execution ledger, and the per-cycle
//! audit snapshot. All of them speak CSV.

pub mod feed;
pub mod ledger;
pub mod snapshot;
pub mod symbol_table;

pub use feed::CsvSignalSource;
pub use ledger::ExecutionLedger;
pub use snapshot::write_snapshot;
pub use symbol_table::load_symbol_table;

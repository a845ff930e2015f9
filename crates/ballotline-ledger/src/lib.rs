mod client;
mod memory;

pub use client::LedgerClient;
pub use memory::{LedgerOp, MemoryLedger};

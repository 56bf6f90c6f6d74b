#![doc(test(attr(deny(warnings))))]

//! Financas Core keeps a personal ledger of income and expense transactions,
//! category spending goals and investment balances, with monthly summaries,
//! PIN-gated access and JSON backups.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Financas Core tracing initialized.");
    });
}

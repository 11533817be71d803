//! fee-lab - Solana transaction assembly, priority fees and simulation walkthroughs

pub mod app;
pub mod config;
pub mod infrastructure;
pub mod report;
pub mod shared;
pub mod transaction;

// Re-export main types for convenience
pub use app::AppContext;
pub use config::Config;
pub use shared::errors::{AppError, AppResult, ConfigError};
pub use transaction::{BudgetConfig, BudgetOverrides, Envelope, TransactionBuilder};

use tracing_subscriber::EnvFilter;

/// Console logging for the walkthrough binaries. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

//! Transaction assembly - envelopes, compute budget directives and fee arithmetic

pub mod compute_budget;
pub mod envelope;
pub mod fees;
pub mod instructions;
pub mod transaction_builder;

pub use compute_budget::{BudgetConfig, BudgetOverrides, ComputeBudget};
pub use envelope::Envelope;
pub use fees::{FeeEstimate, PrioritizationFeeStats};
pub use transaction_builder::{
    build_envelope, build_envelope_with_budget, FreshnessOracle, TransactionBuilder,
};

//! Fee arithmetic for reporting. Nothing here changes what gets submitted.

use serde::Serialize;

use crate::shared::errors::AppResult;
use crate::transaction::compute_budget::{BudgetDirective, RequestedBudget};
use crate::transaction::envelope::Envelope;

/// Base fee charged per required signature
pub const LAMPORTS_PER_SIGNATURE: u64 = 5_000;

pub const MICRO_LAMPORTS_PER_LAMPORT: u64 = 1_000_000;

/// Limit applied per instruction when no limit directive is present
pub const DEFAULT_INSTRUCTION_COMPUTE_UNIT_LIMIT: u32 = 200_000;

pub const MAX_COMPUTE_UNIT_LIMIT: u32 = 1_400_000;

/// Priority fee in lamports: price (micro-lamports/CU) times the requested limit, rounded up
pub fn prioritization_fee(unit_price: u64, unit_limit: u32) -> u64 {
    let micro_lamports = unit_price as u128 * unit_limit as u128;
    let lamports = micro_lamports.div_ceil(MICRO_LAMPORTS_PER_LAMPORT as u128);
    u64::try_from(lamports).unwrap_or(u64::MAX)
}

pub fn signature_fee(required_signatures: usize) -> u64 {
    LAMPORTS_PER_SIGNATURE.saturating_mul(required_signatures as u64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeEstimate {
    pub signature_fee: u64,
    pub prioritization_fee: u64,
    pub unit_price: u64,
    pub unit_limit: u32,
    /// Repeated price or limit directive. The node will reject the transaction,
    /// so the figures above describe a fee that is never charged.
    pub duplicate_directives: bool,
}

impl FeeEstimate {
    /// Expected fee of `envelope`. Priority fees are charged on the requested limit,
    /// not on what the transaction actually consumes.
    pub fn for_envelope(envelope: &Envelope) -> AppResult<Self> {
        let instructions = envelope.instructions()?;
        let requested = RequestedBudget::from_instructions(&instructions);

        let unit_limit = requested.unit_limit.unwrap_or_else(|| {
            let executed = instructions
                .iter()
                .filter(|ix| !BudgetDirective::is_compute_budget(ix))
                .count() as u32;
            executed
                .saturating_mul(DEFAULT_INSTRUCTION_COMPUTE_UNIT_LIMIT)
                .min(MAX_COMPUTE_UNIT_LIMIT)
        });
        let unit_price = requested.unit_price.unwrap_or(0);

        Ok(Self {
            signature_fee: signature_fee(envelope.required_signatures()),
            prioritization_fee: prioritization_fee(unit_price, unit_limit),
            unit_price,
            unit_limit,
            duplicate_directives: requested.duplicated,
        })
    }

    pub fn total(&self) -> u64 {
        self.signature_fee.saturating_add(self.prioritization_fee)
    }
}

/// Summary of recent prioritization fees (micro-lamports per CU)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrioritizationFeeStats {
    pub samples: usize,
    pub min: u64,
    pub median: u64,
    pub p75: u64,
    pub max: u64,
}

impl PrioritizationFeeStats {
    pub fn from_samples(samples: &[u64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_unstable();

        Some(Self {
            samples: sorted.len(),
            min: sorted[0],
            median: percentile(&sorted, 50),
            p75: percentile(&sorted, 75),
            max: sorted[sorted.len() - 1],
        })
    }

    /// Price likely to land: the 75th percentile, never below 1 micro-lamport
    pub fn recommended(&self) -> u64 {
        self.p75.max(1)
    }
}

// nearest-rank percentile over sorted, non-empty input
fn percentile(sorted: &[u64], pct: usize) -> u64 {
    let rank = (pct * sorted.len()).div_ceil(100).max(1);
    sorted[rank - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::compute_budget::{create_priority_fee_instruction, ComputeBudget};
    use crate::transaction::instructions::build_simple_transfer_instruction;
    use crate::transaction::transaction_builder::{build_envelope, build_envelope_with_budget};
    use solana_sdk::{hash::Hash, pubkey::Pubkey};

    #[test]
    fn test_prioritization_fee() {
        // 1 lamport per CU
        assert_eq!(prioritization_fee(1_000_000, 200_000), 200_000);
        assert_eq!(prioritization_fee(1_000_000, 500), 500);
        // rounds up to whole lamports
        assert_eq!(prioritization_fee(1, 1), 1);
        assert_eq!(prioritization_fee(0, 1_400_000), 0);
        assert_eq!(prioritization_fee(u64::MAX, u32::MAX), u64::MAX);
    }

    #[test]
    fn test_signature_fee() {
        assert_eq!(signature_fee(1), 5_000);
        assert_eq!(signature_fee(2), 10_000);
    }

    #[test]
    fn test_estimate_with_default_network_limit() {
        let payer = Pubkey::new_unique();
        let ix = build_simple_transfer_instruction(&payer, &Pubkey::new_unique(), 1);
        let budget = ComputeBudget { unit_price: 1_000_000, unit_limit: 200_000 };
        let envelope = build_envelope_with_budget(&[ix], &payer, budget, Hash::new_unique()).unwrap();

        assert_eq!(FeeEstimate::for_envelope(&envelope).unwrap().total(), 205_000);
    }

    #[test]
    fn test_estimate_without_directives() {
        let payer = Pubkey::new_unique();
        let ix = build_simple_transfer_instruction(&payer, &Pubkey::new_unique(), 1);
        let envelope = build_envelope(&[ix], &payer, Hash::new_unique()).unwrap();
        let estimate = FeeEstimate::for_envelope(&envelope).unwrap();

        assert_eq!(estimate.unit_limit, DEFAULT_INSTRUCTION_COMPUTE_UNIT_LIMIT);
        assert_eq!(estimate.prioritization_fee, 0);
        assert_eq!(estimate.total(), 5_000);
    }

    #[test]
    fn test_estimate_flags_repeated_directive() {
        let payer = Pubkey::new_unique();
        let ixs = vec![
            create_priority_fee_instruction(1_000_000),
            create_priority_fee_instruction(2_000_000),
            build_simple_transfer_instruction(&payer, &Pubkey::new_unique(), 1),
        ];
        let envelope = build_envelope(&ixs, &payer, Hash::new_unique()).unwrap();
        let estimate = FeeEstimate::for_envelope(&envelope).unwrap();

        assert!(estimate.duplicate_directives);
        assert_eq!(estimate.unit_price, 2_000_000);
    }

    #[test]
    fn test_fee_stats() {
        let stats = PrioritizationFeeStats::from_samples(&[0, 10, 5, 100, 0, 20, 7, 3]).unwrap();

        assert_eq!(stats.samples, 8);
        assert_eq!(stats.min, 0);
        assert_eq!(stats.median, 5);
        assert_eq!(stats.p75, 10);
        assert_eq!(stats.max, 100);
        assert_eq!(stats.recommended(), 10);
    }

    #[test]
    fn test_fee_stats_floor_and_empty() {
        assert!(PrioritizationFeeStats::from_samples(&[]).is_none());

        let quiet = PrioritizationFeeStats::from_samples(&[0, 0, 0]).unwrap();
        assert_eq!(quiet.recommended(), 1);
    }
}

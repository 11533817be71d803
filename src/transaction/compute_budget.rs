use serde::{Deserialize, Serialize};
use solana_sdk::{
    compute_budget::{self, ComputeBudgetInstruction},
    instruction::Instruction,
};

/// Default price per compute unit, in micro-lamports (1 lamport per CU)
pub const DEFAULT_COMPUTE_UNIT_PRICE: u64 = 1_000_000;

/// Default compute unit limit requested by the budget directives.
///
/// Matches the network default of 200K CUs per instruction. A transaction can
/// request at most 1.4M CUs.
pub const DEFAULT_COMPUTE_UNIT_LIMIT: u32 = 200_000;

const SET_COMPUTE_UNIT_LIMIT_TAG: u8 = 2;
const SET_COMPUTE_UNIT_PRICE_TAG: u8 = 3;

/// Defaults applied when a caller does not choose a price or limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    pub unit_price: u64,
    pub unit_limit: u32,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            unit_price: DEFAULT_COMPUTE_UNIT_PRICE,
            unit_limit: DEFAULT_COMPUTE_UNIT_LIMIT,
        }
    }
}

impl BudgetConfig {
    /// Resolve caller overrides against these defaults
    pub fn resolve(&self, overrides: BudgetOverrides) -> ComputeBudget {
        ComputeBudget {
            unit_price: overrides.unit_price.unwrap_or(self.unit_price),
            unit_limit: overrides.unit_limit.unwrap_or(self.unit_limit),
        }
    }
}

/// Per-call price/limit choices; `None` falls back to `BudgetConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BudgetOverrides {
    pub unit_price: Option<u64>,
    pub unit_limit: Option<u32>,
}

impl BudgetOverrides {
    pub fn with_unit_price(mut self, unit_price: u64) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    pub fn with_unit_limit(mut self, unit_limit: u32) -> Self {
        self.unit_limit = Some(unit_limit);
        self
    }
}

/// Fully resolved compute budget for one envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeBudget {
    pub unit_price: u64,
    pub unit_limit: u32,
}

/// Compute budget values requested by an instruction list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestedBudget {
    pub unit_price: Option<u64>,
    pub unit_limit: Option<u32>,
    /// A price or limit directive appears more than once. The network rejects
    /// such transactions outright.
    pub duplicated: bool,
}

impl RequestedBudget {
    /// Collect the price/limit directives present in `instructions`.
    /// When a directive repeats, the last value is kept and `duplicated` is set.
    pub fn from_instructions(instructions: &[Instruction]) -> Self {
        let mut requested = Self::default();
        for directive in instructions.iter().filter_map(BudgetDirective::parse) {
            match directive {
                BudgetDirective::UnitPrice(price) => {
                    requested.duplicated |= requested.unit_price.replace(price).is_some();
                }
                BudgetDirective::UnitLimit(limit) => {
                    requested.duplicated |= requested.unit_limit.replace(limit).is_some();
                }
                BudgetDirective::Other => {}
            }
        }
        requested
    }
}

/// Decoded compute budget instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetDirective {
    UnitPrice(u64),
    UnitLimit(u32),
    Other,
}

impl BudgetDirective {
    /// Decode a compute budget instruction. Returns `None` for instructions
    /// addressed to any other program.
    pub fn parse(instruction: &Instruction) -> Option<Self> {
        if instruction.program_id != compute_budget::id() {
            return None;
        }

        let (tag, payload) = instruction.data.split_first()?;
        let directive = match *tag {
            SET_COMPUTE_UNIT_LIMIT_TAG => payload
                .get(..4)
                .and_then(|bytes| bytes.try_into().ok())
                .map(|bytes| BudgetDirective::UnitLimit(u32::from_le_bytes(bytes)))
                .unwrap_or(BudgetDirective::Other),
            SET_COMPUTE_UNIT_PRICE_TAG => payload
                .get(..8)
                .and_then(|bytes| bytes.try_into().ok())
                .map(|bytes| BudgetDirective::UnitPrice(u64::from_le_bytes(bytes)))
                .unwrap_or(BudgetDirective::Other),
            _ => BudgetDirective::Other,
        };
        Some(directive)
    }

    pub fn is_compute_budget(instruction: &Instruction) -> bool {
        instruction.program_id == compute_budget::id()
    }
}

/// Create ComputeBudget instruction to set priority fee
pub fn create_priority_fee_instruction(micro_lamports: u64) -> Instruction {
    ComputeBudgetInstruction::set_compute_unit_price(micro_lamports)
}

/// Create ComputeBudget instruction to set compute unit limit
pub fn create_compute_unit_limit_instruction(compute_units: u32) -> Instruction {
    ComputeBudgetInstruction::set_compute_unit_limit(compute_units)
}

/// Create both ComputeBudget instructions, price first, then limit
pub fn create_compute_budget_instructions(budget: ComputeBudget) -> Vec<Instruction> {
    vec![
        create_priority_fee_instruction(budget.unit_price),
        create_compute_unit_limit_instruction(budget.unit_limit),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{pubkey::Pubkey, system_instruction};

    #[test]
    fn test_budget_instructions_order() {
        let ixs = create_compute_budget_instructions(ComputeBudget {
            unit_price: 42,
            unit_limit: 500,
        });

        assert_eq!(ixs.len(), 2);
        assert_eq!(BudgetDirective::parse(&ixs[0]), Some(BudgetDirective::UnitPrice(42)));
        assert_eq!(BudgetDirective::parse(&ixs[1]), Some(BudgetDirective::UnitLimit(500)));
    }

    #[test]
    fn test_directive_encodes_extreme_values() {
        let price = create_priority_fee_instruction(u64::MAX);
        let limit = create_compute_unit_limit_instruction(u32::MAX);

        assert_eq!(BudgetDirective::parse(&price), Some(BudgetDirective::UnitPrice(u64::MAX)));
        assert_eq!(BudgetDirective::parse(&limit), Some(BudgetDirective::UnitLimit(u32::MAX)));
    }

    #[test]
    fn test_parse_ignores_other_programs() {
        let transfer = system_instruction::transfer(&Pubkey::new_unique(), &Pubkey::new_unique(), 1);
        assert_eq!(BudgetDirective::parse(&transfer), None);
        assert!(!BudgetDirective::is_compute_budget(&transfer));
    }

    #[test]
    fn test_parse_other_budget_instruction() {
        let heap = ComputeBudgetInstruction::request_heap_frame(256 * 1024);
        assert_eq!(BudgetDirective::parse(&heap), Some(BudgetDirective::Other));
    }

    #[test]
    fn test_resolve_defaults_independently() {
        let defaults = BudgetConfig::default();

        let none = defaults.resolve(BudgetOverrides::default());
        assert_eq!(none.unit_price, DEFAULT_COMPUTE_UNIT_PRICE);
        assert_eq!(none.unit_limit, DEFAULT_COMPUTE_UNIT_LIMIT);

        let price_only = defaults.resolve(BudgetOverrides::default().with_unit_price(7));
        assert_eq!(price_only.unit_price, 7);
        assert_eq!(price_only.unit_limit, DEFAULT_COMPUTE_UNIT_LIMIT);

        let limit_only = defaults.resolve(BudgetOverrides::default().with_unit_limit(300));
        assert_eq!(limit_only.unit_price, DEFAULT_COMPUTE_UNIT_PRICE);
        assert_eq!(limit_only.unit_limit, 300);
    }

    #[test]
    fn test_resolve_uses_configured_defaults() {
        let defaults = BudgetConfig {
            unit_price: 10,
            unit_limit: 20_000,
        };
        let budget = defaults.resolve(BudgetOverrides::default());
        assert_eq!(budget, ComputeBudget { unit_price: 10, unit_limit: 20_000 });
    }

    #[test]
    fn test_requested_budget_last_wins() {
        let ixs = vec![
            create_compute_unit_limit_instruction(100),
            create_priority_fee_instruction(5),
            create_compute_unit_limit_instruction(900),
        ];
        let requested = RequestedBudget::from_instructions(&ixs);
        assert_eq!(requested.unit_limit, Some(900));
        assert_eq!(requested.unit_price, Some(5));
        assert!(requested.duplicated);
    }

    #[test]
    fn test_requested_budget_single_directives_not_duplicated() {
        let requested = RequestedBudget::from_instructions(&create_compute_budget_instructions(
            ComputeBudget { unit_price: 5, unit_limit: 900 },
        ));
        assert!(!requested.duplicated);
        assert!(!RequestedBudget::from_instructions(&[]).duplicated);
    }
}

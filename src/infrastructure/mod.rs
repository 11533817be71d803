//! Infrastructure - RPC access, key loading and explorer links

pub mod blockchain;
pub mod explorer;
pub mod identity;

pub use blockchain::{SimulateOptions, SimulationOutcome, SolanaRpcClient, SubmitOptions};
pub use identity::load_payer;

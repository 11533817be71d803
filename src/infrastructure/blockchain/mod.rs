//! Direct blockchain access over Solana JSON-RPC

pub mod rpc_client;

pub use rpc_client::{SimulateOptions, SimulationOutcome, SolanaRpcClient, SubmitOptions};

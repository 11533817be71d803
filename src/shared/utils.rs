//! Utility functions and helpers

use solana_sdk::native_token::LAMPORTS_PER_SOL;

/// Convert lamports to SOL
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Format a SOL amount for console output
pub fn format_sol(sol: f64) -> String {
    format!("{:.9} SOL", sol)
}

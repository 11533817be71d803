use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    system_instruction,
    system_program,
};

/// Transfer `lamports` from `from` to `to` through the system program
pub fn build_simple_transfer_instruction(from: &Pubkey, to: &Pubkey, lamports: u64) -> Instruction {
    system_instruction::transfer(from, to, lamports)
}

/// Allocate `space` bytes for `new_account`, funded by `payer` and owned by the system program.
/// Both `payer` and `new_account` must sign.
pub fn build_create_account_instruction(
    payer: &Pubkey,
    new_account: &Pubkey,
    lamports: u64,
    space: u64,
) -> Instruction {
    system_instruction::create_account(payer, new_account, lamports, space, &system_program::id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_accounts() {
        let from = Pubkey::new_unique();
        let to = Pubkey::new_unique();
        let ix = build_simple_transfer_instruction(&from, &to, 1_000_000);

        assert_eq!(ix.program_id, system_program::id());
        assert_eq!(ix.accounts.len(), 2);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert!(!ix.accounts[1].is_signer && ix.accounts[1].is_writable);
    }

    #[test]
    fn test_create_account_needs_two_signers() {
        let payer = Pubkey::new_unique();
        let new_account = Pubkey::new_unique();
        let ix = build_create_account_instruction(&payer, &new_account, 890_880, 0);

        let signers = ix.accounts.iter().filter(|meta| meta.is_signer).count();
        assert_eq!(signers, 2);
        assert_eq!(ix.accounts[1].pubkey, new_account);
    }
}

//! Transaction envelope: a v0 transaction that may still be waiting for signatures

use solana_sdk::{
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    message::{MessageHeader, VersionedMessage},
    pubkey::Pubkey,
    signature::{Signature, Signer},
    transaction::VersionedTransaction,
};

use crate::shared::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    transaction: VersionedTransaction,
}

impl Envelope {
    /// Wrap a compiled message with one empty signature slot per required signer
    pub fn new_unsigned(message: VersionedMessage) -> Self {
        let required = message.header().num_required_signatures as usize;
        Self {
            transaction: VersionedTransaction {
                signatures: vec![Signature::default(); required],
                message,
            },
        }
    }

    pub fn message(&self) -> &VersionedMessage {
        &self.transaction.message
    }

    pub fn transaction(&self) -> &VersionedTransaction {
        &self.transaction
    }

    pub fn into_transaction(self) -> VersionedTransaction {
        self.transaction
    }

    /// Fee payer, always the first static account key
    pub fn payer(&self) -> Option<&Pubkey> {
        self.message().static_account_keys().first()
    }

    pub fn recent_blockhash(&self) -> &Hash {
        self.message().recent_blockhash()
    }

    pub fn required_signatures(&self) -> usize {
        self.message().header().num_required_signatures as usize
    }

    /// Keys that must sign, in signature slot order
    pub fn signer_keys(&self) -> &[Pubkey] {
        let keys = self.message().static_account_keys();
        &keys[..self.required_signatures().min(keys.len())]
    }

    /// Bytes every signer signs over
    pub fn message_data(&self) -> Vec<u8> {
        self.message().serialize()
    }

    /// Rebuild the instruction list from the compiled message. Every index must
    /// resolve to a static account key.
    pub fn instructions(&self) -> AppResult<Vec<Instruction>> {
        let message = self.message();
        let keys = message.static_account_keys();
        let header = message.header();
        let key_at = |index: u8| {
            keys.get(index as usize).copied().ok_or_else(|| {
                AppError::Serialization(format!("account index {} is not a static key", index))
            })
        };

        message
            .instructions()
            .iter()
            .map(|compiled| {
                let accounts = compiled
                    .accounts
                    .iter()
                    .map(|&index| {
                        let pubkey = key_at(index)?;
                        let index = index as usize;
                        Ok(AccountMeta {
                            pubkey,
                            is_signer: index < header.num_required_signatures as usize,
                            is_writable: is_writable_index(header, keys.len(), index),
                        })
                    })
                    .collect::<AppResult<Vec<_>>>()?;
                Ok(Instruction {
                    program_id: key_at(compiled.program_id_index)?,
                    accounts,
                    data: compiled.data.clone(),
                })
            })
            .collect()
    }

    /// Sign with the complete signer set. Missing or unexpected signers are an error.
    pub fn sign(&mut self, signers: &[&dyn Signer]) -> AppResult<()> {
        let transaction = VersionedTransaction::try_new(self.transaction.message.clone(), signers)
            .map_err(|e| AppError::Signing(e.to_string()))?;
        self.transaction = transaction;
        Ok(())
    }

    /// Place an externally produced signature in `signer`'s slot. The signature is not verified.
    pub fn attach_signature(&mut self, signer: &Pubkey, signature: Signature) -> AppResult<()> {
        let position = self
            .signer_keys()
            .iter()
            .position(|key| key == signer)
            .ok_or_else(|| AppError::Signing(format!("{} is not a required signer", signer)))?;
        let slot = self
            .transaction
            .signatures
            .get_mut(position)
            .ok_or_else(|| AppError::Signing(format!("no signature slot for {}", signer)))?;
        *slot = signature;
        Ok(())
    }

    pub fn is_fully_signed(&self) -> bool {
        self.transaction.signatures.len() == self.required_signatures()
            && self
                .transaction
                .signatures
                .iter()
                .all(|signature| *signature != Signature::default())
    }

    /// Wire encoding, as sent to the RPC node
    pub fn to_bytes(&self) -> AppResult<Vec<u8>> {
        Ok(bincode::serialize(&self.transaction)?)
    }

    /// Parse wire bytes. Rejects malformed messages, a signature count that does not
    /// match the header, and messages that load accounts from lookup tables.
    pub fn from_bytes(bytes: &[u8]) -> AppResult<Self> {
        let transaction: VersionedTransaction = bincode::deserialize(bytes)?;
        transaction
            .sanitize()
            .map_err(|e| AppError::Serialization(format!("malformed transaction: {}", e)))?;

        let required = transaction.message.header().num_required_signatures as usize;
        if transaction.signatures.len() != required {
            return Err(AppError::Serialization(format!(
                "expected {} signatures, found {}",
                required,
                transaction.signatures.len()
            )));
        }
        if transaction
            .message
            .address_table_lookups()
            .is_some_and(|lookups| !lookups.is_empty())
        {
            return Err(AppError::Serialization(
                "address lookup tables are not supported".to_string(),
            ));
        }
        Ok(Self { transaction })
    }
}

impl From<Envelope> for VersionedTransaction {
    fn from(envelope: Envelope) -> Self {
        envelope.into_transaction()
    }
}

fn is_writable_index(header: &MessageHeader, num_keys: usize, index: usize) -> bool {
    let signed = header.num_required_signatures as usize;
    if index < signed {
        index < signed.saturating_sub(header.num_readonly_signed_accounts as usize)
    } else {
        index < num_keys.saturating_sub(header.num_readonly_unsigned_accounts as usize)
    }
}

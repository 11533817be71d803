// src/report.rs
use serde::Serialize;

use crate::infrastructure::SimulationOutcome;
use crate::shared::errors::AppResult;
use crate::transaction::{fees::FeeEstimate, Envelope};

/// Console report of a built transaction and what the network is expected to charge
#[derive(Debug, Serialize)]
pub struct TransactionReport {
    pub label: String,
    pub payer: String,
    pub instructions: usize,
    pub required_signatures: usize,
    pub fee: FeeEstimate,
    pub expected_fee_lamports: u64,
    pub signature: Option<String>,
    pub explorer_url: Option<String>,
    pub simulation: Option<SimulationOutcome>,
}

impl TransactionReport {
    pub fn new(label: impl Into<String>, envelope: &Envelope) -> AppResult<Self> {
        let fee = FeeEstimate::for_envelope(envelope)?;
        Ok(Self {
            label: label.into(),
            payer: envelope
                .payer()
                .map(|payer| payer.to_string())
                .unwrap_or_default(),
            instructions: envelope.message().instructions().len(),
            required_signatures: envelope.required_signatures(),
            expected_fee_lamports: fee.total(),
            fee,
            signature: None,
            explorer_url: None,
            simulation: None,
        })
    }

    pub fn with_transaction_signature(mut self, signature: String, explorer_url: String) -> Self {
        self.signature = Some(signature);
        self.explorer_url = Some(explorer_url);
        self
    }

    pub fn with_simulation(mut self, simulation: SimulationOutcome) -> Self {
        self.simulation = Some(simulation);
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

//! The engine's only input record.

use crate::types::AccountId;
use serde::{Deserialize, Serialize};

/// One monetary transfer. Never mutated by the engine.
///
/// Nothing here is validated: zero or negative amounts, empty ids and
/// self-transfers are folded into the graph as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(alias = "transaction_id")]
    pub id:          String,
    #[serde(default)]
    pub timestamp:   String,
    pub sender_id:   AccountId,
    pub receiver_id: AccountId,
    pub amount:      f64,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        timestamp: impl Into<String>,
        sender_id: impl Into<AccountId>,
        receiver_id: impl Into<AccountId>,
        amount: f64,
    ) -> Self {
        Self {
            id:          id.into(),
            timestamp:   timestamp.into(),
            sender_id:   sender_id.into(),
            receiver_id: receiver_id.into(),
            amount,
        }
    }

    pub fn is_self_transfer(&self) -> bool {
        self.sender_id == self.receiver_id
    }
}

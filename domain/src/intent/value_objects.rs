//! Transaction results produced by executing an intent.

use serde::{Deserialize, Serialize};

/// Final on-chain outcome of one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Success,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Success => "success",
            TransactionStatus::Failed => "failed",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TransactionStatus::Success)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One submitted action. The hash is kept whatever the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: String,
    pub description: String,
    pub status: TransactionStatus,
}

impl Transaction {
    pub fn new(
        hash: impl Into<String>,
        description: impl Into<String>,
        status: TransactionStatus,
    ) -> Self {
        Self {
            hash: hash.into(),
            description: description.into(),
            status,
        }
    }

    pub fn success(hash: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(hash, description, TransactionStatus::Success)
    }

    pub fn failed(hash: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(hash, description, TransactionStatus::Failed)
    }
}

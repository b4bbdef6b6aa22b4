use crate::core::Operation;
use serde::{Deserialize, Serialize};

/// One persisted record of a successful calculation
///
/// Entries are append-only: the service never mutates or deletes them.
/// `operand2` is null for unary operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub operation: Operation,
    pub operand1: f64,
    #[serde(default)]
    pub operand2: Option<f64>,
    pub result: f64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HistoryEntry {
    /// Build an entry for a calculation that just succeeded, stamped now
    pub fn record(
        operation: Operation,
        operand1: f64,
        operand2: Option<f64>,
        result: f64,
    ) -> Self {
        Self {
            operation,
            operand1,
            operand2,
            result,
            timestamp: chrono::Utc::now(),
        }
    }
}

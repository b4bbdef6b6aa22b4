// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::HistoryEntry;
pub use requests::{parse_operand, BinaryOperands, PowerOperands, UnaryOperand};
pub use responses::{CalculationResponse, ErrorResponse, HealthResponse, VersionResponse};

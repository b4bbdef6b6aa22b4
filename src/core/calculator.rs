use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced by the calculator
///
/// All variants are client-input errors: they are reported back to the
/// caller with a 400 status and never terminate the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Invalid operands.")]
    InvalidOperands,

    #[error("Cannot divide by zero.")]
    DivideByZero,

    #[error("Cannot take modulo by zero.")]
    ModuloByZero,

    #[error("Cannot take the square root of a negative number.")]
    NegativeSqrt,

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}

/// Supported arithmetic operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Mod,
    Sqrt,
}

impl Operation {
    /// Whether the operation takes two operands
    pub fn is_binary(&self) -> bool {
        !matches!(self, Operation::Sqrt)
    }

    /// Wire name of the operation (also the route segment)
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Power => "power",
            Operation::Mod => "mod",
            Operation::Sqrt => "sqrt",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            "divide" => Ok(Operation::Divide),
            "power" => Ok(Operation::Power),
            "mod" => Ok(Operation::Mod),
            "sqrt" => Ok(Operation::Sqrt),
            other => Err(CalcError::UnknownOperation(other.to_string())),
        }
    }
}

/// Evaluate one arithmetic operation
///
/// Pure and stateless: identical inputs always produce identical outputs.
/// Operand validation happens here rather than at parse time: missing or
/// unparsable query parameters arrive as NaN and are rejected as
/// `InvalidOperands` before dispatch, for every operation alike.
///
/// `operand2` must be present (and numeric) for binary operations and is
/// ignored for `sqrt`. Modulo uses Rust's native `%` remainder, so the
/// result sign follows the dividend.
pub fn calculate(
    operand1: f64,
    operand2: Option<f64>,
    op: Operation,
) -> Result<f64, CalcError> {
    if operand1.is_nan() || (op.is_binary() && !is_valid_operand(operand2)) {
        return Err(CalcError::InvalidOperands);
    }

    // Validated above for every binary operation; unused for sqrt
    let operand2 = operand2.unwrap_or(f64::NAN);

    match op {
        Operation::Add => Ok(operand1 + operand2),
        Operation::Subtract => Ok(operand1 - operand2),
        Operation::Multiply => Ok(operand1 * operand2),
        Operation::Divide => {
            if operand2 == 0.0 {
                return Err(CalcError::DivideByZero);
            }
            Ok(operand1 / operand2)
        }
        Operation::Power => Ok(operand1.powf(operand2)),
        Operation::Mod => {
            if operand2 == 0.0 {
                return Err(CalcError::ModuloByZero);
            }
            Ok(operand1 % operand2)
        }
        Operation::Sqrt => {
            if operand1 < 0.0 {
                return Err(CalcError::NegativeSqrt);
            }
            Ok(operand1.sqrt())
        }
    }
}

#[inline]
fn is_valid_operand(operand: Option<f64>) -> bool {
    matches!(operand, Some(v) if !v.is_nan())
}

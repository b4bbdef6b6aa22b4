// Core algorithm exports
pub mod calculator;

pub use calculator::{calculate, CalcError, Operation};

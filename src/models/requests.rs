use serde::Deserialize;

/// Convert a raw query value into an operand
///
/// Missing and unparsable values both become NaN: the calculator owns
/// operand validation, so the query layer never hard-fails on bad input.
pub fn parse_operand(value: Option<&str>) -> f64 {
    value.and_then(|v| v.parse::<f64>().ok()).unwrap_or(f64::NAN)
}

/// Operands for the binary arithmetic endpoints (`num1`, `num2`)
#[derive(Debug, Clone, Deserialize)]
pub struct BinaryOperands {
    pub num1: Option<String>,
    pub num2: Option<String>,
}

impl BinaryOperands {
    pub fn operand1(&self) -> f64 {
        parse_operand(self.num1.as_deref())
    }

    pub fn operand2(&self) -> f64 {
        parse_operand(self.num2.as_deref())
    }
}

/// Operands for `/power`, which also accepts `base`/`exp` as fallback
/// names when `num1`/`num2` are absent
#[derive(Debug, Clone, Deserialize)]
pub struct PowerOperands {
    pub num1: Option<String>,
    pub num2: Option<String>,
    pub base: Option<String>,
    pub exp: Option<String>,
}

impl PowerOperands {
    pub fn operand1(&self) -> f64 {
        parse_operand(self.num1.as_deref().or(self.base.as_deref()))
    }

    pub fn operand2(&self) -> f64 {
        parse_operand(self.num2.as_deref().or(self.exp.as_deref()))
    }
}

/// Operand for `/sqrt` (`num`)
#[derive(Debug, Clone, Deserialize)]
pub struct UnaryOperand {
    pub num: Option<String>,
}

impl UnaryOperand {
    pub fn operand(&self) -> f64 {
        parse_operand(self.num.as_deref())
    }
}

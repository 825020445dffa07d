//! The four-function calculator the generated records are checked against.

use crate::error::CalcError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signature shared by every calculator function.
pub type OperationFn = fn(Decimal, Decimal) -> Result<Decimal, CalcError>;

pub fn add(a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
    a.checked_add(b).ok_or(CalcError::Overflow { operation: "add" })
}

pub fn subtract(a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
    a.checked_sub(b)
        .ok_or(CalcError::Overflow { operation: "subtract" })
}

pub fn multiply(a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
    a.checked_mul(b)
        .ok_or(CalcError::Overflow { operation: "multiply" })
}

pub fn divide(a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
    if b.is_zero() {
        return Err(CalcError::DivisionByZero);
    }
    a.checked_div(b)
        .ok_or(CalcError::Overflow { operation: "divide" })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// Every operation, in the order random draws index into.
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    pub fn function(self) -> OperationFn {
        match self {
            Operation::Add => add,
            Operation::Subtract => subtract,
            Operation::Multiply => multiply,
            Operation::Divide => divide,
        }
    }

    pub fn apply(self, a: Decimal, b: Decimal) -> Result<Decimal, CalcError> {
        (self.function())(a, b)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| format!("unknown operation '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn basic_arithmetic() {
        assert_eq!(add(dec!(12), dec!(7)), Ok(dec!(19)));
        assert_eq!(subtract(dec!(7), dec!(12)), Ok(dec!(-5)));
        assert_eq!(multiply(dec!(12), dec!(7)), Ok(dec!(84)));
        assert_eq!(divide(dec!(84), dec!(7)), Ok(dec!(12)));
    }

    #[test]
    fn divide_by_zero_is_an_error() {
        assert_eq!(divide(dec!(5), dec!(0)), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(
            multiply(Decimal::MAX, dec!(2)),
            Err(CalcError::Overflow { operation: "multiply" })
        );
        assert_eq!(
            add(Decimal::MAX, Decimal::MAX),
            Err(CalcError::Overflow { operation: "add" })
        );
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for op in Operation::ALL.iter() {
            assert_eq!(op.name().parse::<Operation>(), Ok(*op));
        }
        assert!("modulo".parse::<Operation>().is_err());
    }

    #[test]
    fn function_matches_variant() {
        assert_eq!(Operation::Divide.apply(dec!(9), dec!(3)), Ok(dec!(3)));
        assert_eq!((Operation::Subtract.function())(dec!(9), dec!(3)), Ok(dec!(6)));
    }
}

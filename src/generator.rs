//! Randomized arithmetic test records.
//!
//! Each record draws `a` from the 2-digit space, `b` from the 2-digit space
//! (1-digit on every index with `index % 4 == 3`), then picks one of the four
//! operations uniformly and computes what the calculator should return.

use crate::calculator::{Operation, OperationFn};
use crate::error::{CalcError, Error};
use crate::faker::{random_element, random_number};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::FusedIterator;
use tracing::debug;

/// Marker stored instead of a value when the calculator divided by zero.
pub const ZERO_DIVISION_SENTINEL: &str = "ZeroDivisionError";

const OPERAND_DIGITS: u32 = 2;
const SMALL_OPERAND_DIGITS: u32 = 1;
const SMALL_OPERAND_PERIOD: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Value(Decimal),
    ZeroDivisionError,
}

impl Expected {
    /// Whether `outcome` is what this expectation describes.
    pub fn matches(&self, outcome: &Result<Decimal, CalcError>) -> bool {
        match (self, outcome) {
            (Expected::Value(want), Ok(got)) => want == got,
            (Expected::ZeroDivisionError, Err(CalcError::DivisionByZero)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expected::Value(value) => write!(f, "{}", value),
            Expected::ZeroDivisionError => f.write_str(ZERO_DIVISION_SENTINEL),
        }
    }
}

impl Serialize for Expected {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TestRecord {
    pub index: usize,
    pub a: Decimal,
    pub b: Decimal,
    pub operation: Operation,
    pub expected: Expected,
}

impl TestRecord {
    pub fn operation_name(&self) -> &'static str {
        self.operation.name()
    }

    pub fn operation_fn(&self) -> OperationFn {
        self.operation.function()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Replace a zero divisor with one before dividing. When off, a zero
    /// draw reaches `divide` and the record expects the sentinel.
    pub substitute_zero_divisor: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            substitute_zero_divisor: true,
        }
    }
}

/// Digit width `b` is drawn with at `index`.
pub fn second_operand_digits(index: usize) -> u32 {
    if index % SMALL_OPERAND_PERIOD == SMALL_OPERAND_PERIOD - 1 {
        SMALL_OPERAND_DIGITS
    } else {
        OPERAND_DIGITS
    }
}

/// Computes the record for already drawn operands and operation.
pub fn build_record(
    index: usize,
    a: Decimal,
    b: Decimal,
    operation: Operation,
    options: GeneratorOptions,
) -> Result<TestRecord, Error> {
    let b = if operation == Operation::Divide && b.is_zero() && options.substitute_zero_divisor {
        debug!(index, "zero divisor drawn, substituting one");
        Decimal::ONE
    } else {
        b
    };

    let expected = match operation.apply(a, b) {
        Ok(value) => Expected::Value(value),
        Err(CalcError::DivisionByZero) => {
            debug!(index, %a, "division by zero recorded as sentinel");
            Expected::ZeroDivisionError
        }
        Err(error) => return Err(Error::Calc { index, error }),
    };

    Ok(TestRecord {
        index,
        a,
        b,
        operation,
        expected,
    })
}

/// Lazy, finite sequence of exactly `count` records.
#[derive(Debug)]
pub struct Records<'a, R: ?Sized> {
    rng: &'a mut R,
    next_index: usize,
    count: usize,
    options: GeneratorOptions,
}

impl<'a, R: Rng + ?Sized> Records<'a, R> {
    fn draw(&mut self, index: usize) -> Result<TestRecord, Error> {
        let a = Decimal::from(random_number(&mut *self.rng, OPERAND_DIGITS));
        let b = Decimal::from(random_number(&mut *self.rng, second_operand_digits(index)));
        let operation = random_element(&mut *self.rng, &Operation::ALL)
            .copied()
            .ok_or_else(|| Error::from("no operations to choose from".to_string()))?;
        build_record(index, a, b, operation, self.options)
    }
}

impl<'a, R: Rng + ?Sized> Iterator for Records<'a, R> {
    type Item = Result<TestRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.count {
            return None;
        }
        let index = self.next_index;
        self.next_index += 1;
        Some(self.draw(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next_index;
        (remaining, Some(remaining))
    }
}

impl<'a, R: Rng + ?Sized> ExactSizeIterator for Records<'a, R> {}

impl<'a, R: Rng + ?Sized> FusedIterator for Records<'a, R> {}

/// Generates `count` records with the default options.
pub fn generate_test_data<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Records<'_, R> {
    generate_with_options(rng, count, GeneratorOptions::default())
}

pub fn generate_with_options<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    options: GeneratorOptions,
) -> Records<'_, R> {
    Records {
        rng,
        next_index: 0,
        count,
        options,
    }
}

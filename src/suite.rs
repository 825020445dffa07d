//! The calculator tests fed by generated records.

use crate::calculator::{add, divide, multiply, subtract, Operation};
use crate::error::CalcError;
use crate::generator::{second_operand_digits, Expected};
use crate::params::{FunctionCase, NamedCase, Suite};
use rust_decimal::Decimal;

fn digit_limit(digits: u32) -> Decimal {
    Decimal::from(10u64.pow(digits) - 1)
}

fn describe(outcome: &Result<Decimal, CalcError>) -> String {
    match outcome {
        Ok(value) => value.to_string(),
        Err(e) => e.to_string(),
    }
}

pub fn test_operation(case: &FunctionCase) -> Result<(), String> {
    let outcome = (case.operation)(case.a, case.b);
    if case.expected.matches(&outcome) {
        Ok(())
    } else {
        Err(format!(
            "operation({}, {}) gave {}, expected {}",
            case.a,
            case.b,
            describe(&outcome),
            case.expected
        ))
    }
}

pub fn test_operation_name(case: &NamedCase) -> Result<(), String> {
    let operation: Operation = case.operation.parse()?;
    let outcome = operation.apply(case.a, case.b);
    if case.expected.matches(&outcome) {
        Ok(())
    } else {
        Err(format!(
            "{}({}, {}) gave {}, expected {}",
            case.operation,
            case.a,
            case.b,
            describe(&outcome),
            case.expected
        ))
    }
}

pub fn test_operand_ranges(case: &NamedCase) -> Result<(), String> {
    let a_limit = digit_limit(2);
    let b_limit = digit_limit(second_operand_digits(case.index));
    if case.a.is_sign_negative() || case.a > a_limit {
        return Err(format!("a = {} outside 0..={}", case.a, a_limit));
    }
    if case.b.is_sign_negative() || case.b > b_limit {
        return Err(format!("b = {} outside 0..={} at index {}", case.b, b_limit, case.index));
    }
    Ok(())
}

pub fn test_zero_divisor_handling(case: &NamedCase) -> Result<(), String> {
    if case.operation != Operation::Divide.name() {
        return Ok(());
    }
    match (case.b.is_zero(), case.expected) {
        (true, Expected::ZeroDivisionError) | (false, Expected::Value(_)) => Ok(()),
        (true, Expected::Value(v)) => Err(format!("divided {} by zero yet expected {}", case.a, v)),
        (false, Expected::ZeroDivisionError) => {
            Err(format!("sentinel expected for nonzero divisor {}", case.b))
        }
    }
}

fn check(got: Result<Decimal, CalcError>, want: Result<Decimal, CalcError>) -> Result<(), String> {
    if got == want {
        Ok(())
    } else {
        Err(format!("got {}, expected {}", describe(&got), describe(&want)))
    }
}

pub fn test_add() -> Result<(), String> {
    check(add(Decimal::from(12), Decimal::from(7)), Ok(Decimal::from(19)))
}

pub fn test_subtract() -> Result<(), String> {
    check(subtract(Decimal::from(7), Decimal::from(12)), Ok(Decimal::from(-5)))
}

pub fn test_multiply() -> Result<(), String> {
    check(multiply(Decimal::from(12), Decimal::from(7)), Ok(Decimal::from(84)))
}

pub fn test_divide() -> Result<(), String> {
    check(divide(Decimal::from(84), Decimal::from(7)), Ok(Decimal::from(12)))
}

pub fn test_divide_by_zero() -> Result<(), String> {
    check(divide(Decimal::from(5), Decimal::ZERO), Err(CalcError::DivisionByZero))
}

pub fn calculator_suite() -> Suite {
    Suite::new()
        .plain("test_add", test_add)
        .plain("test_subtract", test_subtract)
        .plain("test_multiply", test_multiply)
        .plain("test_divide", test_divide)
        .plain("test_divide_by_zero", test_divide_by_zero)
        .by_function("test_operation", test_operation)
        .by_name("test_operation_name", test_operation_name)
        .by_name("test_operand_ranges", test_operand_ranges)
        .by_name("test_zero_divisor_handling", test_zero_divisor_handling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::generator::GeneratorOptions;
    use crate::rng::RecordRng;
    use rust_decimal_macros::dec;

    #[test]
    fn whole_suite_passes_for_many_seeds() {
        let suite = calculator_suite();
        for seed in 0..20 {
            let config = Config {
                num_records: 40,
                seed: Some(seed),
                ..Config::default()
            };
            let report = suite.run(&config, &mut config.rng()).unwrap();
            assert!(report.success(), "seed {} failed:\n{}", seed, report);
            assert_eq!(report.outcomes.len(), 5 + 4 * 40);
        }
    }

    #[test]
    fn suite_passes_without_zero_substitution() {
        let config = Config {
            num_records: 200,
            seed: Some(4),
            generator: GeneratorOptions {
                substitute_zero_divisor: false,
            },
        };
        let report = calculator_suite().run(&config, &mut config.rng()).unwrap();
        assert!(report.success(), "{}", report);
    }

    #[test]
    fn mismatch_is_a_failure() {
        let case = FunctionCase {
            index: 0,
            a: dec!(12),
            b: dec!(7),
            operation: add,
            expected: Expected::Value(dec!(20)),
        };
        let err = test_operation(&case).unwrap_err();
        assert_eq!(err, "operation(12, 7) gave 19, expected 20");
    }

    #[test]
    fn unknown_operation_name_fails() {
        let case = NamedCase {
            index: 0,
            a: dec!(1),
            b: dec!(1),
            operation: "modulo",
            expected: Expected::Value(dec!(0)),
        };
        assert_eq!(test_operation_name(&case), Err("unknown operation 'modulo'".to_string()));
    }

    #[test]
    fn wide_b_on_fourth_record_fails() {
        let case = NamedCase {
            index: 3,
            a: dec!(1),
            b: dec!(10),
            operation: "add",
            expected: Expected::Value(dec!(11)),
        };
        assert!(test_operand_ranges(&case).is_err());
        let case = NamedCase { index: 2, ..case };
        assert!(test_operand_ranges(&case).is_ok());
    }

    #[test]
    fn zero_divisor_needs_sentinel() {
        let case = NamedCase {
            index: 0,
            a: dec!(8),
            b: dec!(0),
            operation: "divide",
            expected: Expected::Value(dec!(8)),
        };
        assert!(test_zero_divisor_handling(&case).is_err());
        let case = NamedCase {
            expected: Expected::ZeroDivisionError,
            ..case
        };
        assert!(test_zero_divisor_handling(&case).is_ok());
    }

    #[test]
    fn plain_checks_pass() {
        for body in [test_add, test_subtract, test_multiply, test_divide, test_divide_by_zero].iter() {
            assert_eq!(body(), Ok(()));
        }
    }
}

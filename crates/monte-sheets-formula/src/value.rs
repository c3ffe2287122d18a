//! Value model: sample vectors and their broadcasting arithmetic
//!
//! All numeric values are vectors of samples. A scalar is a vector of length
//! one; a Monte Carlo draw is a vector of length [`crate::functions::SAMPLE_COUNT`].
//! Binary arithmetic is element-wise with length-1 broadcasting.

use crate::ast::{BinaryOperator, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};

/// A vector of samples. Length 1 represents a scalar.
pub type Samples = Vec<f64>;

/// A fully evaluated cell value.
///
/// `Empty` is the distinguished blank for cells with no formula text;
/// `Error` carries the rendered message of a failed evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Empty,
    Samples(Samples),
    Text(String),
    Error(String),
}

impl Value {
    /// Create a scalar value (length-1 sample vector)
    pub fn scalar(n: f64) -> Self {
        Value::Samples(vec![n])
    }

    /// The sample vector, if this is a numeric value
    pub fn as_samples(&self) -> Option<&[f64]> {
        match self {
            Value::Samples(v) => Some(v),
            _ => None,
        }
    }

    /// Whether this value is an evaluation error
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Arithmetic mean of the samples, if numeric and non-empty
    pub fn mean(&self) -> Option<f64> {
        match self {
            Value::Samples(v) if !v.is_empty() => {
                Some(v.iter().sum::<f64>() / v.len() as f64)
            }
            _ => None,
        }
    }
}

/// Apply a binary operator element-wise over two sample vectors.
///
/// Broadcasting: a length-1 operand expands against the other operand's
/// length; equal lengths pair element-wise; anything else is a
/// [`FormulaError::MismatchedLengths`] error. Division by zero follows IEEE
/// float semantics and is not an error.
pub fn apply_binary(op: BinaryOperator, left: &[f64], right: &[f64]) -> FormulaResult<Samples> {
    if left.len() == 1 {
        let l = left[0];
        return Ok(right.iter().map(|&r| apply_binary_single(op, l, r)).collect());
    }
    if right.len() == 1 {
        let r = right[0];
        return Ok(left.iter().map(|&l| apply_binary_single(op, l, r)).collect());
    }
    if left.len() == right.len() {
        return Ok(left
            .iter()
            .zip(right)
            .map(|(&l, &r)| apply_binary_single(op, l, r))
            .collect());
    }
    Err(FormulaError::MismatchedLengths {
        left: left.len(),
        right: right.len(),
    })
}

fn apply_binary_single(op: BinaryOperator, left: f64, right: f64) -> f64 {
    match op {
        BinaryOperator::Add => left + right,
        BinaryOperator::Subtract => left - right,
        BinaryOperator::Multiply => left * right,
        BinaryOperator::Divide => left / right,
    }
}

/// Apply a unary operator over all elements, preserving length.
pub fn apply_unary(op: UnaryOperator, operand: &[f64]) -> Samples {
    match op {
        UnaryOperator::Negate => operand.iter().map(|&v| -v).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scalar_scalar() {
        assert_eq!(
            apply_binary(BinaryOperator::Add, &[1.0], &[2.0]).unwrap(),
            vec![3.0]
        );
        assert_eq!(
            apply_binary(BinaryOperator::Divide, &[7.0], &[2.0]).unwrap(),
            vec![3.5]
        );
    }

    #[test]
    fn test_broadcast_left_scalar() {
        assert_eq!(
            apply_binary(BinaryOperator::Subtract, &[10.0], &[1.0, 2.0, 3.0]).unwrap(),
            vec![9.0, 8.0, 7.0]
        );
    }

    #[test]
    fn test_broadcast_right_scalar() {
        assert_eq!(
            apply_binary(BinaryOperator::Multiply, &[1.0, 2.0, 3.0], &[2.0]).unwrap(),
            vec![2.0, 4.0, 6.0]
        );
    }

    #[test]
    fn test_elementwise_equal_lengths() {
        assert_eq!(
            apply_binary(BinaryOperator::Add, &[1.0, 2.0], &[10.0, 20.0]).unwrap(),
            vec![11.0, 22.0]
        );
    }

    #[test]
    fn test_mismatched_lengths() {
        let err = apply_binary(BinaryOperator::Add, &[1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            FormulaError::MismatchedLengths { left: 2, right: 3 }
        ));
    }

    #[test]
    fn test_division_by_zero_is_not_an_error() {
        let result = apply_binary(BinaryOperator::Divide, &[1.0, -1.0, 0.0], &[0.0]).unwrap();
        assert_eq!(result[0], f64::INFINITY);
        assert_eq!(result[1], f64::NEG_INFINITY);
        assert!(result[2].is_nan());
    }

    #[test]
    fn test_unary_negate_preserves_length() {
        assert_eq!(
            apply_unary(UnaryOperator::Negate, &[1.0, -2.0, 3.0]),
            vec![-1.0, 2.0, -3.0]
        );
    }

    #[test]
    fn test_value_mean() {
        assert_eq!(Value::Samples(vec![1.0, 2.0, 3.0]).mean(), Some(2.0));
        assert_eq!(Value::scalar(5.0).mean(), Some(5.0));
        assert_eq!(Value::Empty.mean(), None);
        assert_eq!(Value::Text("x".into()).mean(), None);
    }
}

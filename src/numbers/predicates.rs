//! Arithmetic predicates
//!
//! Pure functions over `i64`. Primality, perfection, Armstrong and digit sum
//! work on the magnitude of the input; parity uses the signed value.

use serde::Serialize;
use std::fmt;

/// Property tag reported in the `properties` array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    Armstrong,
    Even,
    Odd,
}

impl Property {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Armstrong => "armstrong",
            Self::Even => "even",
            Self::Odd => "odd",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trial division by odd candidates up to `isqrt(n)`
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let magnitude = n.unsigned_abs();
    let limit = magnitude.isqrt();
    (3..=limit).step_by(2).all(|d| magnitude % d != 0)
}

/// Sum of proper divisors equals the magnitude.
///
/// Divisors are collected in pairs `(d, m / d)` so the scan stops at
/// `isqrt(m)`. Divisibility ignores sign, which makes `-6` perfect as well.
pub fn is_perfect(n: i64) -> bool {
    let magnitude = n.unsigned_abs();
    if magnitude < 2 {
        return false;
    }

    let mut sum: u128 = 1;
    let limit = magnitude.isqrt();
    for d in 2..=limit {
        if magnitude % d == 0 {
            sum += u128::from(d);
            let pair = magnitude / d;
            if pair != d {
                sum += u128::from(pair);
            }
        }
    }

    sum == u128::from(magnitude)
}

/// Each digit raised to the digit count sums back to the number
pub fn is_armstrong(n: i64) -> bool {
    let magnitude = n.unsigned_abs();
    let digits = decimal_digits(magnitude);
    // At most 20 digits, always fits
    let power = u32::try_from(digits.len()).unwrap_or(u32::MAX);

    let sum: u128 = digits.iter().map(|&d| u128::from(d).pow(power)).sum();
    sum == u128::from(magnitude)
}

/// Armstrong tag first when it applies, then exactly one parity tag
pub fn number_properties(n: i64) -> Vec<Property> {
    let mut properties = Vec::with_capacity(2);
    if is_armstrong(n) {
        properties.push(Property::Armstrong);
    }
    if n % 2 == 0 {
        properties.push(Property::Even);
    } else {
        properties.push(Property::Odd);
    }
    properties
}

pub fn digit_sum(n: i64) -> u32 {
    decimal_digits(n.unsigned_abs())
        .into_iter()
        .map(u32::from)
        .sum()
}

fn decimal_digits(magnitude: u64) -> Vec<u8> {
    magnitude.to_string().bytes().map(|b| b - b'0').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_nontrivial_divisor(n: i64) -> bool {
        (2..n).any(|d| n % d == 0)
    }

    #[test]
    fn test_prime_matches_naive_divisor_scan() {
        for n in 3..2_000 {
            assert_eq!(is_prime(n), !has_nontrivial_divisor(n), "n = {n}");
        }
    }

    #[test]
    fn test_prime_small_and_negative() {
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(1));
        assert!(!is_prime(0));
        assert!(!is_prime(-5));
        assert!(!is_prime(-2));
        assert!(!is_prime(i64::MIN));
    }

    #[test]
    fn test_prime_squares_of_primes() {
        // The bound must be inclusive
        assert!(!is_prime(9));
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(!is_prime(1_000_003 * 1_000_003));
        assert!(is_prime(1_000_003));
    }

    #[test]
    fn test_perfect_numbers() {
        assert!(is_perfect(6));
        assert!(is_perfect(28));
        assert!(is_perfect(496));
        assert!(is_perfect(8128));
        assert!(is_perfect(33_550_336));
        assert!(!is_perfect(10));
        assert!(!is_perfect(12));
        assert!(!is_perfect(2));
    }

    #[test]
    fn test_perfect_degenerate_inputs() {
        assert!(!is_perfect(0));
        assert!(!is_perfect(1));
        assert!(!is_perfect(-1));
    }

    #[test]
    fn test_perfect_ignores_sign() {
        assert!(is_perfect(-6));
        assert!(is_perfect(-28));
        assert!(!is_perfect(-10));
    }

    #[test]
    fn test_perfect_square_divisor_counted_once() {
        // 16: 1 + 2 + 4 + 8 = 15
        assert!(!is_perfect(16));
    }

    #[test]
    fn test_armstrong_numbers() {
        for n in [0, 1, 9, 153, 370, 371, 407, 1634, 8208, 9474] {
            assert!(is_armstrong(n), "n = {n}");
        }
        assert!(is_armstrong(-153));
        assert!(!is_armstrong(10));
        assert!(!is_armstrong(100));
        assert!(!is_armstrong(154));
    }

    #[test]
    fn test_armstrong_extreme_magnitudes() {
        assert!(!is_armstrong(i64::MAX));
        assert!(!is_armstrong(i64::MIN));
        assert!(is_armstrong(4_679_307_774));
    }

    #[test]
    fn test_number_properties() {
        assert_eq!(number_properties(28), vec![Property::Even]);
        // Single digits are their own first power
        assert_eq!(
            number_properties(4),
            vec![Property::Armstrong, Property::Even]
        );
        assert_eq!(
            number_properties(153),
            vec![Property::Armstrong, Property::Odd]
        );
        assert_eq!(
            number_properties(-371),
            vec![Property::Armstrong, Property::Odd]
        );
        assert_eq!(number_properties(-10), vec![Property::Even]);
        assert_eq!(number_properties(-7), vec![Property::Armstrong, Property::Odd]);
        assert_eq!(number_properties(11), vec![Property::Odd]);
    }

    #[test]
    fn test_digit_sum() {
        assert_eq!(digit_sum(371), 11);
        assert_eq!(digit_sum(-371), 11);
        assert_eq!(digit_sum(0), 0);
        assert_eq!(digit_sum(i64::MIN), 89);
    }

    #[test]
    fn test_property_serializes_lowercase() {
        let json = serde_json::to_string(&[Property::Armstrong, Property::Odd]).unwrap();
        assert_eq!(json, r#"["armstrong","odd"]"#);
        assert_eq!(Property::Even.to_string(), "even");
    }
}

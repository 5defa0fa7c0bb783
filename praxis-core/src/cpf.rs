//! CPF check-digit validation.
//!
//! A CPF is an 11-digit identifier whose last two digits are check digits
//! derived from the preceding ones with a modulo-11 weighted sum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of digits in a CPF.
pub const CPF_LEN: usize = 11;

/// Positions (0-indexed) of the two check digits.
const CHECK_POSITIONS: [usize; 2] = [9, 10];

/// Returns `true` if `input` is a structurally valid CPF.
///
/// Non-digit characters are ignored, so `"111.444.777-35"` and
/// `"11144477735"` are equivalent. Never panics.
#[must_use]
pub fn validate(input: &str) -> bool {
    Cpf::parse(input).is_ok()
}

/// Computes the check digit expected at `position` from the digits before it.
///
/// The weight of the digit at index `i` is `position + 1 - i`; the result is
/// `((sum * 10) mod 11) mod 10`.
///
/// Returns `None` if `digits` has fewer than `position` entries or any entry
/// is not a decimal digit value.
#[must_use]
pub fn check_digit(digits: &[u8], position: usize) -> Option<u8> {
    let prefix = digits.get(..position)?;
    if prefix.iter().any(|d| *d > 9) {
        return None;
    }
    let sum: usize = prefix
        .iter()
        .enumerate()
        .map(|(i, d)| usize::from(*d) * (position + 1 - i))
        .sum();
    u8::try_from((sum * 10) % 11 % 10).ok()
}

/// A validated CPF holding its 11 digits.
///
/// Only constructible through [`Cpf::parse`], so every value satisfies the
/// length, repetition and check-digit rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf([u8; CPF_LEN]);

impl Cpf {
    /// Parses and validates a CPF, ignoring any non-digit separators.
    ///
    /// # Errors
    /// - [`CoreError::WrongLength`] if there are not exactly 11 digits.
    /// - [`CoreError::RepeatedDigits`] if all digits are identical.
    /// - [`CoreError::CheckDigitMismatch`] if either check digit is wrong.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let cleaned: Vec<u8> = input
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();

        let digits: [u8; CPF_LEN] = cleaned
            .as_slice()
            .try_into()
            .map_err(|_| CoreError::WrongLength { found: cleaned.len() })?;

        if digits.iter().all(|d| *d == digits[0]) {
            return Err(CoreError::RepeatedDigits);
        }

        for position in CHECK_POSITIONS {
            let expected =
                check_digit(&digits, position).ok_or(CoreError::WrongLength { found: CPF_LEN })?;
            let found = digits[position];
            if expected != found {
                return Err(CoreError::CheckDigitMismatch { position, expected, found });
            }
        }

        Ok(Self(digits))
    }

    /// Returns the bare 11-digit string, e.g. `"11144477735"`.
    #[must_use]
    pub fn digits(&self) -> String {
        self.0.iter().map(|d| char::from(b'0' + d)).collect()
    }
}

impl FromStr for Cpf {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cpf {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cpf> for String {
    fn from(cpf: Cpf) -> Self {
        cpf.digits()
    }
}

/// Formats as the canonical mask `XXX.XXX.XXX-XX`.
impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.digits();
        write!(f, "{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_known_valid_cpf_accepts() {
        assert!(validate("11144477735"));
        assert!(validate("529.982.247-25"));
    }

    #[test]
    fn validate_repeated_digits_rejects() {
        for d in 0..=9u8 {
            let s: String = std::iter::repeat(char::from(b'0' + d)).take(11).collect();
            assert!(!validate(&s), "{s} must be rejected");
        }
    }

    #[test]
    fn validate_wrong_check_digit_rejects() {
        assert!(!validate("11144477734"));
        assert!(!validate("11144477725"));
    }

    #[test]
    fn validate_empty_and_garbage_rejects() {
        assert!(!validate(""));
        assert!(!validate("abc"));
        assert!(!validate("1114447773"));
        assert!(!validate("111444777350"));
    }

    #[test]
    fn parse_reports_wrong_length() {
        assert_eq!(Cpf::parse("123"), Err(CoreError::WrongLength { found: 3 }));
    }

    #[test]
    fn parse_reports_repeated_digits() {
        assert_eq!(Cpf::parse("000.000.000-00"), Err(CoreError::RepeatedDigits));
    }

    #[test]
    fn parse_reports_second_check_digit_mismatch() {
        assert_eq!(
            Cpf::parse("11144477736"),
            Err(CoreError::CheckDigitMismatch { position: 10, expected: 5, found: 6 })
        );
    }

    #[test]
    fn display_uses_canonical_mask() {
        let cpf = match Cpf::parse("11144477735") {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(cpf.to_string(), "111.444.777-35");
        assert_eq!(cpf.digits(), "11144477735");
    }

    #[test]
    fn check_digit_matches_known_values() {
        let digits = [1, 1, 1, 4, 4, 4, 7, 7, 7, 3];
        assert_eq!(check_digit(&digits, 9), Some(3));
        assert_eq!(check_digit(&digits, 10), Some(5));
    }

    #[test]
    fn check_digit_short_input_returns_none() {
        assert_eq!(check_digit(&[1, 2, 3], 9), None);
    }

    #[test]
    fn cpf_serializes_as_bare_digits() {
        let cpf: Cpf = match "111.444.777-35".parse() {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        let json = match serde_json::to_string(&cpf) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert_eq!(json, "\"11144477735\"");
        assert!(serde_json::from_str::<Cpf>("\"11144477736\"").is_err());
    }

    proptest::proptest! {
        #[test]
        fn proptest_validate_rejects_any_length_other_than_eleven(
            digits in "[0-9]{0,30}",
        ) {
            proptest::prop_assume!(digits.len() != CPF_LEN);
            proptest::prop_assert!(!validate(&digits));
        }

        #[test]
        fn proptest_validate_is_deterministic(input in ".{0,40}") {
            proptest::prop_assert_eq!(validate(&input), validate(&input));
        }

        #[test]
        fn proptest_separators_do_not_change_verdict(
            digits in "[0-9]{11}",
            sep in "[ .\\-/]{0,3}",
        ) {
            let masked = format!(
                "{}{sep}{}{sep}{}{sep}{}",
                &digits[0..3], &digits[3..6], &digits[6..9], &digits[9..11]
            );
            proptest::prop_assert_eq!(validate(&masked), validate(&digits));
        }

        #[test]
        fn proptest_computed_check_digits_always_validate(
            body in proptest::collection::vec(0u8..10, 9),
        ) {
            proptest::prop_assume!(body.iter().any(|d| *d != body[0]));
            let mut digits = body.clone();
            let first = check_digit(&digits, 9).unwrap_or_default();
            digits.push(first);
            let second = check_digit(&digits, 10).unwrap_or_default();
            digits.push(second);
            let s: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
            proptest::prop_assert!(validate(&s), "{} must validate", s);
        }
    }
}

/// Errors produced by the `praxis-core` crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// The input did not contain exactly 11 digits once separators were stripped.
    #[error("invalid cpf: expected 11 digits, found {found}")]
    WrongLength { found: usize },

    /// All 11 digits are the same (e.g. `00000000000`).
    #[error("invalid cpf: all digits are identical")]
    RepeatedDigits,

    /// A computed check digit disagrees with the digit present in the input.
    #[error("invalid cpf: check digit at position {position} is {found}, expected {expected}")]
    CheckDigitMismatch { position: usize, expected: u8, found: u8 },

    /// A car was constructed or updated with an empty license plate.
    #[error("license plate cannot be empty")]
    EmptyLicensePlate,
}

#![forbid(unsafe_code)]

//! Division problem value type and its construction invariants.
//!
//! A [`Problem`] is immutable once built. Construction computes the
//! quotient and remainder and rejects inputs that violate the model
//! invariants, so every downstream component may assume:
//!
//! - `divisor >= 1`
//! - `dividend >= divisor`
//! - `dividend == divisor * quotient + remainder`
//! - `0 <= remainder < divisor`
//!
//! # Example
//!
//! ```
//! use longhand_core::Problem;
//!
//! let p = Problem::new(87, 4).unwrap();
//! assert_eq!(p.quotient(), 21);
//! assert_eq!(p.remainder(), 3);
//! assert_eq!(p.dividend_digits(), vec![8, 7]);
//! ```

use std::fmt;

/// Opaque identity for one generated problem.
///
/// Timers scheduled by the typing engine are keyed by `(ProblemId, StepId)`
/// so that a problem change deterministically invalidates stale timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct ProblemId(u64);

impl ProblemId {
    /// Create an id from a raw value supplied by the problem generator.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw value for storage or logging.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// What the external difficulty generator chose for this problem.
///
/// Recorded on the problem so collaborators (persistence, progression
/// tracking) can reason about it without re-deriving digit shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyMeta {
    /// Number of digits in the dividend.
    pub dividend_digits: u8,
    /// Number of digits in the divisor.
    pub divisor_digits: u8,
    /// Whether the leading dividend digit(s) alone are smaller than the
    /// divisor, forcing one or more opening bring-down steps.
    pub has_leading_bring_down: bool,
    /// Whether the quotient contains a zero digit (which still gets its
    /// full multiply/subtract round).
    pub has_zero_quotient_digit: bool,
    /// Whether the division leaves a non-zero remainder.
    pub has_remainder: bool,
}

/// Errors from [`Problem::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemError {
    /// Divisor was zero.
    ZeroDivisor,
    /// Dividend was smaller than the divisor, so the quotient would be zero.
    DividendTooSmall { dividend: u64, divisor: u64 },
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDivisor => write!(f, "divisor must be at least 1"),
            Self::DividendTooSmall { dividend, divisor } => {
                write!(f, "dividend {dividend} is smaller than divisor {divisor}")
            }
        }
    }
}

impl std::error::Error for ProblemError {}

/// An immutable long-division problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Problem {
    dividend: u64,
    divisor: u64,
    quotient: u64,
    remainder: u64,
    difficulty: DifficultyMeta,
}

impl Problem {
    /// Build a problem, deriving quotient, remainder, and difficulty
    /// metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::ZeroDivisor`] if `divisor == 0` and
    /// [`ProblemError::DividendTooSmall`] if `dividend < divisor`.
    pub fn new(dividend: u64, divisor: u64) -> Result<Self, ProblemError> {
        if divisor == 0 {
            return Err(ProblemError::ZeroDivisor);
        }
        if dividend < divisor {
            return Err(ProblemError::DividendTooSmall { dividend, divisor });
        }
        let quotient = dividend / divisor;
        let remainder = dividend % divisor;
        let difficulty = DifficultyMeta {
            dividend_digits: digit_count(dividend),
            divisor_digits: digit_count(divisor),
            has_leading_bring_down: leading_digit(dividend) < divisor,
            has_zero_quotient_digit: digits_of(quotient).contains(&0),
            has_remainder: remainder != 0,
        };
        Ok(Self {
            dividend,
            divisor,
            quotient,
            remainder,
            difficulty,
        })
    }

    /// The dividend (the number being divided).
    #[inline]
    pub fn dividend(&self) -> u64 {
        self.dividend
    }

    /// The divisor.
    #[inline]
    pub fn divisor(&self) -> u64 {
        self.divisor
    }

    /// The whole-number quotient.
    #[inline]
    pub fn quotient(&self) -> u64 {
        self.quotient
    }

    /// The remainder, always in `0..divisor`.
    #[inline]
    pub fn remainder(&self) -> u64 {
        self.remainder
    }

    /// What the difficulty generator chose.
    #[inline]
    pub fn difficulty(&self) -> DifficultyMeta {
        self.difficulty
    }

    /// Dividend digits, most significant first.
    pub fn dividend_digits(&self) -> Vec<u8> {
        digits_of(self.dividend)
    }
}

/// Base-10 digits of `value`, most significant first. `0` yields `[0]`.
pub(crate) fn digits_of(value: u64) -> Vec<u8> {
    if value == 0 {
        return vec![0];
    }
    let mut digits = Vec::new();
    let mut v = value;
    while v > 0 {
        digits.push((v % 10) as u8);
        v /= 10;
    }
    digits.reverse();
    digits
}

fn digit_count(value: u64) -> u8 {
    digits_of(value).len() as u8
}

fn leading_digit(value: u64) -> u64 {
    let mut v = value;
    while v >= 10 {
        v /= 10;
    }
    v
}

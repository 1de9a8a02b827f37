use std::str::FromStr;

use crate::error::SplineError;

/// Behaviour of spline evaluation outside the fitted domain.
///
/// Modes can be selected by their symbolic name or by the numeric codes
/// `0..=3`.
/// # Example
/// ```
/// use interp_spline::Extrapolation;
///
/// assert_eq!(Ok(Extrapolation::Const), "const".parse());
/// assert_eq!(Extrapolation::Zeros, Extrapolation::from_code(1).unwrap());
/// assert!("bogus".parse::<Extrapolation>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolation {
    /// Extend the boundary basis polynomials beyond the domain.
    #[default]
    Extrapolate,
    /// Return 0.0 for points outside the domain.
    Zeros,
    /// Fail with an out-of-domain error for points outside the domain.
    Raise,
    /// Clamp to the spline value at the nearest domain boundary.
    Const,
}

impl Extrapolation {
    /// Resolves a numeric mode code.
    /// # Errors
    /// Codes outside `0..=3` fail with
    /// [SplineError::UnknownExtrapolationMode].
    pub fn from_code(code: i64) -> Result<Self, SplineError> {
        match code {
            0 => Ok(Self::Extrapolate),
            1 => Ok(Self::Zeros),
            2 => Ok(Self::Raise),
            3 => Ok(Self::Const),
            other => Err(SplineError::UnknownExtrapolationMode {
                mode: other.to_string(),
            }),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::Extrapolate => 0,
            Self::Zeros => 1,
            Self::Raise => 2,
            Self::Const => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Extrapolate => "extrapolate",
            Self::Zeros => "zeros",
            Self::Raise => "raise",
            Self::Const => "const",
        }
    }
}

impl FromStr for Extrapolation {
    type Err = SplineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "extrapolate" => Ok(Self::Extrapolate),
            "zeros" => Ok(Self::Zeros),
            "raise" => Ok(Self::Raise),
            "const" => Ok(Self::Const),
            other => Err(SplineError::UnknownExtrapolationMode {
                mode: other.to_string(),
            }),
        }
    }
}

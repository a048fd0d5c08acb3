/// Errors raised by the probability core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OddsError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("numerical instability: {0}")]
    NumericalInstability(String),

    #[error("insufficient data: need at least {needed} sample(s), got {got}")]
    InsufficientData { needed: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, OddsError>;

impl OddsError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        OddsError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Reject anything outside the closed unit interval (NaN included).
pub(crate) fn check_probability(name: &'static str, p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(OddsError::invalid(name, format!("{} is not in [0, 1]", p)))
    }
}

/// A usable standard deviation is finite and strictly positive.
///
/// Zero or non-finite values would make the normal model degenerate, so they
/// surface as [`OddsError::NumericalInstability`]; a negative value is a caller
/// mistake and surfaces as [`OddsError::InvalidParameter`].
pub(crate) fn check_sigma(sigma: f64) -> Result<()> {
    if !sigma.is_finite() || sigma == 0.0 {
        return Err(OddsError::NumericalInstability(format!(
            "standard deviation {} would produce a degenerate distribution",
            sigma
        )));
    }
    if sigma < 0.0 {
        return Err(OddsError::invalid(
            "sigma",
            format!("{} must be positive", sigma),
        ));
    }
    Ok(())
}

pub(crate) fn check_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(OddsError::NumericalInstability(format!(
            "{} is not finite ({})",
            name, value
        )))
    }
}

use anyhow::{bail, Result};

/// Threshold test for a risk bucket, parsed from strings such as `"<-2.0"`,
/// `">=0.9"` or `"0.5..0.7"` (inclusive).
#[derive(Debug, Clone, PartialEq)]
pub enum RangeOp {
    LessThan(f64),
    LessEqual(f64),
    GreaterThan(f64),
    GreaterEqual(f64),
    Equal(f64),
    Between(f64, f64),
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix(">=") {
            Ok(RangeOp::GreaterEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(RangeOp::LessEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('>') {
            Ok(RangeOp::GreaterThan(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('<') {
            Ok(RangeOp::LessThan(val.trim().parse()?))
        } else if let Some((low, high)) = s.split_once("..") {
            let low: f64 = low.trim().parse()?;
            let high: f64 = high.trim().parse()?;
            if low > high {
                bail!("Range start exceeds end: {}", s)
            }
            Ok(RangeOp::Between(low, high))
        } else {
            Ok(RangeOp::Equal(s.parse()?))
        }
    }

    pub fn matches(&self, value: f64) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::LessEqual(n) => value <= *n,
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::GreaterEqual(n) => value >= *n,
            RangeOp::Equal(n) => value == *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
        }
    }
}

/// Change applied to the running risk score when a bucket matches.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Add(f64),
    Multiply(f64),
}

impl Effect {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix('+') {
            Ok(Effect::Add(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix('x') {
            Ok(Effect::Multiply(val.trim().parse()?))
        } else {
            bail!("Effect must start with + or x: {}", s)
        }
    }

    pub fn apply(&self, score: f64) -> f64 {
        match self {
            Effect::Add(n) => score + n,
            Effect::Multiply(n) => score * n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_negative_threshold() {
        let range = RangeOp::parse("<-2.0").unwrap();
        assert_eq!(range, RangeOp::LessThan(-2.0));
        assert!(range.matches(-3.0));
        assert!(!range.matches(-2.0));
        assert!(!range.matches(0.0));
    }

    #[test]
    fn test_parse_range_less_equal() {
        let range = RangeOp::parse("<=0.5").unwrap();
        assert!(range.matches(0.5));
        assert!(!range.matches(0.51));
    }

    #[test]
    fn test_parse_range_greater() {
        assert!(RangeOp::parse(">1.3").unwrap().matches(1.31));
        assert!(!RangeOp::parse(">1.3").unwrap().matches(1.3));
        assert!(RangeOp::parse(">=1.3").unwrap().matches(1.3));
    }

    #[test]
    fn test_parse_range_between() {
        let range = RangeOp::parse("0.5..0.7").unwrap();
        assert!(range.matches(0.5));
        assert!(range.matches(0.6));
        assert!(range.matches(0.7));
        assert!(!range.matches(0.71));
        let negative = RangeOp::parse("-1.0..-0.5").unwrap();
        assert!(negative.matches(-0.75));
    }

    #[test]
    fn test_parse_range_rejects_reversed_and_garbage() {
        assert!(RangeOp::parse("0.7..0.5").is_err());
        assert!(RangeOp::parse("lots").is_err());
    }

    #[test]
    fn test_parse_range_equal() {
        let range = RangeOp::parse("0").unwrap();
        assert!(range.matches(0.0));
        assert!(!range.matches(0.1));
    }

    #[test]
    fn test_parse_effect_add() {
        assert_eq!(Effect::parse("+40").unwrap().apply(10.0), 50.0);
    }

    #[test]
    fn test_parse_effect_multiply() {
        assert_eq!(Effect::parse("x1.5").unwrap().apply(20.0), 30.0);
    }

    #[test]
    fn test_parse_effect_negative_add() {
        assert_eq!(Effect::parse("+-5").unwrap().apply(100.0), 95.0);
    }

    #[test]
    fn test_parse_effect_requires_operator() {
        assert!(Effect::parse("40").is_err());
    }
}

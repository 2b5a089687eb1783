use crate::SfError;

/// Floating point type used throughout system
pub type Real = f64;

/// Floor substituted for a near-zero discharge capacity.
pub const EPSILON_CAPACITY: Real = 1e-6;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, SfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SfError::NonFinite { what, value: v })
    }
}

/// Finite and not negative.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, SfError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(SfError::OutOfRange { what, value: v });
    }
    Ok(v)
}

/// Finite and strictly positive.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, SfError> {
    let v = ensure_finite(v, what)?;
    if v <= 0.0 {
        return Err(SfError::OutOfRange { what, value: v });
    }
    Ok(v)
}

/// Round to a whole count. Values that do not fit a `u32` are an error,
/// never a saturated count.
pub fn ensure_count(v: Real, what: &'static str) -> Result<u32, SfError> {
    let rounded = ensure_non_negative(v, what)?.round();
    if rounded > Real::from(u32::MAX) {
        return Err(SfError::OutOfRange { what, value: v });
    }
    Ok(rounded as u32)
}

/// Round to one decimal place, for reported percentages.
pub fn round1(v: Real) -> Real {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_non_negative_rejects_negative() {
        assert_eq!(ensure_non_negative(0.0, "x"), Ok(0.0));
        assert_eq!(
            ensure_non_negative(-1.0, "x"),
            Err(SfError::OutOfRange {
                what: "x",
                value: -1.0
            })
        );
    }

    #[test]
    fn ensure_positive_rejects_zero_and_infinity() {
        assert_eq!(ensure_positive(90.0, "x"), Ok(90.0));
        assert!(matches!(
            ensure_positive(0.0, "x"),
            Err(SfError::OutOfRange { .. })
        ));
        assert!(matches!(
            ensure_positive(Real::INFINITY, "x"),
            Err(SfError::NonFinite { .. })
        ));
    }

    #[test]
    fn ensure_count_rounds_and_refuses_overflow() {
        assert_eq!(ensure_count(2.5, "n"), Ok(3));
        assert_eq!(ensure_count(0.4, "n"), Ok(0));
        assert_eq!(ensure_count(Real::from(u32::MAX), "n"), Ok(u32::MAX));
        assert_eq!(
            ensure_count(1e12, "n"),
            Err(SfError::OutOfRange {
                what: "n",
                value: 1e12
            })
        );
        assert!(ensure_count(-1.0, "n").is_err());
    }

    #[test]
    fn round1_keeps_one_decimal() {
        assert_eq!(round1(12.345), 12.3);
        assert_eq!(round1(-4.06), -4.1);
    }
}

//! FormuLAW ID (FID) rendering.
//!
//! Every advocate gets a public identifier of the form `FID-IND-000042`,
//! rendered from a monotonically increasing sequence number.

/// Render a FID from its sequence number, zero-padded to six digits.
///
/// Numbers above 999999 widen the field rather than truncate.
pub fn format_fid(sequence: i64) -> String {
    format!("FID-IND-{sequence:06}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers_are_zero_padded() {
        assert_eq!(format_fid(1), "FID-IND-000001");
        assert_eq!(format_fid(42), "FID-IND-000042");
    }

    #[test]
    fn test_six_digit_boundary() {
        assert_eq!(format_fid(999_999), "FID-IND-999999");
    }

    #[test]
    fn test_overflow_widens_instead_of_truncating() {
        assert_eq!(format_fid(1_234_567), "FID-IND-1234567");
    }
}

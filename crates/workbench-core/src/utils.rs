//! Small numeric helpers shared across crates.

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Convert bytes to GB (2^30), rounded to 3 decimals.
#[allow(clippy::cast_precision_loss)] // Sizes stay far below 2^52 bytes
pub fn bytes_to_gb(bytes: u64) -> f64 {
    round3(bytes as f64 / BYTES_PER_GB)
}

/// Round to 3 decimal places.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_gb() {
        assert_eq!(bytes_to_gb(0), 0.0);
        assert_eq!(bytes_to_gb(1024 * 1024 * 1024), 1.0);
        assert_eq!(bytes_to_gb(1024), 0.0);
        // 1.5 GiB + a little
        assert_eq!(bytes_to_gb(1_610_612_736 + 1_000_000), 1.501);
    }
}

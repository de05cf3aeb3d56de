//! Time formatting helpers for notices and tooltips

/// Format seconds as `M:SS`
///
/// Fractional seconds are truncated; negative inputs clamp to `0:00`.
pub fn format_mm_ss(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let minutes = total / 60;
    let secs = total % 60;
    format!("{}:{:02}", minutes, secs)
}

/// Format a time range as `M:SS-M:SS`
pub fn format_range(start: f64, end: f64) -> String {
    format!("{}-{}", format_mm_ss(start), format_mm_ss(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mm_ss() {
        assert_eq!(format_mm_ss(0.0), "0:00");
        assert_eq!(format_mm_ss(9.9), "0:09");
        assert_eq!(format_mm_ss(65.0), "1:05");
        assert_eq!(format_mm_ss(600.0), "10:00");
        assert_eq!(format_mm_ss(-3.0), "0:00");
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(12.5, 72.0), "0:12-1:12");
    }
}

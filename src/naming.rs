//! Timestamped output file names.

use chrono::{DateTime, TimeZone};

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `base_YYYYMMDD_HHMMSS.extension` for the given instant.
pub fn timestamped_name_at<Tz>(base: &str, extension: &str, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{base}_{}.{extension}", at.format(TIMESTAMP_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Local, Utc};

    #[test]
    fn test_fixed_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(
            timestamped_name_at("median", "bmp", &at),
            "median_20240307_090502.bmp"
        );
    }

    #[test]
    fn test_offset_time_uses_wall_clock() {
        let east = FixedOffset::east_opt(3600).unwrap();
        let at = east.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(
            timestamped_name_at("grayscale", "bmp", &at),
            "grayscale_20241231_235959.bmp"
        );
    }

    #[test]
    fn test_local_name_shape() {
        let name = timestamped_name_at("laplacian", "bmp", &Local::now());
        let stamp = name
            .strip_prefix("laplacian_")
            .and_then(|s| s.strip_suffix(".bmp"))
            .unwrap();
        assert_eq!(stamp.len(), 15);
        assert_eq!(stamp.as_bytes()[8], b'_');
        assert!(stamp.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
    }
}

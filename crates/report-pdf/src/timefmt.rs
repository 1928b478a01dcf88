//! Date and timestamp formatting
//!
//! The formats here are the fixed ones the rest of the pipeline expects:
//! file names are sortable, header dates and capture timestamps use the
//! unpadded `M/D/YYYY` form the header renders.

use chrono::{DateTime, TimeZone};

/// Output filename for a generation run: `PDF_YYYYMMDD_HHMMSS.pdf`.
pub fn default_output_filename<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("PDF_%Y%m%d_%H%M%S.pdf").to_string()
}

/// Capture timestamp text for [`crate::ReportEntry::timestamp`]:
/// `M/D/YYYY, HH:MM`, 24-hour clock.
pub fn format_capture_timestamp<Tz: TimeZone>(when: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    when.format("%-m/%-d/%Y, %H:%M").to_string()
}

/// Header date fallback when no date was supplied: `M/D/YYYY`.
pub(crate) fn format_header_date<Tz: TimeZone>(when: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    when.format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_default_output_filename() {
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 14, 5, 9).unwrap();
        assert_eq!(default_output_filename(&now), "PDF_20250307_140509.pdf");
    }

    #[test]
    fn test_capture_timestamp_is_unpadded_date_padded_time() {
        let when = Utc.with_ymd_and_hms(2025, 3, 7, 8, 5, 0).unwrap();
        assert_eq!(format_capture_timestamp(&when), "3/7/2025, 08:05");
        let late = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 0).unwrap();
        assert_eq!(format_capture_timestamp(&late), "12/31/2025, 23:59");
    }

    #[test]
    fn test_header_date() {
        let when = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(format_header_date(&when), "1/2/2026");
    }
}

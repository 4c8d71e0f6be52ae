/// Small formatting helpers shared by the CLI and the TUI

use chrono::{DateTime, Local};

/// Lowercase hex encoding
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Replace every character with a bullet, for password fields
pub fn mask_secret(secret: &str) -> String {
    "•".repeat(secret.chars().count())
}

/// "Last updated" clock format
pub fn format_clock(at: &DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Capitalize the first letter ("running" -> "Running")
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(&[0x00, 0xab, 0xff]), "00abff");
        assert_eq!(to_hex(&[]), "");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("admin"), "•••••");
        assert_eq!(mask_secret(""), "");
    }

    #[test]
    fn test_format_clock() {
        let at = Local.with_ymd_and_hms(2025, 3, 1, 9, 5, 7).unwrap();
        assert_eq!(format_clock(&at), "09:05:07");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(78.94), "78.9%");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("critical"), "Critical");
        assert_eq!(capitalize(""), "");
    }
}

//! Helper functions for BSON value conversion

use mongodb::bson::{Binary, DateTime};

/// Convert DateTime to ISO 8601 string
///
/// # Arguments
/// * `dt` - BSON DateTime value
///
/// # Returns
/// ISO 8601 formatted string or timestamp fallback for out-of-range values
pub fn datetime_to_iso_string(dt: &DateTime) -> String {
    dt.try_to_rfc3339_string()
        .unwrap_or_else(|_| format!("{}", dt.timestamp_millis()))
}

/// Convert Binary data to hexadecimal string
pub fn binary_to_hex(bin: &Binary) -> String {
    hex::encode(&bin.bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::spec::BinarySubtype;

    #[test]
    fn test_datetime_to_iso_string() {
        let dt = DateTime::from_millis(1_704_067_200_000);
        assert!(datetime_to_iso_string(&dt).starts_with("2024-01-01T00:00:00"));
    }

    #[test]
    fn test_binary_to_hex() {
        let bin = Binary {
            subtype: BinarySubtype::Generic,
            bytes: vec![0x01, 0x02, 0x03, 0xff],
        };
        assert_eq!(binary_to_hex(&bin), "010203ff");
    }
}

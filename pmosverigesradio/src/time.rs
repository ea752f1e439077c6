//! Wire timestamp handling
//!
//! The API encodes instants as legacy .NET JSON date literals,
//! `"/Date(<milliseconds since epoch>)/"`.

use chrono::{DateTime, Local, TimeZone};

/// Sentinel returned when a wire timestamp cannot be rendered
pub const INVALID_START_TIME: &str = "Invalid start time";

/// Output format of [`normalize_start_time`]
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const WIRE_PREFIX: &str = "/Date(";
const WIRE_SUFFIX: &str = ")/";

/// Extract the millisecond payload of a `/Date(<ms>)/` literal
pub fn parse_wire_millis(raw: &str) -> Option<i64> {
    raw.strip_prefix(WIRE_PREFIX)?
        .strip_suffix(WIRE_SUFFIX)?
        .parse::<i64>()
        .ok()
}

/// Parse a wire timestamp into a local date-time, truncated to the second
///
/// Returns `None` when the wrapper is missing, the payload is not an integer
/// or the instant is outside the representable range.
pub fn parse_wire_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let millis = parse_wire_millis(raw)?;
    Local.timestamp_opt(millis.div_euclid(1000), 0).single()
}

/// Render a wire timestamp as local `YYYY-MM-DD HH:MM:SS`
///
/// Total over all inputs: anything unparseable yields [`INVALID_START_TIME`].
pub fn normalize_start_time(raw: &str) -> String {
    match parse_wire_timestamp(raw) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => {
            #[cfg(feature = "logging")]
            tracing::debug!(raw = %raw, "Unparseable start time");
            INVALID_START_TIME.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_local(secs: i64) -> String {
        Local
            .timestamp_opt(secs, 0)
            .single()
            .unwrap()
            .format(DISPLAY_FORMAT)
            .to_string()
    }

    #[test]
    fn test_valid_timestamps() {
        for millis in [0_i64, 1_704_067_200_000, 1_704_070_800_999, 1_700_000_000_123] {
            let raw = format!("/Date({})/", millis);
            assert_eq!(normalize_start_time(&raw), expected_local(millis / 1000));
        }
    }

    #[test]
    fn test_output_shape() {
        let out = normalize_start_time("/Date(1704067200000)/");
        assert_eq!(out.len(), 19);
        let bytes = out.as_bytes();
        assert_eq!(bytes[4], b'-');
        assert_eq!(bytes[7], b'-');
        assert_eq!(bytes[10], b' ');
        assert_eq!(bytes[13], b':');
        assert_eq!(bytes[16], b':');
    }

    #[test]
    fn test_negative_millis_floor() {
        // -1 ms is still the last second of 1969
        assert_eq!(normalize_start_time("/Date(-1)/"), expected_local(-1));
        assert_eq!(parse_wire_millis("/Date(-1500)/"), Some(-1500));
    }

    #[test]
    fn test_invalid_inputs() {
        for raw in [
            "",
            "garbage",
            "/Date()/",
            "/Date(abc)/",
            "/Date(12.5)/",
            "/Date(1704067200000+0100)/",
            "Date(1704067200000)",
            "/Date(1704067200000)",
            "1704067200000",
            "/Date(99999999999999999999999)/",
            "/Date(9223372036854775807)/",
        ] {
            assert_eq!(normalize_start_time(raw), INVALID_START_TIME, "input: {:?}", raw);
        }
    }

    #[test]
    fn test_known_instants_in_utc() {
        let utc = |raw: &str| parse_wire_timestamp(raw).unwrap().naive_utc().to_string();

        assert_eq!(utc("/Date(1704067200000)/"), "2024-01-01 00:00:00");
        assert_eq!(utc("/Date(1704070800999)/"), "2024-01-01 01:00:00");
        assert_eq!(utc("/Date(0)/"), "1970-01-01 00:00:00");
        assert_eq!(utc("/Date(-1)/"), "1969-12-31 23:59:59");
    }

    #[test]
    fn test_parse_wire_timestamp() {
        let dt = parse_wire_timestamp("/Date(1704067200000)/").unwrap();
        assert_eq!(dt.timestamp(), 1_704_067_200);
        assert!(parse_wire_timestamp("/Date(x)/").is_none());
    }
}

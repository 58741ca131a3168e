//! Timestamp formatting for credential fields.
//!
//! VC-API implementations reject sub-second precision in `issuanceDate`
//! and `expirationDate`, so every timestamp this harness puts on the wire
//! is RFC 3339 truncated to whole seconds with a terminal `Z`.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC 3339 with seconds precision.
///
/// `2026-08-06T10:15:30.123Z` becomes `2026-08-06T10:15:30Z`.
pub fn iso_timestamp(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

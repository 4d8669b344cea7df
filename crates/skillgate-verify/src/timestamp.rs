//! Third gate: staleness check over the body's declared timestamp.

use chrono::{NaiveDateTime, Utc};
use serde::Deserialize;

use crate::error::VerifyError;

/// Wire format of the declared timestamp (UTC, second precision).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Decodes only the nested timestamp field; everything else is ignored.
#[derive(Debug, Deserialize)]
struct BodyProbe {
    request: RequestProbe,
}

#[derive(Debug, Deserialize)]
struct RequestProbe {
    timestamp: String,
}

/// Check the declared `request.timestamp` of `body` against the tolerance.
///
/// The decode is read-only over the buffer; the caller keeps the original
/// bytes for signature verification. Only staleness is rejected;
/// future-dated timestamps pass.
///
/// # Errors
///
/// Returns [`VerifyError::TimestampInvalid`] when the body or timestamp
/// does not decode, and [`VerifyError::TimestampStale`] when the request is
/// older than `max_skew_secs`.
pub fn validate(body: &[u8], max_skew_secs: i64) -> Result<(), VerifyError> {
    let probe: BodyProbe = serde_json::from_slice(body)
        .map_err(|e| VerifyError::TimestampInvalid(format!("could not decode body: {e}")))?;

    let request_time = NaiveDateTime::parse_from_str(&probe.request.timestamp, TIMESTAMP_FORMAT)
        .map_err(|e| {
            VerifyError::TimestampInvalid(format!(
                "could not parse {:?}: {e}",
                probe.request.timestamp
            ))
        })?
        .and_utc();

    let age_secs = (Utc::now() - request_time).num_seconds();
    if age_secs > max_skew_secs {
        return Err(VerifyError::TimestampStale {
            age_secs,
            max_skew_secs,
        });
    }
    Ok(())
}

//! Claim validity rules applied when a token is accepted

use super::set::ClaimMap;
use crate::error::{JwtError, JwtResult};
use chrono::Utc;
use serde_json::Value;
use tracing::debug;

/// Current wall-clock time in seconds since the epoch
#[inline]
#[must_use]
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Apply audience, expiry and not-before rules at time `now`.
///
/// - `aud` must be present and non-empty
/// - `exp <= now` is expired
/// - `nbf > now` is not yet valid
///
/// # Errors
/// [`JwtError::Expired`] for an expired token, [`JwtError::Decode`] for every
/// other violation.
pub fn check_at(claims: &ClaimMap, now: i64) -> JwtResult<()> {
    if claims.get("aud").is_none_or(is_empty) {
        debug!("rejecting token: audience missing or empty");
        return Err(JwtError::decode("Audience not defined [aud]"));
    }

    if let Some(exp) = numeric(claims, "exp")? {
        if exp <= now as f64 {
            debug!(exp, now, "rejecting token: expired");
            return Err(JwtError::Expired);
        }
    }

    if let Some(nbf) = numeric(claims, "nbf")? {
        if nbf > now as f64 {
            debug!(nbf, now, "rejecting token: not yet valid");
            return Err(JwtError::Decode(format!(
                "Cannot process prior to {} [nbf]",
                format_timestamp(nbf)
            )));
        }
    }

    Ok(())
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(_) => false,
    }
}

// A time claim that is present but not a number cannot be compared, so the
// token is rejected rather than the rule skipped.
fn numeric(claims: &ClaimMap, tag: &str) -> JwtResult<Option<f64>> {
    match claims.get(tag) {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| JwtError::Decode(format!("Claim [{tag}] must be numeric"))),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn format_timestamp(seconds: f64) -> String {
    chrono::DateTime::from_timestamp(seconds as i64, 0)
        .map_or_else(|| seconds.to_string(), |at| at.format("%m.%d.%Y %H:%M:%S").to_string())
}

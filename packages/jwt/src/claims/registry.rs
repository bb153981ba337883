//! Claim types and the closed name registry
//!
//! Standard claims are looked up by friendly name (`expireTime`) or wire tag
//! (`exp`). Anything else goes through [`Claim::custom`].

use crate::error::{JwtError, JwtResult};
use serde_json::Value;
use std::fmt;

/// Value check run when a claim is constructed
pub type Validator = fn(&Value) -> bool;

fn is_numeric(value: &Value) -> bool {
    value.is_number()
}

/// Registered (RFC 7519 §4.1) claims
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StandardClaim {
    /// `iss`
    Issuer,
    /// `sub`
    Subject,
    /// `aud`
    Audience,
    /// `iat`
    IssuedAt,
    /// `nbf`
    NotBefore,
    /// `exp`
    ExpireTime,
    /// `jti`
    JwtId,
    /// `typ`
    Type,
}

impl StandardClaim {
    /// Every standard claim, in registry order
    pub const ALL: [StandardClaim; 8] = [
        Self::Issuer,
        Self::Subject,
        Self::Audience,
        Self::IssuedAt,
        Self::NotBefore,
        Self::ExpireTime,
        Self::JwtId,
        Self::Type,
    ];

    /// Wire tag
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Issuer => "iss",
            Self::Subject => "sub",
            Self::Audience => "aud",
            Self::IssuedAt => "iat",
            Self::NotBefore => "nbf",
            Self::ExpireTime => "exp",
            Self::JwtId => "jti",
            Self::Type => "typ",
        }
    }

    /// Friendly name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Issuer => "issuer",
            Self::Subject => "subject",
            Self::Audience => "audience",
            Self::IssuedAt => "issuedAt",
            Self::NotBefore => "notBefore",
            Self::ExpireTime => "expireTime",
            Self::JwtId => "jwtId",
            Self::Type => "type",
        }
    }

    /// Construction-time validator, if the claim has one
    #[must_use]
    pub fn validator(self) -> Option<Validator> {
        match self {
            Self::IssuedAt | Self::NotBefore | Self::ExpireTime => Some(is_numeric as Validator),
            _ => None,
        }
    }

    /// Look up by friendly name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|claim| claim.name() == name)
    }

    /// Look up by wire tag
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|claim| claim.tag() == tag)
    }

    /// Build a claim of this kind, running its validator
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidClaim`] if the validator rejects `value`.
    pub fn build(self, value: impl Into<Value>) -> JwtResult<Claim> {
        let value = value.into();
        if let Some(validate) = self.validator() {
            if !validate(&value) {
                return Err(JwtError::InvalidClaim {
                    tag: self.tag().to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(Claim::Standard { kind: self, value })
    }
}

impl fmt::Display for StandardClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single claim
#[derive(Clone, Debug, PartialEq)]
pub enum Claim {
    /// Registered claim
    Standard {
        /// Which claim
        kind: StandardClaim,
        /// Claim value
        value: Value,
    },
    /// Application-defined claim
    Custom {
        /// Wire tag
        tag: String,
        /// Claim value
        value: Value,
    },
}

impl Claim {
    /// Application-defined claim under `tag`
    #[must_use]
    pub fn custom(tag: &str, value: impl Into<Value>) -> Self {
        Claim::Custom {
            tag: tag.to_string(),
            value: value.into(),
        }
    }

    /// `iss`
    #[must_use]
    pub fn issuer(value: impl Into<String>) -> Self {
        Self::string(StandardClaim::Issuer, value.into())
    }

    /// `sub`
    #[must_use]
    pub fn subject(value: impl Into<String>) -> Self {
        Self::string(StandardClaim::Subject, value.into())
    }

    /// `aud`
    #[must_use]
    pub fn audience(value: impl Into<String>) -> Self {
        Self::string(StandardClaim::Audience, value.into())
    }

    /// `jti`
    #[must_use]
    pub fn jwt_id(value: impl Into<String>) -> Self {
        Self::string(StandardClaim::JwtId, value.into())
    }

    /// `typ`
    #[must_use]
    pub fn token_type(value: impl Into<String>) -> Self {
        Self::string(StandardClaim::Type, value.into())
    }

    /// `iat`, seconds since the epoch
    #[must_use]
    pub fn issued_at(timestamp: i64) -> Self {
        Self::timestamp(StandardClaim::IssuedAt, timestamp)
    }

    /// `nbf`, seconds since the epoch
    #[must_use]
    pub fn not_before(timestamp: i64) -> Self {
        Self::timestamp(StandardClaim::NotBefore, timestamp)
    }

    /// `exp`, seconds since the epoch
    #[must_use]
    pub fn expire_time(timestamp: i64) -> Self {
        Self::timestamp(StandardClaim::ExpireTime, timestamp)
    }

    // String claims carry no validator; numeric ones always pass theirs.
    fn string(kind: StandardClaim, value: String) -> Self {
        Claim::Standard {
            kind,
            value: Value::String(value),
        }
    }

    fn timestamp(kind: StandardClaim, timestamp: i64) -> Self {
        Claim::Standard {
            kind,
            value: Value::from(timestamp),
        }
    }

    /// Wire tag
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Claim::Standard { kind, .. } => kind.tag(),
            Claim::Custom { tag, .. } => tag,
        }
    }

    /// Friendly name (`custom` for application-defined claims)
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Claim::Standard { kind, .. } => kind.name(),
            Claim::Custom { .. } => "custom",
        }
    }

    /// Claim value
    #[must_use]
    pub fn value(&self) -> &Value {
        match self {
            Claim::Standard { value, .. } | Claim::Custom { value, .. } => value,
        }
    }
}

/// Build a claim from its friendly name.
///
/// `custom` requires `custom_tag`; every other name must be a registered
/// standard claim.
///
/// # Errors
/// - [`JwtError::InvalidArgument`] for an unknown name or a `custom` claim
///   without a tag
/// - [`JwtError::InvalidClaim`] if the claim's validator rejects `value`
pub fn build(name: &str, value: impl Into<Value>, custom_tag: Option<&str>) -> JwtResult<Claim> {
    if name == "custom" {
        let tag = custom_tag
            .filter(|tag| !tag.is_empty())
            .ok_or_else(|| JwtError::InvalidArgument("custom (missing claim tag)".to_string()))?;
        return Ok(Claim::custom(tag, value));
    }

    StandardClaim::from_name(name)
        .ok_or_else(|| JwtError::InvalidArgument(name.to_string()))?
        .build(value)
}

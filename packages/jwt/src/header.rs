//! Token header: type tag, algorithm and the key used to sign

use crate::algorithms;
use crate::keys::Key;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Default algorithm for a new header
pub const DEFAULT_ALGORITHM: &str = "HS256";
/// Type tag for tokens signed with a shared secret
pub const TYPE_JWT: &str = "JWT";
/// Type tag for tokens signed with a structured (asymmetric) key
pub const TYPE_JWS: &str = "JWS";

/// Header fields by name, sorted
pub type HeaderMap = BTreeMap<String, Value>;

/// Header for tokens produced or accepted by a [`crate::Jwt`]
///
/// The key travels with the header but never appears in its serialized form.
#[derive(Clone, Debug)]
pub struct Header {
    typ: String,
    alg: String,
    key: Key,
    extra: HeaderMap,
}

impl Header {
    /// Header for `key` with the default algorithm (`HS256`)
    ///
    /// The type tag is `JWT`, or `JWS` when `key` is a structured key handle.
    #[must_use]
    pub fn new(key: impl Into<Key>) -> Self {
        Self::with_algorithm(key, DEFAULT_ALGORITHM)
    }

    /// Header for `key` signing with `algorithm`
    #[must_use]
    pub fn with_algorithm(key: impl Into<Key>, algorithm: &str) -> Self {
        let key = key.into();
        let typ = if key.is_structured() { TYPE_JWS } else { TYPE_JWT };
        let header = Self {
            typ: typ.to_string(),
            alg: algorithm.to_string(),
            key,
            extra: HeaderMap::new(),
        };
        header.warn_on_short_secret();
        header
    }

    /// Override the type tag
    #[must_use]
    pub fn with_type(mut self, typ: &str) -> Self {
        self.typ = typ.to_string();
        self
    }

    /// Add a header field such as `kid`.
    ///
    /// `alg` and `typ` are owned by the header itself and are ignored here.
    #[must_use]
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        if name != "alg" && name != "typ" {
            self.extra.insert(name.to_string(), value.into());
        }
        self
    }

    /// Replace the key
    pub fn set_key(&mut self, key: impl Into<Key>) -> &mut Self {
        self.key = key.into();
        self.warn_on_short_secret();
        self
    }

    /// Replace the algorithm identifier
    pub fn set_algorithm(&mut self, algorithm: &str) -> &mut Self {
        self.alg = algorithm.to_string();
        self.warn_on_short_secret();
        self
    }

    /// `(secret length, digest size)` when an HMAC secret is shorter than the digest
    fn short_secret(&self) -> Option<(usize, usize)> {
        let Key::Secret(secret) = &self.key else {
            return None;
        };
        let descriptor = algorithms::resolve(&self.alg).ok()?;
        let recommended = descriptor.hash.output_size();
        (descriptor.is_symmetric() && secret.len() < recommended)
            .then_some((secret.len(), recommended))
    }

    fn warn_on_short_secret(&self) {
        if let Some((key_len, recommended)) = self.short_secret() {
            warn!(
                alg = %self.alg,
                key_len,
                recommended,
                "HMAC secret is shorter than the digest output"
            );
        }
    }

    /// Algorithm identifier
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.alg
    }

    /// Type tag
    #[must_use]
    pub fn token_type(&self) -> &str {
        &self.typ
    }

    /// Signing key
    #[must_use]
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Extra header field by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// Serialized form: `alg`, `typ` and any extra fields, sorted by name.
    ///
    /// Sorting keeps the JSON byte-stable, which the signature depends on.
    #[must_use]
    pub fn to_canonical_map(&self) -> HeaderMap {
        let mut map = self.extra.clone();
        map.insert("alg".to_string(), Value::String(self.alg.clone()));
        map.insert("typ".to_string(), Value::String(self.typ.clone()));
        map
    }
}

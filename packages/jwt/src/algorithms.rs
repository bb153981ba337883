//! Algorithm registry
//!
//! A fixed table of the signing algorithms this crate understands. Lookups are
//! exact-match on the JOSE identifier; there is no fallback and no `none`.

use crate::error::{JwtError, JwtResult};
use crate::keys::Key;
use std::fmt;

/// Hash function backing an algorithm
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashPrimitive {
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashPrimitive {
    /// Digest output size in bytes
    #[must_use]
    pub const fn output_size(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Human-readable digest name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
        }
    }
}

/// Kind of key an algorithm requires
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyFamily {
    /// Shared secret bytes (HMAC)
    Symmetric,
    /// RSA key pair
    Rsa,
}

impl fmt::Display for KeyFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symmetric => f.write_str("symmetric"),
            Self::Rsa => f.write_str("RSA"),
        }
    }
}

/// One supported signing algorithm
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AlgorithmDescriptor {
    /// JOSE identifier, e.g. `HS256`
    pub identifier: &'static str,
    /// Digest used by the signature
    pub hash: HashPrimitive,
    /// Key family the algorithm requires
    pub family: KeyFamily,
}

impl AlgorithmDescriptor {
    /// Whether signing uses a shared secret
    #[must_use]
    pub const fn is_symmetric(&self) -> bool {
        matches!(self.family, KeyFamily::Symmetric)
    }

    /// Whether `key` belongs to the family this algorithm requires.
    ///
    /// A key that parsed fine but is of the wrong family is never compatible.
    #[must_use]
    pub fn is_compatible_key(&self, key: &Key) -> bool {
        key.family() == self.family
    }
}

impl fmt::Display for AlgorithmDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier)
    }
}

/// Every algorithm the engine can sign and verify with
pub static SUPPORTED_ALGORITHMS: &[AlgorithmDescriptor] = &[
    AlgorithmDescriptor {
        identifier: "HS256",
        hash: HashPrimitive::Sha256,
        family: KeyFamily::Symmetric,
    },
    AlgorithmDescriptor {
        identifier: "HS384",
        hash: HashPrimitive::Sha384,
        family: KeyFamily::Symmetric,
    },
    AlgorithmDescriptor {
        identifier: "HS512",
        hash: HashPrimitive::Sha512,
        family: KeyFamily::Symmetric,
    },
    AlgorithmDescriptor {
        identifier: "RS256",
        hash: HashPrimitive::Sha256,
        family: KeyFamily::Rsa,
    },
    AlgorithmDescriptor {
        identifier: "RS384",
        hash: HashPrimitive::Sha384,
        family: KeyFamily::Rsa,
    },
    AlgorithmDescriptor {
        identifier: "RS512",
        hash: HashPrimitive::Sha512,
        family: KeyFamily::Rsa,
    },
];

/// Look up an algorithm by its exact identifier
///
/// # Errors
/// Returns [`JwtError::UnsupportedAlgorithm`] for anything not in [`SUPPORTED_ALGORITHMS`].
pub fn resolve(identifier: &str) -> JwtResult<&'static AlgorithmDescriptor> {
    SUPPORTED_ALGORITHMS
        .iter()
        .find(|descriptor| descriptor.identifier == identifier)
        .ok_or_else(|| JwtError::unsupported_algorithm(identifier))
}

/// Check that `key` may be used with `descriptor`
///
/// # Errors
/// Returns [`JwtError::InvalidKey`] when the key family does not match.
pub fn ensure_compatible(descriptor: &AlgorithmDescriptor, key: &Key) -> JwtResult<()> {
    if descriptor.is_compatible_key(key) {
        Ok(())
    } else {
        Err(JwtError::InvalidKey(format!(
            "{} requires a {} key, got a {} key",
            descriptor.identifier,
            descriptor.family,
            key.family()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_hmac_family() {
        for (id, hash) in [
            ("HS256", HashPrimitive::Sha256),
            ("HS384", HashPrimitive::Sha384),
            ("HS512", HashPrimitive::Sha512),
        ] {
            let descriptor = resolve(id).unwrap();
            assert_eq!(descriptor.hash, hash);
            assert!(descriptor.is_symmetric());
        }
    }

    #[test]
    fn resolves_rsa_family() {
        let descriptor = resolve("RS256").unwrap();
        assert_eq!(descriptor.family, KeyFamily::Rsa);
        assert_eq!(descriptor.hash.name(), "SHA256");
    }

    #[test]
    fn lookup_is_exact() {
        for id in ["hs256", "HS256 ", "H256", "none", "ES256", ""] {
            assert_eq!(resolve(id), Err(JwtError::UnsupportedAlgorithm(id.to_string())));
        }
    }

    #[test]
    fn symmetric_accepts_any_secret() {
        let descriptor = resolve("HS512").unwrap();
        assert!(descriptor.is_compatible_key(&Key::secret(b"")));
        assert!(descriptor.is_compatible_key(&Key::secret(b"x")));
    }

    #[test]
    fn asymmetric_rejects_secret() {
        let descriptor = resolve("RS256").unwrap();
        let err = ensure_compatible(descriptor, &Key::secret(b"secret")).unwrap_err();
        assert!(matches!(err, JwtError::InvalidKey(_)));
    }
}

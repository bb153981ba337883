//! Signed and optionally encrypted JSON Web Tokens
//!
//! This crate provides:
//! - Compact `header.claims.signature` tokens with byte-stable JSON encoding
//! - HS256/HS384/HS512 and RS256/RS384/RS512 signatures
//! - Standard and custom claims with construction-time validation
//! - Audience, expiry and not-before checks on decode
//! - Optional AES-256-GCM / ChaCha20-Poly1305 encryption of the claims segment
//!
//! ```
//! use jwt_engine::{Header, Jwt};
//!
//! let mut jwt = Jwt::new(Header::new("secret"));
//! jwt.audience("http://example.com").issuer("http://example.org");
//! let token = jwt.encode()?;
//! let claims = jwt.decode(&token)?;
//! assert_eq!(claims["iss"], "http://example.org");
//! # Ok::<(), jwt_engine::JwtError>(())
//! ```

pub mod algorithms;
pub mod cipher;
pub mod claims;
pub mod codec;
pub(crate) mod crypto;
mod engine;
mod error;
mod header;
mod keys;
mod options;
pub mod signature;

pub use algorithms::{AlgorithmDescriptor, HashPrimitive, KeyFamily, SUPPORTED_ALGORITHMS};
pub use cipher::ClaimCipher;
pub use claims::{Claim, ClaimMap, ClaimSet, StandardClaim};
pub use engine::Jwt;
pub use error::{JwtError, JwtResult};
pub use header::{DEFAULT_ALGORITHM, Header, HeaderMap, TYPE_JWS, TYPE_JWT};
pub use keys::Key;
pub use options::{AlgorithmPolicy, DecodeOptions};

//! Token engine: encode, decode, verify, check, encrypt, decrypt
//!
//! Producer path: build claims on a [`Jwt`] holding a [`Header`], then
//! [`Jwt::encode`]. Consumer path: [`Jwt::decode`] parses the three segments,
//! verifies the signature over the *encoded* header and claims text, then
//! applies the claim rules. Any failure rejects the whole token.

use crate::cipher::ClaimCipher;
use crate::claims::{self, Claim, ClaimMap, ClaimSet};
use crate::codec;
use crate::error::{JwtError, JwtResult};
use crate::header::{Header, HeaderMap};
use crate::keys::Key;
use crate::options::{AlgorithmPolicy, DecodeOptions};
use crate::signature;
use serde_json::Value;
use tracing::{debug, warn};

/// The three encoded segments of a token, borrowed from the token text
#[derive(Clone, Copy, Debug)]
struct RawToken<'a> {
    header: &'a str,
    claims: &'a str,
    signature: &'a str,
}

impl<'a> RawToken<'a> {
    /// First three segments; anything after the signature is ignored
    fn split(token: &'a str) -> JwtResult<Self> {
        let mut sections = token.split('.');
        match (sections.next(), sections.next(), sections.next()) {
            (Some(header), Some(claims), Some(signature)) => Ok(Self {
                header,
                claims,
                signature,
            }),
            _ => Err(JwtError::decode("Invalid number of sections (<3)")),
        }
    }

    /// Exact bytes the signature covers
    fn signing_input(&self) -> String {
        format!("{}.{}", self.header, self.claims)
    }

    fn header_map(&self) -> JwtResult<HeaderMap> {
        let bytes = decode_segment(self.header, "header")?;
        serde_json::from_slice(&bytes)
            .map_err(|e| JwtError::Decode(format!("Invalid header JSON: {e}")))
    }

    fn claims_bytes(&self) -> JwtResult<Vec<u8>> {
        decode_segment(self.claims, "claims")
    }

    fn signature_bytes(&self) -> JwtResult<Vec<u8>> {
        decode_segment(self.signature, "signature")
    }
}

fn decode_segment(segment: &str, name: &str) -> JwtResult<Vec<u8>> {
    codec::decode(segment).map_err(|e| JwtError::Decode(format!("Invalid {name} encoding: {e}")))
}

fn parse_claims(bytes: &[u8]) -> JwtResult<ClaimMap> {
    serde_json::from_slice(bytes).map_err(|e| JwtError::Decode(format!("Invalid claims JSON: {e}")))
}

/// Token producer and consumer
#[derive(Clone, Debug, Default)]
pub struct Jwt {
    header: Option<Header>,
    claims: ClaimSet,
    policy: AlgorithmPolicy,
}

impl Jwt {
    /// Engine signing and verifying with `header`'s key and algorithm
    #[must_use]
    pub fn new(header: Header) -> Self {
        Self::with_claims(header, ClaimSet::new())
    }

    /// Engine with a header and an existing claim set
    #[must_use]
    pub fn with_claims(header: Header, claims: ClaimSet) -> Self {
        Self {
            header: Some(header),
            claims,
            policy: AlgorithmPolicy::Configured,
        }
    }

    /// Engine without a header; it can only decode, via [`Jwt::decode_with_key`]
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Set how a header-less engine picks the verification algorithm
    #[must_use]
    pub fn with_policy(mut self, policy: AlgorithmPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current header
    #[must_use]
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    /// Replace the header
    pub fn set_header(&mut self, header: Header) -> &mut Self {
        self.header = Some(header);
        self
    }

    /// Current claims
    #[must_use]
    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// Replace the claim set
    pub fn set_claims(&mut self, claims: ClaimSet) -> &mut Self {
        self.claims = claims;
        self
    }

    /// Append a claim
    pub fn add_claim(&mut self, claim: Claim) -> &mut Self {
        self.claims.add(claim);
        self
    }

    /// Append a claim by friendly name (`issuer`, `expireTime`, ...)
    ///
    /// # Errors
    /// [`JwtError::InvalidArgument`] for an unknown name,
    /// [`JwtError::InvalidClaim`] if the value fails the claim's validator.
    pub fn claim(&mut self, name: &str, value: impl Into<Value>) -> JwtResult<&mut Self> {
        let claim = claims::build(name, value, None)?;
        Ok(self.add_claim(claim))
    }

    /// `iss`
    pub fn issuer(&mut self, value: impl Into<String>) -> &mut Self {
        self.add_claim(Claim::issuer(value))
    }

    /// `sub`
    pub fn subject(&mut self, value: impl Into<String>) -> &mut Self {
        self.add_claim(Claim::subject(value))
    }

    /// `aud`
    pub fn audience(&mut self, value: impl Into<String>) -> &mut Self {
        self.add_claim(Claim::audience(value))
    }

    /// `iat`
    pub fn issued_at(&mut self, timestamp: i64) -> &mut Self {
        self.add_claim(Claim::issued_at(timestamp))
    }

    /// `nbf`
    pub fn not_before(&mut self, timestamp: i64) -> &mut Self {
        self.add_claim(Claim::not_before(timestamp))
    }

    /// `exp`
    pub fn expire_time(&mut self, timestamp: i64) -> &mut Self {
        self.add_claim(Claim::expire_time(timestamp))
    }

    /// `jti`
    pub fn jwt_id(&mut self, value: impl Into<String>) -> &mut Self {
        self.add_claim(Claim::jwt_id(value))
    }

    /// `typ`
    pub fn token_type(&mut self, value: impl Into<String>) -> &mut Self {
        self.add_claim(Claim::token_type(value))
    }

    /// Application-defined claim
    pub fn custom(&mut self, tag: &str, value: impl Into<Value>) -> &mut Self {
        self.add_claim(Claim::custom(tag, value))
    }

    fn configured_header(&self, operation: &str) -> JwtResult<&Header> {
        self.header
            .as_ref()
            .ok_or_else(|| JwtError::NotConfigured(format!("{operation} requires a header")))
    }

    /// Encode and sign the current header and claims
    ///
    /// # Errors
    /// [`JwtError::NotConfigured`] without a header, otherwise any signing error.
    pub fn encode(&self) -> JwtResult<String> {
        self.encode_with_claims_segment(None)
    }

    /// Encode and sign, using `claims_segment` verbatim as the claims segment
    /// when given (for example, pre-encrypted claims).
    ///
    /// # Errors
    /// - [`JwtError::NotConfigured`] without a header
    /// - [`JwtError::Serialization`] if the override contains `.`
    /// - any error from [`signature::sign`]
    pub fn encode_with_claims_segment(&self, claims_segment: Option<&str>) -> JwtResult<String> {
        let header = self.configured_header("encoding")?;

        let header_segment = codec::encode(&serde_json::to_vec(&header.to_canonical_map())?);
        let claims_segment = match claims_segment {
            Some(segment) if segment.contains('.') => {
                return Err(JwtError::serialization(
                    "claims segment must not contain '.'",
                ));
            }
            Some(segment) => segment.to_string(),
            None => codec::encode(&serde_json::to_vec(&self.claims.to_canonical_map())?),
        };

        let sign_with = format!("{header_segment}.{claims_segment}");
        let signature = signature::sign(sign_with.as_bytes(), header.key(), header.algorithm())?;
        if signature.is_empty() {
            return Err(JwtError::signature("signing produced no signature"));
        }

        debug!(
            alg = header.algorithm(),
            claims = self.claims.len(),
            "encoded token"
        );
        Ok(format!("{sign_with}.{}", codec::encode(&signature)))
    }

    /// Decode with verification and claim checks, using the header's key
    ///
    /// # Errors
    /// Any structural, signature or claim failure; see [`Jwt::decode_with_key`].
    pub fn decode(&self, token: &str) -> JwtResult<ClaimMap> {
        self.decode_with(token, DecodeOptions::default())
    }

    /// Decode using the header's key, running the steps `options` selects
    ///
    /// # Errors
    /// [`JwtError::NotConfigured`] without a header; see [`Jwt::decode_with_key`].
    pub fn decode_with(&self, token: &str, options: DecodeOptions) -> JwtResult<ClaimMap> {
        let header = self.configured_header("decoding")?;
        self.decode_with_key(token, header.key(), options)
    }

    /// Decode with an explicit key.
    ///
    /// # Errors
    /// - [`JwtError::Decode`] for a wrong segment count, bad encoding or JSON,
    ///   a missing or disallowed `alg`, or a failed claim rule
    /// - [`JwtError::BadSignature`] if the signature does not match
    /// - [`JwtError::Expired`] if `exp` has passed
    pub fn decode_with_key(
        &self,
        token: &str,
        key: &Key,
        options: DecodeOptions,
    ) -> JwtResult<ClaimMap> {
        let raw = RawToken::split(token)?;
        let sign_with = raw.signing_input();

        let token_header = raw.header_map()?;
        let claims = parse_claims(&raw.claims_bytes()?)?;
        let signature = raw.signature_bytes()?;

        if options.verify {
            self.verify(&sign_with, &signature, &token_header, key)?;
        }
        if options.check {
            self.check(&claims)?;
        }
        Ok(claims)
    }

    /// Parse a token's header without verifying anything
    ///
    /// # Errors
    /// [`JwtError::Decode`] for a malformed token or header.
    pub fn decode_header(token: &str) -> JwtResult<HeaderMap> {
        RawToken::split(token)?.header_map()
    }

    /// Verify `signature` over `sign_with` for a token carrying `token_header`.
    ///
    /// With a configured header, the token's `alg` must match it. Without one,
    /// the engine's [`AlgorithmPolicy`] decides whether the token's `alg` is
    /// adopted.
    ///
    /// # Errors
    /// - [`JwtError::Decode`] if `alg` is missing, mismatched or not allowed
    /// - [`JwtError::NotConfigured`] for a bare engine under
    ///   [`AlgorithmPolicy::Configured`]
    /// - [`JwtError::BadSignature`] on mismatch
    /// - [`JwtError::UnsupportedAlgorithm`] / [`JwtError::InvalidKey`] from the
    ///   signature engine
    pub fn verify(
        &self,
        sign_with: &str,
        signature: &[u8],
        token_header: &HeaderMap,
        key: &Key,
    ) -> JwtResult<()> {
        let declared = token_header
            .get("alg")
            .and_then(Value::as_str)
            .filter(|alg| !alg.is_empty())
            .ok_or_else(|| JwtError::decode("Invalid header: no algorithm specified"))?;

        let algorithm = self.expected_algorithm(declared)?;

        if signature::verify(sign_with.as_bytes(), key, algorithm, signature)? {
            Ok(())
        } else {
            warn!(alg = algorithm, "signature did not verify");
            Err(JwtError::BadSignature)
        }
    }

    fn expected_algorithm<'a>(&'a self, declared: &'a str) -> JwtResult<&'a str> {
        if let Some(header) = &self.header {
            if header.algorithm() != declared {
                debug!(
                    expected = header.algorithm(),
                    declared, "rejecting token: algorithm mismatch"
                );
                return Err(JwtError::Decode(format!(
                    "Algorithm mismatch: expected {}, token declares {declared}",
                    header.algorithm()
                )));
            }
            return Ok(header.algorithm());
        }

        match &self.policy {
            AlgorithmPolicy::Configured => Err(JwtError::not_configured(
                "no header or algorithm policy to verify against",
            )),
            AlgorithmPolicy::AllowList(allowed) => {
                if allowed.iter().any(|alg| alg == declared) {
                    Ok(declared)
                } else {
                    debug!(declared, "rejecting token: algorithm not allowed");
                    Err(JwtError::Decode(format!("Algorithm {declared} is not allowed")))
                }
            }
            AlgorithmPolicy::TrustToken => Ok(declared),
        }
    }

    /// Apply audience, expiry and not-before rules against the current time
    ///
    /// # Errors
    /// See [`claims::check_at`].
    pub fn check(&self, claims: &ClaimMap) -> JwtResult<()> {
        self.check_at(claims, claims::current_timestamp())
    }

    /// Apply the claim rules at an explicit time (seconds since the epoch)
    ///
    /// # Errors
    /// See [`claims::check_at`].
    pub fn check_at(&self, claims: &ClaimMap, now: i64) -> JwtResult<()> {
        claims::check_at(claims, now)
    }

    /// Encrypt the claims with `cipher` and sign the result.
    ///
    /// The claims segment of the token is the base64url ciphertext; the
    /// signature covers header and ciphertext segments as usual.
    ///
    /// # Errors
    /// [`JwtError::EncryptionUnavailable`] if `cipher` is compiled out, any
    /// parameter error from [`ClaimCipher::encrypt`], or any encode error.
    pub fn encrypt(&self, cipher: ClaimCipher, iv: &[u8], key: &[u8]) -> JwtResult<String> {
        let plaintext = serde_json::to_vec(&self.claims.to_canonical_map())?;
        let ciphertext = cipher.encrypt(&plaintext, key, iv)?;
        self.encode_with_claims_segment(Some(&codec::encode(&ciphertext)))
    }

    /// Authenticate an encrypted token, decrypt its claims and check them
    ///
    /// # Errors
    /// - [`JwtError::NotConfigured`] without a header
    /// - [`JwtError::BadSignature`] / [`JwtError::Decode`] if the envelope fails
    /// - [`JwtError::Decode`] if decryption fails
    /// - any claim rule failure
    pub fn decrypt(
        &self,
        token: &str,
        cipher: ClaimCipher,
        iv: &[u8],
        key: &[u8],
    ) -> JwtResult<ClaimMap> {
        let header = self.configured_header("decryption")?;

        let raw = RawToken::split(token)?;
        let token_header = raw.header_map()?;
        let ciphertext = raw.claims_bytes()?;
        let signature = raw.signature_bytes()?;
        self.verify(&raw.signing_input(), &signature, &token_header, header.key())?;

        let claims = parse_claims(&cipher.decrypt(&ciphertext, key, iv)?)?;
        self.check(&claims)?;
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCENARIO_TOKEN: &str = concat!(
        "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9",
        ".eyJhdWQiOiJodHRwOi8vZXhhbXBsZS5jb20iLCJpc3MiOiJodHRwOi8vZXhhbXBsZS5vcmcifQ",
        ".jKMkjki7LMgqC09Ij354P1PuR0Buw996szIFGIcsGV8"
    );

    fn scenario() -> Jwt {
        let mut jwt = Jwt::new(Header::new("secret"));
        jwt.audience("http://example.com").issuer("http://example.org");
        jwt
    }

    #[test]
    fn encode_matches_known_token() {
        assert_eq!(scenario().encode().unwrap(), SCENARIO_TOKEN);
    }

    #[test]
    fn decode_known_token() {
        let claims = scenario().decode(SCENARIO_TOKEN).unwrap();
        assert_eq!(claims.len(), 2);
        assert_eq!(claims["aud"], json!("http://example.com"));
        assert_eq!(claims["iss"], json!("http://example.org"));
    }

    #[test]
    fn split_counts_sections() {
        assert!(RawToken::split("a.b.c").is_ok());
        assert_eq!(
            RawToken::split("a.b").unwrap_err(),
            JwtError::decode("Invalid number of sections (<3)")
        );
        assert!(RawToken::split("").is_err());

        let extended = RawToken::split("a.b.c.d.e").unwrap();
        assert_eq!(extended.signature, "c");
        assert_eq!(extended.signing_input(), "a.b");
    }

    #[test]
    fn signing_input_is_raw_text() {
        let raw = RawToken::split(SCENARIO_TOKEN).unwrap();
        assert!(SCENARIO_TOKEN.starts_with(&raw.signing_input()));
        assert_eq!(raw.signing_input().matches('.').count(), 1);
    }

    #[test]
    fn missing_alg_is_decode_error() {
        let jwt = scenario();
        let header = HeaderMap::from([("typ".to_string(), json!("JWT"))]);
        let err = jwt
            .verify("a.b", &[0u8; 32], &header, &Key::secret("secret"))
            .unwrap_err();
        assert_eq!(err, JwtError::decode("Invalid header: no algorithm specified"));
    }

    #[test]
    fn encode_requires_header() {
        assert!(matches!(
            Jwt::unconfigured().encode(),
            Err(JwtError::NotConfigured(_))
        ));
    }

    #[test]
    fn dotted_claims_override_is_rejected() {
        assert!(matches!(
            scenario().encode_with_claims_segment(Some("a.b")),
            Err(JwtError::Serialization(_))
        ));
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Jwt>();
        assert_send_sync::<Header>();
        assert_send_sync::<ClaimSet>();
    }

    #[test]
    fn claim_by_name() {
        let mut jwt = Jwt::new(Header::new("k"));
        jwt.claim("issuer", "http://example.org")
            .unwrap()
            .claim("expireTime", 1_700_000_000)
            .unwrap();
        assert_eq!(jwt.claims().find_by_name("issuer"), Some(&json!("http://example.org")));
        assert!(matches!(
            jwt.claim("favouriteColour", "blue"),
            Err(JwtError::InvalidArgument(_))
        ));
        assert!(matches!(
            jwt.claim("issuedAt", "yesterday"),
            Err(JwtError::InvalidClaim { .. })
        ));
        assert_eq!(jwt.claims().len(), 2);
    }
}

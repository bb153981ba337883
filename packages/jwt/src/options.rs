//! Decode-time configuration

/// Which steps [`crate::Jwt::decode_with`] runs after parsing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Recompute and compare the signature
    pub verify: bool,
    /// Apply audience, expiry and not-before rules
    pub check: bool,
}

impl DecodeOptions {
    /// Verify and check (the default)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            verify: true,
            check: true,
        }
    }

    /// Toggle signature verification
    #[must_use]
    pub const fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Toggle claim checks
    #[must_use]
    pub const fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// How an engine decides which algorithm a token may use.
///
/// An engine built with a [`crate::Header`] always requires the token's `alg`
/// to equal the header's algorithm. The policy matters for engines without a
/// header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AlgorithmPolicy {
    /// Only the engine header's algorithm; a bare engine refuses to verify
    #[default]
    Configured,
    /// A bare engine accepts the token's `alg` only if it is listed here
    AllowList(Vec<String>),
    /// A bare engine adopts whatever `alg` the token declares.
    ///
    /// The token chooses its own verification algorithm under this policy, so
    /// only use it when the key alone pins the algorithm family.
    TrustToken,
}

impl AlgorithmPolicy {
    /// Allow-list from identifiers
    #[must_use]
    pub fn allow<I, S>(algorithms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AllowList(algorithms.into_iter().map(Into::into).collect())
    }
}

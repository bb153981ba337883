//! Ordered claim collection

use super::registry::Claim;
use serde_json::Value;
use std::collections::BTreeMap;

/// Claims keyed by wire tag, sorted for byte-stable serialization
pub type ClaimMap = BTreeMap<String, Value>;

/// Claims in insertion order.
///
/// Duplicate tags are kept in the collection; the exported map takes the
/// last value written for each tag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClaimSet {
    claims: Vec<Claim>,
}

impl ClaimSet {
    /// Empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a claim
    pub fn add(&mut self, claim: Claim) -> &mut Self {
        self.claims.push(claim);
        self
    }

    /// Number of claims held, duplicates included
    #[must_use]
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether no claims have been added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Claims in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Claim> {
        self.claims.iter()
    }

    /// Tag → value, last write wins
    #[must_use]
    pub fn to_canonical_map(&self) -> ClaimMap {
        self.claims
            .iter()
            .map(|claim| (claim.tag().to_string(), claim.value().clone()))
            .collect()
    }

    /// Latest value for a friendly claim name such as `audience`
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Value> {
        self.claims
            .iter()
            .rev()
            .find(|claim| claim.name() == name)
            .map(Claim::value)
    }

    /// Latest value for a wire tag such as `aud`
    #[must_use]
    pub fn find_by_tag(&self, tag: &str) -> Option<&Value> {
        self.claims
            .iter()
            .rev()
            .find(|claim| claim.tag() == tag)
            .map(Claim::value)
    }
}

impl From<Vec<Claim>> for ClaimSet {
    fn from(claims: Vec<Claim>) -> Self {
        Self { claims }
    }
}

impl FromIterator<Claim> for ClaimSet {
    fn from_iter<I: IntoIterator<Item = Claim>>(iter: I) -> Self {
        Self {
            claims: iter.into_iter().collect(),
        }
    }
}

impl Extend<Claim> for ClaimSet {
    fn extend<I: IntoIterator<Item = Claim>>(&mut self, iter: I) {
        self.claims.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ClaimSet {
    type Item = &'a Claim;
    type IntoIter = std::slice::Iter<'a, Claim>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.iter()
    }
}

impl IntoIterator for ClaimSet {
    type Item = Claim;
    type IntoIter = std::vec::IntoIter<Claim>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.into_iter()
    }
}

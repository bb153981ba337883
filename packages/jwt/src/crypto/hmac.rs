//! HMAC-SHA signing (HS256, HS384, HS512)

use crate::algorithms::HashPrimitive;
use crate::error::{JwtError, JwtResult};
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Keyed hash of `message` under `secret`
pub(crate) fn sign(hash: HashPrimitive, message: &[u8], secret: &[u8]) -> JwtResult<Vec<u8>> {
    match hash {
        HashPrimitive::Sha256 => mac::<HmacSha256>(message, secret),
        HashPrimitive::Sha384 => mac::<HmacSha384>(message, secret),
        HashPrimitive::Sha512 => mac::<HmacSha512>(message, secret),
    }
}

#[inline]
fn mac<M: Mac + hmac::digest::KeyInit>(message: &[u8], secret: &[u8]) -> JwtResult<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(secret)
        .map_err(|_| JwtError::invalid_key("Invalid HMAC key"))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

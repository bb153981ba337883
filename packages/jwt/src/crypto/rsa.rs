//! RSA PKCS#1 v1.5 signing (RS256, RS384, RS512)

use crate::algorithms::HashPrimitive;
use crate::error::{JwtError, JwtResult};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::sha2::{Sha256, Sha384, Sha512};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};

/// Sign `message` with `private_key`
///
/// PKCS#1 v1.5 is deterministic, so the same input always yields the same bytes.
pub(crate) fn sign(
    hash: HashPrimitive,
    message: &[u8],
    private_key: &RsaPrivateKey,
) -> JwtResult<Vec<u8>> {
    let signature = match hash {
        HashPrimitive::Sha256 => SigningKey::<Sha256>::new(private_key.clone()).try_sign(message),
        HashPrimitive::Sha384 => SigningKey::<Sha384>::new(private_key.clone()).try_sign(message),
        HashPrimitive::Sha512 => SigningKey::<Sha512>::new(private_key.clone()).try_sign(message),
    }
    .map_err(|e| JwtError::Signature(format!("RSA signing failed: {e}")))?;

    Ok(signature.to_bytes().to_vec())
}

/// Check `signature` over `message` against `public_key`
pub(crate) fn verify(
    hash: HashPrimitive,
    message: &[u8],
    signature: &[u8],
    public_key: &RsaPublicKey,
) -> bool {
    let Ok(signature) = Signature::try_from(signature) else {
        return false;
    };

    match hash {
        HashPrimitive::Sha256 => VerifyingKey::<Sha256>::new(public_key.clone())
            .verify(message, &signature)
            .is_ok(),
        HashPrimitive::Sha384 => VerifyingKey::<Sha384>::new(public_key.clone())
            .verify(message, &signature)
            .is_ok(),
        HashPrimitive::Sha512 => VerifyingKey::<Sha512>::new(public_key.clone())
            .verify(message, &signature)
            .is_ok(),
    }
}

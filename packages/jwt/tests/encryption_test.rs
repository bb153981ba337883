//! Encrypted claims segment

use jwt_engine::cipher::{IV_SIZE, KEY_SIZE};
use jwt_engine::{ClaimCipher, Header, Jwt, JwtError};
use serde_json::json;

const KEY: [u8; KEY_SIZE] = [0x42; KEY_SIZE];

fn producer() -> Jwt {
    let mut jwt = Jwt::new(Header::new("signing-secret"));
    jwt.audience("http://example.com").subject("user-42");
    jwt
}

fn available() -> impl Iterator<Item = ClaimCipher> {
    [ClaimCipher::Aes256Gcm, ClaimCipher::ChaCha20Poly1305]
        .into_iter()
        .filter(|cipher| cipher.is_available())
}

#[test]
fn test_encrypt_decrypt_round_trip() {
    for cipher in available() {
        let jwt = producer();
        let iv = ClaimCipher::generate_iv();
        let token = jwt.encrypt(cipher, &iv, &KEY).unwrap();

        assert_eq!(token.split('.').count(), 3);
        let claims = jwt.decrypt(&token, cipher, &iv, &KEY).unwrap();
        assert_eq!(claims["sub"], json!("user-42"), "{cipher}");
    }
}

#[test]
fn test_claims_are_not_readable_without_decryption() {
    for cipher in available() {
        let jwt = producer();
        let token = jwt.encrypt(cipher, &[0u8; IV_SIZE], &KEY).unwrap();
        assert!(matches!(jwt.decode(&token), Err(JwtError::Decode(_))));
    }
}

#[test]
fn test_wrong_key_or_iv_fails() {
    for cipher in available() {
        let jwt = producer();
        let iv = ClaimCipher::generate_iv();
        let token = jwt.encrypt(cipher, &iv, &KEY).unwrap();

        assert!(matches!(
            jwt.decrypt(&token, cipher, &iv, &[0x24; KEY_SIZE]),
            Err(JwtError::Decode(_))
        ));
        let mut other_iv = iv;
        other_iv[0] ^= 0xff;
        assert!(matches!(
            jwt.decrypt(&token, cipher, &other_iv, &KEY),
            Err(JwtError::Decode(_))
        ));
    }
}

#[test]
fn test_encrypted_token_is_still_signed() {
    for cipher in available() {
        let iv = ClaimCipher::generate_iv();
        let token = producer().encrypt(cipher, &iv, &KEY).unwrap();

        let stranger = Jwt::new(Header::new("other-secret"));
        assert_eq!(
            stranger.decrypt(&token, cipher, &iv, &KEY).unwrap_err(),
            JwtError::BadSignature
        );
    }
}

#[test]
fn test_bad_parameters() {
    for cipher in available() {
        let jwt = producer();
        assert!(matches!(
            jwt.encrypt(cipher, &[0u8; IV_SIZE], &KEY[..16]),
            Err(JwtError::InvalidKey(_))
        ));
        assert!(matches!(
            jwt.encrypt(cipher, &[0u8; 4], &KEY),
            Err(JwtError::Encryption(_))
        ));
    }
}

#[test]
fn test_decrypt_still_checks_claims() {
    for cipher in available() {
        let mut jwt = Jwt::new(Header::new("signing-secret"));
        jwt.subject("no audience");
        let iv = ClaimCipher::generate_iv();
        let token = jwt.encrypt(cipher, &iv, &KEY).unwrap();

        assert_eq!(
            jwt.decrypt(&token, cipher, &iv, &KEY).unwrap_err(),
            JwtError::decode("Audience not defined [aud]")
        );
    }
}

//! Signature primitives, one module per key family

pub(crate) mod hmac;
pub(crate) mod rsa;

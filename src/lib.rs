//! Textbook RSA: two-prime key generation, raw modular exponentiation and a
//! fixed-width block scheme for messages longer than one modulus.
//!
//! There is no OAEP or PKCS#1 padding, so this is for study only.

pub mod rsa;

// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argon2id password hashing in PHC string format.

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use ring::rand::{SecureRandom, SystemRandom};
use secrecy::{ExposeSecret, SecretString};
use vouch_core::VouchError;

/// Hash a password with default Argon2id parameters and a fresh salt.
pub fn hash_password(password: &SecretString) -> Result<String, VouchError> {
    let mut salt_bytes = [0u8; 16];
    SystemRandom::new()
        .fill(&mut salt_bytes)
        .map_err(|_| VouchError::Internal("failed to generate random salt".to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| VouchError::Internal(format!("salt encoding failed: {e}")))?;

    let hash = Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| VouchError::Internal(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Check a password against a PHC string.
///
/// A malformed hash is a configuration problem, not a failed login.
pub fn verify_password(password: &SecretString, phc: &str) -> Result<bool, VouchError> {
    let parsed = PasswordHash::new(phc)
        .map_err(|e| VouchError::Config(format!("invalid password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.expose_secret().as_bytes(), &parsed)
        .is_ok())
}

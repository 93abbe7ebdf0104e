//! Password Hashing
//!
//! Argon2id hashing with a random salt per call. The work-factor
//! parameters are tunable through [`HashParams`]; verification reads
//! its parameters back out of the stored PHC string.

use crate::error::AuthError;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};

/// Argon2 work-factor parameters
#[derive(Debug, Clone, Copy)]
pub struct HashParams {
    /// Memory cost in KiB
    pub memory_cost: u32,
    /// Iterations
    pub time_cost: u32,
    /// Lanes
    pub parallelism: u32,
}

fn hasher(params: HashParams) -> Result<Argon2<'static>, AuthError> {
    let params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        None,
    )
    .map_err(|_| AuthError::Internal)?;

    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

/// Hash a password using Argon2id.
///
/// Each call salts independently, so two hashes of the same password
/// differ; equality must always go through [`verify`].
pub fn hash(password: &str, params: HashParams) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = hasher(params)?
        .hash_password(password.as_bytes(), &salt)?
        .to_string();

    Ok(hash)
}

/// Verify a password against a stored hash.
///
/// A mismatch is `Ok(false)`; only a malformed stored hash is an error.
pub fn verify(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::Internal)?;

    // Work-factor parameters come from the PHC string itself.
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

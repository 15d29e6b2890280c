//! Secure random credential generation.

use base64::Engine;
use rand::RngCore;
use rand::rngs::OsRng;

use crate::errors::GenerationError;

/// Number of random bytes behind every client secret.
pub const CLIENT_SECRET_BYTES: usize = 32;

/// Source of client identifiers and secrets.
pub trait CredentialGenerator: Send + Sync {
    /// Generate a fresh, globally unique client identifier
    fn client_id(&self) -> Result<String, GenerationError>;

    /// Generate a fresh client secret
    fn client_secret(&self) -> Result<String, GenerationError>;
}

/// Generates UUIDv4 identifiers and hex-encoded secrets from the OS random source.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsCredentialGenerator;

impl CredentialGenerator for OsCredentialGenerator {
    fn client_id(&self) -> Result<String, GenerationError> {
        let mut bytes = [0u8; 16];
        fill_random(&mut bytes)?;
        Ok(uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string())
    }

    fn client_secret(&self) -> Result<String, GenerationError> {
        hex_encoded_string(CLIENT_SECRET_BYTES)
    }
}

fn fill_random(dest: &mut [u8]) -> Result<(), GenerationError> {
    OsRng
        .try_fill_bytes(dest)
        .map_err(|e| GenerationError::RandomnessUnavailable(e.to_string()))
}

/// Returns `n` securely generated random bytes.
fn random_bytes(n: usize) -> Result<Vec<u8>, GenerationError> {
    let mut bytes = vec![0u8; n];
    fill_random(&mut bytes)?;
    Ok(bytes)
}

/// Returns the hexadecimal encoding of `n` random bytes.
pub fn hex_encoded_string(n: usize) -> Result<String, GenerationError> {
    random_bytes(n).map(hex::encode)
}

/// Returns the standard base64 encoding of `n` random bytes.
pub fn base64_encoded_string(n: usize) -> Result<String, GenerationError> {
    random_bytes(n).map(|bytes| base64::prelude::BASE64_STANDARD.encode(bytes))
}

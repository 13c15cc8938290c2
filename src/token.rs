use rand_core::{OsRng, RngCore};

/// Random single-use token for email-verification links, hex-encoded.
pub fn generate() -> String {
    let mut bytes = [0; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

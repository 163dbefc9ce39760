//! Password hashing used by account creation. Stored form: `sha256$<salt>$<hex digest>`.

use sha2::{Digest, Sha256};

pub const ALGORITHM: &str = "sha256";

/// Hash `raw` with a fresh random salt.
pub fn make_password(raw: &str) -> String {
    let salt = uuid::Uuid::new_v4().simple().to_string();
    encode(raw, &salt[..12])
}

fn encode(raw: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(raw.as_bytes());
    format!("{}${}${}", ALGORITHM, salt, hex::encode(hasher.finalize()))
}

//! Password hashing (argon2)
//!
//! Shared by the HR and Employee models; hashes are never serialized
//! out of the API.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hash a plaintext password using argon2
pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// Verify a plaintext password against a stored argon2 hash
pub fn verify(hash_pass: &str, password: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash_pass)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let h = hash("s3cret!").expect("hash");
        assert!(verify(&h, "s3cret!").expect("verify"));
        assert!(!verify(&h, "wrong").expect("verify"));
    }

    #[test]
    fn verify_rejects_garbage_hash() {
        assert!(verify("not-a-hash", "anything").is_err());
    }
}

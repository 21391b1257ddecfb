//! Argon2 credential hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand_core::OsRng;

pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hashed.to_string())
}

pub fn verify(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::{hash, verify};

    #[test]
    fn round_trip_accepts_matching_password() {
        let hashed = hash("hunter2").expect("hashing failed");
        assert!(verify("hunter2", &hashed).expect("verification failed"));
    }

    #[test]
    fn rejects_wrong_password() {
        let hashed = hash("hunter2").expect("hashing failed");
        assert!(!verify("hunter3", &hashed).expect("verification failed"));
    }

    #[test]
    fn rejects_garbage_hash() {
        assert!(verify("hunter2", "not-a-phc-string").is_err());
    }
}

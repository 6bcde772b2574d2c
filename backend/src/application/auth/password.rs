use crate::error::{AppError, Result};

pub const BCRYPT_COST: u32 = 10;

pub fn hash(password: &str) -> Result<String> {
    if password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".to_string()));
    }
    Ok(bcrypt::hash(password, BCRYPT_COST)?)
}

/// A malformed stored hash counts as a mismatch.
pub fn verify(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hashed = hash("s3cret").unwrap();
        assert!(hashed.starts_with("$2"));
        assert!(verify("s3cret", &hashed));
        assert!(!verify("wrong", &hashed));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify("s3cret", "not-a-hash"));
    }

    #[test]
    fn empty_password_is_rejected() {
        assert!(matches!(hash(""), Err(AppError::Validation(_))));
    }
}

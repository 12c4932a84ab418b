/**
 * Password Hashing
 *
 * bcrypt runs on the blocking pool so hashing never stalls the runtime.
 */

use crate::backend::error::BackendError;

pub async fn hash_password(password: String, cost: u32) -> Result<String, BackendError> {
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hashed)
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, BackendError> {
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password("password123".to_string(), 4).await.unwrap();
        assert_ne!(hash, "password123");
        assert!(verify_password("password123".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("wrongpassword".to_string(), hash).await.unwrap());
    }
}

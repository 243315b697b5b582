//! Session identifiers and signed session cookies

use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// 32 random bytes, hex encoded (64 characters).
pub fn generate_session_id() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

/// Signs session ids so that a cookie value cannot be forged or altered
/// without the server secret. Cookie values look like `<id>.<hex mac>`.
#[derive(Clone)]
pub struct CookieSigner {
    keyed: HmacSha256,
}

impl CookieSigner {
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, InvalidLength> {
        Ok(Self {
            keyed: HmacSha256::new_from_slice(secret.as_ref())?,
        })
    }

    pub fn sign(&self, session_id: &str) -> String {
        let mut mac = self.keyed.clone();
        mac.update(session_id.as_bytes());
        let tag = mac.finalize().into_bytes();
        format!("{}.{}", session_id, hex::encode(tag))
    }

    /// Session id carried by a signed value, or `None` if the value was not
    /// produced by this signer.
    pub fn verify<'a>(&self, value: &'a str) -> Option<&'a str> {
        let (session_id, tag) = value.rsplit_once('.')?;
        if session_id.is_empty() {
            return None;
        }
        let tag = hex::decode(tag).ok()?;
        let mut mac = self.keyed.clone();
        mac.update(session_id.as_bytes());
        mac.verify_slice(&tag).ok()?;
        Some(session_id)
    }
}

impl std::fmt::Debug for CookieSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieSigner").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_are_long_and_unique() {
        let a = generate_session_id();
        let b = generate_session_id();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = CookieSigner::new("a-very-long-secret-used-only-for-tests").unwrap();
        let id = generate_session_id();
        let value = signer.sign(&id);
        assert_eq!(signer.verify(&value), Some(id.as_str()));
    }

    #[test]
    fn test_tampered_values_rejected() {
        let signer = CookieSigner::new("a-very-long-secret-used-only-for-tests").unwrap();
        let value = signer.sign("abc123");

        let forged = value.replacen("abc123", "abc124", 1);
        assert_eq!(signer.verify(&forged), None);
        assert_eq!(signer.verify("abc123"), None);
        assert_eq!(signer.verify("abc123.zz"), None);
        assert_eq!(signer.verify(""), None);

        let other = CookieSigner::new("another-secret-of-reasonable-length!!").unwrap();
        assert_eq!(other.verify(&value), None);
    }
}

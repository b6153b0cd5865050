//! Request signers.
//!
//! HTX signature version 2 supports two schemes. The scheme is chosen once,
//! when the connection is built, and held as an [`HtxSigner`] variant:
//!
//! - `HmacSHA256`: Base64 of HMAC-SHA256 over the canonical payload, keyed
//!   with the secret key
//! - `Ed25519`: Base64 of an Ed25519 signature over the canonical payload,
//!   made with the private key registered for the access key

use crate::options::SignatureMethod;
use htx_core::auth::{decode_ed25519_private_key, ed25519_sign_base64, hmac_sha256_base64};
use htx_core::credentials::{SecretBytes, SecretString};
use htx_core::error::Result;

/// HMAC-SHA256 signer.
///
/// The secret is zeroed from memory when the signer is dropped.
#[derive(Debug, Clone)]
pub struct HmacSigner {
    secret_key: SecretString,
}

impl HmacSigner {
    /// Creates a signer for the given secret key.
    pub fn new(secret_key: SecretString) -> Self {
        Self { secret_key }
    }

    /// Signs a canonical payload.
    ///
    /// ```
    /// use htx_client::auth::HmacSigner;
    /// use htx_core::SecretString;
    ///
    /// let signer = HmacSigner::new(SecretString::new("secret"));
    /// let signature = signer.sign("GET\napi.huobi.pro\n/v1/margin/loan-info\n").unwrap();
    /// assert!(signature.ends_with('='));
    /// ```
    pub fn sign(&self, payload: &str) -> Result<String> {
        hmac_sha256_base64(payload, self.secret_key.expose_secret_bytes())
    }
}

/// Ed25519 signer holding the decoded 32-byte seed.
#[derive(Debug, Clone)]
pub struct Ed25519Signer {
    seed: SecretBytes,
}

impl Ed25519Signer {
    /// Decodes a Base64 private key (raw seed or PKCS#8).
    pub fn from_private_key(encoded: &SecretString) -> Result<Self> {
        Ok(Self {
            seed: decode_ed25519_private_key(encoded)?,
        })
    }

    /// Signs a canonical payload.
    pub fn sign(&self, payload: &str) -> Result<String> {
        ed25519_sign_base64(payload, &self.seed)
    }
}

/// The signing scheme bound to a connection.
#[derive(Debug, Clone)]
pub enum HtxSigner {
    /// `SignatureMethod=HmacSHA256`
    HmacSha256(HmacSigner),
    /// `SignatureMethod=Ed25519`
    Ed25519(Ed25519Signer),
}

impl HtxSigner {
    /// Builds the signer implied by `method` from the configured secret.
    ///
    /// # Errors
    ///
    /// Returns an authentication error if an Ed25519 key cannot be decoded.
    pub fn new(method: SignatureMethod, secret_key: &SecretString) -> Result<Self> {
        Ok(match method {
            SignatureMethod::HmacSha256 => Self::HmacSha256(HmacSigner::new(secret_key.clone())),
            SignatureMethod::Ed25519 => {
                Self::Ed25519(Ed25519Signer::from_private_key(secret_key)?)
            }
        })
    }

    /// The scheme this signer implements.
    pub fn method(&self) -> SignatureMethod {
        match self {
            Self::HmacSha256(_) => SignatureMethod::HmacSha256,
            Self::Ed25519(_) => SignatureMethod::Ed25519,
        }
    }

    /// Signs a canonical payload, returning the Base64 `Signature` value.
    pub fn sign(&self, payload: &str) -> Result<String> {
        match self {
            Self::HmacSha256(signer) => signer.sign(payload),
            Self::Ed25519(signer) => signer.sign(payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine as _, engine::general_purpose};
    use ed25519_dalek::{Signature, SigningKey, Verifier};

    const PAYLOAD: &str = "GET\napi.huobi.pro\n/v1/margin/accounts/balance\nAccessKeyId=ak&SignatureMethod=HmacSHA256&SignatureVersion=2&Timestamp=2024-01-02T03%3A04%3A05";

    #[test]
    fn test_hmac_signer_is_deterministic() {
        let signer = HtxSigner::new(SignatureMethod::HmacSha256, &SecretString::new("sk")).unwrap();
        assert_eq!(signer.method(), SignatureMethod::HmacSha256);
        let first = signer.sign(PAYLOAD).unwrap();
        assert_eq!(first, signer.sign(PAYLOAD).unwrap());
        assert_ne!(first, signer.sign("GET\nother").unwrap());
    }

    #[test]
    fn test_ed25519_signer_verifies() {
        let seed = [42u8; 32];
        let encoded = SecretString::new(general_purpose::STANDARD.encode(seed));
        let signer = HtxSigner::new(SignatureMethod::Ed25519, &encoded).unwrap();
        assert_eq!(signer.method(), SignatureMethod::Ed25519);

        let raw = general_purpose::STANDARD
            .decode(signer.sign(PAYLOAD).unwrap())
            .unwrap();
        let signature = Signature::from_slice(&raw).unwrap();
        let verifying_key = SigningKey::from_bytes(&seed).verifying_key();
        assert!(verifying_key.verify(PAYLOAD.as_bytes(), &signature).is_ok());
    }

    #[test]
    fn test_ed25519_signer_rejects_hmac_secret() {
        let err = HtxSigner::new(SignatureMethod::Ed25519, &SecretString::new("plain-hmac-secret"))
            .unwrap_err();
        assert!(err.as_authentication().is_some());
    }
}

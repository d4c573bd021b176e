//! Ed25519 signing and verification.
//!
//! These are the raw primitives; the transaction layer decides *what* bytes
//! get signed (generation-hash-prefixed signing bytes, aggregate hashes).

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use sirius_types::{PrivateKey, PublicKey, Signature};

/// Sign a byte buffer with a private key.
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(private_key.as_bytes());
    Signature(signing_key.sign(message).to_bytes())
}

/// Verify a signature against a message and public key.
///
/// Returns `false` for malformed public keys as well as for bad signatures.
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key.as_bytes()) else {
        return false;
    };
    let sig = ed25519_dalek::Signature::from_bytes(signature.as_bytes());
    verifying_key.verify(message, &sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::generate_keypair;

    #[test]
    fn sign_and_verify() {
        let kp = generate_keypair();
        let msg = b"sirius transaction bytes";
        let sig = sign_message(msg, &kp.private);
        assert!(verify_signature(msg, &sig, &kp.public));
    }

    #[test]
    fn wrong_message_fails() {
        let kp = generate_keypair();
        let sig = sign_message(b"right", &kp.private);
        assert!(!verify_signature(b"wrong", &sig, &kp.public));
    }

    #[test]
    fn wrong_key_fails() {
        let kp1 = generate_keypair();
        let kp2 = generate_keypair();
        let sig = sign_message(b"msg", &kp1.private);
        assert!(!verify_signature(b"msg", &sig, &kp2.public));
    }

    #[test]
    fn signing_is_deterministic() {
        let kp = generate_keypair();
        assert_eq!(
            sign_message(b"same", &kp.private),
            sign_message(b"same", &kp.private)
        );
    }

    #[test]
    fn invalid_public_key_rejected() {
        let kp = generate_keypair();
        let sig = sign_message(b"msg", &kp.private);
        assert!(!verify_signature(b"msg", &sig, &PublicKey([0xFF; 32])));
    }
}

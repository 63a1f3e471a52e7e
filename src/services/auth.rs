use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Domain separator for token derivation, so the token is never the
/// bare digest of the password itself.
const TOKEN_CONTEXT: &[u8] = b"daybook.session.v1:";

/// Verifies the shared secret and derives the session capability
/// token from it.
///
/// There is no server-side session store: the token is a pure function
/// of the configured secret, so validation recomputes the expected
/// value instead of looking anything up, and rotating the secret
/// invalidates every outstanding token at once. Any holder of the
/// token is authorized, a deliberate property of the single-user,
/// single-shared-secret model.
#[derive(Clone)]
pub struct AuthGate {
    secret: String,
}

impl AuthGate {
    /// Creates a gate around the configured shared secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Checks a submitted credential against the configured secret.
    ///
    /// Compares SHA-256 digests with a constant-time equality check,
    /// never the plaintext strings, so the comparison is uniform
    /// regardless of candidate length.
    pub fn verify(&self, candidate: &str) -> bool {
        digest_eq(&sha256(candidate.as_bytes()), &sha256(self.secret.as_bytes()))
    }

    /// Derives the session token for the current secret.
    ///
    /// Deterministic: the same secret always yields the same token.
    pub fn issue(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(TOKEN_CONTEXT);
        hasher.update(self.secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Checks a client-presented token against the one the current
    /// secret derives to, using the same digest comparison as
    /// [`verify`](Self::verify).
    pub fn authorize(&self, presented: &str) -> bool {
        digest_eq(
            &sha256(presented.as_bytes()),
            &sha256(self.issue().as_bytes()),
        )
    }
}

fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

fn digest_eq(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.ct_eq(b).into()
}

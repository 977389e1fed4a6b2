//! Read-only credential directory.
//!
//! # Responsibility
//! - Map login emails to identities and password verifiers.
//! - Load directory entries from code or from JSON records.
//!
//! # Invariants
//! - Emails are unique within one directory.
//! - Passwords are kept only as salted SHA-256 digests.
//! - Email and password comparisons are exact and case-sensitive.

use crate::model::identity::Identity;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use uuid::Uuid;

const DIGEST_LEN: usize = 32;

pub const DEMO_ADMIN_EMAIL: &str = "admin@school.com";
pub const DEMO_ADMIN_PASSWORD: &str = "admin123";

/// Errors raised while building or loading a credential directory.
#[derive(Debug)]
pub enum CredentialError {
    /// Two entries share the same login email.
    DuplicateEmail(String),
    /// A stored digest is not 64 hex characters.
    InvalidDigest { email: String, message: String },
    /// Directory JSON could not be decoded.
    Json(serde_json::Error),
}

impl Display for CredentialError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEmail(email) => write!(f, "duplicate credential email: {email}"),
            Self::InvalidDigest { email, message } => {
                write!(f, "invalid password digest for {email}: {message}")
            }
            Self::Json(err) => write!(f, "invalid credential json: {err}"),
        }
    }
}

impl Error for CredentialError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::DuplicateEmail(_) | Self::InvalidDigest { .. } => None,
        }
    }
}

impl From<serde_json::Error> for CredentialError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Salted SHA-256 password verifier.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordVerifier {
    salt: String,
    digest: [u8; DIGEST_LEN],
}

impl PasswordVerifier {
    /// Hashes `password` under a fresh random salt.
    pub fn from_password(password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = hash_password(&salt, password);
        Self { salt, digest }
    }

    /// Rebuilds a verifier from a stored salt and hex digest.
    pub fn from_hex(salt: impl Into<String>, digest_hex: &str) -> Result<Self, String> {
        Ok(Self {
            salt: salt.into(),
            digest: decode_digest_hex(digest_hex)?,
        })
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn digest_hex(&self) -> String {
        self.digest.iter().map(|byte| format!("{byte:02x}")).collect()
    }

    /// Checks `password` without short-circuiting on the first differing byte.
    pub fn verify(&self, password: &str) -> bool {
        let candidate = hash_password(&self.salt, password);
        candidate
            .iter()
            .zip(self.digest.iter())
            .fold(0u8, |acc, (left, right)| acc | (left ^ right))
            == 0
    }
}

impl Debug for PasswordVerifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordVerifier")
            .field("salt", &self.salt)
            .field("digest", &"<redacted>")
            .finish()
    }
}

/// SHA-256 over `salt || password`.
pub fn hash_password(salt: &str, password: &str) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

fn decode_digest_hex(value: &str) -> Result<[u8; DIGEST_LEN], String> {
    let value = value.trim();
    if value.len() != DIGEST_LEN * 2 || !value.is_ascii() {
        return Err(format!(
            "expected {} hex characters, got {}",
            DIGEST_LEN * 2,
            value.len()
        ));
    }

    let mut digest = [0u8; DIGEST_LEN];
    for (index, slot) in digest.iter_mut().enumerate() {
        let pair = &value[index * 2..index * 2 + 2];
        *slot = u8::from_str_radix(pair, 16)
            .map_err(|_| format!("non-hex characters `{pair}` at offset {}", index * 2))?;
    }
    Ok(digest)
}

/// Serialized directory entry, as stored in config files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(flatten)]
    pub identity: Identity,
    pub salt: String,
    pub password_sha256: String,
}

impl CredentialRecord {
    /// Builds a record for `identity`, hashing `password` under a fresh salt.
    pub fn new(identity: Identity, password: &str) -> Self {
        let verifier = PasswordVerifier::from_password(password);
        Self {
            identity,
            salt: verifier.salt().to_string(),
            password_sha256: verifier.digest_hex(),
        }
    }
}

#[derive(Debug, Clone)]
struct CredentialEntry {
    identity: Identity,
    verifier: PasswordVerifier,
}

/// Static mapping from login email to identity and password verifier.
#[derive(Debug, Clone, Default)]
pub struct CredentialDirectory {
    entries: Vec<CredentialEntry>,
}

impl CredentialDirectory {
    pub fn builder() -> CredentialDirectoryBuilder {
        CredentialDirectoryBuilder::default()
    }

    /// Directory holding the dashboard's demo administrator account.
    pub fn demo() -> Self {
        Self {
            entries: vec![CredentialEntry {
                identity: Identity::new("1", DEMO_ADMIN_EMAIL, "Admin User", "Administrator"),
                verifier: PasswordVerifier::from_password(DEMO_ADMIN_PASSWORD),
            }],
        }
    }

    pub fn from_records(records: Vec<CredentialRecord>) -> Result<Self, CredentialError> {
        records
            .into_iter()
            .fold(Self::builder(), CredentialDirectoryBuilder::record)
            .build()
    }

    /// Parses a JSON array of [`CredentialRecord`] values.
    pub fn from_json_str(json: &str) -> Result<Self, CredentialError> {
        let records: Vec<CredentialRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Returns the identity whose email and password both match exactly.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<&Identity> {
        self.entries
            .iter()
            .find(|entry| entry.identity.email == email)
            .filter(|entry| entry.verifier.verify(password))
            .map(|entry| &entry.identity)
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.entries.iter().any(|entry| entry.identity.email == email)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accumulates directory entries; duplicates are reported by `build`.
#[derive(Debug, Default)]
pub struct CredentialDirectoryBuilder {
    entries: Vec<CredentialEntry>,
    invalid: Option<CredentialError>,
}

impl CredentialDirectoryBuilder {
    /// Adds a user with a plaintext password, hashed immediately.
    pub fn user(mut self, identity: Identity, password: &str) -> Self {
        self.entries.push(CredentialEntry {
            identity,
            verifier: PasswordVerifier::from_password(password),
        });
        self
    }

    /// Adds a stored record; a malformed digest fails the final `build`.
    pub fn record(mut self, record: CredentialRecord) -> Self {
        match PasswordVerifier::from_hex(record.salt, &record.password_sha256) {
            Ok(verifier) => self.entries.push(CredentialEntry {
                identity: record.identity,
                verifier,
            }),
            Err(message) if self.invalid.is_none() => {
                self.invalid = Some(CredentialError::InvalidDigest {
                    email: record.identity.email,
                    message,
                });
            }
            Err(_) => {}
        }
        self
    }

    pub fn build(self) -> Result<CredentialDirectory, CredentialError> {
        if let Some(err) = self.invalid {
            return Err(err);
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.identity.email.as_str()) {
                return Err(CredentialError::DuplicateEmail(entry.identity.email.clone()));
            }
        }

        Ok(CredentialDirectory {
            entries: self.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_digest_hex, hash_password, PasswordVerifier};

    #[test]
    fn verifier_accepts_only_the_exact_password() {
        let verifier = PasswordVerifier::from_password("admin123");
        assert!(verifier.verify("admin123"));
        assert!(!verifier.verify("Admin123"));
        assert!(!verifier.verify("admin123 "));
        assert!(!verifier.verify(""));
    }

    #[test]
    fn salts_differ_between_verifiers() {
        let first = PasswordVerifier::from_password("same");
        let second = PasswordVerifier::from_password("same");
        assert_ne!(first.salt(), second.salt());
        assert_ne!(first.digest_hex(), second.digest_hex());
    }

    #[test]
    fn hex_roundtrip_restores_verifier() {
        let original = PasswordVerifier::from_password("secret");
        let restored =
            PasswordVerifier::from_hex(original.salt(), &original.digest_hex()).unwrap();
        assert_eq!(restored, original);
        assert!(restored.verify("secret"));
    }

    #[test]
    fn decode_rejects_bad_lengths_and_characters() {
        assert!(decode_digest_hex("abcd").unwrap_err().contains("64 hex"));
        let bad = "zz".repeat(32);
        assert!(decode_digest_hex(&bad).unwrap_err().contains("non-hex"));
        let good = hash_password("s", "p")
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<String>();
        assert_eq!(decode_digest_hex(&good).unwrap(), hash_password("s", "p"));
    }

    #[test]
    fn debug_output_redacts_digest() {
        let verifier = PasswordVerifier::from_password("secret");
        let rendered = format!("{verifier:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains(&verifier.digest_hex()));
    }
}

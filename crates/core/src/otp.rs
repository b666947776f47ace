//! In-process one-time password store.
//!
//! Codes are six random digits. Only a SHA-256 digest of each code is kept,
//! keyed by the identifier (phone number) it was issued to. Entries expire
//! after a fixed TTL, are consumed on successful verification, and expired
//! entries are purged on every issue and by [`OtpStore::purge_expired`].

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::error::CoreError;
use crate::types::Timestamp;
use crate::validation::is_otp_shaped;

/// Default lifetime of an issued code, in seconds.
pub const DEFAULT_OTP_TTL_SECS: i64 = 300;

/// Maximum wrong guesses before an entry is discarded.
pub const MAX_VERIFY_ATTEMPTS: u32 = 5;

struct OtpEntry {
    code_hash: String,
    expires_at: Timestamp,
    attempts: u32,
}

/// Outcome of a successful verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpMatch {
    /// The code matched an issued, unexpired entry.
    Issued,
    /// No matching entry, but development bypass accepted the code.
    Bypassed,
}

/// Thread-safe OTP store shared through application state.
pub struct OtpStore {
    entries: Mutex<HashMap<String, OtpEntry>>,
    ttl: chrono::Duration,
    dev_bypass: bool,
}

impl OtpStore {
    /// Create a store with the given TTL. When `dev_bypass` is set, any
    /// six-digit code verifies.
    pub fn new(ttl_secs: i64, dev_bypass: bool) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: chrono::Duration::seconds(ttl_secs),
            dev_bypass,
        }
    }

    /// Whether any six-digit code is accepted.
    pub fn dev_bypass(&self) -> bool {
        self.dev_bypass
    }

    /// Issue a fresh code for `identifier`, replacing any previous one.
    ///
    /// Returns the plaintext code and its expiry.
    pub fn issue(&self, identifier: &str) -> (String, Timestamp) {
        let code = format!("{:06}", rand::rng().random_range(0..1_000_000u32));
        let expires_at = self.insert(identifier, &code, Utc::now());
        (code, expires_at)
    }

    /// Verify `code` for `identifier`.
    pub fn verify(&self, identifier: &str, code: &str) -> Result<OtpMatch, CoreError> {
        self.verify_at(identifier, code, Utc::now())
    }

    /// Remove every expired entry. Returns the number removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now())
    }

    /// Number of outstanding entries (including expired ones not yet purged).
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, identifier: &str, code: &str, now: Timestamp) -> Timestamp {
        let expires_at = now + self.ttl;
        let mut entries = self.lock();
        entries.retain(|_, e| e.expires_at > now);
        entries.insert(
            identifier.to_string(),
            OtpEntry {
                code_hash: hash_code(code),
                expires_at,
                attempts: 0,
            },
        );
        expires_at
    }

    fn verify_at(&self, identifier: &str, code: &str, now: Timestamp) -> Result<OtpMatch, CoreError> {
        if !is_otp_shaped(code) {
            return Err(CoreError::Validation("OTP must be a 6-digit code".into()));
        }

        let mut entries = self.lock();
        let failure = match entries.get_mut(identifier) {
            Some(entry) if entry.expires_at <= now => {
                entries.remove(identifier);
                "OTP has expired"
            }
            Some(entry) if entry.code_hash == hash_code(code) => {
                entries.remove(identifier);
                return Ok(OtpMatch::Issued);
            }
            Some(entry) => {
                entry.attempts += 1;
                if entry.attempts >= MAX_VERIFY_ATTEMPTS {
                    entries.remove(identifier);
                }
                "Invalid OTP"
            }
            None => "No OTP was issued for this number",
        };

        if self.dev_bypass {
            entries.remove(identifier);
            return Ok(OtpMatch::Bypassed);
        }
        Err(CoreError::Unauthorized(failure.into()))
    }

    fn purge_expired_at(&self, now: Timestamp) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, e| e.expires_at > now);
        before - entries.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, OtpEntry>> {
        // A poisoned map only holds short-lived codes; keep serving it.
        self.entries.lock().unwrap_or_else(|p| p.into_inner())
    }
}

fn hash_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    format!("{:x}", hasher.finalize())
}

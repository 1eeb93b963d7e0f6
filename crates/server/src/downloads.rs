//! Pending download tokens
//!
//! Submitting the lead form issues a single-use token that the browser then
//! redeems at `/generate-pdf/:token`. Tokens expire after a fixed TTL checked at
//! redemption time; a background sweep only reclaims memory.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::intake::DownloadForm;
use crate::ServerError;

/// Why a token could not be redeemed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeemError {
    #[error("Invalid or expired download token")]
    Invalid,

    #[error("Download token expired")]
    Expired,
}

impl From<RedeemError> for ServerError {
    fn from(err: RedeemError) -> Self {
        match err {
            RedeemError::Invalid => ServerError::NotFound(err.to_string()),
            RedeemError::Expired => ServerError::Gone(err.to_string()),
        }
    }
}

/// A submitted lead form waiting for its PDF
#[derive(Debug, Clone)]
pub struct PendingDownload {
    pub form: DownloadForm,
    /// Row id of the logged download, `None` when the database write failed
    pub download_id: Option<i64>,
    pub client_ip: Option<String>,
    pub created_at: Instant,
}

/// Token -> pending download map
pub struct PendingDownloads {
    entries: Mutex<HashMap<String, PendingDownload>>,
    ttl: Duration,
}

/// `DL` followed by 16 lowercase hex characters
fn new_token() -> String {
    let bytes: [u8; 8] = rand::random();
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("DL{hex}")
}

impl PendingDownloads {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Store `form` and return its token
    pub fn issue(
        &self,
        form: DownloadForm,
        download_id: Option<i64>,
        client_ip: Option<String>,
    ) -> String {
        self.issue_at(form, download_id, client_ip, Instant::now())
    }

    pub fn issue_at(
        &self,
        form: DownloadForm,
        download_id: Option<i64>,
        client_ip: Option<String>,
        now: Instant,
    ) -> String {
        let mut entries = self.entries.lock();
        let mut token = new_token();
        while entries.contains_key(&token) {
            token = new_token();
        }
        entries.insert(
            token.clone(),
            PendingDownload {
                form,
                download_id,
                client_ip,
                created_at: now,
            },
        );
        token
    }

    /// Take the entry for `token`. A token can be redeemed once.
    pub fn redeem(&self, token: &str) -> Result<PendingDownload, RedeemError> {
        self.redeem_at(token, Instant::now())
    }

    pub fn redeem_at(&self, token: &str, now: Instant) -> Result<PendingDownload, RedeemError> {
        let entry = self
            .entries
            .lock()
            .remove(token)
            .ok_or(RedeemError::Invalid)?;
        if now.saturating_duration_since(entry.created_at) > self.ttl {
            return Err(RedeemError::Expired);
        }
        Ok(entry)
    }

    /// Drop entries older than the TTL, returning how many were removed
    pub fn sweep_expired(&self, now: Instant) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, e| now.saturating_duration_since(e.created_at) <= self.ttl);
        before - entries.len()
    }
}

/// Periodically sweep expired tokens
pub fn spawn_sweeper(downloads: Arc<PendingDownloads>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = downloads.sweep_expired(Instant::now());
            if removed > 0 {
                tracing::debug!(removed, remaining = downloads.len(), "Swept expired download tokens");
            }
        }
    })
}

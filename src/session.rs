//! Auth State Provider
//!
//! Owns the process-wide `Session`, runs the one-time auth check and publishes every change
//! through a `tokio::sync::watch` channel. The authorizer never touches this store; consumers
//! read a snapshot and pass it by reference.

use crate::config::AppConfig;
use crate::models::{Session, User};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::watch;

/// AuthCheckError
///
/// Why the one-time session validation could not produce an answer. Never surfaces to the
/// authorizer: the store turns any of these into an anonymous, checked session.
#[derive(Debug, thiserror::Error)]
pub enum AuthCheckError {
    #[error("auth check request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("auth check returned unexpected status {0}")]
    UnexpectedStatus(u16),
    #[error("auth check timed out after {0:?}")]
    TimedOut(Duration),
}

/// AuthCheck
///
/// The one-time session validation. `Ok(None)` means the backend answered and nobody is
/// signed in; `Err` means it could not answer.
#[async_trait]
pub trait AuthCheck: Send + Sync {
    async fn check(&self) -> Result<Option<User>, AuthCheckError>;
}

/// SessionStore
///
/// State machine: `Unchecked -> Checked{None | Some(user)}`; login and logout move between
/// the two checked states and never return to `Unchecked`.
pub struct SessionStore {
    tx: watch::Sender<Session>,
    check_started: AtomicBool,
    check_timeout: Duration,
}

impl SessionStore {
    pub fn new(check_timeout: Duration) -> Self {
        let (tx, _) = watch::channel(Session::unchecked());
        Self {
            tx,
            check_started: AtomicBool::new(false),
            check_timeout,
        }
    }

    /// Store whose check is bounded by `AUTH_CHECK_TIMEOUT_MS`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.auth_check_timeout)
    }

    /// Current session, cloned out of the channel.
    pub fn snapshot(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every session change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    /// run_check
    ///
    /// Performs the auth check at most once per store. Returns `false` without doing anything
    /// if a check was already started.
    ///
    /// Whatever the outcome (user, no user, error, timeout) the session ends up with
    /// `auth_checked == true`; failures resolve to an anonymous session so the router is
    /// never left pending forever. The same holds if the caller drops this future before
    /// the check answers.
    pub async fn run_check(&self, checker: &dyn AuthCheck) -> bool {
        if self.check_started.swap(true, Ordering::SeqCst) {
            tracing::debug!("auth check already started; ignoring");
            return false;
        }

        let mut pending = PendingCheck {
            tx: &self.tx,
            resolved: false,
        };

        let outcome = match tokio::time::timeout(self.check_timeout, checker.check()).await {
            Ok(result) => result,
            Err(_) => Err(AuthCheckError::TimedOut(self.check_timeout)),
        };

        let user = match outcome {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "auth check failed; continuing as anonymous");
                None
            }
        };

        tracing::info!(
            signed_in = user.is_some(),
            is_admin = user.as_ref().is_some_and(|u| u.is_admin),
            "auth check resolved"
        );
        pending.resolve(user);
        true
    }

    /// login
    ///
    /// Records a successful sign-in. Does not touch `auth_checked`; a login completing before
    /// the initial check resolves is overwritten by the check's answer.
    pub fn login(&self, user: User) {
        tracing::info!(user_id = %user.id, is_admin = user.is_admin, "user signed in");
        self.tx.send_modify(|session| session.current_user = Some(user));
    }

    /// logout
    ///
    /// Clears the user. The session stays checked.
    pub fn logout(&self) {
        tracing::info!("user signed out");
        self.tx.send_modify(|session| session.current_user = None);
    }
}

/// Publishes the check's answer. Dropped unanswered, it still marks the session checked and
/// leaves `current_user` as login/logout last set it.
struct PendingCheck<'a> {
    tx: &'a watch::Sender<Session>,
    resolved: bool,
}

impl PendingCheck<'_> {
    fn resolve(&mut self, user: Option<User>) {
        self.resolved = true;
        self.tx.send_modify(|session| {
            session.auth_checked = true;
            session.current_user = user;
        });
    }
}

impl Drop for PendingCheck<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            tracing::warn!("auth check abandoned before answering; marking session checked");
            self.resolved = true;
            self.tx.send_modify(|session| session.auth_checked = true);
        }
    }
}

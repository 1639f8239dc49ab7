use async_trait::async_trait;
use shop_navigator::{
    AppConfig,
    authorizer::{resolve, should_mount_router},
    models::{NavigationDecision, Session, User},
    session::{AuthCheck, AuthCheckError, SessionStore},
};
use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

// --- Mock Auth Checks ---

/// Answers with a fixed outcome and counts how often it was asked.
struct FixedCheck {
    user: Option<User>,
    fail_with_status: Option<u16>,
    calls: AtomicUsize,
}

impl FixedCheck {
    fn answering(user: Option<User>) -> Self {
        Self {
            user,
            fail_with_status: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            user: None,
            fail_with_status: Some(status),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AuthCheck for FixedCheck {
    async fn check(&self) -> Result<Option<User>, AuthCheckError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_with_status {
            Some(status) => Err(AuthCheckError::UnexpectedStatus(status)),
            None => Ok(self.user.clone()),
        }
    }
}

/// Never answers.
struct HangingCheck;

#[async_trait]
impl AuthCheck for HangingCheck {
    async fn check(&self) -> Result<Option<User>, AuthCheckError> {
        std::future::pending().await
    }
}

fn store() -> SessionStore {
    SessionStore::new(Duration::from_secs(5))
}

// --- Tests ---

#[tokio::test]
async fn test_store_starts_unchecked() {
    let store = store();
    let session = store.snapshot();
    assert_eq!(session, Session::unchecked());
    assert!(!should_mount_router(session.auth_checked));
    assert!(resolve("/login", &session).is_pending());
}

#[tokio::test]
async fn test_successful_check_signs_user_in() {
    let store = store();
    let check = FixedCheck::answering(Some(User::admin("a-1")));

    assert!(store.run_check(&check).await);

    let session = store.snapshot();
    assert_eq!(session, Session::signed_in(User::admin("a-1")));
    assert_eq!(
        resolve("/", &session),
        NavigationDecision::RedirectTo("/admin/dashboard".to_string())
    );
}

#[tokio::test]
async fn test_check_without_user_resolves_anonymous() {
    let store = store();
    store.run_check(&FixedCheck::answering(None)).await;
    assert_eq!(store.snapshot(), Session::anonymous());
}

#[tokio::test]
async fn test_failed_check_still_marks_session_checked() {
    let store = store();
    store.run_check(&FixedCheck::failing(502)).await;

    let session = store.snapshot();
    assert!(session.auth_checked);
    assert!(session.current_user.is_none());
    assert_eq!(
        resolve("/", &session),
        NavigationDecision::RedirectTo("/login".to_string())
    );
}

#[tokio::test]
async fn test_hanging_check_times_out_to_anonymous() {
    let store = SessionStore::new(Duration::from_millis(50));
    store.run_check(&HangingCheck).await;
    assert_eq!(store.snapshot(), Session::anonymous());
}

#[tokio::test]
async fn test_cancelled_check_still_marks_session_checked() {
    let store = store();

    // The caller gives up long before the store's own timeout.
    let cancelled =
        tokio::time::timeout(Duration::from_millis(20), store.run_check(&HangingCheck)).await;
    assert!(cancelled.is_err());

    let session = store.snapshot();
    assert_eq!(session, Session::anonymous());
    assert!(should_mount_router(session.auth_checked));
    assert_eq!(
        resolve("/", &session),
        NavigationDecision::RedirectTo("/login".to_string())
    );

    // The one-time check is spent; a retry does not run.
    let retry = FixedCheck::answering(Some(User::shopper("u-1")));
    assert!(!store.run_check(&retry).await);
    assert_eq!(retry.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_cancelled_check_keeps_login_made_while_pending() {
    let store = store();
    store.login(User::shopper("u-1"));

    let cancelled =
        tokio::time::timeout(Duration::from_millis(20), store.run_check(&HangingCheck)).await;
    assert!(cancelled.is_err());

    assert_eq!(store.snapshot(), Session::signed_in(User::shopper("u-1")));
}

#[tokio::test]
async fn test_store_from_config_uses_configured_timeout() {
    let mut config = AppConfig::default();
    config.auth_check_timeout = Duration::from_millis(30);
    let store = SessionStore::from_config(&config);

    // Finishes via the configured timeout, not the test's outer bound.
    let finished =
        tokio::time::timeout(Duration::from_secs(5), store.run_check(&HangingCheck)).await;
    assert_eq!(finished.ok(), Some(true));
    assert_eq!(store.snapshot(), Session::anonymous());
}

#[tokio::test]
async fn test_check_runs_at_most_once() {
    let store = store();
    let first = FixedCheck::answering(Some(User::shopper("u-1")));
    let second = FixedCheck::answering(None);

    assert!(store.run_check(&first).await);
    assert!(!store.run_check(&second).await);
    assert!(!store.run_check(&first).await);

    assert_eq!(first.calls.load(Ordering::SeqCst), 1);
    assert_eq!(second.calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.snapshot(), Session::signed_in(User::shopper("u-1")));
}

#[tokio::test]
async fn test_logout_and_login_never_reset_checked_flag() {
    let store = store();
    store.run_check(&FixedCheck::answering(Some(User::shopper("u-1")))).await;

    store.logout();
    assert_eq!(store.snapshot(), Session::anonymous());

    store.login(User::admin("a-1"));
    assert_eq!(store.snapshot(), Session::signed_in(User::admin("a-1")));
}

#[tokio::test]
async fn test_login_before_check_keeps_router_withheld() {
    let store = store();
    store.login(User::shopper("u-1"));

    let session = store.snapshot();
    assert!(!session.auth_checked);
    assert!(resolve("/home", &session).is_pending());

    // The check's answer wins.
    store.run_check(&FixedCheck::answering(None)).await;
    assert_eq!(store.snapshot(), Session::anonymous());
}

#[tokio::test]
async fn test_subscribers_observe_check_then_logout() {
    let store = store();
    let mut rx = store.subscribe();
    assert!(!rx.borrow_and_update().auth_checked);

    store.run_check(&FixedCheck::answering(Some(User::shopper("u-1")))).await;
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), Session::signed_in(User::shopper("u-1")));

    store.logout();
    rx.changed().await.unwrap();
    let session = rx.borrow_and_update().clone();
    assert!(session.auth_checked);
    assert!(session.current_user.is_none());
}

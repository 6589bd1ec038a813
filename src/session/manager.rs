/// Session manager implementation
use crate::{
    account::{Account, AccountKind, AccountRepository, RegisterData, DONOR_ROLE_LABEL},
    config::SessionConfig,
    error::{HubError, HubResult},
    session::SessionSnapshot,
    storage::SessionStore,
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Session manager service
pub struct SessionManager {
    repo: RwLock<AccountRepository>,
    store: Arc<dyn SessionStore>,
    config: SessionConfig,
    current_account: RwLock<Option<Account>>,
    pending: AtomicBool,
    in_flight: AtomicBool,
}

/// Clears the pending and in-flight flags on every exit path
struct AuthFlight<'a> {
    manager: &'a SessionManager,
}

impl Drop for AuthFlight<'_> {
    fn drop(&mut self) {
        self.manager.pending.store(false, Ordering::SeqCst);
        self.manager.in_flight.store(false, Ordering::SeqCst);
    }
}

impl SessionManager {
    /// Create a session manager
    ///
    /// The session starts empty and pending until `restore_session` runs.
    pub fn new(repo: AccountRepository, store: Arc<dyn SessionStore>, config: SessionConfig) -> Self {
        Self {
            repo: RwLock::new(repo),
            store,
            config,
            current_account: RwLock::new(None),
            pending: AtomicBool::new(true),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Load the saved session from the durable slot
    ///
    /// Never fails: a missing slot, an unreadable store or undecodable
    /// content all end in an empty session. Undecodable content is deleted.
    pub async fn restore_session(&self) -> Option<Account> {
        let key = self.config.session_key.as_str();

        let restored = match self.store.get(key).await {
            Ok(None) => {
                debug!("No saved session");
                None
            }
            Ok(Some(raw)) => match serde_json::from_str::<Account>(&raw) {
                Ok(account) => {
                    info!(account_id = %account.id, kind = account.account_kind.as_str(), "Restored saved session");
                    Some(account)
                }
                Err(e) => {
                    let err = HubError::CorruptSessionData(e.to_string());
                    warn!(error = %err, "Discarding saved session");
                    if let Err(e) = self.store.remove(key).await {
                        warn!(error = %e, "Failed to delete corrupt session slot");
                    }
                    None
                }
            },
            Err(e) => {
                warn!(error = %e, "Failed to read saved session");
                None
            }
        };

        *self.current_account.write().await = restored.clone();
        self.pending.store(false, Ordering::SeqCst);

        restored
    }

    /// Authenticate with email and secret
    ///
    /// Returns true and logs the account in on an exact match.
    pub async fn login(&self, email: &str, secret: &str) -> bool {
        match self.try_login(email, secret).await {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Login rejected");
                false
            }
        }
    }

    /// Authenticate with email and secret, reporting why it failed
    pub async fn try_login(&self, email: &str, secret: &str) -> HubResult<Account> {
        let _flight = self.begin_auth()?;
        self.simulate_latency().await;

        let account = self.repo.read().await.verify_credentials(email, secret)?;

        let account = match account {
            Some(account) => account,
            None => {
                info!("Login failed: invalid credentials");
                return Err(HubError::InvalidCredentials);
            }
        };

        self.establish(account.clone()).await;
        info!(account_id = %account.id, kind = account.account_kind.as_str(), "Logged in");

        Ok(account)
    }

    /// Create a donor account and log it in
    ///
    /// Returns false only when the email is already registered.
    pub async fn register(&self, data: &RegisterData) -> bool {
        match self.try_register(data).await {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Registration rejected");
                false
            }
        }
    }

    /// Create a donor account and log it in, reporting why it failed
    pub async fn try_register(&self, data: &RegisterData) -> HubResult<Account> {
        let _flight = self.begin_auth()?;
        self.simulate_latency().await;

        let account = {
            let mut repo = self.repo.write().await;

            if repo.email_exists(&data.email) {
                info!("Registration failed: email already registered");
                return Err(HubError::DuplicateEmail);
            }

            let account = Account {
                id: repo.next_id(),
                display_name: data.full_name.clone(),
                email: data.email.clone(),
                role: DONOR_ROLE_LABEL.to_string(),
                account_kind: AccountKind::Donor,
                avatar_ref: None,
            };

            repo.insert(account.clone(), &data.password)?;
            account
        };

        self.establish(account.clone()).await;
        info!(account_id = %account.id, "Registered donor account");

        Ok(account)
    }

    /// Clear the session and delete the durable slot
    pub async fn logout(&self) {
        let previous = self.current_account.write().await.take();

        if let Err(e) = self.store.remove(&self.config.session_key).await {
            warn!(error = %e, "Failed to delete session slot");
        }

        if let Some(account) = previous {
            info!(account_id = %account.id, "Logged out");
        }
    }

    /// Currently logged-in account
    pub async fn current_account(&self) -> Option<Account> {
        self.current_account.read().await.clone()
    }

    /// True while a login, registration or restore is outstanding
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current_account.read().await.is_some()
    }

    /// Current account and pending flag together
    pub async fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_account: self.current_account().await,
            pending: self.is_pending(),
        }
    }

    /// Number of known accounts
    pub async fn account_count(&self) -> usize {
        self.repo.read().await.len()
    }

    /// Reject a second login or registration while one is running
    fn begin_auth(&self) -> HubResult<AuthFlight<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(HubError::AuthInProgress);
        }

        self.pending.store(true, Ordering::SeqCst);
        Ok(AuthFlight { manager: self })
    }

    async fn simulate_latency(&self) {
        if !self.config.auth_latency.is_zero() {
            tokio::time::sleep(self.config.auth_latency).await;
        }
    }

    /// Make `account` current and mirror it into the durable slot
    ///
    /// A failed write leaves the in-memory session in place.
    async fn establish(&self, account: Account) {
        match serde_json::to_string(&account) {
            Ok(encoded) => {
                if let Err(e) = self.store.set(&self.config.session_key, &encoded).await {
                    warn!(error = %e, "Failed to persist session");
                }
            }
            Err(e) => warn!(error = %e, "Failed to encode session"),
        }

        *self.current_account.write().await = Some(account);
    }
}

/// Application context and dependency injection
use crate::{
    account::{AccountRepository, SecretHasher},
    config::AppConfig,
    error::HubResult,
    payment::PaymentProcessor,
    session::SessionManager,
    storage::{self, SessionStore},
};
use std::sync::Arc;

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn SessionStore>,
    pub session_manager: Arc<SessionManager>,
    pub payment_processor: Arc<PaymentProcessor>,
}

impl AppContext {
    /// Create a new application context from configuration
    ///
    /// The session is not restored yet; call `restore_session` on the
    /// manager before accepting user input.
    pub async fn new(config: AppConfig) -> HubResult<Self> {
        config.validate()?;

        let store = storage::open_store(&config.storage.backend).await?;
        Self::with_store(config, store)
    }

    /// Build the context around an existing store
    pub fn with_store(config: AppConfig, store: Arc<dyn SessionStore>) -> HubResult<Self> {
        config.validate()?;

        let hasher = if config.session.low_cost_hashing {
            SecretHasher::low_cost()?
        } else {
            SecretHasher::new()
        };

        let repo = if config.session.seed_demo_accounts {
            AccountRepository::with_demo_accounts(hasher)?
        } else {
            AccountRepository::empty(hasher)
        };

        let session_manager = Arc::new(SessionManager::new(
            repo,
            Arc::clone(&store),
            config.session.clone(),
        ));
        let payment_processor = Arc::new(PaymentProcessor::new(&config.payment));

        Ok(Self {
            config: Arc::new(config),
            store,
            session_manager,
            payment_processor,
        })
    }
}

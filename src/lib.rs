//! Humanitária session core
//!
//! Authentication and session lifecycle for the Humanitária aid management
//! dashboard, with the collaborators it needs: a durable key-value store
//! for the session slot, shell routing, form validation and the mock
//! donor payment flow.

pub mod account;
pub mod config;
pub mod context;
pub mod error;
pub mod payment;
pub mod session;
pub mod shell;
pub mod storage;
pub mod validation;

pub use account::{Account, AccountKind, AccountRepository, RegisterData, SecretHasher};
pub use config::AppConfig;
pub use context::AppContext;
pub use error::{HubError, HubResult};
pub use session::{SessionManager, SessionSnapshot};
pub use shell::View;
pub use storage::SessionStore;

/// Session lifecycle
///
/// The session manager is the single authority for who is logged in and for
/// the durable slot that mirrors it across restarts.

mod manager;

pub use manager::SessionManager;

use crate::account::{Account, AccountKind};
use serde::{Deserialize, Serialize};

/// Point-in-time view of the session state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub current_account: Option<Account>,
    pub pending: bool,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.current_account.is_some()
    }

    /// Kind of the logged-in account, if any
    pub fn account_kind(&self) -> Option<AccountKind> {
        self.current_account.as_ref().map(|a| a.account_kind)
    }
}

/// Account model and credential repository
///
/// Handles the identity records of dashboard users, their credential records
/// and the demonstration fixture used by the login screen.

pub mod password;
mod repository;

pub use password::SecretHasher;
pub use repository::{AccountRepository, CredentialRecord};

use serde::{Deserialize, Serialize};

/// Role label given to every self-registered donor
pub const DONOR_ROLE_LABEL: &str = "Doador";

/// Selects which application shell a user sees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    #[serde(rename = "admin")]
    Administrative,
    #[serde(rename = "donor")]
    Donor,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Administrative => "admin",
            AccountKind::Donor => "donor",
        }
    }
}

/// Identity record of a dashboard user
///
/// The serialized form is what the durable session slot holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    pub email: String,
    /// Free-text label such as "Administrador" or "Doador Premium"
    pub role: String,
    #[serde(rename = "userType")]
    pub account_kind: AccountKind,
    #[serde(rename = "avatar", default, skip_serializing_if = "Option::is_none")]
    pub avatar_ref: Option<String>,
}

impl Account {
    pub fn is_donor(&self) -> bool {
        self.account_kind == AccountKind::Donor
    }

    /// Up to two uppercase initials of the display name
    pub fn initials(&self) -> String {
        self.display_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// Registration form payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub country: String,
    pub id_number: String,
}

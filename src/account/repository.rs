/// In-memory account and credential repository
///
/// Accounts and credential records live only for the lifetime of the
/// process; the session slot is the only thing written to durable storage.
use super::{Account, AccountKind, SecretHasher};
use crate::error::{HubError, HubResult};
use std::fmt;

/// (id, name, email, role, kind, secret)
const DEMO_ACCOUNTS: &[(&str, &str, &str, &str, AccountKind, &str)] = &[
    ("1", "Admin", "admin@humanitaria.org", "Administrador", AccountKind::Administrative, "admin123"),
    ("2", "João Silva", "joao@humanitaria.org", "Coordenador", AccountKind::Administrative, "joao123"),
    ("3", "Maria Santos", "maria@humanitaria.org", "Voluntário", AccountKind::Administrative, "maria123"),
    ("4", "Carlos Mendes", "carlos@email.com", "Doador Premium", AccountKind::Donor, "carlos123"),
    ("5", "Ana Silva", "ana@email.com", "Doador Regular", AccountKind::Donor, "ana123"),
    ("6", "Roberto Lima", "roberto@email.com", "Novo Doador", AccountKind::Donor, "roberto123"),
];

/// Email plus hashed shared secret
#[derive(Clone)]
pub struct CredentialRecord {
    pub email: String,
    secret_hash: String,
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("email", &self.email)
            .field("secret_hash", &"<redacted>")
            .finish()
    }
}

/// Accounts and their credential records, kept in lockstep
pub struct AccountRepository {
    accounts: Vec<Account>,
    credentials: Vec<CredentialRecord>,
    hasher: SecretHasher,
}

impl AccountRepository {
    /// Repository with no accounts
    pub fn empty(hasher: SecretHasher) -> Self {
        Self {
            accounts: Vec::new(),
            credentials: Vec::new(),
            hasher,
        }
    }

    /// Repository seeded with the demonstration accounts
    pub fn with_demo_accounts(hasher: SecretHasher) -> HubResult<Self> {
        let mut repo = Self::empty(hasher);

        for (id, name, email, role, kind, secret) in DEMO_ACCOUNTS {
            repo.insert(
                Account {
                    id: id.to_string(),
                    display_name: name.to_string(),
                    email: email.to_string(),
                    role: role.to_string(),
                    account_kind: *kind,
                    avatar_ref: None,
                },
                secret,
            )?;
        }

        tracing::debug!(accounts = repo.len(), "Seeded demo accounts");

        Ok(repo)
    }

    /// Add an account together with its credential record
    pub fn insert(&mut self, account: Account, secret: &str) -> HubResult<()> {
        if self.email_exists(&account.email) {
            return Err(HubError::DuplicateEmail);
        }

        // Hash before touching either collection so a failure leaves both unchanged
        let secret_hash = self.hasher.hash(secret)?;

        self.credentials.push(CredentialRecord {
            email: account.email.clone(),
            secret_hash,
        });
        self.accounts.push(account);

        Ok(())
    }

    /// Exact, case-sensitive match of email and secret
    ///
    /// Returns `None` for an unknown email, a wrong secret, or a credential
    /// record whose account is missing.
    pub fn verify_credentials(&self, email: &str, secret: &str) -> HubResult<Option<Account>> {
        let credential = match self.credentials.iter().find(|c| c.email == email) {
            Some(credential) => credential,
            None => return Ok(None),
        };

        if !self.hasher.verify(secret, &credential.secret_hash)? {
            return Ok(None);
        }

        Ok(self.find_by_email(email).cloned())
    }

    /// Get account by email
    pub fn find_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.email == email)
    }

    /// Check if email exists
    pub fn email_exists(&self, email: &str) -> bool {
        self.find_by_email(email).is_some()
    }

    /// Next free identifier: one past the largest numeric id
    pub fn next_id(&self) -> String {
        let max = self
            .accounts
            .iter()
            .filter_map(|a| a.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        max.saturating_add(1)
            .max(self.accounts.len() as u64 + 1)
            .to_string()
    }

    /// All accounts in insertion order
    pub fn list(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn remove_account_only(&mut self, email: &str) {
        self.accounts.retain(|a| a.email != email);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_repo() -> AccountRepository {
        AccountRepository::with_demo_accounts(SecretHasher::low_cost().unwrap()).unwrap()
    }

    fn donor(id: &str, email: &str) -> Account {
        Account {
            id: id.to_string(),
            display_name: "New Donor".to_string(),
            email: email.to_string(),
            role: "Doador".to_string(),
            account_kind: AccountKind::Donor,
            avatar_ref: None,
        }
    }

    #[test]
    fn test_demo_fixture() {
        let repo = demo_repo();

        assert_eq!(repo.len(), 6);
        assert_eq!(repo.credentials.len(), 6);
        assert_eq!(
            repo.find_by_email("admin@humanitaria.org").unwrap().account_kind,
            AccountKind::Administrative
        );
        assert!(repo.find_by_email("ana@email.com").unwrap().is_donor());
    }

    #[test]
    fn test_verify_credentials() {
        let repo = demo_repo();

        let account = repo
            .verify_credentials("joao@humanitaria.org", "joao123")
            .unwrap()
            .unwrap();
        assert_eq!(account.display_name, "João Silva");

        assert!(repo.verify_credentials("joao@humanitaria.org", "JOAO123").unwrap().is_none());
        assert!(repo.verify_credentials("JOAO@humanitaria.org", "joao123").unwrap().is_none());
        assert!(repo.verify_credentials("nobody@humanitaria.org", "joao123").unwrap().is_none());
    }

    #[test]
    fn test_credential_without_account() {
        let mut repo = demo_repo();
        repo.remove_account_only("ana@email.com");

        assert!(repo.verify_credentials("ana@email.com", "ana123").unwrap().is_none());
    }

    #[test]
    fn test_insert_duplicate_email() {
        let mut repo = demo_repo();

        match repo.insert(donor("7", "carlos@email.com"), "whatever") {
            Err(HubError::DuplicateEmail) => {}
            other => panic!("Expected DuplicateEmail, got {:?}", other),
        }
        assert_eq!(repo.len(), 6);
        assert_eq!(repo.credentials.len(), 6);
    }

    #[test]
    fn test_insert_keeps_collections_in_lockstep() {
        let mut repo = AccountRepository::empty(SecretHasher::low_cost().unwrap());
        assert!(repo.is_empty());

        repo.insert(donor("1", "new@x.com"), "abcdef").unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.credentials.len(), 1);
        assert_eq!(repo.credentials[0].email, "new@x.com");
        assert!(repo.verify_credentials("new@x.com", "abcdef").unwrap().is_some());
    }

    #[test]
    fn test_next_id() {
        let mut repo = demo_repo();
        assert_eq!(repo.next_id(), "7");

        repo.insert(donor("42", "late@x.com"), "abcdef").unwrap();
        assert_eq!(repo.next_id(), "43");

        let empty = AccountRepository::empty(SecretHasher::low_cost().unwrap());
        assert_eq!(empty.next_id(), "1");
    }

    #[test]
    fn test_next_id_saturates_at_max() {
        let mut repo = AccountRepository::empty(SecretHasher::low_cost().unwrap());
        let top = u64::MAX.to_string();

        repo.insert(donor(&top, "top@x.com"), "abcdef").unwrap();
        assert_eq!(repo.next_id(), top);
    }

    #[test]
    fn test_debug_redacts_hash() {
        let repo = demo_repo();
        let rendered = format!("{:?}", repo.credentials[0]);

        assert!(rendered.contains("admin@humanitaria.org"));
        assert!(!rendered.contains("argon2"));
    }
}

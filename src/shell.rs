/// Presentation shell routing
///
/// Chooses what the presentation layer shows from the session state alone:
/// `pending` drives the loading view, authentication drives login/register,
/// and the account kind picks the administrative or donor shell.
use crate::{account::AccountKind, session::SessionSnapshot};
use serde::{Deserialize, Serialize};

/// Top-level view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    Loading,
    Login,
    Register,
    AdminShell,
    DonorShell,
}

impl View {
    /// Route a session snapshot; `wants_register` only matters when logged out
    pub fn for_session(snapshot: &SessionSnapshot, wants_register: bool) -> Self {
        if snapshot.pending {
            return View::Loading;
        }

        match snapshot.account_kind() {
            None if wants_register => View::Register,
            None => View::Login,
            Some(AccountKind::Administrative) => View::AdminShell,
            Some(AccountKind::Donor) => View::DonorShell,
        }
    }
}

/// Sections of the administrative shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdminSection {
    #[default]
    Dashboard,
    Donations,
    Volunteers,
    Projects,
    Beneficiaries,
}

impl AdminSection {
    pub const ALL: [AdminSection; 5] = [
        AdminSection::Dashboard,
        AdminSection::Donations,
        AdminSection::Volunteers,
        AdminSection::Projects,
        AdminSection::Beneficiaries,
    ];

    /// Navigation label
    pub fn label(&self) -> &'static str {
        match self {
            AdminSection::Dashboard => "Dashboard",
            AdminSection::Donations => "Doações",
            AdminSection::Volunteers => "Voluntários",
            AdminSection::Projects => "Projetos",
            AdminSection::Beneficiaries => "Beneficiários",
        }
    }

    /// Parse a navigation id such as `donations`
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|section| section.id() == id)
    }

    pub fn id(&self) -> &'static str {
        match self {
            AdminSection::Dashboard => "dashboard",
            AdminSection::Donations => "donations",
            AdminSection::Volunteers => "volunteers",
            AdminSection::Projects => "projects",
            AdminSection::Beneficiaries => "beneficiaries",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Account;

    fn snapshot(kind: Option<AccountKind>, pending: bool) -> SessionSnapshot {
        SessionSnapshot {
            current_account: kind.map(|account_kind| Account {
                id: "1".to_string(),
                display_name: "Test".to_string(),
                email: "test@humanitaria.org".to_string(),
                role: "Tester".to_string(),
                account_kind,
                avatar_ref: None,
            }),
            pending,
        }
    }

    #[test]
    fn test_pending_wins() {
        assert_eq!(View::for_session(&snapshot(None, true), false), View::Loading);
        assert_eq!(
            View::for_session(&snapshot(Some(AccountKind::Donor), true), true),
            View::Loading
        );
    }

    #[test]
    fn test_unauthenticated_views() {
        assert_eq!(View::for_session(&snapshot(None, false), false), View::Login);
        assert_eq!(View::for_session(&snapshot(None, false), true), View::Register);
    }

    #[test]
    fn test_kind_selects_shell() {
        assert_eq!(
            View::for_session(&snapshot(Some(AccountKind::Administrative), false), false),
            View::AdminShell
        );
        assert_eq!(
            View::for_session(&snapshot(Some(AccountKind::Donor), false), true),
            View::DonorShell
        );
    }

    #[test]
    fn test_role_label_is_not_a_routing_signal() {
        let mut snap = snapshot(Some(AccountKind::Donor), false);
        if let Some(account) = snap.current_account.as_mut() {
            account.role = "Administrador".to_string();
        }

        assert_eq!(View::for_session(&snap, false), View::DonorShell);
    }

    #[test]
    fn test_admin_sections() {
        assert_eq!(AdminSection::default(), AdminSection::Dashboard);
        assert_eq!(AdminSection::from_id("Donations"), Some(AdminSection::Donations));
        assert_eq!(AdminSection::from_id("unknown"), None);
        assert_eq!(AdminSection::Beneficiaries.label(), "Beneficiários");
    }
}

/// End-to-end session lifecycle tests
///
/// Each test builds an `AppContext` over a real store and drives it the
/// way the console does. A "restart" is a second context opened over the
/// same store location.

use humanitaria_session::{
    config::StorageBackend,
    storage::{DiskStore, SessionStore, SqliteStore},
    AccountKind, AppConfig, AppContext, RegisterData, View,
};
use std::sync::Arc;
use tempfile::TempDir;

const SESSION_KEY: &str = "humanitaria_user";

fn disk_config(dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::for_tests();
    config.storage.data_directory = dir.path().to_path_buf();
    config.storage.backend = StorageBackend::Disk {
        location: dir.path().join("session"),
    };
    config
}

fn sqlite_config(dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::for_tests();
    config.storage.data_directory = dir.path().to_path_buf();
    config.storage.backend = StorageBackend::Sqlite {
        location: dir.path().join("session.sqlite"),
    };
    config
}

async fn started(config: AppConfig) -> AppContext {
    let ctx = AppContext::new(config).await.unwrap();
    ctx.session_manager.restore_session().await;
    ctx
}

fn new_donor() -> RegisterData {
    RegisterData {
        full_name: "Nova Pessoa".to_string(),
        email: "new@x.com".to_string(),
        password: "secret1".to_string(),
        country: "AO".to_string(),
        id_number: "123".to_string(),
    }
}

#[tokio::test]
async fn test_admin_login_survives_restart_on_disk() {
    let dir = TempDir::new().unwrap();

    let ctx = started(disk_config(&dir)).await;
    assert!(ctx.session_manager.login("admin@humanitaria.org", "admin123").await);
    drop(ctx);

    let ctx = started(disk_config(&dir)).await;
    let account = ctx.session_manager.current_account().await.unwrap();
    assert_eq!(account.id, "1");
    assert_eq!(account.account_kind, AccountKind::Administrative);

    let snapshot = ctx.session_manager.snapshot().await;
    assert_eq!(View::for_session(&snapshot, false), View::AdminShell);
}

#[tokio::test]
async fn test_donor_login_survives_restart_on_sqlite() {
    let dir = TempDir::new().unwrap();

    let ctx = started(sqlite_config(&dir)).await;
    assert!(ctx.session_manager.login("ana@email.com", "ana123").await);
    drop(ctx);

    let ctx = started(sqlite_config(&dir)).await;
    let account = ctx.session_manager.current_account().await.unwrap();
    assert_eq!(account.display_name, "Ana Silva");
    assert_eq!(account.role, "Doador Regular");

    let snapshot = ctx.session_manager.snapshot().await;
    assert_eq!(View::for_session(&snapshot, false), View::DonorShell);
}

#[tokio::test]
async fn test_wrong_secret_leaves_session_empty() {
    let dir = TempDir::new().unwrap();
    let ctx = started(disk_config(&dir)).await;

    assert!(!ctx.session_manager.login("admin@humanitaria.org", "wrong").await);
    assert!(ctx.session_manager.current_account().await.is_none());

    let store = DiskStore::open(dir.path().join("session")).await.unwrap();
    assert!(store.get(SESSION_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn test_registered_donor_can_log_back_in() {
    let dir = TempDir::new().unwrap();
    let ctx = started(disk_config(&dir)).await;

    assert!(ctx.session_manager.register(&new_donor()).await);
    let account = ctx.session_manager.current_account().await.unwrap();
    assert_eq!(account.id, "7");
    assert_eq!(account.role, "Doador");
    assert_eq!(account.account_kind, AccountKind::Donor);

    ctx.session_manager.logout().await;
    assert!(ctx.session_manager.current_account().await.is_none());

    assert!(ctx.session_manager.login("new@x.com", "secret1").await);
    assert!(!ctx.session_manager.register(&new_donor()).await);
    assert_eq!(ctx.session_manager.account_count().await, 7);
}

#[tokio::test]
async fn test_logout_clears_slot_for_next_start() {
    let dir = TempDir::new().unwrap();

    let ctx = started(sqlite_config(&dir)).await;
    assert!(ctx.session_manager.login("carlos@email.com", "carlos123").await);
    ctx.session_manager.logout().await;
    drop(ctx);

    let ctx = started(sqlite_config(&dir)).await;
    assert!(ctx.session_manager.current_account().await.is_none());

    let snapshot = ctx.session_manager.snapshot().await;
    assert_eq!(View::for_session(&snapshot, false), View::Login);
    assert_eq!(View::for_session(&snapshot, true), View::Register);
}

#[tokio::test]
async fn test_corrupt_slot_on_disk_is_discarded() {
    let dir = TempDir::new().unwrap();
    let store = DiskStore::open(dir.path().join("session")).await.unwrap();
    store.set(SESSION_KEY, "{not json").await.unwrap();

    let ctx = started(disk_config(&dir)).await;
    assert!(ctx.session_manager.current_account().await.is_none());
    assert!(!ctx.session_manager.is_pending());
    assert!(store.get(SESSION_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn test_slot_written_by_hand_is_restored() {
    let store: Arc<dyn SessionStore> = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    store
        .set(
            SESSION_KEY,
            r#"{"id":"42","name":"Zé Ninguém","email":"ze@x.com","role":"Doador","userType":"donor"}"#,
        )
        .await
        .unwrap();

    let ctx = AppContext::with_store(AppConfig::for_tests(), Arc::clone(&store)).unwrap();
    assert_eq!(View::for_session(&ctx.session_manager.snapshot().await, false), View::Loading);

    let account = ctx.session_manager.restore_session().await.unwrap();
    assert_eq!(account.id, "42");
    assert_eq!(account.initials(), "ZN");
    assert!(account.avatar_ref.is_none());
    assert!(account.is_donor());
}

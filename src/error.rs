/// Unified error types for the Humanitária session core
use thiserror::Error;

/// Main error type for session, storage and payment operations
#[derive(Error, Debug)]
pub enum HubError {
    /// Login email/secret pair does not match any credential record
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Registration email already belongs to an account
    #[error("Email already registered")]
    DuplicateEmail,

    /// Durable session slot holds content that is not an account
    #[error("Corrupt session data: {0}")]
    CorruptSessionData(String),

    /// Another login or registration is still running
    #[error("Authentication already in progress")]
    AuthInProgress,

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Session store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON encoding errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Secret hashing errors
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HubError {
    /// Message shown to the user by the login and register forms
    pub fn user_message(&self) -> String {
        match self {
            HubError::InvalidCredentials => "Email ou senha incorretos".to_string(),
            HubError::DuplicateEmail => {
                "Este email já está registrado. Por favor, use outro email ou faça login."
                    .to_string()
            }
            HubError::AuthInProgress => "Aguarde, a operação anterior ainda está em curso".to_string(),
            HubError::Validation(message) => message.clone(),
            // Don't leak details
            _ => "Erro interno. Tente novamente mais tarde.".to_string(),
        }
    }
}

/// Result type alias for Humanitária operations
pub type HubResult<T> = Result<T, HubError>;

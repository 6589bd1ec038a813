/// Form validation module
///
/// Checks the login and register forms before they reach the session
/// manager. The session manager itself does no format validation.
use crate::{account::RegisterData, error::HubError};

/// Minimum secret length accepted by the register form
pub const MIN_PASSWORD_LENGTH: usize = 6;

const MSG_REQUIRED: &str = "Por favor, preencha todos os campos";
const MSG_PASSWORD_SHORT: &str = "A senha deve ter pelo menos 6 caracteres";
const MSG_EMAIL_INVALID: &str = "Por favor, insira um email válido";

/// Validation error detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl From<ValidationError> for HubError {
    fn from(err: ValidationError) -> Self {
        HubError::Validation(err.message)
    }
}

/// Validation result; the first failing rule wins
pub type ValidationResult = Result<(), ValidationError>;

/// Both login fields must be filled in
pub fn validate_login(email: &str, password: &str) -> ValidationResult {
    if email.is_empty() {
        return Err(ValidationError::new("email", MSG_REQUIRED));
    }
    if password.is_empty() {
        return Err(ValidationError::new("password", MSG_REQUIRED));
    }

    Ok(())
}

/// All register fields filled in, long enough secret, plausible email
pub fn validate_registration(data: &RegisterData) -> ValidationResult {
    let required = [
        ("fullName", &data.full_name),
        ("email", &data.email),
        ("password", &data.password),
        ("country", &data.country),
        ("idNumber", &data.id_number),
    ];

    if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
        return Err(ValidationError::new(*field, MSG_REQUIRED));
    }

    if data.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::new("password", MSG_PASSWORD_SHORT));
    }

    if !data.email.contains('@') {
        return Err(ValidationError::new("email", MSG_EMAIL_INVALID));
    }

    Ok(())
}

/// Countries offered by the register form
pub const REGISTER_COUNTRIES: &[&str] = &[
    "Angola",
    "Brasil",
    "Cabo Verde",
    "Guiné-Bissau",
    "Moçambique",
    "Portugal",
    "São Tomé e Príncipe",
    "Timor-Leste",
    "Outro",
];

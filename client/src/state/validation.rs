//! Local form checks run before any network request.
//!
//! The email shape check mirrors the address pattern mobile platforms ship:
//! `[A-Za-z0-9+._%-]{1,256}` `@` a first domain label of up to 65 characters,
//! then one or more dot-separated labels of up to 26 characters. Labels start
//! with an ASCII alphanumeric and continue with alphanumerics or `-`.

pub const MIN_PASSWORD_CHARS: usize = 6;

const MAX_LOCAL_PART: usize = 256;
const MAX_FIRST_LABEL: usize = 65;
const MAX_LABEL: usize = 26;

/// Field-level validation failure. `Display` is the message shown under the
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("El correo electrónico es obligatorio")]
    EmailRequired,
    #[error("Formato de correo electrónico inválido")]
    EmailMalformed,
    #[error("La contraseña es obligatoria")]
    PasswordRequired,
    #[error("La contraseña debe tener al menos {} caracteres", MIN_PASSWORD_CHARS)]
    PasswordTooShort,
}

/// # Errors
///
/// [`FieldError::EmailRequired`] for an empty value,
/// [`FieldError::EmailMalformed`] when it is not `local@domain`.
pub fn check_email(email: &str) -> Result<(), FieldError> {
    if email.is_empty() {
        return Err(FieldError::EmailRequired);
    }
    if !is_email_shaped(email) {
        return Err(FieldError::EmailMalformed);
    }
    Ok(())
}

/// # Errors
///
/// [`FieldError::PasswordRequired`] for an empty value,
/// [`FieldError::PasswordTooShort`] below [`MIN_PASSWORD_CHARS`] characters.
pub fn check_password(password: &str) -> Result<(), FieldError> {
    if password.is_empty() {
        return Err(FieldError::PasswordRequired);
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(FieldError::PasswordTooShort);
    }
    Ok(())
}

#[must_use]
pub fn is_email_shaped(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > MAX_LOCAL_PART || !local.chars().all(is_local_char) {
        return false;
    }

    let mut labels = domain.split('.');
    let Some(first) = labels.next() else {
        return false;
    };
    if !is_label(first, MAX_FIRST_LABEL) {
        return false;
    }
    let mut rest = 0;
    for label in labels {
        if !is_label(label, MAX_LABEL) {
            return false;
        }
        rest += 1;
    }
    rest > 0
}

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '_' | '%' | '-')
}

fn is_label(label: &str, max_len: usize) -> bool {
    let mut chars = label.chars();
    let Some(head) = chars.next() else {
        return false;
    };
    head.is_ascii_alphanumeric()
        && label.len() <= max_len
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;

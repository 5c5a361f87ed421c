use crate::error::DomainError;
use crate::model::Account;

/// Exact, case-sensitive match on both email and password across the whole
/// roster. A single failure kind keeps the response from revealing which of
/// the two was wrong. The caller copies the match into the session.
pub fn login<'a>(
    accounts: &'a [Account],
    email: &str,
    password: &str,
) -> Result<&'a Account, DomainError> {
    accounts
        .iter()
        .find(|a| a.email == email && a.password == password)
        .ok_or(DomainError::InvalidCredentials)
}

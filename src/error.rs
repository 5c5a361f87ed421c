use std::fmt;

/// Local validation failures surfaced synchronously to the caller as
/// user-visible messages. None are retried and none are fatal; an operation
/// that fails with one of these has made no change to any collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    InvalidCredentials,
    AlreadyCheckedIn,
    NotCheckedInYet,
    AlreadyCheckedOut,
    MissingRequiredField(&'static str),
    DuplicateEmail,
    DuplicateStudentId,
}

impl DomainError {
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidCredentials => "invalid_credentials",
            DomainError::AlreadyCheckedIn => "already_checked_in",
            DomainError::NotCheckedInYet => "not_checked_in",
            DomainError::AlreadyCheckedOut => "already_checked_out",
            DomainError::MissingRequiredField(_) => "missing_required_field",
            DomainError::DuplicateEmail => "duplicate_email",
            DomainError::DuplicateStudentId => "duplicate_student_id",
        }
    }

    pub fn message(&self) -> String {
        match self {
            // Deliberately does not say whether the email or the password
            // was wrong.
            DomainError::InvalidCredentials => "email or password is incorrect".to_string(),
            DomainError::AlreadyCheckedIn => "already checked in today".to_string(),
            DomainError::NotCheckedInYet => "check in before checking out".to_string(),
            DomainError::AlreadyCheckedOut => "already checked out today".to_string(),
            DomainError::MissingRequiredField(field) => {
                format!("missing required field: {}", field)
            }
            DomainError::DuplicateEmail => "email is already in use".to_string(),
            DomainError::DuplicateStudentId => "student id is already in use".to_string(),
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for DomainError {}

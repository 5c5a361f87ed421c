use crate::device::Clock;
use crate::error::DomainError;
use crate::model::{uid, Account, Role};

pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub password: String,
    pub student_id: String,
    pub class_name: Option<String>,
}

/// Admin roster addition. Name, email, and student id are required; the
/// email must be unused across all accounts and the student id unused across
/// the roster. The new STUDENT account is prepended so it shows first.
pub fn add_student(
    accounts: &mut Vec<Account>,
    new: NewStudent,
    clock: &dyn Clock,
) -> Result<Account, DomainError> {
    if new.name.is_empty() {
        return Err(DomainError::MissingRequiredField("name"));
    }
    if new.email.is_empty() {
        return Err(DomainError::MissingRequiredField("email"));
    }
    if new.student_id.is_empty() {
        return Err(DomainError::MissingRequiredField("studentId"));
    }
    if accounts.iter().any(|a| a.email == new.email) {
        return Err(DomainError::DuplicateEmail);
    }
    if accounts
        .iter()
        .any(|a| a.student_id.as_deref() == Some(new.student_id.as_str()))
    {
        return Err(DomainError::DuplicateStudentId);
    }

    let account = Account {
        id: uid("usr"),
        name: new.name,
        email: new.email,
        password: new.password,
        role: Role::Student,
        student_id: Some(new.student_id),
        class_name: new.class_name,
        created_at: clock.now().to_rfc3339(),
    };
    accounts.insert(0, account.clone());
    Ok(account)
}

/// Removes the account with the given id. Attendance records are not
/// cascaded; they stay in the attendance collection as orphans.
pub fn remove_student(accounts: &mut Vec<Account>, account_id: &str) -> bool {
    let before = accounts.len();
    accounts.retain(|a| a.id != account_id);
    accounts.len() != before
}

pub fn students(accounts: &[Account]) -> Vec<&Account> {
    accounts.iter().filter(|a| a.role == Role::Student).collect()
}

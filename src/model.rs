use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Student,
}

/// A person with login credentials: the school administrator or a student.
/// The password is stored as-is; this is a single-tenant demo roster, not a
/// credential system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    pub created_at: String,
}

/// One day's check-in/check-out entry for one account. At most one record
/// exists per (accountId, date); `date` is the local calendar day formatted
/// YYYY-MM-DD so string order matches chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub account_id: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub created_at: String,
}

pub fn uid(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

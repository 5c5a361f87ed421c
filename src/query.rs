use crate::model::{Account, AttendanceRecord, Role};

/// Attendance history as a viewer sees it. A STUDENT viewer is pinned to
/// their own records no matter what filter was requested; an ADMIN may ask
/// for `"all"` or one account id. Pure over the current collections; callers
/// re-invoke after any mutation.
pub fn list_attendance<'a>(
    viewer: &Account,
    accounts: &[Account],
    records: &'a [AttendanceRecord],
    filter_account_id: &str,
    search: &str,
) -> Vec<&'a AttendanceRecord> {
    let needle = search.trim().to_lowercase();
    let mut rows: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| {
            let in_scope = match viewer.role {
                Role::Admin => filter_account_id == "all" || r.account_id == filter_account_id,
                Role::Student => r.account_id == viewer.id,
            };
            if !in_scope {
                return false;
            }
            if needle.is_empty() {
                return true;
            }
            let account = accounts.iter().find(|a| a.id == r.account_id);
            haystack(account, r).contains(&needle)
        })
        .collect();
    // YYYY-MM-DD compares lexicographically as chronologically; the sort is
    // stable, so same-day rows keep insertion order.
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

fn haystack(account: Option<&Account>, record: &AttendanceRecord) -> String {
    let (name, email, student_id, class_name) = match account {
        Some(a) => (
            a.name.as_str(),
            a.email.as_str(),
            a.student_id.as_deref().unwrap_or(""),
            a.class_name.as_deref().unwrap_or(""),
        ),
        // Orphaned record: the owning account is gone, its fields are blank.
        None => ("", "", "", ""),
    };
    format!(
        "{} {} {} {} {} {}",
        name,
        email,
        student_id,
        class_name,
        record.check_in_note.as_deref().unwrap_or(""),
        record.check_out_note.as_deref().unwrap_or("")
    )
    .to_lowercase()
}

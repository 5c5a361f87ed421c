use crate::device::Clock;
use crate::model::{uid, Account, Role};
use crate::store::{Store, SLOT_ATTENDANCE};

pub const DEMO_ADMIN_EMAIL: &str = "admin@sekolah.sch.id";
pub const DEMO_STUDENT_EMAIL: &str = "budi@sekolah.sch.id";
pub const DEMO_PASSWORD: &str = "123456";

fn demo_accounts(clock: &dyn Clock) -> Vec<Account> {
    let created_at = clock.now().to_rfc3339();
    vec![
        Account {
            id: uid("usr"),
            name: "Admin".to_string(),
            email: DEMO_ADMIN_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
            role: Role::Admin,
            student_id: None,
            class_name: None,
            created_at: created_at.clone(),
        },
        Account {
            id: uid("usr"),
            name: "Budi Santoso".to_string(),
            email: DEMO_STUDENT_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
            role: Role::Student,
            student_id: Some("2024001".to_string()),
            class_name: Some("XII IPA 2".to_string()),
            created_at,
        },
    ]
}

/// First-run population. Writes the two demo accounts only while the
/// accounts collection is empty, and initializes the attendance slot only
/// while it is absent, so reruns are no-ops once accounts exist.
pub fn ensure_seed(store: &Store, clock: &dyn Clock) -> anyhow::Result<()> {
    if store.load_accounts().is_empty() {
        store.save_accounts(&demo_accounts(clock))?;
    }
    if !store.has_slot(SLOT_ATTENDANCE) {
        store.save_attendance(&[])?;
    }
    Ok(())
}

use std::path::Path;

use log::warn;
use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::{Account, AttendanceRecord};

pub const SLOT_ACCOUNTS: &str = "accounts";
pub const SLOT_ATTENDANCE: &str = "attendance";
pub const SLOT_SESSION: &str = "session";

/// Key-value slot store, the sole durable owner of all three collections.
/// Each slot holds one JSON document; callers keep working copies in memory
/// and write the whole collection back on every mutation. There is no
/// transactionality across slots.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(workspace: &Path) -> anyhow::Result<Store> {
        std::fs::create_dir_all(workspace)?;
        let conn = Connection::open(workspace.join("presensi.sqlite3"))?;
        Store::init(conn)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> anyhow::Result<Store> {
        Store::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> anyhow::Result<Store> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS slots(
                slot TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Store { conn })
    }

    fn read_slot(&self, slot: &str) -> anyhow::Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM slots WHERE slot = ?", [slot], |r| {
                r.get(0)
            })
            .optional()
            .map_err(Into::into)
    }

    fn write_slot(&self, slot: &str, value: &str) -> anyhow::Result<()> {
        self.conn.execute(
            "INSERT INTO slots(slot, value) VALUES(?, ?)
             ON CONFLICT(slot) DO UPDATE SET value = excluded.value",
            (slot, value),
        )?;
        Ok(())
    }

    fn clear_slot(&self, slot: &str) -> anyhow::Result<()> {
        self.conn
            .execute("DELETE FROM slots WHERE slot = ?", [slot])?;
        Ok(())
    }

    pub fn has_slot(&self, slot: &str) -> bool {
        matches!(self.read_slot(slot), Ok(Some(_)))
    }

    /// Loads fail open: a missing, unreadable, or unparseable slot yields the
    /// documented default instead of an error. Data loss is logged, not
    /// surfaced.
    fn load_or<T: DeserializeOwned>(&self, slot: &str, default: fn() -> T) -> T {
        let raw = match self.read_slot(slot) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("slot {} could not be read, using default: {}", slot, e);
                return default();
            }
        };
        match raw {
            None => default(),
            Some(text) => match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(e) => {
                    warn!("slot {} holds an unparseable value, using default: {}", slot, e);
                    default()
                }
            },
        }
    }

    fn save<T: Serialize>(&self, slot: &str, value: &T) -> anyhow::Result<()> {
        self.write_slot(slot, &serde_json::to_string(value)?)
    }

    pub fn load_accounts(&self) -> Vec<Account> {
        self.load_or(SLOT_ACCOUNTS, Vec::new)
    }

    pub fn save_accounts(&self, accounts: &[Account]) -> anyhow::Result<()> {
        self.save(SLOT_ACCOUNTS, &accounts)
    }

    pub fn load_attendance(&self) -> Vec<AttendanceRecord> {
        self.load_or(SLOT_ATTENDANCE, Vec::new)
    }

    pub fn save_attendance(&self, records: &[AttendanceRecord]) -> anyhow::Result<()> {
        self.save(SLOT_ATTENDANCE, &records)
    }

    pub fn load_session(&self) -> Option<Account> {
        self.load_or(SLOT_SESSION, || None)
    }

    /// `None` deletes the slot so a reload lands on the logged-out default.
    pub fn save_session(&self, session: Option<&Account>) -> anyhow::Result<()> {
        match session {
            Some(account) => self.save(SLOT_SESSION, account),
            None => self.clear_slot(SLOT_SESSION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{uid, Role};

    fn account(email: &str) -> Account {
        Account {
            id: uid("usr"),
            name: "Test".to_string(),
            email: email.to_string(),
            password: "123456".to_string(),
            role: Role::Student,
            student_id: Some("2024009".to_string()),
            class_name: Some("XI IPS 1".to_string()),
            created_at: "2024-05-14T07:00:00+07:00".to_string(),
        }
    }

    #[test]
    fn missing_slots_yield_documented_defaults() {
        let store = Store::open_in_memory().expect("open");
        assert!(store.load_accounts().is_empty());
        assert!(store.load_attendance().is_empty());
        assert!(store.load_session().is_none());
        assert!(!store.has_slot(SLOT_SESSION));
    }

    #[test]
    fn accounts_round_trip_through_the_slot() {
        let store = Store::open_in_memory().expect("open");
        let accounts = vec![account("a@sekolah.sch.id"), account("b@sekolah.sch.id")];
        store.save_accounts(&accounts).expect("save");
        assert_eq!(store.load_accounts(), accounts);
    }

    #[test]
    fn corrupt_slot_falls_back_to_default() {
        let store = Store::open_in_memory().expect("open");
        store.save_accounts(&[account("a@sekolah.sch.id")]).expect("save");
        store
            .write_slot(SLOT_ACCOUNTS, "{this is not json")
            .expect("corrupt");
        assert!(store.load_accounts().is_empty());
    }

    #[test]
    fn session_slot_is_cleared_on_logout() {
        let store = Store::open_in_memory().expect("open");
        let me = account("me@sekolah.sch.id");
        store.save_session(Some(&me)).expect("save");
        assert_eq!(store.load_session(), Some(me));

        store.save_session(None).expect("clear");
        assert!(store.load_session().is_none());
        assert!(!store.has_slot(SLOT_SESSION));
    }
}

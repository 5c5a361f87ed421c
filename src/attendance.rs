use log::warn;

use crate::device::{Clock, GeoPoint};
use crate::error::DomainError;
use crate::model::{uid, AttendanceRecord};

/// Per (account, calendar day) state machine: NotCheckedIn -> CheckedIn ->
/// CheckedOut, terminal for that day. Both transitions target "today" as the
/// injected clock sees it; there is no backdating through this engine.
/// Callers persist the whole collection after a successful transition.
fn today_record<'a>(
    records: &'a mut [AttendanceRecord],
    account_id: &str,
    date: &str,
) -> Option<&'a mut AttendanceRecord> {
    records
        .iter_mut()
        .find(|r| r.account_id == account_id && r.date == date)
}

pub fn check_in(
    records: &mut Vec<AttendanceRecord>,
    account_id: &str,
    clock: &dyn Clock,
    note: Option<String>,
    position: Option<GeoPoint>,
) -> Result<AttendanceRecord, DomainError> {
    let date = clock.today();
    let now = clock.now().to_rfc3339();

    if let Some(record) = today_record(records, account_id, &date) {
        if record.check_in_at.is_some() {
            return Err(DomainError::AlreadyCheckedIn);
        }
        // A record for today without a check-in cannot come out of this
        // engine; it points at a partial or hand-edited store. Complete it
        // in place rather than duplicating the day.
        warn!(
            "record {} for account {} on {} has no check-in; completing it",
            record.id, account_id, date
        );
        record.check_in_at = Some(now);
        record.check_in_note = note;
        if let Some(p) = position {
            record.latitude = Some(p.latitude);
            record.longitude = Some(p.longitude);
        }
        return Ok(record.clone());
    }

    let record = AttendanceRecord {
        id: uid("att"),
        account_id: account_id.to_string(),
        date,
        check_in_at: Some(now.clone()),
        check_out_at: None,
        check_in_note: note,
        check_out_note: None,
        latitude: position.map(|p| p.latitude),
        longitude: position.map(|p| p.longitude),
        created_at: now,
    };
    records.push(record.clone());
    Ok(record)
}

pub fn check_out(
    records: &mut [AttendanceRecord],
    account_id: &str,
    clock: &dyn Clock,
    note: Option<String>,
) -> Result<AttendanceRecord, DomainError> {
    let date = clock.today();
    let Some(record) = today_record(records, account_id, &date) else {
        return Err(DomainError::NotCheckedInYet);
    };
    if record.check_in_at.is_none() {
        return Err(DomainError::NotCheckedInYet);
    }
    if record.check_out_at.is_some() {
        return Err(DomainError::AlreadyCheckedOut);
    }
    record.check_out_at = Some(clock.now().to_rfc3339());
    record.check_out_note = note;
    Ok(record.clone())
}

pub struct TodayStatus {
    pub record: Option<AttendanceRecord>,
    pub can_check_in: bool,
    pub can_check_out: bool,
}

/// What the viewer may do right now, as derived for the check-in/out
/// controls: check in while no check-in exists for today, check out after a
/// check-in and before a check-out.
pub fn today_status(
    records: &[AttendanceRecord],
    account_id: &str,
    clock: &dyn Clock,
) -> TodayStatus {
    let date = clock.today();
    let record = records
        .iter()
        .find(|r| r.account_id == account_id && r.date == date)
        .cloned();
    let checked_in = record.as_ref().is_some_and(|r| r.check_in_at.is_some());
    let checked_out = record.as_ref().is_some_and(|r| r.check_out_at.is_some());
    TodayStatus {
        record,
        can_check_in: !checked_in,
        can_check_out: checked_in && !checked_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{fixed_clock, FixedClock};

    fn morning() -> FixedClock {
        fixed_clock(2024, 5, 14, 7, 30)
    }

    fn afternoon() -> FixedClock {
        fixed_clock(2024, 5, 14, 15, 10)
    }

    fn here() -> GeoPoint {
        GeoPoint {
            latitude: -6.2001,
            longitude: 106.8166,
        }
    }

    #[test]
    fn first_check_in_creates_the_day_record() {
        let mut records = Vec::new();
        let rec = check_in(
            &mut records,
            "usr_budi",
            &morning(),
            Some("macet".to_string()),
            Some(here()),
        )
        .expect("check in");

        assert_eq!(records.len(), 1);
        assert_eq!(rec.date, "2024-05-14");
        assert!(rec.check_in_at.is_some());
        assert!(rec.check_out_at.is_none());
        assert_eq!(rec.check_in_note.as_deref(), Some("macet"));
        assert_eq!(rec.latitude, Some(-6.2001));
        assert_eq!(rec.longitude, Some(106.8166));
        assert_eq!(records[0], rec);
    }

    #[test]
    fn second_check_in_same_day_is_rejected_without_mutation() {
        let mut records = Vec::new();
        check_in(&mut records, "usr_budi", &morning(), None, None).expect("first");
        let before = records.clone();

        let err = check_in(
            &mut records,
            "usr_budi",
            &afternoon(),
            Some("lagi".to_string()),
            Some(here()),
        )
        .expect_err("second check-in");
        assert_eq!(err, DomainError::AlreadyCheckedIn);
        assert_eq!(records, before);
    }

    #[test]
    fn geolocation_is_optional() {
        let mut records = Vec::new();
        let rec = check_in(&mut records, "usr_budi", &morning(), None, None).expect("check in");
        assert!(rec.latitude.is_none());
        assert!(rec.longitude.is_none());
    }

    #[test]
    fn check_out_completes_the_day() {
        let mut records = Vec::new();
        check_in(&mut records, "usr_budi", &morning(), None, None).expect("in");
        let rec = check_out(
            &mut records,
            "usr_budi",
            &afternoon(),
            Some("pulang cepat".to_string()),
        )
        .expect("out");
        assert!(rec.check_out_at.is_some());
        assert_eq!(rec.check_out_note.as_deref(), Some("pulang cepat"));

        let err = check_out(&mut records, "usr_budi", &afternoon(), None).expect_err("again");
        assert_eq!(err, DomainError::AlreadyCheckedOut);
    }

    #[test]
    fn check_out_without_check_in_is_rejected() {
        let mut records = Vec::new();
        let err = check_out(&mut records, "usr_budi", &morning(), None).expect_err("no record");
        assert_eq!(err, DomainError::NotCheckedInYet);
    }

    #[test]
    fn check_out_never_lands_on_a_record_without_check_in() {
        let mut records = vec![AttendanceRecord {
            id: "att_partial".to_string(),
            account_id: "usr_budi".to_string(),
            date: "2024-05-14".to_string(),
            check_in_at: None,
            check_out_at: None,
            check_in_note: None,
            check_out_note: None,
            latitude: None,
            longitude: None,
            created_at: "2024-05-14T06:00:00+07:00".to_string(),
        }];
        let err = check_out(&mut records, "usr_budi", &afternoon(), None).expect_err("partial");
        assert_eq!(err, DomainError::NotCheckedInYet);
        assert!(records[0].check_out_at.is_none());
    }

    #[test]
    fn partial_record_is_completed_instead_of_duplicated() {
        let mut records = vec![AttendanceRecord {
            id: "att_partial".to_string(),
            account_id: "usr_budi".to_string(),
            date: "2024-05-14".to_string(),
            check_in_at: None,
            check_out_at: None,
            check_in_note: None,
            check_out_note: None,
            latitude: None,
            longitude: None,
            created_at: "2024-05-14T06:00:00+07:00".to_string(),
        }];
        let rec = check_in(
            &mut records,
            "usr_budi",
            &morning(),
            Some("telat".to_string()),
            Some(here()),
        )
        .expect("check in");

        assert_eq!(records.len(), 1);
        assert_eq!(rec.id, "att_partial");
        assert!(rec.check_in_at.is_some());
        assert_eq!(rec.check_in_note.as_deref(), Some("telat"));
        assert_eq!(rec.latitude, Some(-6.2001));
    }

    #[test]
    fn one_record_per_account_per_day() {
        let mut records = Vec::new();
        check_in(&mut records, "usr_budi", &morning(), None, None).expect("budi");
        check_in(&mut records, "usr_siti", &morning(), None, None).expect("siti same day");
        check_in(
            &mut records,
            "usr_budi",
            &fixed_clock(2024, 5, 15, 7, 30),
            None,
            None,
        )
        .expect("budi next day");

        assert_eq!(records.len(), 3);
        for a in &records {
            let dupes = records
                .iter()
                .filter(|b| b.account_id == a.account_id && b.date == a.date)
                .count();
            assert_eq!(dupes, 1);
        }
    }

    #[test]
    fn today_status_follows_the_state_machine() {
        let mut records = Vec::new();
        let clock = morning();

        let s = today_status(&records, "usr_budi", &clock);
        assert!(s.record.is_none() && s.can_check_in && !s.can_check_out);

        check_in(&mut records, "usr_budi", &clock, None, None).expect("in");
        let s = today_status(&records, "usr_budi", &clock);
        assert!(s.record.is_some() && !s.can_check_in && s.can_check_out);

        check_out(&mut records, "usr_budi", &afternoon(), None).expect("out");
        let s = today_status(&records, "usr_budi", &afternoon());
        assert!(!s.can_check_in && !s.can_check_out);
    }
}

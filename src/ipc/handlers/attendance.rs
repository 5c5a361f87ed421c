use serde_json::json;

use crate::attendance;
use crate::device::GeoPoint;
use crate::ipc::error::{domain, err, ok};
use crate::ipc::helpers::{f64_param, note_param, str_param};
use crate::ipc::types::{AppState, Request};
use crate::model::Account;
use crate::query;

/// Coordinates supplied by the presentation layer (which sits next to the
/// actual positioning device) win; otherwise the injected geolocator is
/// asked. Either way absence is fine.
fn position_param(params: &serde_json::Value) -> Option<GeoPoint> {
    let latitude = f64_param(params, "latitude")?;
    let longitude = f64_param(params, "longitude")?;
    Some(GeoPoint {
        latitude,
        longitude,
    })
}

fn account_json(account: Option<&Account>) -> serde_json::Value {
    match account {
        Some(a) => json!({
            "id": a.id,
            "name": a.name,
            "email": a.email,
            "studentId": a.student_id,
            "className": a.class_name,
        }),
        None => serde_json::Value::Null,
    }
}

fn handle_check_in(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(ws) = state.workspace.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };
    let Some(me) = ws.session.clone() else {
        return err(&req.id, "no_session", "log in first");
    };
    let note = note_param(&req.params, "note");
    let position = position_param(&req.params).or_else(|| state.geo.request_position());

    match attendance::check_in(&mut ws.attendance, &me.id, state.clock.as_ref(), note, position) {
        Ok(record) => {
            if let Err(e) = ws.store.save_attendance(&ws.attendance) {
                return err(&req.id, "store_write_failed", e.to_string());
            }
            ok(&req.id, json!({ "record": record }))
        }
        Err(e) => domain(&req.id, &e),
    }
}

fn handle_check_out(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(ws) = state.workspace.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };
    let Some(me) = ws.session.clone() else {
        return err(&req.id, "no_session", "log in first");
    };
    let note = note_param(&req.params, "note");

    match attendance::check_out(&mut ws.attendance, &me.id, state.clock.as_ref(), note) {
        Ok(record) => {
            if let Err(e) = ws.store.save_attendance(&ws.attendance) {
                return err(&req.id, "store_write_failed", e.to_string());
            }
            ok(&req.id, json!({ "record": record }))
        }
        Err(e) => domain(&req.id, &e),
    }
}

fn handle_today(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(ws) = state.workspace.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };
    let Some(me) = ws.session.as_ref() else {
        return err(&req.id, "no_session", "log in first");
    };

    let status = attendance::today_status(&ws.attendance, &me.id, state.clock.as_ref());
    ok(
        &req.id,
        json!({
            "record": status.record,
            "canCheckIn": status.can_check_in,
            "canCheckOut": status.can_check_out,
        }),
    )
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(ws) = state.workspace.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };
    let Some(me) = ws.session.as_ref() else {
        return err(&req.id, "no_session", "log in first");
    };
    let filter = str_param(&req.params, "filterAccountId").unwrap_or_else(|| "all".to_string());
    let search = str_param(&req.params, "search").unwrap_or_default();

    let rows = query::list_attendance(me, &ws.accounts, &ws.attendance, &filter, &search);
    let rows_json: Vec<serde_json::Value> = rows
        .into_iter()
        .map(|record| {
            let mut row = serde_json::to_value(record).unwrap_or_else(|_| json!({}));
            // Roster join happens at render time; a removed account leaves
            // the record in place with a null account.
            row["account"] =
                account_json(ws.accounts.iter().find(|a| a.id == record.account_id));
            row
        })
        .collect();
    ok(&req.id, json!({ "rows": rows_json }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.checkIn" => Some(handle_check_in(state, req)),
        "attendance.checkOut" => Some(handle_check_out(state, req)),
        "attendance.today" => Some(handle_today(state, req)),
        "attendance.list" => Some(handle_list(state, req)),
        _ => None,
    }
}

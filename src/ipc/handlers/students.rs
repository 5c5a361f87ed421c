use serde_json::json;

use crate::ipc::error::{domain, err, ok};
use crate::ipc::helpers::{note_param, str_param};
use crate::ipc::types::{AppState, Request, Workspace};
use crate::model::Role;
use crate::roster::{self, NewStudent};
use crate::seed::DEMO_PASSWORD;

fn admin_guard(ws: &Workspace, req: &Request) -> Option<serde_json::Value> {
    let Some(me) = ws.session.as_ref() else {
        return Some(err(&req.id, "no_session", "log in first"));
    };
    if me.role != Role::Admin {
        return Some(err(&req.id, "forbidden", "admin role required"));
    }
    None
}

fn handle_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(ws) = state.workspace.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };
    if let Some(resp) = admin_guard(ws, req) {
        return resp;
    }

    let new = NewStudent {
        name: str_param(&req.params, "name").unwrap_or_default(),
        email: str_param(&req.params, "email").unwrap_or_default(),
        // The admin form prefills the demo password; an omitted param means
        // the default was kept.
        password: str_param(&req.params, "password")
            .unwrap_or_else(|| DEMO_PASSWORD.to_string()),
        student_id: str_param(&req.params, "studentId").unwrap_or_default(),
        class_name: note_param(&req.params, "className"),
    };

    match roster::add_student(&mut ws.accounts, new, state.clock.as_ref()) {
        Ok(account) => {
            if let Err(e) = ws.store.save_accounts(&ws.accounts) {
                return err(&req.id, "store_write_failed", e.to_string());
            }
            ok(&req.id, json!({ "account": account }))
        }
        Err(e) => domain(&req.id, &e),
    }
}

fn handle_remove(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(ws) = state.workspace.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };
    if let Some(resp) = admin_guard(ws, req) {
        return resp;
    }
    let Some(account_id) = str_param(&req.params, "accountId") else {
        return err(&req.id, "bad_params", "missing accountId");
    };

    // Confirmation is the caller's job; removal here is unconditional, and
    // the account's attendance records are deliberately left behind.
    if !roster::remove_student(&mut ws.accounts, &account_id) {
        return err(&req.id, "not_found", "account not found");
    }
    if let Err(e) = ws.store.save_accounts(&ws.accounts) {
        return err(&req.id, "store_write_failed", e.to_string());
    }
    ok(&req.id, json!({ "removed": true }))
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(ws) = state.workspace.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };
    if let Some(resp) = admin_guard(ws, req) {
        return resp;
    }
    ok(&req.id, json!({ "students": roster::students(&ws.accounts) }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.add" => Some(handle_add(state, req)),
        "students.remove" => Some(handle_remove(state, req)),
        "students.list" => Some(handle_list(state, req)),
        _ => None,
    }
}

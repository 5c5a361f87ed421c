use serde_json::json;

use crate::auth;
use crate::ipc::error::{domain, err, ok};
use crate::ipc::helpers::str_param;
use crate::ipc::types::{AppState, Request};

fn handle_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(ws) = state.workspace.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };
    let Some(email) = str_param(&req.params, "email") else {
        return err(&req.id, "bad_params", "missing email");
    };
    let Some(password) = str_param(&req.params, "password") else {
        return err(&req.id, "bad_params", "missing password");
    };

    let account = match auth::login(&ws.accounts, &email, &password) {
        Ok(account) => account.clone(),
        Err(e) => return domain(&req.id, &e),
    };
    ws.session = Some(account.clone());
    if let Err(e) = ws.store.save_session(ws.session.as_ref()) {
        return err(&req.id, "store_write_failed", e.to_string());
    }
    ok(&req.id, json!({ "account": account }))
}

fn handle_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(ws) = state.workspace.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };
    // Unconditional: logging out while logged out is fine.
    ws.session = None;
    if let Err(e) = ws.store.save_session(None) {
        return err(&req.id, "store_write_failed", e.to_string());
    }
    ok(&req.id, json!({}))
}

fn handle_session(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(ws) = state.workspace.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first");
    };
    ok(&req.id, json!({ "account": ws.session }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "auth.login" => Some(handle_login(state, req)),
        "auth.logout" => Some(handle_logout(state, req)),
        "auth.session" => Some(handle_session(state, req)),
        _ => None,
    }
}

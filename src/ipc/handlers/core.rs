use std::path::PathBuf;

use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request, Workspace};
use crate::seed;
use crate::store::Store;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "workspacePath": state
                .workspace
                .as_ref()
                .map(|w| w.path.to_string_lossy().to_string())
        }),
    )
}

/// Opens (or creates) the store under the given directory, runs first-run
/// seeding, and loads the three slots into working copies. A persisted
/// session is restored as-is, so a restart lands back on the logged-in
/// account.
fn handle_workspace_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(path) = p else {
        return err(&req.id, "bad_params", "missing params.path");
    };

    let store = match Store::open(&path) {
        Ok(store) => store,
        Err(e) => return err(&req.id, "store_open_failed", format!("{e:?}")),
    };
    if let Err(e) = seed::ensure_seed(&store, state.clock.as_ref()) {
        return err(&req.id, "store_write_failed", format!("{e:?}"));
    }

    let accounts = store.load_accounts();
    let attendance = store.load_attendance();
    let session = store.load_session();
    state.workspace = Some(Workspace {
        path: path.clone(),
        store,
        accounts,
        attendance,
        session,
    });
    ok(&req.id, json!({ "workspacePath": path.to_string_lossy() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "workspace.select" => Some(handle_workspace_select(state, req)),
        _ => None,
    }
}

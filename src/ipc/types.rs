use std::path::PathBuf;

use serde::Deserialize;

use crate::device::{Clock, Geolocator, NoDevice, SystemClock};
use crate::model::{Account, AttendanceRecord};
use crate::store::Store;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// An opened workspace: the durable store plus the in-memory working copies
/// of its three slots. Every mutation writes the owning collection back
/// before the response goes out.
pub struct Workspace {
    pub path: PathBuf,
    pub store: Store,
    pub accounts: Vec<Account>,
    pub attendance: Vec<AttendanceRecord>,
    pub session: Option<Account>,
}

pub struct AppState {
    pub workspace: Option<Workspace>,
    pub clock: Box<dyn Clock>,
    pub geo: Box<dyn Geolocator>,
}

impl AppState {
    pub fn new() -> AppState {
        AppState {
            workspace: None,
            clock: Box::new(SystemClock),
            geo: Box::new(NoDevice),
        }
    }
}

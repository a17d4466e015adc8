pub mod branches;
pub mod companies;
pub mod inventory;
pub mod reports;
pub mod staff;
pub mod stations;

use crate::state::AppState;
use tauri::{AppHandle, Manager};

pub trait AppStateExt {
    fn dashboard(&self) -> &AppState;
}

impl AppStateExt for AppHandle {
    fn dashboard(&self) -> &AppState {
        self.state::<AppState>().inner()
    }
}

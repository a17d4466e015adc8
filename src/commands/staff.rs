use crate::commands::AppStateExt;
use crate::models::{BranchWithRelations, Staff, StaffFilter};
use serde::Serialize;
use tauri::AppHandle;

#[derive(Debug, Serialize)]
pub struct StaffProfile {
    #[serde(flatten)]
    pub staff: Staff,
    pub branch: Option<BranchWithRelations>,
}

#[tauri::command]
pub fn get_staff(app: AppHandle, filter: Option<StaffFilter>) -> Result<Vec<Staff>, String> {
    app.dashboard()
        .staff(&filter.unwrap_or_default())
        .map_err(|e| e.to_string())
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn get_staff_member(app: AppHandle, staffId: String) -> Result<Option<StaffProfile>, String> {
    let found = app
        .dashboard()
        .staff_member(&staffId)
        .map_err(|e| e.to_string())?;

    Ok(found.map(|(staff, branch)| StaffProfile { staff, branch }))
}

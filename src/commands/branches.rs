use crate::commands::AppStateExt;
use crate::models::{Branch, BranchFilter, BranchWithRelations, CreateBranch};
use tauri::AppHandle;

#[tauri::command]
pub fn get_branches(
    app: AppHandle,
    filter: Option<BranchFilter>,
) -> Result<Vec<BranchWithRelations>, String> {
    app.dashboard()
        .branches(&filter.unwrap_or_default())
        .map_err(|e| e.to_string())
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn get_branch(app: AppHandle, branchId: String) -> Result<Option<BranchWithRelations>, String> {
    app.dashboard().branch(&branchId).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn add_branch(app: AppHandle, branch: CreateBranch) -> Result<Branch, String> {
    app.dashboard().add_branch(branch).map_err(|e| e.to_string())
}

use crate::commands::AppStateExt;
use crate::models::CompanyWithStations;
use tauri::AppHandle;

#[tauri::command]
pub fn get_main_company(app: AppHandle) -> Result<CompanyWithStations, String> {
    app.dashboard()
        .main_company()
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "No company configured".to_string())
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn get_company(app: AppHandle, companyId: String) -> Result<Option<CompanyWithStations>, String> {
    app.dashboard().company(&companyId).map_err(|e| e.to_string())
}

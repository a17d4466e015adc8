use crate::commands::AppStateExt;
use crate::models::{DashboardStats, StationAnalytics};
use tauri::AppHandle;

#[tauri::command]
pub fn get_dashboard_stats(app: AppHandle) -> Result<DashboardStats, String> {
    app.dashboard()
        .dashboard_stats()
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "No company configured".to_string())
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn get_station_analytics(app: AppHandle, stationId: String) -> Result<Option<StationAnalytics>, String> {
    app.dashboard()
        .station_analytics(&stationId)
        .map_err(|e| e.to_string())
}

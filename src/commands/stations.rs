use crate::commands::AppStateExt;
use crate::models::{CreateStation, Station, StationFilter, StationWithBranches, UpdateStation};
use tauri::AppHandle;

#[tauri::command]
pub fn get_stations(
    app: AppHandle,
    filter: Option<StationFilter>,
) -> Result<Vec<StationWithBranches>, String> {
    app.dashboard()
        .stations(&filter.unwrap_or_default())
        .map_err(|e| e.to_string())
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn get_station(app: AppHandle, stationId: String) -> Result<Option<StationWithBranches>, String> {
    app.dashboard().station(&stationId).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn add_station(app: AppHandle, station: CreateStation) -> Result<Station, String> {
    app.dashboard().add_station(station).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn edit_station(app: AppHandle, station: UpdateStation) -> Result<Station, String> {
    app.dashboard().edit_station(station).map_err(|e| e.to_string())
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn delete_station(app: AppHandle, stationId: String) -> Result<(), String> {
    app.dashboard()
        .delete_station(&stationId)
        .map_err(|e| e.to_string())
}

use crate::commands::AppStateExt;
use crate::models::{CreateTank, InventoryTransaction, RecordReading, TankFilter, TankWithProduct};
use tauri::AppHandle;

#[tauri::command]
pub fn get_tanks(app: AppHandle, filter: Option<TankFilter>) -> Result<Vec<TankWithProduct>, String> {
    app.dashboard()
        .tanks(&filter.unwrap_or_default())
        .map_err(|e| e.to_string())
}

#[tauri::command]
#[allow(non_snake_case)]
pub fn get_tank(app: AppHandle, tankId: String) -> Result<Option<TankWithProduct>, String> {
    app.dashboard().tank(&tankId).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn get_low_stock(app: AppHandle, threshold: Option<f64>) -> Result<Vec<TankWithProduct>, String> {
    app.dashboard().low_stock(threshold).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn add_tank(app: AppHandle, tank: CreateTank) -> Result<TankWithProduct, String> {
    app.dashboard().add_tank(tank).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn record_reading(app: AppHandle, reading: RecordReading) -> Result<TankWithProduct, String> {
    app.dashboard()
        .record_reading(reading)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn apply_transaction(
    app: AppHandle,
    transaction: InventoryTransaction,
) -> Result<TankWithProduct, String> {
    app.dashboard()
        .apply_transaction(transaction)
        .map_err(|e| e.to_string())
}

#[cfg(feature = "desktop")]
mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod seed;
pub mod state;
pub mod stats;
pub mod store;
pub mod views;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use state::AppState;
pub use store::Dataset;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use commands::{branches, companies, inventory, reports, staff, stations};
    use std::path::PathBuf;
    use tauri::Manager;

    logging::init_tracing();

    tauri::Builder::default()
        .setup(|app| {
            let config_dir = app.path().app_config_dir()?;
            let mut config = config::load_config(Some(&config_dir.join("config.toml")))?;

            // Relative database paths live in the app data directory
            if config.database.path != config::IN_MEMORY_PATH {
                let db_path = PathBuf::from(&config.database.path);
                if db_path.is_relative() {
                    config.database.path = app
                        .path()
                        .app_data_dir()?
                        .join(db_path)
                        .to_string_lossy()
                        .into_owned();
                }
            }

            let state = AppState::bootstrap(&config)?;
            app.manage(state);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Companies
            companies::get_main_company,
            companies::get_company,
            // Stations
            stations::get_stations,
            stations::get_station,
            stations::add_station,
            stations::edit_station,
            stations::delete_station,
            // Branches
            branches::get_branches,
            branches::get_branch,
            branches::add_branch,
            // Staff
            staff::get_staff,
            staff::get_staff_member,
            // Inventory
            inventory::get_tanks,
            inventory::get_tank,
            inventory::get_low_stock,
            inventory::add_tank,
            inventory::record_reading,
            inventory::apply_transaction,
            // Reports
            reports::get_dashboard_stats,
            reports::get_station_analytics,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

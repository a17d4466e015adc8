use crate::config::{Config, InventoryConfig};
use crate::db::Database;
use crate::error::{Error, Result};
use crate::gateway::{new_id, WriteGateway};
use crate::models::{
    Branch, BranchFilter, BranchWithRelations, CompanyWithStations, CreateBranch, CreateStation,
    CreateTank, DashboardStats, InventoryTransaction, RecordReading, Staff, StaffFilter, Station,
    StationAnalytics, StationFilter, StationWithBranches, Tank, TankFilter, TankInventory,
    TankWithProduct, TransactionKind, UpdateStation,
};
use crate::seed;
use crate::stats;
use crate::store::Dataset;
use crate::views;
use chrono::Utc;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Session state: the dataset every view is built from, and the gateway
/// every write goes through before it is applied to the dataset.
pub struct AppState {
    inventory: InventoryConfig,
    data: RwLock<Dataset>,
    gateway: Box<dyn WriteGateway>,
}

fn require(value: &str, message: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(message));
    }
    Ok(trimmed.to_string())
}

fn require_stock_in_range(stock: f64, capacity: f64) -> Result<()> {
    if !(0.0..=capacity).contains(&stock) {
        return Err(Error::validation(format!(
            "Stock level must be between 0 and {}L",
            capacity
        )));
    }
    Ok(())
}

impl AppState {
    pub fn new(inventory: InventoryConfig, data: Dataset, gateway: Box<dyn WriteGateway>) -> Self {
        Self {
            inventory,
            data: RwLock::new(data),
            gateway,
        }
    }

    /// Open the configured database, seed it with the demo dataset on first
    /// run, and load the session dataset from it.
    pub fn bootstrap(config: &Config) -> Result<Self> {
        let db = Database::open(&config.database.path)?;
        db.initialize()?;
        if db.seed_if_empty(&seed::mock_dataset())? {
            tracing::info!("Database was empty, loaded demo dataset");
        }

        let data = db.load_dataset()?;
        let issues = data.report_integrity();
        tracing::info!(
            stations = data.stations.len(),
            branches = data.branches.len(),
            tanks = data.tanks.len(),
            issues,
            "Dataset loaded"
        );

        Ok(Self::new(config.inventory, data, Box::new(db)))
    }

    pub fn inventory_config(&self) -> InventoryConfig {
        self.inventory
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Dataset>> {
        self.data.read().map_err(|_| Error::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Dataset>> {
        self.data.write().map_err(|_| Error::LockPoisoned)
    }

    pub fn snapshot(&self) -> Result<Dataset> {
        Ok(self.read()?.clone())
    }

    // ===== Reads =====

    pub fn main_company(&self) -> Result<Option<CompanyWithStations>> {
        let data = self.read()?;
        Ok(views::main_company(&data))
    }

    pub fn company(&self, company_id: &str) -> Result<Option<CompanyWithStations>> {
        let data = self.read()?;
        Ok(views::company_with_stations(&data, company_id))
    }

    pub fn station(&self, station_id: &str) -> Result<Option<StationWithBranches>> {
        let data = self.read()?;
        Ok(views::station_with_branches(&data, station_id))
    }

    pub fn stations(&self, filter: &StationFilter) -> Result<Vec<StationWithBranches>> {
        let data = self.read()?;
        Ok(views::filter_stations(&data, filter))
    }

    pub fn branch(&self, branch_id: &str) -> Result<Option<BranchWithRelations>> {
        let data = self.read()?;
        Ok(views::branch_with_relations(&data, branch_id))
    }

    pub fn branches(&self, filter: &BranchFilter) -> Result<Vec<BranchWithRelations>> {
        let data = self.read()?;
        Ok(views::filter_branches(&data, filter))
    }

    pub fn tank(&self, tank_id: &str) -> Result<Option<TankWithProduct>> {
        let data = self.read()?;
        Ok(views::tank_with_product(&data, tank_id))
    }

    pub fn tanks(&self, filter: &TankFilter) -> Result<Vec<TankWithProduct>> {
        let data = self.read()?;
        Ok(views::filter_tanks(
            &data,
            filter,
            self.inventory.low_stock_threshold,
            self.inventory.medium_stock_threshold,
        ))
    }

    pub fn low_stock(&self, threshold: Option<f64>) -> Result<Vec<TankWithProduct>> {
        let threshold = threshold.unwrap_or(self.inventory.low_stock_threshold);
        let data = self.read()?;
        Ok(views::low_stock_tanks(&data, threshold))
    }

    pub fn staff(&self, filter: &StaffFilter) -> Result<Vec<Staff>> {
        let data = self.read()?;
        Ok(views::filter_staff(&data, filter))
    }

    pub fn staff_member(&self, staff_id: &str) -> Result<Option<(Staff, Option<BranchWithRelations>)>> {
        let data = self.read()?;
        Ok(data
            .staff_member(staff_id)
            .cloned()
            .map(|member| (member, views::staff_branch(&data, staff_id))))
    }

    pub fn dashboard_stats(&self) -> Result<Option<DashboardStats>> {
        Ok(self
            .main_company()?
            .map(|company| stats::dashboard_stats(&company, self.inventory.low_stock_threshold)))
    }

    pub fn station_analytics(&self, station_id: &str) -> Result<Option<StationAnalytics>> {
        Ok(self
            .station(station_id)?
            .map(|station| stats::station_analytics(&station)))
    }

    // ===== Writes =====

    pub fn add_station(&self, form: CreateStation) -> Result<Station> {
        let station_name = require(&form.station_name, "Please fill in all required fields")?;
        let station_code = require(&form.station_code, "Please fill in all required fields")?;

        let mut data = self.write()?;
        if data.company(&form.company_id).is_none() {
            return Err(Error::not_found("company", form.company_id));
        }

        let now = Utc::now();
        let station = Station {
            station_id: new_id("station"),
            company_id: form.company_id,
            station_name,
            station_code,
            created_at: now,
            updated_at: now,
        };

        self.gateway.insert_station(&station)?;
        data.push_station(station.clone());

        tracing::info!(station_id = %station.station_id, "Station created");
        Ok(station)
    }

    pub fn edit_station(&self, form: UpdateStation) -> Result<Station> {
        let station_name = require(&form.station_name, "Please fill in all required fields")?;
        let station_code = require(&form.station_code, "Please fill in all required fields")?;

        let mut data = self.write()?;
        let existing = data
            .station(&form.station_id)
            .cloned()
            .ok_or_else(|| Error::not_found("station", &form.station_id))?;

        let station = Station {
            station_name,
            station_code,
            updated_at: Utc::now(),
            ..existing
        };

        self.gateway.update_station(&station)?;
        data.update_station(station.clone());

        tracing::info!(station_id = %station.station_id, "Station updated");
        Ok(station)
    }

    pub fn delete_station(&self, station_id: &str) -> Result<()> {
        let mut data = self.write()?;
        if data.station(station_id).is_none() {
            return Err(Error::not_found("station", station_id));
        }
        if data.branches.iter().any(|b| b.station_id == station_id) {
            tracing::warn!(station_id, "Refused to delete station with branches");
            return Err(Error::validation(
                "Cannot delete station with existing branches",
            ));
        }

        self.gateway.delete_station(station_id)?;
        data.remove_station(station_id);

        tracing::info!(station_id, "Station deleted");
        Ok(())
    }

    pub fn add_branch(&self, form: CreateBranch) -> Result<Branch> {
        let message = "Please fill in all required fields";
        let branch_name = require(&form.branch_name, message)?;
        let address = require(&form.physical_address, message)?;
        let lga = require(&form.lga, message)?;
        let state = require(&form.state, message)?;

        let mut data = self.write()?;
        if data.station(&form.station_id).is_none() {
            return Err(Error::not_found("station", form.station_id));
        }

        let now = Utc::now();
        let branch = Branch {
            branch_id: new_id("branch"),
            station_id: form.station_id,
            branch_name,
            lga,
            physical_address: format!("{}, {}", address, state),
            manager_id: None,
            created_at: now,
            updated_at: now,
        };

        self.gateway.insert_branch(&branch)?;
        data.push_branch(branch.clone());

        tracing::info!(branch_id = %branch.branch_id, "Branch created");
        Ok(branch)
    }

    pub fn add_tank(&self, form: CreateTank) -> Result<TankWithProduct> {
        let tank_name = require(&form.tank_name, "Please fill in all required fields")?;
        if !(form.capacity_litres > 0.0) {
            return Err(Error::validation("Capacity must be greater than 0"));
        }
        let opening_stock = form.current_stock.unwrap_or(0.0);
        if opening_stock > form.capacity_litres {
            return Err(Error::validation(
                "Current stock cannot exceed tank capacity",
            ));
        }
        if opening_stock < 0.0 {
            return Err(Error::validation("Current stock cannot be negative"));
        }

        let mut data = self.write()?;
        if data.branch(&form.branch_id).is_none() {
            return Err(Error::not_found("branch", form.branch_id));
        }
        if data.product(&form.product_id).is_none() {
            return Err(Error::not_found("product", form.product_id));
        }

        let now = Utc::now();
        let tank = Tank {
            tank_id: new_id("tank"),
            branch_id: form.branch_id,
            product_id: form.product_id,
            capacity_litres: form.capacity_litres,
            tank_name: Some(tank_name),
            created_at: now,
            updated_at: now,
        };
        let opening = (opening_stock > 0.0).then(|| TankInventory {
            inventory_id: new_id("inv"),
            tank_id: tank.tank_id.clone(),
            current_stock_litres: opening_stock,
            measured_at: now,
            recorded_by: None,
            notes: Some("Opening stock".to_string()),
        });

        self.gateway.insert_tank(&tank, opening.as_ref())?;
        let tank_id = tank.tank_id.clone();
        data.push_tank(tank);
        if let Some(reading) = opening {
            data.push_inventory(reading);
        }

        tracing::info!(tank_id = %tank_id, "Tank created");
        views::tank_with_product(&data, &tank_id).ok_or_else(|| Error::not_found("tank", tank_id))
    }

    pub fn record_reading(&self, form: RecordReading) -> Result<TankWithProduct> {
        let mut data = self.write()?;
        self.record_reading_locked(&mut data, form)
    }

    fn record_reading_locked(
        &self,
        data: &mut Dataset,
        form: RecordReading,
    ) -> Result<TankWithProduct> {
        let tank = data
            .tank(&form.tank_id)
            .cloned()
            .ok_or_else(|| Error::not_found("tank", &form.tank_id))?;
        require_stock_in_range(form.current_stock_litres, tank.capacity_litres)?;

        let reading = TankInventory {
            inventory_id: new_id("inv"),
            tank_id: tank.tank_id.clone(),
            current_stock_litres: form.current_stock_litres,
            measured_at: Utc::now(),
            recorded_by: form.recorded_by,
            notes: form.notes.filter(|n| !n.trim().is_empty()),
        };

        self.gateway.insert_reading(&reading)?;
        data.push_inventory(reading);

        tracing::info!(tank_id = %tank.tank_id, stock = form.current_stock_litres, "Reading recorded");
        views::tank_with_product(data, &tank.tank_id)
            .ok_or_else(|| Error::not_found("tank", tank.tank_id))
    }

    /// Add or remove `quantity` litres and record the resulting level.
    /// The write lock is held from the stock check until the reading is stored.
    pub fn apply_transaction(&self, tx: InventoryTransaction) -> Result<TankWithProduct> {
        if !(tx.quantity > 0.0) {
            return Err(Error::validation(
                "Please fill in all required fields with valid values",
            ));
        }

        let mut data = self.write()?;
        let current = views::tank_with_product(&data, &tx.tank_id)
            .ok_or_else(|| Error::not_found("tank", &tx.tank_id))?;
        let stock = current.current_stock_litres();
        let capacity = current.tank.capacity_litres;

        let new_stock = match tx.kind {
            TransactionKind::Inbound => {
                let space = capacity - stock;
                if tx.quantity > space {
                    return Err(Error::validation(format!(
                        "Cannot add {}L. Only {}L space available.",
                        tx.quantity, space
                    )));
                }
                stock + tx.quantity
            }
            TransactionKind::Outbound => {
                if tx.quantity > stock {
                    return Err(Error::validation(format!(
                        "Cannot remove {}L. Only {}L available.",
                        tx.quantity, stock
                    )));
                }
                stock - tx.quantity
            }
        };

        let note = match tx.kind {
            TransactionKind::Inbound => format!("Inbound {}L", tx.quantity),
            TransactionKind::Outbound => format!("Outbound {}L", tx.quantity),
        };

        self.record_reading_locked(
            &mut data,
            RecordReading {
                tank_id: tx.tank_id,
                current_stock_litres: new_stock,
                recorded_by: tx.recorded_by,
                notes: Some(note),
            },
        )
    }
}

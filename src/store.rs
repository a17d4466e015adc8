use crate::models::{Branch, Company, Product, Staff, Station, Tank, TankInventory};
use serde::Serialize;
use std::fmt;

/// Flat, normalized collections in insertion order. Built once per process
/// and handed by reference to the view builders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub companies: Vec<Company>,
    pub stations: Vec<Station>,
    pub branches: Vec<Branch>,
    pub staff: Vec<Staff>,
    pub products: Vec<Product>,
    pub tanks: Vec<Tank>,
    pub inventories: Vec<TankInventory>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum IntegrityIssue {
    DanglingReference {
        kind: &'static str,
        id: String,
        field: &'static str,
        target: String,
    },
    StockOutOfRange {
        tank_id: String,
        stock_litres: f64,
        capacity_litres: f64,
    },
    ZeroCapacity {
        tank_id: String,
    },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::DanglingReference {
                kind,
                id,
                field,
                target,
            } => write!(f, "{} {} has dangling {} -> {}", kind, id, field, target),
            IntegrityIssue::StockOutOfRange {
                tank_id,
                stock_litres,
                capacity_litres,
            } => write!(
                f,
                "tank {} latest stock {}L outside [0, {}L]",
                tank_id, stock_litres, capacity_litres
            ),
            IntegrityIssue::ZeroCapacity { tank_id } => {
                write!(f, "tank {} has no positive capacity", tank_id)
            }
        }
    }
}

impl Dataset {
    pub fn company(&self, id: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.company_id == id)
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.station_id == id)
    }

    pub fn branch(&self, id: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.branch_id == id)
    }

    pub fn staff_member(&self, id: &str) -> Option<&Staff> {
        self.staff.iter().find(|s| s.staff_id == id)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.product_id == id)
    }

    pub fn tank(&self, id: &str) -> Option<&Tank> {
        self.tanks.iter().find(|t| t.tank_id == id)
    }

    /// Reading with the greatest `measured_at` for the tank. On equal
    /// timestamps the earliest reading in collection order wins.
    pub fn latest_inventory(&self, tank_id: &str) -> Option<&TankInventory> {
        self.inventories
            .iter()
            .filter(|inv| inv.tank_id == tank_id)
            .fold(None, |best: Option<&TankInventory>, inv| match best {
                Some(b) if b.measured_at >= inv.measured_at => Some(b),
                _ => Some(inv),
            })
    }

    pub fn integrity_issues(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();
        let mut dangling = |kind, id: &str, field, target: &str| {
            issues.push(IntegrityIssue::DanglingReference {
                kind,
                id: id.to_string(),
                field,
                target: target.to_string(),
            })
        };

        for s in &self.stations {
            if self.company(&s.company_id).is_none() {
                dangling("station", &s.station_id, "company_id", &s.company_id);
            }
        }
        for b in &self.branches {
            if self.station(&b.station_id).is_none() {
                dangling("branch", &b.branch_id, "station_id", &b.station_id);
            }
            if let Some(manager_id) = &b.manager_id {
                if self.staff_member(manager_id).is_none() {
                    dangling("branch", &b.branch_id, "manager_id", manager_id);
                }
            }
        }
        for s in &self.staff {
            if self.branch(&s.branch_id).is_none() {
                dangling("staff", &s.staff_id, "branch_id", &s.branch_id);
            }
        }
        for t in &self.tanks {
            if self.branch(&t.branch_id).is_none() {
                dangling("tank", &t.tank_id, "branch_id", &t.branch_id);
            }
            if self.product(&t.product_id).is_none() {
                dangling("tank", &t.tank_id, "product_id", &t.product_id);
            }
        }
        for inv in &self.inventories {
            if self.tank(&inv.tank_id).is_none() {
                dangling("inventory", &inv.inventory_id, "tank_id", &inv.tank_id);
            }
        }

        for t in &self.tanks {
            if t.capacity_litres <= 0.0 {
                issues.push(IntegrityIssue::ZeroCapacity {
                    tank_id: t.tank_id.clone(),
                });
                continue;
            }
            if let Some(inv) = self.latest_inventory(&t.tank_id) {
                if inv.current_stock_litres < 0.0 || inv.current_stock_litres > t.capacity_litres {
                    issues.push(IntegrityIssue::StockOutOfRange {
                        tank_id: t.tank_id.clone(),
                        stock_litres: inv.current_stock_litres,
                        capacity_litres: t.capacity_litres,
                    });
                }
            }
        }

        issues
    }

    /// Log every integrity issue as a warning and return how many were found.
    pub fn report_integrity(&self) -> usize {
        let issues = self.integrity_issues();
        for issue in &issues {
            tracing::warn!("dataset integrity: {}", issue);
        }
        issues.len()
    }

    // ----- session edits -----

    pub fn push_station(&mut self, station: Station) {
        self.stations.push(station);
    }

    pub fn push_branch(&mut self, branch: Branch) {
        self.branches.push(branch);
    }

    pub fn push_tank(&mut self, tank: Tank) {
        self.tanks.push(tank);
    }

    pub fn push_inventory(&mut self, reading: TankInventory) {
        self.inventories.push(reading);
    }

    /// Replace the station with the same id. Returns false if it is unknown.
    pub fn update_station(&mut self, station: Station) -> bool {
        match self
            .stations
            .iter_mut()
            .find(|s| s.station_id == station.station_id)
        {
            Some(slot) => {
                *slot = station;
                true
            }
            None => false,
        }
    }

    pub fn remove_station(&mut self, id: &str) -> Option<Station> {
        let pos = self.stations.iter().position(|s| s.station_id == id)?;
        Some(self.stations.remove(pos))
    }
}

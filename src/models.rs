use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Company {
    pub company_id: String,
    pub company_name: String,
    pub ceo_user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Station {
    pub station_id: String,
    pub company_id: String,
    pub station_name: String,
    pub station_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Branch {
    pub branch_id: String,
    pub station_id: String,
    pub branch_name: String,
    pub lga: String,
    pub physical_address: String,
    pub manager_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaffRole {
    Manager,
    Attendant,
    Accountant,
    Security,
    Supervisor,
}

impl StaffRole {
    pub const ALL: [StaffRole; 5] = [
        StaffRole::Manager,
        StaffRole::Attendant,
        StaffRole::Accountant,
        StaffRole::Security,
        StaffRole::Supervisor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Manager => "Manager",
            StaffRole::Attendant => "Attendant",
            StaffRole::Accountant => "Accountant",
            StaffRole::Security => "Security",
            StaffRole::Supervisor => "Supervisor",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StaffRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("Unknown staff role: {}", s))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Staff {
    pub staff_id: String,
    pub branch_id: String,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub role: StaffRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    pub product_id: String,
    pub product_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Tank {
    pub tank_id: String,
    pub branch_id: String,
    pub product_id: String,
    pub capacity_litres: f64,
    pub tank_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TankInventory {
    pub inventory_id: String,
    pub tank_id: String,
    pub current_stock_litres: f64,
    pub measured_at: DateTime<Utc>,
    pub recorded_by: Option<String>,
    pub notes: Option<String>,
}

// Nested read models. The parent record is flattened so the UI sees
// the same shape as the flat record plus its relations.

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TankWithProduct {
    #[serde(flatten)]
    pub tank: Tank,
    pub product: Option<Product>,
    pub latest_inventory: Option<TankInventory>,
}

impl TankWithProduct {
    pub fn current_stock_litres(&self) -> f64 {
        self.latest_inventory
            .as_ref()
            .map(|inv| inv.current_stock_litres)
            .unwrap_or(0.0)
    }

    pub fn product_name(&self) -> &str {
        self.product
            .as_ref()
            .map(|p| p.product_name.as_str())
            .unwrap_or("Unknown Product")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BranchWithRelations {
    #[serde(flatten)]
    pub branch: Branch,
    pub manager: Option<Staff>,
    pub staff: Vec<Staff>,
    pub tanks: Vec<TankWithProduct>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StationWithBranches {
    #[serde(flatten)]
    pub station: Station,
    pub branches: Vec<BranchWithRelations>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CompanyWithStations {
    #[serde(flatten)]
    pub company: Company,
    pub stations: Vec<StationWithBranches>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Low,
    Medium,
    Good,
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Low => "Low Stock",
            StockStatus::Medium => "Medium Stock",
            StockStatus::Good => "Good Stock",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TankFilter {
    pub search: Option<String>,
    pub product_id: Option<String>,
    pub status: Option<StockStatus>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StaffFilter {
    pub search: Option<String>,
    pub role: Option<StaffRole>,
    pub branch_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct BranchFilter {
    pub search: Option<String>,
    pub station_id: Option<String>,
    pub lga: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StationFilter {
    pub search: Option<String>,
    pub company_id: Option<String>,
}

// ----- Form payloads -----

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateStation {
    pub company_id: String,
    pub station_name: String,
    pub station_code: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateStation {
    pub station_id: String,
    pub station_name: String,
    pub station_code: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateBranch {
    pub station_id: String,
    pub branch_name: String,
    pub physical_address: String,
    pub lga: String,
    pub state: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateTank {
    pub branch_id: String,
    pub product_id: String,
    pub tank_name: String,
    pub capacity_litres: f64,
    pub current_stock: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecordReading {
    pub tank_id: String,
    pub current_stock_litres: f64,
    pub recorded_by: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Inbound,
    Outbound,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InventoryTransaction {
    pub tank_id: String,
    pub kind: TransactionKind,
    pub quantity: f64,
    pub recorded_by: Option<String>,
}

// ----- Aggregates -----

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_stations: usize,
    pub total_branches: usize,
    pub total_tanks: usize,
    pub total_staff: usize,
    pub total_capacity_litres: f64,
    pub total_current_stock_litres: f64,
    pub average_stock_level: f64,
    pub low_stock_tanks: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProductStats {
    pub product_name: String,
    pub tank_count: usize,
    pub capacity_litres: f64,
    pub stock_litres: f64,
    pub utilization: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BranchUtilization {
    pub branch_id: String,
    pub branch_name: String,
    pub tank_count: usize,
    pub staff_count: usize,
    pub capacity_litres: f64,
    pub stock_litres: f64,
    pub utilization: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StationAnalytics {
    pub station_id: String,
    pub total_branches: usize,
    pub total_tanks: usize,
    pub total_staff: usize,
    pub total_capacity_litres: f64,
    pub total_current_stock_litres: f64,
    pub stock_utilization: f64,
    pub average_staff_per_branch: f64,
    pub average_tanks_per_branch: f64,
    pub products: Vec<ProductStats>,
    pub branches: Vec<BranchUtilization>,
}

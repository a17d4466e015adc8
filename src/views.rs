//! Nested read models assembled on demand from the flat [`Dataset`].
//!
//! Every function is a pure read. Unknown ids yield `None`; a dangling
//! relation inside an otherwise valid record yields `None` for that field
//! only.

use crate::models::{
    BranchFilter, BranchWithRelations, CompanyWithStations, Staff, StaffFilter, StationFilter,
    StationWithBranches, StockStatus, TankFilter, TankWithProduct,
};
use crate::store::Dataset;

pub const DEFAULT_LOW_STOCK_THRESHOLD: f64 = 0.2;
pub const DEFAULT_MEDIUM_STOCK_THRESHOLD: f64 = 0.5;

pub fn tank_with_product(data: &Dataset, tank_id: &str) -> Option<TankWithProduct> {
    let tank = data.tank(tank_id)?;

    Some(TankWithProduct {
        tank: tank.clone(),
        product: data.product(&tank.product_id).cloned(),
        latest_inventory: data.latest_inventory(tank_id).cloned(),
    })
}

pub fn branch_with_relations(data: &Dataset, branch_id: &str) -> Option<BranchWithRelations> {
    let branch = data.branch(branch_id)?;

    let manager = branch
        .manager_id
        .as_deref()
        .and_then(|id| data.staff_member(id))
        .cloned();
    let staff = data
        .staff
        .iter()
        .filter(|s| s.branch_id == branch_id)
        .cloned()
        .collect();
    let tanks = data
        .tanks
        .iter()
        .filter(|t| t.branch_id == branch_id)
        .filter_map(|t| tank_with_product(data, &t.tank_id))
        .collect();

    Some(BranchWithRelations {
        branch: branch.clone(),
        manager,
        staff,
        tanks,
    })
}

pub fn station_with_branches(data: &Dataset, station_id: &str) -> Option<StationWithBranches> {
    let station = data.station(station_id)?;

    let branches = data
        .branches
        .iter()
        .filter(|b| b.station_id == station_id)
        .filter_map(|b| branch_with_relations(data, &b.branch_id))
        .collect();

    Some(StationWithBranches {
        station: station.clone(),
        branches,
    })
}

pub fn company_with_stations(data: &Dataset, company_id: &str) -> Option<CompanyWithStations> {
    let company = data.company(company_id)?;

    let stations = data
        .stations
        .iter()
        .filter(|s| s.company_id == company_id)
        .filter_map(|s| station_with_branches(data, &s.station_id))
        .collect();

    tracing::debug!(company_id, "built company view");

    Some(CompanyWithStations {
        company: company.clone(),
        stations,
    })
}

/// The first company in the dataset, fully expanded.
pub fn main_company(data: &Dataset) -> Option<CompanyWithStations> {
    let company = data.companies.first()?;
    company_with_stations(data, &company.company_id)
}

pub fn all_tanks(data: &Dataset) -> Vec<TankWithProduct> {
    data.tanks
        .iter()
        .filter_map(|t| tank_with_product(data, &t.tank_id))
        .collect()
}

/// `current / capacity`, or 0 when there is no reading or no positive capacity.
pub fn stock_ratio(tank: &TankWithProduct) -> f64 {
    if tank.tank.capacity_litres <= 0.0 {
        return 0.0;
    }
    tank.current_stock_litres() / tank.tank.capacity_litres
}

pub fn stock_percentage(tank: &TankWithProduct) -> f64 {
    stock_ratio(tank) * 100.0
}

pub fn stock_status(ratio: f64, low_threshold: f64, medium_threshold: f64) -> StockStatus {
    if ratio < low_threshold {
        StockStatus::Low
    } else if ratio < medium_threshold {
        StockStatus::Medium
    } else {
        StockStatus::Good
    }
}

/// Tanks whose stock ratio is strictly below `threshold`, in tank order.
/// A tank with no reading counts as empty.
pub fn low_stock_tanks(data: &Dataset, threshold: f64) -> Vec<TankWithProduct> {
    all_tanks(data)
        .into_iter()
        .filter(|t| stock_ratio(t) < threshold)
        .collect()
}

pub fn total_tanks(data: &Dataset) -> usize {
    data.tanks.len()
}

pub fn total_branches(data: &Dataset) -> usize {
    data.branches.len()
}

pub fn total_staff(data: &Dataset) -> usize {
    data.staff.len()
}

pub fn staff_branch(data: &Dataset, staff_id: &str) -> Option<BranchWithRelations> {
    let member = data.staff_member(staff_id)?;
    branch_with_relations(data, &member.branch_id)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Trimmed, lowercased search term, or `None` when blank.
fn search_term(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

pub fn filter_tanks(
    data: &Dataset,
    filter: &TankFilter,
    low_threshold: f64,
    medium_threshold: f64,
) -> Vec<TankWithProduct> {
    let search = search_term(filter.search.as_deref());

    all_tanks(data)
        .into_iter()
        .filter(|t| match &search {
            Some(term) => {
                t.tank
                    .tank_name
                    .as_deref()
                    .map_or(false, |name| contains_ignore_case(name, term))
                    || contains_ignore_case(t.product_name(), term)
            }
            None => true,
        })
        .filter(|t| {
            filter
                .product_id
                .as_deref()
                .map_or(true, |id| t.tank.product_id == id)
        })
        .filter(|t| {
            filter.status.map_or(true, |status| {
                stock_status(stock_ratio(t), low_threshold, medium_threshold) == status
            })
        })
        .collect()
}

pub fn filter_staff(data: &Dataset, filter: &StaffFilter) -> Vec<Staff> {
    let search = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    data.staff
        .iter()
        .filter(|s| match search {
            Some(term) => {
                let lower = term.to_lowercase();
                contains_ignore_case(&s.full_name, &lower)
                    || contains_ignore_case(&s.email, &lower)
                    || s.phone_number.contains(term)
            }
            None => true,
        })
        .filter(|s| filter.role.map_or(true, |role| s.role == role))
        .filter(|s| {
            filter
                .branch_id
                .as_deref()
                .map_or(true, |id| s.branch_id == id)
        })
        .cloned()
        .collect()
}

/// Branches matching a search over name, LGA and address, with exact
/// station and LGA filters. Branch order is preserved.
pub fn filter_branches(data: &Dataset, filter: &BranchFilter) -> Vec<BranchWithRelations> {
    let search = search_term(filter.search.as_deref());

    data.branches
        .iter()
        .filter(|b| match &search {
            Some(term) => {
                contains_ignore_case(&b.branch_name, term)
                    || contains_ignore_case(&b.lga, term)
                    || contains_ignore_case(&b.physical_address, term)
            }
            None => true,
        })
        .filter(|b| {
            filter
                .station_id
                .as_deref()
                .map_or(true, |id| b.station_id == id)
        })
        .filter(|b| filter.lga.as_deref().map_or(true, |lga| b.lga == lga))
        .filter_map(|b| branch_with_relations(data, &b.branch_id))
        .collect()
}

pub fn filter_stations(data: &Dataset, filter: &StationFilter) -> Vec<StationWithBranches> {
    let search = search_term(filter.search.as_deref());

    data.stations
        .iter()
        .filter(|s| match &search {
            Some(term) => {
                contains_ignore_case(&s.station_name, term)
                    || contains_ignore_case(&s.station_code, term)
            }
            None => true,
        })
        .filter(|s| {
            filter
                .company_id
                .as_deref()
                .map_or(true, |id| s.company_id == id)
        })
        .filter_map(|s| station_with_branches(data, &s.station_id))
        .collect()
}

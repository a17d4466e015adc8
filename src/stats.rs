use crate::models::{
    BranchUtilization, CompanyWithStations, DashboardStats, ProductStats, StationAnalytics,
    StationWithBranches, TankWithProduct,
};
use crate::views::stock_ratio;

fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

fn average(total: usize, count: usize) -> f64 {
    if count > 0 {
        total as f64 / count as f64
    } else {
        0.0
    }
}

fn capacity_and_stock<'a>(tanks: impl IntoIterator<Item = &'a TankWithProduct>) -> (f64, f64) {
    tanks.into_iter().fold((0.0, 0.0), |(cap, stock), t| {
        (cap + t.tank.capacity_litres, stock + t.current_stock_litres())
    })
}

pub fn dashboard_stats(company: &CompanyWithStations, low_threshold: f64) -> DashboardStats {
    let branches: Vec<_> = company
        .stations
        .iter()
        .flat_map(|s| s.branches.iter())
        .collect();
    let tanks: Vec<&TankWithProduct> = branches.iter().flat_map(|b| b.tanks.iter()).collect();
    let (capacity, stock) = capacity_and_stock(tanks.iter().copied());

    DashboardStats {
        total_stations: company.stations.len(),
        total_branches: branches.len(),
        total_tanks: tanks.len(),
        total_staff: branches.iter().map(|b| b.staff.len()).sum(),
        total_capacity_litres: capacity,
        total_current_stock_litres: stock,
        average_stock_level: percent(stock, capacity),
        low_stock_tanks: tanks
            .iter()
            .filter(|t| stock_ratio(t) < low_threshold)
            .count(),
    }
}

pub fn station_analytics(station: &StationWithBranches) -> StationAnalytics {
    let branches = &station.branches;
    let total_tanks: usize = branches.iter().map(|b| b.tanks.len()).sum();
    let total_staff: usize = branches.iter().map(|b| b.staff.len()).sum();
    let (capacity, stock) = capacity_and_stock(branches.iter().flat_map(|b| b.tanks.iter()));

    // Keyed by product name, ordered by first appearance.
    let mut products: Vec<ProductStats> = Vec::new();
    for tank in branches.iter().flat_map(|b| b.tanks.iter()) {
        let name = tank.product_name();
        let idx = match products.iter().position(|p| p.product_name == name) {
            Some(idx) => idx,
            None => {
                products.push(ProductStats {
                    product_name: name.to_string(),
                    tank_count: 0,
                    capacity_litres: 0.0,
                    stock_litres: 0.0,
                    utilization: 0.0,
                });
                products.len() - 1
            }
        };
        let entry = &mut products[idx];
        entry.tank_count += 1;
        entry.capacity_litres += tank.tank.capacity_litres;
        entry.stock_litres += tank.current_stock_litres();
    }
    for p in &mut products {
        p.utilization = percent(p.stock_litres, p.capacity_litres);
    }

    let branch_rows = branches
        .iter()
        .map(|b| {
            let (cap, stk) = capacity_and_stock(b.tanks.iter());
            BranchUtilization {
                branch_id: b.branch.branch_id.clone(),
                branch_name: b.branch.branch_name.clone(),
                tank_count: b.tanks.len(),
                staff_count: b.staff.len(),
                capacity_litres: cap,
                stock_litres: stk,
                utilization: percent(stk, cap),
            }
        })
        .collect();

    StationAnalytics {
        station_id: station.station.station_id.clone(),
        total_branches: branches.len(),
        total_tanks,
        total_staff,
        total_capacity_litres: capacity,
        total_current_stock_litres: stock,
        stock_utilization: percent(stock, capacity),
        average_staff_per_branch: average(total_staff, branches.len()),
        average_tanks_per_branch: average(total_tanks, branches.len()),
        products,
        branches: branch_rows,
    }
}

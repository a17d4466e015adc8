//! The MACROOIL demo dataset: one company, one station, seven branches.

use crate::models::{Branch, Company, Product, Staff, StaffRole, Station, Tank, TankInventory};
use crate::store::Dataset;
use chrono::{DateTime, NaiveDate, Utc};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap_or_default()
        .and_hms_opt(h, min, 0)
        .unwrap_or_default()
        .and_utc()
}

fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    at(y, m, d, 0, 0)
}

pub fn mock_dataset() -> Dataset {
    Dataset {
        companies: companies(),
        stations: stations(),
        branches: branches(),
        staff: staff(),
        products: products(),
        tanks: tanks(),
        inventories: inventories(),
    }
}

fn companies() -> Vec<Company> {
    vec![Company {
        company_id: "company-1".into(),
        company_name: "MACROOIL PETROLEUM LIMITED".into(),
        ceo_user_id: "ceo-1".into(),
        created_at: day(2018, 3, 15),
        updated_at: day(2024, 10, 1),
    }]
}

fn stations() -> Vec<Station> {
    vec![Station {
        station_id: "station-1".into(),
        company_id: "company-1".into(),
        station_name: "MACROOIL NIGERIA".into(),
        station_code: "MCR-NIG-001".into(),
        created_at: day(2018, 6, 1),
        updated_at: day(2024, 9, 15),
    }]
}

fn products() -> Vec<Product> {
    [
        ("prod-1", "Petrol (PMS)"),
        ("prod-2", "Diesel (AGO)"),
        ("prod-3", "Kerosene (DPK)"),
        ("prod-4", "Gas (LPG)"),
    ]
    .into_iter()
    .map(|(id, name)| Product {
        product_id: id.into(),
        product_name: name.into(),
        created_at: day(2024, 1, 1),
        updated_at: day(2024, 1, 1),
    })
    .collect()
}

fn branches() -> Vec<Branch> {
    let rows = [
        ("branch-1", "MACROOIL Victoria Island", "Victoria Island",
         "Plot 1234, Tiamiyu Savage Street, Victoria Island, Lagos State", "staff-1",
         day(2018, 6, 1), day(2024, 9, 15)),
        ("branch-2", "MACROOIL Lekki Phase 1", "Lekki",
         "KM 25, Lekki-Epe Expressway, Lekki Phase 1, Lagos State", "staff-3",
         day(2019, 3, 20), day(2024, 9, 18)),
        ("branch-3", "MACROOIL Ikeja GRA", "Ikeja",
         "12A, Mobolaji Bank Anthony Way, Ikeja GRA, Lagos State", "staff-5",
         day(2019, 8, 15), day(2024, 9, 20)),
        ("branch-4", "MACROOIL Garki Branch", "Municipal Area Council",
         "Plot 456 Central Area, Garki, Abuja", "staff-7",
         day(2020, 2, 15), day(2024, 9, 22)),
        ("branch-5", "MACROOIL Wuse Branch", "Municipal Area Council",
         "1st Avenue, Gwarinpa Estate, Federal Capital Territory, Abuja", "staff-9",
         day(2020, 11, 5), day(2024, 9, 25)),
        ("branch-6", "MACROOIL Kano Branch", "Kano Municipal",
         "Independence Road, Fagge, Kano State", "staff-11",
         day(2021, 8, 10), day(2024, 9, 28)),
        ("branch-7", "MACROOIL Port Harcourt Branch", "Port Harcourt",
         "Aba Road, Port Harcourt, Rivers State", "staff-13",
         day(2022, 1, 20), day(2024, 9, 30)),
    ];

    rows.into_iter()
        .map(|(id, name, lga, address, manager, created, updated)| Branch {
            branch_id: id.into(),
            station_id: "station-1".into(),
            branch_name: name.into(),
            lga: lga.into(),
            physical_address: address.into(),
            manager_id: Some(manager.into()),
            created_at: created,
            updated_at: updated,
        })
        .collect()
}

fn staff() -> Vec<Staff> {
    use StaffRole::*;

    let rows = [
        ("staff-1", "branch-1", "Adebayo Johnson", "+234-801-234-5678", "adebayo.johnson", Manager, day(2018, 6, 15), day(2024, 9, 1)),
        ("staff-2", "branch-1", "Sarah Okafor", "+234-802-345-6789", "sarah.okafor", Attendant, day(2019, 1, 20), day(2024, 8, 15)),
        ("staff-3", "branch-2", "Michael Okechukwu", "+234-803-456-7890", "michael.okechukwu", Manager, day(2019, 3, 25), day(2024, 9, 5)),
        ("staff-4", "branch-2", "Grace Eze", "+234-804-567-8901", "grace.eze", Accountant, day(2019, 5, 10), day(2024, 8, 20)),
        ("staff-5", "branch-3", "David Olumide", "+234-805-678-9012", "david.olumide", Manager, day(2019, 8, 20), day(2024, 9, 10)),
        ("staff-6", "branch-3", "Fatima Abdullahi", "+234-806-789-0123", "fatima.abdullahi", Supervisor, day(2020, 1, 15), day(2024, 8, 25)),
        ("staff-7", "branch-4", "Ibrahim Musa", "+234-807-890-1234", "ibrahim.musa", Manager, day(2020, 2, 20), day(2024, 9, 12)),
        ("staff-8", "branch-4", "Blessing Chukwu", "+234-808-901-2345", "blessing.chukwu", Attendant, day(2020, 6, 1), day(2024, 8, 30)),
        ("staff-9", "branch-5", "Chiamaka Nwankwo", "+234-809-012-3456", "chiamaka.nwankwo", Manager, day(2020, 11, 10), day(2024, 9, 15)),
        ("staff-10", "branch-5", "Yusuf Garba", "+234-810-123-4567", "yusuf.garba", Security, day(2021, 2, 1), day(2024, 8, 28)),
        ("staff-11", "branch-6", "Aminu Bello", "+234-811-234-5678", "aminu.bello", Manager, day(2021, 8, 15), day(2024, 9, 18)),
        ("staff-12", "branch-6", "Hadiza Muhammad", "+234-812-345-6789", "hadiza.muhammad", Accountant, day(2021, 9, 20), day(2024, 8, 22)),
        ("staff-13", "branch-7", "Emeka Okonkwo", "+234-813-456-7890", "emeka.okonkwo", Manager, day(2022, 1, 25), day(2024, 9, 20)),
        ("staff-14", "branch-7", "Precious Udo", "+234-814-567-8901", "precious.udo", Attendant, day(2022, 3, 10), day(2024, 8, 18)),
        ("staff-15", "branch-7", "Godspower James", "+234-815-678-9012", "godspower.james", Supervisor, day(2022, 5, 15), day(2024, 9, 2)),
    ];

    rows.into_iter()
        .map(|(id, branch, name, phone, mailbox, role, created, updated)| Staff {
            staff_id: id.into(),
            branch_id: branch.into(),
            full_name: name.into(),
            phone_number: phone.into(),
            email: format!("{}@macrooil.com", mailbox),
            role,
            created_at: created,
            updated_at: updated,
        })
        .collect()
}

fn tanks() -> Vec<Tank> {
    let rows = [
        ("tank-001", "branch-1", "prod-1", 45000.0, "VI-PMS-Tank-A", day(2018, 6, 1), day(2024, 9, 15)),
        ("tank-002", "branch-1", "prod-2", 35000.0, "VI-AGO-Tank-A", day(2018, 6, 1), day(2024, 9, 15)),
        ("tank-003", "branch-1", "prod-3", 20000.0, "VI-DPK-Tank-A", day(2018, 6, 1), day(2024, 9, 15)),
        ("tank-004", "branch-2", "prod-1", 50000.0, "LK1-PMS-Tank-A", day(2019, 3, 20), day(2024, 9, 18)),
        ("tank-005", "branch-2", "prod-1", 50000.0, "LK1-PMS-Tank-B", day(2019, 3, 20), day(2024, 9, 18)),
        ("tank-006", "branch-2", "prod-2", 40000.0, "LK1-AGO-Tank-A", day(2019, 3, 20), day(2024, 9, 18)),
        ("tank-007", "branch-3", "prod-1", 30000.0, "IK-PMS-Tank-A", day(2019, 8, 15), day(2024, 9, 20)),
        ("tank-008", "branch-3", "prod-2", 25000.0, "IK-AGO-Tank-A", day(2019, 8, 15), day(2024, 9, 20)),
        ("tank-009", "branch-3", "prod-4", 15000.0, "IK-LPG-Tank-A", day(2020, 1, 10), day(2024, 9, 20)),
        ("tank-010", "branch-4", "prod-1", 60000.0, "ABJ-PMS-Tank-A", day(2020, 2, 15), day(2024, 9, 22)),
        ("tank-011", "branch-4", "prod-2", 45000.0, "ABJ-AGO-Tank-A", day(2020, 2, 15), day(2024, 9, 22)),
        ("tank-012", "branch-5", "prod-1", 35000.0, "GWA-PMS-Tank-A", day(2020, 11, 5), day(2024, 9, 25)),
        ("tank-013", "branch-5", "prod-2", 30000.0, "GWA-AGO-Tank-A", day(2020, 11, 5), day(2024, 9, 25)),
        ("tank-014", "branch-6", "prod-1", 40000.0, "KN-PMS-Tank-A", day(2021, 8, 10), day(2024, 9, 28)),
        ("tank-015", "branch-6", "prod-2", 35000.0, "KN-AGO-Tank-A", day(2021, 8, 10), day(2024, 9, 28)),
        ("tank-016", "branch-6", "prod-3", 20000.0, "KN-DPK-Tank-A", day(2021, 8, 10), day(2024, 9, 28)),
        ("tank-017", "branch-7", "prod-1", 55000.0, "PH-PMS-Tank-A", day(2022, 1, 20), day(2024, 9, 30)),
        ("tank-018", "branch-7", "prod-2", 50000.0, "PH-AGO-Tank-A", day(2022, 1, 20), day(2024, 9, 30)),
        ("tank-019", "branch-7", "prod-4", 25000.0, "PH-LPG-Tank-A", day(2022, 1, 20), day(2024, 9, 30)),
    ];

    rows.into_iter()
        .map(|(id, branch, product, capacity, name, created, updated)| Tank {
            tank_id: id.into(),
            branch_id: branch.into(),
            product_id: product.into(),
            capacity_litres: capacity,
            tank_name: Some(name.into()),
            created_at: created,
            updated_at: updated,
        })
        .collect()
}

fn inventories() -> Vec<TankInventory> {
    let rows = [
        ("inv-001", "tank-001", 38500.0, (6, 0), "staff-1", "Morning dip reading - Good stock level"),
        ("inv-002", "tank-002", 28750.0, (6, 15), "staff-1", "Morning dip reading - Normal consumption"),
        ("inv-003", "tank-003", 16200.0, (6, 30), "staff-2", "Morning dip reading - Steady demand"),
        ("inv-004", "tank-004", 42800.0, (7, 0), "staff-3", "Morning reading - High demand area"),
        ("inv-005", "tank-005", 45200.0, (7, 15), "staff-3", "Morning reading - Recently refilled"),
        ("inv-006", "tank-006", 35600.0, (7, 30), "staff-4", "Morning reading - Good stock"),
        ("inv-007", "tank-007", 26400.0, (8, 0), "staff-5", "Morning reading - Normal level"),
        ("inv-008", "tank-008", 3750.0, (8, 15), "staff-6", "Morning reading - LOW STOCK ALERT - Needs immediate refill"),
        ("inv-009", "tank-009", 12800.0, (8, 30), "staff-5", "Morning reading - Good LPG stock"),
        ("inv-010", "tank-010", 52300.0, (9, 0), "staff-7", "Morning reading - Excellent stock level"),
        ("inv-011", "tank-011", 38900.0, (9, 15), "staff-8", "Morning reading - Good diesel stock"),
        ("inv-012", "tank-012", 31200.0, (9, 30), "staff-9", "Morning reading - Steady consumption"),
        ("inv-013", "tank-013", 5400.0, (9, 45), "staff-10", "Morning reading - LOW STOCK - Schedule delivery"),
        ("inv-014", "tank-014", 36800.0, (10, 0), "staff-11", "Morning reading - Good stock level"),
        ("inv-015", "tank-015", 29500.0, (10, 15), "staff-12", "Morning reading - Normal consumption pattern"),
        ("inv-016", "tank-016", 17800.0, (10, 30), "staff-11", "Morning reading - Kerosene demand steady"),
        ("inv-017", "tank-017", 48200.0, (11, 0), "staff-13", "Morning reading - High traffic location"),
        ("inv-018", "tank-018", 44700.0, (11, 15), "staff-14", "Morning reading - Good diesel stock"),
        ("inv-019", "tank-019", 21500.0, (11, 30), "staff-15", "Morning reading - LPG demand increasing"),
    ];

    rows.into_iter()
        .map(|(id, tank, stock, (h, min), by, notes)| TankInventory {
            inventory_id: id.into(),
            tank_id: tank.into(),
            current_stock_litres: stock,
            measured_at: at(2024, 10, 2, h, min),
            recorded_by: Some(by.into()),
            notes: Some(notes.into()),
        })
        .collect()
}

//! Tests for the dataset store, view builders, aggregates and write paths.
//! Database-backed tests use an in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::config::{self, Config, DatabaseConfig, InventoryConfig};
    use crate::db::Database;
    use crate::error::{Error, Result};
    use crate::gateway::WriteGateway;
    use crate::models::*;
    use crate::seed;
    use crate::state::AppState;
    use crate::stats;
    use crate::store::{Dataset, IntegrityIssue};
    use crate::views::{self, DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_MEDIUM_STOCK_THRESHOLD};
    use chrono::{DateTime, NaiveDate, Utc};
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2024, 10, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
            .and_utc()
    }

    fn staff(id: &str, branch: &str, name: &str, role: StaffRole) -> Staff {
        Staff {
            staff_id: id.into(),
            branch_id: branch.into(),
            full_name: name.into(),
            phone_number: format!("+234-800-{}", id),
            email: format!("{}@macrooil.com", name.to_lowercase().replace(' ', ".")),
            role,
            created_at: at(0, 0),
            updated_at: at(0, 0),
        }
    }

    fn tank(id: &str, branch: &str, product: &str, capacity: f64) -> Tank {
        Tank {
            tank_id: id.into(),
            branch_id: branch.into(),
            product_id: product.into(),
            capacity_litres: capacity,
            tank_name: Some(format!("{}-name", id)),
            created_at: at(0, 0),
            updated_at: at(0, 0),
        }
    }

    fn reading(id: &str, tank: &str, stock: f64, measured_at: DateTime<Utc>) -> TankInventory {
        TankInventory {
            inventory_id: id.into(),
            tank_id: tank.into(),
            current_stock_litres: stock,
            measured_at,
            recorded_by: None,
            notes: None,
        }
    }

    /// Small fixture:
    /// - station s1 with branches b1 (manager m1) and b2 (dangling manager)
    /// - station s2 with no branches
    /// - t1: 10000L, two readings, latest 1500L
    /// - t2: 20000L, no readings
    /// - t3: 5000L, dangling product, 4000L
    fn fixture() -> Dataset {
        Dataset {
            companies: vec![Company {
                company_id: "c1".into(),
                company_name: "Fixture Oil".into(),
                ceo_user_id: "ceo".into(),
                created_at: at(0, 0),
                updated_at: at(0, 0),
            }],
            stations: vec![
                Station {
                    station_id: "s1".into(),
                    company_id: "c1".into(),
                    station_name: "North".into(),
                    station_code: "N-001".into(),
                    created_at: at(0, 0),
                    updated_at: at(0, 0),
                },
                Station {
                    station_id: "s2".into(),
                    company_id: "c1".into(),
                    station_name: "South".into(),
                    station_code: "S-001".into(),
                    created_at: at(0, 0),
                    updated_at: at(0, 0),
                },
            ],
            branches: vec![
                Branch {
                    branch_id: "b1".into(),
                    station_id: "s1".into(),
                    branch_name: "Harbour Road".into(),
                    lga: "Apapa".into(),
                    physical_address: "1 Harbour Road".into(),
                    manager_id: Some("m1".into()),
                    created_at: at(0, 0),
                    updated_at: at(0, 0),
                },
                Branch {
                    branch_id: "b2".into(),
                    station_id: "s1".into(),
                    branch_name: "Airport Road".into(),
                    lga: "Ikeja".into(),
                    physical_address: "9 Airport Road".into(),
                    manager_id: Some("ghost".into()),
                    created_at: at(0, 0),
                    updated_at: at(0, 0),
                },
            ],
            staff: vec![
                staff("m1", "b1", "Ada Obi", StaffRole::Manager),
                staff("a1", "b1", "Tunde Bako", StaffRole::Attendant),
                staff("a2", "b2", "Kemi Lawal", StaffRole::Security),
            ],
            products: vec![Product {
                product_id: "p1".into(),
                product_name: "Petrol (PMS)".into(),
                created_at: at(0, 0),
                updated_at: at(0, 0),
            }],
            tanks: vec![
                tank("t1", "b1", "p1", 10000.0),
                tank("t2", "b1", "p1", 20000.0),
                tank("t3", "b2", "p-missing", 5000.0),
            ],
            inventories: vec![
                reading("r1", "t1", 9000.0, at(6, 0)),
                reading("r2", "t1", 1500.0, at(8, 0)),
                reading("r3", "t3", 4000.0, at(7, 0)),
            ],
        }
    }

    fn seeded_state() -> AppState {
        AppState::bootstrap(&config::default_config().unwrap()).unwrap()
    }

    fn ids(tanks: &[TankWithProduct]) -> Vec<&str> {
        tanks.iter().map(|t| t.tank.tank_id.as_str()).collect()
    }

    // ===== TANK VIEW TESTS =====

    #[test]
    fn test_latest_inventory_is_max_measured_at() {
        let data = fixture();
        let view = views::tank_with_product(&data, "t1").unwrap();
        let latest = view.latest_inventory.clone().unwrap();
        assert_eq!(latest.inventory_id, "r2");
        assert!((latest.current_stock_litres - 1500.0).abs() < 0.01);
        assert!((views::stock_percentage(&view) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_latest_inventory_matches_max_for_every_seed_tank() {
        let data = seed::mock_dataset();
        for t in &data.tanks {
            let view = views::tank_with_product(&data, &t.tank_id).unwrap();
            let expected = data
                .inventories
                .iter()
                .filter(|inv| inv.tank_id == t.tank_id)
                .map(|inv| inv.measured_at)
                .max();
            assert_eq!(view.latest_inventory.map(|inv| inv.measured_at), expected);
        }
    }

    #[test]
    fn test_latest_inventory_tie_keeps_first_reading() {
        let mut data = fixture();
        data.inventories.push(reading("r4", "t1", 7000.0, at(8, 0)));

        let latest = data.latest_inventory("t1").unwrap();
        assert_eq!(latest.inventory_id, "r2");
    }

    #[test]
    fn test_tank_without_readings_has_no_latest_inventory() {
        let data = fixture();
        let view = views::tank_with_product(&data, "t2").unwrap();
        assert!(view.latest_inventory.is_none());
        assert!((view.current_stock_litres() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tank_capacity_copied_verbatim() {
        let data = fixture();
        let view = views::tank_with_product(&data, "t2").unwrap();
        assert!((view.tank.capacity_litres - 20000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dangling_product_yields_unknown_product() {
        let data = fixture();
        let view = views::tank_with_product(&data, "t3").unwrap();
        assert!(view.product.is_none());
        assert_eq!(view.product_name(), "Unknown Product");
    }

    #[test]
    fn test_zero_capacity_tank_has_zero_ratio() {
        let mut data = fixture();
        data.tanks.push(tank("t0", "b1", "p1", 0.0));
        data.inventories.push(reading("r0", "t0", 100.0, at(9, 0)));

        let view = views::tank_with_product(&data, "t0").unwrap();
        assert_eq!(views::stock_ratio(&view), 0.0);
        assert!(ids(&views::low_stock_tanks(&data, 0.2)).contains(&"t0"));
    }

    // ===== BRANCH / STATION / COMPANY VIEW TESTS =====

    #[test]
    fn test_branch_staff_matches_branch_id() {
        let data = seed::mock_dataset();
        for b in &data.branches {
            let view = views::branch_with_relations(&data, &b.branch_id).unwrap();
            let got: HashSet<&str> = view.staff.iter().map(|s| s.staff_id.as_str()).collect();
            let expected: HashSet<&str> = data
                .staff
                .iter()
                .filter(|s| s.branch_id == b.branch_id)
                .map(|s| s.staff_id.as_str())
                .collect();
            assert_eq!(view.staff.len(), expected.len());
            assert_eq!(got, expected);
        }
    }

    #[test]
    fn test_branch_manager_resolved() {
        let data = fixture();
        let view = views::branch_with_relations(&data, "b1").unwrap();
        assert_eq!(view.manager.unwrap().full_name, "Ada Obi");
        assert_eq!(ids(&view.tanks), vec!["t1", "t2"]);
    }

    #[test]
    fn test_dangling_manager_is_absent() {
        let data = fixture();
        let view = views::branch_with_relations(&data, "b2").unwrap();
        assert!(view.manager.is_none());
        assert_eq!(view.staff.len(), 1);
        assert_eq!(ids(&view.tanks), vec!["t3"]);
    }

    #[test]
    fn test_unset_manager_is_absent() {
        let mut data = fixture();
        data.branches[0].manager_id = None;
        let view = views::branch_with_relations(&data, "b1").unwrap();
        assert!(view.manager.is_none());
    }

    #[test]
    fn test_station_branches_count() {
        let data = fixture();
        let view = views::station_with_branches(&data, "s1").unwrap();
        let expected = data.branches.iter().filter(|b| b.station_id == "s1").count();
        assert_eq!(view.branches.len(), expected);
    }

    #[test]
    fn test_station_without_branches_has_empty_list() {
        let data = fixture();
        let view = views::station_with_branches(&data, "s2").unwrap();
        assert!(view.branches.is_empty());
    }

    #[test]
    fn test_company_with_stations() {
        let data = fixture();
        let view = views::company_with_stations(&data, "c1").unwrap();
        assert_eq!(view.stations.len(), 2);
        assert_eq!(view.stations[0].branches.len(), 2);
        assert_eq!(views::main_company(&data).unwrap(), view);
    }

    #[test]
    fn test_unknown_ids_return_none() {
        let data = fixture();
        assert!(views::tank_with_product(&data, "does-not-exist").is_none());
        assert!(views::branch_with_relations(&data, "does-not-exist").is_none());
        assert!(views::station_with_branches(&data, "does-not-exist").is_none());
        assert!(views::company_with_stations(&data, "does-not-exist").is_none());
        assert!(views::staff_branch(&data, "does-not-exist").is_none());
        assert!(views::main_company(&Dataset::default()).is_none());
    }

    #[test]
    fn test_views_are_idempotent() {
        let data = seed::mock_dataset();
        assert_eq!(
            views::tank_with_product(&data, "tank-008"),
            views::tank_with_product(&data, "tank-008")
        );
        assert_eq!(
            views::branch_with_relations(&data, "branch-3"),
            views::branch_with_relations(&data, "branch-3")
        );
        assert_eq!(
            views::company_with_stations(&data, "company-1"),
            views::company_with_stations(&data, "company-1")
        );
        assert_eq!(
            views::low_stock_tanks(&data, 0.2),
            views::low_stock_tanks(&data, 0.2)
        );
    }

    #[test]
    fn test_staff_branch_lookup() {
        let data = fixture();
        let branch = views::staff_branch(&data, "a2").unwrap();
        assert_eq!(branch.branch.branch_id, "b2");
    }

    #[test]
    fn test_view_serializes_flat_with_relations() {
        let data = fixture();
        let view = views::branch_with_relations(&data, "b2").unwrap();
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["branch_id"], "b2");
        assert_eq!(json["branch_name"], "Airport Road");
        assert!(json["manager"].is_null());
        assert_eq!(json["staff"][0]["role"], "Security");
        assert!(json["tanks"][0]["product"].is_null());
        assert_eq!(json["tanks"][0]["latest_inventory"]["current_stock_litres"], 4000.0);
    }

    // ===== LOW STOCK TESTS =====

    #[test]
    fn test_low_stock_threshold_boundaries() {
        let data = fixture();

        // t1 is at 15%, t2 has no reading, t3 is at 80%
        assert_eq!(ids(&views::low_stock_tanks(&data, 0.2)), vec!["t1", "t2"]);
        assert_eq!(ids(&views::low_stock_tanks(&data, 0.1)), vec!["t2"]);
        assert_eq!(ids(&views::low_stock_tanks(&data, 0.15)), vec!["t2"]);
        assert_eq!(ids(&views::low_stock_tanks(&data, 0.9)), vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn test_low_stock_in_seed_dataset() {
        let data = seed::mock_dataset();
        let low = views::low_stock_tanks(&data, DEFAULT_LOW_STOCK_THRESHOLD);
        assert_eq!(ids(&low), vec!["tank-008", "tank-013"]);
    }

    #[test]
    fn test_totals() {
        let data = seed::mock_dataset();
        assert_eq!(views::total_tanks(&data), 19);
        assert_eq!(views::total_branches(&data), 7);
        assert_eq!(views::total_staff(&data), 15);
    }

    #[test]
    fn test_stock_status_bands() {
        let status = |r| views::stock_status(r, DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_MEDIUM_STOCK_THRESHOLD);
        assert_eq!(status(0.0), StockStatus::Low);
        assert_eq!(status(0.19), StockStatus::Low);
        assert_eq!(status(0.2), StockStatus::Medium);
        assert_eq!(status(0.49), StockStatus::Medium);
        assert_eq!(status(0.5), StockStatus::Good);
        assert_eq!(StockStatus::Low.label(), "Low Stock");
    }

    // ===== FILTER TESTS =====

    #[test]
    fn test_filter_tanks_by_search_product_and_status() {
        let data = seed::mock_dataset();
        let filter = |f: TankFilter| {
            views::filter_tanks(&data, &f, DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_MEDIUM_STOCK_THRESHOLD)
        };

        let lpg = filter(TankFilter {
            search: Some("lpg".into()),
            ..Default::default()
        });
        assert_eq!(ids(&lpg), vec!["tank-009", "tank-019"]);

        let diesel_low = filter(TankFilter {
            product_id: Some("prod-2".into()),
            status: Some(StockStatus::Low),
            ..Default::default()
        });
        assert_eq!(ids(&diesel_low), vec!["tank-008", "tank-013"]);

        let everything = filter(TankFilter {
            search: Some("   ".into()),
            ..Default::default()
        });
        assert_eq!(everything.len(), 19);
    }

    #[test]
    fn test_filter_staff() {
        let data = seed::mock_dataset();

        let managers = views::filter_staff(
            &data,
            &StaffFilter {
                role: Some(StaffRole::Manager),
                ..Default::default()
            },
        );
        assert_eq!(managers.len(), 7);

        let by_email = views::filter_staff(
            &data,
            &StaffFilter {
                search: Some("GRACE.EZE".into()),
                ..Default::default()
            },
        );
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].staff_id, "staff-4");

        let by_phone_in_branch = views::filter_staff(
            &data,
            &StaffFilter {
                search: Some("815".into()),
                branch_id: Some("branch-7".into()),
                ..Default::default()
            },
        );
        assert_eq!(by_phone_in_branch.len(), 1);
        assert_eq!(by_phone_in_branch[0].full_name, "Godspower James");
    }

    #[test]
    fn test_filter_branches() {
        let data = seed::mock_dataset();
        let branch_ids = |f: BranchFilter| -> Vec<String> {
            views::filter_branches(&data, &f)
                .into_iter()
                .map(|b| b.branch.branch_id)
                .collect()
        };

        assert_eq!(
            branch_ids(BranchFilter {
                search: Some("LAGOS".into()),
                ..Default::default()
            }),
            vec!["branch-1", "branch-2", "branch-3"]
        );
        assert_eq!(
            branch_ids(BranchFilter {
                lga: Some("Municipal Area Council".into()),
                ..Default::default()
            }),
            vec!["branch-4", "branch-5"]
        );
        assert_eq!(
            branch_ids(BranchFilter {
                search: Some("ikeja".into()),
                station_id: Some("station-1".into()),
                ..Default::default()
            }),
            vec!["branch-3"]
        );
        assert!(branch_ids(BranchFilter {
            station_id: Some("station-9".into()),
            ..Default::default()
        })
        .is_empty());
        assert_eq!(branch_ids(BranchFilter::default()).len(), 7);

        // exact match, not substring
        assert!(branch_ids(BranchFilter {
            lga: Some("Ikeja GRA".into()),
            ..Default::default()
        })
        .is_empty());
    }

    #[test]
    fn test_filtered_branches_carry_relations() {
        let data = seed::mock_dataset();
        let found = views::filter_branches(
            &data,
            &BranchFilter {
                search: Some("port harcourt".into()),
                ..Default::default()
            },
        );

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].manager.as_ref().unwrap().staff_id, "staff-13");
        assert_eq!(found[0].staff.len(), 3);
        assert_eq!(ids(&found[0].tanks), vec!["tank-017", "tank-018", "tank-019"]);
    }

    #[test]
    fn test_filter_stations() {
        let data = fixture();
        let station_ids = |f: StationFilter| -> Vec<String> {
            views::filter_stations(&data, &f)
                .into_iter()
                .map(|s| s.station.station_id)
                .collect()
        };

        assert_eq!(
            station_ids(StationFilter {
                search: Some("north".into()),
                ..Default::default()
            }),
            vec!["s1"]
        );
        assert_eq!(
            station_ids(StationFilter {
                search: Some("s-0".into()),
                ..Default::default()
            }),
            vec!["s2"]
        );
        assert_eq!(
            station_ids(StationFilter {
                search: Some("  ".into()),
                company_id: Some("c1".into()),
            }),
            vec!["s1", "s2"]
        );
        assert!(station_ids(StationFilter {
            company_id: Some("c9".into()),
            ..Default::default()
        })
        .is_empty());

        let with_branches = views::filter_stations(&data, &StationFilter::default());
        assert_eq!(with_branches[0].branches.len(), 2);
        assert!(with_branches[1].branches.is_empty());
    }

    // ===== INTEGRITY TESTS =====

    #[test]
    fn test_seed_dataset_is_consistent() {
        assert!(seed::mock_dataset().integrity_issues().is_empty());
    }

    #[test]
    fn test_integrity_reports_dangling_references() {
        let mut data = fixture();
        data.inventories.push(reading("r9", "t2", 25000.0, at(10, 0)));

        let issues = data.integrity_issues();
        assert!(issues.contains(&IntegrityIssue::DanglingReference {
            kind: "branch",
            id: "b2".into(),
            field: "manager_id",
            target: "ghost".into(),
        }));
        assert!(issues.contains(&IntegrityIssue::DanglingReference {
            kind: "tank",
            id: "t3".into(),
            field: "product_id",
            target: "p-missing".into(),
        }));
        assert!(issues.contains(&IntegrityIssue::StockOutOfRange {
            tank_id: "t2".into(),
            stock_litres: 25000.0,
            capacity_litres: 20000.0,
        }));
        assert_eq!(issues.len(), 3);
    }

    #[test]
    fn test_staff_role_parse() {
        assert_eq!("Supervisor".parse::<StaffRole>(), Ok(StaffRole::Supervisor));
        assert!("Cashier".parse::<StaffRole>().is_err());
    }

    // ===== STATS TESTS =====

    #[test]
    fn test_dashboard_stats_for_seed_company() {
        let data = seed::mock_dataset();
        let company = views::main_company(&data).unwrap();
        let s = stats::dashboard_stats(&company, DEFAULT_LOW_STOCK_THRESHOLD);

        assert_eq!(s.total_stations, 1);
        assert_eq!(s.total_branches, 7);
        assert_eq!(s.total_tanks, 19);
        assert_eq!(s.total_staff, 15);
        assert_eq!(s.low_stock_tanks, 2);
        assert!((s.total_capacity_litres - 705000.0).abs() < 0.01);

        let stock: f64 = data.inventories.iter().map(|i| i.current_stock_litres).sum();
        assert!((s.total_current_stock_litres - stock).abs() < 0.01);
        assert!((s.average_stock_level - stock / 705000.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_station_analytics() {
        let data = seed::mock_dataset();
        let station = views::station_with_branches(&data, "station-1").unwrap();
        let a = stats::station_analytics(&station);

        assert_eq!(a.total_branches, 7);
        assert!((a.average_tanks_per_branch - 19.0 / 7.0).abs() < 1e-9);
        assert!((a.average_staff_per_branch - 15.0 / 7.0).abs() < 1e-9);

        let products: Vec<(&str, usize)> = a
            .products
            .iter()
            .map(|p| (p.product_name.as_str(), p.tank_count))
            .collect();
        assert_eq!(
            products,
            vec![
                ("Petrol (PMS)", 8),
                ("Diesel (AGO)", 7),
                ("Kerosene (DPK)", 2),
                ("Gas (LPG)", 2)
            ]
        );

        let ikeja = a.branches.iter().find(|b| b.branch_id == "branch-3").unwrap();
        assert_eq!(ikeja.tank_count, 3);
        assert!((ikeja.capacity_litres - 70000.0).abs() < 0.01);
        assert!((ikeja.stock_litres - 42950.0).abs() < 0.01);
    }

    #[test]
    fn test_station_analytics_without_branches() {
        let data = fixture();
        let station = views::station_with_branches(&data, "s2").unwrap();
        let a = stats::station_analytics(&station);

        assert_eq!(a.total_branches, 0);
        assert_eq!(a.stock_utilization, 0.0);
        assert_eq!(a.average_staff_per_branch, 0.0);
        assert_eq!(a.average_tanks_per_branch, 0.0);
        assert!(a.products.is_empty());
    }

    // ===== DATABASE TESTS =====

    #[test]
    fn test_seed_round_trip() {
        let db = Database::open(config::IN_MEMORY_PATH).unwrap();
        db.initialize().unwrap();

        assert!(db.seed_if_empty(&seed::mock_dataset()).unwrap());
        assert!(!db.seed_if_empty(&seed::mock_dataset()).unwrap());

        assert_eq!(db.load_dataset().unwrap(), seed::mock_dataset());
    }

    #[test]
    fn test_initialize_is_repeatable() {
        let db = Database::open(config::IN_MEMORY_PATH).unwrap();
        db.initialize().unwrap();
        db.initialize().unwrap();
        assert!(db.is_empty().unwrap());
    }

    #[test]
    fn test_writes_persist_in_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            database: DatabaseConfig {
                path: dir.path().join("db").join("stations.db").to_string_lossy().into_owned(),
            },
            inventory: InventoryConfig::default(),
        };

        let station_id = {
            let state = AppState::bootstrap(&config).unwrap();
            state
                .add_station(CreateStation {
                    company_id: "company-1".into(),
                    station_name: "MACROOIL GHANA".into(),
                    station_code: "MCR-GHA-001".into(),
                })
                .unwrap()
                .station_id
        };

        let reopened = AppState::bootstrap(&config).unwrap();
        let station = reopened.station(&station_id).unwrap().unwrap();
        assert_eq!(station.station.station_name, "MACROOIL GHANA");
        assert!(station.branches.is_empty());
        assert_eq!(reopened.snapshot().unwrap().companies.len(), 1);
    }

    // ===== WRITE PATH TESTS =====

    #[test]
    fn test_add_station_validation() {
        let state = seeded_state();

        let blank = state.add_station(CreateStation {
            company_id: "company-1".into(),
            station_name: "  ".into(),
            station_code: "X".into(),
        });
        assert!(matches!(blank, Err(Error::Validation(_))));

        let unknown = state.add_station(CreateStation {
            company_id: "company-9".into(),
            station_name: "New".into(),
            station_code: "X".into(),
        });
        assert!(matches!(unknown, Err(Error::NotFound { kind: "company", .. })));
    }

    #[test]
    fn test_added_station_visible_in_company_view() {
        let state = seeded_state();
        let station = state
            .add_station(CreateStation {
                company_id: "company-1".into(),
                station_name: " MACROOIL BENIN ".into(),
                station_code: "MCR-BEN-001".into(),
            })
            .unwrap();

        assert_eq!(station.station_name, "MACROOIL BENIN");
        assert!(station.station_id.starts_with("station-"));

        let company = state.main_company().unwrap().unwrap();
        assert_eq!(company.stations.len(), 2);
        assert_eq!(company.stations[1].station.station_id, station.station_id);
    }

    #[test]
    fn test_edit_station() {
        let state = seeded_state();
        let edited = state
            .edit_station(UpdateStation {
                station_id: "station-1".into(),
                station_name: "MACROOIL NIGERIA WEST".into(),
                station_code: "MCR-NIG-002".into(),
            })
            .unwrap();

        assert_eq!(edited.company_id, "company-1");
        let view = state.station("station-1").unwrap().unwrap();
        assert_eq!(view.station.station_code, "MCR-NIG-002");
        assert_eq!(view.branches.len(), 7);

        let missing = state.edit_station(UpdateStation {
            station_id: "station-9".into(),
            station_name: "X".into(),
            station_code: "Y".into(),
        });
        assert!(matches!(missing, Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_delete_station_with_branches_is_refused() {
        let state = seeded_state();
        let result = state.delete_station("station-1");
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(state.station("station-1").unwrap().is_some());
    }

    #[test]
    fn test_delete_empty_station() {
        let state = seeded_state();
        let station = state
            .add_station(CreateStation {
                company_id: "company-1".into(),
                station_name: "Temp".into(),
                station_code: "TMP".into(),
            })
            .unwrap();

        state.delete_station(&station.station_id).unwrap();
        assert!(state.station(&station.station_id).unwrap().is_none());
        assert!(matches!(
            state.delete_station(&station.station_id),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_add_branch() {
        let state = seeded_state();
        let branch = state
            .add_branch(CreateBranch {
                station_id: "station-1".into(),
                branch_name: "MACROOIL Ibadan".into(),
                physical_address: "Ring Road".into(),
                lga: "Ibadan South-West".into(),
                state: "Oyo".into(),
            })
            .unwrap();

        assert_eq!(branch.physical_address, "Ring Road, Oyo");
        assert!(branch.manager_id.is_none());

        let view = state.branch(&branch.branch_id).unwrap().unwrap();
        assert!(view.manager.is_none());
        assert!(view.staff.is_empty());
        assert!(view.tanks.is_empty());
        assert_eq!(state.station("station-1").unwrap().unwrap().branches.len(), 8);

        let missing_lga = state.add_branch(CreateBranch {
            station_id: "station-1".into(),
            branch_name: "X".into(),
            physical_address: "Y".into(),
            lga: "".into(),
            state: "Oyo".into(),
        });
        assert!(matches!(missing_lga, Err(Error::Validation(_))));
    }

    #[test]
    fn test_add_tank_validation() {
        let state = seeded_state();
        let form = |capacity: f64, stock: Option<f64>| CreateTank {
            branch_id: "branch-1".into(),
            product_id: "prod-1".into(),
            tank_name: "VI-PMS-Tank-B".into(),
            capacity_litres: capacity,
            current_stock: stock,
        };

        assert!(matches!(state.add_tank(form(0.0, None)), Err(Error::Validation(_))));
        assert!(matches!(
            state.add_tank(form(1000.0, Some(1500.0))),
            Err(Error::Validation(_))
        ));

        let unknown_product = state.add_tank(CreateTank {
            product_id: "prod-9".into(),
            ..form(1000.0, None)
        });
        assert!(matches!(
            unknown_product,
            Err(Error::NotFound { kind: "product", .. })
        ));
    }

    #[test]
    fn test_add_tank_with_and_without_opening_stock() {
        let state = seeded_state();

        let stocked = state
            .add_tank(CreateTank {
                branch_id: "branch-1".into(),
                product_id: "prod-1".into(),
                tank_name: "VI-PMS-Tank-B".into(),
                capacity_litres: 40000.0,
                current_stock: Some(30000.0),
            })
            .unwrap();
        assert!((stocked.current_stock_litres() - 30000.0).abs() < 0.01);
        assert_eq!(stocked.product_name(), "Petrol (PMS)");

        let empty = state
            .add_tank(CreateTank {
                branch_id: "branch-1".into(),
                product_id: "prod-2".into(),
                tank_name: "VI-AGO-Tank-B".into(),
                capacity_litres: 40000.0,
                current_stock: None,
            })
            .unwrap();
        assert!(empty.latest_inventory.is_none());

        let low = state.low_stock(None).unwrap();
        assert!(ids(&low).contains(&empty.tank.tank_id.as_str()));
        assert!(!ids(&low).contains(&stocked.tank.tank_id.as_str()));
        assert_eq!(state.branch("branch-1").unwrap().unwrap().tanks.len(), 5);
    }

    #[test]
    fn test_record_reading() {
        let state = seeded_state();

        let out_of_range = state.record_reading(RecordReading {
            tank_id: "tank-008".into(),
            current_stock_litres: 30000.0,
            recorded_by: None,
            notes: None,
        });
        assert!(matches!(out_of_range, Err(Error::Validation(_))));

        let updated = state
            .record_reading(RecordReading {
                tank_id: "tank-008".into(),
                current_stock_litres: 24000.0,
                recorded_by: Some("staff-6".into()),
                notes: Some("Refilled".into()),
            })
            .unwrap();
        assert!((updated.current_stock_litres() - 24000.0).abs() < 0.01);
        assert_eq!(ids(&state.low_stock(None).unwrap()), vec!["tank-013"]);
    }

    #[test]
    fn test_inventory_transactions() {
        let state = seeded_state();

        // tank-008: 3750L of 25000L
        let overflow = state.apply_transaction(InventoryTransaction {
            tank_id: "tank-008".into(),
            kind: TransactionKind::Inbound,
            quantity: 21251.0,
            recorded_by: None,
        });
        assert!(matches!(overflow, Err(Error::Validation(_))));

        let overdraw = state.apply_transaction(InventoryTransaction {
            tank_id: "tank-008".into(),
            kind: TransactionKind::Outbound,
            quantity: 3751.0,
            recorded_by: None,
        });
        assert!(matches!(overdraw, Err(Error::Validation(_))));

        let zero = state.apply_transaction(InventoryTransaction {
            tank_id: "tank-008".into(),
            kind: TransactionKind::Outbound,
            quantity: 0.0,
            recorded_by: None,
        });
        assert!(matches!(zero, Err(Error::Validation(_))));

        let filled = state
            .apply_transaction(InventoryTransaction {
                tank_id: "tank-008".into(),
                kind: TransactionKind::Inbound,
                quantity: 10000.0,
                recorded_by: Some("staff-5".into()),
            })
            .unwrap();
        assert!((filled.current_stock_litres() - 13750.0).abs() < 0.01);

        let drawn = state
            .apply_transaction(InventoryTransaction {
                tank_id: "tank-008".into(),
                kind: TransactionKind::Outbound,
                quantity: 13750.0,
                recorded_by: None,
            })
            .unwrap();
        assert_eq!(drawn.current_stock_litres(), 0.0);
        assert_eq!(
            drawn.latest_inventory.unwrap().notes.as_deref(),
            Some("Outbound 13750L")
        );
    }

    #[test]
    fn test_state_read_accessors() {
        let state = seeded_state();

        assert_eq!(
            state.main_company().unwrap(),
            state.company("company-1").unwrap()
        );
        assert_eq!(state.station("station-1").unwrap().unwrap().branches.len(), 7);
        assert_eq!(state.branch("branch-3").unwrap().unwrap().tanks.len(), 3);
        assert_eq!(
            state.tank("tank-009").unwrap().unwrap().product_name(),
            "Gas (LPG)"
        );
        assert_eq!(state.tanks(&TankFilter::default()).unwrap().len(), 19);
        assert_eq!(state.staff(&StaffFilter::default()).unwrap().len(), 15);
        assert_eq!(ids(&state.low_stock(None).unwrap()), vec!["tank-008", "tank-013"]);
        assert!(state.company("company-9").unwrap().is_none());
        assert!(state.tank("tank-999").unwrap().is_none());

        let abuja = state
            .branches(&BranchFilter {
                search: Some("abuja".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(abuja.len(), 2);

        let stations = state
            .stations(&StationFilter {
                search: Some("mcr-nig".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].branches.len(), 7);
    }

    #[test]
    fn test_concurrent_withdrawals_cannot_overdraw() {
        let state = &seeded_state();
        let barrier = &std::sync::Barrier::new(2);

        // tank-008 holds 3750L; only one 3000L withdrawal fits
        let results: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    scope.spawn(move || {
                        barrier.wait();
                        state.apply_transaction(InventoryTransaction {
                            tank_id: "tank-008".into(),
                            kind: TransactionKind::Outbound,
                            quantity: 3000.0,
                            recorded_by: None,
                        })
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(Error::Validation(_)))));

        let tank = state.tank("tank-008").unwrap().unwrap();
        assert!((tank.current_stock_litres() - 750.0).abs() < 0.01);
    }

    #[test]
    fn test_staff_member_with_branch() {
        let state = seeded_state();
        let (member, branch) = state.staff_member("staff-6").unwrap().unwrap();
        assert_eq!(member.role, StaffRole::Supervisor);
        assert_eq!(branch.unwrap().branch.branch_name, "MACROOIL Ikeja GRA");
        assert!(state.staff_member("staff-99").unwrap().is_none());
    }

    #[test]
    fn test_state_reads_use_configured_thresholds() {
        let data = seed::mock_dataset();
        let inventory = InventoryConfig {
            low_stock_threshold: 0.5,
            medium_stock_threshold: 0.8,
        };
        let state = AppState::new(inventory, data, Box::new(FailingGateway));

        // every other seed tank is above 80%
        assert_eq!(state.low_stock(None).unwrap().len(), 2);
        assert_eq!(state.dashboard_stats().unwrap().unwrap().low_stock_tanks, 2);
        assert_eq!(state.low_stock(Some(0.95)).unwrap().len(), 19);

        let good = state
            .tanks(&TankFilter {
                status: Some(StockStatus::Good),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(good.len(), 17);
    }

    // ===== GATEWAY TESTS =====

    struct FailingGateway;

    impl WriteGateway for FailingGateway {
        fn insert_station(&self, _: &Station) -> Result<()> {
            Err(Error::validation("offline"))
        }
        fn update_station(&self, _: &Station) -> Result<()> {
            Err(Error::validation("offline"))
        }
        fn delete_station(&self, _: &str) -> Result<()> {
            Err(Error::validation("offline"))
        }
        fn insert_branch(&self, _: &Branch) -> Result<()> {
            Err(Error::validation("offline"))
        }
        fn insert_tank(&self, _: &Tank, _: Option<&TankInventory>) -> Result<()> {
            Err(Error::validation("offline"))
        }
        fn insert_reading(&self, _: &TankInventory) -> Result<()> {
            Err(Error::validation("offline"))
        }
    }

    #[derive(Default)]
    struct RecordingGateway {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingGateway {
        fn record(&self, call: String) -> Result<()> {
            self.calls.lock().unwrap().push(call);
            Ok(())
        }
    }

    impl WriteGateway for std::sync::Arc<RecordingGateway> {
        fn insert_station(&self, s: &Station) -> Result<()> {
            self.record(format!("insert_station {}", s.station_name))
        }
        fn update_station(&self, s: &Station) -> Result<()> {
            self.record(format!("update_station {}", s.station_id))
        }
        fn delete_station(&self, id: &str) -> Result<()> {
            self.record(format!("delete_station {}", id))
        }
        fn insert_branch(&self, b: &Branch) -> Result<()> {
            self.record(format!("insert_branch {}", b.branch_name))
        }
        fn insert_tank(&self, t: &Tank, opening: Option<&TankInventory>) -> Result<()> {
            self.record(format!(
                "insert_tank {} opening={}",
                t.capacity_litres,
                opening.is_some()
            ))
        }
        fn insert_reading(&self, r: &TankInventory) -> Result<()> {
            self.record(format!("insert_reading {}", r.current_stock_litres))
        }
    }

    #[test]
    fn test_failed_gateway_leaves_session_unchanged() {
        let state = AppState::new(InventoryConfig::default(), fixture(), Box::new(FailingGateway));
        let before = state.snapshot().unwrap();

        assert!(state
            .add_station(CreateStation {
                company_id: "c1".into(),
                station_name: "East".into(),
                station_code: "E-001".into(),
            })
            .is_err());
        assert!(state
            .record_reading(RecordReading {
                tank_id: "t2".into(),
                current_stock_litres: 100.0,
                recorded_by: None,
                notes: None,
            })
            .is_err());
        assert!(state.delete_station("s2").is_err());

        assert_eq!(state.snapshot().unwrap(), before);
    }

    #[test]
    fn test_writes_go_through_injected_gateway() {
        let gateway = std::sync::Arc::new(RecordingGateway::default());
        let state = AppState::new(
            InventoryConfig::default(),
            fixture(),
            Box::new(gateway.clone()),
        );

        state
            .add_station(CreateStation {
                company_id: "c1".into(),
                station_name: "East".into(),
                station_code: "E-001".into(),
            })
            .unwrap();
        state
            .add_tank(CreateTank {
                branch_id: "b1".into(),
                product_id: "p1".into(),
                tank_name: "B1-PMS-C".into(),
                capacity_litres: 8000.0,
                current_stock: Some(2000.0),
            })
            .unwrap();
        state.delete_station("s2").unwrap();

        let calls = gateway.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                "insert_station East".to_string(),
                "insert_tank 8000 opening=true".to_string(),
                "delete_station s2".to_string(),
            ]
        );
        assert_eq!(state.snapshot().unwrap().stations.len(), 2);
    }
}

use crate::config::IN_MEMORY_PATH;
use crate::error::{Error, Result};
use crate::models::{Branch, Company, Product, Staff, StaffRole, Station, Tank, TankInventory};
use crate::store::Dataset;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub struct Database {
    pub conn: Mutex<Connection>,
}

impl ToSql for StaffRole {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for StaffRole {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

impl Database {
    /// Open the database at `path`. `":memory:"` gives a private in-memory
    /// database that is discarded on exit.
    pub fn open(path: &str) -> Result<Self> {
        let conn = if path == IN_MEMORY_PATH {
            Connection::open_in_memory()?
        } else {
            if let Some(dir) = Path::new(path).parent() {
                if !dir.as_os_str().is_empty() {
                    std::fs::create_dir_all(dir)?;
                }
            }
            Connection::open(path)?
        };

        tracing::info!("Opened database at {}", path);

        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::LockPoisoned)
    }

    pub fn initialize(&self) -> Result<()> {
        let conn = self.lock()?;

        conn.execute_batch(
            "
            PRAGMA foreign_keys = OFF;

            CREATE TABLE IF NOT EXISTS companies (
                company_id TEXT PRIMARY KEY,
                company_name TEXT NOT NULL,
                ceo_user_id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS stations (
                station_id TEXT PRIMARY KEY,
                company_id TEXT NOT NULL,
                station_name TEXT NOT NULL,
                station_code TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS branches (
                branch_id TEXT PRIMARY KEY,
                station_id TEXT NOT NULL,
                branch_name TEXT NOT NULL,
                lga TEXT NOT NULL,
                physical_address TEXT NOT NULL,
                manager_id TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS staff (
                staff_id TEXT PRIMARY KEY,
                branch_id TEXT NOT NULL,
                full_name TEXT NOT NULL,
                phone_number TEXT NOT NULL,
                email TEXT NOT NULL,
                role TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS products (
                product_id TEXT PRIMARY KEY,
                product_name TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS tanks (
                tank_id TEXT PRIMARY KEY,
                branch_id TEXT NOT NULL,
                product_id TEXT NOT NULL,
                capacity_litres REAL NOT NULL,
                tank_name TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            -- Dip readings, many per tank
            CREATE TABLE IF NOT EXISTS tank_inventories (
                inventory_id TEXT PRIMARY KEY,
                tank_id TEXT NOT NULL,
                current_stock_litres REAL NOT NULL,
                measured_at TEXT NOT NULL,
                recorded_by TEXT,
                notes TEXT
            );
            ",
        )?;

        Ok(())
    }

    pub fn is_empty(&self) -> Result<bool> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM companies", [], |row| row.get(0))?;
        Ok(count == 0)
    }

    /// Write `data` into an empty database. Returns false if rows already exist.
    pub fn seed_if_empty(&self, data: &Dataset) -> Result<bool> {
        if !self.is_empty()? {
            return Ok(false);
        }

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        for c in &data.companies {
            insert_company(&tx, c)?;
        }
        for s in &data.stations {
            insert_station(&tx, s)?;
        }
        for b in &data.branches {
            insert_branch(&tx, b)?;
        }
        for s in &data.staff {
            insert_staff(&tx, s)?;
        }
        for p in &data.products {
            insert_product(&tx, p)?;
        }
        for t in &data.tanks {
            insert_tank(&tx, t)?;
        }
        for inv in &data.inventories {
            insert_inventory(&tx, inv)?;
        }

        tx.commit()?;

        tracing::info!(
            companies = data.companies.len(),
            branches = data.branches.len(),
            tanks = data.tanks.len(),
            "Seeded database"
        );

        Ok(true)
    }

    pub fn load_dataset(&self) -> Result<Dataset> {
        let conn = self.lock()?;

        let companies = conn
            .prepare(
                "SELECT company_id, company_name, ceo_user_id, created_at, updated_at
                 FROM companies ORDER BY rowid",
            )?
            .query_map([], |row| {
                Ok(Company {
                    company_id: row.get(0)?,
                    company_name: row.get(1)?,
                    ceo_user_id: row.get(2)?,
                    created_at: row.get(3)?,
                    updated_at: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let stations = conn
            .prepare(
                "SELECT station_id, company_id, station_name, station_code, created_at, updated_at
                 FROM stations ORDER BY rowid",
            )?
            .query_map([], |row| {
                Ok(Station {
                    station_id: row.get(0)?,
                    company_id: row.get(1)?,
                    station_name: row.get(2)?,
                    station_code: row.get(3)?,
                    created_at: row.get(4)?,
                    updated_at: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let branches = conn
            .prepare(
                "SELECT branch_id, station_id, branch_name, lga, physical_address, manager_id, created_at, updated_at
                 FROM branches ORDER BY rowid",
            )?
            .query_map([], |row| {
                Ok(Branch {
                    branch_id: row.get(0)?,
                    station_id: row.get(1)?,
                    branch_name: row.get(2)?,
                    lga: row.get(3)?,
                    physical_address: row.get(4)?,
                    manager_id: row.get(5)?,
                    created_at: row.get(6)?,
                    updated_at: row.get(7)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let staff = conn
            .prepare(
                "SELECT staff_id, branch_id, full_name, phone_number, email, role, created_at, updated_at
                 FROM staff ORDER BY rowid",
            )?
            .query_map([], |row| {
                Ok(Staff {
                    staff_id: row.get(0)?,
                    branch_id: row.get(1)?,
                    full_name: row.get(2)?,
                    phone_number: row.get(3)?,
                    email: row.get(4)?,
                    role: row.get(5)?,
                    created_at: row.get(6)?,
                    updated_at: row.get(7)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let products = conn
            .prepare(
                "SELECT product_id, product_name, created_at, updated_at
                 FROM products ORDER BY rowid",
            )?
            .query_map([], |row| {
                Ok(Product {
                    product_id: row.get(0)?,
                    product_name: row.get(1)?,
                    created_at: row.get(2)?,
                    updated_at: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let tanks = conn
            .prepare(
                "SELECT tank_id, branch_id, product_id, capacity_litres, tank_name, created_at, updated_at
                 FROM tanks ORDER BY rowid",
            )?
            .query_map([], |row| {
                Ok(Tank {
                    tank_id: row.get(0)?,
                    branch_id: row.get(1)?,
                    product_id: row.get(2)?,
                    capacity_litres: row.get(3)?,
                    tank_name: row.get(4)?,
                    created_at: row.get(5)?,
                    updated_at: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let inventories = conn
            .prepare(
                "SELECT inventory_id, tank_id, current_stock_litres, measured_at, recorded_by, notes
                 FROM tank_inventories ORDER BY rowid",
            )?
            .query_map([], |row| {
                Ok(TankInventory {
                    inventory_id: row.get(0)?,
                    tank_id: row.get(1)?,
                    current_stock_litres: row.get(2)?,
                    measured_at: row.get(3)?,
                    recorded_by: row.get(4)?,
                    notes: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Dataset {
            companies,
            stations,
            branches,
            staff,
            products,
            tanks,
            inventories,
        })
    }
}

fn insert_company(conn: &Connection, c: &Company) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO companies (company_id, company_name, ceo_user_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![c.company_id, c.company_name, c.ceo_user_id, c.created_at, c.updated_at],
    )
}

pub(crate) fn insert_station(conn: &Connection, s: &Station) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO stations (station_id, company_id, station_name, station_code, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![s.station_id, s.company_id, s.station_name, s.station_code, s.created_at, s.updated_at],
    )
}

pub(crate) fn insert_branch(conn: &Connection, b: &Branch) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO branches (branch_id, station_id, branch_name, lga, physical_address, manager_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            b.branch_id,
            b.station_id,
            b.branch_name,
            b.lga,
            b.physical_address,
            b.manager_id,
            b.created_at,
            b.updated_at
        ],
    )
}

fn insert_staff(conn: &Connection, s: &Staff) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO staff (staff_id, branch_id, full_name, phone_number, email, role, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            s.staff_id,
            s.branch_id,
            s.full_name,
            s.phone_number,
            s.email,
            s.role,
            s.created_at,
            s.updated_at
        ],
    )
}

fn insert_product(conn: &Connection, p: &Product) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO products (product_id, product_name, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
        params![p.product_id, p.product_name, p.created_at, p.updated_at],
    )
}

pub(crate) fn insert_tank(conn: &Connection, t: &Tank) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO tanks (tank_id, branch_id, product_id, capacity_litres, tank_name, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            t.tank_id,
            t.branch_id,
            t.product_id,
            t.capacity_litres,
            t.tank_name,
            t.created_at,
            t.updated_at
        ],
    )
}

pub(crate) fn insert_inventory(conn: &Connection, inv: &TankInventory) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO tank_inventories (inventory_id, tank_id, current_stock_litres, measured_at, recorded_by, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            inv.inventory_id,
            inv.tank_id,
            inv.current_stock_litres,
            inv.measured_at,
            inv.recorded_by,
            inv.notes
        ],
    )
}

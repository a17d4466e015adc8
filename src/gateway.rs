use crate::db::{self, Database};
use crate::error::{Error, Result};
use crate::models::{Branch, Station, Tank, TankInventory};
use rusqlite::params;

/// Capability the application state persists form submissions through.
/// Records arrive validated and with ids assigned.
pub trait WriteGateway: Send + Sync {
    fn insert_station(&self, station: &Station) -> Result<()>;
    fn update_station(&self, station: &Station) -> Result<()>;
    fn delete_station(&self, station_id: &str) -> Result<()>;
    fn insert_branch(&self, branch: &Branch) -> Result<()>;
    /// Insert the tank together with its opening reading, if any.
    fn insert_tank(&self, tank: &Tank, opening: Option<&TankInventory>) -> Result<()>;
    fn insert_reading(&self, reading: &TankInventory) -> Result<()>;
}

/// `<kind>-<uuid>` for records created during a session.
pub fn new_id(kind: &str) -> String {
    format!("{}-{}", kind, uuid::Uuid::new_v4().simple())
}

impl WriteGateway for Database {
    fn insert_station(&self, station: &Station) -> Result<()> {
        let conn = self.lock()?;
        db::insert_station(&conn, station)?;
        Ok(())
    }

    fn update_station(&self, station: &Station) -> Result<()> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE stations SET station_name = ?1, station_code = ?2, updated_at = ?3 WHERE station_id = ?4",
            params![
                station.station_name,
                station.station_code,
                station.updated_at,
                station.station_id
            ],
        )?;
        if changed == 0 {
            return Err(Error::not_found("station", &station.station_id));
        }
        Ok(())
    }

    fn delete_station(&self, station_id: &str) -> Result<()> {
        let conn = self.lock()?;

        // Check if station still has branches
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM branches WHERE station_id = ?1",
            [station_id],
            |row| row.get(0),
        )?;
        if count > 0 {
            return Err(Error::validation(
                "Cannot delete station with existing branches",
            ));
        }

        conn.execute("DELETE FROM stations WHERE station_id = ?1", [station_id])?;
        Ok(())
    }

    fn insert_branch(&self, branch: &Branch) -> Result<()> {
        let conn = self.lock()?;
        db::insert_branch(&conn, branch)?;
        Ok(())
    }

    fn insert_tank(&self, tank: &Tank, opening: Option<&TankInventory>) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        db::insert_tank(&tx, tank)?;
        if let Some(reading) = opening {
            db::insert_inventory(&tx, reading)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn insert_reading(&self, reading: &TankInventory) -> Result<()> {
        let conn = self.lock()?;
        db::insert_inventory(&conn, reading)?;
        Ok(())
    }
}

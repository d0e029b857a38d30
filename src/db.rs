use crate::error::{AutosError, Result};
use crate::models::{Mark, Model, NewMark, NewModel, Row};
use crate::schema::{CREATE_AUTOS_SQL, CREATE_MODELS_SQL, Fields, Table};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params_from_iter};
use std::path::Path;
use tracing::{debug, error, info};

/// Default database file, relative to the working directory
pub const DEFAULT_DB_PATH: &str = "database.db";

/// Database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if absent) the database file at `path`
    pub fn connect<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| AutosError::Connection {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened database");
        Self::configure(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::configure(conn)
    }

    fn configure(conn: Connection) -> Result<Self> {
        // Referential integrity of models.marka_id is left to SQLite
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Database { conn })
    }

    /// Close the connection, reporting any failure to release it
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| AutosError::Db(e))
    }

    /// Run one raw statement (DDL or DML)
    pub fn execute(&self, sql: &str) -> Result<()> {
        debug!(sql = %sql, "execute");
        self.conn.execute(sql, []).map(|_| ()).map_err(|e| {
            error!(error = %e, "statement failed");
            AutosError::from(e)
        })
    }

    /// Create both tables if they do not exist yet
    pub fn init_schema(&self) -> Result<()> {
        self.execute(CREATE_AUTOS_SQL)?;
        self.execute(CREATE_MODELS_SQL)?;
        Ok(())
    }

    /// Check whether both tables are present
    pub fn is_initialized(&self) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('autos', 'models')",
            [],
            |row| row.get(0),
        )?;
        Ok(count == 2)
    }

    /// Insert the sample FIAT mark and its TIPO model
    pub fn seed(&self) -> Result<(i64, i64)> {
        let mark_id = self.insert_mark(&NewMark {
            name: "FIAT".to_string(),
            production_start: Some(String::new()),
            production_end: Some(String::new()),
        })?;
        let model_id = self.insert_model(&NewModel {
            mark_id,
            name: "TIPO".to_string(),
            description: Some("II".to_string()),
            status: "HB".to_string(),
            production_start: "2009-10-24 12:00:00".to_string(),
            production_end: "2019-10-24 12:00:00".to_string(),
        })?;
        Ok((mark_id, model_id))
    }

    // ==================== Inserts ====================

    pub fn insert_mark(&self, mark: &NewMark) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO autos (nazwa, start_prod, end_prod) VALUES (?1, ?2, ?3)",
            (&mark.name, &mark.production_start, &mark.production_end),
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, name = %mark.name, "inserted mark");
        Ok(id)
    }

    pub fn insert_model(&self, model: &NewModel) -> Result<i64> {
        model.validate()?;
        self.conn.execute(
            "INSERT INTO models (marka_id, nazwa, opis, status, start_prod, end_prod)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                model.mark_id,
                &model.name,
                &model.description,
                &model.status,
                &model.production_start,
                &model.production_end,
            ),
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, mark_id = model.mark_id, name = %model.name, "inserted model");
        Ok(id)
    }

    // ==================== Typed reads ====================

    pub fn get_mark(&self, id: i64) -> Result<Option<Mark>> {
        self.conn
            .query_row(
                "SELECT id, nazwa, start_prod, end_prod FROM autos WHERE id = ?1",
                [id],
                |row| {
                    Ok(Mark {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        production_start: row.get(2)?,
                        production_end: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(|e| e.into())
    }

    pub fn get_model(&self, id: i64) -> Result<Option<Model>> {
        self.conn
            .query_row(
                "SELECT id, marka_id, nazwa, opis, status, start_prod, end_prod
                 FROM models WHERE id = ?1",
                [id],
                |row| {
                    Ok(Model {
                        id: row.get(0)?,
                        mark_id: row.get(1)?,
                        name: row.get(2)?,
                        description: row.get(3)?,
                        status: row.get(4)?,
                        production_start: row.get(5)?,
                        production_end: row.get(6)?,
                    })
                },
            )
            .optional()
            .map_err(|e| e.into())
    }

    // ==================== Generic CRUD ====================

    /// Every row of `table`, in id order
    pub fn select_all(&self, table: Table) -> Result<Vec<Row>> {
        let sql = format!("SELECT {} FROM {table} ORDER BY id", table.column_list());
        self.query_rows(table, &sql, std::iter::empty())
    }

    /// Rows matching every `column = value` pair in `filter`
    pub fn select_where(&self, filter: &Fields) -> Result<Vec<Row>> {
        if filter.is_empty() {
            return Err(AutosError::EmptyFields);
        }
        let table = filter.table();
        let sql = format!(
            "SELECT {} FROM {table} WHERE {} ORDER BY id",
            table.column_list(),
            filter.predicate_sql()
        );
        self.query_rows(table, &sql, filter.values())
    }

    /// Set the given columns on the row with `id`; returns rows changed
    pub fn update(&self, id: i64, changes: &Fields) -> Result<usize> {
        if changes.is_empty() {
            return Err(AutosError::EmptyFields);
        }
        if changes.contains("id") {
            return Err(AutosError::ImmutableColumn("id"));
        }
        changes.validate()?;
        let table = changes.table();
        let sql = format!(
            "UPDATE {table} SET {} WHERE id = ?{}",
            changes.assignment_sql(),
            changes.len() + 1
        );
        debug!(sql = %sql, id, "update");
        let id_value = Value::Integer(id);
        let changed = self
            .conn
            .execute(&sql, params_from_iter(changes.values().chain([&id_value])))?;
        info!(%table, id, changed, "updated");
        Ok(changed)
    }

    /// Delete rows matching every pair in `filter`; returns rows removed
    pub fn delete_where(&self, filter: &Fields) -> Result<usize> {
        if filter.is_empty() {
            return Err(AutosError::EmptyFields);
        }
        let table = filter.table();
        let sql = format!("DELETE FROM {table} WHERE {}", filter.predicate_sql());
        debug!(sql = %sql, "delete");
        let deleted = self.conn.execute(&sql, params_from_iter(filter.values()))?;
        info!(%table, deleted, "deleted rows");
        Ok(deleted)
    }

    /// Delete every row of `table`; returns rows removed
    pub fn delete_all(&self, table: Table) -> Result<usize> {
        let sql = format!("DELETE FROM {table}");
        debug!(sql = %sql, "delete all");
        let deleted = self.conn.execute(&sql, [])?;
        info!(%table, deleted, "deleted all rows");
        Ok(deleted)
    }

    fn query_rows<'a>(
        &self,
        table: Table,
        sql: &str,
        params: impl Iterator<Item = &'a Value>,
    ) -> Result<Vec<Row>> {
        debug!(sql = %sql, "query");
        let width = table.columns().len();
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params_from_iter(params), |row| {
            let values = (0..width)
                .map(|i| row.get::<_, Value>(i))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(Row { table, values })
        })?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| e.into())
    }
}

use crate::error::{AutosError, Result};
use crate::schema::Table;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

/// Maximum length of a model status (`VARCHAR(15)`)
pub const MAX_STATUS_LEN: usize = 15;

/// A vehicle manufacturer, stored in `autos`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    pub id: i64,
    pub name: String,
    pub production_start: Option<String>,
    pub production_end: Option<String>,
}

/// A vehicle model belonging to a mark, stored in `models`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: i64,
    pub mark_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub production_start: String,
    pub production_end: String,
}

/// New mark input
#[derive(Debug, Clone, Default)]
pub struct NewMark {
    pub name: String,
    pub production_start: Option<String>,
    pub production_end: Option<String>,
}

/// New model input
#[derive(Debug, Clone, Default)]
pub struct NewModel {
    pub mark_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub production_start: String,
    pub production_end: String,
}

impl NewModel {
    /// Check status length and production dates before they reach the database
    pub fn validate(&self) -> Result<()> {
        check_status(&self.status)?;
        parse_production_date(&self.production_start)?;
        parse_production_date(&self.production_end)?;
        Ok(())
    }
}

/// Status must fit `VARCHAR(15)` and may not be empty
pub fn check_status(status: &str) -> Result<()> {
    if status.is_empty() || status.chars().count() > MAX_STATUS_LEN {
        return Err(AutosError::InvalidStatus(status.to_string()));
    }
    Ok(())
}

/// Apply the model rules to a single `models` column value.
/// NULLs are left to the NOT NULL constraints.
pub fn check_model_value(column: &str, value: &Value) -> Result<()> {
    match (column, value) {
        ("status", Value::Text(s)) => check_status(s),
        ("start_prod" | "end_prod", Value::Text(s)) => parse_production_date(s).map(|_| ()),
        _ => Ok(()),
    }
}

/// Accepts `YYYY-MM-DD HH:MM:SS` or a bare `YYYY-MM-DD`
pub fn parse_production_date(s: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(dt) = d.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }
    Err(AutosError::InvalidDate(s.to_string()))
}

/// One result row, values in table column order
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub table: Table,
    pub values: Vec<Value>,
}

impl Row {
    /// Value of the `id` column, which is always first
    pub fn id(&self) -> Option<i64> {
        match self.values.first() {
            Some(Value::Integer(id)) => Some(*id),
            _ => None,
        }
    }

    /// Render as a tuple, e.g. `(1, 'FIAT', '', '')`
    pub fn to_tuple_string(&self) -> String {
        let parts = self.values.iter().map(format_value).collect::<Vec<_>>();
        format!("({})", parts.join(", "))
    }

    /// JSON object keyed by column name
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .table
            .columns()
            .iter()
            .zip(&self.values)
            .map(|(c, v)| (c.name.to_string(), value_to_json(v)))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => quote_text(s),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

// Single quotes unless the text holds a `'` and no `"`
fn quote_text(s: &str) -> String {
    if s.contains('\'') && !s.contains('"') {
        format!("\"{s}\"")
    } else {
        format!("'{}'", s.replace('\'', "\\'"))
    }
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Integer(i) => serde_json::Value::from(*i),
        Value::Real(f) => serde_json::Value::from(*f),
        Value::Text(s) => serde_json::Value::from(s.as_str()),
        Value::Blob(b) => serde_json::Value::from(b.clone()),
    }
}

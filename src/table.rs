//! # Table Module
//!
//! A small, loosely-typed in-memory table used to reshape raw API responses.
//!
//! Rows are stored as vectors of [`serde_json::Value`] aligned with an ordered
//! list of column names, so records with arbitrary and differing field sets can
//! be combined before the final projection narrows them to a fixed schema.
//!
//! ## Operations
//!
//! - [`Frame::from_records`] - builds a table from a list of records
//! - [`Frame::with_constant`] / [`Frame::fill_null`] - column assignment
//! - [`Frame::outer_join`] - full outer hash join on a composite key
//! - [`Frame::select`] - projection to a fixed, ordered column list
//! - [`Frame::rows`] - typed conversion of every row through serde

use std::{collections::HashMap, fmt};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tabled::builder::Builder;
use thiserror::Error;

use crate::types::Record;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("column `{0}` not found")]
    MissingColumn(String),
    #[error("row {row} has no `{field}` object")]
    MissingField { row: usize, field: String },
    #[error("column `{0}` would appear twice in the join output")]
    DuplicateColumn(String),
    #[error("cannot convert row: {0}")]
    Conversion(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Frame {
    /// Creates a table with the given columns and no rows.
    pub fn empty<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Builds a table from records.
    ///
    /// The column set is the union of all record keys, in the order they are
    /// first seen. Fields a record does not carry are filled with `null`.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();
        for record in &records {
            for key in record.keys() {
                if !seen.contains_key(key) {
                    seen.insert(key.clone(), columns.len());
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|c| record.remove(c.as_str()).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the values of one column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&Value>, TableError> {
        let idx = self.position(name)?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Sets `name` to `value` in every row, appending the column if needed.
    pub fn with_constant(&mut self, name: &str, value: Value) {
        match self.columns.iter().position(|c| c == name) {
            Some(idx) => {
                for row in &mut self.rows {
                    row[idx] = value.clone();
                }
            }
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(value.clone());
                }
            }
        }
    }

    /// Replaces the `null` cells of an existing column with `value`.
    pub fn fill_null(&mut self, name: &str, value: Value) -> Result<(), TableError> {
        let idx = self.position(name)?;
        for row in &mut self.rows {
            if row[idx].is_null() {
                row[idx] = value.clone();
            }
        }
        Ok(())
    }

    /// Full outer join of `left` and `right` on the composite key `on`.
    ///
    /// Output rows are the left rows in order, each repeated once per matching
    /// right row, followed by the right rows that matched nothing. Key columns
    /// appear once and take their value from whichever side holds the row.
    /// Other columns of `right` whose names already exist on the left are kept
    /// under `name + suffix`; the left value keeps the plain name. If a renamed
    /// column would clash with an existing one the join fails with
    /// [`TableError::DuplicateColumn`].
    ///
    /// Key values match by JSON equality, except that numbers compare by value,
    /// so `1` and `1.0` join.
    ///
    /// A side without rows may lack the key columns entirely, in which case it
    /// contributes no rows. A side with rows must carry every key.
    pub fn outer_join(
        left: &Frame,
        right: &Frame,
        on: &[&str],
        suffix: &str,
    ) -> Result<Frame, TableError> {
        let left_keys = key_positions(left, on)?;
        let right_keys = key_positions(right, on)?;

        let mut columns = left.columns.clone();
        for key in on {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.to_string());
            }
        }
        let out_keys: Vec<usize> = on
            .iter()
            .filter_map(|key| columns.iter().position(|c| c == key))
            .collect();
        let left_width = columns.len();

        let right_extra: Vec<usize> = (0..right.columns.len())
            .filter(|&i| !on.contains(&right.columns[i].as_str()))
            .collect();
        for &i in &right_extra {
            let name = &right.columns[i];
            let out = if left.columns.contains(name) {
                format!("{name}{suffix}")
            } else {
                name.clone()
            };
            if columns.contains(&out) {
                return Err(TableError::DuplicateColumn(out));
            }
            columns.push(out);
        }

        let mut right_index: HashMap<Vec<String>, Vec<usize>> = HashMap::new();
        if let Some(keys) = &right_keys {
            for (r, row) in right.rows.iter().enumerate() {
                right_index.entry(join_key(row, keys)).or_default().push(r);
            }
        }

        let mut matched = vec![false; right.rows.len()];
        let mut rows: Vec<Vec<Value>> = Vec::new();

        if let Some(keys) = &left_keys {
            for row in &left.rows {
                match right_index.get(&join_key(row, keys)) {
                    Some(hits) => {
                        for &r in hits {
                            matched[r] = true;
                            let mut out = row.clone();
                            out.extend(right_extra.iter().map(|&i| right.rows[r][i].clone()));
                            rows.push(out);
                        }
                    }
                    None => {
                        let mut out = row.clone();
                        out.resize(left_width + right_extra.len(), Value::Null);
                        rows.push(out);
                    }
                }
            }
        }

        if let Some(keys) = &right_keys {
            for (r, row) in right.rows.iter().enumerate() {
                if matched[r] {
                    continue;
                }
                let mut out = vec![Value::Null; left_width];
                for (&pos, &key) in out_keys.iter().zip(keys) {
                    out[pos] = row[key].clone();
                }
                out.extend(right_extra.iter().map(|&i| row[i].clone()));
                rows.push(out);
            }
        }

        Ok(Frame { columns, rows })
    }

    /// Projects the table onto `columns`, in that order.
    pub fn select(&self, columns: &[&str]) -> Result<Frame, TableError> {
        let positions = columns
            .iter()
            .map(|c| self.position(c))
            .collect::<Result<Vec<_>, _>>()?;

        let rows = self
            .rows
            .iter()
            .map(|row| positions.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(Frame {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }

    pub fn into_records(self) -> Vec<Record> {
        let columns = self.columns;
        self.rows
            .into_iter()
            .map(|row| columns.iter().cloned().zip(row).collect())
            .collect()
    }

    /// Deserializes every row into `T`.
    pub fn rows<T: DeserializeOwned>(&self) -> Result<Vec<T>, TableError> {
        self.clone()
            .into_records()
            .into_iter()
            .map(|record| serde_json::from_value(Value::Object(record)).map_err(TableError::from))
            .collect()
    }

    fn position(&self, name: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = Builder::default();
        builder.push_record(self.columns.iter().cloned());
        for row in &self.rows {
            builder.push_record(row.iter().map(display_cell));
        }
        write!(f, "{}", builder.build())
    }
}

// None when the frame has no rows and lacks a key column.
fn key_positions(frame: &Frame, on: &[&str]) -> Result<Option<Vec<usize>>, TableError> {
    let mut positions = Vec::with_capacity(on.len());
    for key in on {
        match frame.columns.iter().position(|c| c == key) {
            Some(idx) => positions.push(idx),
            None if frame.rows.is_empty() => return Ok(None),
            None => return Err(TableError::MissingColumn(key.to_string())),
        }
    }
    Ok(Some(positions))
}

fn join_key(row: &[Value], positions: &[usize]) -> Vec<String> {
    positions
        .iter()
        .map(|&i| match &row[i] {
            Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()),
            other => other.to_string(),
        })
        .collect()
}

fn display_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

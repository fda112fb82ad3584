//! Immutable columnar dataframe
//!
//! Every operation returns a new frame; nothing mutates in place except the
//! one-way cache flag.

use super::column::Column;
use super::error::{EngineError, EngineResult};
use super::row::Row;
use super::schema::Schema;
use super::value::{DataType, Value};
use comfy_table::{CellAlignment, Table};
use rustc_hash::FxHashMap;
use std::cmp::Ordering as CmpOrdering;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A table of equal-length typed columns
#[derive(Debug)]
pub struct DataFrame {
    schema: Schema,
    columns: Vec<Column>,
    height: usize,
    /// Retention hint: set once when the frame is going to be re-read
    cached: AtomicBool,
}

impl DataFrame {
    /// Create a frame from a schema and matching columns
    pub fn new(schema: Schema, columns: Vec<Column>) -> EngineResult<Self> {
        if columns.len() != schema.len() {
            return Err(EngineError::ArityMismatch {
                expected: schema.len(),
                found: columns.len(),
            });
        }

        let height = columns.first().map_or(0, Column::len);
        for ((name, dtype), column) in schema.fields().zip(&columns) {
            if column.data_type() != dtype {
                return Err(EngineError::TypeMismatch {
                    column: name.to_string(),
                    expected: dtype,
                    found: column.data_type().name(),
                });
            }
            if column.len() != height {
                return Err(EngineError::LengthMismatch {
                    column: name.to_string(),
                    expected: height,
                    found: column.len(),
                });
            }
        }

        Ok(Self::from_parts(schema, columns, height))
    }

    /// Build a frame from row-oriented input
    pub fn from_rows<F, S, R>(fields: F, rows: R) -> EngineResult<Self>
    where
        F: IntoIterator<Item = (S, DataType)>,
        S: Into<String>,
        R: IntoIterator<Item = Vec<Value>>,
    {
        let schema = Schema::new(fields)?;
        let names: Vec<String> = schema.names().map(str::to_string).collect();
        let mut columns: Vec<Column> = schema.fields().map(|(_, dtype)| Column::new(dtype)).collect();

        for row in rows {
            if row.len() != names.len() {
                return Err(EngineError::ArityMismatch {
                    expected: names.len(),
                    found: row.len(),
                });
            }
            for ((column, name), value) in columns.iter_mut().zip(&names).zip(row) {
                column.push(name, value)?;
            }
        }

        Self::new(schema, columns)
    }

    fn from_parts(schema: Schema, columns: Vec<Column>, height: usize) -> Self {
        Self {
            schema,
            columns,
            height,
            cached: AtomicBool::new(false),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.schema.names().collect()
    }

    pub fn column(&self, name: &str) -> EngineResult<&Column> {
        self.schema
            .index_of(name)
            .map(|idx| &self.columns[idx])
            .ok_or_else(|| EngineError::ColumnNotFound(name.to_string()))
    }

    /// Mark the frame for retention. Monotonic: never reset.
    pub fn cache(&self) -> &Self {
        self.cached.store(true, Ordering::Release);
        self
    }

    pub fn is_cached(&self) -> bool {
        self.cached.load(Ordering::Acquire)
    }

    /// Materialize every row in frame order
    pub fn collect(&self) -> Vec<Row> {
        let names = self.shared_names();
        (0..self.height)
            .map(|idx| Row::new(names.clone(), self.row_values(idx)))
            .collect()
    }

    /// Rows as a JSON array of `{column: value}` objects
    pub fn to_json_rows(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.collect())
    }

    fn shared_names(&self) -> Arc<[String]> {
        self.schema.names().map(str::to_string).collect::<Vec<_>>().into()
    }

    fn row_values(&self, idx: usize) -> Vec<Value> {
        self.columns.iter().map(|column| column.get(idx)).collect()
    }

    /// Project a subset of columns, in the given order
    pub fn select(&self, columns: &[&str]) -> EngineResult<DataFrame> {
        let projections: Vec<(&str, &str)> = columns.iter().map(|&name| (name, name)).collect();
        self.select_as(&projections)
    }

    /// Project `(source, alias)` pairs
    pub fn select_as(&self, projections: &[(&str, &str)]) -> EngineResult<DataFrame> {
        let mut fields = Vec::with_capacity(projections.len());
        let mut columns = Vec::with_capacity(projections.len());
        for &(source, alias) in projections {
            let idx = self
                .schema
                .index_of(source)
                .ok_or_else(|| EngineError::ColumnNotFound(source.to_string()))?;
            fields.push((alias, self.columns[idx].data_type()));
            columns.push(self.columns[idx].clone());
        }
        let schema = Schema::new(fields)?;
        Ok(Self::from_parts(schema, columns, self.height))
    }

    /// Rename every column through `f`
    pub fn rename_with<F>(&self, f: F) -> EngineResult<DataFrame>
    where
        F: Fn(&str) -> String,
    {
        let schema = Schema::new(self.schema.fields().map(|(name, dtype)| (f(name), dtype)))?;
        Ok(Self::from_parts(schema, self.columns.clone(), self.height))
    }

    pub fn rename(&self, from: &str, to: &str) -> EngineResult<DataFrame> {
        if !self.schema.contains(from) {
            return Err(EngineError::ColumnNotFound(from.to_string()));
        }
        self.rename_with(|name| if name == from { to.to_string() } else { name.to_string() })
    }

    pub fn with_prefix(&self, prefix: &str) -> EngineResult<DataFrame> {
        self.rename_with(|name| format!("{}{}", prefix, name))
    }

    pub fn with_suffix(&self, suffix: &str) -> EngineResult<DataFrame> {
        self.rename_with(|name| format!("{}{}", name, suffix))
    }

    /// Keep rows whose `column` value satisfies `predicate`
    pub fn filter<P>(&self, column: &str, predicate: P) -> EngineResult<DataFrame>
    where
        P: Fn(&Value) -> bool,
    {
        let column = self.column(column)?;
        let indices: Vec<usize> = (0..self.height)
            .filter(|&idx| predicate(&column.get(idx)))
            .collect();
        Ok(self.take(&indices))
    }

    /// Keep rows satisfying a predicate over the whole row
    pub fn filter_rows<P>(&self, predicate: P) -> DataFrame
    where
        P: Fn(&Row) -> bool,
    {
        let indices: Vec<usize> = self
            .collect()
            .iter()
            .enumerate()
            .filter(|(_, row)| predicate(row))
            .map(|(idx, _)| idx)
            .collect();
        self.take(&indices)
    }

    /// Inner hash join on `self.left_on = other.right_on`.
    ///
    /// Output columns are `self`'s followed by `other`'s and must not
    /// collide. Rows come out in left order, then right order within a key.
    /// Null keys never match.
    pub fn join(&self, other: &DataFrame, left_on: &str, right_on: &str) -> EngineResult<DataFrame> {
        let left_key = self.column(left_on)?;
        let right_key = other.column(right_on)?;
        let schema = Schema::new(self.schema.fields().chain(other.schema.fields()))?;

        let mut index: FxHashMap<Value, Vec<usize>> = FxHashMap::default();
        for (idx, key) in right_key.iter().enumerate() {
            if !key.is_null() {
                index.entry(key).or_default().push(idx);
            }
        }

        let mut left_rows = Vec::new();
        let mut right_rows = Vec::new();
        for (idx, key) in left_key.iter().enumerate() {
            if let Some(matches) = index.get(&key) {
                for &m in matches {
                    left_rows.push(idx);
                    right_rows.push(m);
                }
            }
        }

        Ok(self.stitch(other, schema, &left_rows, &right_rows))
    }

    /// Cartesian product
    pub fn cross_join(&self, other: &DataFrame) -> EngineResult<DataFrame> {
        let schema = Schema::new(self.schema.fields().chain(other.schema.fields()))?;
        let mut left_rows = Vec::with_capacity(self.height * other.height);
        let mut right_rows = Vec::with_capacity(self.height * other.height);
        for l in 0..self.height {
            for r in 0..other.height {
                left_rows.push(l);
                right_rows.push(r);
            }
        }
        Ok(self.stitch(other, schema, &left_rows, &right_rows))
    }

    fn stitch(&self, other: &DataFrame, schema: Schema, left_rows: &[usize], right_rows: &[usize]) -> DataFrame {
        let columns = self
            .columns
            .iter()
            .map(|column| column.take(left_rows))
            .chain(other.columns.iter().map(|column| column.take(right_rows)))
            .collect();
        Self::from_parts(schema, columns, left_rows.len())
    }

    /// Stable sort by one column; nulls always last
    pub fn sort_by(&self, column: &str, descending: bool) -> EngineResult<DataFrame> {
        let keys: Vec<Value> = self.column(column)?.iter().collect();
        let mut indices: Vec<usize> = (0..self.height).collect();
        indices.sort_by(|&a, &b| match (keys[a].is_null(), keys[b].is_null()) {
            (true, true) => CmpOrdering::Equal,
            (true, false) => CmpOrdering::Greater,
            (false, true) => CmpOrdering::Less,
            (false, false) if descending => keys[b].cmp(&keys[a]),
            (false, false) => keys[a].cmp(&keys[b]),
        });
        Ok(self.take(&indices))
    }

    fn take(&self, indices: &[usize]) -> DataFrame {
        let columns = self.columns.iter().map(|column| column.take(indices)).collect();
        Self::from_parts(self.schema.clone(), columns, indices.len())
    }
}

impl Clone for DataFrame {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            columns: self.columns.clone(),
            height: self.height,
            cached: AtomicBool::new(self.is_cached()),
        }
    }
}

impl PartialEq for DataFrame {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema && self.columns == other.columns
    }
}

/// Renders the frame as a text table, cells right-aligned like a console `show()`
impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new();
        table.set_header(self.column_names());
        for idx in 0..self.height {
            let cells: Vec<String> = self.row_values(idx).iter().map(Value::to_string).collect();
            table.add_row(cells);
        }
        for column in table.column_iter_mut() {
            column.set_cell_alignment(CellAlignment::Right);
        }
        write!(f, "{}", table)
    }
}

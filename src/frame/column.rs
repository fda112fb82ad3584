//! Columnar storage for dataframe cells.
//!
//! Values of one column live in a contiguous, typed, nullable vector
//! rather than in individual row objects.

use super::error::{EngineError, EngineResult};
use super::value::{DataType, Value};

/// A single typed column
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Boolean(Vec<Option<bool>>),
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    String(Vec<Option<String>>),
}

impl Column {
    pub fn new(dtype: DataType) -> Self {
        Self::with_capacity(dtype, 0)
    }

    pub fn with_capacity(dtype: DataType, capacity: usize) -> Self {
        match dtype {
            DataType::Boolean => Column::Boolean(Vec::with_capacity(capacity)),
            DataType::Integer => Column::Integer(Vec::with_capacity(capacity)),
            DataType::Float => Column::Float(Vec::with_capacity(capacity)),
            DataType::String => Column::String(Vec::with_capacity(capacity)),
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Column::Boolean(_) => DataType::Boolean,
            Column::Integer(_) => DataType::Integer,
            Column::Float(_) => DataType::Float,
            Column::String(_) => DataType::String,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Boolean(v) => v.len(),
            Column::Integer(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a value. Null fits every column; integers widen into float columns.
    pub fn push(&mut self, name: &str, value: Value) -> EngineResult<()> {
        match (self, value) {
            (Column::Boolean(v), Value::Null) => v.push(None),
            (Column::Integer(v), Value::Null) => v.push(None),
            (Column::Float(v), Value::Null) => v.push(None),
            (Column::String(v), Value::Null) => v.push(None),
            (Column::Boolean(v), Value::Boolean(b)) => v.push(Some(b)),
            (Column::Integer(v), Value::Integer(i)) => v.push(Some(i)),
            (Column::Float(v), Value::Float(f)) => v.push(Some(f)),
            (Column::Float(v), Value::Integer(i)) => v.push(Some(i as f64)),
            (Column::String(v), Value::String(s)) => v.push(Some(s)),
            (col, other) => {
                return Err(EngineError::TypeMismatch {
                    column: name.to_string(),
                    expected: col.data_type(),
                    found: other.type_name(),
                })
            }
        }
        Ok(())
    }

    /// Read one cell; out-of-range reads yield Null
    pub fn get(&self, idx: usize) -> Value {
        match self {
            Column::Boolean(v) => v.get(idx).copied().flatten().map(Value::Boolean).unwrap_or(Value::Null),
            Column::Integer(v) => v.get(idx).copied().flatten().map(Value::Integer).unwrap_or(Value::Null),
            Column::Float(v) => v.get(idx).copied().flatten().map(Value::Float).unwrap_or(Value::Null),
            Column::String(v) => v
                .get(idx)
                .and_then(|o| o.as_ref())
                .map(|s| Value::String(s.clone()))
                .unwrap_or(Value::Null),
        }
    }

    /// Gather rows by index into a new column
    pub fn take(&self, indices: &[usize]) -> Column {
        match self {
            Column::Boolean(v) => Column::Boolean(indices.iter().map(|&i| v[i]).collect()),
            Column::Integer(v) => Column::Integer(indices.iter().map(|&i| v[i]).collect()),
            Column::Float(v) => Column::Float(indices.iter().map(|&i| v[i]).collect()),
            Column::String(v) => Column::String(indices.iter().map(|&i| v[i].clone()).collect()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).map(move |idx| self.get(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut col = Column::new(DataType::String);
        col.push("name", "Alice".into()).unwrap();
        col.push("name", Value::Null).unwrap();

        assert_eq!(col.len(), 2);
        assert_eq!(col.get(0), Value::from("Alice"));
        assert!(col.get(1).is_null());
        assert!(col.get(7).is_null());
    }

    #[test]
    fn test_type_mismatch_is_reported() {
        let mut col = Column::new(DataType::Integer);
        let err = col.push("age", "old".into()).unwrap_err();
        assert_eq!(
            err,
            EngineError::TypeMismatch {
                column: "age".to_string(),
                expected: DataType::Integer,
                found: "String",
            }
        );
    }

    #[test]
    fn test_integer_widens_into_float() {
        let mut col = Column::new(DataType::Float);
        col.push("score", Value::Integer(2)).unwrap();
        assert_eq!(col.get(0), Value::Float(2.0));
    }

    #[test]
    fn test_take_gathers_in_order() {
        let mut col = Column::new(DataType::Integer);
        for i in 0..5i64 {
            col.push("n", i.into()).unwrap();
        }
        let taken = col.take(&[4, 0, 4]);
        assert_eq!(taken.iter().collect::<Vec<_>>(), vec![4i64.into(), 0i64.into(), 4i64.into()]);
    }
}

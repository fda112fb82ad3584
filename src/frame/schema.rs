//! Ordered column schema

use super::error::{EngineError, EngineResult};
use super::value::DataType;
use indexmap::IndexMap;

/// Ordered mapping from column name to data type. Names are unique.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    fields: IndexMap<String, DataType>,
}

impl Schema {
    pub fn new<I, S>(fields: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = (S, DataType)>,
        S: Into<String>,
    {
        let mut map = IndexMap::new();
        for (name, dtype) in fields {
            let name = name.into();
            if map.contains_key(&name) {
                return Err(EngineError::DuplicateColumn(name));
            }
            map.insert(name, dtype);
        }
        Ok(Self { fields: map })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.get_index_of(name)
    }

    /// Field at a position
    pub fn field(&self, idx: usize) -> Option<(&str, DataType)> {
        self.fields.get_index(idx).map(|(name, dtype)| (name.as_str(), *dtype))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, DataType)> {
        self.fields.iter().map(|(name, dtype)| (name.as_str(), *dtype))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_keeps_order() {
        let schema = Schema::new(vec![("id", DataType::Integer), ("name", DataType::String)]).unwrap();
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["id", "name"]);
        assert_eq!(schema.field(0), Some(("id", DataType::Integer)));
        assert_eq!(schema.index_of("name"), Some(1));
        assert!(!schema.contains("age"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = Schema::new(vec![("id", DataType::Integer), ("id", DataType::String)]).unwrap_err();
        assert_eq!(err, EngineError::DuplicateColumn("id".to_string()));
    }
}

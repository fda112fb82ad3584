//! Vertex filtering by attribute predicate

use super::error::{GraphResult, Stage};
use super::GraphFrame;
use crate::frame::{DataFrame, Value};
use tracing::{debug, info_span};

impl GraphFrame {
    /// Vertices whose `column` value satisfies `predicate`, all attributes kept
    pub fn filter_vertices_by<P>(&self, column: &str, predicate: P) -> GraphResult<DataFrame>
    where
        P: Fn(&Value) -> bool,
    {
        let _span = info_span!("filter", column).entered();
        let matched = self
            .vertices()
            .filter(column, predicate)
            .map_err(|e| e.at(Stage::Filter))?;
        debug!(matched = matched.height(), total = self.vertex_count(), "vertices filtered");
        Ok(matched)
    }

    /// `(name, age)` of every vertex whose age satisfies `predicate`.
    ///
    /// Output order follows the vertex frame and carries no meaning.
    /// Vertices with a null age or a null name never match.
    pub fn filter_vertices<P>(&self, predicate: P) -> GraphResult<Vec<(String, i64)>>
    where
        P: Fn(i64) -> bool,
    {
        let matched = self.filter_vertices_by("age", |age| age.as_integer().map_or(false, &predicate))?;
        let projected = matched.select(&["name", "age"]).map_err(|e| e.at(Stage::Filter))?;

        Ok(projected
            .collect()
            .into_iter()
            .filter_map(|row| {
                let age = row.value(1)?.as_integer()?;
                let name = row.value(0)?.as_str()?.to_string();
                Some((name, age))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::frame::{DataFrame, DataType, Value};
    use crate::graph::{build_graph, GraphFrame, GraphInput, Stage};
    use std::collections::HashSet;

    #[test]
    fn test_filter_by_age() {
        let graph = GraphInput::people().build().unwrap();
        let older: HashSet<(String, i64)> = graph.filter_vertices(|age| age > 40).unwrap().into_iter().collect();

        let expected: HashSet<(String, i64)> = [("Charlie", 65), ("David", 42), ("Ed", 55), ("Fran", 50)]
            .iter()
            .map(|&(n, a)| (n.to_string(), a))
            .collect();
        assert_eq!(older, expected);
    }

    #[test]
    fn test_unsatisfiable_predicate_is_empty() {
        let graph = GraphInput::people().build().unwrap();
        assert!(graph.filter_vertices(|_| false).unwrap().is_empty());
    }

    #[test]
    fn test_filter_by_other_attribute() {
        let graph = GraphInput::people().build().unwrap();
        let named = graph
            .filter_vertices_by("name", |name| name.as_str().map_or(false, |n| n.starts_with('C')))
            .unwrap();
        assert_eq!(named.height(), 1);
        assert_eq!(named.column_names(), vec!["id", "name", "age"]);
    }

    #[test]
    fn test_unknown_column_reports_filter_stage() {
        let graph = GraphInput::people().build().unwrap();
        let err = graph.filter_vertices_by("height", |_| true).unwrap_err();
        assert_eq!(err.stage(), Stage::Filter);
    }

    #[test]
    fn test_null_name_or_age_never_matches() {
        let vertices = DataFrame::from_rows(
            vec![("id", DataType::Integer), ("name", DataType::String), ("age", DataType::Integer)],
            vec![
                vec![1i64.into(), Value::Null, 70i64.into()],
                vec![2i64.into(), "Bob".into(), Value::Null],
                vec![3i64.into(), "Carol".into(), 60i64.into()],
            ],
        )
        .unwrap();
        let edges =
            DataFrame::from_rows(vec![("src", DataType::Integer), ("dst", DataType::Integer)], Vec::<Vec<Value>>::new())
                .unwrap();
        let graph = GraphFrame::new(vertices, edges).unwrap();

        assert_eq!(graph.filter_vertices(|age| age > 40).unwrap(), vec![("Carol".to_string(), 60)]);
    }

    #[test]
    fn test_empty_graph_filters_to_empty() {
        let graph = build_graph(Vec::<(i64, &str, i64)>::new(), Vec::new()).unwrap();
        assert!(graph.filter_vertices(|age| age > 0).unwrap().is_empty());
    }
}

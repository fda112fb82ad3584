//! Declarative motif (graph pattern) queries using Pest
//!
//! A motif is a list of directed edge terms such as
//! `(a)-[e]->(b); (b)-[]->(c)`. Each term is matched by joining the edge
//! frame with both endpoint vertex frames; terms sharing a vertex name are
//! then joined on that vertex's id. Matches come back as one frame whose
//! columns are `<element>.<attribute>` for every named element.

use super::error::{GraphResult, Stage};
use super::{GraphFrame, DST, ID, SRC};
use crate::frame::{DataFrame, EngineError, EngineResult};
use pest::Parser;
use pest_derive::Parser;
use tracing::{debug, info_span};

#[derive(Parser)]
#[grammar = "graph/motif.pest"]
struct MotifParser;

/// Prefix of generated names; user names may not start with it
const RESERVED: &str = "__";
/// Prefix for the right-hand copy of shared vertex columns during a join
const RHS: &str = "__rhs.";

/// One directed edge term `(src)-[edge]->(dst)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeTerm {
    pub src: String,
    /// `None` for an anonymous edge `[]`
    pub edge: Option<String>,
    pub dst: String,
}

/// A parsed motif
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Motif {
    pub terms: Vec<EdgeTerm>,
}

impl Motif {
    /// Named elements in order of first appearance
    pub fn elements(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for term in &self.terms {
            for name in [Some(term.src.as_str()), term.edge.as_deref(), Some(term.dst.as_str())]
                .into_iter()
                .flatten()
            {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// Parse a motif string into its terms
pub fn parse_motif(input: &str) -> EngineResult<Motif> {
    let pairs = MotifParser::parse(Rule::motif, input)
        .map_err(|e| EngineError::InvalidPattern(e.to_string()))?;

    let mut terms = Vec::new();
    for pair in pairs {
        for inner in pair.into_inner() {
            if inner.as_rule() == Rule::term {
                terms.push(parse_term(inner)?);
            }
        }
    }

    validate(&terms)?;
    Ok(Motif { terms })
}

fn parse_term(pair: pest::iterators::Pair<Rule>) -> EngineResult<EdgeTerm> {
    let mut inner = pair.into_inner();
    let mut next_name = |what: &str| -> EngineResult<Option<String>> {
        let element = inner
            .next()
            .ok_or_else(|| EngineError::InvalidPattern(format!("term is missing its {}", what)))?;
        Ok(element.into_inner().next().map(|name| name.as_str().to_string()))
    };

    let src = next_name("source vertex")?;
    let edge = next_name("edge")?;
    let dst = next_name("destination vertex")?;

    match (src, dst) {
        (Some(src), Some(dst)) => Ok(EdgeTerm { src, edge, dst }),
        _ => Err(EngineError::InvalidPattern("vertices must be named".to_string())),
    }
}

fn validate(terms: &[EdgeTerm]) -> EngineResult<()> {
    let mut vertices: Vec<&str> = Vec::new();
    let mut edges: Vec<&str> = Vec::new();
    for term in terms {
        vertices.push(&term.src);
        vertices.push(&term.dst);
        if let Some(edge) = &term.edge {
            if edges.contains(&edge.as_str()) {
                return Err(EngineError::InvalidPattern(format!(
                    "edge '{}' is used more than once",
                    edge
                )));
            }
            edges.push(edge);
        }
    }

    for name in vertices.iter().chain(&edges) {
        if name.starts_with(RESERVED) {
            return Err(EngineError::InvalidPattern(format!(
                "names starting with '{}' are reserved: '{}'",
                RESERVED, name
            )));
        }
    }
    if let Some(clash) = edges.iter().find(|e| vertices.contains(*e)) {
        return Err(EngineError::InvalidPattern(format!(
            "'{}' names both a vertex and an edge",
            clash
        )));
    }
    Ok(())
}

impl GraphFrame {
    /// Find every occurrence of a motif such as `(a)-[e]->(b)`
    pub fn find(&self, pattern: &str) -> GraphResult<DataFrame> {
        let _span = info_span!("pattern", pattern).entered();
        let motif = parse_motif(pattern).map_err(|e| e.at(Stage::Pattern))?;
        let matches = self.match_motif(&motif).map_err(|e| e.at(Stage::Pattern))?;
        debug!(terms = motif.terms.len(), matches = matches.height(), "motif evaluated");
        Ok(matches)
    }

    fn match_motif(&self, motif: &Motif) -> EngineResult<DataFrame> {
        let mut acc: Option<DataFrame> = None;
        let mut bound: Vec<&str> = Vec::new();

        for (idx, term) in motif.terms.iter().enumerate() {
            let edge_name = term
                .edge
                .clone()
                .unwrap_or_else(|| format!("{}e{}", RESERVED, idx));
            let frame = self.match_term(term, &edge_name)?;

            acc = Some(match acc {
                None => frame,
                Some(left) => {
                    let mut shared: Vec<&str> = Vec::new();
                    for v in [term.src.as_str(), term.dst.as_str()] {
                        if bound.contains(&v) && !shared.contains(&v) {
                            shared.push(v);
                        }
                    }
                    join_on_vertices(&left, &frame, &shared)?
                }
            });

            for v in [term.src.as_str(), term.dst.as_str()] {
                if !bound.contains(&v) {
                    bound.push(v);
                }
            }
        }

        let acc = acc.ok_or_else(|| EngineError::InvalidPattern("motif has no terms".to_string()))?;

        let mut columns: Vec<&str> = Vec::new();
        for element in motif.elements() {
            let prefix = format!("{}.", element);
            columns.extend(acc.column_names().into_iter().filter(|name| name.starts_with(&prefix)));
        }
        acc.select(&columns)
    }

    /// Matches of a single term: edge columns, then source, then destination
    fn match_term(&self, term: &EdgeTerm, edge_name: &str) -> EngineResult<DataFrame> {
        let edge_src = format!("{}.{}", edge_name, SRC);
        let edge_dst = format!("{}.{}", edge_name, DST);
        let src_id = format!("{}.{}", term.src, ID);

        let edges = self.edges().with_prefix(&format!("{}.", edge_name))?;
        let src = self.vertices().with_prefix(&format!("{}.", term.src))?;
        let with_src = edges.join(&src, &edge_src, &src_id)?;

        if term.src == term.dst {
            return Ok(with_src.filter_rows(|row| row.get(&edge_dst) == row.get(&src_id)));
        }

        let dst_id = format!("{}.{}", term.dst, ID);
        let dst = self.vertices().with_prefix(&format!("{}.", term.dst))?;
        with_src.join(&dst, &edge_dst, &dst_id)
    }
}

/// Join a new term's matches onto the accumulated matches. Vertices already
/// bound on the left must take the same id on the right.
fn join_on_vertices(left: &DataFrame, right: &DataFrame, shared: &[&str]) -> EngineResult<DataFrame> {
    let Some((first, rest)) = shared.split_first() else {
        return left.cross_join(right);
    };

    let prefixes: Vec<String> = shared.iter().map(|v| format!("{}.", v)).collect();
    let right = right.rename_with(|name| {
        if prefixes.iter().any(|p| name.starts_with(p.as_str())) {
            format!("{}{}", RHS, name)
        } else {
            name.to_string()
        }
    })?;

    let left_key = format!("{}.{}", first, ID);
    let right_key = format!("{}{}", RHS, left_key);
    let mut joined = left.join(&right, &left_key, &right_key)?;

    for v in rest {
        let l = format!("{}.{}", v, ID);
        let r = format!("{}{}", RHS, l);
        joined = joined.filter_rows(|row| row.get(&l) == row.get(&r));
    }

    let keep: Vec<&str> = joined
        .column_names()
        .into_iter()
        .filter(|name| !name.starts_with(RHS))
        .collect();
    joined.select(&keep)
}

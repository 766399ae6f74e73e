use crate::error::SparqlError;
use oxigraph::model::Term;
use oxigraph::sparql::QueryResults;
use serde::Serialize;
use std::collections::BTreeMap;

/// Flat, serialization-ready results of an ad-hoc query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryRows {
    /// Results of a `SELECT` query. Unbound variables are omitted from a row.
    Solutions {
        variables: Vec<String>,
        rows: Vec<BTreeMap<String, String>>,
    },
    /// Result of an `ASK` query.
    Boolean { value: bool },
    /// Results of a `CONSTRUCT` or `DESCRIBE` query as subject, predicate, object.
    Triples { triples: Vec<[String; 3]> },
}

impl QueryRows {
    /// The number of rows (or triples) in the result.
    pub fn len(&self) -> usize {
        match self {
            QueryRows::Solutions { rows, .. } => rows.len(),
            QueryRows::Boolean { .. } => 1,
            QueryRows::Triples { triples } => triples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn collect(results: QueryResults) -> Result<Self, SparqlError> {
        match results {
            QueryResults::Solutions(solutions) => {
                let variables = solutions
                    .variables()
                    .iter()
                    .map(|variable| variable.as_str().to_owned())
                    .collect::<Vec<_>>();
                let mut rows = Vec::new();
                for solution in solutions {
                    let solution = solution?;
                    let row = solution
                        .iter()
                        .map(|(variable, term)| (variable.as_str().to_owned(), render_term(term)))
                        .collect();
                    rows.push(row);
                }
                Ok(QueryRows::Solutions { variables, rows })
            }
            QueryResults::Boolean(value) => Ok(QueryRows::Boolean { value }),
            QueryResults::Graph(triples) => {
                let mut rendered = Vec::new();
                for triple in triples {
                    let triple = triple?;
                    rendered.push([
                        triple.subject.to_string(),
                        triple.predicate.as_str().to_owned(),
                        render_term(&triple.object),
                    ]);
                }
                Ok(QueryRows::Triples { triples: rendered })
            }
        }
    }
}

/// IRIs and literal values are returned as plain strings, other terms in N-Triples syntax.
fn render_term(term: &Term) -> String {
    match term {
        Term::NamedNode(node) => node.as_str().to_owned(),
        Term::Literal(literal) => literal.value().to_owned(),
        _ => term.to_string(),
    }
}

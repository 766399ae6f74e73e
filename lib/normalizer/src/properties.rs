use elixir_training_model::vocab::{rdf, schema_local_name};
use elixir_training_storage::SourceGraph;
use elixir_training_model::{Subject, Term};

/// The schema.org properties of one subject, in document order.
///
/// Predicates outside of schema.org and Bioschemas are ignored, both `http` and `https`
/// spellings of schema.org are treated alike.
pub(crate) struct Properties<'graph> {
    graph: &'graph SourceGraph,
    types: Vec<&'graph str>,
    values: Vec<(&'graph str, &'graph Term)>,
}

impl<'graph> Properties<'graph> {
    pub fn of(graph: &'graph SourceGraph, subject: &Subject) -> Self {
        let mut types = Vec::new();
        let mut values = Vec::new();
        for triple in graph.triples_for_subject(subject) {
            if triple.predicate.as_ref() == rdf::TYPE {
                if let Term::NamedNode(class) = &triple.object {
                    types.extend(schema_local_name(class.as_str()));
                }
            } else if let Some(local) = schema_local_name(triple.predicate.as_str()) {
                values.push((local, &triple.object));
            }
        }
        Self {
            graph,
            types,
            values,
        }
    }

    /// Returns the properties of the node `term` refers to, if the source describes it.
    pub fn nested(&self, term: &Term) -> Option<Properties<'graph>> {
        self.graph
            .described_subject(term)
            .map(|subject| Properties::of(self.graph, &subject))
    }

    /// Local names of the schema.org classes of the subject.
    pub fn types(&self) -> &[&'graph str] {
        &self.types
    }

    pub fn has_type(&self, local_name: &str) -> bool {
        self.types.contains(&local_name)
    }

    pub fn has(&self, property: &str) -> bool {
        self.values.iter().any(|(local, _)| *local == property)
    }

    pub fn values<'a>(&'a self, property: &'a str) -> impl Iterator<Item = &'graph Term> + 'a {
        self.values
            .iter()
            .filter(move |(local, _)| *local == property)
            .map(|(_, term)| *term)
    }

    /// The preferred textual value of `property`.
    ///
    /// Untagged and English literals win over other languages, otherwise document order decides.
    pub fn text(&self, property: &str) -> Option<String> {
        let mut fallback = None;
        for term in self.values(property) {
            let Term::Literal(literal) = term else {
                continue;
            };
            let value = literal.value().trim();
            if value.is_empty() {
                continue;
            }
            match literal.language() {
                None => return Some(value.to_owned()),
                Some(language) if language.starts_with("en") => return Some(value.to_owned()),
                Some(_) => {
                    fallback.get_or_insert_with(|| value.to_owned());
                }
            }
        }
        fallback
    }

    /// The first literal value or IRI of `property`.
    pub fn text_or_iri(&self, property: &str) -> Option<String> {
        self.text(property).or_else(|| {
            self.values(property).find_map(|term| match term {
                Term::NamedNode(node) => Some(node.as_str().to_owned()),
                _ => None,
            })
        })
    }

    /// All literal values and IRIs of `property`.
    pub fn all_text(&self, property: &str) -> Vec<String> {
        self.values(property)
            .filter_map(|term| elixir_training_model::term_to_string(term.as_ref()))
            .collect()
    }

    /// The first lexical value of `property`, which is either a literal or an IRI.
    pub fn lexical(&self, property: &str) -> Option<String> {
        self.values(property)
            .find_map(|term| elixir_training_model::term_to_string(term.as_ref()))
    }
}

use oxrdf::{NamedNode, NamedNodeRef, Subject, Term, Triple};
use rustc_hash::{FxHashMap, FxHashSet};

/// The triples of a single source, in document order.
///
/// Blank nodes are renamed while parsing, so blank nodes of different sources never collide.
#[derive(Debug)]
pub struct SourceGraph {
    label: String,
    graph_name: NamedNode,
    triples: Vec<Triple>,
    by_subject: FxHashMap<Subject, Vec<usize>>,
}

impl SourceGraph {
    pub fn new(label: impl Into<String>, graph_name: NamedNode, triples: Vec<Triple>) -> Self {
        let mut by_subject: FxHashMap<Subject, Vec<usize>> = FxHashMap::default();
        for (position, triple) in triples.iter().enumerate() {
            by_subject
                .entry(triple.subject.clone())
                .or_default()
                .push(position);
        }
        Self {
            label: label.into(),
            graph_name,
            triples,
            by_subject,
        }
    }

    /// The provenance label of this source.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The named graph this source is stored in.
    pub fn graph_name(&self) -> &NamedNode {
        &self.graph_name
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Returns all triples of `subject` in document order.
    pub fn triples_for_subject<'graph>(
        &'graph self,
        subject: &Subject,
    ) -> impl Iterator<Item = &'graph Triple> + 'graph {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .map(|position| &self.triples[*position])
    }

    /// Returns whether the source contains at least one triple about `subject`.
    pub fn describes(&self, subject: &Subject) -> bool {
        self.by_subject.contains_key(subject)
    }

    /// Returns the subject described by `term`, if `term` is a node that has triples in this
    /// source.
    pub fn described_subject(&self, term: &Term) -> Option<Subject> {
        let subject = match term {
            Term::NamedNode(node) => Subject::NamedNode(node.clone()),
            Term::BlankNode(node) => Subject::BlankNode(node.clone()),
            _ => return None,
        };
        self.describes(&subject).then_some(subject)
    }

    /// Returns the distinct subjects that have an `rdf:type` accepted by `is_class`, in order of
    /// their first type assertion.
    pub fn subjects_with_type(&self, is_class: impl Fn(&str) -> bool) -> Vec<&Subject> {
        let mut seen = FxHashSet::default();
        self.triples
            .iter()
            .filter(|triple| triple.predicate.as_ref() == oxrdf::vocab::rdf::TYPE)
            .filter(|triple| matches!(&triple.object, Term::NamedNode(class) if is_class(class.as_str())))
            .map(|triple| &triple.subject)
            .filter(|subject| seen.insert(*subject))
            .collect()
    }

    /// Returns the objects of `subject` for every predicate accepted by `predicate`.
    pub fn objects<'graph>(
        &'graph self,
        subject: &Subject,
        predicate: impl Fn(NamedNodeRef<'_>) -> bool + 'graph,
    ) -> impl Iterator<Item = &'graph Term> + 'graph {
        self.triples_for_subject(subject)
            .filter(move |triple| predicate(triple.predicate.as_ref()))
            .map(|triple| &triple.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::Literal;

    fn node(iri: &str) -> NamedNode {
        NamedNode::new_unchecked(iri)
    }

    fn example_graph() -> SourceGraph {
        let course = node("http://example.com/course");
        let other = node("http://example.com/other");
        let triples = vec![
            Triple::new(
                other.clone(),
                oxrdf::vocab::rdf::TYPE,
                node("https://schema.org/Course"),
            ),
            Triple::new(
                course.clone(),
                node("https://schema.org/name"),
                Literal::new_simple_literal("Course"),
            ),
            Triple::new(
                course.clone(),
                oxrdf::vocab::rdf::TYPE,
                node("https://schema.org/Course"),
            ),
            Triple::new(
                course,
                oxrdf::vocab::rdf::TYPE,
                node("https://schema.org/LearningResource"),
            ),
        ];
        SourceGraph::new("test", node("urn:test"), triples)
    }

    #[test]
    fn typed_subjects_in_document_order() {
        let graph = example_graph();
        let subjects = graph.subjects_with_type(|class| class.starts_with("https://schema.org/"));
        assert_eq!(
            subjects,
            vec![
                &Subject::from(node("http://example.com/other")),
                &Subject::from(node("http://example.com/course")),
            ]
        );
    }

    #[test]
    fn triples_for_subject_keeps_document_order() {
        let graph = example_graph();
        let subject = Subject::from(node("http://example.com/course"));
        let predicates = graph
            .triples_for_subject(&subject)
            .map(|triple| triple.predicate.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            predicates,
            vec![
                "https://schema.org/name",
                "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
                "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
            ]
        );
        assert!(graph
            .described_subject(&Term::from(node("http://example.com/missing")))
            .is_none());
    }
}

use crate::properties::Properties;
use elixir_training_model::{Subject, Term};
use elixir_training_storage::SourceGraph;
use rustc_hash::FxHashSet;
use sha2::{Digest, Sha256};

/// The IRI prefix of keys synthesized for anonymous resources.
pub const SYNTHETIC_ID_PREFIX: &str = "urn:elixir-training:resource:";

/// Nested blank nodes deeper than this are hashed by position only.
const MAX_HASH_DEPTH: usize = 8;

/// Resolves the canonical id of a resource.
///
/// The priority is: explicit persistent identifier, declared URL, subject IRI and finally a key
/// synthesized from the structure of an anonymous subject.
pub fn canonical_id(
    graph: &SourceGraph,
    subject: &Subject,
    identifier: Option<&str>,
    url: Option<&str>,
) -> String {
    if let Some(id) = identifier.or(url) {
        return id.to_owned();
    }
    match subject {
        Subject::NamedNode(node) => node.as_str().to_owned(),
        _ => synthetic_id(graph, subject),
    }
}

/// Returns the explicit persistent identifier of a subject.
///
/// `schema:identifier` may be a literal, an IRI or a `PropertyValue` node carrying the actual value.
pub(crate) fn persistent_identifier(properties: &Properties<'_>) -> Option<String> {
    properties.values("identifier").find_map(|term| match term {
        Term::Literal(literal) => {
            let value = literal.value().trim();
            (!value.is_empty()).then(|| value.to_owned())
        }
        _ => match properties.nested(term) {
            Some(nested) => nested.lexical("value").or_else(|| nested.lexical("url")),
            None => elixir_training_model::term_to_string(term.as_ref()),
        },
    })
}

/// Synthesizes a stable key for `subject` from the content of its subtree.
///
/// Blank node labels are never part of the hash, so parsing the same content twice yields the same
/// key.
pub fn synthetic_id(graph: &SourceGraph, subject: &Subject) -> String {
    let mut visiting = FxHashSet::default();
    let digest = structural_digest(graph, subject, &mut visiting, 0);
    format!("{SYNTHETIC_ID_PREFIX}{}", hex::encode(&digest[..16]))
}

fn structural_digest(
    graph: &SourceGraph,
    subject: &Subject,
    visiting: &mut FxHashSet<Subject>,
    depth: usize,
) -> [u8; 32] {
    visiting.insert(subject.clone());
    let mut lines = graph
        .triples_for_subject(subject)
        .map(|triple| {
            let object = match &triple.object {
                Term::BlankNode(_) => match graph.described_subject(&triple.object) {
                    Some(nested) if depth < MAX_HASH_DEPTH && !visiting.contains(&nested) => {
                        let digest = structural_digest(graph, &nested, visiting, depth + 1);
                        format!("_:{}", hex::encode(digest))
                    }
                    _ => "_:".to_owned(),
                },
                object => object.to_string(),
            };
            format!("{} {object}", triple.predicate)
        })
        .collect::<Vec<_>>();
    visiting.remove(subject);

    lines.sort_unstable();
    let mut hasher = Sha256::new();
    for line in &lines {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use elixir_training_storage::{load_source, SourceSpec};

    const ANONYMOUS: &str = r#"
        @prefix schema: <https://schema.org/> .
        [] a schema:LearningResource ;
            schema:name "Slides" ;
            schema:author [ a schema:Person ; schema:name "Ada" ] .
    "#;

    fn anonymous_subject(graph: &SourceGraph) -> Subject {
        graph
            .subjects_with_type(|class| class.ends_with("LearningResource"))
            .into_iter()
            .next()
            .cloned()
            .unwrap()
    }

    #[test]
    fn synthetic_ids_are_reproducible() {
        let first = load_source(&SourceSpec::inline("a", ANONYMOUS)).unwrap();
        let second = load_source(&SourceSpec::inline("b", ANONYMOUS)).unwrap();

        let first_id = synthetic_id(&first, &anonymous_subject(&first));
        let second_id = synthetic_id(&second, &anonymous_subject(&second));

        assert!(first_id.starts_with(SYNTHETIC_ID_PREFIX));
        assert_eq!(first_id, second_id);
    }

    #[test]
    fn synthetic_ids_depend_on_nested_content() {
        let other = ANONYMOUS.replace("\"Ada\"", "\"Grace\"");
        let first = load_source(&SourceSpec::inline("a", ANONYMOUS)).unwrap();
        let second = load_source(&SourceSpec::inline("b", other)).unwrap();

        assert_ne!(
            synthetic_id(&first, &anonymous_subject(&first)),
            synthetic_id(&second, &anonymous_subject(&second))
        );
    }

    #[test]
    fn identifier_wins_over_url_and_subject() {
        let graph = load_source(&SourceSpec::inline("a", ANONYMOUS)).unwrap();
        let subject = anonymous_subject(&graph);
        assert_eq!(
            canonical_id(&graph, &subject, Some("doi:10.1/x"), Some("https://x.org")),
            "doi:10.1/x"
        );
        assert_eq!(
            canonical_id(&graph, &subject, None, Some("https://x.org")),
            "https://x.org"
        );
    }
}

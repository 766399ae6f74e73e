//! Vocabulary terms used by the harvested training metadata.

pub use oxrdf::vocab::{rdf, xsd};

/// The schema.org namespace as published today.
pub const SCHEMA: &str = "https://schema.org/";
/// The legacy `http` schema.org namespace that is still emitted by several providers.
pub const SCHEMA_HTTP: &str = "http://schema.org/";
/// The Bioschemas namespace.
pub const BIOSCHEMAS: &str = "https://bioschemas.org/";
/// The EDAM ontology namespace, used for topics.
pub const EDAM: &str = "http://edamontology.org/";
/// The Dublin Core terms namespace.
pub const DCTERMS: &str = "http://purl.org/dc/terms/";
/// The RDF namespace.
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// The RDFS namespace.
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
/// The XSD namespace.
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

/// Classes whose instances are training resources.
pub const RESOURCE_CLASSES: [&str; 5] = [
    "Course",
    "LearningResource",
    "Event",
    "EducationEvent",
    "TrainingMaterial",
];

/// Resource classes that carry their schedule directly instead of through course instances.
pub const EVENT_CLASSES: [&str; 2] = ["Event", "EducationEvent"];

/// Returns the local name of `iri` if it belongs to schema.org (either scheme) or Bioschemas.
pub fn schema_local_name(iri: &str) -> Option<&str> {
    [SCHEMA, SCHEMA_HTTP, BIOSCHEMAS]
        .into_iter()
        .find_map(|namespace| iri.strip_prefix(namespace))
        .filter(|local| !local.is_empty())
}

/// Returns whether `iri` names one of the [`RESOURCE_CLASSES`].
pub fn is_resource_class(iri: &str) -> bool {
    schema_local_name(iri).is_some_and(|local| RESOURCE_CLASSES.contains(&local))
}

/// Returns whether `iri` names one of the [`EVENT_CLASSES`].
pub fn is_event_class(iri: &str) -> bool {
    schema_local_name(iri).is_some_and(|local| EVENT_CLASSES.contains(&local))
}

/// Returns whether `value` looks like an absolute IRI rather than a plain label.
pub fn looks_like_iri(value: &str) -> bool {
    value.contains("://") || value.starts_with("urn:")
}

/// Returns the last path segment (or fragment) of an IRI-like `value`.
///
/// `http://edamontology.org/topic_0092` yields `topic_0092`. Plain labels yield [`None`].
pub fn trailing_segment(value: &str) -> Option<&str> {
    if !looks_like_iri(value) {
        return None;
    }
    value
        .trim_end_matches(['/', '#'])
        .rsplit(['/', '#', ':'])
        .next()
        .filter(|segment| !segment.is_empty())
}

use crate::entity::{Agent, NamedEntity, Organization, Place};
use time::OffsetDateTime;

/// A canonical training resource, such as a course, a tutorial or a workshop.
///
/// Records are created by the normalizer, possibly merged by the deduplicator, and never mutated
/// once they are owned by a store.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingResource {
    /// The canonical identifier that is used as deduplication key.
    pub id: String,
    /// The IRI of the RDF subject this record was built from, if it was not a blank node.
    pub subject: Option<String>,
    /// An explicit persistent identifier (e.g., a DOI).
    pub identifier: Option<String>,
    pub url: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub abstract_text: Option<String>,
    pub headline: Option<String>,
    /// Local names of the RDF classes of the resource (e.g., `Course`).
    pub resource_types: Vec<String>,
    pub provider: Option<Organization>,
    pub keywords: Vec<String>,
    /// Ontology terms (usually EDAM topic IRIs).
    pub topics: Vec<String>,
    pub authors: Vec<Agent>,
    pub instructors: Vec<Agent>,
    pub contributors: Vec<Agent>,
    pub prerequisites: Vec<String>,
    pub teaches: Vec<String>,
    pub learning_resource_types: Vec<String>,
    pub educational_levels: Vec<String>,
    pub language: Option<String>,
    pub interactivity_type: Option<String>,
    pub license: Option<String>,
    pub date_published: Option<OffsetDateTime>,
    pub date_modified: Option<OffsetDateTime>,
    pub course_instances: Vec<CourseInstance>,
    pub accessibility: Accessibility,
    pub audience_roles: Vec<String>,
    /// The label of the source the record was harvested from.
    pub source: String,
    pub loaded_at: OffsetDateTime,
}

impl TrainingResource {
    /// Creates a record that only carries the required fields.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        source: impl Into<String>,
        loaded_at: OffsetDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            subject: None,
            identifier: None,
            url: None,
            name: name.into(),
            description: None,
            abstract_text: None,
            headline: None,
            resource_types: Vec::new(),
            provider: None,
            keywords: Vec::new(),
            topics: Vec::new(),
            authors: Vec::new(),
            instructors: Vec::new(),
            contributors: Vec::new(),
            prerequisites: Vec::new(),
            teaches: Vec::new(),
            learning_resource_types: Vec::new(),
            educational_levels: Vec::new(),
            language: None,
            interactivity_type: None,
            license: None,
            date_published: None,
            date_modified: None,
            course_instances: Vec::new(),
            accessibility: Accessibility::default(),
            audience_roles: Vec::new(),
            source: source.into(),
            loaded_at,
        }
    }

    /// Returns true if the record carries an explicit persistent identifier.
    pub fn has_persistent_identifier(&self) -> bool {
        self.identifier.is_some()
    }

    /// The display name of the provider.
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_ref().and_then(NamedEntity::name)
    }

    /// All instances that have a start date.
    pub fn scheduled_instances(&self) -> impl Iterator<Item = &CourseInstance> {
        self.course_instances
            .iter()
            .filter(|instance| instance.start.is_some())
    }
}

/// One scheduled run of a training resource.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CourseInstance {
    pub start: Option<OffsetDateTime>,
    pub end: Option<OffsetDateTime>,
    pub location: Option<Place>,
    /// One of `online`, `onsite` or `mixed` when recognized, otherwise the lowercased raw value.
    pub mode: Option<String>,
    pub capacity: Option<u32>,
    pub funders: Vec<Agent>,
    pub organizers: Vec<Agent>,
}

impl CourseInstance {
    pub fn country(&self) -> Option<&str> {
        self.location.as_ref()?.country.as_deref()
    }

    pub fn locality(&self) -> Option<&str> {
        self.location.as_ref()?.locality.as_deref()
    }

    /// Returns true if the instance carries no information at all.
    pub fn is_empty(&self) -> bool {
        self.start.is_none()
            && self.end.is_none()
            && self.location.as_ref().map_or(true, Place::is_empty)
            && self.mode.is_none()
            && self.capacity.is_none()
            && self.funders.is_empty()
            && self.organizers.is_empty()
    }
}

/// Accessibility attributes of a resource.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Accessibility {
    pub access_modes: Vec<String>,
    pub features: Vec<String>,
    pub free: Option<bool>,
}

impl Accessibility {
    pub fn is_empty(&self) -> bool {
        self.access_modes.is_empty() && self.features.is_empty() && self.free.is_none()
    }
}

use elixir_training_model::{
    format_datetime, Agent, CourseInstance, NamedEntity, TrainingResource,
};
use serde::Serialize;

/// A flat, serializable view of a [`TrainingResource`].
///
/// Summaries are what crosses the boundary to transports, no references into the store escape.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResourceSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub provider: Option<String>,
    pub resource_types: Vec<String>,
    pub keywords: Vec<String>,
    pub topics: Vec<String>,
    pub authors: Vec<String>,
    pub audience_roles: Vec<String>,
    pub free: Option<bool>,
    /// The label of the source whose record was retained.
    pub source: String,
    pub course_instances: Vec<CourseInstanceSummary>,
}

impl From<&TrainingResource> for ResourceSummary {
    fn from(resource: &TrainingResource) -> Self {
        Self {
            id: resource.id.clone(),
            name: resource.name.clone(),
            description: resource.description.clone(),
            url: resource.url.clone(),
            provider: resource.provider_name().map(str::to_owned),
            resource_types: resource.resource_types.clone(),
            keywords: resource.keywords.clone(),
            topics: resource.topics.clone(),
            authors: names(&resource.authors),
            audience_roles: resource.audience_roles.clone(),
            free: resource.accessibility.free,
            source: resource.source.clone(),
            course_instances: resource
                .course_instances
                .iter()
                .map(CourseInstanceSummary::from)
                .collect(),
        }
    }
}

/// A flat view of one scheduled run of a resource.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CourseInstanceSummary {
    /// RFC 3339 in UTC.
    pub start: Option<String>,
    pub end: Option<String>,
    pub venue: Option<String>,
    pub locality: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub mode: Option<String>,
    pub capacity: Option<u32>,
    pub organizers: Vec<String>,
    pub funders: Vec<String>,
}

impl From<&CourseInstance> for CourseInstanceSummary {
    fn from(instance: &CourseInstance) -> Self {
        let location = instance.location.as_ref();
        let coordinates = location.and_then(|place| place.coordinates);
        Self {
            start: instance.start.map(format_datetime),
            end: instance.end.map(format_datetime),
            venue: location.and_then(|place| place.name.clone()),
            locality: instance.locality().map(str::to_owned),
            country: instance.country().map(str::to_owned),
            latitude: coordinates.map(|c| c.latitude),
            longitude: coordinates.map(|c| c.longitude),
            mode: instance.mode.clone(),
            capacity: instance.capacity,
            organizers: names(&instance.organizers),
            funders: names(&instance.funders),
        }
    }
}

fn names(agents: &[Agent]) -> Vec<String> {
    agents
        .iter()
        .filter_map(|agent| agent.name())
        .map(str::to_owned)
        .collect()
}

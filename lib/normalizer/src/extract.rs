use crate::canonical::{canonical_id, persistent_identifier};
use crate::properties::Properties;
use elixir_training_model::vocab::{self, is_resource_class, trailing_segment};
use elixir_training_model::{
    normalize_key, parse_boolean, parse_count, parse_datetime, parse_decimal, split_list,
    Accessibility, Agent, Coordinates, CourseInstance, LiteralError, NormalizationReport,
    NormalizationWarning, OffsetDateTime, Organization, Person, Place, Subject, Term,
    TrainingResource, WarningKind,
};
use elixir_training_storage::{SourceGraph, UnionGraph};
use tracing::{debug, info, warn};

const ORGANIZATION_CLASSES: [&str; 6] = [
    "Organization",
    "ResearchOrganization",
    "EducationalOrganization",
    "CollegeOrUniversity",
    "Corporation",
    "NGO",
];

/// Produces candidate [`TrainingResource`] records from the sources of a [`UnionGraph`].
///
/// Every subject typed with one of the [resource classes](vocab::RESOURCE_CLASSES) yields at most
/// one candidate. Nested entities are inlined. A subject without a name is dropped, an unusable
/// literal only drops the affected field. Both cases are recorded in the
/// [`NormalizationReport`].
#[derive(Clone, Copy, Debug)]
pub struct Normalizer {
    loaded_at: OffsetDateTime,
}

impl Normalizer {
    /// Creates a normalizer that stamps every record with `loaded_at`.
    pub fn new(loaded_at: OffsetDateTime) -> Self {
        Self { loaded_at }
    }

    /// Normalizes all sources in load order.
    pub fn normalize(&self, graph: &UnionGraph) -> (Vec<TrainingResource>, NormalizationReport) {
        let mut report = NormalizationReport::new();
        let mut candidates = Vec::new();
        for source in graph.sources() {
            candidates.extend(self.normalize_source(source, &mut report));
        }
        (candidates, report)
    }

    /// Normalizes a single source.
    pub fn normalize_source(
        &self,
        graph: &SourceGraph,
        report: &mut NormalizationReport,
    ) -> Vec<TrainingResource> {
        let mut extraction = Extraction {
            graph,
            loaded_at: self.loaded_at,
            report: &mut *report,
            subject_label: String::new(),
        };
        let candidates = graph
            .subjects_with_type(is_resource_class)
            .into_iter()
            .filter_map(|subject| extraction.resource(subject))
            .collect::<Vec<_>>();

        report.add_candidates(graph.label(), candidates.len());
        info!(
            source = graph.label(),
            candidates = candidates.len(),
            "Normalized source"
        );
        candidates
    }
}

/// The state of normalizing one source.
struct Extraction<'graph, 'report> {
    graph: &'graph SourceGraph,
    loaded_at: OffsetDateTime,
    report: &'report mut NormalizationReport,
    /// The subject of the resource that is currently extracted, used in warnings.
    subject_label: String,
}

impl<'graph> Extraction<'graph, '_> {
    fn resource(&mut self, subject: &Subject) -> Option<TrainingResource> {
        self.subject_label = subject.to_string();
        let properties = Properties::of(self.graph, subject);

        let Some(name) = properties.text("name") else {
            let warning = self.warning(WarningKind::MissingName);
            warn!("{warning}");
            self.report.drop_record(warning);
            return None;
        };

        let identifier = persistent_identifier(&properties);
        let url = properties.text_or_iri("url");
        let id = canonical_id(self.graph, subject, identifier.as_deref(), url.as_deref());

        let mut resource = TrainingResource::new(id, name, self.graph.label(), self.loaded_at);
        resource.subject = match subject {
            Subject::NamedNode(node) => Some(node.as_str().to_owned()),
            _ => None,
        };
        resource.identifier = identifier;
        resource.url = url;
        resource.description = properties.text("description");
        resource.abstract_text = properties.text("abstract");
        resource.headline = properties.text("headline");
        resource.resource_types = unique(properties.types().iter().map(|t| (*t).to_owned()));
        resource.provider = properties
            .values("provider")
            .find_map(|term| self.agent(&properties, term, AgentKind::Organization))
            .map(into_organization);
        resource.keywords = self.keywords(&properties);
        resource.topics = self.topics(&properties);
        resource.authors = self.agents(&properties, "author", AgentKind::Person);
        resource.instructors = self.agents(&properties, "instructor", AgentKind::Person);
        resource.contributors = self.agents(&properties, "contributor", AgentKind::Person);
        resource.prerequisites = unique(
            ["competencyRequired", "coursePrerequisites"]
                .into_iter()
                .flat_map(|property| self.term_names(&properties, property)),
        );
        resource.teaches = unique(self.term_names(&properties, "teaches"));
        resource.learning_resource_types =
            unique(self.term_names(&properties, "learningResourceType"));
        resource.educational_levels = unique(self.term_names(&properties, "educationalLevel"));
        resource.language = properties
            .values("inLanguage")
            .find_map(|term| self.name_of(&properties, term));
        resource.interactivity_type = properties.text("interactivityType");
        resource.license = properties.text_or_iri("license");
        resource.date_published = self.datetime(&properties, "datePublished");
        resource.date_modified = self.datetime(&properties, "dateModified");
        resource.accessibility = Accessibility {
            access_modes: unique(properties.all_text("accessMode")),
            features: unique(properties.all_text("accessibilityFeature")),
            free: self.boolean(&properties, "isAccessibleForFree"),
        };
        resource.audience_roles = self.audience_roles(&properties);
        resource.course_instances = properties
            .values("hasCourseInstance")
            .filter_map(|term| properties.nested(term))
            .map(|instance| self.course_instance(&instance))
            .filter(|instance| !instance.is_empty())
            .collect();

        // Events carry their schedule directly on the resource.
        let is_event = properties
            .types()
            .iter()
            .any(|class| vocab::EVENT_CLASSES.contains(class));
        if resource.course_instances.is_empty()
            && (is_event || properties.has("startDate") || properties.has("location"))
        {
            let instance = self.course_instance(&properties);
            if !instance.is_empty() {
                resource.course_instances.push(instance);
            }
        }

        Some(resource)
    }

    fn course_instance(&mut self, properties: &Properties<'graph>) -> CourseInstance {
        CourseInstance {
            start: self.datetime(properties, "startDate"),
            end: self.datetime(properties, "endDate"),
            location: properties
                .values("location")
                .find_map(|term| self.place(properties, term)),
            mode: properties
                .text("courseMode")
                .or_else(|| properties.text_or_iri("eventAttendanceMode"))
                .map(|mode| normalize_mode(&mode)),
            capacity: self.count(properties, "maximumAttendeeCapacity"),
            funders: self.agents(properties, "funder", AgentKind::Organization),
            organizers: self.agents(properties, "organizer", AgentKind::Organization),
        }
    }

    fn keywords(&self, properties: &Properties<'graph>) -> Vec<String> {
        let mut keywords = Vec::new();
        for term in properties.values("keywords") {
            match term {
                Term::Literal(literal) => {
                    keywords.extend(split_list(literal.value()).map(str::to_owned));
                }
                // Ontology terms listed as keywords are topics.
                Term::NamedNode(node) if node.as_str().starts_with(vocab::EDAM) => {}
                _ => keywords.extend(self.name_of(properties, term)),
            }
        }
        unique_ignore_case(keywords)
    }

    fn topics(&self, properties: &Properties<'graph>) -> Vec<String> {
        let mut topics = Vec::new();
        for term in properties.values("about") {
            topics.extend(self.topic(properties, term));
        }
        for term in properties.values("keywords") {
            if let Term::NamedNode(node) = term {
                if node.as_str().starts_with(vocab::EDAM) {
                    topics.push(node.as_str().to_owned());
                }
            }
        }
        unique(topics)
    }

    /// A topic is referenced by IRI, or described by a `DefinedTerm` with a URL or code.
    fn topic(&self, properties: &Properties<'graph>, term: &Term) -> Option<String> {
        match term {
            Term::Literal(literal) => non_blank(literal.value()),
            Term::NamedNode(node) => Some(node.as_str().to_owned()),
            _ => {
                let nested = properties.nested(term)?;
                nested
                    .text_or_iri("url")
                    .or_else(|| nested.text("termCode"))
                    .or_else(|| nested.text("name"))
            }
        }
    }

    fn audience_roles(&self, properties: &Properties<'graph>) -> Vec<String> {
        let mut roles = Vec::new();
        for term in properties.values("audience") {
            match properties.nested(term) {
                Some(audience) => roles.extend(
                    audience
                        .text("audienceType")
                        .or_else(|| audience.text("educationalRole"))
                        .or_else(|| audience.text("name")),
                ),
                None => roles.extend(elixir_training_model::term_to_string(term.as_ref())),
            }
        }
        unique(roles)
    }

    /// Names of `DefinedTerm`-like values, which may also be plain literals.
    fn term_names(&self, properties: &Properties<'graph>, property: &str) -> Vec<String> {
        properties
            .values(property)
            .filter_map(|term| self.name_of(properties, term))
            .collect()
    }

    /// The literal value of `term`, the name of the node it refers to, or its IRI.
    fn name_of(&self, properties: &Properties<'graph>, term: &Term) -> Option<String> {
        match term {
            Term::Literal(literal) => non_blank(literal.value()),
            _ => match properties.nested(term) {
                Some(nested) => nested
                    .text("name")
                    .or_else(|| nested.text("alternateName"))
                    .or_else(|| match term {
                        Term::NamedNode(node) => Some(node.as_str().to_owned()),
                        _ => None,
                    }),
                None => match term {
                    Term::NamedNode(node) => Some(node.as_str().to_owned()),
                    _ => None,
                },
            },
        }
    }

    fn agents(
        &self,
        properties: &Properties<'graph>,
        property: &str,
        default: AgentKind,
    ) -> Vec<Agent> {
        let mut agents = Vec::new();
        for agent in properties
            .values(property)
            .filter_map(|term| self.agent(properties, term, default))
        {
            if !agents.contains(&agent) {
                agents.push(agent);
            }
        }
        agents
    }

    fn agent(
        &self,
        properties: &Properties<'graph>,
        term: &Term,
        default: AgentKind,
    ) -> Option<Agent> {
        let iri = match term {
            Term::NamedNode(node) => Some(node.as_str().to_owned()),
            _ => None,
        };
        let (kind, name, identifier, url) = match term {
            Term::Literal(literal) => (default, non_blank(literal.value())?, None, None),
            _ => match properties.nested(term) {
                Some(nested) => {
                    let kind = if nested.has_type("Person") {
                        AgentKind::Person
                    } else if ORGANIZATION_CLASSES.iter().any(|class| nested.has_type(class)) {
                        AgentKind::Organization
                    } else {
                        default
                    };
                    let name = nested
                        .text("name")
                        .or_else(|| nested.text("legalName"))
                        .or_else(|| full_name(&nested))
                        .or_else(|| iri.clone())?;
                    let identifier = persistent_identifier(&nested)
                        .or_else(|| iri.clone().filter(|iri| is_persistent_agent_id(iri)));
                    let url = nested.text_or_iri("url").or_else(|| iri.clone());
                    (kind, name, identifier, url)
                }
                None => {
                    let iri = iri?;
                    let identifier = is_persistent_agent_id(&iri).then(|| iri.clone());
                    (default, iri.clone(), identifier, Some(iri))
                }
            },
        };
        Some(match kind {
            AgentKind::Person => Agent::Person(Person {
                name,
                identifier,
                url,
            }),
            AgentKind::Organization => Agent::Organization(Organization {
                name,
                identifier,
                url,
            }),
        })
    }

    fn place(&mut self, properties: &Properties<'graph>, term: &Term) -> Option<Place> {
        let place = match term {
            Term::Literal(literal) => Place {
                name: non_blank(literal.value()),
                ..Place::default()
            },
            _ => {
                let nested = properties.nested(term)?;
                let mut place = Place {
                    name: nested.text("name"),
                    identifier: persistent_identifier(&nested),
                    ..Place::default()
                };
                self.fill_address(&nested, &mut place);
                for address in nested.values("address") {
                    match nested.nested(address) {
                        Some(address) => self.fill_address(&address, &mut place),
                        None if place.name.is_none() => place.name = self.name_of(&nested, address),
                        None => {}
                    }
                }
                place.coordinates = self.coordinates(&nested).or_else(|| {
                    let geo = nested.values("geo").find_map(|geo| nested.nested(geo))?;
                    self.coordinates(&geo)
                });
                place
            }
        };
        (!place.is_empty()).then_some(place)
    }

    fn fill_address(&self, address: &Properties<'graph>, place: &mut Place) {
        if place.country.is_none() {
            place.country = address
                .values("addressCountry")
                .find_map(|term| self.name_of(address, term));
        }
        if place.locality.is_none() {
            place.locality = address.text("addressLocality");
        }
    }

    fn coordinates(&mut self, properties: &Properties<'graph>) -> Option<Coordinates> {
        let latitude = self.decimal(properties, "latitude")?;
        let longitude = self.decimal(properties, "longitude")?;
        Some(Coordinates {
            latitude,
            longitude,
        })
    }

    fn datetime(
        &mut self,
        properties: &Properties<'graph>,
        property: &'static str,
    ) -> Option<OffsetDateTime> {
        let value = properties.lexical(property)?;
        self.soft(property, parse_datetime(&value))
    }

    fn count(&mut self, properties: &Properties<'graph>, property: &'static str) -> Option<u32> {
        let value = properties.lexical(property)?;
        self.soft(property, parse_count(&value))
    }

    fn decimal(&mut self, properties: &Properties<'graph>, property: &'static str) -> Option<f64> {
        let value = properties.lexical(property)?;
        self.soft(property, parse_decimal(&value))
    }

    fn boolean(&mut self, properties: &Properties<'graph>, property: &'static str) -> Option<bool> {
        let value = properties.lexical(property)?;
        self.soft(property, parse_boolean(&value))
    }

    /// Turns a failed conversion into an absent field and a warning.
    fn soft<T>(&mut self, property: &'static str, value: Result<T, LiteralError>) -> Option<T> {
        match value {
            Ok(value) => Some(value),
            Err(error) => {
                let warning = self.warning(WarningKind::InvalidLiteral { property, error });
                debug!("{warning}");
                self.report.warn(warning);
                None
            }
        }
    }

    fn warning(&self, kind: WarningKind) -> NormalizationWarning {
        NormalizationWarning {
            source_label: self.graph.label().to_owned(),
            subject: self.subject_label.clone(),
            kind,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AgentKind {
    Person,
    Organization,
}

fn into_organization(agent: Agent) -> Organization {
    match agent {
        Agent::Organization(organization) => organization,
        Agent::Person(person) => Organization {
            name: person.name,
            identifier: person.identifier,
            url: person.url,
        },
    }
}

fn full_name(properties: &Properties<'_>) -> Option<String> {
    let parts = [properties.text("givenName"), properties.text("familyName")]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    (!parts.is_empty()).then(|| parts.join(" "))
}

fn is_persistent_agent_id(iri: &str) -> bool {
    iri.contains("orcid.org/") || iri.contains("ror.org/")
}

/// Maps the many spellings of attendance modes to `online`, `onsite` or `mixed`.
fn normalize_mode(mode: &str) -> String {
    let mode = trailing_segment(mode).unwrap_or(mode);
    let key = normalize_key(mode);
    if key.contains("mixed") || key.contains("blended") || key.contains("hybrid") {
        "mixed".to_owned()
    } else if key.contains("offline")
        || key.contains("onsite")
        || key.contains("on-site")
        || key.contains("in person")
        || key.contains("in-person")
        || key.contains("face")
    {
        "onsite".to_owned()
    } else if key.contains("online") || key.contains("virtual") {
        "online".to_owned()
    } else {
        key
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

fn unique(values: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut unique = Vec::new();
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}

fn unique_ignore_case(values: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for value in values {
        if !unique.iter().any(|known| known.eq_ignore_ascii_case(&value)) {
            unique.push(value);
        }
    }
    unique
}

/// Capabilities shared by all nested entities.
///
/// Persons, organizations and places all carry a display name and an optional persistent
/// identifier (ORCID for persons, ROR for organizations).
pub trait NamedEntity {
    /// The display name of the entity.
    fn name(&self) -> Option<&str>;

    /// The persistent identifier of the entity, if any.
    fn identifier(&self) -> Option<&str>;
}

/// A natural person, for example an author or instructor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Person {
    pub name: String,
    pub identifier: Option<String>,
    pub url: Option<String>,
}

impl Person {
    /// Returns the ORCID of this person if the identifier is one.
    pub fn orcid(&self) -> Option<&str> {
        self.identifier
            .as_deref()
            .filter(|identifier| identifier.contains("orcid.org/"))
    }
}

impl NamedEntity for Person {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }
}

/// An organization, for example a provider, funder or organizer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Organization {
    pub name: String,
    pub identifier: Option<String>,
    pub url: Option<String>,
}

impl Organization {
    /// Returns the ROR id of this organization if the identifier is one.
    pub fn ror(&self) -> Option<&str> {
        self.identifier
            .as_deref()
            .filter(|identifier| identifier.contains("ror.org/"))
    }
}

impl NamedEntity for Organization {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }
}

/// Either a [`Person`] or an [`Organization`].
///
/// Properties such as `author` or `funder` admit both kinds of agents.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Agent {
    Person(Person),
    Organization(Organization),
}

impl Agent {
    /// Returns the person if this agent is one.
    pub fn as_person(&self) -> Option<&Person> {
        match self {
            Agent::Person(person) => Some(person),
            Agent::Organization(_) => None,
        }
    }

    /// Returns the organization if this agent is one.
    pub fn as_organization(&self) -> Option<&Organization> {
        match self {
            Agent::Organization(organization) => Some(organization),
            Agent::Person(_) => None,
        }
    }

    /// The URL of the agent's profile page.
    pub fn url(&self) -> Option<&str> {
        match self {
            Agent::Person(person) => person.url.as_deref(),
            Agent::Organization(organization) => organization.url.as_deref(),
        }
    }

    /// A lowercase label of the variant, used in summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Agent::Person(_) => "person",
            Agent::Organization(_) => "organization",
        }
    }
}

impl NamedEntity for Agent {
    fn name(&self) -> Option<&str> {
        match self {
            Agent::Person(person) => person.name(),
            Agent::Organization(organization) => organization.name(),
        }
    }

    fn identifier(&self) -> Option<&str> {
        match self {
            Agent::Person(person) => person.identifier(),
            Agent::Organization(organization) => organization.identifier(),
        }
    }
}

/// WGS84 coordinates of a [`Place`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The location of a course instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Place {
    pub name: Option<String>,
    pub identifier: Option<String>,
    pub country: Option<String>,
    pub locality: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl Place {
    /// Returns true if the place carries no information at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.identifier.is_none()
            && self.country.is_none()
            && self.locality.is_none()
            && self.coordinates.is_none()
    }
}

impl NamedEntity for Place {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }
}

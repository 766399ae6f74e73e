use elixir_training_model::vocab;

/// Vocabulary prefixes bound for ad-hoc queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prefixes {
    bindings: Vec<(String, String)>,
}

impl Default for Prefixes {
    fn default() -> Self {
        Self::common()
    }
}

impl Prefixes {
    /// The prefixes of the vocabularies used by training metadata.
    pub fn common() -> Self {
        let bindings = [
            ("schema", vocab::SCHEMA),
            ("bioschemas", vocab::BIOSCHEMAS),
            ("edam", vocab::EDAM),
            ("dct", vocab::DCTERMS),
            ("rdf", vocab::RDF),
            ("rdfs", vocab::RDFS),
            ("xsd", vocab::XSD),
        ]
        .into_iter()
        .map(|(prefix, namespace)| (prefix.to_owned(), namespace.to_owned()))
        .collect();
        Self { bindings }
    }

    /// Adds or replaces a binding.
    #[must_use]
    pub fn with(mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let namespace = namespace.into();
        match self.bindings.iter_mut().find(|(p, _)| *p == prefix) {
            Some(binding) => binding.1 = namespace,
            None => self.bindings.push((prefix, namespace)),
        }
        self
    }

    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, namespace)| namespace.as_str())
    }

    /// Expands a compact IRI such as `schema:name`.
    pub fn expand(&self, curie: &str) -> Option<String> {
        let (prefix, local) = curie.split_once(':')?;
        self.namespace(prefix)
            .map(|namespace| format!("{namespace}{local}"))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings
            .iter()
            .map(|(prefix, namespace)| (prefix.as_str(), namespace.as_str()))
    }

    /// Prepends a `PREFIX` declaration for every binding the query does not declare itself.
    pub fn apply_to_query(&self, query: &str) -> String {
        let words = query.split_whitespace().collect::<Vec<_>>();
        let declares = |prefix: &str| {
            words.windows(2).any(|pair| {
                pair[0].eq_ignore_ascii_case("PREFIX")
                    && pair[1]
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with(':'))
            })
        };

        let mut prologue = String::new();
        for (prefix, namespace) in self.iter() {
            if !declares(prefix) {
                prologue.push_str(&format!("PREFIX {prefix}: <{namespace}>\n"));
            }
        }
        prologue.push_str(query);
        prologue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_curies() {
        let prefixes = Prefixes::common();
        assert_eq!(
            prefixes.expand("edam:topic_0092").as_deref(),
            Some("http://edamontology.org/topic_0092")
        );
        assert_eq!(prefixes.expand("unknown:x"), None);
    }

    #[test]
    fn declared_prefixes_are_not_repeated() {
        let prefixes = Prefixes::common();
        let query = prefixes
            .apply_to_query("PREFIX schema: <http://schema.org/> SELECT * WHERE { ?s schema:name ?n }");
        assert!(!query.contains("PREFIX schema: <https://schema.org/>"));
        assert!(query.contains("PREFIX edam: <http://edamontology.org/>"));
        assert!(query.ends_with("?s schema:name ?n }"));
    }

    #[test]
    fn bindings_can_be_replaced() {
        let prefixes = Prefixes::common().with("schema", "http://schema.org/");
        assert_eq!(prefixes.namespace("schema"), Some("http://schema.org/"));
        assert_eq!(prefixes.iter().count(), 7);
    }
}

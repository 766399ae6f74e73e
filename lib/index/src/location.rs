use crate::postings::Postings;
use elixir_training_model::{normalize_key, TrainingResource};
use rustc_hash::FxHashMap;

/// What a location search returns when no instance matches the requested locality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LocationFallback {
    /// Fall back to all resources held in the requested country.
    #[default]
    CountryLevel,
    /// Only return resources held in the requested locality.
    Strict,
}

/// Indexes resources by the country and locality of their course instances.
#[derive(Clone, Debug, Default)]
pub struct LocationIndex {
    by_country: Postings,
    /// Localities per normalized country.
    by_locality: FxHashMap<String, Postings>,
}

impl LocationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, position: usize, resource: &TrainingResource) {
        for instance in &resource.course_instances {
            let Some(country) = instance.country().map(normalize_key) else {
                continue;
            };
            if country.is_empty() {
                continue;
            }
            self.by_country.insert(&country, position);
            if let Some(locality) = instance
                .locality()
                .map(normalize_key)
                .filter(|locality| !locality.is_empty())
            {
                self.by_locality
                    .entry(country)
                    .or_default()
                    .insert(&locality, position);
            }
        }
    }

    /// The positions of resources held in `country`, and in `locality` if one is given.
    ///
    /// If no resource matches the locality, `fallback` decides whether the country-level matches
    /// are returned instead.
    pub fn get(&self, country: &str, locality: Option<&str>, fallback: LocationFallback) -> &[usize] {
        let country = normalize_key(country);
        let Some(locality) = locality else {
            return self.by_country.get(&country);
        };
        let matches = self
            .by_locality
            .get(&country)
            .map(|localities| localities.get(&normalize_key(locality)))
            .unwrap_or_default();
        match fallback {
            _ if !matches.is_empty() => matches,
            LocationFallback::CountryLevel => self.by_country.get(&country),
            LocationFallback::Strict => &[],
        }
    }

    /// Number of distinct countries.
    pub fn country_count(&self) -> usize {
        self.by_country.len()
    }

    /// Number of distinct localities across all countries.
    pub fn locality_count(&self) -> usize {
        self.by_locality.values().map(Postings::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elixir_training_model::{CourseInstance, Place};
    use time::macros::datetime;

    fn held_in(id: &str, country: &str, locality: &str) -> TrainingResource {
        let mut resource =
            TrainingResource::new(id, id, "tess", datetime!(2025-06-01 00:00 UTC));
        resource.course_instances.push(CourseInstance {
            location: Some(Place {
                country: Some(country.to_owned()),
                locality: Some(locality.to_owned()),
                ..Place::default()
            }),
            ..CourseInstance::default()
        });
        resource
    }

    fn index() -> LocationIndex {
        let mut index = LocationIndex::new();
        index.insert(0, &held_in("a", "Canada", "Toronto"));
        index.insert(1, &held_in("b", "canada", "Montreal"));
        index.insert(2, &held_in("c", "Finland", "Helsinki"));
        index
    }

    #[test]
    fn country_and_locality_lookup() {
        let index = index();
        assert_eq!(index.get("CANADA", None, LocationFallback::Strict), &[0, 1]);
        assert_eq!(
            index.get("Canada", Some("toronto"), LocationFallback::Strict),
            &[0]
        );
        assert_eq!(index.country_count(), 2);
        assert_eq!(index.locality_count(), 3);
    }

    #[test]
    fn locality_miss_falls_back_to_country() {
        let index = index();
        assert_eq!(
            index.get("Canada", Some("Vancouver"), LocationFallback::CountryLevel),
            &[0, 1]
        );
        assert!(index
            .get("Canada", Some("Vancouver"), LocationFallback::Strict)
            .is_empty());
        assert!(index
            .get("Germany", Some("Berlin"), LocationFallback::CountryLevel)
            .is_empty());
    }
}

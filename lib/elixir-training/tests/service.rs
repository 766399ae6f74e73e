#![cfg(test)]
#![allow(clippy::panic_in_result_fn)]

use elixir_training::{
    DataStore, LocationFallback, QueryError, QueryRows, QueryService, ResourceSummary,
    SourceSpec, SparqlError, StoreConfig,
};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

const PYTHON_FAIR: &str = "https://tess.example.org/courses/python-fair";
const WINTER: &str = "https://training.example.org/winter-metagenomics";
const SPRING: &str = "https://tess.example.org/courses/spring-genomics";
const METADATA: &str = "https://gtn.example.org/topics/fair/metadata-basics";

fn fixture(name: &str) -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "tests", "data", name]
        .iter()
        .collect()
}

fn config() -> StoreConfig {
    StoreConfig::new([
        SourceSpec::file("tess", fixture("tess_sample.ttl")),
        SourceSpec::file("gtn", fixture("gtn_sample.ttl")),
    ])
    .with_source_priority(["tess", "gtn"])
}

fn load_service(config: &StoreConfig) -> Result<QueryService, Box<dyn Error>> {
    Ok(QueryService::new(Arc::new(DataStore::load(config)?)))
}

fn ids(summaries: &[ResourceSummary]) -> Vec<&str> {
    summaries.iter().map(|summary| summary.id.as_str()).collect()
}

#[test]
fn keyword_search_is_case_insensitive() -> Result<(), Box<dyn Error>> {
    let service = load_service(&config())?;
    assert_eq!(ids(&service.search_by_keyword("python", 10)), [PYTHON_FAIR]);
    assert_eq!(
        service.search_by_keyword("FAIR", 10),
        service.search_by_keyword("fair", 10)
    );
    insta::assert_json_snapshot!(ids(&service.search_by_keyword("fair", 10)), @r#"
    [
      "https://tess.example.org/courses/python-fair",
      "https://gtn.example.org/topics/fair/metadata-basics"
    ]
    "#);
    assert!(service.search_by_keyword("proteomics", 10).is_empty());
    Ok(())
}

#[test]
fn keyword_search_ranks_by_matched_tokens() -> Result<(), Box<dyn Error>> {
    let service = load_service(&config())?;
    let results = service.search_by_keyword("metadata fair", 10);
    assert_eq!(ids(&results), [METADATA, PYTHON_FAIR]);
    assert_eq!(ids(&service.search_by_keyword("metadata fair", 1)), [METADATA]);
    Ok(())
}

#[test]
fn duplicates_are_merged_and_enriched() -> Result<(), Box<dyn Error>> {
    let service = load_service(&config())?;
    let winter = service.resource(WINTER).ok_or("winter school is missing")?;
    assert_eq!(winter.source, "tess");
    assert_eq!(winter.name, "Winter school in metagenomics");
    assert_eq!(winter.keywords, ["metagenomics", "Galaxy"]);
    assert_eq!(winter.topics, ["http://edamontology.org/topic_3174"]);

    let galaxy = service.search_by_keyword("galaxy", 10);
    assert_eq!(galaxy.len(), 2);
    assert_eq!(galaxy[0].id, WINTER);
    assert!(galaxy[1].id.starts_with("urn:elixir-training:resource:"));
    Ok(())
}

#[test]
fn provider_search_normalizes_names() -> Result<(), Box<dyn Error>> {
    let service = load_service(&config())?;
    assert_eq!(
        ids(&service.search_by_provider("  BIOINFORMATICS.CA", 10)),
        [PYTHON_FAIR, SPRING]
    );
    assert!(service.search_by_provider("Bioinformatics", 10).is_empty());
    Ok(())
}

#[test]
fn location_search_falls_back_to_country() -> Result<(), Box<dyn Error>> {
    let service = load_service(&config())?;
    assert_eq!(
        ids(&service.search_by_location("canada", Some("toronto"), 10)),
        [PYTHON_FAIR]
    );
    assert_eq!(
        ids(&service.search_by_location("Canada", Some("Calgary"), 10)),
        [PYTHON_FAIR, WINTER, SPRING]
    );
    assert!(service.search_by_location("Finland", None, 10).is_empty());

    let strict = load_service(&config().with_location_fallback(LocationFallback::Strict))?;
    assert!(strict
        .search_by_location("Canada", Some("Calgary"), 10)
        .is_empty());
    assert_eq!(
        ids(&strict.search_by_location("Canada", Some("Montreal"), 10)),
        [WINTER]
    );
    Ok(())
}

#[test]
fn date_range_bounds_are_inclusive() -> Result<(), Box<dyn Error>> {
    let service = load_service(&config())?;
    assert_eq!(
        ids(&service.date_search(Some("2025-01-15"), Some("2025-02-28"), 10)?),
        [PYTHON_FAIR]
    );
    // A date-only end bound covers the whole day.
    assert_eq!(
        ids(&service.date_search(Some("2025-01-10"), Some("2025-02-01"), 10)?),
        [WINTER, PYTHON_FAIR]
    );
    assert_eq!(
        ids(&service.date_search(Some("2025-03-01T00:00:00+02:00"), None, 10)?),
        [SPRING]
    );
    assert_eq!(service.date_search(None, None, 10)?.len(), 3);
    Ok(())
}

#[test]
fn end_bound_on_the_last_representable_day() -> Result<(), Box<dyn Error>> {
    let service = load_service(&config())?;
    assert_eq!(
        ids(&service.date_search(Some("2025-01-01"), Some("9999-12-31"), 10)?),
        [WINTER, PYTHON_FAIR, SPRING]
    );
    Ok(())
}

#[test]
fn malformed_dates_are_rejected() -> Result<(), Box<dyn Error>> {
    let service = load_service(&config())?;
    let error = service
        .date_search(Some("next week"), None, 10)
        .err()
        .ok_or("expected an error")?;
    assert!(matches!(error, QueryError::InvalidDate { ref value, .. } if value == "next week"));
    Ok(())
}

#[test]
fn topic_codes_and_iris_are_interchangeable() -> Result<(), Box<dyn Error>> {
    let service = load_service(&config())?;
    let by_code = service.search_by_topic("topic_3391", 10);
    assert_eq!(ids(&by_code), [PYTHON_FAIR]);
    assert_eq!(
        service.search_by_topic("http://edamontology.org/topic_3391", 10),
        by_code
    );
    assert_eq!(
        service.search_by_topic("https://edamontology.org/topic_3391", 10),
        by_code
    );
    assert_eq!(
        ids(&service.search_by_topic("topic_0092", 10)),
        ids(&service.search_by_topic("http://edamontology.org/topic_0092", 10))
    );
    assert_eq!(ids(&service.search_by_topic("topic_0092", 10)), [PYTHON_FAIR]);
    assert_eq!(ids(&service.search_by_topic("topic_0219", 10)), [METADATA]);
    Ok(())
}

#[test]
fn summaries_are_flat() -> Result<(), Box<dyn Error>> {
    let service = load_service(&config())?;
    let summary = service.resource(PYTHON_FAIR).ok_or("course is missing")?;
    insta::assert_json_snapshot!(summary, @r#"
    {
      "id": "https://tess.example.org/courses/python-fair",
      "name": "Python for FAIR data",
      "description": "Hands-on introduction to scripting reproducible data workflows.",
      "url": null,
      "provider": "Bioinformatics.ca",
      "resource_types": [
        "Course"
      ],
      "keywords": [
        "Python",
        "FAIR"
      ],
      "topics": [
        "http://edamontology.org/topic_3391",
        "http://edamontology.org/topic_0092"
      ],
      "authors": [],
      "audience_roles": [
        "Researchers"
      ],
      "free": null,
      "source": "tess",
      "course_instances": [
        {
          "start": "2025-02-01T09:00:00Z",
          "end": "2025-02-03T00:00:00Z",
          "venue": "MaRS Discovery District",
          "locality": "Toronto",
          "country": "Canada",
          "latitude": null,
          "longitude": null,
          "mode": "online",
          "capacity": 40,
          "organizers": [],
          "funders": [
            "ELIXIR"
          ]
        }
      ]
    }
    "#);
    Ok(())
}

#[test]
fn stats_report_data_quality() -> Result<(), Box<dyn Error>> {
    let service = load_service(&config())?;
    insta::assert_json_snapshot!(service.stats(), { ".loaded_at" => "[loaded_at]" }, @r#"
    {
      "loaded_at": "[loaded_at]",
      "total_resources": 5,
      "total_candidates": 6,
      "candidates_per_source": {
        "gtn": 3,
        "tess": 3
      },
      "resources_per_source": {
        "gtn": 2,
        "tess": 3
      },
      "type_distribution": {
        "Course": 2,
        "Event": 1,
        "LearningResource": 2
      },
      "access_modes": {
        "textual": 2,
        "visual": 1
      },
      "audience_roles": {
        "Data stewards": 1,
        "Researchers": 1
      },
      "topic_samples": [
        "http://edamontology.org/topic_3391",
        "http://edamontology.org/topic_0092",
        "http://edamontology.org/topic_3174",
        "http://edamontology.org/topic_0219"
      ],
      "course_instances": 3,
      "dropped_records": 1,
      "duplicates_merged": 1,
      "normalization_warnings": {
        "invalid_integer": 1,
        "missing_name": 1
      }
    }
    "#);
    Ok(())
}

#[test]
fn loading_twice_is_idempotent() -> Result<(), Box<dyn Error>> {
    let first = DataStore::load(&config())?;
    let second = DataStore::load(&config())?;

    assert_eq!(
        first.resources().ids().collect::<Vec<_>>(),
        second.resources().ids().collect::<Vec<_>>()
    );
    let (mut first_stats, mut second_stats) = (first.stats().clone(), second.stats().clone());
    first_stats.loaded_at.clear();
    second_stats.loaded_at.clear();
    assert_eq!(first_stats, second_stats);

    let (first, second) = (first.indexes(), second.indexes());
    assert_eq!(first.keyword().len(), second.keyword().len());
    assert_eq!(first.provider().len(), second.provider().len());
    assert_eq!(first.location().country_count(), second.location().country_count());
    assert_eq!(first.date(), second.date());
    assert_eq!(first.topic().len(), second.topic().len());
    Ok(())
}

#[test]
fn sparql_queries_see_all_sources() -> Result<(), Box<dyn Error>> {
    let service = load_service(&config())?;
    let rows = service.execute_query(
        "SELECT ?name WHERE { ?course a schema:Course ; schema:name ?name } ORDER BY ?name",
    )?;
    let QueryRows::Solutions { rows, .. } = rows else {
        return Err("expected solutions".into());
    };
    let names = rows
        .iter()
        .filter_map(|row| row.get("name").map(String::as_str))
        .collect::<Vec<_>>();
    assert_eq!(names, ["Python for FAIR data", "Spring genomics workshop"]);

    let ask = service.execute_query(
        "ASK { GRAPH <urn:elixir-training:source:gtn> { ?s <http://schema.org/name> \"Galaxy introduction slides\" } }",
    )?;
    assert_eq!(ask, QueryRows::Boolean { value: true });
    Ok(())
}

#[test]
fn malformed_sparql_is_an_error() -> Result<(), Box<dyn Error>> {
    let service = load_service(&config())?;
    let error = service
        .execute_query("SELECT WHERE {")
        .err()
        .ok_or("expected an error")?;
    assert!(matches!(
        error,
        QueryError::Sparql(SparqlError::Syntax { .. })
    ));
    Ok(())
}

use elixir_training_storage::{
    load_sources, LoaderError, QueryRows, SourceSpec, SparqlError,
};
use std::error::Error;

const TESS: &str = r#"
@prefix schema: <https://schema.org/> .

<https://tess.example.org/courses/a> a schema:Course ;
    schema:name "Course A" ;
    schema:provider [ a schema:Organization ; schema:name "Provider" ] .
"#;

const GTN: &str = r#"
@prefix schema: <http://schema.org/> .

<https://gtn.example.org/tutorials/b> a schema:LearningResource ;
    schema:name "Tutorial B" .
"#;

fn sources() -> Vec<SourceSpec> {
    vec![SourceSpec::inline("tess", TESS), SourceSpec::inline("gtn", GTN)]
}

#[test]
fn load_keeps_sources_apart() -> Result<(), Box<dyn Error>> {
    let graph = load_sources(&sources())?;

    assert_eq!(graph.sources().len(), 2);
    assert_eq!(graph.triple_count(), 7);
    assert_eq!(graph.source("tess").map(|source| source.len()), Some(5));
    assert_eq!(graph.source("gtn").map(|source| source.len()), Some(2));
    assert_eq!(
        graph.sources()[1].graph_name().as_str(),
        "urn:elixir-training:source:gtn"
    );
    Ok(())
}

#[test]
fn query_sees_union_of_sources() -> Result<(), Box<dyn Error>> {
    let graph = load_sources(&sources())?;

    let rows = graph.query("SELECT ?s WHERE { ?s a ?type } ORDER BY ?s")?;
    let QueryRows::Solutions { variables, rows } = rows else {
        panic!("expected solutions");
    };
    assert_eq!(variables, vec!["s".to_owned()]);
    assert_eq!(rows.len(), 3);

    let rows = graph.query(
        "ASK { GRAPH <urn:elixir-training:source:gtn> { ?s a <http://schema.org/LearningResource> } }",
    )?;
    assert_eq!(rows, QueryRows::Boolean { value: true });
    Ok(())
}

#[test]
fn query_binds_common_prefixes() -> Result<(), Box<dyn Error>> {
    let graph = load_sources(&sources())?;
    let rows = graph.query("SELECT ?name WHERE { ?s schema:name ?name }")?;
    let QueryRows::Solutions { rows, .. } = rows else {
        panic!("expected solutions");
    };
    assert_eq!(rows.len(), 2);
    assert!(rows
        .iter()
        .any(|row| row.get("name").map(String::as_str) == Some("Course A")));
    Ok(())
}

#[test]
fn malformed_query_is_an_error() -> Result<(), Box<dyn Error>> {
    let graph = load_sources(&sources())?;
    let error = graph.query("SELECT WHERE {").unwrap_err();
    assert!(matches!(error, SparqlError::Syntax { .. }));
    Ok(())
}

#[test]
fn blank_nodes_of_sources_do_not_collide() -> Result<(), Box<dyn Error>> {
    let graph = load_sources(&[
        SourceSpec::inline("a", "_:b <http://example.com/p> \"x\" ."),
        SourceSpec::inline("b", "_:b <http://example.com/p> \"y\" ."),
    ])?;
    let rows = graph.query("SELECT DISTINCT ?s WHERE { ?s ?p ?o }")?;
    assert_eq!(rows.len(), 2);
    Ok(())
}

#[test]
fn missing_file_is_unreadable() {
    let error = load_sources(&[SourceSpec::file(
        "missing",
        "/this/path/does/not/exist.ttl",
    )])
    .unwrap_err();
    assert!(matches!(error, LoaderError::Unreadable { .. }));
    assert_eq!(error.source_label(), Some("missing"));
}

#[test]
fn syntax_error_reports_position() {
    let content = "@prefix schema: <https://schema.org/> .\n\
                   <http://example.com/a> schema:name \"A\" .\n\
                   <http://example.com/b> foo:name \"B\" .\n";
    let error = load_sources(&[SourceSpec::inline("broken", content)]).unwrap_err();
    let LoaderError::Parse {
        label, position, ..
    } = &error
    else {
        panic!("expected a parse error, got {error}");
    };
    assert_eq!(label, "broken");
    assert_eq!(position.map(|position| position.line), Some(3));
}

#[test]
fn duplicate_labels_are_rejected() {
    let error = load_sources(&[
        SourceSpec::inline("tess", TESS),
        SourceSpec::inline("tess", GTN),
    ])
    .unwrap_err();
    assert!(matches!(error, LoaderError::DuplicateLabel(label) if label == "tess"));
}

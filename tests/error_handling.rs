//! Error propagation through the suggest pipeline

use std::cmp::Ordering;
use std::sync::Arc;

use serde_json::{Value, json};
use suggest::{
    Autocomplete, Comparator, ConfigLoadError, DataSource, FnSource, MatchConfig, MatchEntry,
    MatchError, PipelineError, SearchEngine, SearchMatch, SourceError, SuggestConfig,
};

/// Fails on the record at `bad_index`, matches everything before it.
struct PickyEngine {
    bad_index: usize,
}

impl SearchEngine for PickyEngine {
    type Match = usize;

    fn search(
        &self,
        _query: &str,
        value: &Value,
        _cfg: &MatchConfig,
    ) -> Result<Option<usize>, MatchError> {
        let id = value["id"].as_u64().unwrap_or_default() as usize;
        if id == self.bad_index {
            return Err(MatchError::Engine {
                index: id,
                message: "unparseable record".into(),
            });
        }
        Ok(Some(id))
    }
}

fn numbered(n: u64) -> Vec<Value> {
    (1..=n).map(|id| json!({ "id": id })).collect()
}

#[test]
fn engine_error_aborts_the_whole_run() {
    let pipeline = Autocomplete::with_engine(MatchConfig::default(), PickyEngine { bad_index: 3 });
    let err = pipeline.run(&"abc".into(), &numbered(5)).expect_err("engine fails");
    match err {
        PipelineError::Match(MatchError::Engine { index, message }) => {
            assert_eq!(index, 3);
            assert_eq!(message, "unparseable record");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn engine_error_is_not_reached_when_trigger_rejects() {
    let pipeline = Autocomplete::with_engine(
        MatchConfig::default().with_threshold(10),
        PickyEngine { bad_index: 1 },
    );
    assert!(pipeline.run(&"abc".into(), &numbered(2)).expect("run").is_none());
}

#[test]
fn duplicate_keys_are_rejected_before_scanning() {
    let pipeline = Autocomplete::new(MatchConfig::default().with_keys(["name", "name"]));
    let err = pipeline
        .run(&"ap".into(), &[json!({"name": "Apple"})])
        .expect_err("invalid config");
    assert!(matches!(err, PipelineError::Match(MatchError::InvalidConfig(_))));
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn yaml_with_invalid_matcher_section_is_rejected() {
    let yaml = "version: \"1.0\"\nmatcher:\n  keys: [\"id\", \"id\"]\n";
    let err = SuggestConfig::from_yaml(yaml).expect_err("duplicate key name");
    assert!(matches!(err, ConfigLoadError::Validation(_)));
}

#[tokio::test]
async fn failed_source_surfaces_through_start() {
    let pipeline = Arc::new(Autocomplete::new(MatchConfig::default()));
    let source = DataSource::deferred(async { Err(SourceError::Failed("upstream 503".into())) });
    let err = pipeline
        .start("ap".into(), source)
        .await
        .expect_err("source failure propagates");
    assert!(matches!(
        err,
        PipelineError::Source(SourceError::Failed(ref msg)) if msg == "upstream 503"
    ));
}

#[tokio::test]
async fn malformed_provider_payload_surfaces_through_start() {
    let provider = FnSource::new(|| async {
        let records = suggest::from_json(r#"{"name": "Apple"}"#)?;
        Ok::<_, SourceError>(records.to_vec())
    });
    let pipeline = Arc::new(Autocomplete::new(MatchConfig::default()));
    let err = pipeline
        .start("ap".into(), DataSource::from_source(provider))
        .await
        .expect_err("object payload is not a collection");
    assert!(matches!(err, PipelineError::Source(SourceError::InvalidShape(_))));
}

#[tokio::test]
async fn engine_error_surfaces_through_start() {
    let pipeline = Arc::new(Autocomplete::with_engine(
        MatchConfig::default(),
        PickyEngine { bad_index: 1 },
    ));
    let err = pipeline
        .start("abc".into(), DataSource::from(numbered(2)))
        .await
        .expect_err("engine fails");
    assert!(matches!(err, PipelineError::Match(MatchError::Engine { index: 1, .. })));
}

#[tokio::test]
async fn comparator_panic_is_resumed_on_the_awaiting_task() {
    let sort: Comparator<SearchMatch> =
        Arc::new(|_: &MatchEntry<SearchMatch>, _: &MatchEntry<SearchMatch>| -> Ordering {
            panic!("comparator failed")
        });
    let pipeline = Arc::new(Autocomplete::new(MatchConfig::default()).with_sort(sort));
    let records = vec![json!("apple"), json!("apricot")];

    let task = tokio::spawn(async move {
        pipeline
            .start("ap".into(), DataSource::from(records))
            .await
    });
    let err = task.await.expect_err("panic reaches the caller");
    assert!(err.is_panic());
}

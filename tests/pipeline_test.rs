//! Batch pipeline tests

mod common;

use rabota::assembler::VacancyAssembler;
use rabota::config::PipelineConfig;
use rabota::pipeline::{cast_to_object_list, load_payloads, BatchPipeline};
use serde_json::{json, Value};
use std::io::Write;

use common::{canonical_payload, counting_assembler, hh_payload, sj_payload};

fn mixed_batch() -> Vec<Value> {
    vec![
        hh_payload(),
        json!("a string is not a vacancy"),
        sj_payload(),
        json!(null),
        canonical_payload(),
        json!({}),
    ]
}

#[tokio::test]
async fn test_concurrent_run_matches_sequential_cast() {
    let assembler = VacancyAssembler::default();
    let sequential = cast_to_object_list(&assembler, &mixed_batch());

    let pipeline = BatchPipeline::new(
        assembler,
        PipelineConfig {
            workers: 4,
            channel_buffer_size: 1,
        },
    );
    let outcome = pipeline.run(mixed_batch()).await.unwrap();

    let titles: Vec<&str> = outcome.vacancies.iter().map(|v| v.title.as_str()).collect();
    let expected: Vec<&str> = sequential.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, expected);

    assert_eq!(outcome.stats.total, 6);
    assert_eq!(outcome.stats.assembled, 4);
    assert_eq!(outcome.stats.rejected, 2);
}

#[tokio::test]
async fn test_single_worker() {
    let pipeline = BatchPipeline::new(
        counting_assembler(),
        PipelineConfig {
            workers: 1,
            channel_buffer_size: 8,
        },
    );
    let outcome = pipeline
        .run(vec![json!({"title": "A"}), json!({"title": "B"})])
        .await
        .unwrap();

    let ids: Vec<&str> = outcome.vacancies.iter().map(|v| v.id()).collect();
    assert_eq!(ids, vec!["gen-0", "gen-1"]);
}

#[tokio::test]
async fn test_empty_batch() {
    let pipeline = BatchPipeline::new(VacancyAssembler::default(), PipelineConfig::default());
    let outcome = pipeline.run(Vec::new()).await.unwrap();

    assert!(outcome.vacancies.is_empty());
    assert_eq!(outcome.stats.total, 0);
    assert_eq!(outcome.stats.success_rate(), 1.0);
}

#[tokio::test]
async fn test_all_rejected_batch_completes() {
    let pipeline = BatchPipeline::new(VacancyAssembler::default(), PipelineConfig::default());
    let outcome = pipeline
        .run(vec![json!(1), json!("two"), json!([3])])
        .await
        .unwrap();

    assert!(outcome.vacancies.is_empty());
    assert_eq!(outcome.stats.rejected, 3);
    assert_eq!(outcome.stats.success_rate(), 0.0);
}

#[tokio::test]
async fn test_load_payloads_from_envelope() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let document = json!({"items": [hh_payload(), hh_payload()], "found": 2, "pages": 1});
    write!(file, "{document}").unwrap();

    let payloads = load_payloads(file.path()).await.unwrap();
    assert_eq!(payloads.len(), 2);
}

#[tokio::test]
async fn test_load_payloads_errors() {
    let missing = load_payloads(std::path::Path::new("/nonexistent/payloads.json")).await;
    assert!(missing.is_err());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    assert!(load_payloads(file.path()).await.is_err());
}

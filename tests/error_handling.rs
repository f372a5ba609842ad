//! Error-path coverage: every failure the spec distinguishes surfaces as
//! its own typed condition, and recoverable paths stay recoverable.

use std::sync::Arc;

use medmatch::{
    build_engine_default, CorpusIndex, CorpusIssue, EngineError, IndexConfig, IndexError, Profile,
    ProfileError, ProfileFilter, QuerySpec, StubEmbedder,
};

fn profile(id: &str, years: u32) -> Profile {
    Profile {
        id: id.into(),
        name: format!("Dr. {id}"),
        specialty: "Orthopedic Surgery".into(),
        sub_specialty: "Sports Medicine".into(),
        location: "Atlanta, GA".into(),
        institution: "Emory University Hospital".into(),
        years_experience: years,
        languages: vec!["English".into()],
        summary: "500+ ACL reconstructions".into(),
        expertise: "return-to-sport protocols".into(),
    }
}

#[tokio::test]
async fn empty_corpus_never_produces_an_index() {
    let provider = StubEmbedder::with_dimension(32);
    let err = CorpusIndex::build(
        Vec::new(),
        &provider,
        IndexConfig::default().with_dimension(32),
    )
    .await
    .expect_err("empty corpus is fatal");
    assert!(matches!(err, IndexError::CorpusEmpty));
}

#[tokio::test]
async fn invalid_corpus_reports_every_offender() {
    let mut bad_a = profile("DOC-1", 5);
    bad_a.summary = "  ".into();
    let bad_b = profile("DOC-1", 7); // duplicate id
    let mut bad_c = profile("DOC-3", 9);
    bad_c.languages.clear();

    let provider = StubEmbedder::with_dimension(32);
    let err = CorpusIndex::build(
        vec![bad_a, bad_b, bad_c],
        &provider,
        IndexConfig::default().with_dimension(32),
    )
    .await
    .expect_err("invalid corpus aborts the build");

    let IndexError::Profile(ProfileError::InvalidCorpus(issues)) = err else {
        panic!("expected a corpus validation error");
    };
    assert_eq!(issues.len(), 3);
    assert!(issues
        .iter()
        .any(|i| matches!(i, CorpusIssue::EmptyField { field: "summary", .. })));
    assert!(issues
        .iter()
        .any(|i| matches!(i, CorpusIssue::DuplicateId { .. })));
    assert!(issues
        .iter()
        .any(|i| matches!(i, CorpusIssue::NoLanguages { .. })));
}

#[tokio::test]
async fn whitespace_query_is_rejected_before_any_embedding_call() {
    let provider = Arc::new(StubEmbedder::with_dimension(32));
    let engine = build_engine_default(vec![profile("DOC-1", 5)], provider.clone())
        .await
        .unwrap();

    let calls_after_build = provider.call_count();
    let err = engine
        .search(&QuerySpec::new(" \n\t  "))
        .await
        .expect_err("blank query rejected");
    assert!(matches!(err, EngineError::InvalidQuery(_)));
    // The counting stub proves no embedding call was attempted.
    assert_eq!(provider.call_count(), calls_after_build);

    // recommend takes the same early exit.
    let err = engine
        .recommend(&QuerySpec::new("   "))
        .await
        .expect_err("blank query rejected");
    assert!(matches!(err, EngineError::InvalidQuery(_)));
    assert_eq!(provider.call_count(), calls_after_build);
}

#[tokio::test]
async fn provider_dimension_mismatch_is_fatal_at_build() {
    let provider = StubEmbedder::with_dimension(16);
    let err = CorpusIndex::build(
        vec![profile("DOC-1", 5)],
        &provider,
        IndexConfig::default().with_dimension(384),
    )
    .await
    .expect_err("mismatched provider rejected");
    assert!(matches!(
        err,
        IndexError::DimensionMismatch {
            expected: 384,
            got: 16
        }
    ));
}

#[tokio::test]
async fn query_vector_dimension_mismatch_is_fatal_at_search() {
    let provider = StubEmbedder::with_dimension(16);
    let index = CorpusIndex::build(
        vec![profile("DOC-1", 5)],
        &provider,
        IndexConfig::default().with_dimension(16),
    )
    .await
    .unwrap();

    let err = index
        .search(&vec![0.0; 384], 5, &ProfileFilter::default())
        .expect_err("wrong query dimension rejected");
    assert!(matches!(err, IndexError::DimensionMismatch { .. }));
}

#[tokio::test]
async fn no_matches_is_an_outcome_not_an_error() {
    let provider = Arc::new(StubEmbedder::with_dimension(32));
    let engine = build_engine_default(vec![profile("DOC-1", 5)], provider)
        .await
        .unwrap();

    let spec = QuerySpec::new("knee injury").with_min_experience(50);
    let matches = engine.search(&spec).await.expect("valid empty search");
    assert!(matches.is_empty());

    let outcome = engine.recommend(&spec).await.expect("valid outcome");
    assert!(outcome.is_no_matches());
}

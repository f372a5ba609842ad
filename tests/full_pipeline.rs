//! End-to-end retrieval scenarios over the whole pipeline: profiles in,
//! ranked recommendations out, with a scripted embedding provider pinning
//! the similarity relationships.

use std::sync::Arc;

use medmatch::{
    build_engine_default, FixedEmbedder, Profile, QuerySpec, RecommendOutcome, StubEmbedder,
};

fn profile(id: &str, specialty: &str, sub: &str, location: &str, years: u32) -> Profile {
    Profile {
        id: id.into(),
        name: format!("Dr. {id}"),
        specialty: specialty.into(),
        sub_specialty: sub.into(),
        location: location.into(),
        institution: "General Hospital".into(),
        years_experience: years,
        languages: vec!["English".into(), "Spanish".into()],
        summary: format!("{specialty} cases and procedures"),
        expertise: format!("{specialty} research focus"),
    }
}

/// The canonical three-doctor corpus: two in New York, one in Boston.
fn corpus() -> Vec<Profile> {
    vec![
        profile("DOC-NY-CARD", "Cardiology", "Interventional Cardiology", "New York, NY", 10),
        profile("DOC-NY-PULM", "Pulmonology", "Critical Care", "New York, NY", 5),
        profile("DOC-BOS-CARD", "Cardiology", "Electrophysiology", "Boston, MA", 20),
    ]
}

/// Scripted provider: the Boston cardiologist sits closest to the query,
/// then the New York cardiologist, then the pulmonologist. Routes match
/// against the normalized summary text, so keywords are lowercase.
fn scripted_provider() -> Arc<FixedEmbedder> {
    Arc::new(
        FixedEmbedder::new(4)
            .route("chest pain", vec![1.0, 0.0, 0.0, 0.0])
            .route("electrophysiology", vec![1.0, 0.0, 0.0, 0.0])
            .route("cardiology", vec![0.8, 0.6, 0.0, 0.0])
            .route("pulmonology", vec![0.2, 0.98, 0.0, 0.0]),
    )
}

#[tokio::test]
async fn location_filter_excludes_the_better_scoring_boston_match() {
    let engine = build_engine_default(corpus(), scripted_provider())
        .await
        .unwrap();

    let spec = QuerySpec::new("chest pain")
        .with_location("New York, NY")
        .with_limit(5);
    let matches = engine.search(&spec).await.unwrap();

    // Exactly the two New York doctors, never padded to 5.
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].entry.profile.id, "DOC-NY-CARD");
    assert_eq!(matches[1].entry.profile.id, "DOC-NY-PULM");
    assert!(matches[0].score > matches[1].score);

    // The Boston cardiologist scores higher unfiltered, proving the filter
    // (not similarity) excluded it above.
    let unfiltered = engine
        .search(&QuerySpec::new("chest pain").with_limit(5))
        .await
        .unwrap();
    assert_eq!(unfiltered[0].entry.profile.id, "DOC-BOS-CARD");
    assert!(unfiltered[0].score > matches[0].score);
}

#[tokio::test]
async fn unfiltered_query_returns_min_of_limit_and_corpus_size() {
    let engine = build_engine_default(corpus(), scripted_provider())
        .await
        .unwrap();

    let all = engine
        .search(&QuerySpec::new("chest pain").with_limit(50))
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let two = engine
        .search(&QuerySpec::new("chest pain").with_limit(2))
        .await
        .unwrap();
    assert_eq!(two.len(), 2);

    // Descending similarity throughout.
    for window in all.windows(2) {
        assert!(window[0].score >= window[1].score);
    }
}

#[tokio::test]
async fn ranks_are_exactly_one_through_m() {
    let engine = build_engine_default(corpus(), scripted_provider())
        .await
        .unwrap();
    let matches = engine
        .search(&QuerySpec::new("chest pain").with_limit(10))
        .await
        .unwrap();

    let ranks: Vec<u32> = matches.iter().map(|m| m.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[tokio::test]
async fn every_returned_match_satisfies_every_requested_filter() {
    let engine = build_engine_default(corpus(), scripted_provider())
        .await
        .unwrap();

    let spec = QuerySpec::new("chest pain")
        .with_location("New York, NY")
        .with_specialty("Cardiology")
        .with_language("Spanish")
        .with_min_experience(6)
        .with_limit(10);
    let matches = engine.search(&spec).await.unwrap();

    assert_eq!(matches.len(), 1);
    let profile = &matches[0].entry.profile;
    assert_eq!(profile.location, "New York, NY");
    assert_eq!(profile.specialty, "Cardiology");
    assert!(profile.languages.iter().any(|l| l == "Spanish"));
    assert!(profile.years_experience >= 6);
    assert_eq!(matches[0].satisfied.len(), 4);
}

#[tokio::test]
async fn specialty_filter_matches_sub_specialty_too() {
    let engine = build_engine_default(corpus(), scripted_provider())
        .await
        .unwrap();

    let spec = QuerySpec::new("chest pain").with_specialty("electrophysiology");
    let matches = engine.search(&spec).await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].entry.profile.id, "DOC-BOS-CARD");
}

#[tokio::test]
async fn recommend_produces_primary_and_alternates() {
    let engine = build_engine_default(corpus(), scripted_provider())
        .await
        .unwrap();

    let outcome = engine
        .recommend(&QuerySpec::new("chest pain").with_limit(5))
        .await
        .unwrap();
    let rec = outcome.into_recommendation().expect("matches exist");
    assert_eq!(rec.primary.entry.profile.id, "DOC-BOS-CARD");
    assert_eq!(rec.primary.rank, 1);
    assert_eq!(rec.alternates.len(), 2);
    // No explanation collaborator wired: the recommendation still stands.
    assert!(rec.explanation.is_none());
}

#[tokio::test]
async fn recommend_surfaces_no_matches_for_impossible_filters() {
    let engine = build_engine_default(corpus(), scripted_provider())
        .await
        .unwrap();

    let spec = QuerySpec::new("chest pain").with_location("Paris, France");
    let outcome = engine.recommend(&spec).await.unwrap();
    assert!(matches!(outcome, RecommendOutcome::NoMatches));

    // search likewise answers with an empty set, not an error.
    let matches = engine.search(&spec).await.unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn stub_provider_serves_the_full_pipeline_too() {
    // The hash-stub provider exercises the same path with arbitrary text.
    let engine = build_engine_default(corpus(), Arc::new(StubEmbedder::with_dimension(384)))
        .await
        .unwrap();
    let matches = engine
        .search(&QuerySpec::new("recurring ear infections in a child").with_limit(3))
        .await
        .unwrap();
    assert_eq!(matches.len(), 3);
    for m in &matches {
        assert!((0.0..=1.0).contains(&m.score));
    }
}

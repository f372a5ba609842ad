//! End-to-end demo: build a tiny corpus with the stub embedder and run a
//! filtered recommendation.
//!
//! ```bash
//! cargo run -p medmatch-engine --example recommend_demo
//! ```

use std::sync::Arc;

use embedding::StubEmbedder;
use engine::{MatchEngine, QuerySpec};
use index::{CorpusIndex, IndexConfig};
use profile::Profile;

fn profile(
    id: &str,
    name: &str,
    specialty: &str,
    sub_specialty: &str,
    location: &str,
    institution: &str,
    years: u32,
    summary: &str,
    expertise: &str,
) -> Profile {
    Profile {
        id: id.into(),
        name: name.into(),
        specialty: specialty.into(),
        sub_specialty: sub_specialty.into(),
        location: location.into(),
        institution: institution.into(),
        years_experience: years,
        languages: vec!["English".into()],
        summary: summary.into(),
        expertise: expertise.into(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let corpus = vec![
        profile(
            "DOC-00001",
            "Dr. Sarah Okafor",
            "Cardiology",
            "Interventional Cardiology",
            "New York, NY",
            "Mount Sinai Hospital",
            12,
            "performed 400+ percutaneous coronary interventions",
            "complex coronary interventions and chronic total occlusions",
        ),
        profile(
            "DOC-00002",
            "Dr. Miguel Torres",
            "Pulmonology",
            "Interstitial Lung Disease",
            "New York, NY",
            "NYU Langone Health",
            8,
            "managed 300+ interstitial lung disease patients",
            "pulmonary fibrosis and advanced bronchoscopy",
        ),
        profile(
            "DOC-00003",
            "Dr. Priya Raman",
            "Cardiology",
            "Electrophysiology",
            "Boston, MA",
            "Massachusetts General Hospital",
            21,
            "completed 250+ catheter ablations for atrial fibrillation",
            "arrhythmia management and implantable devices",
        ),
    ];

    let provider = Arc::new(StubEmbedder::with_dimension(384));
    let index = CorpusIndex::build(corpus, provider.as_ref(), IndexConfig::default()).await?;
    let engine = MatchEngine::new(index, provider);

    let spec = QuerySpec::new(
        "severe chest pain and shortness of breath when climbing stairs",
    )
    .with_location("New York, NY")
    .with_limit(5);

    let matches = engine.search(&spec).await?;
    println!("{} match(es) in New York:", matches.len());
    for m in &matches {
        println!(
            "  #{} {} ({} / {}) score={:.4}",
            m.rank,
            m.entry.profile.name,
            m.entry.profile.specialty,
            m.entry.profile.sub_specialty,
            m.display_score(),
        );
    }

    match engine.recommend(&spec).await? {
        engine::RecommendOutcome::Recommendation(rec) => {
            println!("\nRecommended: {}", rec.primary.entry.profile.name);
            println!("Alternates: {}", rec.alternates.len());
            match rec.explanation {
                Some(text) => println!("Explanation: {text}"),
                None => println!("Explanation: (no explanation provider wired)"),
            }
        }
        engine::RecommendOutcome::NoMatches => println!("\nNo doctor matched the query."),
    }

    Ok(())
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::collections::HashMap;
use std::sync::Arc;
use uniscrawl::domain::repositories::school_repository::SchoolRepository;
use uniscrawl::infrastructure::repositories::school_repo_impl::SchoolRepositoryImpl;

async fn setup_db() -> Arc<DatabaseConnection> {
    // A single connection keeps the in-memory database alive for the test
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    opt.max_connections(1);

    let db = Database::connect(opt).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(db)
}

fn batch(entries: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(name, aliases)| {
            (
                name.to_string(),
                aliases.iter().map(|a| a.to_string()).collect(),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_save_batch_then_search_round_trip() {
    let repo = SchoolRepositoryImpl::new(setup_db().await);

    repo.save_batch(&batch(&[("Foo University", &["Foo U"])]))
        .await
        .unwrap();

    let results = repo.search("Foo").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Foo University");
    assert_eq!(results[0].aliases, vec!["Foo U".to_string()]);
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let repo = SchoolRepositoryImpl::new(setup_db().await);

    repo.save_batch(&batch(&[("Foo University", &["Foo U"])]))
        .await
        .unwrap();

    let results = repo.search("foo uni").await.unwrap();
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_search_matches_alias_text() {
    let repo = SchoolRepositoryImpl::new(setup_db().await);

    repo.save_batch(&batch(&[
        ("Ohio State University", &["OSU"]),
        ("Bar College", &[]),
    ]))
    .await
    .unwrap();

    let results = repo.search("osu").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Ohio State University");
}

#[tokio::test]
async fn test_save_batch_upserts_on_name_conflict() {
    let repo = SchoolRepositoryImpl::new(setup_db().await);

    repo.save_batch(&batch(&[("Foo University", &["old"])]))
        .await
        .unwrap();
    repo.save_batch(&batch(&[("Foo University", &["new", "newer"])]))
        .await
        .unwrap();

    let results = repo.search("Foo University").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].aliases,
        vec!["new".to_string(), "newer".to_string()]
    );
}

#[tokio::test]
async fn test_search_returns_at_most_ten_results() {
    let repo = SchoolRepositoryImpl::new(setup_db().await);

    let entries: HashMap<String, Vec<String>> = (0..15)
        .map(|i| (format!("Foo University {}", i), Vec::new()))
        .collect();
    repo.save_batch(&entries).await.unwrap();

    let results = repo.search("Foo").await.unwrap();
    assert_eq!(results.len(), 10);
}

#[tokio::test]
async fn test_search_without_match_is_empty() {
    let repo = SchoolRepositoryImpl::new(setup_db().await);

    repo.save_batch(&batch(&[("Foo University", &[])]))
        .await
        .unwrap();

    assert!(repo.search("does-not-exist").await.unwrap().is_empty());
}

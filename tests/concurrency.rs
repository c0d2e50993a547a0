mod common;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::TimeDelta;
use short_url_service::AppError;
use short_url_service::domain::visit::Visit;
use tokio::sync::Barrier;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_same_custom_code_single_winner() {
    const N: usize = 64;

    let (state, _clock) = common::create_test_state();
    let barrier = Arc::new(Barrier::new(N));

    let handles: Vec<_> = (0..N)
        .map(|i| {
            let links = state.link_service.clone();
            let barrier = barrier.clone();
            tokio::spawn(async move {
                barrier.wait().await;
                links.create(&format!("https://example.com/{i}"), None, Some("contest"))
            })
        })
        .collect();

    let mut won = 0;
    let mut taken = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(created) => {
                assert_eq!(created.shortcode, "contest");
                won += 1;
            }
            Err(AppError::ShortcodeTaken) => taken += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(won, 1);
    assert_eq!(taken, N - 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_generated_codes_are_unique() {
    const N: usize = 500;

    let (state, _clock) = common::create_test_state();

    let handles: Vec<_> = (0..N)
        .map(|_| {
            let links = state.link_service.clone();
            tokio::spawn(async move { links.create("https://example.com", None, None) })
        })
        .collect();

    let mut codes = HashSet::new();
    for handle in handles {
        let created = handle.await.unwrap().unwrap();
        assert!(codes.insert(created.shortcode));
    }

    assert_eq!(codes.len(), N);
    assert_eq!(state.link_service.active_links(), N);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_clicks_none_lost() {
    const T: usize = 200;

    let (state, _clock) = common::create_test_state();
    state
        .link_service
        .create("https://example.com", None, Some("hot"))
        .unwrap();

    let barrier = Arc::new(Barrier::new(T));
    let handles: Vec<_> = (0..T)
        .map(|i| {
            let stats = state.stats_service.clone();
            let barrier = barrier.clone();
            tokio::spawn(async move {
                barrier.wait().await;
                let ua = format!("agent-{i}");
                let visit = Visit::new("10.0.0.1".parse().unwrap(), Some(ua.as_str()), None);
                stats.record_visit("hot", visit).await
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "https://example.com/");
    }

    let detail = state.stats_service.get_statistics("hot").unwrap();
    assert_eq!(detail.aggregate.total_clicks as usize, T);
    assert_eq!(detail.aggregate.events.len(), T);

    let agents: HashSet<_> = detail
        .aggregate
        .events
        .iter()
        .map(|e| e.raw_client_signature.clone())
        .collect();
    assert_eq!(agents.len(), T);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_cleanup_alongside_traffic() {
    let (state, clock) = common::create_test_state();
    for i in 0..100 {
        let validity = if i % 2 == 0 { 1 } else { 60 };
        state
            .link_service
            .create("https://example.com", Some(validity), Some(&format!("code{i}")))
            .unwrap();
    }

    clock.advance(TimeDelta::minutes(5));

    let readers: Vec<_> = (0..100)
        .map(|i| {
            let stats = state.stats_service.clone();
            tokio::spawn(async move { stats.get_statistics(&format!("code{i}")) })
        })
        .collect();

    let removed = state.link_service.cleanup_expired();
    assert_eq!(removed, 50);

    for (i, reader) in readers.into_iter().enumerate() {
        match reader.await.unwrap() {
            Ok(detail) => {
                assert_eq!(i % 2, 1);
                assert_eq!(detail.aggregate.total_clicks, 0);
            }
            Err(AppError::Expired | AppError::NotFound) => assert_eq!(i % 2, 0),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(state.link_service.active_links(), 50);
}

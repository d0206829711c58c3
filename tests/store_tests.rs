//! Persistence store: schema, history ordering, counter semantics.

mod common;

use cinebot::db::Store;
use cinebot::domain::{FilmId, UserId};
use common::{temp_db_url, temp_store};

#[tokio::test]
async fn init_schema_is_idempotent() {
    let url = temp_db_url();

    let store = Store::new(&url).await.expect("first open");
    store
        .append_history(UserId::new(1), "Matrix")
        .await
        .unwrap();
    store.init_schema().await.expect("second init");

    let reopened = Store::new(&url).await.expect("reopen");
    let history = reopened.recent_history(UserId::new(1), 5).await.unwrap();
    assert_eq!(history, vec!["Matrix".to_string()]);
}

#[tokio::test]
async fn first_write_on_fresh_database_can_be_a_stat_upsert() {
    let store = Store::new(&temp_db_url()).await.expect("open");

    let count = store
        .upsert_stat(UserId::new(1), FilmId::new(603), "M")
        .await
        .expect("first upsert on a fresh database");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn every_pooled_connection_sees_migrated_schema() {
    let store = Store::with_pool_options(&temp_db_url(), 4, 4)
        .await
        .expect("open");
    let user = UserId::new(1);

    let handles: Vec<_> = (1..=8)
        .map(|id| {
            let store = store.clone();
            tokio::spawn(async move { store.upsert_stat(user, FilmId::new(id), "M").await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), 1);
    }
}

#[tokio::test]
async fn recent_history_is_newest_first_and_limited() {
    let store = temp_store().await;
    let user = UserId::new(7);

    for i in 1..=7 {
        store
            .append_history(user, &format!("query {i}"))
            .await
            .unwrap();
    }

    let history = store.recent_history(user, 5).await.unwrap();
    assert_eq!(
        history,
        vec!["query 7", "query 6", "query 5", "query 4", "query 3"]
    );

    let entries = store.recent_history_entries(user, 10).await.unwrap();
    assert_eq!(entries.len(), 7);
    assert!(
        entries
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at)
    );
}

#[tokio::test]
async fn recent_history_is_empty_for_unknown_user() {
    let store = temp_store().await;
    store.append_history(UserId::new(1), "Dune").await.unwrap();

    assert!(store.recent_history(UserId::new(2), 5).await.unwrap().is_empty());
    assert!(store.top_stats(UserId::new(2), 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn upsert_stat_creates_then_increments() {
    let store = temp_store().await;
    let user = UserId::new(1);
    let film = FilmId::new(603);

    assert_eq!(store.upsert_stat(user, film, "Матрица").await.unwrap(), 1);
    assert_eq!(store.upsert_stat(user, film, "Матрица").await.unwrap(), 2);

    let stat = store.get_stat(user, film).await.unwrap().unwrap();
    assert_eq!(stat.count, 2);
    assert_eq!(stat.film_title, "Матрица");
}

#[tokio::test]
async fn upsert_stat_keeps_first_title() {
    let store = temp_store().await;
    let user = UserId::new(1);
    let film = FilmId::new(603);

    store.upsert_stat(user, film, "Old title").await.unwrap();
    store.upsert_stat(user, film, "New title").await.unwrap();

    let stat = store.get_stat(user, film).await.unwrap().unwrap();
    assert_eq!(stat.film_title, "Old title");
    assert_eq!(stat.count, 2);
}

#[tokio::test]
async fn stats_are_scoped_per_user() {
    let store = temp_store().await;
    let film = FilmId::new(603);

    store.upsert_stat(UserId::new(1), film, "Матрица").await.unwrap();
    store.upsert_stat(UserId::new(1), film, "Матрица").await.unwrap();
    store.upsert_stat(UserId::new(2), film, "Матрица").await.unwrap();

    let first = store.top_stats(UserId::new(1), 5).await.unwrap();
    let second = store.top_stats(UserId::new(2), 5).await.unwrap();
    assert_eq!(first[0].count, 2);
    assert_eq!(second[0].count, 1);
}

#[tokio::test]
async fn top_stats_ranks_by_count() {
    let store = temp_store().await;
    let user = UserId::new(1);

    let counts = [("A", 3), ("B", 7), ("C", 1), ("D", 5), ("E", 2), ("F", 9)];
    for (index, (title, count)) in counts.iter().enumerate() {
        let film = FilmId::new(i64::try_from(index).unwrap() + 1);
        for _ in 0..*count {
            store.upsert_stat(user, film, title).await.unwrap();
        }
    }

    let top: Vec<(String, i32)> = store
        .top_stats(user, 5)
        .await
        .unwrap()
        .into_iter()
        .map(|s| (s.film_title, s.count))
        .collect();

    assert_eq!(
        top,
        vec![
            ("F".to_string(), 9),
            ("B".to_string(), 7),
            ("D".to_string(), 5),
            ("A".to_string(), 3),
            ("E".to_string(), 2),
        ]
    );
}

#[tokio::test]
async fn top_stats_breaks_ties_by_insertion_order() {
    let store = temp_store().await;
    let user = UserId::new(1);

    store.upsert_stat(user, FilmId::new(10), "first").await.unwrap();
    store.upsert_stat(user, FilmId::new(5), "second").await.unwrap();
    store.upsert_stat(user, FilmId::new(7), "third").await.unwrap();

    let titles: Vec<String> = store
        .top_stats(user, 5)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.film_title)
        .collect();

    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_upserts_do_not_lose_increments() {
    let store = temp_store().await;
    let user = UserId::new(42);
    let film = FilmId::new(603);
    let calls = 40;

    let handles: Vec<_> = (0..calls)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.upsert_stat(user, film, "Матрица").await })
        })
        .collect();

    let mut returned = Vec::new();
    for handle in handles {
        returned.push(handle.await.unwrap().unwrap());
    }

    let stat = store.get_stat(user, film).await.unwrap().unwrap();
    assert_eq!(stat.count, calls);

    // Every caller observed a distinct post-increment value.
    returned.sort_unstable();
    assert_eq!(returned, (1..=calls).collect::<Vec<_>>());

    let top = store.top_stats(user, 5).await.unwrap();
    assert_eq!(top.len(), 1);
}

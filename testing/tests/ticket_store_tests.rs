//! Tests for the in-memory ticket store

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use itsm_core::environment::Clock;
use itsm_core::store::{StorageError, TicketStore};
use itsm_core::ticket::NewTicket;
use itsm_testing::properties::new_ticket;
use itsm_testing::{InMemoryTicketStore, test_clock};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

#[tokio::test]
async fn test_creation_round_trip() {
    let clock = test_clock();
    let store = InMemoryTicketStore::with_clock(clock);

    let created = store.insert(NewTicket::new("Broken jet bridge")).await.unwrap();

    let tickets = store.list_all().await.unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0], created);
    assert_eq!(tickets[0].title, "Broken jet bridge");
    assert_eq!(tickets[0].status, "OPEN");
    assert_eq!(tickets[0].priority, "P3");
    assert_eq!(tickets[0].created_at, clock.now());
}

#[tokio::test]
async fn test_empty_store_lists_nothing() {
    let store = InMemoryTicketStore::new();

    let tickets = store.list_all().await.unwrap();
    assert!(tickets.is_empty());
}

#[tokio::test]
async fn test_ids_start_at_one_and_increase() {
    let store = InMemoryTicketStore::new();

    let first = store.insert(NewTicket::new("Baggage belt 3 stalled")).await.unwrap();
    let second = store.insert(NewTicket::new("Gate 12 display dark")).await.unwrap();

    assert_eq!(first.id.value(), 1);
    assert_eq!(second.id.value(), 2);
}

#[tokio::test]
async fn test_concurrent_inserts_are_all_visible() {
    let store = Arc::new(InMemoryTicketStore::new());
    let k = 50;

    let tasks: Vec<_> = (0..k)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.insert(NewTicket::new(format!("Concurrent {i}"))).await })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let titles: HashSet<String> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();
    let expected: HashSet<String> = (0..k).map(|i| format!("Concurrent {i}")).collect();
    assert_eq!(titles, expected);
}

#[tokio::test]
async fn test_unavailable_store_fails_without_writing() {
    let store = InMemoryTicketStore::new();
    store.set_unavailable(true);

    let err = store.insert(NewTicket::new("Never persisted")).await.unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));

    let err = store.list_all().await.unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));

    assert!(store.health_check().await.is_err());

    store.set_unavailable(false);
    assert!(store.list_all().await.unwrap().is_empty());
    assert!(store.health_check().await.is_ok());
}

#[tokio::test]
async fn test_store_behind_trait_object() {
    let store: Arc<dyn TicketStore> = Arc::new(InMemoryTicketStore::new());

    store.insert(NewTicket::new("Runway 27L edge light out")).await.unwrap();
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

proptest! {
    #[test]
    fn prop_ids_are_pairwise_distinct(payloads in proptest::collection::vec(new_ticket(), 0..40)) {
        let store = InMemoryTicketStore::new();
        let count = payloads.len();

        let ids: HashSet<_> = tokio_test::block_on(async {
            let mut ids = HashSet::new();
            for payload in payloads {
                ids.insert(store.insert(payload).await.unwrap().id);
            }
            ids
        });

        prop_assert_eq!(ids.len(), count);
        prop_assert_eq!(store.len(), count);
    }

    #[test]
    fn prop_titles_are_stored_verbatim(payload in new_ticket()) {
        let store = InMemoryTicketStore::new();
        let title = payload.title.clone();

        let created = tokio_test::block_on(store.insert(payload)).unwrap();
        prop_assert_eq!(created.title, title);
    }
}

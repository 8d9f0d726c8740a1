//! All-or-nothing bulk refresh.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use common::{project, Harness};
use sitebook_core::models::{InventoryItem, Project};
use sitebook_core::{EntityKind, Stored};
use sitebook_events::Severity;
use sitebook_sync::memory::Operation;
use sitebook_sync::CollaboratorError;

#[tokio::test]
async fn one_failed_fetch_keeps_the_whole_previous_snapshot() {
    let h = Harness::new();
    h.backend.projects.seed(project("P1", "Tower A"));
    h.load().await;
    let before = h.sitebook.snapshot();

    h.backend.projects.seed(project("P2", "Tower B"));
    h.backend.inventory.seed(Stored::new("I1", InventoryItem::default()));
    h.backend.inventory.fail(Operation::GetAll);

    let err = h.sitebook.store().refresh_all().await.unwrap_err();

    assert_eq!(err.failures.len(), 1);
    assert_matches!(
        &err.failures[0],
        (EntityKind::Inventory, CollaboratorError::Unavailable(_))
    );
    // Every collection was still fetched, and none of them was applied.
    assert_eq!(h.backend.fetches(), 26);
    let after = h.sitebook.snapshot();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(after.records::<Project>().len(), 1);
    assert!(after.records::<InventoryItem>().is_empty());
}

#[tokio::test]
async fn every_failed_kind_is_listed_in_one_error() {
    let h = Harness::new();
    h.backend.budgets.fail(Operation::GetAll);
    h.backend.issues.fail(Operation::GetAll);
    h.backend.checklists.fail(Operation::GetAll);

    let err = h.sitebook.store().refresh_all().await.unwrap_err();

    assert_eq!(
        err.failed_kinds(),
        vec![EntityKind::Budget, EntityKind::Issue, EntityKind::Quality]
    );
    assert!(h.sitebook.snapshot().refreshed_at().is_none());
}

#[tokio::test]
async fn successful_refresh_notifies_subscribers() {
    let h = Harness::new();
    let mut updates = h.sitebook.store().subscribe();
    h.backend.projects.seed(project("P1", "Tower A"));

    h.sitebook.refresh().await.unwrap();

    assert!(updates.has_changed().unwrap());
    let snapshot = updates.borrow_and_update().clone();
    assert_eq!(snapshot.project_label(Some("P1")), "Tower A");
    assert!(snapshot.refreshed_at().is_some());
}

#[tokio::test]
async fn failed_manual_refresh_is_shown_to_the_user() {
    let h = Harness::new();
    h.backend.team.fail(Operation::GetAll);

    assert!(h.sitebook.refresh().await.is_err());

    let notes = h.notifier.notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].severity, Severity::Error);
    assert!(notes[0].message.contains("team"));
    assert_eq!(notes[0].auto_dismiss, None);
}

#[tokio::test]
async fn recovered_backend_refreshes_normally() {
    let h = Harness::new();
    h.backend.projects.fail(Operation::GetAll);
    assert!(h.sitebook.store().refresh_all().await.is_err());

    h.backend.projects.heal();
    h.backend.projects.seed(project("P1", "Tower A"));
    let snapshot = h.sitebook.store().refresh_all().await.unwrap();

    assert_eq!(snapshot.records::<Project>().len(), 1);
    assert_eq!(h.sitebook.store().refresh_count(), 2);
}

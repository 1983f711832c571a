//! Regression coverage for the permission-gated CRUD lifecycle.

use std::sync::Arc;

use chrono::{Duration, Utc};
use pagination::PageRequest;
use rstest::rstest;
use uuid::Uuid;

use crate::domain::actor::{Actor, Role};
use crate::domain::catalog::{Event, EventChanges, EventDraft, Tag, TagChanges, TagDraft};
use crate::domain::error::ErrorCode;
use crate::domain::ports::InMemoryRepository;

use super::{CrudOp, CrudService, EntityCrud, EventQueries};

fn actor(role: Role) -> Actor {
    Actor::new(Uuid::new_v4(), "test".to_owned(), role)
}

fn tag_service() -> CrudService<Tag, InMemoryRepository<Tag>> {
    CrudService::new(Arc::new(InMemoryRepository::new()))
}

fn tag_draft(slug: &str) -> TagDraft {
    TagDraft {
        slug: slug.to_owned(),
        name: "Family friendly".to_owned(),
        colour: "#ff8800".to_owned(),
    }
}

fn event_service() -> CrudService<Event, InMemoryRepository<Event>> {
    CrudService::new(Arc::new(InMemoryRepository::new()))
}

fn event_draft() -> EventDraft {
    let starts_at = Utc::now();
    EventDraft {
        slug: "fado-night".to_owned(),
        name: "Fado night".to_owned(),
        description: "Live fado in Alfama.".to_owned(),
        destination_id: Uuid::new_v4(),
        starts_at,
        ends_at: starts_at + Duration::hours(3),
        capacity: 80,
    }
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let service = tag_service();
    let editor = actor(Role::Editor);

    let created = service
        .create(&editor, tag_draft("family-friendly"))
        .await
        .expect("create succeeds");
    let fetched = service
        .get(&editor, created.id)
        .await
        .expect("get succeeds");
    assert_eq!(fetched, created);

    let by_slug = service
        .get_by_slug(&editor, "family-friendly")
        .await
        .expect("slug lookup succeeds");
    assert_eq!(by_slug.id, created.id);
}

#[tokio::test]
async fn invalid_draft_reports_every_issue() {
    let service = tag_service();
    let draft = TagDraft {
        slug: "Not A Slug".to_owned(),
        name: String::new(),
        colour: "red".to_owned(),
    };

    let err = service
        .create(&actor(Role::Editor), draft)
        .await
        .expect_err("three invalid fields");
    assert_eq!(err.code(), ErrorCode::ValidationError);
    let details = err.details().expect("issue details attached");
    assert_eq!(details["issues"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn duplicate_slug_conflicts() {
    let service = tag_service();
    let editor = actor(Role::Editor);
    service
        .create(&editor, tag_draft("seafront"))
        .await
        .expect("first create succeeds");

    let err = service
        .create(&editor, tag_draft("seafront"))
        .await
        .expect_err("slug already taken");
    assert_eq!(err.code(), ErrorCode::AlreadyExists);
}

#[rstest]
#[case(Role::Viewer, false)]
#[case(Role::Editor, true)]
#[case(Role::Admin, true)]
#[tokio::test]
async fn create_requires_a_writing_role(#[case] role: Role, #[case] allowed: bool) {
    let service = tag_service();
    let outcome = service.create(&actor(role), tag_draft("quiet")).await;
    match outcome {
        Ok(_) => assert!(allowed),
        Err(err) => {
            assert!(!allowed);
            assert_eq!(err.code(), ErrorCode::Forbidden);
        }
    }
}

#[tokio::test]
async fn viewers_can_read_but_not_delete() {
    let service = tag_service();
    let created = service
        .create(&actor(Role::Editor), tag_draft("hiking"))
        .await
        .expect("create succeeds");

    let viewer = actor(Role::Viewer);
    service
        .get(&viewer, created.id)
        .await
        .expect("viewer reads succeed");
    let err = service
        .soft_delete(&viewer, created.id)
        .await
        .expect_err("viewer cannot delete");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn soft_deleted_records_vanish_until_restored() {
    let service = tag_service();
    let editor = actor(Role::Editor);
    let created = service
        .create(&editor, tag_draft("wine-tour"))
        .await
        .expect("create succeeds");

    service
        .soft_delete(&editor, created.id)
        .await
        .expect("soft delete succeeds");
    let err = service
        .get(&editor, created.id)
        .await
        .expect_err("deleted records are hidden");
    assert_eq!(err.code(), ErrorCode::NotFound);
    let listed = service
        .list(&editor, PageRequest::default())
        .await
        .expect("list succeeds");
    assert!(listed.items.is_empty());

    let restored = service
        .restore(&editor, created.id)
        .await
        .expect("restore succeeds");
    assert!(!restored.audit.is_deleted());
    service
        .get(&editor, created.id)
        .await
        .expect("restored records are visible");
}

#[tokio::test]
async fn restoring_an_active_record_is_a_no_op() {
    let service = tag_service();
    let editor = actor(Role::Editor);
    let created = service
        .create(&editor, tag_draft("surf"))
        .await
        .expect("create succeeds");

    let restored = service
        .restore(&editor, created.id)
        .await
        .expect("restore succeeds");
    assert_eq!(restored, created);
}

#[tokio::test]
async fn hard_delete_is_admin_only() {
    let service = tag_service();
    let admin = actor(Role::Admin);
    let created = service
        .create(&admin, tag_draft("museum"))
        .await
        .expect("create succeeds");

    let err = service
        .hard_delete(&actor(Role::Editor), created.id)
        .await
        .expect_err("editors cannot hard-delete");
    assert_eq!(err.code(), ErrorCode::Forbidden);

    service
        .hard_delete(&admin, created.id)
        .await
        .expect("admins can hard-delete");
    let err = service
        .restore(&admin, created.id)
        .await
        .expect_err("record is gone for good");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn update_applies_only_provided_fields() {
    let service = tag_service();
    let editor = actor(Role::Editor);
    let created = service
        .create(&editor, tag_draft("beach"))
        .await
        .expect("create succeeds");

    let changes = TagChanges {
        name: Some("Beachfront".to_owned()),
        colour: None,
    };
    let updated = service
        .update(&editor, created.id, changes)
        .await
        .expect("update succeeds");
    assert_eq!(updated.name, "Beachfront");
    assert_eq!(updated.colour, created.colour);
    assert!(updated.audit.updated_at >= created.audit.updated_at);
}

#[tokio::test]
async fn updating_a_missing_record_is_not_found() {
    let service = tag_service();
    let err = service
        .update(&actor(Role::Editor), Uuid::new_v4(), TagChanges::default())
        .await
        .expect_err("nothing to update");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn partial_window_update_is_checked_against_stored_record() {
    let service = event_service();
    let editor = actor(Role::Editor);
    let created = service
        .create(&editor, event_draft())
        .await
        .expect("create succeeds");

    let changes = EventChanges {
        ends_at: Some(created.starts_at - Duration::hours(1)),
        ..EventChanges::default()
    };
    let err = service
        .update(&editor, created.id, changes)
        .await
        .expect_err("window would invert");
    assert_eq!(err.code(), ErrorCode::ValidationError);
}

#[tokio::test]
async fn search_matches_name_fragments() {
    let service = tag_service();
    let editor = actor(Role::Editor);
    service
        .create(&editor, tag_draft("family-friendly"))
        .await
        .expect("create succeeds");

    let found = service
        .search(&editor, "FAMILY", PageRequest::default())
        .await
        .expect("search succeeds");
    assert_eq!(found.items.len(), 1);
    let missing = service
        .search(&editor, "ski", PageRequest::default())
        .await
        .expect("search succeeds");
    assert!(missing.items.is_empty());
}

#[tokio::test]
async fn upcoming_listing_skips_finished_events() {
    let service = event_service();
    let editor = actor(Role::Editor);
    service
        .create(&editor, event_draft())
        .await
        .expect("create succeeds");
    let mut finished = event_draft();
    finished.slug = "last-years-fair".to_owned();
    finished.starts_at = Utc::now() - Duration::days(30);
    finished.ends_at = Utc::now() - Duration::days(29);
    service
        .create(&editor, finished)
        .await
        .expect("create succeeds");

    let upcoming = service
        .upcoming(&editor, PageRequest::default())
        .await
        .expect("listing succeeds");
    assert_eq!(upcoming.items.len(), 1);
    assert_eq!(upcoming.items[0].slug, "fado-night");
}

#[rstest]
#[case(CrudOp::Create, "create")]
#[case(CrudOp::HardDelete, "hard_delete")]
#[case(CrudOp::GetBySlug, "get_by_slug")]
fn ops_render_stable_names(#[case] op: CrudOp, #[case] expected: &str) {
    assert_eq!(op.to_string(), expected);
}

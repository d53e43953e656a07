//! Cross-module flows: registration constraints, owner scoping, ordering,
//! and the cascade on user removal.

use planner_core::{credentials, event, user, Database, EventDraft, NewUser, PlannerError, User};
use tempfile::TempDir;

// A fixed encoded hash keeps account fixtures cheap; hashing itself is
// covered in the credentials tests.
const DUMMY_HASH: &str = "$argon2i$v=19$m=4096,t=3,p=1$c29tZXNhbHQ$fixture";

fn scratch_db(dir: &TempDir) -> Database {
    Database::open(dir.path().join("planner.db")).unwrap()
}

fn register(db: &Database, name: &str) -> User {
    user::create_user(
        db,
        &NewUser {
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password_hash: DUMMY_HASH.to_string(),
        },
    )
    .unwrap()
}

fn draft(title: &str, due_date: &str) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        due_date: due_date.to_string(),
        ..EventDraft::default()
    }
}

#[test]
fn duplicate_username_is_a_conflict() {
    let dir = TempDir::new().unwrap();
    let db = scratch_db(&dir);
    register(&db, "alice");

    let result = user::create_user(
        &db,
        &NewUser {
            username: "alice".to_string(),
            email: "different@example.com".to_string(),
            password_hash: DUMMY_HASH.to_string(),
        },
    );
    assert!(matches!(result, Err(PlannerError::Conflict(_))));

    // The failed insert must not have written anything.
    let stored = user::find_by_username(&db, "alice").unwrap().unwrap();
    assert_eq!(stored.email, "alice@example.com");
}

#[test]
fn duplicate_email_is_a_conflict() {
    let dir = TempDir::new().unwrap();
    let db = scratch_db(&dir);
    register(&db, "alice");

    let result = user::create_user(
        &db,
        &NewUser {
            username: "alicia".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: DUMMY_HASH.to_string(),
        },
    );
    assert!(matches!(result, Err(PlannerError::Conflict(_))));
    assert!(user::find_by_username(&db, "alicia").unwrap().is_none());
}

#[test]
fn username_lookup_is_case_sensitive() {
    let dir = TempDir::new().unwrap();
    let db = scratch_db(&dir);
    register(&db, "alice");

    assert!(user::find_by_username(&db, "Alice").unwrap().is_none());
    assert!(user::find_by_username(&db, "alice").unwrap().is_some());
}

#[test]
fn created_event_shows_up_with_pending_status() {
    let dir = TempDir::new().unwrap();
    let db = scratch_db(&dir);
    let alice = register(&db, "alice");

    event::create_event(&db, alice.id, &draft("Buy milk", "2024-01-02")).unwrap();

    let events = event::list_events(&db, alice.id).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Buy milk");
    assert_eq!(events[0].due_date, "2024-01-02");
    assert_eq!(events[0].status, "pending");
    assert_eq!(events[0].user_id, alice.id);
}

#[test]
fn listing_with_no_events_is_empty_not_an_error() {
    let dir = TempDir::new().unwrap();
    let db = scratch_db(&dir);
    let alice = register(&db, "alice");

    assert!(event::list_events(&db, alice.id).unwrap().is_empty());
}

#[test]
fn list_orders_by_due_date_regardless_of_insertion_order() {
    let dir = TempDir::new().unwrap();
    let db = scratch_db(&dir);
    let alice = register(&db, "alice");

    event::create_event(&db, alice.id, &draft("Third", "2024-03-01")).unwrap();
    event::create_event(&db, alice.id, &draft("First", "2024-01-05")).unwrap();
    event::create_event(&db, alice.id, &draft("Second", "2024-01-05T10:00")).unwrap();

    let events = event::list_events(&db, alice.id).unwrap();
    let due_dates: Vec<&str> = events.iter().map(|e| e.due_date.as_str()).collect();
    let mut sorted = due_dates.clone();
    sorted.sort();
    assert_eq!(due_dates, sorted);
    assert_eq!(events[0].title, "First");
    assert_eq!(events[2].title, "Third");
}

#[test]
fn events_of_other_users_are_invisible() {
    let dir = TempDir::new().unwrap();
    let db = scratch_db(&dir);
    let alice = register(&db, "alice");
    let bob = register(&db, "bob");

    let theirs = event::create_event(&db, alice.id, &draft("Standup", "2024-01-02")).unwrap();

    assert!(event::list_events(&db, bob.id).unwrap().is_empty());
    assert!(matches!(
        event::get_event(&db, theirs.id, bob.id),
        Err(PlannerError::NotFound(_))
    ));
}

#[test]
fn deleting_a_non_owned_event_is_a_quiet_no_op() {
    let dir = TempDir::new().unwrap();
    let db = scratch_db(&dir);
    let alice = register(&db, "alice");
    let bob = register(&db, "bob");

    let theirs = event::create_event(&db, alice.id, &draft("Standup", "2024-01-02")).unwrap();

    assert!(!event::delete_event(&db, theirs.id, bob.id).unwrap());

    let kept = event::get_event(&db, theirs.id, alice.id).unwrap();
    assert_eq!(kept.title, "Standup");
}

#[test]
fn deleting_an_owned_event_removes_it() {
    let dir = TempDir::new().unwrap();
    let db = scratch_db(&dir);
    let alice = register(&db, "alice");
    let ev = event::create_event(&db, alice.id, &draft("Standup", "2024-01-02")).unwrap();

    assert!(event::delete_event(&db, ev.id, alice.id).unwrap());
    assert!(!event::delete_event(&db, ev.id, alice.id).unwrap());
    assert!(event::list_events(&db, alice.id).unwrap().is_empty());
}

#[test]
fn update_replaces_fields_and_bumps_updated_at() {
    let dir = TempDir::new().unwrap();
    let db = scratch_db(&dir);
    let alice = register(&db, "alice");
    let created = event::create_event(&db, alice.id, &draft("Standup", "2024-01-02")).unwrap();

    std::thread::sleep(std::time::Duration::from_millis(5));

    let updated = event::update_event(
        &db,
        created.id,
        alice.id,
        &EventDraft {
            title: "Retro".to_string(),
            description: Some("Quarterly".to_string()),
            location: Some("Room 4".to_string()),
            due_date: "2024-02-01".to_string(),
            status: "confirmed".to_string(),
        },
    )
    .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.user_id, alice.id);
    assert_eq!(updated.title, "Retro");
    assert_eq!(updated.description.as_deref(), Some("Quarterly"));
    assert_eq!(updated.location.as_deref(), Some("Room 4"));
    assert_eq!(updated.due_date, "2024-02-01");
    assert_eq!(updated.status, "confirmed");
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.created_at, created.created_at);
}

#[test]
fn update_of_a_non_owned_event_reports_not_found() {
    let dir = TempDir::new().unwrap();
    let db = scratch_db(&dir);
    let alice = register(&db, "alice");
    let bob = register(&db, "bob");
    let theirs = event::create_event(&db, alice.id, &draft("Standup", "2024-01-02")).unwrap();

    let result = event::update_event(&db, theirs.id, bob.id, &draft("Hijacked", "2024-01-03"));
    assert!(matches!(result, Err(PlannerError::NotFound(_))));

    // Untouched, still owned by alice.
    let kept = event::get_event(&db, theirs.id, alice.id).unwrap();
    assert_eq!(kept.title, "Standup");
    assert_eq!(kept.user_id, alice.id);
}

#[test]
fn update_rejects_blank_required_fields() {
    let dir = TempDir::new().unwrap();
    let db = scratch_db(&dir);
    let alice = register(&db, "alice");
    let ev = event::create_event(&db, alice.id, &draft("Standup", "2024-01-02")).unwrap();

    let result = event::update_event(&db, ev.id, alice.id, &draft("", "2024-01-03"));
    assert!(matches!(result, Err(PlannerError::Validation(_))));
}

#[test]
fn removing_a_user_cascades_to_their_events() {
    let dir = TempDir::new().unwrap();
    let db = scratch_db(&dir);
    let alice = register(&db, "alice");
    let bob = register(&db, "bob");
    event::create_event(&db, alice.id, &draft("Standup", "2024-01-02")).unwrap();
    event::create_event(&db, alice.id, &draft("Retro", "2024-01-05")).unwrap();
    let kept = event::create_event(&db, bob.id, &draft("Lunch", "2024-01-03")).unwrap();

    // Administrative removal happens outside the access layer.
    db.connection()
        .unwrap()
        .execute("DELETE FROM users WHERE id = ?1", [alice.id])
        .unwrap();

    assert!(event::list_events(&db, alice.id).unwrap().is_empty());
    assert_eq!(event::list_events(&db, bob.id).unwrap().len(), 1);
    assert_eq!(event::get_event(&db, kept.id, bob.id).unwrap().title, "Lunch");
}

#[test]
fn end_to_end_register_login_create_list() {
    let dir = TempDir::new().unwrap();
    let db = scratch_db(&dir);

    // Register with a real hash.
    let hash = credentials::hash("pw").unwrap();
    let alice = user::create_user(
        &db,
        &NewUser {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: hash,
        },
    )
    .unwrap();

    // Login: lookup plus verification.
    let found = user::find_by_username(&db, "alice").unwrap().unwrap();
    assert!(credentials::verify(&found.password_hash, "pw"));
    assert!(!credentials::verify(&found.password_hash, "wrong"));

    // Events appear in due-date order.
    event::create_event(&db, alice.id, &draft("Later", "2024-01-05")).unwrap();
    event::create_event(&db, alice.id, &draft("Standup", "2024-01-02")).unwrap();

    let events = event::list_events(&db, found.id).unwrap();
    assert_eq!(events[0].title, "Standup");
    assert_eq!(events[1].title, "Later");
}

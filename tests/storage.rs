use chrono::NaiveDate;
use correspondence_tracker::storage::{migrations, Database};
use correspondence_tracker::tracker::{Direction, NewContact, NewCorrespondence, TrackerService};
use tempfile::TempDir;

#[test]
fn reopening_a_store_keeps_data_and_version() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tracker.db");
    let sent_at = NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();

    let contact_id = {
        let mut service = TrackerService::new(Database::new(&path));
        let id = service.add_contact(&NewContact::new("Ada")).unwrap();
        service
            .add_correspondence(&NewCorrespondence::new(id, Direction::Incoming, sent_at))
            .unwrap();
        service.close().unwrap();
        id
    };

    let service = TrackerService::new(Database::new(&path));
    assert_eq!(
        service.database().schema_version().unwrap(),
        migrations::CURRENT_VERSION
    );
    assert_eq!(service.get_contact(contact_id).unwrap().unwrap().name, "Ada");

    let history = service.list_correspondences(Some(contact_id)).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].sent_at, sent_at);
}

#[test]
fn store_constraint_errors_reach_the_caller() {
    let db = Database::in_memory();

    let err = db
        .execute(
            "INSERT INTO correspondences (contact_id, direction, sent_at) VALUES (1, 'both', '2024-01-01T00:00:00')",
            [],
        )
        .unwrap_err();

    assert!(err.is_constraint_violation());
}

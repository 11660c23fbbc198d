use tripboard_core::db::open_db_in_memory;
use tripboard_core::{
    Assignment, EquipmentItem, EquipmentPatch, EquipmentRepository, EquipmentValidationError,
    ItemStatus, RepoError, SourceType, SqliteEquipmentRepository, SqliteTripRepository,
    TripId, TripRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

fn seed_trip(conn: &Connection) -> TripId {
    SqliteTripRepository::new(conn)
        .create_trip("Kungsleden", None)
        .unwrap()
        .id
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let trip_id = seed_trip(&conn);
    let repo = SqliteEquipmentRepository::new(&conn);

    let mut item = EquipmentItem::new(trip_id, "gas canister", Assignment::Shared);
    item.category = Some("kitchen".to_string());
    item.general_status = Some(ItemStatus::ToBuy);
    item.source_type = Some(SourceType::LocalStore);
    item.source_url = Some("https://example.org/gas".to_string());
    let id = repo.create_equipment(&item).unwrap();

    let loaded = repo.get_equipment(id).unwrap().unwrap();
    assert_eq!(loaded, item);
}

#[test]
fn create_rejects_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let trip_id = seed_trip(&conn);
    let repo = SqliteEquipmentRepository::new(&conn);

    let item = EquipmentItem::new(trip_id, "   ", Assignment::Jonne);
    let err = repo.create_equipment(&item).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(EquipmentValidationError::BlankName)
    ));
}

#[test]
fn create_requires_existing_trip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEquipmentRepository::new(&conn);

    let item = EquipmentItem::new(Uuid::new_v4(), "orphan", Assignment::Shared);
    let err = repo.create_equipment(&item).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn list_is_scoped_to_trip_and_keeps_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let trip_id = seed_trip(&conn);
    let other_trip = seed_trip(&conn);
    let repo = SqliteEquipmentRepository::new(&conn);

    for name in ["zelt", "anorak", "messer"] {
        repo.create_equipment(&EquipmentItem::new(trip_id, name, Assignment::Shared))
            .unwrap();
    }
    repo.create_equipment(&EquipmentItem::new(other_trip, "other", Assignment::Frank))
        .unwrap();

    let names = repo
        .list_equipment(trip_id)
        .unwrap()
        .into_iter()
        .map(|item| item.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["zelt", "anorak", "messer"]);
}

#[test]
fn partial_update_touches_only_supplied_fields() {
    let conn = open_db_in_memory().unwrap();
    let trip_id = seed_trip(&conn);
    let repo = SqliteEquipmentRepository::new(&conn);

    let mut item = EquipmentItem::new(trip_id, "sleeping bag", Assignment::BothIndividual);
    item.frank_status = Some(ItemStatus::Packed);
    item.notes = Some("down, -5C".to_string());
    repo.create_equipment(&item).unwrap();

    let patch = EquipmentPatch::status(tripboard_core::StatusField::Jonne, ItemStatus::ToBuy);
    let updated = repo.update_equipment(item.id, &patch).unwrap();

    assert_eq!(updated.jonne_status, Some(ItemStatus::ToBuy));
    assert_eq!(updated.frank_status, Some(ItemStatus::Packed));
    assert_eq!(updated.general_status, None);
    assert_eq!(updated.notes.as_deref(), Some("down, -5C"));
    assert_eq!(updated.name, "sleeping bag");
    assert_eq!(repo.get_equipment(item.id).unwrap().unwrap(), updated);
}

#[test]
fn partial_update_can_clear_nullable_fields() {
    let conn = open_db_in_memory().unwrap();
    let trip_id = seed_trip(&conn);
    let repo = SqliteEquipmentRepository::new(&conn);

    let mut item = EquipmentItem::new(trip_id, "rain cover", Assignment::Jonne);
    item.category = Some("bags".to_string());
    item.general_status = Some(ItemStatus::Optional);
    repo.create_equipment(&item).unwrap();

    let patch = EquipmentPatch {
        category: Some(None),
        general_status: Some(None),
        ..EquipmentPatch::default()
    };
    let updated = repo.update_equipment(item.id, &patch).unwrap();

    assert_eq!(updated.category, None);
    assert_eq!(updated.general_status, None);
    assert_eq!(updated.assignment, Assignment::Jonne);
}

#[test]
fn update_missing_row_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEquipmentRepository::new(&conn);
    let missing = Uuid::new_v4();

    let patch = EquipmentPatch::status(tripboard_core::StatusField::General, ItemStatus::Packed);
    let err = repo.update_equipment(missing, &patch).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn update_rejects_empty_patch_and_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let trip_id = seed_trip(&conn);
    let repo = SqliteEquipmentRepository::new(&conn);
    let item = EquipmentItem::new(trip_id, "towel", Assignment::Frank);
    repo.create_equipment(&item).unwrap();

    let err = repo
        .update_equipment(item.id, &EquipmentPatch::default())
        .unwrap_err();
    assert!(matches!(err, RepoError::EmptyPatch(id) if id == item.id));

    let blank = EquipmentPatch {
        name: Some("  ".to_string()),
        ..EquipmentPatch::default()
    };
    let err = repo.update_equipment(item.id, &blank).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(EquipmentValidationError::BlankName)
    ));
}

#[test]
fn delete_removes_row_and_reports_missing() {
    let conn = open_db_in_memory().unwrap();
    let trip_id = seed_trip(&conn);
    let repo = SqliteEquipmentRepository::new(&conn);
    let item = EquipmentItem::new(trip_id, "stove", Assignment::Shared);
    repo.create_equipment(&item).unwrap();

    repo.delete_equipment(item.id).unwrap();
    assert!(repo.get_equipment(item.id).unwrap().is_none());

    let err = repo.delete_equipment(item.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn read_rejects_unknown_assignment_text() {
    let conn = open_db_in_memory().unwrap();
    let trip_id = seed_trip(&conn);
    let repo = SqliteEquipmentRepository::new(&conn);
    let item = EquipmentItem::new(trip_id, "mystery", Assignment::Shared);
    repo.create_equipment(&item).unwrap();

    conn.execute(
        "UPDATE equipment_items SET assignment = 'everyone' WHERE uuid = ?1;",
        [item.id.to_string()],
    )
    .unwrap();

    let err = repo.list_equipment(trip_id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("everyone")));
}

#[test]
fn read_rejects_unknown_status_text() {
    let conn = open_db_in_memory().unwrap();
    let trip_id = seed_trip(&conn);
    let repo = SqliteEquipmentRepository::new(&conn);
    let item = EquipmentItem::new(trip_id, "boots", Assignment::BothIndividual);
    repo.create_equipment(&item).unwrap();

    conn.execute(
        "UPDATE equipment_items SET frank_status = 'lost' WHERE uuid = ?1;",
        [item.id.to_string()],
    )
    .unwrap();

    let err = repo.get_equipment(item.id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("frank_status")));
}

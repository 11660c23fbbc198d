use tripboard_core::db::{open_db, open_db_in_memory};
use tripboard_core::{
    RepoError, SettingsRepository, SqliteSettingsRepository, SqliteTripRepository, Traveler,
    TripRepository,
};
use uuid::Uuid;

#[test]
fn create_and_list_trips() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTripRepository::new(&conn);

    let first = repo
        .create_trip("  Sarek  ", Some("two weeks, no resupply"))
        .unwrap();
    let second = repo.create_trip("Lofoten", None).unwrap();

    assert_eq!(first.name, "Sarek");
    assert_eq!(first.description.as_deref(), Some("two weeks, no resupply"));
    assert!(first.created_at > 0);

    let trips = repo.list_trips().unwrap();
    assert_eq!(trips, vec![first.clone(), second]);
    assert_eq!(repo.get_trip(first.id).unwrap(), Some(first));
    assert_eq!(repo.get_trip(Uuid::new_v4()).unwrap(), None);
}

#[test]
fn create_trip_rejects_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let err = SqliteTripRepository::new(&conn)
        .create_trip(" ", None)
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn current_user_defaults_to_none_and_can_be_set_and_cleared() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSettingsRepository::new(&conn);

    assert_eq!(repo.current_user().unwrap(), None);

    repo.set_current_user(Some(Traveler::Jonne)).unwrap();
    assert_eq!(repo.current_user().unwrap(), Some(Traveler::Jonne));

    repo.set_current_user(Some(Traveler::Frank)).unwrap();
    assert_eq!(repo.current_user().unwrap(), Some(Traveler::Frank));

    repo.set_current_user(None).unwrap();
    assert_eq!(repo.current_user().unwrap(), None);
}

#[test]
fn current_user_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("identity.db");

    {
        let conn = open_db(&path).unwrap();
        SqliteSettingsRepository::new(&conn)
            .set_current_user(Some(Traveler::Frank))
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(
        SqliteSettingsRepository::new(&conn).current_user().unwrap(),
        Some(Traveler::Frank)
    );
}

#[test]
fn unknown_stored_user_reads_as_none() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO app_settings (key, value) VALUES ('current_user', 'bob');",
        [],
    )
    .unwrap();

    assert_eq!(
        SqliteSettingsRepository::new(&conn).current_user().unwrap(),
        None
    );
}

use roster_core::db::open_db_in_memory;
use roster_core::repo::user_repo::{NewUser, UserChanges};
use roster_core::{RepoError, SqliteUserRepository, UserListQuery, UserRepository};
use rusqlite::Connection;
use uuid::Uuid;

fn new_user(first_name: &str, last_name: &str, age: Option<i64>) -> NewUser {
    NewUser {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        age,
    }
}

#[test]
fn create_and_find_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    let created = repo.create(&new_user("Ann", "Lee", Some(20))).unwrap();
    assert!(!created.id.is_nil());
    assert_eq!(created.first_name, "Ann");
    assert_eq!(created.last_name, "Lee");

    let loaded = repo.find(created.id).unwrap().unwrap();
    assert_eq!(loaded.id, created.id);
    assert_eq!(loaded.first_name, "Ann");
    assert_eq!(loaded.last_name, "Lee");
    assert_eq!(loaded.age, Some(20));
    assert!(loaded.created_at > 0);
}

#[test]
fn create_generates_distinct_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    let first = repo.create(&new_user("Ann", "Lee", None)).unwrap();
    let second = repo.create(&new_user("Ann", "Lee", None)).unwrap();
    assert_ne!(first.id, second.id);
}

#[test]
fn find_unknown_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    assert!(repo.find(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn find_all_filters_and_paginates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    repo.create(&new_user("Ann", "Lee", None)).unwrap();
    repo.create(&new_user("Bo", "Lee", None)).unwrap();
    repo.create(&new_user("Cy", "Park", None)).unwrap();

    assert_eq!(repo.find_all(&UserListQuery::default()).unwrap().len(), 3);

    let lees = repo
        .find_all(&UserListQuery {
            last_name: Some("Lee".to_string()),
            ..UserListQuery::default()
        })
        .unwrap();
    assert_eq!(lees.len(), 2);
    assert!(lees.iter().all(|user| user.last_name == "Lee"));

    let page = repo
        .find_all(&UserListQuery {
            limit: Some(1),
            offset: 1,
            ..UserListQuery::default()
        })
        .unwrap();
    assert_eq!(page.len(), 1);
}

#[test]
fn find_all_keeps_creation_order_for_back_to_back_inserts() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let created: Vec<_> = ["Ann", "Bo", "Cy", "Di", "Ed"]
        .iter()
        .map(|name| repo.create(&new_user(name, "Lee", None)).unwrap().id)
        .collect();

    let listed: Vec<_> = repo
        .find_all(&UserListQuery::default())
        .unwrap()
        .into_iter()
        .map(|user| user.id)
        .collect();
    assert_eq!(listed, created);
}

#[test]
fn partial_update_changes_only_supplied_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let created = repo.create(&new_user("Ann", "Lee", Some(20))).unwrap();

    let changed = repo
        .find_and_update_by_id(
            created.id,
            &UserChanges {
                last_name: Some("Kim".to_string()),
                ..UserChanges::default()
            },
        )
        .unwrap();
    assert_eq!(changed, Some(1));

    let loaded = repo.find(created.id).unwrap().unwrap();
    assert_eq!(loaded.first_name, "Ann");
    assert_eq!(loaded.last_name, "Kim");
    assert_eq!(loaded.age, Some(20));
}

#[test]
fn update_unknown_id_returns_none_and_mutates_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let created = repo.create(&new_user("Ann", "Lee", None)).unwrap();

    let changes = UserChanges {
        first_name: Some("Zed".to_string()),
        ..UserChanges::default()
    };
    assert_eq!(
        repo.find_and_update_by_id(Uuid::new_v4(), &changes).unwrap(),
        None
    );

    let loaded = repo.find(created.id).unwrap().unwrap();
    assert_eq!(loaded.first_name, "Ann");
}

#[test]
fn delete_reports_whether_a_row_was_removed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let created = repo.create(&new_user("Ann", "Lee", None)).unwrap();

    assert!(repo.delete(created.id).unwrap());
    assert!(!repo.delete(created.id).unwrap());
    assert!(!repo.delete(Uuid::new_v4()).unwrap());
    assert!(repo.find(created.id).unwrap().is_none());
}

#[test]
fn corrupted_id_surfaces_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO users (id, first_name, last_name) VALUES ('garbage', 'Ann', 'Lee');",
        [],
    )
    .unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    let err = repo.find_all(&UserListQuery::default()).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteUserRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

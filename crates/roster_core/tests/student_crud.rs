use roster_core::db::open_db_in_memory;
use roster_core::repo::class_repo::NewClass;
use roster_core::repo::student_repo::{NewStudent, StudentChanges};
use roster_core::repo::user_repo::NewUser;
use roster_core::{
    ClassFilter, ClassId, ClassRepository, RepoError, SqliteClassRepository,
    SqliteStudentRepository, SqliteUserRepository, StudentListQuery, StudentRepository, UserId,
    UserRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

fn seed_user(conn: &Connection, first_name: &str) -> UserId {
    SqliteUserRepository::try_new(conn)
        .unwrap()
        .create(&NewUser {
            first_name: first_name.to_string(),
            last_name: "Lee".to_string(),
            age: None,
        })
        .unwrap()
        .id
}

fn seed_class(conn: &Connection, name: &str) -> ClassId {
    SqliteClassRepository::try_new(conn)
        .unwrap()
        .create(&NewClass {
            name: name.to_string(),
        })
        .unwrap()
        .id
}

#[test]
fn create_and_find_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let user_id = seed_user(&conn, "Ann");
    let class_id = seed_class(&conn, "Math");
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let created = repo.create(&NewStudent { user_id, class_id }).unwrap();
    assert_eq!(created.user_id, user_id);
    assert_eq!(created.class_id, class_id);

    let loaded = repo.find(created.student_id).unwrap().unwrap();
    assert_eq!(loaded.student_id, created.student_id);
    assert_eq!(loaded.user_id, user_id);
    assert_eq!(loaded.class_id, class_id);
}

#[test]
fn create_with_unknown_user_is_a_database_error() {
    let conn = open_db_in_memory().unwrap();
    let class_id = seed_class(&conn, "Math");
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();

    let err = repo
        .create(&NewStudent {
            user_id: Uuid::new_v4(),
            class_id,
        })
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert!(repo.find_all(&StudentListQuery::default()).unwrap().is_empty());
}

#[test]
fn update_moves_student_to_another_class() {
    let conn = open_db_in_memory().unwrap();
    let user_id = seed_user(&conn, "Ann");
    let math = seed_class(&conn, "Math");
    let art = seed_class(&conn, "Art");
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();
    let created = repo
        .create(&NewStudent {
            user_id,
            class_id: math,
        })
        .unwrap();

    let changed = repo
        .find_and_update_by_id(
            created.student_id,
            &StudentChanges {
                class_id: Some(art),
            },
        )
        .unwrap();
    assert_eq!(changed, Some(1));
    assert_eq!(
        repo.find(created.student_id).unwrap().unwrap().class_id,
        art
    );

    let missing = repo
        .find_and_update_by_id(
            Uuid::new_v4(),
            &StudentChanges {
                class_id: Some(art),
            },
        )
        .unwrap();
    assert_eq!(missing, None);
}

#[test]
fn find_all_filters_by_class() {
    let conn = open_db_in_memory().unwrap();
    let ann = seed_user(&conn, "Ann");
    let bo = seed_user(&conn, "Bo");
    let math = seed_class(&conn, "Math");
    let art = seed_class(&conn, "Art");
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();
    repo.create(&NewStudent {
        user_id: ann,
        class_id: math,
    })
    .unwrap();
    repo.create(&NewStudent {
        user_id: bo,
        class_id: art,
    })
    .unwrap();

    let in_math = repo
        .find_all(&StudentListQuery {
            class_id: Some(math),
            ..StudentListQuery::default()
        })
        .unwrap();
    assert_eq!(in_math.len(), 1);
    assert_eq!(in_math[0].user_id, ann);
}

#[test]
fn deleting_user_cascades_to_student() {
    let conn = open_db_in_memory().unwrap();
    let user_id = seed_user(&conn, "Ann");
    let class_id = seed_class(&conn, "Math");
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();
    let created = repo.create(&NewStudent { user_id, class_id }).unwrap();

    assert!(SqliteUserRepository::try_new(&conn)
        .unwrap()
        .delete(user_id)
        .unwrap());
    assert!(repo.find(created.student_id).unwrap().is_none());
}

#[test]
fn deleting_class_cascades_to_student() {
    let conn = open_db_in_memory().unwrap();
    let user_id = seed_user(&conn, "Ann");
    let class_id = seed_class(&conn, "Math");
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();
    let created = repo.create(&NewStudent { user_id, class_id }).unwrap();

    assert!(SqliteClassRepository::try_new(&conn)
        .unwrap()
        .delete(&ClassFilter::ById(class_id))
        .unwrap());
    assert!(repo.find(created.student_id).unwrap().is_none());
}

#[test]
fn delete_unknown_student_returns_false() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStudentRepository::try_new(&conn).unwrap();
    assert!(!repo.delete(Uuid::new_v4()).unwrap());
}

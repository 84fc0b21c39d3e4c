use crate::db::{connect_and_migrate, test_connection, DatabaseConfig};
use crate::errors::ModelError;
use crate::{student, user};
use sea_orm::DatabaseConnection;
use anyhow::Result;

/// Fresh in-memory database with the schema applied
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect_and_migrate(&DatabaseConfig::in_memory()).await?;
    test_connection(&db).await?;
    Ok(db)
}

fn alice() -> student::StudentInput {
    student::StudentInput::new("Alice", "alice@example.edu", "B.Tech", "Computer Science")
}

/// Test student CRUD operations
#[tokio::test]
async fn test_student_crud() -> Result<()> {
    let db = setup_test_db().await?;

    // Create
    let created = student::create(&db, &alice()).await?;
    assert!(created.id > 0);
    assert_eq!(created.name, "Alice");

    // Read
    let found = student::find_by_id(&db, created.id).await?;
    assert_eq!(found.as_ref(), Some(&created));
    assert!(student::exists_by_id(&db, created.id).await?);

    // Update keeps the id
    let changes = student::StudentInput::new("Alice B", "alice.b@example.edu", "MCA", "Mathematics");
    let updated = student::update(&db, created.clone(), &changes).await?;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Alice B");
    assert_eq!(updated.department, "Mathematics");

    // Delete
    assert!(student::delete_by_id(&db, created.id).await?);
    assert!(!student::delete_by_id(&db, created.id).await?);
    assert!(student::find_by_id(&db, created.id).await?.is_none());
    assert_eq!(student::count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_student_email_unique() -> Result<()> {
    let db = setup_test_db().await?;
    student::create(&db, &alice()).await?;

    let dup = student::StudentInput::new("Other", "alice@example.edu", "BCA", "Physics");
    match student::create(&db, &dup).await {
        Err(ModelError::Duplicate(_)) => {}
        other => panic!("expected duplicate error, got {other:?}"),
    }
    assert_eq!(student::count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_student_ids_are_not_reused() -> Result<()> {
    let db = setup_test_db().await?;
    let first = student::create(&db, &alice()).await?;
    student::delete_by_id(&db, first.id).await?;

    let second = student::create(&db, &student::StudentInput::new("Bob", "bob@example.edu", "BCA", "Physics")).await?;
    assert!(second.id > first.id);
    Ok(())
}

#[tokio::test]
async fn test_student_search_is_case_insensitive_substring() -> Result<()> {
    let db = setup_test_db().await?;
    student::create(&db, &alice()).await?;
    student::create(&db, &student::StudentInput::new("alison", "alison@example.edu", "MCA", "Biology")).await?;
    student::create(&db, &student::StudentInput::new("Malik", "malik@example.edu", "BCA", "Physics")).await?;
    student::create(&db, &student::StudentInput::new("Zoe", "zoe@example.edu", "BCA", "Physics")).await?;
    student::create(&db, &student::StudentInput::new("ÉLODIE", "elodie@example.edu", "MA", "French")).await?;

    let hits = student::find_by_name_containing_ignore_case(&db, "ALI").await?;
    let names: Vec<_> = hits.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "alison", "Malik"]);

    // non-ASCII letters must still match when their case agrees
    for q in ["ÉLO", "Élo", "ÉlOdIe", "DIE"] {
        let hits = student::find_by_name_containing_ignore_case(&db, q).await?;
        let names: Vec<_> = hits.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["ÉLODIE"], "query {q}");
    }

    assert!(student::find_by_name_containing_ignore_case(&db, "bob").await?.is_empty());
    assert_eq!(student::find_by_name_containing_ignore_case(&db, "").await?.len(), 5);
    Ok(())
}

#[tokio::test]
async fn test_student_search_treats_wildcards_literally() -> Result<()> {
    let db = setup_test_db().await?;
    student::create(&db, &student::StudentInput::new("Ann_Lee", "ann@example.edu", "BCA", "Arts")).await?;
    student::create(&db, &student::StudentInput::new("AnnXLee", "annx@example.edu", "BCA", "Arts")).await?;

    let hits = student::find_by_name_containing_ignore_case(&db, "n_l").await?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Ann_Lee");
    assert!(student::find_by_name_containing_ignore_case(&db, "%").await?.is_empty());
    Ok(())
}

/// Test user CRUD operations
#[tokio::test]
async fn test_user_crud() -> Result<()> {
    let db = setup_test_db().await?;

    let created = user::create(&db, "clerk", "pass1234", user::Role::User).await?;
    assert_eq!(created.role, user::Role::User);

    // Find by username is exact
    let found = user::find_by_username(&db, "clerk").await?;
    assert_eq!(found.map(|u| u.id), Some(created.id));
    assert!(user::find_by_username(&db, "CLERK").await?.is_none());

    // Role round-trips through the string column
    let admin = user::create(&db, "boss", "boss1234", user::Role::Admin).await?;
    let reloaded = user::find_by_id(&db, admin.id).await?;
    assert_eq!(reloaded.map(|u| u.role), Some(user::Role::Admin));

    let all = user::find_all(&db).await?;
    assert_eq!(all.len(), 2);

    assert!(user::delete_by_id(&db, created.id).await?);
    assert!(user::find_by_id(&db, created.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_username_unique() -> Result<()> {
    let db = setup_test_db().await?;
    user::create(&db, "admin", "admin123", user::Role::Admin).await?;
    match user::create(&db, "admin", "other123", user::Role::User).await {
        Err(ModelError::Duplicate(_)) => {}
        other => panic!("expected duplicate error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_migrations_are_idempotent() -> Result<()> {
    use migration::MigratorTrait;
    let db = setup_test_db().await?;
    migration::Migrator::up(&db, None).await?;
    assert_eq!(student::count(&db).await?, 0);
    Ok(())
}

//! Integration tests for the PostgreSQL tag repository.
//!
//! **IMPORTANT**: These tests require a fully migrated PostgreSQL database.
//! Run migrations first: `sqlx migrate run`

use notafacil_db::{test_fixtures::TestDatabase, Error, NoteRepository, Tag, TagRepository};
use uuid::Uuid;

#[tokio::test]
#[ignore] // Requires PostgreSQL database
async fn test_create_and_find_tag() {
    let mut test_db = TestDatabase::new().await;
    let name = format!("tag-{}", &Uuid::new_v4().simple().to_string()[..8]);
    let tag = test_db.create_tag(&name).await;

    let fetched = test_db.db.tags.find_by_id(tag.id()).await.unwrap().unwrap();
    assert_eq!(fetched.name(), name);
    assert_eq!(fetched.color(), "#cccccc");

    let by_name = test_db.db.tags.find_by_name(&name).await.unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id(), tag.id());

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL database
async fn test_update_tag_color() {
    let mut test_db = TestDatabase::new().await;
    let tag = test_db.create_tag("paint").await;

    let updated = test_db
        .db
        .tags
        .update(tag.clone().update_color("#ABCDEF").unwrap())
        .await
        .unwrap();
    assert_eq!(updated.color(), "#ABCDEF");

    let missing = Tag::new("nowhere", None).unwrap();
    let err = test_db.db.tags.update(missing).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires PostgreSQL database
async fn test_delete_tag_detaches_it_from_notes() {
    let mut test_db = TestDatabase::new().await;
    let tag = test_db.create_tag("temporary").await;
    let note = test_db
        .create_note(&format!("tagged {}", Uuid::new_v4()), "", &["keep", tag.id()])
        .await;

    test_db.db.tags.delete(tag.id()).await.unwrap();
    test_db.db.tags.delete(tag.id()).await.unwrap();

    assert!(test_db.db.tags.find_by_id(tag.id()).await.unwrap().is_none());
    let fetched = test_db.db.notes.find_by_id(note.id()).await.unwrap().unwrap();
    assert_eq!(fetched.tags(), ["keep"]);

    test_db.cleanup().await;
}

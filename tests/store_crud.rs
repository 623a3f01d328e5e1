#![allow(missing_docs)]

use std::path::PathBuf;

use bytes::Bytes;
use stockroom::{InventoryError, InventoryItem, InventoryStore, ItemPatch, PhotoUpload};
use uuid::Uuid;

fn temp_root() -> PathBuf {
    std::env::temp_dir().join(format!("stockroom-test-{}", Uuid::new_v4()))
}

async fn cleanup(path: PathBuf) {
    let _ = tokio::fs::remove_dir_all(path).await;
}

fn upload(name: &str, content: &'static [u8]) -> PhotoUpload {
    PhotoUpload::new(Some(name.to_owned()), Bytes::from_static(content))
}

#[tokio::test]
async fn create_assigns_unique_ids_and_round_trips() {
    let root = temp_root();
    let store = InventoryStore::new(&root);

    let first = store
        .create("Desk Lamp", "warm light", None)
        .await
        .expect("first create should succeed");
    let second = store
        .create("Chair", "", None)
        .await
        .expect("second create should succeed");
    assert_ne!(first.id, second.id);

    let items = store.list().await.expect("list should succeed");
    assert_eq!(items, vec![first.clone(), second.clone()]);

    let fetched = store.get(&first.id).await.expect("get should succeed");
    assert_eq!(fetched, first);

    cleanup(root).await;
}

#[tokio::test]
async fn create_rejects_empty_name() {
    let root = temp_root();
    let store = InventoryStore::new(&root);

    let err = store
        .create("", "whatever", None)
        .await
        .expect_err("empty name should be rejected");
    assert!(matches!(err, InventoryError::Validation { .. }));

    let items = store.list().await.expect("list should succeed");
    assert!(items.is_empty());

    cleanup(root).await;
}

#[tokio::test]
async fn create_with_photo_derives_photo_url() {
    let root = temp_root();
    let store = InventoryStore::new(&root);

    let item = store
        .create("Desk Lamp", "", Some(upload("lamp.jpg", b"jpegbytes")))
        .await
        .expect("create should succeed");

    let filename = item
        .photo_filename
        .as_deref()
        .expect("photo should be bound");
    assert!(filename.ends_with(".jpg"));
    assert_eq!(
        item.photo_url.as_deref(),
        Some(format!("/inventory/{}/photo", item.id).as_str())
    );
    assert!(tokio::fs::try_exists(root.join(filename))
        .await
        .expect("try_exists should succeed"));

    cleanup(root).await;
}

#[tokio::test]
async fn update_applies_partial_patch() {
    let root = temp_root();
    let store = InventoryStore::new(&root);

    let item = store
        .create("Desk Lamp", "warm light", None)
        .await
        .expect("create should succeed");

    let updated = store
        .update(
            &item.id,
            ItemPatch {
                name: None,
                description: Some(String::new()),
            },
        )
        .await
        .expect("update should succeed");
    assert_eq!(updated.name, "Desk Lamp");
    assert_eq!(updated.description, "");

    // An empty replacement name is ignored rather than applied.
    let updated = store
        .update(
            &item.id,
            ItemPatch {
                name: Some(String::new()),
                description: Some("cool light".to_owned()),
            },
        )
        .await
        .expect("update should succeed");
    assert_eq!(updated.name, "Desk Lamp");
    assert_eq!(updated.description, "cool light");

    let updated = store
        .update(
            &item.id,
            ItemPatch {
                name: Some("Office Lamp".to_owned()),
                description: None,
            },
        )
        .await
        .expect("update should succeed");
    assert_eq!(updated.name, "Office Lamp");
    assert_eq!(updated.description, "cool light");

    cleanup(root).await;
}

#[tokio::test]
async fn operations_on_unknown_id_report_not_found() {
    let root = temp_root();
    let store = InventoryStore::new(&root);

    let get_err = store.get("missing").await.expect_err("get should fail");
    assert!(matches!(get_err, InventoryError::ItemNotFound { .. }));

    let update_err = store
        .update("missing", ItemPatch::default())
        .await
        .expect_err("update should fail");
    assert!(matches!(update_err, InventoryError::ItemNotFound { .. }));

    let delete_err = store.delete("missing").await.expect_err("delete should fail");
    assert!(matches!(delete_err, InventoryError::ItemNotFound { .. }));

    // The unknown id wins over the missing payload for photo replacement.
    let replace_err = store
        .replace_photo("missing", None)
        .await
        .expect_err("replace should fail");
    assert!(matches!(replace_err, InventoryError::ItemNotFound { .. }));

    cleanup(root).await;
}

#[tokio::test]
async fn delete_removes_record() {
    let root = temp_root();
    let store = InventoryStore::new(&root);

    let item = store
        .create("Chair", "", None)
        .await
        .expect("create should succeed");
    let removed_id = store.delete(&item.id).await.expect("delete should succeed");
    assert_eq!(removed_id, item.id);

    let items = store.list().await.expect("list should succeed");
    assert!(items.is_empty());

    cleanup(root).await;
}

#[tokio::test]
async fn delete_succeeds_when_bound_file_already_absent() {
    let root = temp_root();
    let store = InventoryStore::new(&root);

    let item = store
        .create("Desk Lamp", "", Some(upload("lamp.png", b"pngbytes")))
        .await
        .expect("create should succeed");
    let filename = item
        .photo_filename
        .as_deref()
        .expect("photo should be bound");
    tokio::fs::remove_file(root.join(filename))
        .await
        .expect("file should be removable out of band");

    store
        .delete(&item.id)
        .await
        .expect("delete should succeed despite the missing file");

    cleanup(root).await;
}

#[tokio::test]
async fn persists_across_store_instances() {
    let root = temp_root();

    let created = {
        let store = InventoryStore::new(&root);
        store
            .create("Desk Lamp", "warm light", None)
            .await
            .expect("create should succeed")
    };

    let reopened = InventoryStore::new(&root);
    let items = reopened.list().await.expect("list should succeed");
    assert_eq!(items, vec![created]);

    cleanup(root).await;
}

#[tokio::test]
async fn missing_document_is_an_empty_collection() {
    let root = temp_root();
    let store = InventoryStore::new(&root);

    let items = store.list().await.expect("list should succeed");
    assert!(items.is_empty());

    cleanup(root).await;
}

#[tokio::test]
async fn corrupt_document_is_treated_as_empty() {
    let root = temp_root();
    tokio::fs::create_dir_all(&root)
        .await
        .expect("cache dir should be creatable");
    tokio::fs::write(root.join("inventory.json"), b"{not json")
        .await
        .expect("corrupt document should be writable");

    let store = InventoryStore::new(&root);
    let items = store.list().await.expect("list should succeed");
    assert!(items.is_empty());

    // A mutation starts fresh over the corrupt document.
    let item = store
        .create("Chair", "", None)
        .await
        .expect("create should succeed");
    let raw = tokio::fs::read(store.document_path())
        .await
        .expect("document should be readable");
    let parsed: Vec<InventoryItem> =
        serde_json::from_slice(&raw).expect("document should parse after rewrite");
    assert_eq!(parsed, vec![item]);

    cleanup(root).await;
}

#[tokio::test]
async fn concurrent_creates_are_not_lost() {
    let root = temp_root();
    let store = std::sync::Arc::new(InventoryStore::new(&root));

    let mut handles = Vec::new();
    for index in 0..8 {
        let store = std::sync::Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.create(&format!("item-{index}"), "", None).await
        }));
    }
    for handle in handles {
        handle
            .await
            .expect("task should finish")
            .expect("create should succeed");
    }

    let items = store.list().await.expect("list should succeed");
    assert_eq!(items.len(), 8);

    cleanup(root).await;
}

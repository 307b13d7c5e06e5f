//! Integration tests for the file-backed slot.

use cart_store::{CART_SLOT_KEY, CartSlot, FileSlot, PersistedCart};
use tempfile::TempDir;

#[tokio::test]
async fn read_before_first_write_is_none() {
    let dir = TempDir::new().unwrap();
    let slot = FileSlot::new(dir.path().join("missing-subdir"));

    assert!(slot.read(CART_SLOT_KEY).await.unwrap().is_none());
}

#[tokio::test]
async fn write_creates_directory_and_persists_blob() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("nested").join("profile");
    let slot = FileSlot::new(&root);

    slot.write(CART_SLOT_KEY, r#"{"hello":"world"}"#).await.unwrap();

    let on_disk = std::fs::read_to_string(root.join("sweet-shop-cart.json")).unwrap();
    assert_eq!(on_disk, r#"{"hello":"world"}"#);
    assert!(!root.join("sweet-shop-cart.json.tmp").exists());
}

#[tokio::test]
async fn value_survives_a_new_slot_instance() {
    let dir = TempDir::new().unwrap();

    let blob = PersistedCart::new(vec![1u32, 2, 3]).encode().unwrap();
    FileSlot::new(dir.path())
        .write(CART_SLOT_KEY, &blob)
        .await
        .unwrap();

    let reopened = FileSlot::new(dir.path());
    let read = reopened.read(CART_SLOT_KEY).await.unwrap().unwrap();
    let decoded: PersistedCart<Vec<u32>> = PersistedCart::decode(&read).unwrap();
    assert_eq!(decoded.into_cart(), vec![1, 2, 3]);
}

#[tokio::test]
async fn invalid_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let slot = FileSlot::new(dir.path());

    assert!(slot.write("../escape", "x").await.is_err());
}

//! PostgreSQL credential store tests
//!
//! Skipped unless `TEST_DATABASE_URL` is set.

use std::collections::BTreeSet;

use assert_matches::assert_matches;
use serial_test::serial;

use opsdesk::backend::auth::{CredentialStore, NewIdentity, StoreError};
use opsdesk::shared::{Permission, Role};

use crate::common::database::test_store;

fn new_identity(email: &str) -> NewIdentity {
    NewIdentity {
        email: email.to_string(),
        display_name: "Store Test".to_string(),
        secret_hash: "$2b$04$abcdefghijklmnopqrstuu5Y1oQf6Xk0r6m1tJb4t4u7cY5H0dQe".to_string(),
        roles: Role::defaults(),
        permissions: Permission::defaults(),
        area: "default".to_string(),
    }
}

#[tokio::test]
#[serial]
async fn test_create_and_find() {
    let Some(store) = test_store().await else {
        return;
    };

    let created = store.create(new_identity("pg@ops.local")).await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.roles, Role::defaults());

    let by_email = store.find_by_email("pg@ops.local").await.unwrap();
    assert_eq!(by_email.map(|i| i.id), Some(1));

    let by_id = store.find_by_id(1).await.unwrap().expect("identity 1");
    assert_eq!(by_id.email, "pg@ops.local");
    assert!(store.find_by_id(2).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_duplicate_email() {
    let Some(store) = test_store().await else {
        return;
    };

    store.create(new_identity("dup@ops.local")).await.unwrap();
    let result = store.create(new_identity("dup@ops.local")).await;
    assert_matches!(result, Err(StoreError::DuplicateEmail(email)) if email == "dup@ops.local");
}

#[tokio::test]
#[serial]
async fn test_update_tags() {
    let Some(store) = test_store().await else {
        return;
    };

    let id = store.create(new_identity("tags@ops.local")).await.unwrap().id;

    let roles = BTreeSet::from([Role::Driver, Role::User]);
    let updated = store.update_roles(id, &roles).await.unwrap();
    assert_eq!(updated.roles, roles);

    let permissions = BTreeSet::from([Permission::ViewRoutes, Permission::ManageFleet]);
    let updated = store.update_permissions(id, &permissions).await.unwrap();
    assert_eq!(updated.permissions, permissions);
    assert_eq!(updated.roles, roles);

    assert_matches!(
        store.update_roles(id + 100, &roles).await,
        Err(StoreError::NotFound(missing)) if missing == id + 100
    );
}

#[tokio::test]
#[serial]
async fn test_list_in_id_order() {
    let Some(store) = test_store().await else {
        return;
    };

    for email in ["a@ops.local", "b@ops.local", "c@ops.local"] {
        store.create(new_identity(email)).await.unwrap();
    }
    let ids: Vec<i64> = store.list().await.unwrap().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

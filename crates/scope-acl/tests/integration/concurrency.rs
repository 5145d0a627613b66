//! Many tasks sharing one store.

use std::sync::Arc;

use crate::common::unique_ids;
use scope_acl::{Acl, Error, Permission};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_register_is_unique() {
    let acl = Arc::new(Acl::default());
    let mut handles = Vec::new();

    for _ in 0..16 {
        let acl = Arc::clone(&acl);
        handles.push(tokio::spawn(async move { acl.register_user("shared") }));
    }

    let mut ok = 0;
    let mut exists = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => ok += 1,
            Err(Error::UserAlreadyExists(_)) => exists += 1,
            Err(e) => unreachable!("unexpected error: {e}"),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(exists, 15);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_insert_reports_each_grant_once() {
    let acl = Arc::new(Acl::default());
    acl.register_user("shared").unwrap();
    let perms = [
        Permission::LIST,
        Permission::READ,
        Permission::WRITE,
        Permission::EXECUTE,
        Permission::DELETE,
    ];

    let mut handles = Vec::new();
    for _ in 0..32 {
        let acl = Arc::clone(&acl);
        handles.push(tokio::spawn(async move { acl.insert("shared", &perms) }));
    }

    let mut added = Vec::new();
    for handle in handles {
        added.extend(handle.await.unwrap().unwrap());
    }
    added.sort();
    let mut expected = perms.to_vec();
    expected.sort();
    assert_eq!(added, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_independent_users() {
    let acl = Arc::new(Acl::empty());
    let ids = unique_ids(24);

    let mut handles = Vec::new();
    for id in ids.clone() {
        let acl = Arc::clone(&acl);
        handles.push(tokio::spawn(async move {
            acl.register_user(&id)?;
            acl.insert(&id, &[Permission::READ, Permission::WRITE])?;
            acl.remove(&id, &[Permission::WRITE])?;
            acl.check(&id, &[Permission::READ, Permission::WRITE])
        }));
    }

    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        assert_eq!(outcome.was_set, vec![Permission::READ]);
        assert_eq!(outcome.not_set, vec![Permission::WRITE]);
    }
    assert_eq!(acl.len(), ids.len());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_remove_reports_each_revoke_once() {
    let acl = Arc::new(Acl::default());
    acl.register_user("shared").unwrap();
    acl.insert("shared", &[Permission::DELETE]).unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let acl = Arc::clone(&acl);
        handles.push(tokio::spawn(async move {
            acl.remove("shared", &[Permission::DELETE])
        }));
    }

    let mut removed = 0;
    for handle in handles {
        removed += handle.await.unwrap().unwrap().removed.len();
    }
    assert_eq!(removed, 1);
}

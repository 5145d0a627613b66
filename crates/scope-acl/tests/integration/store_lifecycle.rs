//! Register, grant, check, revoke, and render through one store.

use crate::common::{acl_with, all_units, unique_ids};
use scope_acl::{Acl, Error, Permission};

#[test]
fn test_full_lifecycle() {
    let acl = Acl::default();
    let uid = "pronto";
    let perms = [Permission::READ, Permission::WRITE, Permission::DELETE];

    assert!(acl.insert(uid, &perms).unwrap_err().is_lookup_miss());
    assert!(acl.remove(uid, &perms).unwrap_err().is_lookup_miss());

    acl.register_user(uid).unwrap();
    assert_eq!(acl.insert(uid, &perms).unwrap(), perms.to_vec());
    assert_eq!(acl.to_string(), "pronto-delete|read|write");

    let outcome = acl.remove(uid, &perms).unwrap();
    assert_eq!(outcome.removed, perms.to_vec());
    assert!(outcome.not_removed.is_empty());
    assert_eq!(acl.to_string(), "pronto");

    acl.deregister_user(uid).unwrap();
    assert_eq!(acl.to_string(), "");
    assert!(acl.is_initialized());
}

#[test]
fn test_parsed_store_accepts_mutation() {
    let acl = Acl::parse("public-read:private-execute").into_result().unwrap();

    acl.register_user("auditor").unwrap();
    acl.insert("auditor", &[Permission::LIST]).unwrap();
    acl.insert("public", &[Permission::READ, Permission::LIST])
        .unwrap();
    acl.remove("private", &[Permission::EXECUTE]).unwrap();

    assert_eq!(
        acl.to_string(),
        "auditor-list\nprivate\npublic-list|read"
    );
}

#[test]
fn test_many_users_all_permissions() {
    let ids = unique_ids(20);
    let units = all_units();
    let acl = acl_with(&ids, &units);

    assert_eq!(acl.len(), 20);
    for id in &ids {
        let outcome = acl.check(id, &units).unwrap();
        assert!(outcome.all_set());
        assert_eq!(outcome.was_set, units);
    }

    for id in &ids {
        acl.deregister_user(id).unwrap();
        assert_eq!(
            acl.check(id, &units),
            Err(Error::UserDoesNotExist(id.clone()))
        );
    }
    assert!(acl.is_empty());
}

#[test]
fn test_inserted_composite_matches_parsed_grant() {
    let parsed = Acl::parse("ops-read|write\nidle-none").into_result().unwrap();

    let acl = Acl::empty();
    acl.register_user("ops").unwrap();
    acl.register_user("idle").unwrap();
    let both = Permission::READ | Permission::WRITE;
    assert_eq!(
        acl.insert("ops", &[both]).unwrap(),
        vec![Permission::READ, Permission::WRITE]
    );
    assert!(acl.insert("idle", &[Permission::NONE]).unwrap().is_empty());

    assert_eq!(acl.snapshot(), parsed.snapshot());
    assert_eq!(acl.to_string(), parsed.to_string());
    assert!(acl.check("ops", &[Permission::READ]).unwrap().all_set());
    assert!(parsed.check("ops", &[both]).unwrap().all_set());
}

#[test]
fn test_scope_normalization_on_lookup() {
    let acl = Acl::default();
    acl.register_user("  team : red ").unwrap();
    assert!(acl.contains_user("team:red"));
    assert_eq!(
        acl.register_user("team::red"),
        Err(Error::UserAlreadyExists("team:red".into()))
    );
    acl.insert("team:red", &[Permission::EXECUTE]).unwrap();
    assert!(
        acl.check(" team:red", &[Permission::EXECUTE])
            .unwrap()
            .all_set()
    );
}

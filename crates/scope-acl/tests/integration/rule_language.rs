//! Building stores from rule text and rendering them back.

use scope_acl::rules::RULE_SEPARATOR;
use scope_acl::{Acl, Error, NIL_ACL, Permission, render_acl};

#[test]
fn test_empty_text_builds_empty_store() {
    let parsed = Acl::parse("");
    assert!(parsed.is_clean());
    let acl = parsed.into_value();
    assert!(acl.is_initialized());
    assert!(acl.is_empty());
}

#[test]
fn test_grouping_yields_distinct_keys() {
    let acl = Acl::parse("public:organization:private:group:group-execute|read|write")
        .into_result()
        .unwrap();
    assert_eq!(acl.len(), 4);
    let outcome = acl
        .check(
            "group",
            &[Permission::EXECUTE, Permission::READ, Permission::WRITE],
        )
        .unwrap();
    assert!(outcome.all_set());
}

#[test]
fn test_bad_tokens_still_build_store() {
    for text in [
        "private-executex:organization-user:organization:user",
        "public-w|r|x:private-exec:private-------------xm:pub",
    ] {
        let (acl, errors) = Acl::parse(text).into_parts();
        let errors = errors.expect("expected token errors");
        assert!(errors.iter().all(Error::is_token_error));
        assert!(!acl.is_empty(), "{text}");
    }
}

#[test]
fn test_render_reparse_identity() {
    let cases = [
        "private-execute:organization:organization:public-read|write|execute|list",
        "public-write|read|execute:private-execute:private:public",
        "public:organization:private:group:group-execute|read|write:::::::::::::::",
    ];

    for text in cases {
        let original = Acl::parse(text).into_result().unwrap();
        let rendered = original.to_string();
        assert!(!rendered.is_empty());

        let reparsed = Acl::parse(&rendered).into_result().unwrap();
        assert_eq!(reparsed.snapshot(), original.snapshot(), "{text}");
        assert_eq!(reparsed.to_string(), rendered);
    }
}

#[test]
fn test_render_is_deterministic() {
    let text = "zeta-write|read\nalpha-delete|list\nmid";
    let first = Acl::parse(text).into_value().to_string();
    for _ in 0..10 {
        assert_eq!(Acl::parse(text).into_value().to_string(), first);
    }
    let lines: Vec<&str> = first.split(RULE_SEPARATOR).collect();
    assert_eq!(lines, vec!["alpha-delete|list", "mid", "zeta-read|write"]);
}

#[test]
fn test_render_absent_store() {
    assert_eq!(render_acl(None), NIL_ACL);
    assert_eq!(render_acl(Some(&Acl::default())), "");
}

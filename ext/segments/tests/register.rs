//! Registration outcomes: stores, duplicates, conflicts, optional expansion.

use serde_json::json;
use waymark::{Router, RouterError};
use waymark_segments::defaults;

fn router() -> Router {
    Router::builder()
        .grammars(defaults())
        .build()
        .expect("default grammars validate")
}

#[test]
fn empty_pattern_is_rejected() {
    let mut router = router();
    assert_eq!(router.register("").unwrap_err(), RouterError::EmptyPath);
}

#[test]
fn registration_returns_a_writable_store() {
    let mut router = router();
    let store = router.register("/users/:id").unwrap();
    store.set("handler", "get_user");

    let matched = router.match_path("/users/7").unwrap();
    assert_eq!(matched.get("handler"), Some(json!("get_user")));
}

#[test]
fn duplicate_static_registration_fails() {
    let mut router = router();
    router.register("/test/a").unwrap();
    assert_eq!(
        router.register("/test/a").unwrap_err(),
        RouterError::AlreadyRegistered {
            path: "/test/a".to_string()
        }
    );
}

#[test]
fn duplicate_dynamic_registration_fails() {
    let mut router = router();
    router.register("/user/:id").unwrap();
    assert_eq!(
        router.register("/user/:id").unwrap_err(),
        RouterError::AlreadyRegistered {
            path: "/user/:id".to_string()
        }
    );
}

#[test]
fn same_grammar_different_param_name_conflicts() {
    let mut router = router();
    router.register("/a/:id/:id2").unwrap();

    let err = router.register("/a/:other/:id2").unwrap_err();
    assert_eq!(
        err,
        RouterError::SegmentConflict {
            segment: ":other".to_string(),
            grammar_id: "param".to_string(),
        }
    );
}

#[test]
fn exact_redefinition_reuses_the_branch() {
    let mut router = router();
    router.register("/a/:id").unwrap();
    // Same grammar, same name at the same position: shared subtree, no error.
    router.register("/a/:id/sub").unwrap();

    assert!(router.match_path("/a/1").is_some());
    assert!(router.match_path("/a/1/sub").is_some());
}

#[test]
fn wildcard_must_be_terminal() {
    let mut router = router();
    assert_eq!(
        router.register("/test/*/test").unwrap_err(),
        RouterError::WildcardNotLast {
            segment: "*".to_string()
        }
    );
}

#[test]
fn unclaimed_segment_without_grammars() {
    let mut bare = Router::new();
    assert_eq!(
        bare.register("/user/:id").unwrap_err(),
        RouterError::NoGrammarMatches {
            segment: ":id".to_string()
        }
    );
    // Static registration still works on a grammar-less router.
    bare.register("/user").unwrap();
    assert!(bare.match_path("/user").is_some());
}

#[test]
fn optional_expansion_shares_one_store() {
    let mut router = router();
    let shared = router.register("/a/:x?/:y?/b").unwrap();
    shared.set("handler", "shared");

    // All four combinations resolve, all exposing the shared handler.
    for path in ["/a/b", "/a/1/b", "/a/1/2/b"] {
        let matched = router.match_path(path).unwrap();
        assert_eq!(matched.get("handler"), Some(json!("shared")), "{path}");
    }

    // Writes attached after registration are visible everywhere too.
    shared.set("later", true);
    assert_eq!(
        router.match_path("/a/b").unwrap().get("later"),
        Some(json!(true))
    );
}

#[test]
fn optional_expansion_generates_exactly_the_mask_combinations() {
    let mut router = router();
    router.register("/a/:x?/:y?/b").unwrap();

    let routes = router.routes();
    let mut paths: Vec<&str> = routes.iter().map(|r| r.path.as_str()).collect();
    paths.sort_unstable();
    assert_eq!(paths, vec!["/a/:x?/:y?/b", "/a/:x?/b", "/a/:y?/b", "/a/b"]);
}

#[test]
fn optional_expansion_collapsing_to_root() {
    let mut router = router();
    router.register("/:a?").unwrap();

    // Mask 0 drops the only segment: the root path itself is registered.
    assert!(router.match_path("/").is_some());
    let matched = router.match_path("/value").unwrap();
    assert_eq!(matched.param("a"), Some("value"));
}

#[test]
fn match_result_writes_do_not_alias_registrations() {
    let mut router = router();
    let shared = router.register("/a/:x?/b").unwrap();
    shared.set("handler", "shared");

    let mut matched = router.match_path("/a/b").unwrap();
    matched.set("handler", "decorated");
    assert_eq!(matched.get("handler"), Some(json!("decorated")));

    // Neither the shared store nor the other combination sees the write.
    assert_eq!(shared.get("handler"), Some(json!("shared")));
    assert_eq!(
        router.match_path("/a/1/b").unwrap().get("handler"),
        Some(json!("shared"))
    );
}

#[test]
fn static_layers_over_a_shared_store_stay_private() {
    let mut router = router();
    let shared = router.register("/opt/:x?").unwrap();

    // "/opt" landed in the static index as a layer over the shared store.
    let static_entry = router
        .routes()
        .into_iter()
        .find(|r| r.path == "/opt")
        .expect("static combination listed");
    static_entry.store.set("only_static", 1);

    assert_eq!(shared.get("only_static"), None);
    assert_eq!(
        router.match_path("/opt").unwrap().get("only_static"),
        Some(json!(1))
    );
    assert_eq!(router.match_path("/opt/x").unwrap().get("only_static"), None);
}

#[test]
fn trailing_slash_registers_as_dynamic_tree_literal() {
    let mut router = router();
    // Not static (trailing slash), not optional: walks the tree as a
    // literal segment chain.
    router.register("/users/").unwrap();

    // The tree walk drops empty segments, so every slash spelling resolves
    // through the same literal node.
    assert!(router.match_path("/users/").is_some());
    assert!(router.match_path("/users").is_some());
    assert!(router.match_path("users").is_some());
}

//! Combined-grammar scenarios: overlapping routes, deep optionals, and the
//! interaction of priority with shared tree positions.

use waymark::Router;
use waymark_segments::defaults;

fn router() -> Router {
    Router::builder()
        .grammars(defaults())
        .build()
        .expect("default grammars validate")
}

#[test]
fn multiple_regex_parameters() {
    let mut router = router();
    router.register("/api/versions/:version<v\\d+>").unwrap();
    router.register("/api/ids/:id<[a-f0-9]{8}>").unwrap();

    assert_eq!(
        router.match_path("/api/versions/v1").unwrap().param("version"),
        Some("v1")
    );
    assert_eq!(
        router.match_path("/api/ids/abcd1234").unwrap().param("id"),
        Some("abcd1234")
    );
    assert!(router.match_path("/api/versions/version1").is_none());
    assert!(router.match_path("/api/ids/12345").is_none());
}

#[test]
fn ultra_complex_route() {
    let mut router = router();
    router
        .register(
            "/api/:version<v\\d+>/region(us|eu|asia)?/:resource/:id<[a-f0-9]{8}>\
             /type(basic|premium|enterprise)?/:action?/*",
        )
        .unwrap();

    let matched = router
        .match_path("/api/v2/regioneu/users/abcd1234/typepremium/update/settings/profile")
        .unwrap();
    assert_eq!(matched.param("version"), Some("v2"));
    assert_eq!(matched.param("resource"), Some("users"));
    assert_eq!(matched.param("id"), Some("abcd1234"));
    assert_eq!(matched.param("action"), Some("update"));
    assert_eq!(matched.param("*"), Some("settings/profile"));

    let matched = router
        .match_path("/api/v1/regionus/services/abcd1234/typeenterprise/details/advanced")
        .unwrap();
    assert_eq!(matched.param("version"), Some("v1"));
    assert_eq!(matched.param("resource"), Some("services"));
    assert_eq!(matched.param("*"), Some("advanced"));

    assert!(router
        .match_path("/api/version1/regionus/users/abcd1234/typebasic/view")
        .is_none());
    assert!(router
        .match_path("/api/v1/regionca/users/abcd1234/typebasic/view")
        .is_none());
    assert!(router
        .match_path("/api/v1/regionus/users/123/typebasic/view")
        .is_none());
}

#[test]
fn extension_with_surrounding_optionals() {
    let mut router = router();
    router
        .register("/files/:category?/:filename.json/:version?")
        .unwrap();

    let matched = router.match_path("/files/reports/data.json/v2").unwrap();
    assert_eq!(matched.param("category"), Some("reports"));
    assert_eq!(matched.param("filename"), Some("data"));
    assert_eq!(matched.param("version"), Some("v2"));

    let matched = router.match_path("/files/config.json/v3").unwrap();
    assert_eq!(matched.param("category"), None);
    assert_eq!(matched.param("filename"), Some("config"));
    assert_eq!(matched.param("version"), Some("v3"));

    let matched = router.match_path("/files/export.json").unwrap();
    assert_eq!(matched.param("filename"), Some("export"));

    assert!(router.match_path("/files/config.pdf/v1").is_none());
}

#[test]
fn separate_optional_and_regex_parameters() {
    let mut router = router();
    router.register("/api/:resource/:id<\\d+>").unwrap();
    router.register("/api/:resource/:action?").unwrap();

    let matched = router.match_path("/api/users/123").unwrap();
    assert_eq!(matched.param("resource"), Some("users"));
    assert_eq!(matched.param("id"), Some("123"));

    let matched = router.match_path("/api/settings").unwrap();
    assert_eq!(matched.param("resource"), Some("settings"));

    // The regex branch rejects non-digits, so the optional branch catches it.
    let matched = router.match_path("/api/users/abc").unwrap();
    assert_eq!(matched.param("action"), Some("abc"));
}

#[test]
fn wildcard_after_other_parameter_types() {
    let mut router = router();
    router
        .register("/:section/:subsection/:id<\\d+>/:action?/*")
        .unwrap();

    let matched = router
        .match_path("/admin/users/123/edit/roles/permissions")
        .unwrap();
    assert_eq!(matched.param("section"), Some("admin"));
    assert_eq!(matched.param("subsection"), Some("users"));
    assert_eq!(matched.param("id"), Some("123"));
    assert_eq!(matched.param("action"), Some("edit"));
    assert_eq!(matched.param("*"), Some("roles/permissions"));

    // Wildcard with nothing left to consume: miss.
    assert!(router.match_path("/admin/users/123/edit").is_none());
    // Regex branch commits nothing for a non-numeric id: miss.
    assert!(router.match_path("/admin/users/abc/edit/extra").is_none());
}

#[test]
fn deeply_nested_optionals() {
    let mut router = router();
    router.register("/deep/:p1?/:p2?/:p3?/:p4?/:p5?").unwrap();

    let matched = router.match_path("/deep/a/b/c/d/e").unwrap();
    assert_eq!(matched.param("p1"), Some("a"));
    assert_eq!(matched.param("p5"), Some("e"));

    // Fewer segments fill the earliest optional branches first.
    let matched = router.match_path("/deep/a/e").unwrap();
    assert_eq!(matched.param("p1"), Some("a"));
    assert_eq!(matched.param("p2"), Some("e"));

    let matched = router.match_path("/deep/only").unwrap();
    assert_eq!(matched.param("p1"), Some("only"));

    assert!(router.match_path("/deep").is_some());
}

#[test]
fn overlapping_route_definitions() {
    let mut router = router();
    router.register("/overlap/:param1/static/:param2").unwrap();
    router.register("/overlap/:param1/static/special").unwrap();
    router.register("/overlap/:param1/:param2/end").unwrap();
    router.register("/overlap/fixed/:param2/end").unwrap();
    router.register("/overlap/*").unwrap();

    assert!(router.match_path("/overlap/value1/static/special").is_some());

    let matched = router.match_path("/overlap/value1/static/value2").unwrap();
    assert_eq!(matched.param("param1"), Some("value1"));
    assert_eq!(matched.param("param2"), Some("value2"));

    let matched = router.match_path("/overlap/fixed/value2/end").unwrap();
    assert_eq!(matched.param("param2"), Some("value2"));

    let matched = router.match_path("/overlap/value1/value2/end").unwrap();
    assert_eq!(matched.param("param1"), Some("value1"));
    assert_eq!(matched.param("param2"), Some("value2"));
}

#[test]
fn literal_and_regex_and_param_share_a_position() {
    let mut router = router();
    router.register("/content/:type/special").unwrap();
    router.register("/content/:type/:id<\\d+>").unwrap();
    router.register("/content/:type/:slug").unwrap();

    let matched = router.match_path("/content/articles/special").unwrap();
    assert_eq!(matched.param("type"), Some("articles"));
    assert_eq!(matched.param("id"), None);
    assert_eq!(matched.param("slug"), None);

    let matched = router.match_path("/content/products/123").unwrap();
    assert_eq!(matched.param("id"), Some("123"));

    let matched = router.match_path("/content/pages/about-us").unwrap();
    assert_eq!(matched.param("slug"), Some("about-us"));
}

#[test]
fn no_backtracking_across_committed_branches() {
    let mut router = router();
    // Registered alone, the optional branch intercepts the first segment;
    // the required `:p` then needs a second segment.
    router.register("/u/:id?/:p").unwrap();

    assert!(router.match_path("/u/123").is_none());

    let matched = router.match_path("/u/123/john").unwrap();
    assert_eq!(matched.param("id"), Some("123"));
    assert_eq!(matched.param("p"), Some("john"));
}

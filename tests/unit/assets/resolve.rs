use super::*;
use crate::assets::namespace::{MapNamespace, PrefixNamespace};

fn no_assets(_: &str) -> Option<String> {
    None
}

#[test]
fn absolute_paths_and_schemed_uris_pass_through() {
    assert_eq!(resolve_uri("/a/b.png", &no_assets).as_deref(), Some("/a/b.png"));
    assert_eq!(
        resolve_uri("scheme://host/x", &no_assets).as_deref(),
        Some("scheme://host/x")
    );
    assert_eq!(
        resolve_reference("https://cdn/x.mp3", &PrefixNamespace::flutter()),
        Resolution::AlreadyResolved
    );
}

#[test]
fn scheme_separator_anywhere_counts_as_resolved() {
    assert!(is_resolved("C://dir/file.png"));
    assert!(is_resolved("weird name ://x"));
    assert!(!is_resolved("C:\\dir\\file.png"));
    assert!(!is_resolved("stickers/cat.png"));
}

#[test]
fn bare_names_go_through_the_namespace() {
    let ns = MapNamespace::new().with("cat.png", "bundle:///cat.png");
    assert_eq!(
        resolve_reference("cat.png", &ns),
        Resolution::Bundled("bundle:///cat.png".to_string())
    );
    assert_eq!(resolve_reference("dog.png", &ns), Resolution::Missing);
    assert_eq!(resolve_uri("dog.png", &ns), None);
}

#[test]
fn resolution_is_idempotent() {
    let ns = PrefixNamespace::flutter();
    let once = resolve_uri("fonts/a.ttf", &ns).unwrap();
    assert_eq!(once, "asset:///flutter_assets/fonts/a.ttf");
    assert_eq!(resolve_uri(&once, &ns).unwrap(), once);
}

#[test]
fn closures_are_namespaces() {
    let ns = |name: &str| Some(format!("mem://{name}"));
    assert_eq!(resolve_uri("x", &ns).as_deref(), Some("mem://x"));
}

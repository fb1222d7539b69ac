use super::*;
use crate::assets::namespace::{MapNamespace, PrefixNamespace};
use serde_json::json;

fn tree(v: serde_json::Value) -> Mapping {
    match ConfigNode::from(v) {
        ConfigNode::Mapping(m) => m,
        other => panic!("expected mapping, got {}", other.kind_name()),
    }
}

fn value(root: &Mapping) -> serde_json::Value {
    serde_json::Value::from(ConfigNode::Mapping(root.clone()))
}

fn bundle() -> MapNamespace {
    MapNamespace::new()
        .with("cat.png", "bundle:///cat.png")
        .with("s.png", "bundle:///s.png")
        .with("wm.png", "bundle:///wm.png")
}

#[test]
fn sticker_categories_and_items_are_rewritten() {
    let resolver = ConfigResolver::new(bundle());
    let mut root = tree(json!({
        "sticker": {"categories": [{
            "identifier": "pack",
            "thumbnailURI": "cat.png",
            "items": [{"identifier": "s", "thumbnailURI": "cat.png", "stickerURI": "s.png"}]
        }]}
    }));
    let stats = resolver.resolve(&mut root);
    assert_eq!(
        value(&root),
        json!({
            "sticker": {"categories": [{
                "identifier": "pack",
                "thumbnailURI": "bundle:///cat.png",
                "items": [{
                    "identifier": "s",
                    "thumbnailURI": "bundle:///cat.png",
                    "stickerURI": "bundle:///s.png"
                }]
            }]}
        })
    );
    assert_eq!(stats.families_visited, 1);
    assert_eq!(stats.fields_resolved, 3);
    assert_eq!(stats.fields_cleared, 0);
}

#[test]
fn unresolved_font_is_nulled_not_an_error() {
    let resolver = ConfigResolver::new(bundle());
    let mut root = tree(json!({"text": {"fonts": [{"identifier": "f", "fontURI": "missing.png"}]}}));
    let stats = resolver.resolve(&mut root);
    assert_eq!(
        value(&root),
        json!({"text": {"fonts": [{"identifier": "f", "fontURI": null}]}})
    );
    assert_eq!(stats.fields_cleared, 1);
}

#[test]
fn remove_policy_deletes_unresolved_fields() {
    let resolver = ConfigResolver::new(bundle()).with_unresolved(UnresolvedPolicy::Remove);
    let mut root = tree(json!({"text": {"fonts": [{"identifier": "f", "fontURI": "missing.png"}]}}));
    resolver.resolve(&mut root);
    assert_eq!(value(&root), json!({"text": {"fonts": [{"identifier": "f"}]}}));
}

#[test]
fn watermark_is_a_single_mapping() {
    let resolver = ConfigResolver::new(bundle());
    let mut root = tree(json!({"watermark": {"watermarkURI": "wm.png", "size": 0.2}}));
    let stats = resolver.resolve(&mut root);
    assert_eq!(
        value(&root),
        json!({"watermark": {"watermarkURI": "bundle:///wm.png", "size": 0.2}})
    );
    assert_eq!(stats.families_visited, 1);
}

#[test]
fn unexpected_shapes_skip_the_family() {
    let resolver = ConfigResolver::new(PrefixNamespace::flutter());
    let original = json!({
        "watermark": [{"watermarkURI": "wm.png"}],
        "sticker": {"categories": {"thumbnailURI": "cat.png"}},
        "overlay": {"items": "nope"},
        "text": "plain"
    });
    let mut root = tree(original.clone());
    let stats = resolver.resolve(&mut root);
    assert_eq!(value(&root), original);
    assert_eq!(stats, ResolveStats::default());
}

#[test]
fn non_mapping_entries_and_non_string_fields_are_left_alone() {
    let resolver = ConfigResolver::new(PrefixNamespace::flutter());
    let mut root = tree(json!({
        "overlay": {"items": [
            "just-a-string",
            {"overlayURI": 5, "thumbnailURI": null},
            {"overlayURI": "o.png"}
        ]}
    }));
    resolver.resolve(&mut root);
    assert_eq!(
        value(&root),
        json!({
            "overlay": {"items": [
                "just-a-string",
                {"overlayURI": 5, "thumbnailURI": null},
                {"overlayURI": "asset:///flutter_assets/o.png"}
            ]}
        })
    );
}

#[test]
fn frame_image_groups_resolve_through_nested_key_paths() {
    let resolver = ConfigResolver::new(PrefixNamespace::new("res://"));
    let mut root = tree(json!({
        "frame": {"items": [{
            "thumbnailURI": "t.png",
            "imageGroups": {
                "top": {"startURI": "ts.png", "midURI": "tm.png", "endURI": "/abs/te.png"},
                "left": {"midURI": "lm.png"}
            }
        }]}
    }));
    let stats = resolver.resolve(&mut root);
    assert_eq!(
        value(&root),
        json!({
            "frame": {"items": [{
                "thumbnailURI": "res://t.png",
                "imageGroups": {
                    "top": {"startURI": "res://ts.png", "midURI": "res://tm.png", "endURI": "/abs/te.png"},
                    "left": {"midURI": "res://lm.png"}
                }
            }]}
        })
    );
    assert_eq!(stats.fields_resolved, 4);
    assert_eq!(stats.fields_unchanged, 1);
}

#[test]
fn filters_resolve_lut_but_not_item_thumbnails() {
    let resolver = ConfigResolver::new(PrefixNamespace::new("lut://"));
    let mut root = tree(json!({
        "filter": {"categories": [{
            "thumbnailURI": "c.png",
            "items": [{"lutURI": "l.png", "thumbnailURI": "i.png"}]
        }]}
    }));
    resolver.resolve(&mut root);
    let v = value(&root);
    let items = &v["filter"]["categories"][0]["items"][0];
    assert_eq!(items["lutURI"], "lut://l.png");
    assert_eq!(items["thumbnailURI"], "i.png");
}

#[test]
fn resolution_is_idempotent() {
    let resolver = ConfigResolver::new(PrefixNamespace::flutter());
    let mut root = tree(json!({
        "audio": {"categories": [{"thumbnailURI": "a.png", "items": [{"audioURI": "a.mp3"}]}]},
        "composition": {"categories": [{"items": [{"videoURI": "v.mp4", "thumbnailURI": "/v.png"}]}]},
        "watermark": {"watermarkURI": "https://cdn/wm.png"}
    }));
    resolver.resolve(&mut root);
    let once = root.clone();
    let stats = resolver.resolve(&mut root);
    assert_eq!(root, once);
    assert_eq!(stats.fields_resolved, 0);
    assert_eq!(stats.fields_cleared, 0);
}

#[test]
fn idempotent_after_clearing() {
    let resolver = ConfigResolver::new(bundle());
    let mut root = tree(json!({"text": {"fonts": [{"fontURI": "missing.ttf"}]}}));
    resolver.resolve(&mut root);
    let once = root.clone();
    resolver.resolve(&mut root);
    assert_eq!(root, once);
}

#[test]
fn absent_families_leave_tree_untouched() {
    let resolver = ConfigResolver::new(PrefixNamespace::flutter());
    let original = json!({
        "theme": "dark",
        "export": {"filename": "out", "image": {"exportType": "file-url"}},
        "tools": ["crop", "sticker"]
    });
    let mut root = tree(original.clone());
    let stats = resolver.resolve(&mut root);
    assert_eq!(value(&root), original);
    assert_eq!(stats.families_visited, 0);
}

#[test]
fn unknown_keys_next_to_assets_are_preserved() {
    let resolver = ConfigResolver::new(PrefixNamespace::flutter());
    let mut root = tree(json!({
        "custom": {"thumbnailURI": "x.png"},
        "audio": {"extra": 1, "categories": [{"items": [], "name": "n"}]}
    }));
    resolver.resolve(&mut root);
    assert_eq!(
        value(&root),
        json!({
            "custom": {"thumbnailURI": "x.png"},
            "audio": {"extra": 1, "categories": [{"items": [], "name": "n"}]}
        })
    );
}

#[test]
fn configured_extra_family_is_applied_after_builtins() {
    let cfg = ResolverConfig::from_json_str(
        r#"{"families": [{
            "family": "brush",
            "categoryPath": "brush.categories",
            "itemsPath": "items",
            "itemFields": ["textureURI"]
        }]}"#,
    )
    .unwrap();
    let resolver = ConfigResolver::from_config(PrefixNamespace::new("b://"), &cfg).unwrap();
    assert_eq!(resolver.catalog().rules().len(), 9);
    let mut root = tree(json!({"brush": {"categories": [{"items": [{"textureURI": "t.png"}]}]}}));
    resolver.resolve(&mut root);
    assert_eq!(
        value(&root)["brush"]["categories"][0]["items"][0]["textureURI"],
        "b://t.png"
    );
}

#[test]
fn empty_catalog_resolves_nothing() {
    let resolver = ConfigResolver::new(PrefixNamespace::flutter()).with_catalog(SchemaCatalog::empty());
    let original = json!({"text": {"fonts": [{"fontURI": "f.ttf"}]}});
    let mut root = tree(original.clone());
    resolver.resolve(&mut root);
    assert_eq!(value(&root), original);
}

#[test]
fn resolve_document_round_trips_through_json() {
    let resolver = ConfigResolver::new(bundle());
    let (out, stats) = resolver
        .resolve_document(r#"{"watermark": {"watermarkURI": "wm.png"}, "n": 1}"#)
        .unwrap();
    assert_eq!(stats.fields_resolved, 1);
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v, json!({"watermark": {"watermarkURI": "bundle:///wm.png"}, "n": 1}));
    assert!(resolver.resolve_document("[1, 2]").is_err());
}

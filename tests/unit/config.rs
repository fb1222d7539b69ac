use super::*;

#[test]
fn default_config_is_valid() {
    let cfg = ResolverConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.unresolved, UnresolvedPolicy::Null);
    assert_eq!(cfg.catalog().unwrap(), SchemaCatalog::standard());
}

#[test]
fn empty_json_object_uses_defaults() {
    let cfg = ResolverConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, ResolverConfig::default());
}

#[test]
fn extra_families_are_appended() {
    let cfg = ResolverConfig::from_json_str(
        r#"{
            "unresolved": "remove",
            "families": [
                {"family": "brush", "categoryPath": "brush.items", "categoryFields": ["textureURI"]}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.unresolved, UnresolvedPolicy::Remove);
    let catalog = cfg.catalog().unwrap();
    assert_eq!(catalog.rules().len(), 9);
    assert_eq!(catalog.rules()[8].family, "brush");
}

#[test]
fn standard_families_can_be_disabled() {
    let cfg = ResolverConfig::from_json_str(r#"{"includeStandardFamilies": false}"#).unwrap();
    assert!(cfg.catalog().unwrap().rules().is_empty());
}

#[test]
fn duplicate_family_detected() {
    let cfg = ResolverConfig::from_json_str(
        r#"{"families": [{"family": "font", "categoryPath": "text.fonts"}]}"#,
    )
    .unwrap();
    assert!(matches!(cfg.validate(), Err(EditorConfigError::Validation(_))));
}

#[test]
fn malformed_config_is_a_validation_error() {
    assert!(matches!(
        ResolverConfig::from_json_str(r#"{"unresolved": "explode"}"#),
        Err(EditorConfigError::Validation(_))
    ));
    assert!(ResolverConfig::from_json_str(r#"{"unknownKey": 1}"#).is_err());
    assert!(
        ResolverConfig::from_json_str(r#"{"families": [{"family": "x", "categoryPath": ".x"}]}"#)
            .is_err()
    );
}

#[test]
fn missing_config_file_is_reported() {
    let err = ResolverConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("read resolver config"));
}

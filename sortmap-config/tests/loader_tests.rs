use std::{collections::HashMap, fs, path::Path};

use sortmap_config::{
    CONFIG_JSON_VAR, CONFIG_PATH_VAR, ConfigFormat, MappingConfig, MappingConfigSource,
};
use sortmap_core::{RevertMode, ShapeId, apply_sort};
use tempfile::tempdir;

const TOML_CONFIG: &str = r#"
revert_mode = "per-property"

[[mapping]]
public = "AuthorDto"
internal = "Author"

[mapping.fields]
Id = "Id"
Age = { destinations = ["DateOfBirth"], revert = true }
Name = ["Firstname", "Lastname"]
"#;

const JSON_CONFIG: &str = r#"{
  "mapping": [
    {
      "public": "BookDto",
      "internal": "Book",
      "fields": { "Title": "Title", "Id": ["Id"] }
    }
  ]
}"#;

fn vars(pairs: &[(&str, String)]) -> impl Fn(&str) -> Option<String> + use<> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn path_variable_takes_precedence() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("custom.toml");
    fs::write(&path, TOML_CONFIG).unwrap();

    let lookup = vars(&[
        (CONFIG_PATH_VAR, path.display().to_string()),
        (CONFIG_JSON_VAR, JSON_CONFIG.to_string()),
    ]);
    let (config, source) = MappingConfig::load_with(lookup, dir.path()).unwrap();

    assert_eq!(source, MappingConfigSource::EnvPath(path));
    assert_eq!(config.revert_mode, RevertMode::PerProperty);
    assert_eq!(config.mappings[0].public, "AuthorDto");
}

#[test]
fn inline_json_is_used_without_a_path() {
    let dir = tempdir().expect("tempdir");
    let lookup = vars(&[
        (CONFIG_PATH_VAR, "  ".to_string()),
        (CONFIG_JSON_VAR, JSON_CONFIG.to_string()),
    ]);

    let (config, source) = MappingConfig::load_with(lookup, dir.path()).unwrap();
    assert_eq!(source, MappingConfigSource::EnvInline);

    let registry = config.to_registry().unwrap();
    let table = registry
        .resolve(&ShapeId::new("BookDto"), &ShapeId::new("Book"))
        .unwrap();
    assert!(table.contains_field("title"));
}

#[test]
fn invalid_inline_json_names_the_variable() {
    let dir = tempdir().expect("tempdir");
    let lookup = vars(&[(CONFIG_JSON_VAR, "{ not json".to_string())]);

    let err = MappingConfig::load_with(lookup, dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains(CONFIG_JSON_VAR));
}

#[test]
fn default_file_is_found_in_config_dir() {
    let dir = tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("config")).unwrap();
    let path = dir.path().join("config/mappings.json");
    fs::write(&path, JSON_CONFIG).unwrap();

    let (config, source) = MappingConfig::load_with(|_| None, dir.path()).unwrap();
    assert_eq!(source, MappingConfigSource::File(path));
    assert_eq!(config.mappings.len(), 1);
}

#[test]
fn nothing_configured_yields_empty_registry() {
    let dir = tempdir().expect("tempdir");
    let (config, source) = MappingConfig::load_with(|_| None, dir.path()).unwrap();

    assert_eq!(source, MappingConfigSource::Default);
    assert!(config.to_registry().unwrap().is_empty());
}

#[test]
fn extensionless_files_accept_toml_or_json() {
    let dir = tempdir().expect("tempdir");
    let toml_path = dir.path().join("mappings");
    fs::write(&toml_path, TOML_CONFIG).unwrap();
    assert_eq!(
        MappingConfig::load_from_file(&toml_path).unwrap().mappings[0].internal,
        "Author"
    );

    let json_path = dir.path().join("mappings.conf");
    fs::write(&json_path, JSON_CONFIG).unwrap();
    assert_eq!(
        MappingConfig::load_from_file(&json_path).unwrap().mappings[0].internal,
        "Book"
    );

    let garbage = dir.path().join("garbage");
    fs::write(&garbage, "[[[").unwrap();
    let err = format!("{:#}", MappingConfig::load_from_file(&garbage).unwrap_err());
    assert!(err.contains("garbage"));
    assert!(err.contains("toml error"));
    assert!(err.contains("json error"));
}

#[test]
fn extension_pins_the_format() {
    assert_eq!(ConfigFormat::from_path(Path::new("a.json")), ConfigFormat::Json);
    assert_eq!(ConfigFormat::from_path(Path::new("a.tml")), ConfigFormat::Toml);
    assert_eq!(ConfigFormat::from_path(Path::new("mappings")), ConfigFormat::Detect);

    assert!(MappingConfig::parse(JSON_CONFIG, ConfigFormat::Toml).is_err());
    assert!(MappingConfig::parse(TOML_CONFIG, ConfigFormat::Json).is_err());
    assert_eq!(
        MappingConfig::parse(JSON_CONFIG, ConfigFormat::Detect).unwrap().mappings[0].public,
        "BookDto"
    );
}

#[test]
fn default_candidates_skip_directories() {
    let dir = tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("mappings.toml")).unwrap();
    let path = dir.path().join("mappings.json");
    fs::write(&path, JSON_CONFIG).unwrap();

    let (_, source) = MappingConfig::load_with(|_| None, dir.path()).unwrap();
    assert_eq!(source, MappingConfigSource::File(path));
}

#[test]
fn missing_file_reports_path() {
    let err = MappingConfig::load_from_file(Path::new("/nonexistent/mappings.toml")).unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/mappings.toml"));
}

#[test]
fn configured_service_sorts_with_configured_revert_mode() {
    let config: MappingConfig = toml::from_str(TOML_CONFIG).unwrap();
    let service = config.to_service().unwrap();
    let public = ShapeId::new("AuthorDto");
    let internal = ShapeId::new("Author");

    assert!(service
        .valid_mapping_exists_for_ids(&public, &internal, "name,age desc")
        .unwrap());

    let records = vec![
        serde_json::json!({ "Id": 1, "DateOfBirth": "1947-09-21" }),
        serde_json::json!({ "Id": 2, "DateOfBirth": "1960-11-10" }),
    ];
    let sorted = service
        .apply_sort_ids(&public, &internal, records.clone(), "Age")
        .unwrap();
    assert_eq!(sorted[0]["Id"], 2);

    let table = service.registry().resolve(&public, &internal).unwrap();
    let sorted = apply_sort(records, "Age desc", table).unwrap();
    assert_eq!(sorted[0]["Id"], 1);
}

//! Integration tests for template generation.
//!
//! Fixtures live under `tests/fixtures` and are read through the real
//! file loader; the mock loader covers the failure paths.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use apim_creator::{
    resource_types, ApiConfig, ApiTemplateCreator, ConfigValidator, CreatorConfig, CreatorError,
    FileNames, FileReader, FileWriter, MockLoader, TemplateGenerator,
};
use tempfile::tempdir;

const VERSION_SET_ID: &str =
    "[resourceId('Microsoft.ApiManagement/service/api-version-sets', parameters('ApimServiceName'), 'versionset')]";
const INITIAL_API_ID: &str =
    "[resourceId('Microsoft.ApiManagement/service/apis', parameters('ApimServiceName'), 'initial-api')]";
const SUBSEQUENT_API_ID: &str =
    "[resourceId('Microsoft.ApiManagement/service/apis', parameters('ApimServiceName'), 'subsequent-api')]";

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn load_fixture_config() -> CreatorConfig {
    let mut config = CreatorConfig::from_file(&fixtures_dir().join("valid.yml")).unwrap();
    config.resolve_paths(&fixtures_dir());
    config
}

/// Test the full document produced for the fixture configuration.
#[tokio::test]
async fn test_api_template_from_fixture() {
    let config = load_fixture_config();
    let creator = ApiTemplateCreator::with_loader(Arc::new(FileReader::new()));

    let template = creator.create_api_template(&config).await.unwrap();

    // initial, subsequent, api policy, one operation policy, two products
    assert_eq!(template.resources.len(), 6);

    let initial = &template.resources[0];
    assert_eq!(initial.depends_on, vec![VERSION_SET_ID.to_string()]);
    let initial_props = initial.api_properties().unwrap();
    assert_eq!(initial_props.path.as_deref(), Some("petstore"));
    assert_eq!(initial_props.api_version.as_deref(), Some("v1"));
    assert_eq!(initial_props.api_version_set_id.as_deref(), Some(VERSION_SET_ID));
    assert_eq!(
        initial_props
            .authentication_settings
            .as_ref()
            .and_then(|a| a.subscription_key_required),
        Some(true)
    );

    let subsequent = &template.resources[1];
    assert_eq!(subsequent.depends_on, vec![INITIAL_API_ID.to_string()]);
    let content = subsequent
        .api_properties()
        .and_then(|p| p.content_value.as_deref())
        .unwrap();
    let original: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(fixtures_dir().join("petstore.json")).unwrap())
            .unwrap();
    let embedded: serde_json::Value = serde_json::from_str(content).unwrap();
    assert_eq!(embedded, original);

    let policy = template.resources[2].policy_properties().unwrap();
    assert!(policy.policy_content.contains("set-header"));
    assert!(template.resources[3].name.contains("/subsequent-api/addPet/policy"));
    assert_eq!(
        template
            .resources_of_type(resource_types::PRODUCT_API)
            .count(),
        2
    );

    for dependent in &template.resources[2..] {
        assert_eq!(dependent.depends_on, vec![SUBSEQUENT_API_ID.to_string()]);
    }
}

/// Test the documented scenario for an unlinked config without a version set.
#[tokio::test]
async fn test_unlinked_without_version_set_scenario() {
    let loader = MockLoader::new().with_content("orders.json", "{\"a\":1}");
    let config = CreatorConfig::new(ApiConfig::new("orders.json", "orders").with_revision("1"));

    let template = ApiTemplateCreator::with_loader(Arc::new(loader))
        .create_api_template(&config)
        .await
        .unwrap();

    let initial = template.resources[0].api_properties().unwrap();
    assert_eq!(template.resources[0].depends_on.len(), 1);
    assert_eq!(initial.path.as_deref(), Some("orders"));
    assert_eq!(initial.api_revision.as_deref(), Some("1"));
    assert!(initial.api_version_set_id.is_none());

    let subsequent = template.resources[1].api_properties().unwrap();
    assert_eq!(subsequent.content_value.as_deref(), Some("{\"a\":1}"));

    let json = serde_json::to_value(&template).unwrap();
    assert!(json["resources"][0]["properties"]
        .get("apiVersionSetId")
        .is_none());
}

/// Test that a missing specification aborts generation with the loader's error.
#[tokio::test]
async fn test_missing_specification_aborts() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let location = missing.to_string_lossy().into_owned();
    let config = CreatorConfig::new(ApiConfig::new(location.clone(), "orders"));

    let result = TemplateGenerator::new(Arc::new(FileReader::new()))
        .generate(&config)
        .await;

    match result {
        Err(CreatorError::LocationNotFound(l)) => assert_eq!(l, location),
        other => panic!("expected LocationNotFound, got {:?}", other.map(|g| g.file_names().len())),
    }
}

/// Test that the loader failure is surfaced even when policies are configured.
#[tokio::test]
async fn test_loader_failure_is_propagated() {
    let loader = MockLoader::new().simulate_failure("network unreachable");
    let config = CreatorConfig::new(
        ApiConfig::new("https://host/openapi.json", "orders")
            .with_policy("https://host/policy.xml"),
    );

    let err = ApiTemplateCreator::with_loader(Arc::new(loader.clone()))
        .create_api_template(&config)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CreatorError::Fetch { ref message, .. } if message == "network unreachable"
    ));
    assert_eq!(loader.requested(), vec!["https://host/openapi.json".to_string()]);
}

/// Test single file generation written to disk.
#[tokio::test]
async fn test_generate_and_write_single_file() {
    let dir = tempdir().unwrap();
    let config = load_fixture_config();
    assert!(ConfigValidator::validate(&config).valid);

    let generated = TemplateGenerator::new(Arc::new(FileReader::new()))
        .generate(&config)
        .await
        .unwrap();
    let written = FileWriter::write_all(&generated, dir.path()).unwrap();

    assert_eq!(written.len(), 2);
    let master: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join(FileNames::MASTER)).unwrap(),
    )
    .unwrap();

    let resources = master["resources"].as_array().unwrap();
    assert_eq!(resources[0]["type"], resource_types::API_VERSION_SET);
    assert_eq!(resources[0]["properties"]["displayName"], "Swagger Petstore");
    assert_eq!(
        resources[1]["name"],
        "[concat(parameters('ApimServiceName'), '/initial-api')]"
    );
    assert_eq!(resources[2]["properties"]["contentFormat"], "swagger-json");
    assert_eq!(master["parameters"]["ApimServiceName"]["type"], "string");

    let parameters: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join(FileNames::PARAMETERS)).unwrap(),
    )
    .unwrap();
    assert_eq!(parameters["parameters"]["ApimServiceName"]["value"], "contoso-apim");
}

/// Test linked generation written to disk.
#[tokio::test]
async fn test_generate_and_write_linked() {
    let dir = tempdir().unwrap();
    let config = load_fixture_config().linked("https://storage.example.com/templates");

    let generated = TemplateGenerator::new(Arc::new(FileReader::new()))
        .generate(&config)
        .await
        .unwrap();
    FileWriter::write_all(&generated, dir.path()).unwrap();

    for file in [
        FileNames::VERSION_SET,
        FileNames::API,
        FileNames::MASTER,
        FileNames::PARAMETERS,
    ] {
        assert!(dir.path().join(file).exists(), "missing {}", file);
    }

    let api: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join(FileNames::API)).unwrap(),
    )
    .unwrap();
    assert_eq!(api["resources"][0]["dependsOn"], serde_json::json!([]));
    assert_eq!(api["resources"][0]["properties"]["apiVersionSetId"], VERSION_SET_ID);

    let master: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join(FileNames::MASTER)).unwrap())
            .unwrap();
    assert_eq!(
        master["resources"][1]["properties"]["templateLink"]["uri"],
        "https://storage.example.com/templates/api.template.json"
    );
}

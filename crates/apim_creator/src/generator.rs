//! Generation of the full set of deployment files for one configuration.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::api::ApiTemplateCreator;
use crate::config::CreatorConfig;
use crate::error::{CreatorError, CreatorResult};
use crate::loader::ContentLoader;
use crate::master::MasterTemplateCreator;
use crate::template::{Template, TemplateCreator, TemplateParameters};
use crate::version_set::ApiVersionSetTemplateCreator;
use crate::writer::FileNames;

/// A generated document: either a template or a parameters file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Artifact {
    Template(Template),
    Parameters(TemplateParameters),
}

impl Artifact {
    pub fn as_template(&self) -> Option<&Template> {
        match self {
            Artifact::Template(template) => Some(template),
            Artifact::Parameters(_) => None,
        }
    }

    pub fn as_parameters(&self) -> Option<&TemplateParameters> {
        match self {
            Artifact::Parameters(parameters) => Some(parameters),
            Artifact::Template(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub file_name: String,
    pub artifact: Artifact,
}

/// Files produced by one generation run, in write order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedTemplates {
    pub files: Vec<GeneratedFile>,
}

impl GeneratedTemplates {
    fn push(&mut self, file_name: &str, artifact: Artifact) {
        self.files.push(GeneratedFile {
            file_name: file_name.to_string(),
            artifact,
        });
    }

    pub fn get(&self, file_name: &str) -> Option<&Artifact> {
        self.files
            .iter()
            .find(|f| f.file_name == file_name)
            .map(|f| &f.artifact)
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.file_name.as_str()).collect()
    }
}

/// Produces linked or single-file output for a configuration.
pub struct TemplateGenerator {
    api_template_creator: ApiTemplateCreator,
    version_set_template_creator: ApiVersionSetTemplateCreator,
    master_template_creator: MasterTemplateCreator,
}

impl TemplateGenerator {
    pub fn new(loader: Arc<dyn ContentLoader>) -> Self {
        let template_creator = TemplateCreator::new();
        Self {
            api_template_creator: ApiTemplateCreator::with_loader(loader),
            version_set_template_creator: ApiVersionSetTemplateCreator::new(template_creator),
            master_template_creator: MasterTemplateCreator::new(template_creator),
        }
    }

    pub async fn generate(&self, config: &CreatorConfig) -> CreatorResult<GeneratedTemplates> {
        // Checked before any content is fetched.
        let base_url = if config.linked {
            let base_url = config.linked_templates_base_url.as_deref().ok_or_else(|| {
                CreatorError::InvalidConfig(
                    "linkedTemplatesBaseUrl is required for linked templates".to_string(),
                )
            })?;
            Some(base_url)
        } else {
            None
        };

        let version_set = self
            .version_set_template_creator
            .create_api_version_set_template(config);
        let api = self.api_template_creator.create_api_template(config).await?;
        let parameters = self
            .master_template_creator
            .create_master_template_parameter_values(config);

        let mut generated = GeneratedTemplates::default();

        if let Some(base_url) = base_url {
            let master = self
                .master_template_creator
                .create_linked_master_template(version_set.is_some(), base_url);

            if let Some(version_set) = version_set {
                generated.push(FileNames::VERSION_SET, Artifact::Template(version_set));
            }
            generated.push(FileNames::API, Artifact::Template(api));
            generated.push(FileNames::MASTER, Artifact::Template(master));
        } else {
            let mut master = api;
            if let Some(mut version_set) = version_set {
                version_set.resources.append(&mut master.resources);
                master.resources = version_set.resources;
            }
            generated.push(FileNames::MASTER, Artifact::Template(master));
        }

        generated.push(FileNames::PARAMETERS, Artifact::Parameters(parameters));

        info!(
            "Generated {} files ({})",
            generated.files.len(),
            if config.linked { "linked" } else { "single file" }
        );
        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, ApiVersionSetConfig};
    use crate::mock::MockLoader;
    use crate::template::resource_types;

    fn loader() -> Arc<MockLoader> {
        Arc::new(MockLoader::new().with_content("spec.json", r#"{"openapi":"3.0.1"}"#))
    }

    fn config() -> CreatorConfig {
        CreatorConfig::new(ApiConfig::new("spec.json", "orders"))
            .with_service_name("contoso")
            .with_version_set(ApiVersionSetConfig::new("Orders", "Segment"))
    }

    #[tokio::test]
    async fn test_generate_single_file() {
        let generated = TemplateGenerator::new(loader()).generate(&config()).await.unwrap();

        assert_eq!(
            generated.file_names(),
            vec!["master.template.json", "master.parameters.json"]
        );
        let master = generated.get("master.template.json").unwrap().as_template().unwrap();
        assert_eq!(master.resources[0].resource_type, resource_types::API_VERSION_SET);
        assert_eq!(
            master.resources[1].name,
            "[concat(parameters('ApimServiceName'), '/initial-api')]"
        );
        assert_eq!(master.resources.len(), 3);
    }

    #[tokio::test]
    async fn test_generate_linked() {
        let config = config().linked("https://storage/templates");
        let generated = TemplateGenerator::new(loader()).generate(&config).await.unwrap();

        assert_eq!(
            generated.file_names(),
            vec![
                "versionset.template.json",
                "api.template.json",
                "master.template.json",
                "master.parameters.json"
            ]
        );
        let api = generated.get("api.template.json").unwrap().as_template().unwrap();
        assert!(api.resources[0].depends_on.is_empty());
        let master = generated.get("master.template.json").unwrap().as_template().unwrap();
        assert_eq!(master.resources.len(), 2);
        assert!(generated
            .get("master.parameters.json")
            .unwrap()
            .as_parameters()
            .is_some());
    }

    #[tokio::test]
    async fn test_generate_linked_requires_base_url() {
        let mut config = config();
        config.linked = true;

        let err = TemplateGenerator::new(loader()).generate(&config).await.unwrap_err();
        assert!(matches!(err, CreatorError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_missing_base_url_fails_before_fetching() {
        let mut config = config();
        config.linked = true;
        let loader = MockLoader::new().with_content("spec.json", r#"{"openapi":"3.0.1"}"#);

        let result = TemplateGenerator::new(Arc::new(loader.clone()))
            .generate(&config)
            .await;

        assert!(matches!(result, Err(CreatorError::InvalidConfig(_))));
        assert_eq!(loader.fetch_count(), 0);
        assert!(!loader.was_requested("spec.json"));
    }
}

//! API template assembly.
//!
//! An API is deployed in two steps. The initial resource creates the API
//! with its metadata; the subsequent resource imports the OpenAPI content
//! into the same API once it exists. Policies and product links wait on
//! the subsequent resource so the operations they reference are present.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::CreatorConfig;
use crate::error::CreatorResult;
use crate::loader::ContentLoader;
use crate::policy::PolicyTemplateCreator;
use crate::product_api::ProductApiTemplateCreator;
use crate::template::{
    resource_types, service_resource_id, service_scoped_name, ApiProperties, ResourceProperties,
    Template, TemplateCreator, TemplateResource,
};
use crate::version_set::VERSION_SET_NAME;

pub const INITIAL_API_NAME: &str = "initial-api";
pub const SUBSEQUENT_API_NAME: &str = "subsequent-api";
pub const SWAGGER_JSON_FORMAT: &str = "swagger-json";
pub const INITIAL_API_DISPLAY_NAME: &str = "api";
pub const HTTP_PROTOCOL: &str = "http";

/// Assembles the complete document for one API.
pub struct ApiTemplateCreator {
    loader: Arc<dyn ContentLoader>,
    template_creator: TemplateCreator,
    policy_template_creator: PolicyTemplateCreator,
    product_api_template_creator: ProductApiTemplateCreator,
}

impl ApiTemplateCreator {
    pub fn new(
        loader: Arc<dyn ContentLoader>,
        template_creator: TemplateCreator,
        policy_template_creator: PolicyTemplateCreator,
        product_api_template_creator: ProductApiTemplateCreator,
    ) -> Self {
        Self {
            loader,
            template_creator,
            policy_template_creator,
            product_api_template_creator,
        }
    }

    /// Wire default collaborators around a single loader.
    pub fn with_loader(loader: Arc<dyn ContentLoader>) -> Self {
        Self::new(
            loader.clone(),
            TemplateCreator::new(),
            PolicyTemplateCreator::new(loader),
            ProductApiTemplateCreator::new(),
        )
    }

    /// Build the API document: initial and subsequent API resources, then
    /// the API policy, operation policies and product links.
    pub async fn create_api_template(&self, config: &CreatorConfig) -> CreatorResult<Template> {
        let mut template = self.template_creator.create_empty_template();
        template.declare_service_name_parameter();

        let depends_on_subsequent_api =
            vec![service_resource_id(resource_types::API, SUBSEQUENT_API_NAME)];

        let initial = self.create_initial_api_template_resource(config);
        let subsequent = self.create_subsequent_api_template_resource(config).await?;
        let api_policy = self
            .policy_template_creator
            .create_api_policy_template_resource(config, &depends_on_subsequent_api)
            .await?;
        let operation_policies = self
            .policy_template_creator
            .create_operation_policy_template_resources(config, &depends_on_subsequent_api)
            .await?;
        let product_apis = self
            .product_api_template_creator
            .create_product_api_template_resources(config, &depends_on_subsequent_api);

        template.resources.push(initial);
        template.resources.push(subsequent);
        template.resources.extend(api_policy);
        template.resources.extend(operation_policies);
        template.resources.extend(product_apis);

        info!(
            "Created API template for '{}' with {} resources",
            config.api.suffix,
            template.resources.len()
        );
        Ok(template)
    }

    /// The API shell carrying metadata, without any content.
    pub fn create_initial_api_template_resource(&self, config: &CreatorConfig) -> TemplateResource {
        let api = &config.api;
        let version_set_id = service_resource_id(resource_types::API_VERSION_SET, VERSION_SET_NAME);

        let properties = ApiProperties {
            display_name: Some(INITIAL_API_DISPLAY_NAME.to_string()),
            api_version: api.api_version.clone(),
            api_revision: api.revision.clone(),
            api_revision_description: api.revision_description.clone(),
            api_version_description: api.api_version_description.clone(),
            api_version_set_id: config
                .api_version_set
                .as_ref()
                .map(|_| version_set_id.clone()),
            authentication_settings: api.authentication_settings.clone(),
            path: Some(api.suffix.clone()),
            protocols: Some(vec![HTTP_PROTOCOL.to_string()]),
            ..Default::default()
        };

        // Linked deployments order the version set through the master template.
        let depends_on = if config.linked {
            Vec::new()
        } else {
            vec![version_set_id]
        };

        TemplateResource::new(service_scoped_name(INITIAL_API_NAME), resource_types::API)
            .with_properties(ResourceProperties::Api(properties))
            .depends_on(&depends_on)
    }

    /// The API content import, read from the configured OpenAPI location.
    pub async fn create_subsequent_api_template_resource(
        &self,
        config: &CreatorConfig,
    ) -> CreatorResult<TemplateResource> {
        let raw = self.loader.fetch(&config.api.open_api_spec).await?;
        let document: serde_json::Value = serde_json::from_str(&raw)?;
        let content = serde_json::to_string(&document)?;
        debug!(
            "Loaded {} bytes of specification from {}",
            content.len(),
            config.api.open_api_spec
        );

        let properties = ApiProperties {
            content_format: Some(SWAGGER_JSON_FORMAT.to_string()),
            content_value: Some(content),
            path: Some(config.api.suffix.clone()),
            ..Default::default()
        };

        Ok(
            TemplateResource::new(service_scoped_name(SUBSEQUENT_API_NAME), resource_types::API)
                .with_properties(ResourceProperties::Api(properties))
                .depends_on(&[service_resource_id(resource_types::API, INITIAL_API_NAME)]),
        )
    }
}

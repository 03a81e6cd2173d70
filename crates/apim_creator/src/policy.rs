//! Policy resources for the API and its operations.

use std::sync::Arc;

use tracing::debug;

use crate::api::SUBSEQUENT_API_NAME;
use crate::config::CreatorConfig;
use crate::error::CreatorResult;
use crate::loader::{is_url, ContentLoader};
use crate::template::{
    resource_types, service_scoped_name, PolicyProperties, ResourceProperties, TemplateResource,
};

pub const RAW_XML_FORMAT: &str = "rawxml";
pub const RAW_XML_LINK_FORMAT: &str = "rawxml-link";

/// Builds API-level and per-operation policy resources.
pub struct PolicyTemplateCreator {
    loader: Arc<dyn ContentLoader>,
}

impl PolicyTemplateCreator {
    pub fn new(loader: Arc<dyn ContentLoader>) -> Self {
        Self { loader }
    }

    /// Policy resource for the whole API, if one is configured.
    pub async fn create_api_policy_template_resource(
        &self,
        config: &CreatorConfig,
        depends_on: &[String],
    ) -> CreatorResult<Option<TemplateResource>> {
        let Some(location) = config.api.policy.as_deref() else {
            return Ok(None);
        };

        let name = service_scoped_name(&format!("{}/policy", SUBSEQUENT_API_NAME));
        let properties = self.policy_properties(location).await?;

        Ok(Some(
            TemplateResource::new(name, resource_types::API_POLICY)
                .with_properties(ResourceProperties::Policy(properties))
                .depends_on(depends_on),
        ))
    }

    /// One policy resource per operation with a configured policy.
    pub async fn create_operation_policy_template_resources(
        &self,
        config: &CreatorConfig,
        depends_on: &[String],
    ) -> CreatorResult<Vec<TemplateResource>> {
        let mut resources = Vec::new();

        for (operation, operation_config) in &config.api.operations {
            let Some(location) = operation_config.policy.as_deref() else {
                continue;
            };

            let name = service_scoped_name(&format!(
                "{}/{}/policy",
                SUBSEQUENT_API_NAME, operation
            ));
            let properties = self.policy_properties(location).await?;

            resources.push(
                TemplateResource::new(name, resource_types::OPERATION_POLICY)
                    .with_properties(ResourceProperties::Policy(properties))
                    .depends_on(depends_on),
            );
        }

        Ok(resources)
    }

    /// URLs are linked, local files are embedded.
    async fn policy_properties(&self, location: &str) -> CreatorResult<PolicyProperties> {
        if is_url(location) {
            debug!("Linking policy {}", location);
            return Ok(PolicyProperties {
                content_format: RAW_XML_LINK_FORMAT.to_string(),
                policy_content: location.to_string(),
            });
        }

        let content = self.loader.fetch(location).await?;
        Ok(PolicyProperties {
            content_format: RAW_XML_FORMAT.to_string(),
            policy_content: content,
        })
    }
}

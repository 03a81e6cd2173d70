//! API version set template.

use tracing::info;

use crate::config::CreatorConfig;
use crate::template::{
    resource_types, service_scoped_name, ApiVersionSetProperties, ResourceProperties, Template,
    TemplateCreator, TemplateResource,
};

pub const VERSION_SET_NAME: &str = "versionset";

/// Builds the version set document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiVersionSetTemplateCreator {
    template_creator: TemplateCreator,
}

impl ApiVersionSetTemplateCreator {
    pub fn new(template_creator: TemplateCreator) -> Self {
        Self { template_creator }
    }

    /// `None` when the configuration has no version set.
    pub fn create_api_version_set_template(&self, config: &CreatorConfig) -> Option<Template> {
        let version_set = config.api_version_set.as_ref()?;

        let mut template = self.template_creator.create_empty_template();
        template.declare_service_name_parameter();

        let properties = ApiVersionSetProperties {
            display_name: version_set.display_name.clone(),
            description: version_set.description.clone(),
            versioning_scheme: version_set.versioning_scheme.clone(),
            version_query_name: version_set.version_query_name.clone(),
            version_header_name: version_set.version_header_name.clone(),
        };

        template.resources.push(
            TemplateResource::new(
                service_scoped_name(VERSION_SET_NAME),
                resource_types::API_VERSION_SET,
            )
            .with_properties(ResourceProperties::VersionSet(properties)),
        );

        info!("Created version set template '{}'", version_set.display_name);
        Some(template)
    }
}

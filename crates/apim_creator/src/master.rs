//! Master template and parameter values for linked deployments.
//!
//! In linked mode each document is published separately and the master
//! template deploys them as nested deployments. Ordering between the
//! version set and the API is declared here instead of inside the API
//! document.

use std::collections::BTreeMap;

use crate::config::CreatorConfig;
use crate::template::{
    resource_types, DeploymentProperties, ParameterValue, ResourceProperties, Template,
    TemplateCreator, TemplateLink, TemplateParameters, TemplateResource, CONTENT_VERSION,
    SERVICE_NAME_PARAMETER,
};
use crate::writer::FileNames;

pub const DEPLOYMENT_API_VERSION: &str = "2018-01-01";
pub const VERSION_SET_DEPLOYMENT_NAME: &str = "versionSetTemplate";
pub const API_DEPLOYMENT_NAME: &str = "apiTemplate";

/// Builds master templates and their parameter files.
#[derive(Debug, Clone, Copy, Default)]
pub struct MasterTemplateCreator {
    template_creator: TemplateCreator,
}

impl MasterTemplateCreator {
    pub fn new(template_creator: TemplateCreator) -> Self {
        Self { template_creator }
    }

    /// Master template deploying the linked version set and API documents
    /// published under `base_url`.
    pub fn create_linked_master_template(&self, has_version_set: bool, base_url: &str) -> Template {
        let mut template = self.template_creator.create_empty_template();
        template.declare_service_name_parameter();

        let mut api_depends_on = Vec::new();
        if has_version_set {
            template.resources.push(self.create_linked_deployment_resource(
                VERSION_SET_DEPLOYMENT_NAME,
                &link_uri(base_url, FileNames::VERSION_SET),
                &[],
            ));
            api_depends_on.push(format!(
                "[resourceId('{}', '{}')]",
                resource_types::DEPLOYMENT,
                VERSION_SET_DEPLOYMENT_NAME
            ));
        }

        template.resources.push(self.create_linked_deployment_resource(
            API_DEPLOYMENT_NAME,
            &link_uri(base_url, FileNames::API),
            &api_depends_on,
        ));

        template
    }

    /// Nested deployment of the document at `uri`.
    pub fn create_linked_deployment_resource(
        &self,
        name: &str,
        uri: &str,
        depends_on: &[String],
    ) -> TemplateResource {
        let mut parameters = BTreeMap::new();
        parameters.insert(
            SERVICE_NAME_PARAMETER.to_string(),
            ParameterValue::new(format!("[parameters('{}')]", SERVICE_NAME_PARAMETER)),
        );

        TemplateResource::new(name, resource_types::DEPLOYMENT)
            .with_api_version(DEPLOYMENT_API_VERSION)
            .with_properties(ResourceProperties::Deployment(DeploymentProperties {
                mode: "Incremental".to_string(),
                template_link: TemplateLink {
                    uri: uri.to_string(),
                    content_version: CONTENT_VERSION.to_string(),
                },
                parameters,
            }))
            .depends_on(depends_on)
    }

    /// Parameter values for the master template.
    pub fn create_master_template_parameter_values(
        &self,
        config: &CreatorConfig,
    ) -> TemplateParameters {
        let mut parameters = self.template_creator.create_empty_parameters();
        parameters.parameters.insert(
            SERVICE_NAME_PARAMETER.to_string(),
            ParameterValue::new(config.apim_service_name.clone()),
        );
        parameters
    }
}

fn link_uri(base_url: &str, file_name: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), file_name)
}

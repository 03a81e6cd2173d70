//! Deployment document model.
//!
//! A [`Template`] is a declarative deployment document: a set of declared
//! parameters plus an ordered list of [`TemplateResource`] entries whose
//! `dependsOn` edges are evaluated by the deployment engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::AuthenticationSettings;

pub const DEPLOYMENT_TEMPLATE_SCHEMA: &str =
    "https://schema.management.azure.com/schemas/2015-01-01/deploymentTemplate.json#";
pub const DEPLOYMENT_PARAMETERS_SCHEMA: &str =
    "https://schema.management.azure.com/schemas/2015-01-01/deploymentParameters.json#";
pub const CONTENT_VERSION: &str = "1.0.0.0";

/// Schema version tag for API Management resources.
pub const APIM_API_VERSION: &str = "2018-06-01-preview";

/// Name of the parameter holding the target service instance.
pub const SERVICE_NAME_PARAMETER: &str = "ApimServiceName";

/// Resource kind tags.
pub mod resource_types {
    pub const API: &str = "Microsoft.ApiManagement/service/apis";
    pub const API_POLICY: &str = "Microsoft.ApiManagement/service/apis/policies";
    pub const OPERATION_POLICY: &str = "Microsoft.ApiManagement/service/apis/operations/policies";
    pub const PRODUCT_API: &str = "Microsoft.ApiManagement/service/products/apis";
    pub const API_VERSION_SET: &str = "Microsoft.ApiManagement/service/api-version-sets";
    pub const DEPLOYMENT: &str = "Microsoft.Resources/deployments";
}

/// Build `[concat(parameters('ApimServiceName'), '/<suffix>')]`.
pub fn service_scoped_name(suffix: &str) -> String {
    format!("[concat(parameters('{SERVICE_NAME_PARAMETER}'), '/{suffix}')]")
}

/// Build `[resourceId('<type>', parameters('ApimServiceName'), '<name>')]`.
pub fn service_resource_id(resource_type: &str, name: &str) -> String {
    format!("[resourceId('{resource_type}', parameters('{SERVICE_NAME_PARAMETER}'), '{name}')]")
}

/// Deployment template document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub content_version: String,
    pub parameters: BTreeMap<String, TemplateParameterProperties>,
    pub variables: BTreeMap<String, serde_json::Value>,
    pub resources: Vec<TemplateResource>,
    pub outputs: BTreeMap<String, serde_json::Value>,
}

impl Template {
    /// Declare the service name parameter every document relies on.
    pub fn declare_service_name_parameter(&mut self) {
        self.parameters.insert(
            SERVICE_NAME_PARAMETER.to_string(),
            TemplateParameterProperties::string(),
        );
    }

    /// First resource with the given name.
    pub fn resource(&self, name: &str) -> Option<&TemplateResource> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// All resources of the given kind, in document order.
    pub fn resources_of_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = &'a TemplateResource> + 'a {
        self.resources
            .iter()
            .filter(move |r| r.resource_type == resource_type)
    }
}

/// Declared parameter metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateParameterProperties {
    #[serde(rename = "type")]
    pub parameter_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TemplateParameterMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<serde_json::Value>,
}

impl TemplateParameterProperties {
    pub fn string() -> Self {
        Self {
            parameter_type: "string".to_string(),
            metadata: None,
            default_value: None,
            allowed_values: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.metadata = Some(TemplateParameterMetadata {
            description: description.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateParameterMetadata {
    pub description: String,
}

/// One declared resource in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResource {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub api_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ResourceProperties>,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl TemplateResource {
    pub fn new(name: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_type: resource_type.into(),
            api_version: APIM_API_VERSION.to_string(),
            properties: None,
            depends_on: Vec::new(),
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_properties(mut self, properties: ResourceProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn depends_on(mut self, depends_on: &[String]) -> Self {
        self.depends_on = depends_on.to_vec();
        self
    }

    pub fn api_properties(&self) -> Option<&ApiProperties> {
        match &self.properties {
            Some(ResourceProperties::Api(props)) => Some(props),
            _ => None,
        }
    }

    pub fn policy_properties(&self) -> Option<&PolicyProperties> {
        match &self.properties {
            Some(ResourceProperties::Policy(props)) => Some(props),
            _ => None,
        }
    }

    pub fn version_set_properties(&self) -> Option<&ApiVersionSetProperties> {
        match &self.properties {
            Some(ResourceProperties::VersionSet(props)) => Some(props),
            _ => None,
        }
    }

    pub fn deployment_properties(&self) -> Option<&DeploymentProperties> {
        match &self.properties {
            Some(ResourceProperties::Deployment(props)) => Some(props),
            _ => None,
        }
    }
}

/// Kind specific property bags.
///
/// Variants with required fields come first so untagged deserialization
/// does not swallow them into the all-optional API bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceProperties {
    VersionSet(ApiVersionSetProperties),
    Policy(PolicyProperties),
    Deployment(DeploymentProperties),
    Api(ApiProperties),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_revision_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version_set_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_settings: Option<AuthenticationSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocols: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyProperties {
    pub content_format: String,
    pub policy_content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVersionSetProperties {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub versioning_scheme: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_query_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_header_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentProperties {
    pub mode: String,
    pub template_link: TemplateLink,
    pub parameters: BTreeMap<String, ParameterValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateLink {
    pub uri: String,
    pub content_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterValue {
    pub value: serde_json::Value,
}

impl ParameterValue {
    pub fn new(value: impl Into<serde_json::Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Parameters file supplying values for a template's declared parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateParameters {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub content_version: String,
    pub parameters: BTreeMap<String, ParameterValue>,
}

/// Factory for empty documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateCreator;

impl TemplateCreator {
    pub fn new() -> Self {
        Self
    }

    pub fn create_empty_template(&self) -> Template {
        Template {
            schema: DEPLOYMENT_TEMPLATE_SCHEMA.to_string(),
            content_version: CONTENT_VERSION.to_string(),
            parameters: BTreeMap::new(),
            variables: BTreeMap::new(),
            resources: Vec::new(),
            outputs: BTreeMap::new(),
        }
    }

    pub fn create_empty_parameters(&self) -> TemplateParameters {
        TemplateParameters {
            schema: DEPLOYMENT_PARAMETERS_SCHEMA.to_string(),
            content_version: CONTENT_VERSION.to_string(),
            parameters: BTreeMap::new(),
        }
    }
}

//! Creator configuration.
//!
//! The configuration describes a single API: where its OpenAPI document
//! lives, how it is versioned, which policies apply and which products it
//! joins. Keys are camelCase so existing YAML/JSON configuration files
//! load unchanged.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CreatorError, CreatorResult};
use crate::loader::is_url;

/// Root configuration for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorConfig {
    /// Configuration file format version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Name of the target API Management service instance.
    #[serde(default)]
    pub apim_service_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version_set: Option<ApiVersionSetConfig>,
    pub api: ApiConfig,
    /// Directory the generated templates are written to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_location: Option<String>,
    /// Split the output across linked template files.
    #[serde(default)]
    pub linked: bool,
    /// Base URL the linked templates are published under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_templates_base_url: Option<String>,
}

impl CreatorConfig {
    pub fn new(api: ApiConfig) -> Self {
        Self {
            api,
            ..Default::default()
        }
    }

    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.apim_service_name = name.into();
        self
    }

    pub fn with_version_set(mut self, version_set: ApiVersionSetConfig) -> Self {
        self.api_version_set = Some(version_set);
        self
    }

    pub fn with_output_location(mut self, location: impl Into<String>) -> Self {
        self.output_location = Some(location.into());
        self
    }

    /// Mark the configuration as linked, publishing templates under `base_url`.
    pub fn linked(mut self, base_url: impl Into<String>) -> Self {
        self.linked = true;
        self.linked_templates_base_url = Some(base_url.into());
        self
    }

    /// Load configuration from a YAML or JSON file.
    ///
    /// Files ending in `.json` are read as JSON, everything else as YAML.
    pub fn from_file(path: &Path) -> CreatorResult<Self> {
        debug!("Loading creator configuration from {:?}", path);
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                CreatorError::LocationNotFound(path.display().to_string())
            }
            _ => CreatorError::Io(e),
        })?;

        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }

    /// Resolve relative local locations (OpenAPI document, policies)
    /// against `base_dir`. URLs and absolute paths are left untouched.
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        let resolve = |location: &mut String| {
            if is_url(location.as_str()) || Path::new(location.as_str()).is_absolute() {
                return;
            }
            *location = base_dir.join(location.as_str()).to_string_lossy().into_owned();
        };

        resolve(&mut self.api.open_api_spec);
        if let Some(policy) = self.api.policy.as_mut() {
            resolve(policy);
        }
        for operation in self.api.operations.values_mut() {
            if let Some(policy) = operation.policy.as_mut() {
                resolve(policy);
            }
        }
    }

    /// Save configuration as YAML.
    pub fn to_file(&self, path: &Path) -> CreatorResult<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Metadata for the API itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    #[serde(default)]
    pub name: String,
    /// Local path or URL of the OpenAPI document.
    pub open_api_spec: String,
    /// Local path or URL of the API-level policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub operations: BTreeMap<String, OperationConfig>,
    /// URL path suffix the API is exposed under.
    #[serde(default)]
    pub suffix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_settings: Option<AuthenticationSettings>,
    /// Comma separated product ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<String>,
}

impl ApiConfig {
    pub fn new(open_api_spec: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            open_api_spec: open_api_spec.into(),
            suffix: suffix.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn with_policy(mut self, location: impl Into<String>) -> Self {
        self.policy = Some(location.into());
        self
    }

    pub fn with_operation_policy(
        mut self,
        operation: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        self.operations.insert(
            operation.into(),
            OperationConfig {
                policy: Some(location.into()),
            },
        );
        self
    }

    pub fn with_products(mut self, products: impl Into<String>) -> Self {
        self.products = Some(products.into());
        self
    }

    /// Product ids parsed from the comma separated `products` field.
    pub fn product_ids(&self) -> Vec<&str> {
        self.products
            .as_deref()
            .map(|products| {
                products
                    .split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Per-operation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
}

/// Version set grouping the API's versions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVersionSetConfig {
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `Segment`, `Query` or `Header`; passed through verbatim.
    #[serde(default)]
    pub versioning_scheme: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_query_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_header_name: Option<String>,
}

impl ApiVersionSetConfig {
    pub fn new(display_name: impl Into<String>, versioning_scheme: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            versioning_scheme: versioning_scheme.into(),
            ..Default::default()
        }
    }
}

/// Authentication settings copied onto the initial API resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationSettings {
    #[serde(rename = "oAuth2", default, skip_serializing_if = "Option::is_none")]
    pub oauth2: Option<OAuth2AuthenticationSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openid: Option<OpenIdAuthenticationSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_key_required: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuth2AuthenticationSettings {
    pub authorization_server_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenIdAuthenticationSettings {
    pub openid_provider_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bearer_token_sending_methods: Vec<String>,
}

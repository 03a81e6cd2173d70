//! Configuration validation.
//!
//! Generation itself passes configuration values through untouched; this
//! validator is run up front by callers that want early, readable errors.

use crate::config::CreatorConfig;
use crate::error::{CreatorError, CreatorResult};
use crate::loader::is_url;

/// Validation result with details.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Turn a failed validation into `CreatorError::InvalidConfig`.
    pub fn into_result(self) -> CreatorResult<Self> {
        if self.valid {
            Ok(self)
        } else {
            Err(CreatorError::InvalidConfig(self.errors.join("; ")))
        }
    }
}

/// Validator for creator configuration.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration that will be written to disk.
    pub fn validate(config: &CreatorConfig) -> ValidationResult {
        let mut result = Self::validate_generation(config);

        let has_output = config
            .output_location
            .as_deref()
            .map_or(false, |location| !location.trim().is_empty());
        if !has_output {
            result.add_error("outputLocation is required");
        }

        result
    }

    /// Validate the fields generation depends on.
    pub fn validate_generation(config: &CreatorConfig) -> ValidationResult {
        let mut result = ValidationResult::new();

        if config.apim_service_name.trim().is_empty() {
            result.add_error("apimServiceName is required");
        }

        result.merge(Self::validate_api(config));
        result.merge(Self::validate_version_set(config));
        result.merge(Self::validate_linking(config));

        result
    }

    fn validate_api(config: &CreatorConfig) -> ValidationResult {
        let mut result = ValidationResult::new();
        let api = &config.api;

        if api.name.trim().is_empty() {
            result.add_error("api.name is required");
        }
        if api.open_api_spec.trim().is_empty() {
            result.add_error("api.openApiSpec is required");
        }
        if api.suffix.trim().is_empty() {
            result.add_error("api.suffix is required");
        }

        for (operation, operation_config) in &api.operations {
            if operation_config.policy.is_none() {
                result.add_warning(format!(
                    "Operation '{}' has no policy and will be skipped",
                    operation
                ));
            }
        }

        if let Some(products) = api.products.as_deref() {
            if products.split(',').any(|id| id.trim().is_empty()) {
                result.add_warning("api.products contains empty product ids");
            }
        }

        result
    }

    fn validate_version_set(config: &CreatorConfig) -> ValidationResult {
        let mut result = ValidationResult::new();

        match &config.api_version_set {
            Some(version_set) => {
                if version_set.display_name.trim().is_empty() {
                    result.add_error("apiVersionSet.displayName is required");
                }
                if version_set.versioning_scheme.trim().is_empty() {
                    result.add_error("apiVersionSet.versioningScheme is required");
                }
            }
            None if !config.linked => {
                result.add_warning(
                    "No apiVersionSet configured: the initial API still depends on a version set",
                );
            }
            None => {}
        }

        result
    }

    fn validate_linking(config: &CreatorConfig) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !config.linked {
            return result;
        }

        match config.linked_templates_base_url.as_deref() {
            None => result.add_error("linkedTemplatesBaseUrl is required when linked is true"),
            Some(url) if !is_url(url) => result.add_error(format!(
                "linkedTemplatesBaseUrl must be an http(s) URL: {}",
                url
            )),
            Some(_) => {}
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, ApiVersionSetConfig, OperationConfig};

    fn valid_config() -> CreatorConfig {
        CreatorConfig::new(ApiConfig::new("spec.json", "orders").with_name("orders"))
            .with_service_name("contoso")
            .with_version_set(ApiVersionSetConfig::new("Orders", "Segment"))
            .with_output_location("./out")
    }

    #[test]
    fn test_valid_config() {
        let result = ConfigValidator::validate(&valid_config());
        assert!(result.valid, "{:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_required_fields() {
        let config = CreatorConfig::new(ApiConfig::default());
        let result = ConfigValidator::validate(&config);

        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("apimServiceName")));
        assert!(result.errors.iter().any(|e| e.contains("api.openApiSpec")));
        assert!(result.errors.iter().any(|e| e.contains("api.suffix")));
        assert!(result.errors.iter().any(|e| e.contains("outputLocation")));
    }

    #[test]
    fn test_generation_does_not_need_output() {
        let mut config = valid_config();
        config.output_location = None;
        assert!(ConfigValidator::validate_generation(&config).valid);
    }

    #[test]
    fn test_linked_requires_base_url() {
        let mut config = valid_config();
        config.linked = true;
        let result = ConfigValidator::validate(&config);
        assert!(!result.valid);

        let result = ConfigValidator::validate(&valid_config().linked("file:///tmp"));
        assert!(!result.valid);

        let result = ConfigValidator::validate(&valid_config().linked("https://storage/templates"));
        assert!(result.valid);
    }

    #[test]
    fn test_warnings() {
        let mut config = valid_config();
        config.api_version_set = None;
        config.api.products = Some("starter,,".to_string());
        config
            .api
            .operations
            .insert("getOrder".to_string(), OperationConfig::default());

        let result = ConfigValidator::validate(&config);
        assert!(result.valid);
        assert_eq!(result.warnings.len(), 3);
    }

    #[test]
    fn test_into_result() {
        let mut config = valid_config();
        config.api_version_set = None;
        let result = ConfigValidator::validate(&config).into_result().unwrap();
        assert_eq!(result.warnings.len(), 1);

        let mut config = valid_config();
        config.apim_service_name.clear();
        config.output_location = None;
        match ConfigValidator::validate(&config).into_result() {
            Err(CreatorError::InvalidConfig(message)) => {
                assert_eq!(
                    message,
                    "apimServiceName is required; outputLocation is required"
                );
            }
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }
}

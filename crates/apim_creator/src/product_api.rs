//! Product association resources.

use crate::api::SUBSEQUENT_API_NAME;
use crate::config::CreatorConfig;
use crate::template::{resource_types, service_scoped_name, TemplateResource};

/// Links the API into the configured products.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductApiTemplateCreator;

impl ProductApiTemplateCreator {
    pub fn new() -> Self {
        Self
    }

    /// One association per product id listed in the API configuration.
    pub fn create_product_api_template_resources(
        &self,
        config: &CreatorConfig,
        depends_on: &[String],
    ) -> Vec<TemplateResource> {
        config
            .api
            .product_ids()
            .into_iter()
            .map(|product| {
                let name = service_scoped_name(&format!("{}/{}", product, SUBSEQUENT_API_NAME));
                TemplateResource::new(name, resource_types::PRODUCT_API).depends_on(depends_on)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    #[test]
    fn test_product_associations() {
        let config = CreatorConfig::new(
            ApiConfig::new("spec.json", "orders").with_products("starter, unlimited"),
        );
        let deps = vec!["dep".to_string()];

        let resources =
            ProductApiTemplateCreator::new().create_product_api_template_resources(&config, &deps);

        assert_eq!(resources.len(), 2);
        assert_eq!(
            resources[0].name,
            "[concat(parameters('ApimServiceName'), '/starter/subsequent-api')]"
        );
        assert_eq!(
            resources[1].name,
            "[concat(parameters('ApimServiceName'), '/unlimited/subsequent-api')]"
        );
        assert!(resources.iter().all(|r| r.properties.is_none() && r.depends_on == deps));
    }

    #[test]
    fn test_no_products() {
        let config = CreatorConfig::new(ApiConfig::new("spec.json", "orders"));
        assert!(ProductApiTemplateCreator::new()
            .create_product_api_template_resources(&config, &[])
            .is_empty());
    }
}

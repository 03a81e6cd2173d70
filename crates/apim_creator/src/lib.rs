//! # apim_creator
//!
//! Deployment template generation for API Management APIs.
//!
//! This crate turns a [`CreatorConfig`] describing one API (metadata,
//! OpenAPI document location, versioning, policies and products) into
//! declarative deployment templates with explicit resource dependencies.
//!
//! ## Features
//!
//! - Two-phase API resources: an initial metadata shell and a subsequent
//!   content import that depends on it
//! - API and operation policies, inline or linked
//! - Product associations and API version sets
//! - Linked (multi-file) or single-file output with a parameters file
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use apim_creator::{CreatorConfig, FileReader, FileWriter, TemplateGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CreatorConfig::from_file(Path::new("valid.yml"))?;
//!
//!     let generator = TemplateGenerator::new(Arc::new(FileReader::new()));
//!     let generated = generator.generate(&config).await?;
//!
//!     FileWriter::write_all(&generated, Path::new("./templates"))?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod loader;
pub mod master;
pub mod mock;
pub mod policy;
pub mod product_api;
pub mod template;
pub mod validator;
pub mod version_set;
pub mod writer;

pub use api::ApiTemplateCreator;
pub use config::{
    ApiConfig, ApiVersionSetConfig, AuthenticationSettings, CreatorConfig,
    OAuth2AuthenticationSettings, OpenIdAuthenticationSettings, OperationConfig,
};
pub use error::{CreatorError, CreatorResult};
pub use generator::{Artifact, GeneratedFile, GeneratedTemplates, TemplateGenerator};
pub use loader::{is_url, ContentLoader, FileReader};
pub use master::MasterTemplateCreator;
pub use mock::MockLoader;
pub use policy::PolicyTemplateCreator;
pub use product_api::ProductApiTemplateCreator;
pub use template::{
    resource_types, ApiProperties, ApiVersionSetProperties, DeploymentProperties, ParameterValue,
    PolicyProperties, ResourceProperties, Template, TemplateCreator, TemplateParameterProperties,
    TemplateParameters, TemplateResource,
};
pub use validator::{ConfigValidator, ValidationResult};
pub use version_set::ApiVersionSetTemplateCreator;
pub use writer::{FileNames, FileWriter};

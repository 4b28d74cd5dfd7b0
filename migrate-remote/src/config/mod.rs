//! Destination configuration
//!
//! [`DestinationSettings`] is what a migration definition carries: every key
//! optional, straight from TOML or JSON. [`DestinationSettings::check_requirements`]
//! validates it once, before any record is imported, and yields an
//! [`ExportConfig`] that the destination can rely on.

mod file;
mod schema;

pub use file::DestinationFile;
pub use schema::{DEFAULT_ID_NAME, FieldSchema, IdDescriptor, IdType, IdentifierSchema};

use serde::{Deserialize, Serialize};

use crate::http::RequestFormat;
use crate::record::{PropertyPath, PropertyPathError};

/// Raw destination settings as declared for one migration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DestinationSettings {
    /// Record property holding the endpoint URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_property: Option<String>,
    /// Body encoding, form when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<RequestFormat>,
    /// Identifier fields expected back from the endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<IdentifierSchema>,
    /// Declared destination fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldSchema>,
}

/// Destination settings failed pre-flight validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `url_property` is not set
    MissingUrlProperty,
    /// `url_property` is set but is not a usable property path
    InvalidUrlProperty {
        value: String,
        reason: PropertyPathError,
    },
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::MissingUrlProperty => {
                write!(f, "the destination configuration key url_property is required")
            }
            ConfigurationError::InvalidUrlProperty { value, reason } => {
                write!(f, "invalid url_property '{}': {}", value, reason)
            }
        }
    }
}

impl std::error::Error for ConfigurationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigurationError::InvalidUrlProperty { reason, .. } => Some(reason),
            ConfigurationError::MissingUrlProperty => None,
        }
    }
}

impl DestinationSettings {
    pub fn new(url_property: impl Into<String>) -> Self {
        Self {
            url_property: Some(url_property.into()),
            ..Self::default()
        }
    }

    /// Validate the settings and resolve them into an [`ExportConfig`]
    pub fn check_requirements(&self) -> Result<ExportConfig, ConfigurationError> {
        let raw = match self.url_property.as_deref() {
            None | Some("") => return Err(ConfigurationError::MissingUrlProperty),
            Some(raw) => raw,
        };

        let url_property =
            PropertyPath::parse(raw).map_err(|reason| ConfigurationError::InvalidUrlProperty {
                value: raw.to_string(),
                reason,
            })?;

        if let Some(ids) = &self.ids {
            if ids.is_empty() {
                log::warn!(
                    "Destination declares an empty ids map; every import will fail to extract an identifier"
                );
            }
        }

        Ok(ExportConfig {
            url_property,
            format: self.format.unwrap_or_default(),
            ids: self.ids.clone(),
            fields: self.fields.clone().unwrap_or_default(),
        })
    }
}

impl TryFrom<DestinationSettings> for ExportConfig {
    type Error = ConfigurationError;

    fn try_from(settings: DestinationSettings) -> Result<Self, Self::Error> {
        settings.check_requirements()
    }
}

/// Validated destination configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    url_property: PropertyPath,
    format: RequestFormat,
    ids: Option<IdentifierSchema>,
    fields: FieldSchema,
}

impl ExportConfig {
    /// Config posting form bodies and tracking no identifiers
    pub fn new(url_property: PropertyPath) -> Self {
        Self {
            url_property,
            format: RequestFormat::default(),
            ids: None,
            fields: FieldSchema::new(),
        }
    }

    pub fn with_format(mut self, format: RequestFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_ids(mut self, ids: IdentifierSchema) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn with_fields(mut self, fields: FieldSchema) -> Self {
        self.fields = fields;
        self
    }

    pub fn url_property(&self) -> &PropertyPath {
        &self.url_property
    }

    pub fn format(&self) -> RequestFormat {
        self.format
    }

    /// Identifier fields expected back, if identifier tracking is configured
    pub fn expected_ids(&self) -> Option<&IdentifierSchema> {
        self.ids.as_ref()
    }

    /// Identifier shape this destination produces
    ///
    /// Falls back to `{id: string}` when no identifiers are configured.
    pub fn identifier_schema(&self) -> IdentifierSchema {
        self.ids.clone().unwrap_or_else(IdentifierSchema::default_id)
    }

    pub fn field_schema(&self) -> &FieldSchema {
        &self.fields
    }
}

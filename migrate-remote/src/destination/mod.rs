//! Remote destination
//!
//! Imports a record by POSTing its values to an endpoint URL taken from the
//! record itself, then maps the response onto the configured identifiers.
//!
//! ```text
//! record ──► drop url_property ──► encode (json | form | multipart) ──► POST url
//!                                                                          │
//!        Success / Identifiers / ExportError ◄── status + JSON body ◄──────┘
//! ```

mod error;
mod outcome;
mod response;

pub use error::ExportError;
pub use outcome::{ExportOutcome, IdentifierMap};
pub use response::{ResponseBody, Unextractable};

use log::{debug, warn};
use serde_json::Value;

use crate::config::{DestinationSettings, ExportConfig, FieldSchema, IdentifierSchema};
use crate::http::{HttpClient, RequestBody, TransportError};
use crate::record::Record;

/// Destination that POSTs each record to a remote HTTP endpoint
///
/// Holds only the validated configuration and the injected client, so a
/// single instance can serve concurrent imports.
#[derive(Debug, Clone)]
pub struct RemoteDestination<C> {
    config: ExportConfig,
    client: C,
}

impl<C: HttpClient> RemoteDestination<C> {
    pub fn new(config: ExportConfig, client: C) -> Self {
        Self { config, client }
    }

    /// Validate raw settings and build the destination
    ///
    /// Fails with [`ExportError::Configuration`] before any record is seen.
    pub fn from_settings(settings: &DestinationSettings, client: C) -> Result<Self, ExportError> {
        let config = settings.check_requirements()?;
        Ok(Self::new(config, client))
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Identifier shape this destination produces
    pub fn identifier_schema(&self) -> IdentifierSchema {
        self.config.identifier_schema()
    }

    /// Declared destination fields
    pub fn field_schema(&self) -> &FieldSchema {
        self.config.field_schema()
    }

    /// Import one record
    ///
    /// Issues exactly one POST. The record itself is not modified; the URL
    /// property is removed from a copy before encoding.
    pub async fn import(&self, record: &Record) -> Result<ExportOutcome, ExportError> {
        let url_property = self.config.url_property();
        let url = match record.get(url_property) {
            Some(Value::String(url)) => url.clone(),
            Some(Value::Null) | None => {
                return Err(TransportError::new(format!(
                    "record has no endpoint URL at '{}'",
                    url_property
                ))
                .into());
            }
            Some(other) => {
                return Err(TransportError::new(format!(
                    "endpoint URL at '{}' is not a string: {}",
                    url_property, other
                ))
                .into());
            }
        };

        let values = record.without(url_property);
        let format = self.config.format();
        debug!("POST {} ({} body, {} field(s))", url, format, values.len());

        let body = RequestBody::encode(format, values);
        let response = self.client.post(&url, body).await?;

        if !response.is_success() {
            warn!("POST {} rejected with status {}", url, response.status);
            return Err(ExportError::RemoteRejection {
                status: response.status,
            });
        }

        let Some(ids) = self.config.expected_ids() else {
            return Ok(ExportOutcome::Success);
        };

        match ResponseBody::decode(&response.body).extract(ids) {
            Ok(identifiers) => {
                debug!("POST {} returned identifiers {}", url, identifiers);
                Ok(ExportOutcome::Identifiers(identifiers))
            }
            Err(reason) => {
                warn!("POST {} accepted but {}", url, reason);
                Err(ExportError::UnextractableIdentifier(reason))
            }
        }
    }
}

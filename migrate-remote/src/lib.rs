//! Migration destination that POSTs records to a remote HTTP endpoint
//!
//! Each migrated [`Record`] carries the URL it must be sent to. The
//! [`RemoteDestination`] removes that property, encodes the remaining values
//! as JSON, a URL-encoded form or a multipart form, POSTs them, and maps the
//! JSON response onto the identifiers the migration engine tracks.
//!
//! ```no_run
//! use migrate_remote::{DestinationSettings, Record, RemoteDestination, ReqwestClient};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let settings: DestinationSettings = toml::from_str(r#"
//!     url_property = "endpoint"
//!     format = "json"
//!     ids = { order_id = { type = "string" } }
//! "#)?;
//! let destination = RemoteDestination::from_settings(&settings, ReqwestClient::new())?;
//!
//! let record = Record::from_json(serde_json::json!({
//!     "endpoint": "https://shop.example.com/api/orders",
//!     "title": "Order 1",
//! }))?;
//! let outcome = destination.import(&record).await?;
//! println!("{}", outcome);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod destination;
pub mod http;
pub mod record;

pub use config::{
    ConfigurationError, DestinationFile, DestinationSettings, ExportConfig, FieldSchema,
    IdDescriptor, IdType, IdentifierSchema,
};
pub use destination::{
    ExportError, ExportOutcome, IdentifierMap, RemoteDestination, ResponseBody, Unextractable,
};
pub use http::{HttpClient, HttpResponse, ReqwestClient, RequestBody, RequestFormat, TransportError};
pub use record::{PropertyPath, PropertyPathError, Record};

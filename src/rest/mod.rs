//! Declarative REST resources for the Kazoo API.
//!
//! This module turns compact resource declarations into callable operations:
//!
//! - **[`PathTemplate`]**: `{placeholder}` parsing and resolution
//! - **[`ResourceDescriptor`]**: the normalized description of one collection,
//!   built with a builder or deserialized from a [`ResourceSpec`]
//! - **[`Operation`]**: one synthesized, named request shape with a parameter
//!   signature
//! - **[`Registry`]**: the name-to-operation dispatch table, including the
//!   built-in Kazoo resource table
//!
//! # Example
//!
//! ```rust
//! use kazoo_api::rest::{OperationArgs, Registry};
//! use kazoo_api::HttpMethod;
//!
//! let registry = Registry::builtin().unwrap();
//! let reboot = registry.operation("reboot_device").unwrap();
//!
//! assert_eq!(reboot.signature(), ["account_id", "device_id", "data"]);
//!
//! let request = reboot
//!     .build_request(
//!         &OperationArgs::new()
//!             .param("account_id", "A1")
//!             .param("device_id", "D1")
//!             .data(serde_json::json!({})),
//!     )
//!     .unwrap();
//!
//! assert_eq!(request.http_method, HttpMethod::Post);
//! assert_eq!(request.path, "/accounts/A1/devices/D1/sync");
//! ```

mod descriptor;
mod operation;
pub mod path;
mod registry;
mod resources;

pub use descriptor::{
    ExtraView, ExtraViewSpec, MethodKind, ResourceDescriptor, ResourceDescriptorBuilder,
    ResourceSpec, Scope,
};
pub use operation::{Operation, OperationArgs, OperationKind, DATA_PARAM};
pub use path::PathTemplate;
pub use registry::Registry;
pub use resources::builtin_descriptors;

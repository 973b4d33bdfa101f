//! The operation registry.
//!
//! A [`Registry`] is an explicit dispatch table from operation name to
//! [`Operation`], built by registering [`ResourceDescriptor`]s. Every
//! operation name is unique across the whole registry.
//!
//! # Example
//!
//! ```rust
//! use kazoo_api::rest::{Registry, ResourceDescriptor};
//!
//! let mut registry = Registry::new();
//! registry
//!     .register(
//!         ResourceDescriptor::builder("vmbox", "/accounts/{account_id}/vmboxes/{vmbox_id}")
//!             .plural_name("vmboxes")
//!             .build()
//!             .unwrap(),
//!     )
//!     .unwrap();
//!
//! assert!(registry.operation("get_vmboxes").is_some());
//! assert_eq!(registry.len(), 6);
//! ```

use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::rest::descriptor::{ResourceDescriptor, ResourceSpec};
use crate::rest::operation::Operation;

/// Name-indexed operations and the descriptors they were synthesized from.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    resources: BTreeMap<String, ResourceDescriptor>,
    operations: BTreeMap<String, Operation>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry from a set of descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateOperation`] if two operations share a name.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = ResourceDescriptor>,
    ) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    /// Creates a registry from a JSON array of [`ResourceSpec`]s.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidResourceTable`] if the JSON does not
    /// match the expected shape, or any error from descriptor validation and
    /// registration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let specs: Vec<ResourceSpec> =
            serde_json::from_str(json).map_err(|e| ConfigError::InvalidResourceTable {
                reason: e.to_string(),
            })?;

        let descriptors = specs
            .into_iter()
            .map(ResourceDescriptor::from_spec)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_descriptors(descriptors)
    }

    /// Synthesizes and registers every operation of `descriptor`.
    ///
    /// Registration is atomic: on error nothing is added.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateOperation`] if an operation name is
    /// already registered (by this or another resource), and
    /// [`ConfigError::InvalidResourceTable`] if a resource with the same name
    /// is already registered.
    pub fn register(&mut self, descriptor: ResourceDescriptor) -> Result<&mut Self, ConfigError> {
        if self.resources.contains_key(descriptor.name()) {
            return Err(ConfigError::InvalidResourceTable {
                reason: format!("resource '{}' is registered twice", descriptor.name()),
            });
        }

        let operations = Operation::synthesize(&descriptor);
        let mut pending: BTreeMap<&str, &Operation> = BTreeMap::new();
        for operation in &operations {
            let clash = self
                .operations
                .get(operation.name())
                .map(Operation::resource)
                .or_else(|| pending.get(operation.name()).map(|op| op.resource()));
            if let Some(first) = clash {
                return Err(ConfigError::DuplicateOperation {
                    name: operation.name().to_string(),
                    first: first.to_string(),
                    second: descriptor.name().to_string(),
                });
            }
            pending.insert(operation.name(), operation);
        }

        tracing::debug!(
            "Registered resource {} with {} operations",
            descriptor.name(),
            operations.len()
        );

        for operation in operations {
            self.operations.insert(operation.name().to_string(), operation);
        }
        self.resources
            .insert(descriptor.name().to_string(), descriptor);
        Ok(self)
    }

    /// Looks up an operation by name.
    #[must_use]
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    /// Iterates operations in name order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.values()
    }

    /// Iterates the operations of one resource in name order.
    pub fn operations_for<'a>(&'a self, resource: &'a str) -> impl Iterator<Item = &'a Operation> {
        self.operations
            .values()
            .filter(move |op| op.resource() == resource)
    }

    /// Looks up a descriptor by resource name.
    #[must_use]
    pub fn resource(&self, name: &str) -> Option<&ResourceDescriptor> {
        self.resources.get(name)
    }

    /// Iterates descriptors in name order.
    pub fn resources(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.resources.values()
    }

    /// Returns the number of registered operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if no operation is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::descriptor::{ExtraView, MethodKind};

    fn user() -> ResourceDescriptor {
        ResourceDescriptor::builder("user", "/accounts/{account_id}/users/{user_id}")
            .build()
            .unwrap()
    }

    #[test]
    fn test_register_indexes_every_operation() {
        let mut registry = Registry::new();
        registry.register(user()).unwrap();

        assert_eq!(registry.len(), 6);
        assert_eq!(registry.operation("get_users").unwrap().resource(), "user");
        assert!(registry.resource("user").is_some());
        assert_eq!(registry.operations_for("user").count(), 6);
    }

    #[test]
    fn test_duplicate_across_resources_is_rejected() {
        let clashing = ResourceDescriptor::builder("agent", "/accounts/{account_id}/agents/{agent_id}")
            .methods(&[MethodKind::List])
            .extra_view(ExtraView::new("get_users", "users"))
            .build()
            .unwrap();

        let mut registry = Registry::new();
        registry.register(user()).unwrap();
        let result = registry.register(clashing);

        assert!(matches!(
            result,
            Err(ConfigError::DuplicateOperation { name, first, second })
                if name == "get_users" && first == "user" && second == "agent"
        ));
        assert_eq!(registry.len(), 6);
        assert!(registry.resource("agent").is_none());
    }

    #[test]
    fn test_duplicate_within_resource_is_rejected() {
        let descriptor = ResourceDescriptor::builder("user", "/accounts/{account_id}/users/{user_id}")
            .extra_view(ExtraView::new("get_user", "me"))
            .build()
            .unwrap();

        let result = Registry::from_descriptors([descriptor]);
        assert!(matches!(result, Err(ConfigError::DuplicateOperation { .. })));
    }

    #[test]
    fn test_same_resource_twice_is_rejected() {
        let mut registry = Registry::new();
        registry.register(user()).unwrap();
        assert!(matches!(
            registry.register(user()),
            Err(ConfigError::InvalidResourceTable { .. })
        ));
    }

    #[test]
    fn test_from_json() {
        let registry = Registry::from_json(
            r#"[
                {
                    "name": "conference",
                    "path": "/accounts/{account_id}/conferences/{conference_id}",
                    "exclude_methods": ["partial_update"],
                    "extra_views": ["participants"]
                }
            ]"#,
        )
        .unwrap();

        assert_eq!(registry.len(), 6);
        assert!(registry.operation("partial_update_conference").is_none());
        assert!(registry.operation("get_participants").is_some());
    }

    #[test]
    fn test_from_json_rejects_malformed_table() {
        assert!(matches!(
            Registry::from_json(r#"{"name": "x"}"#),
            Err(ConfigError::InvalidResourceTable { .. })
        ));
    }
}

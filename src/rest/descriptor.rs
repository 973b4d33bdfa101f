//! Declarative resource descriptors.
//!
//! A [`ResourceDescriptor`] is the normalized form of one REST collection:
//! its URL shape, which CRUD operations it exposes, what those operations are
//! called, and any extra (non-CRUD) views attached to it.
//!
//! Descriptors are built either with [`ResourceDescriptor::builder`] or from
//! a serde-deserializable [`ResourceSpec`], which is how JSON resource tables
//! are loaded. Either way they are validated once and immutable afterwards.
//!
//! # Example
//!
//! ```rust
//! use kazoo_api::rest::{ExtraView, MethodKind, ResourceDescriptor, Scope};
//! use kazoo_api::HttpMethod;
//!
//! let device = ResourceDescriptor::builder("device", "/accounts/{account_id}/devices/{device_id}")
//!     .extra_view(ExtraView::new("get_all_devices_status", "status"))
//!     .extra_view(
//!         ExtraView::new("reboot_device", "sync")
//!             .method(HttpMethod::Post)
//!             .scope(Scope::Object),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(device.base_path(), "/accounts/{account_id}/devices");
//! assert_eq!(device.required_args(), ["account_id"]);
//! assert_eq!(device.object_arg(), "device_id");
//! assert_eq!(device.method_name(MethodKind::List), "get_devices");
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::error::ConfigError;
use crate::rest::path::PathTemplate;

/// The CRUD operation kinds a resource can enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MethodKind {
    /// List the collection (`GET base_path`).
    List,
    /// Fetch one object (`GET base_path/{object}`).
    Detail,
    /// Create an object (`PUT base_path`).
    Create,
    /// Replace an object (`POST base_path/{object}`).
    Update,
    /// Merge into an object (`PATCH base_path/{object}`).
    PartialUpdate,
    /// Delete an object (`DELETE base_path/{object}`).
    Delete,
}

impl MethodKind {
    /// Every method kind, in canonical order.
    pub const ALL: [Self; 6] = [
        Self::List,
        Self::Detail,
        Self::Create,
        Self::Update,
        Self::PartialUpdate,
        Self::Delete,
    ];

    /// Returns the declarative name of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Detail => "detail",
            Self::Create => "create",
            Self::Update => "update",
            Self::PartialUpdate => "partial_update",
            Self::Delete => "delete",
        }
    }

    /// Returns the HTTP verb the Kazoo API uses for this kind.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        match self {
            Self::List | Self::Detail => HttpMethod::Get,
            Self::Create => HttpMethod::Put,
            Self::Update => HttpMethod::Post,
            Self::PartialUpdate => HttpMethod::Patch,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns `true` if the operation addresses a single object.
    #[must_use]
    pub const fn targets_object(&self) -> bool {
        !matches!(self, Self::List | Self::Create)
    }

    /// Returns `true` if the operation requires a `data` payload.
    #[must_use]
    pub const fn requires_body(&self) -> bool {
        matches!(self, Self::Create | Self::Update | Self::PartialUpdate)
    }

    /// Parses a declarative kind name. `object` is accepted as an alias for
    /// `detail`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownMethodKind`] for any other name.
    pub fn parse(kind: &str, resource: &str) -> Result<Self, ConfigError> {
        match kind {
            "list" => Ok(Self::List),
            "detail" | "object" => Ok(Self::Detail),
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "partial_update" => Ok(Self::PartialUpdate),
            "delete" => Ok(Self::Delete),
            _ => Err(ConfigError::UnknownMethodKind {
                resource: resource.to_string(),
                kind: kind.to_string(),
            }),
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an extra view is attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    /// A single object: needs the object identifier.
    Object,
    /// The whole collection: needs only the collection parameters.
    #[default]
    Aggregate,
    /// Nothing: the path is absolute.
    System,
}

impl Scope {
    /// Returns the declarative name of this scope.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Aggregate => "aggregate",
            Self::System => "system",
        }
    }

    fn parse(scope: &str, view: &str) -> Result<Self, ConfigError> {
        match scope {
            "object" => Ok(Self::Object),
            "aggregate" => Ok(Self::Aggregate),
            "system" => Ok(Self::System),
            _ => Err(ConfigError::UnknownScope {
                view: view.to_string(),
                scope: scope.to_string(),
            }),
        }
    }
}

/// A named, non-CRUD endpoint attached to a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraView {
    /// The emitted operation name.
    pub name: String,
    /// Path relative to the collection or object (or to the root for system scope).
    pub path: String,
    /// The HTTP verb.
    pub method: HttpMethod,
    /// What the view is attached to.
    pub scope: Scope,
}

impl ExtraView {
    /// Creates a `GET` view with aggregate scope.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            method: HttpMethod::Get,
            scope: Scope::Aggregate,
        }
    }

    /// Creates the view a bare string declares: named `get_<path>`.
    #[must_use]
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(format!("get_{path}"), path)
    }

    /// Sets the HTTP verb.
    #[must_use]
    pub const fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the scope.
    #[must_use]
    pub const fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Returns `true` if the view's operation requires a `data` payload.
    #[must_use]
    pub const fn requires_body(&self) -> bool {
        self.method.carries_body()
    }
}

/// The normalized, immutable description of one REST collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    name: String,
    plural_name: String,
    template: PathTemplate,
    base_path: String,
    required_args: Vec<String>,
    object_arg: String,
    enabled_methods: BTreeSet<MethodKind>,
    extra_views: Vec<ExtraView>,
    method_names: BTreeMap<MethodKind, String>,
}

impl ResourceDescriptor {
    /// Starts building a descriptor for `name` addressed by `path`.
    ///
    /// `path` is the full object-level template; its last placeholder is the
    /// object identifier.
    #[must_use]
    pub fn builder(name: impl Into<String>, path: impl Into<String>) -> ResourceDescriptorBuilder {
        ResourceDescriptorBuilder::new(name, path)
    }

    /// Returns the singular resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the plural resource name.
    #[must_use]
    pub fn plural_name(&self) -> &str {
        &self.plural_name
    }

    /// Returns the full object-level path template.
    #[must_use]
    pub const fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// Returns the collection-level path (the template without its object segment).
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the collection parameters, in path order.
    #[must_use]
    pub fn required_args(&self) -> &[String] {
        &self.required_args
    }

    /// Returns the object identifier parameter.
    #[must_use]
    pub fn object_arg(&self) -> &str {
        &self.object_arg
    }

    /// Returns the enabled CRUD kinds.
    #[must_use]
    pub const fn enabled_methods(&self) -> &BTreeSet<MethodKind> {
        &self.enabled_methods
    }

    /// Returns `true` if `kind` is enabled.
    #[must_use]
    pub fn is_enabled(&self, kind: MethodKind) -> bool {
        self.enabled_methods.contains(&kind)
    }

    /// Returns the extra views in declaration order.
    #[must_use]
    pub fn extra_views(&self) -> &[ExtraView] {
        &self.extra_views
    }

    /// Returns the operation name emitted for `kind`.
    #[must_use]
    pub fn method_name(&self, kind: MethodKind) -> &str {
        self.method_names
            .get(&kind)
            .map_or("", String::as_str)
    }

    /// Builds a descriptor from declarative input.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the path has no placeholder or any method
    /// kind, scope or verb is unknown.
    pub fn from_spec(spec: ResourceSpec) -> Result<Self, ConfigError> {
        let name = spec.name;
        let parse_kinds = |kinds: &[String]| -> Result<Vec<MethodKind>, ConfigError> {
            kinds.iter().map(|k| MethodKind::parse(k, &name)).collect()
        };

        let mut builder = ResourceDescriptorBuilder::new(name.clone(), spec.path);
        if let Some(plural_name) = spec.plural_name {
            builder = builder.plural_name(plural_name);
        }
        if let Some(methods) = &spec.methods {
            builder = builder.methods(&parse_kinds(methods)?);
        }
        builder = builder.exclude_methods(&parse_kinds(&spec.exclude_methods)?);

        for view in spec.extra_views {
            builder = builder.extra_view(view.into_extra_view()?);
        }

        let mut overrides: Vec<_> = spec.method_names.into_iter().collect();
        overrides.sort();
        for (kind, method_name) in overrides {
            builder = builder.method_name(MethodKind::parse(&kind, &name)?, method_name);
        }

        builder.build()
    }
}

/// Builder for [`ResourceDescriptor`].
#[derive(Debug)]
pub struct ResourceDescriptorBuilder {
    name: String,
    path: String,
    plural_name: Option<String>,
    methods: Vec<MethodKind>,
    excluded: Vec<MethodKind>,
    extra_views: Vec<ExtraView>,
    method_names: Vec<(MethodKind, String)>,
}

impl ResourceDescriptorBuilder {
    fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            plural_name: None,
            methods: MethodKind::ALL.to_vec(),
            excluded: Vec::new(),
            extra_views: Vec::new(),
            method_names: Vec::new(),
        }
    }

    /// Overrides the plural name (defaults to `name + "s"`).
    #[must_use]
    pub fn plural_name(mut self, plural_name: impl Into<String>) -> Self {
        self.plural_name = Some(plural_name.into());
        self
    }

    /// Replaces the enabled method kinds (defaults to all of them).
    #[must_use]
    pub fn methods(mut self, methods: &[MethodKind]) -> Self {
        self.methods = methods.to_vec();
        self
    }

    /// Removes method kinds from the enabled set.
    #[must_use]
    pub fn exclude_methods(mut self, methods: &[MethodKind]) -> Self {
        self.excluded.extend_from_slice(methods);
        self
    }

    /// Appends an extra view.
    #[must_use]
    pub fn extra_view(mut self, view: ExtraView) -> Self {
        self.extra_views.push(view);
        self
    }

    /// Overrides the operation name emitted for `kind`.
    #[must_use]
    pub fn method_name(mut self, kind: MethodKind, name: impl Into<String>) -> Self {
        self.method_names.push((kind, name.into()));
        self
    }

    /// Validates the path and produces the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPathParameters`] if the path has no placeholder.
    pub fn build(self) -> Result<ResourceDescriptor, ConfigError> {
        let template = PathTemplate::new(self.path);
        let required_args = template
            .required_args()?
            .into_iter()
            .map(String::from)
            .collect();
        let object_arg = template.object_arg()?.to_string();
        let base_path = template.base_path()?.to_string();

        let enabled_methods = self
            .methods
            .into_iter()
            .filter(|kind| !self.excluded.contains(kind))
            .collect();

        let plural_name = self
            .plural_name
            .unwrap_or_else(|| format!("{}s", self.name));

        let mut method_names = BTreeMap::new();
        method_names.insert(MethodKind::List, format!("get_{plural_name}"));
        method_names.insert(MethodKind::Detail, format!("get_{}", self.name));
        method_names.insert(MethodKind::Create, format!("create_{}", self.name));
        method_names.insert(MethodKind::Update, format!("update_{}", self.name));
        method_names.insert(
            MethodKind::PartialUpdate,
            format!("partial_update_{}", self.name),
        );
        method_names.insert(MethodKind::Delete, format!("delete_{}", self.name));
        method_names.extend(self.method_names);

        Ok(ResourceDescriptor {
            name: self.name,
            plural_name,
            template,
            base_path,
            required_args,
            object_arg,
            enabled_methods,
            extra_views: self.extra_views,
            method_names,
        })
    }
}

/// Declarative input for one resource, as found in JSON resource tables.
///
/// ```json
/// {
///   "name": "device",
///   "path": "/accounts/{account_id}/devices/{device_id}",
///   "extra_views": [
///     "status",
///     {"name": "reboot_device", "path": "sync", "scope": "object", "method": "post"}
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpec {
    /// Singular resource name.
    pub name: String,
    /// Full object-level path template.
    pub path: String,
    /// Plural name, when not `name + "s"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural_name: Option<String>,
    /// Enabled method kinds; all of them when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<String>>,
    /// Method kinds to remove from the enabled set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_methods: Vec<String>,
    /// Extra views: bare path strings or full objects.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_views: Vec<ExtraViewSpec>,
    /// Operation name overrides keyed by method kind.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub method_names: HashMap<String, String>,
}

/// Declarative input for one extra view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtraViewSpec {
    /// A bare path; the operation is named `get_<path>`.
    Path(String),
    /// A fully specified view. `method` defaults to `get`, `scope` to `aggregate`.
    Full {
        /// The emitted operation name.
        name: String,
        /// The relative path.
        path: String,
        /// The HTTP verb.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        method: Option<String>,
        /// The scope.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scope: Option<String>,
    },
}

impl ExtraViewSpec {
    /// Normalizes into an [`ExtraView`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownVerb`] or [`ConfigError::UnknownScope`]
    /// for unrecognized values.
    pub fn into_extra_view(self) -> Result<ExtraView, ConfigError> {
        match self {
            Self::Path(path) => Ok(ExtraView::from_path(path)),
            Self::Full {
                name,
                path,
                method,
                scope,
            } => {
                let method = match method {
                    Some(verb) => verb.parse::<HttpMethod>().map_err(|_| ConfigError::UnknownVerb {
                        view: name.clone(),
                        verb,
                    })?,
                    None => HttpMethod::Get,
                };
                let scope = match scope {
                    Some(scope) => Scope::parse(&scope, &name)?,
                    None => Scope::default(),
                };
                Ok(ExtraView::new(name, path).method(method).scope(scope))
            }
        }
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceDescriptor>();
    assert_send_sync::<ExtraView>();
};

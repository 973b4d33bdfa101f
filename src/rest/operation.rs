//! Operations synthesized from resource descriptors.
//!
//! Every enabled CRUD kind and every extra view of a [`ResourceDescriptor`]
//! becomes one [`Operation`]: a named, fully described request shape with a
//! parameter signature. Calling [`Operation::build_request`] with
//! [`OperationArgs`] validates the arguments and produces an [`HttpRequest`].
//!
//! # Path shapes
//!
//! | Kind                  | Verb   | Path                         |
//! |-----------------------|--------|------------------------------|
//! | list                  | GET    | `base_path`                  |
//! | detail                | GET    | `base_path/{object}`         |
//! | create                | PUT    | `base_path`                  |
//! | update                | POST   | `base_path/{object}`         |
//! | partial update        | PATCH  | `base_path/{object}`         |
//! | delete                | DELETE | `base_path/{object}`         |
//! | extra view, aggregate | any    | `base_path/<rel>`            |
//! | extra view, object    | any    | `base_path/{object}/<rel>`   |
//! | extra view, system    | any    | `/<rel>`                     |

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::clients::{HttpMethod, HttpRequest, KazooError};
use crate::rest::descriptor::{ExtraView, MethodKind, ResourceDescriptor, Scope};
use crate::rest::path;

/// Name of the body argument in operation signatures.
pub const DATA_PARAM: &str = "data";

/// Arguments for one operation call.
///
/// # Example
///
/// ```rust
/// use kazoo_api::rest::OperationArgs;
/// use serde_json::json;
///
/// let args = OperationArgs::new()
///     .param("account_id", "A1")
///     .data(json!({"name": "Front desk"}))
///     .query_param("paginate", "false");
///
/// assert_eq!(args.get("account_id"), Some("A1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationArgs {
    params: HashMap<String, String>,
    data: Option<Value>,
    query: BTreeMap<String, String>,
}

impl OperationArgs {
    /// Creates empty arguments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates arguments from `(name, value)` path parameter pairs.
    #[must_use]
    pub fn with_params<K, V>(params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        params
            .into_iter()
            .fold(Self::new(), |args, (name, value)| args.param(name, value))
    }

    /// Sets a path parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Sets the payload sent as the envelope's `data` member.
    #[must_use]
    pub fn data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Merges a set of query parameters.
    #[must_use]
    pub fn query(mut self, query: BTreeMap<String, String>) -> Self {
        self.query.extend(query);
        self
    }

    /// Returns a path parameter value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Where an operation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// One of the CRUD kinds.
    Method(MethodKind),
    /// An extra view with the given scope.
    ExtraView(Scope),
}

/// A callable, named API operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    name: String,
    resource: String,
    kind: OperationKind,
    method: HttpMethod,
    template: String,
    path_params: Vec<String>,
    requires_body: bool,
}

impl Operation {
    /// Synthesizes the operation for an enabled CRUD kind.
    #[must_use]
    pub fn for_method(descriptor: &ResourceDescriptor, kind: MethodKind) -> Self {
        let base_path = descriptor.base_path();
        let mut path_params = descriptor.required_args().to_vec();

        let template = if kind.targets_object() {
            path_params.push(descriptor.object_arg().to_string());
            format!("{base_path}/{{{}}}", descriptor.object_arg())
        } else {
            base_path.to_string()
        };

        Self {
            name: descriptor.method_name(kind).to_string(),
            resource: descriptor.name().to_string(),
            kind: OperationKind::Method(kind),
            method: kind.http_method(),
            template,
            path_params,
            requires_body: kind.requires_body(),
        }
    }

    /// Synthesizes the operation for an extra view.
    ///
    /// System-scoped views keep the resource's collection parameters in their
    /// signature even though the absolute path ignores them. Placeholders in
    /// the view's own path are appended to the signature.
    #[must_use]
    pub fn for_extra_view(descriptor: &ResourceDescriptor, view: &ExtraView) -> Self {
        let base_path = descriptor.base_path();
        let mut path_params = descriptor.required_args().to_vec();

        let mut template = match view.scope {
            Scope::Aggregate => base_path.to_string(),
            Scope::Object => {
                path_params.push(descriptor.object_arg().to_string());
                format!("{base_path}/{{{}}}", descriptor.object_arg())
            }
            Scope::System => String::new(),
        };
        if !view.path.is_empty() || view.scope == Scope::System {
            template.push('/');
            template.push_str(&view.path);
        }

        for name in path::parse(&view.path) {
            if !path_params.iter().any(|p| p == name) {
                path_params.push(name.to_string());
            }
        }

        Self {
            name: view.name.clone(),
            resource: descriptor.name().to_string(),
            kind: OperationKind::ExtraView(view.scope),
            method: view.method,
            template,
            path_params,
            requires_body: view.requires_body(),
        }
    }

    /// Synthesizes every operation a descriptor exposes: CRUD kinds in
    /// canonical order, then extra views in declaration order.
    #[must_use]
    pub fn synthesize(descriptor: &ResourceDescriptor) -> Vec<Self> {
        let methods = descriptor
            .enabled_methods()
            .iter()
            .map(|kind| Self::for_method(descriptor, *kind));
        let views = descriptor
            .extra_views()
            .iter()
            .map(|view| Self::for_extra_view(descriptor, view));
        methods.chain(views).collect()
    }

    /// Returns the operation name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name of the resource the operation belongs to.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Returns where the operation came from.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Returns the HTTP verb.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the unresolved path template.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the required path parameters, in signature order.
    #[must_use]
    pub fn path_params(&self) -> &[String] {
        &self.path_params
    }

    /// Returns `true` if a `data` payload is required.
    #[must_use]
    pub const fn requires_body(&self) -> bool {
        self.requires_body
    }

    /// Returns the full parameter signature: path parameters followed by
    /// `data` when a payload is required.
    #[must_use]
    pub fn signature(&self) -> Vec<&str> {
        let mut signature: Vec<&str> = self.path_params.iter().map(String::as_str).collect();
        if self.requires_body {
            signature.push(DATA_PARAM);
        }
        signature
    }

    /// Returns `true` if query parameters are sent with this operation.
    #[must_use]
    pub fn accepts_query(&self) -> bool {
        self.method == HttpMethod::Get || matches!(self.kind, OperationKind::ExtraView(_))
    }

    /// Validates `args` against the signature and builds the request.
    ///
    /// Query parameters are attached to GET operations and extra views only;
    /// other CRUD operations ignore them. A payload is attached when the verb
    /// carries one, whether or not it is required.
    ///
    /// # Errors
    ///
    /// Returns [`KazooError::MissingParameter`] naming the first signature
    /// argument that was not supplied.
    pub fn build_request(&self, args: &OperationArgs) -> Result<HttpRequest, KazooError> {
        if let Some(missing) = self
            .path_params
            .iter()
            .find(|name| !args.params.contains_key(name.as_str()))
        {
            return Err(KazooError::MissingParameter {
                name: missing.clone(),
            });
        }
        if self.requires_body && args.data.is_none() {
            return Err(KazooError::MissingParameter {
                name: DATA_PARAM.to_string(),
            });
        }

        let path = path::resolve(&self.template, &args.params)?;
        let mut builder = HttpRequest::builder(self.method, path);

        if let Some(data) = args.data.as_ref().filter(|_| self.method.carries_body()) {
            builder = builder.body(data.clone());
        }
        if !args.query.is_empty() {
            if self.accepts_query() {
                builder = builder.query(args.query.clone());
            } else {
                tracing::debug!(
                    "Ignoring query parameters passed to {} ({})",
                    self.name,
                    self.method
                );
            }
        }

        builder.build()
    }
}

//! Path template parsing and resolution.
//!
//! Kazoo resources are addressed through templates such as
//! `/accounts/{account_id}/devices/{device_id}`. Every `{name}` placeholder is
//! a parameter; the last one identifies a single object and the ones before
//! it scope the collection.
//!
//! # Example
//!
//! ```rust
//! use kazoo_api::rest::PathTemplate;
//! use std::collections::HashMap;
//!
//! let template = PathTemplate::new("/accounts/{account_id}/devices/{device_id}");
//! assert_eq!(template.params(), vec!["account_id", "device_id"]);
//! assert_eq!(template.required_args().unwrap(), vec!["account_id"]);
//! assert_eq!(template.object_arg().unwrap(), "device_id");
//! assert_eq!(template.base_path().unwrap(), "/accounts/{account_id}/devices");
//!
//! let mut values = HashMap::new();
//! values.insert("account_id".to_string(), "A1".to_string());
//! values.insert("device_id".to_string(), "D1".to_string());
//! assert_eq!(template.resolve(&values).unwrap(), "/accounts/A1/devices/D1");
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use crate::clients::KazooError;
use crate::error::ConfigError;

/// Returns the placeholder names in `template`, in order of appearance.
///
/// A placeholder is `{` followed by one or more `[A-Za-z0-9_]` characters and
/// `}`. Anything else between braces is left alone. Repeated names are kept.
#[must_use]
pub fn parse(template: &str) -> Vec<&str> {
    placeholders(template).map(|(_, name)| name).collect()
}

/// Iterates `(byte_offset_of_open_brace, name)` for each placeholder.
fn placeholders(template: &str) -> impl Iterator<Item = (usize, &str)> {
    let bytes = template.as_bytes();
    let mut cursor = 0;

    std::iter::from_fn(move || {
        while cursor < bytes.len() {
            let open = cursor + template[cursor..].find('{')?;
            let name_start = open + 1;
            let name_len = template[name_start..]
                .bytes()
                .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
                .count();
            let close = name_start + name_len;

            if name_len > 0 && bytes.get(close) == Some(&b'}') {
                cursor = close + 1;
                return Some((open, &template[name_start..close]));
            }
            cursor = name_start;
        }
        None
    })
}

/// Percent-encodes a value for use as a single path segment.
///
/// Everything outside the unreserved set is escaped, so a value can neither
/// add segments (`/`), start a query (`?`, `#`) nor look like a placeholder.
#[must_use]
pub fn encode_segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Returns the first placeholder still present in `path`, if any.
///
/// Used as a pre-flight check on a resolved path before it goes on the wire.
/// Values substituted by [`resolve`] are encoded and never match.
#[must_use]
pub fn unresolved(path: &str) -> Option<&str> {
    placeholders(path).next().map(|(_, name)| name)
}

/// A templated resource path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathTemplate(String);

impl PathTemplate {
    /// Wraps a template string. No validation happens here; the
    /// resource-level checks live in [`required_args`](Self::required_args)
    /// and [`object_arg`](Self::object_arg).
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Returns the raw template.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns every placeholder name in order.
    #[must_use]
    pub fn params(&self) -> Vec<&str> {
        parse(&self.0)
    }

    /// Returns all placeholder names except the last.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPathParameters`] if the template has no placeholder.
    pub fn required_args(&self) -> Result<Vec<&str>, ConfigError> {
        let mut params = self.checked_params()?;
        params.pop();
        Ok(params)
    }

    /// Returns the last placeholder name, the object identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPathParameters`] if the template has no placeholder.
    pub fn object_arg(&self) -> Result<&str, ConfigError> {
        self.checked_params()?
            .pop()
            .ok_or_else(|| self.no_parameters())
    }

    /// Returns the template truncated before its final placeholder segment.
    ///
    /// `/accounts/{account_id}/devices/{device_id}` becomes
    /// `/accounts/{account_id}/devices`; `/accounts/{account_id}` becomes
    /// `/accounts`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPathParameters`] if the template has no placeholder.
    pub fn base_path(&self) -> Result<&str, ConfigError> {
        let (open, _) = placeholders(&self.0)
            .last()
            .ok_or_else(|| self.no_parameters())?;
        let prefix = &self.0[..open];
        Ok(prefix.strip_suffix('/').unwrap_or(prefix))
    }

    /// Substitutes every placeholder with its value from `values`.
    ///
    /// # Errors
    ///
    /// Returns [`KazooError::MissingParameter`] naming the first placeholder
    /// that has no value.
    #[allow(clippy::implicit_hasher)]
    pub fn resolve(&self, values: &HashMap<String, String>) -> Result<String, KazooError> {
        resolve(&self.0, values)
    }

    fn checked_params(&self) -> Result<Vec<&str>, ConfigError> {
        let params = self.params();
        if params.is_empty() {
            return Err(self.no_parameters());
        }
        Ok(params)
    }

    fn no_parameters(&self) -> ConfigError {
        ConfigError::NoPathParameters {
            path: self.0.clone(),
        }
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PathTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

/// Substitutes every placeholder in `template` with its value from `values`.
///
/// Each value is encoded with [`encode_segment`].
///
/// # Errors
///
/// Returns [`KazooError::MissingParameter`] naming the first placeholder that
/// has no value.
#[allow(clippy::implicit_hasher)]
pub fn resolve(template: &str, values: &HashMap<String, String>) -> Result<String, KazooError> {
    let mut result = String::with_capacity(template.len());
    let mut last = 0;

    for (open, name) in placeholders(template) {
        let value = values
            .get(name)
            .ok_or_else(|| KazooError::MissingParameter {
                name: name.to_string(),
            })?;
        result.push_str(&template[last..open]);
        result.push_str(&encode_segment(value));
        last = open + name.len() + 2;
    }
    result.push_str(&template[last..]);

    Ok(result)
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PathTemplate>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_parse_preserves_order() {
        assert_eq!(
            parse("/accounts/{account_id}/users/{user_id}/devices/{device_id}"),
            vec!["account_id", "user_id", "device_id"]
        );
    }

    #[test]
    fn test_parse_keeps_duplicates() {
        assert_eq!(parse("/a/{x}/b/{x}"), vec!["x", "x"]);
    }

    #[test]
    fn test_parse_ignores_non_placeholder_braces() {
        assert_eq!(parse("/a/{}/b/{not-valid}/{ok}"), vec!["ok"]);
        assert!(parse("/about").is_empty());
        assert!(parse("/dangling/{open").is_empty());
    }

    #[test]
    fn test_single_placeholder_has_no_required_args() {
        let template = PathTemplate::new("/accounts/{account_id}");
        assert!(template.required_args().unwrap().is_empty());
        assert_eq!(template.object_arg().unwrap(), "account_id");
        assert_eq!(template.base_path().unwrap(), "/accounts");
    }

    #[test]
    fn test_zero_placeholders_is_configuration_error() {
        let template = PathTemplate::new("/about");
        assert!(matches!(
            template.required_args(),
            Err(ConfigError::NoPathParameters { .. })
        ));
        assert!(matches!(
            template.object_arg(),
            Err(ConfigError::NoPathParameters { .. })
        ));
        assert!(template.base_path().is_err());
    }

    #[test]
    fn test_resolve_substitutes_every_placeholder() {
        let result = resolve(
            "/accounts/{account_id}/devices/{device_id}",
            &values(&[("account_id", "A1"), ("device_id", "D1")]),
        )
        .unwrap();
        assert_eq!(result, "/accounts/A1/devices/D1");
    }

    #[test]
    fn test_resolve_repeated_placeholder() {
        let result = resolve("/{x}/{x}", &values(&[("x", "1")])).unwrap();
        assert_eq!(result, "/1/1");
    }

    #[test]
    fn test_resolve_names_first_missing_placeholder() {
        let result = resolve(
            "/accounts/{account_id}/devices/{device_id}",
            &values(&[("device_id", "D1")]),
        );
        assert!(matches!(
            result,
            Err(KazooError::MissingParameter { name }) if name == "account_id"
        ));
    }

    #[test]
    fn test_resolve_ignores_extra_values() {
        let result = resolve("/about", &values(&[("unused", "x")])).unwrap();
        assert_eq!(result, "/about");
    }

    #[test]
    fn test_resolve_encodes_reserved_characters() {
        let result = resolve(
            "/accounts/{account_id}/devices/{device_id}",
            &values(&[("account_id", "A1"), ("device_id", "D1/../../../about?x=#")]),
        )
        .unwrap();
        assert_eq!(result, "/accounts/A1/devices/D1%2F..%2F..%2F..%2Fabout%3Fx%3D%23");
    }

    #[test]
    fn test_resolved_braces_are_not_placeholders() {
        let result = resolve("/accounts/{account_id}", &values(&[("account_id", "{x}")])).unwrap();
        assert_eq!(result, "/accounts/%7Bx%7D");
        assert_eq!(unresolved(&result), None);
    }

    #[test]
    fn test_unresolved_detects_leftover_placeholder() {
        assert_eq!(unresolved("/accounts/A1/devices/{device_id}"), Some("device_id"));
        assert_eq!(unresolved("/accounts/A1/devices/D1"), None);
    }
}

//! The Kazoo API client.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::auth::{AuthManager, AuthState, AuthToken};
use crate::clients::{
    Envelope, Executor, FileUpload, HttpMethod, HttpRequest, KazooError, ReqwestTransport,
    Transport,
};
use crate::config::{BaseUrl, KazooConfig};
use crate::rest::path::encode_segment;
use crate::rest::{Operation, OperationArgs, Registry};

/// Client for the Kazoo REST API.
///
/// Ties together the operation [`Registry`], the request [`Executor`] and the
/// [`AuthManager`]. Every call that requires authentication logs in on first
/// use. If the server rejects the token, the client re-authenticates once and
/// retries the request once; a second rejection is returned to the caller.
///
/// # Thread Safety
///
/// `KazooClient` is `Send + Sync`; share it across tasks with an `Arc`.
///
/// # Example
///
/// ```rust,ignore
/// use kazoo_api::{ApiKey, KazooClient, KazooConfig};
/// use kazoo_api::rest::OperationArgs;
///
/// let config = KazooConfig::builder()
///     .api_key(ApiKey::new("my-api-key")?)
///     .build()?;
/// let client = KazooClient::new(&config)?;
///
/// client.authenticate().await?;
/// let devices = client
///     .call("get_devices", &OperationArgs::new().param("account_id", "A1"))
///     .await?;
/// println!("{}", devices.data);
/// ```
#[derive(Debug)]
pub struct KazooClient {
    registry: Arc<Registry>,
    executor: Executor,
    auth: AuthManager,
}

// Verify KazooClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KazooClient>();
};

impl KazooClient {
    /// Creates a client with the built-in resource table and the default
    /// `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns [`KazooError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &KazooConfig) -> Result<Self, KazooError> {
        let transport = Arc::new(ReqwestTransport::new()?);
        Ok(Self::with_transport(config, Registry::builtin()?, transport))
    }

    /// Creates a client with a custom registry and transport.
    #[must_use]
    pub fn with_transport(
        config: &KazooConfig,
        registry: Registry,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let executor = Executor::new(config, transport);
        let auth = AuthManager::new(config.credentials().clone(), executor.clone());

        tracing::debug!(
            "Created Kazoo client for {} with {} operations",
            config.base_url(),
            registry.len()
        );

        Self {
            registry: Arc::new(registry),
            executor,
            auth,
        }
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        self.executor.base_url()
    }

    /// Returns the operation registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Iterates the available operations in name order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.registry.operations()
    }

    /// Looks up an operation by name.
    #[must_use]
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.registry.operation(name)
    }

    /// Returns the current authentication state.
    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        self.auth.state()
    }

    /// Returns the authenticated account, once logged in.
    #[must_use]
    pub fn account_id(&self) -> Option<String> {
        self.auth.account_id()
    }

    /// Returns the held token without logging in.
    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        self.auth.current()
    }

    /// Logs in if no token is held and returns the token.
    ///
    /// Calling this again while authenticated performs no I/O.
    ///
    /// # Errors
    ///
    /// Returns the login exchange's error.
    pub async fn authenticate(&self) -> Result<AuthToken, KazooError> {
        self.auth.authenticate().await
    }

    /// Invokes a registered operation by name.
    ///
    /// # Errors
    ///
    /// - [`KazooError::UnknownOperation`] if no operation has this name
    /// - [`KazooError::MissingParameter`] if `args` does not satisfy the
    ///   operation's signature (raised before any I/O)
    /// - any error from [`execute`](Self::execute)
    pub async fn call(&self, name: &str, args: &OperationArgs) -> Result<Envelope, KazooError> {
        let operation = self
            .registry
            .operation(name)
            .ok_or_else(|| KazooError::UnknownOperation {
                name: name.to_string(),
            })?;
        let request = operation.build_request(args)?;
        self.execute(&request).await
    }

    /// Sends a request, attaching the auth token when required.
    ///
    /// An authentication failure triggers one re-authentication and one
    /// retry. Requests that do not require auth are never retried.
    ///
    /// # Errors
    ///
    /// Returns [`KazooError::MissingParameter`] for unresolved paths before
    /// any I/O, login errors, and any error from the executor.
    pub async fn execute(&self, request: &HttpRequest) -> Result<Envelope, KazooError> {
        request.verify()?;

        if !request.auth_required {
            return self.executor.execute(request, None).await;
        }

        let token = self.auth.authenticate().await?;
        match self.executor.execute(request, Some(token.token())).await {
            Err(e) if e.is_authentication() => {
                tracing::warn!(
                    "Kazoo authentication failed. Attempting to re-authenticate and retry: {}",
                    e
                );
                let fresh = self.auth.reauthenticate(Some(&token)).await?;
                self.executor.execute(request, Some(fresh.token())).await
            }
            result => result,
        }
    }

    /// `GET /about`
    ///
    /// # Errors
    ///
    /// Any error from [`execute`](Self::execute).
    pub async fn get_about(&self) -> Result<Envelope, KazooError> {
        self.execute(&HttpRequest::builder(HttpMethod::Get, "/about").build()?)
            .await
    }

    /// `PUT /ip_auth`, sent without a token.
    ///
    /// # Errors
    ///
    /// Any error from [`execute`](Self::execute).
    pub async fn create_ip_auth(&self) -> Result<Envelope, KazooError> {
        let request = HttpRequest::builder(HttpMethod::Put, "/ip_auth")
            .auth_required(false)
            .build()?;
        self.execute(&request).await
    }

    /// `GET /phone_numbers?prefix=..&quantity=..`
    ///
    /// # Errors
    ///
    /// Any error from [`execute`](Self::execute).
    pub async fn search_phone_numbers(
        &self,
        prefix: &str,
        quantity: u32,
    ) -> Result<Envelope, KazooError> {
        let request = HttpRequest::builder(HttpMethod::Get, "/phone_numbers")
            .query_param("prefix", prefix)
            .query_param("quantity", quantity.to_string())
            .build()?;
        self.execute(&request).await
    }

    /// `PUT /accounts/{account_id}/phone_numbers/{number}`
    ///
    /// # Errors
    ///
    /// Any error from [`execute`](Self::execute).
    pub async fn create_phone_number(
        &self,
        account_id: &str,
        number: &str,
    ) -> Result<Envelope, KazooError> {
        let path = format!(
            "/accounts/{}/phone_numbers/{}",
            encode_segment(account_id),
            encode_segment(number)
        );
        self.execute(&HttpRequest::builder(HttpMethod::Put, path).build()?)
            .await
    }

    /// `GET /accounts/{account_id}/phone_numbers/{number}`
    ///
    /// # Errors
    ///
    /// Any error from [`execute`](Self::execute).
    pub async fn get_phone_number(
        &self,
        account_id: &str,
        number: &str,
    ) -> Result<Envelope, KazooError> {
        let path = format!(
            "/accounts/{}/phone_numbers/{}",
            encode_segment(account_id),
            encode_segment(number)
        );
        self.execute(&HttpRequest::builder(HttpMethod::Get, path).build()?)
            .await
    }

    /// `POST /accounts/{account_id}/media/{media_id}/raw` with the audio file
    /// as multipart form data.
    ///
    /// # Errors
    ///
    /// Any error from [`execute`](Self::execute).
    pub async fn upload_media_file(
        &self,
        account_id: &str,
        media_id: &str,
        file: FileUpload,
    ) -> Result<Envelope, KazooError> {
        let path = format!(
            "/accounts/{}/media/{}/raw",
            encode_segment(account_id),
            encode_segment(media_id)
        );
        let request = HttpRequest::builder(HttpMethod::Post, path).file(file).build()?;
        self.execute(&request).await
    }

    /// `POST /accounts/{account_id}/phone_numbers/{number}` with a document
    /// (for example a port request form) as multipart form data.
    ///
    /// # Errors
    ///
    /// Any error from [`execute`](Self::execute).
    pub async fn upload_phone_number_file(
        &self,
        account_id: &str,
        number: &str,
        file: FileUpload,
    ) -> Result<Envelope, KazooError> {
        let path = format!(
            "/accounts/{}/phone_numbers/{}",
            encode_segment(account_id),
            encode_segment(number)
        );
        let request = HttpRequest::builder(HttpMethod::Post, path).file(file).build()?;
        self.execute(&request).await
    }

    /// `GET /accounts/{account_id}/devices?filter_owner_id={owner_id}`
    ///
    /// # Errors
    ///
    /// Any error from [`execute`](Self::execute).
    pub async fn list_devices_by_owner(
        &self,
        account_id: &str,
        owner_id: &str,
    ) -> Result<Envelope, KazooError> {
        let request = HttpRequest::builder(
            HttpMethod::Get,
            format!("/accounts/{}/devices", encode_segment(account_id)),
        )
            .query_param("filter_owner_id", owner_id)
            .build()?;
        self.execute(&request).await
    }

    /// `GET /accounts/{account_id}/children`
    ///
    /// # Errors
    ///
    /// Any error from [`execute`](Self::execute).
    pub async fn list_child_accounts(&self, account_id: &str) -> Result<Envelope, KazooError> {
        let path = format!("/accounts/{}/children", encode_segment(account_id));
        self.execute(&HttpRequest::builder(HttpMethod::Get, path).build()?)
            .await
    }

    /// `DELETE /accounts/{account_id}/phone_numbers/collection` with `data`
    /// listing the numbers.
    ///
    /// Uses the authenticated account when `account_id` is `None`.
    ///
    /// # Errors
    ///
    /// Any error from [`execute`](Self::execute).
    pub async fn delete_numbers_collection(
        &self,
        account_id: Option<&str>,
        data: Value,
    ) -> Result<Envelope, KazooError> {
        let account_id = self.account_or_default(account_id).await?;
        let request = HttpRequest::builder(
            HttpMethod::Delete,
            format!(
                "/accounts/{}/phone_numbers/collection",
                encode_segment(&account_id)
            ),
        )
        .body(data)
        .build()?;
        self.execute(&request).await
    }

    /// `GET /accounts/{account_id}/phone_numbers/prefix?...`
    ///
    /// Uses the authenticated account when `account_id` is `None`.
    ///
    /// # Errors
    ///
    /// Any error from [`execute`](Self::execute).
    pub async fn list_numbers_by_prefix(
        &self,
        account_id: Option<&str>,
        query: BTreeMap<String, String>,
    ) -> Result<Envelope, KazooError> {
        let account_id = self.account_or_default(account_id).await?;
        let request = HttpRequest::builder(
            HttpMethod::Get,
            format!(
                "/accounts/{}/phone_numbers/prefix",
                encode_segment(&account_id)
            ),
        )
        .query(query)
        .build()?;
        self.execute(&request).await
    }

    /// `GET /sup/<arg>/<arg>/...`
    ///
    /// # Errors
    ///
    /// Any error from [`execute`](Self::execute).
    pub async fn run_sup_command(&self, args: &[&str]) -> Result<Envelope, KazooError> {
        let path = std::iter::once(Cow::Borrowed("/sup"))
            .chain(args.iter().map(|arg| encode_segment(arg)))
            .collect::<Vec<_>>()
            .join("/");
        self.execute(&HttpRequest::builder(HttpMethod::Get, path).build()?)
            .await
    }

    /// `GET [/accounts/{account_id}]/search[/multi]?...`
    ///
    /// # Errors
    ///
    /// Any error from [`execute`](Self::execute).
    pub async fn search(
        &self,
        account_id: Option<&str>,
        query: BTreeMap<String, String>,
        multi: bool,
    ) -> Result<Envelope, KazooError> {
        let mut path = account_id.map_or_else(
            || "/search".to_string(),
            |account_id| format!("/accounts/{}/search", encode_segment(account_id)),
        );
        if multi {
            path.push_str("/multi");
        }
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query(query)
            .build()?;
        self.execute(&request).await
    }

    async fn account_or_default(&self, account_id: Option<&str>) -> Result<String, KazooError> {
        match account_id {
            Some(account_id) => Ok(account_id.to_string()),
            None => Ok(self.auth.authenticate().await?.account_id().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MockTransport;
    use crate::config::ApiKey;
    use serde_json::json;

    fn client(transport: Arc<MockTransport>) -> KazooClient {
        let config = KazooConfig::builder()
            .api_key(ApiKey::new("key-123").unwrap())
            .build()
            .unwrap();
        KazooClient::with_transport(&config, Registry::builtin().unwrap(), transport)
    }

    fn login_ok(transport: &MockTransport, token: &str) {
        transport.push_json(
            200,
            json!({"auth_token": token, "status": "success", "data": {"account_id": "A1"}}),
        );
    }

    fn unauthorized(transport: &MockTransport) {
        transport.push_json(
            401,
            json!({"status": "error", "error": "401", "message": "invalid credentials"}),
        );
    }

    #[tokio::test]
    async fn test_call_logs_in_then_sends_token() {
        let transport = Arc::new(MockTransport::new());
        login_ok(&transport, "tok-1");
        transport.push_json(200, json!({"status": "success", "data": [{"id": "D1"}]}));
        let client = client(transport.clone());

        let envelope = client
            .call("get_devices", &OperationArgs::new().param("account_id", "A1"))
            .await
            .unwrap();

        assert_eq!(envelope.data, json!([{"id": "D1"}]));
        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].url.ends_with("/accounts/A1/devices"));
        assert_eq!(requests[1].headers.get("X-Auth-Token").unwrap(), "tok-1");
        assert_eq!(client.account_id().as_deref(), Some("A1"));
    }

    #[tokio::test]
    async fn test_unknown_operation() {
        let client = client(Arc::new(MockTransport::new()));
        let result = client.call("get_spaceships", &OperationArgs::new()).await;

        assert!(matches!(
            result,
            Err(KazooError::UnknownOperation { name }) if name == "get_spaceships"
        ));
    }

    #[tokio::test]
    async fn test_missing_parameter_performs_no_io() {
        let transport = Arc::new(MockTransport::new());
        let client = client(transport.clone());

        let result = client.call("get_device", &OperationArgs::new().param("account_id", "A1")).await;

        assert!(matches!(result, Err(KazooError::MissingParameter { .. })));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_authentication_failure_retries_once() {
        let transport = Arc::new(MockTransport::new());
        login_ok(&transport, "tok-1");
        unauthorized(&transport);
        login_ok(&transport, "tok-2");
        transport.push_json(200, json!({"status": "success", "data": {"id": "A1"}}));
        let client = client(transport.clone());

        let envelope = client
            .call("get_account", &OperationArgs::new().param("account_id", "A1"))
            .await
            .unwrap();

        assert_eq!(envelope.data, json!({"id": "A1"}));
        let requests = transport.requests();
        assert_eq!(requests.len(), 4);
        assert!(requests[2].url.ends_with("/api_auth"));
        assert_eq!(requests[3].headers.get("X-Auth-Token").unwrap(), "tok-2");
    }

    #[tokio::test]
    async fn test_second_authentication_failure_propagates() {
        let transport = Arc::new(MockTransport::new());
        login_ok(&transport, "tok-1");
        unauthorized(&transport);
        login_ok(&transport, "tok-2");
        unauthorized(&transport);
        let client = client(transport.clone());

        let result = client
            .call("get_account", &OperationArgs::new().param("account_id", "A1"))
            .await;

        assert!(matches!(result, Err(KazooError::Authentication { .. })));
        assert_eq!(transport.call_count(), 4);
        assert_eq!(transport.remaining(), 0);
    }

    #[tokio::test]
    async fn test_plain_text_401_still_triggers_retry() {
        let transport = Arc::new(MockTransport::new());
        login_ok(&transport, "tok-1");
        transport.push_response(crate::clients::HttpResponse::new(
            401,
            std::collections::HashMap::new(),
            "Unauthorized",
        ));
        login_ok(&transport, "tok-2");
        transport.push_json(200, json!({"status": "success", "data": {"id": "A1"}}));
        let client = client(transport.clone());

        let envelope = client
            .call("get_account", &OperationArgs::new().param("account_id", "A1"))
            .await
            .unwrap();

        assert_eq!(envelope.data["id"], "A1");
        assert_eq!(transport.call_count(), 4);
        assert_eq!(
            transport.requests()[3].headers.get("X-Auth-Token"),
            Some(&"tok-2".to_string())
        );
    }

    #[tokio::test]
    async fn test_upload_media_file_posts_raw_file() {
        let transport = Arc::new(MockTransport::new());
        login_ok(&transport, "tok-1");
        transport.push_json(200, json!({"status": "success", "data": {"id": "M1"}}));
        let client = client(transport.clone());

        client
            .upload_media_file(
                "A1",
                "M1",
                FileUpload::new("greeting.mp3", b"ID3".to_vec()).content_type("audio/mpeg"),
            )
            .await
            .unwrap();

        let sent = &transport.requests()[1];
        assert_eq!(sent.method, HttpMethod::Post);
        assert!(sent.url.ends_with("/accounts/A1/media/M1/raw"));
        assert!(sent.body.is_none());
        let file = sent.file.as_ref().unwrap();
        assert_eq!(file.filename(), "greeting.mp3");
        assert_eq!(file.mime(), "audio/mpeg");
        assert_eq!(file.bytes(), b"ID3");
    }

    #[tokio::test]
    async fn test_upload_phone_number_file_encodes_number() {
        let transport = Arc::new(MockTransport::new());
        login_ok(&transport, "tok-1");
        transport.push_json(200, json!({"status": "success", "data": {}}));
        let client = client(transport.clone());

        client
            .upload_phone_number_file(
                "A1",
                "+14155550100",
                FileUpload::new("loa.pdf", b"%PDF".to_vec()).content_type("application/pdf"),
            )
            .await
            .unwrap();

        let sent = &transport.requests()[1];
        assert!(sent.url.ends_with("/accounts/A1/phone_numbers/%2B14155550100"));
        assert_eq!(sent.file.as_ref().unwrap().filename(), "loa.pdf");
    }

    #[tokio::test]
    async fn test_other_errors_are_not_retried() {
        let transport = Arc::new(MockTransport::new());
        login_ok(&transport, "tok-1");
        transport.push_json(
            404,
            json!({"status": "error", "error": "404", "message": "bad identifier"}),
        );
        let client = client(transport.clone());

        let result = client
            .call("get_account", &OperationArgs::new().param("account_id", "A1"))
            .await;

        assert!(matches!(result, Err(KazooError::Api { .. })));
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_create_ip_auth_is_unauthenticated() {
        let transport = Arc::new(MockTransport::new());
        transport.push_json(200, json!({"status": "success", "data": {}}));
        let client = client(transport.clone());

        client.create_ip_auth().await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Put);
        assert!(requests[0].url.ends_with("/ip_auth"));
        assert!(requests[0].body.is_none());
        assert!(!requests[0].headers.contains_key("X-Auth-Token"));
    }

    #[tokio::test]
    async fn test_hand_written_paths() {
        let transport = Arc::new(MockTransport::new());
        login_ok(&transport, "tok-1");
        for _ in 0..5 {
            transport.push_json(200, json!({"status": "success", "data": {}}));
        }
        let client = client(transport.clone());

        client.search_phone_numbers("415", 10).await.unwrap();
        client.list_devices_by_owner("A1", "U1").await.unwrap();
        client.list_child_accounts("A1").await.unwrap();
        client.run_sup_command(&["kazoo_maintenance", "refresh"]).await.unwrap();
        let mut query = BTreeMap::new();
        query.insert("t".to_string(), "account".to_string());
        client.search(Some("A1"), query, true).await.unwrap();

        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert!(urls[1].ends_with("/phone_numbers?prefix=415&quantity=10"));
        assert!(urls[2].ends_with("/accounts/A1/devices?filter_owner_id=U1"));
        assert!(urls[3].ends_with("/accounts/A1/children"));
        assert!(urls[4].ends_with("/sup/kazoo_maintenance/refresh"));
        assert!(urls[5].ends_with("/accounts/A1/search/multi?t=account"));
    }

    #[tokio::test]
    async fn test_default_account_comes_from_login() {
        let transport = Arc::new(MockTransport::new());
        login_ok(&transport, "tok-1");
        transport.push_json(200, json!({"status": "success", "data": {}}));
        let client = client(transport.clone());

        client
            .delete_numbers_collection(None, json!({"numbers": ["+14155550100"]}))
            .await
            .unwrap();

        let request = &transport.requests()[1];
        assert_eq!(request.method, HttpMethod::Delete);
        assert!(request.url.ends_with("/accounts/A1/phone_numbers/collection"));
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"data":{"numbers":["+14155550100"]}}"#)
        );
    }
}

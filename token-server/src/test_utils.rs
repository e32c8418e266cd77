use crate::config::Settings;
use crate::create_app;
use crate::state::AppState;
use crate::token::{GrantDescriptor, LiveKitSigner, TokenError, TokenSigner};
use axum::body::{Body, Bytes};
use axum::extract::connect_info::MockConnectInfo;
use axum::Router;
use http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use livekit_api::access_token::{Claims, TokenVerifier};
use log::LevelFilter;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Signer double that records every grant it is asked to sign.
///
/// It either returns a counter based token, fails every call, or forwards to
/// a real signer so that tokens can be verified.
pub struct RecordingSigner {
    grants: Mutex<Vec<GrantDescriptor>>,
    behavior: Behavior,
}

enum Behavior {
    Counter,
    Fail,
    Forward(LiveKitSigner),
}

impl RecordingSigner {
    /// Returns `signed-token-<n>` for the n-th call
    pub fn new() -> Self {
        Self::with_behavior(Behavior::Counter)
    }

    /// Fails every call with a signing error
    pub fn failing() -> Self {
        Self::with_behavior(Behavior::Fail)
    }

    /// Records and forwards to the given signer
    pub fn wrapping(signer: LiveKitSigner) -> Self {
        Self::with_behavior(Behavior::Forward(signer))
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            grants: Mutex::new(Vec::new()),
            behavior,
        }
    }

    /// Number of sign calls so far
    pub fn calls(&self) -> usize {
        self.grants.lock().unwrap().len()
    }

    /// Grants received so far, in call order
    pub fn grants(&self) -> Vec<GrantDescriptor> {
        self.grants.lock().unwrap().clone()
    }
}

impl TokenSigner for RecordingSigner {
    fn sign(&self, grant: GrantDescriptor) -> Result<String, TokenError> {
        let calls = {
            let mut grants = self.grants.lock().unwrap();
            grants.push(grant.clone());
            grants.len()
        };

        match &self.behavior {
            Behavior::Counter => Ok(format!("signed-token-{calls}")),
            Behavior::Fail => Err(TokenError::Signing("signer unavailable".to_string())),
            Behavior::Forward(signer) => signer.sign(grant),
        }
    }
}

/// Test fixture for driving the application router without binding a socket.
///
/// Requests appear to come from `127.0.0.1:40000`, and every sign call goes
/// through a [`RecordingSigner`] so tests can assert whether signing happened.
///
/// # Examples
///
/// ```rust
/// #[tokio::test]
/// async fn test_endpoint() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture.get("/token?roomName=lobby&name=Alice&identity=alice1").await;
///
///     response.assert_ok();
///     let result = response.json_as::<TokenResponse>();
///     let claims = fixture.verify_token(&result.access_token);
///     assert_eq!(claims.sub, "alice1");
/// }
/// ```
pub struct TestFixture {
    /// The application router
    pub app: Router,
    /// Configuration settings
    pub settings: Settings,
    /// The signer installed in the application state
    pub signer: Arc<RecordingSigner>,
}

impl TestFixture {
    /// Creates a fixture whose tokens are really signed with the test credentials
    pub async fn new() -> Self {
        let settings = Settings::for_test();
        let signer = RecordingSigner::wrapping(LiveKitSigner::from_config(&settings.livekit));
        Self::build(settings, signer)
    }

    /// Creates a fixture around the given signer double
    pub async fn with_signer(signer: RecordingSigner) -> Self {
        Self::build(Settings::for_test(), signer)
    }

    fn build(settings: Settings, signer: RecordingSigner) -> Self {
        Self::setup_logger(LevelFilter::Debug);

        let signer = Arc::new(signer);
        let state = AppState::with_signer(settings.clone(), signer.clone());
        let app = create_app(state).layer(MockConnectInfo(SocketAddr::from((
            [127, 0, 0, 1],
            40000,
        ))));

        Self {
            app,
            settings,
            signer,
        }
    }

    /// Initializes the test logger with the given level
    pub fn setup_logger(level: LevelFilter) {
        let _ = env_logger::builder()
            .filter_level(level)
            .is_test(true)
            .try_init();
    }

    /// Creates a request builder with a JSON content type
    pub fn request_builder(&self, method: Method, uri: impl AsRef<str>) -> http::request::Builder {
        Request::builder()
            .method(method)
            .uri(uri.as_ref())
            .header("Content-Type", "application/json")
    }

    /// Sends a GET request to the specified URI.
    pub async fn get(&self, uri: impl AsRef<str>) -> TestResponse {
        let request = self
            .request_builder(Method::GET, uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends an OPTIONS request without any CORS headers
    pub async fn options(&self, uri: impl AsRef<str>) -> TestResponse {
        let request = self
            .request_builder(Method::OPTIONS, uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a POST request with a JSON body to the specified URI.
    pub async fn post<T: Serialize>(&self, uri: impl AsRef<str>, body: &T) -> TestResponse {
        let json_body = serde_json::to_vec(body).expect("Failed to serialize body to JSON");
        let request = self
            .request_builder(Method::POST, uri)
            .body(Body::from(json_body))
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Sends a request and returns a TestResponse.
    ///
    /// Use this when a test needs custom headers or a raw body.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        // Try to parse as JSON, defaulting to empty object if parsing fails or empty body
        let json = if !body.is_empty() {
            serde_json::from_slice(&body).unwrap_or_else(|_| serde_json::json!({}))
        } else {
            serde_json::json!({})
        };

        TestResponse {
            status,
            headers,
            body,
            json,
        }
    }

    /// Verifies a token against the fixture credentials and returns its claims.
    ///
    /// # Panics
    ///
    /// Panics if the token was not signed with the fixture's key and secret.
    pub fn verify_token(&self, token: &str) -> Claims {
        TokenVerifier::with_api_key(
            &self.settings.livekit.api_key,
            &self.settings.livekit.api_secret,
        )
        .verify(token)
        .expect("Failed to verify token")
    }
}

/// Response from a test request that provides convenient access to status and JSON body.
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Bytes,
    /// Response body as JSON (if present and valid JSON)
    pub json: Value,
}

impl TestResponse {
    /// Asserts that the response has the expected status code.
    ///
    /// # Panics
    ///
    /// Panics if the status code doesn't match the expected value.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {} but got {} with body: {}",
            expected,
            self.status,
            String::from_utf8_lossy(&self.body)
        );
        self
    }

    /// Asserts that the response status is OK (200).
    pub fn assert_ok(&self) -> &Self {
        self.assert_status(StatusCode::OK)
    }

    /// Returns a header value as a string, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Converts the response body to the specified type.
    ///
    /// # Panics
    ///
    /// Panics if deserialization fails.
    pub fn json_as<T: DeserializeOwned>(&self) -> T {
        serde_json::from_value(self.json.clone()).expect("Failed to deserialize response JSON")
    }
}

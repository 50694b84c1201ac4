//! Request client: builds GET requests, runs them through the host transport,
//! and classifies the outcome.
//!
//! # Design
//! `get` is split into three public steps so each can be driven without I/O:
//! `build_get` (request interceptor), `handle_response` (response interceptor
//! plus business-status handling) and `handle_transport_error` (no response
//! at all). Classification order on a 2xx response is fixed: the token check
//! runs before the business status is looked at.

use std::sync::Arc;
use std::thread;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, info_span, warn};
use url::Url;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::RequestError;
use crate::host::{Host, LoginPrompt, Navigator, Notice, PromptReason};
use crate::http::{HttpRequest, HttpResponse, TransportError};
use crate::modal::ModalSlot;
use crate::storage::Storage;
use crate::types::{parse_business_status, Envelope, RequestOptions, BUSINESS_OK};

const LOGIN_EXPIRED: &str = "Login expired, please log in again";
const NOT_FOUND: &str = "The requested resource does not exist";
const TIMED_OUT: &str = "Request timed out, please try again later";

pub struct RequestClient {
    config: ClientConfig,
    host: Host,
    modal: ModalSlot,
}

impl RequestClient {
    pub fn new(config: ClientConfig, host: Host) -> Self {
        Self {
            config,
            host,
            modal: ModalSlot::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn storage(&self) -> &Storage {
        &self.host.storage
    }

    /// The login prompt currently on screen, if any.
    pub fn active_login_prompt(&self) -> Option<LoginPrompt> {
        self.modal.current()
    }

    /// Issues a GET to `path` with `params` as the query string.
    ///
    /// `params` must serialize to a JSON object or to null.
    pub fn get<P: Serialize + ?Sized>(
        &self,
        path: &str,
        params: &P,
        options: &RequestOptions,
    ) -> Result<Envelope, RequestError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("request", %request_id, path);
        let _enter = span.enter();

        let request = match self.build_get(path, params, options) {
            Ok(request) => request,
            Err(err) => return Err(self.report_setup_failure(path, options, err)),
        };

        debug!(url = %request.url, timeout_ms = request.timeout.as_millis() as u64, "dispatching");
        match self.host.transport.execute(&request) {
            Ok(response) => self.handle_response(path, options, response),
            Err(err) => Err(self.handle_transport_error(path, options, err)),
        }
    }

    /// Resolves the URL, encodes the query and attaches the stored token.
    pub fn build_get<P: Serialize + ?Sized>(
        &self,
        path: &str,
        params: &P,
        options: &RequestOptions,
    ) -> Result<HttpRequest, RequestError> {
        let base_url = options.base_url.as_deref().unwrap_or(&self.config.base_url);
        let mut url = Url::parse(&resolve_url(base_url, path))?;

        let pairs = query_pairs(params)?;
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        let mut headers = vec![("accept".to_string(), "application/json".to_string())];
        if let Some(token) = self.host.storage.token(&self.config.token_key)? {
            headers.push(("authorization".to_string(), scalar_text(&token)));
        }

        Ok(HttpRequest {
            url: url.into(),
            headers,
            timeout: options.timeout.unwrap_or(self.config.timeout),
        })
    }

    /// Classifies a received response of any status.
    pub fn handle_response(
        &self,
        path: &str,
        options: &RequestOptions,
        response: HttpResponse,
    ) -> Result<Envelope, RequestError> {
        if !response.is_success() {
            return Err(self.reject_status(path, options, response));
        }
        match self.classify_body(path, options, response) {
            Err(err @ (RequestError::MalformedBody(_) | RequestError::Storage(_))) => {
                Err(self.report_setup_failure(path, options, err))
            }
            outcome => outcome,
        }
    }

    /// Handles a request that never received a response.
    pub fn handle_transport_error(
        &self,
        path: &str,
        options: &RequestOptions,
        err: TransportError,
    ) -> RequestError {
        let err = if err.is_timeout() {
            RequestError::Timeout(err)
        } else {
            RequestError::Network(err)
        };
        self.report_setup_failure(path, options, err)
    }

    /// Confirms the open login prompt: clears session storage and goes to the
    /// login view. Returns `false` when no prompt was open.
    pub fn confirm_login_prompt(&self) -> bool {
        let Some(prompt) = self.modal.take() else {
            return false;
        };
        info!(reason = ?prompt.reason, route = %self.config.login_route, "login prompt confirmed");
        self.host.navigator.navigate(&self.config.login_route);
        self.host.storage.clear();
        true
    }

    /// Closes the open login prompt without acting on it.
    pub fn dismiss_login_prompt(&self) -> Option<LoginPrompt> {
        self.modal.take()
    }

    fn classify_body(
        &self,
        path: &str,
        options: &RequestOptions,
        response: HttpResponse,
    ) -> Result<Envelope, RequestError> {
        let (status, body) = parse_business_status(&response.body)?;

        let token = self.host.storage.token(&self.config.token_key)?;
        if token.is_none() && !self.config.is_allow_listed(path) {
            debug!(status, "no token for protected path");
            return Err(RequestError::Anonymous { status });
        }

        match status {
            BUSINESS_OK => Ok(Envelope {
                http_status: response.status,
                headers: response.headers,
                body,
            }),
            401 => {
                self.prompt_login(PromptReason::NotLoggedIn, options);
                Err(RequestError::NotLoggedIn)
            }
            402 => {
                self.prompt_login(PromptReason::SessionExpired, options);
                Err(RequestError::SessionExpired)
            }
            _ => {
                if options.need_alert {
                    self.host.notifier.notify(Notice::error(body.to_string()));
                }
                Err(RequestError::Business { status, body })
            }
        }
    }

    fn prompt_login(&self, reason: PromptReason, options: &RequestOptions) {
        if !options.need_alert {
            return;
        }
        let prompt = LoginPrompt::new(reason);
        if self.modal.open(prompt.clone()) {
            self.host.dialogs.show_login_prompt(&prompt);
        } else {
            debug!(?reason, "login prompt already open");
        }
    }

    /// Transport status outside `200..300`.
    fn reject_status(&self, path: &str, options: &RequestOptions, response: HttpResponse) -> RequestError {
        let status = response.status;
        match status {
            401 => redirect_to_login(self.host.navigator.as_ref(), &self.config.login_route),
            403 => {
                self.host.notifier.notify(Notice::error(LOGIN_EXPIRED));
                self.host.storage.remove_item(&self.config.token_key);
                self.schedule_login_redirect();
            }
            404 => self.host.notifier.notify(Notice::error(NOT_FOUND)),
            _ => {
                warn!(status, detail = %response_message(&response.body), "unhandled response status");
            }
        }

        warn!(status, path, "request rejected");
        if !options.need_alert {
            return RequestError::Rejected {
                status,
                body: response.body,
            };
        }
        self.host
            .notifier
            .notify(Notice::error(format!("Network request error (status {status})")));
        RequestError::Http {
            status,
            body: response.body,
        }
    }

    fn schedule_login_redirect(&self) {
        let delay = self.config.login_redirect_delay;
        if delay.is_zero() {
            redirect_to_login(self.host.navigator.as_ref(), &self.config.login_route);
            return;
        }
        let navigator = Arc::clone(&self.host.navigator);
        let login_route = self.config.login_route.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            redirect_to_login(navigator.as_ref(), &login_route);
        });
    }

    fn report_setup_failure(&self, path: &str, options: &RequestOptions, err: RequestError) -> RequestError {
        warn!(path, error = %err, "request failed");
        if options.need_alert {
            let content = match &err {
                RequestError::Timeout(_) => TIMED_OUT.to_string(),
                other => other.to_string(),
            };
            self.host.notifier.notify(Notice::error(content));
        }
        err
    }
}

/// Sends the user to the login view, carrying the current location as the
/// return target.
fn redirect_to_login(navigator: &dyn Navigator, login_route: &str) {
    let current = navigator.current_location();
    let destination = if current.is_empty() {
        login_route.to_string()
    } else {
        let encoded: String = url::form_urlencoded::byte_serialize(current.as_bytes()).collect();
        format!("{login_route}?redirect={encoded}")
    };
    info!(%destination, "redirecting to login");
    navigator.navigate(&destination);
}

/// Absolute URLs ignore the base.
fn resolve_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    if path.is_empty() {
        return base_url.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn query_pairs<P: Serialize + ?Sized>(params: &P) -> Result<Vec<(String, String)>, RequestError> {
    let value = serde_json::to_value(params).map_err(|e| RequestError::InvalidParams(e.to_string()))?;
    let map = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(RequestError::InvalidParams(format!(
                "expected an object, got {other}"
            )))
        }
    };
    Ok(encode_map(map))
}

fn encode_map(map: Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                let array_key = format!("{key}[]");
                pairs.extend(
                    items
                        .iter()
                        .filter(|item| !item.is_null())
                        .map(|item| (array_key.clone(), scalar_text(item))),
                );
            }
            other => pairs.push((key, scalar_text(&other))),
        }
    }
    pairs
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn response_message(raw: &str) -> String {
    serde_json::from_str::<Value>(raw)
        .ok()
        .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::http::TransportErrorKind;
    use crate::transport::Transport;

    #[derive(Default)]
    struct ScriptedTransport {
        replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn push(&self, reply: Result<HttpResponse, TransportError>) {
            self.replies.lock().unwrap().push_back(reply);
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted reply left")
        }
    }

    #[derive(Default)]
    struct Recorder {
        notices: Mutex<Vec<Notice>>,
        navigations: Mutex<Vec<String>>,
        prompts: Mutex<Vec<LoginPrompt>>,
    }

    impl Recorder {
        fn notices(&self) -> Vec<String> {
            self.notices.lock().unwrap().iter().map(|n| n.content.clone()).collect()
        }

        fn navigations(&self) -> Vec<String> {
            self.navigations.lock().unwrap().clone()
        }

        fn prompt_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    impl crate::host::Notifier for Recorder {
        fn notify(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }
    }

    impl Navigator for Recorder {
        fn current_location(&self) -> String {
            "/dashboard?tab=2".to_string()
        }

        fn navigate(&self, target: &str) {
            self.navigations.lock().unwrap().push(target.to_string());
        }
    }

    impl crate::host::Dialogs for Recorder {
        fn show_login_prompt(&self, prompt: &LoginPrompt) {
            self.prompts.lock().unwrap().push(prompt.clone());
        }
    }

    struct Fixture {
        client: RequestClient,
        transport: Arc<ScriptedTransport>,
        recorder: Arc<Recorder>,
    }

    fn fixture() -> Fixture {
        fixture_with_delay(Duration::ZERO)
    }

    fn fixture_with_delay(login_redirect_delay: Duration) -> Fixture {
        let transport = Arc::new(ScriptedTransport::default());
        let recorder = Arc::new(Recorder::default());
        let mut config = ClientConfig::with_base_url("http://api.test/");
        config.login_redirect_delay = login_redirect_delay;
        let host = Host {
            transport: transport.clone(),
            storage: Storage::in_memory(),
            notifier: recorder.clone(),
            navigator: recorder.clone(),
            dialogs: recorder.clone(),
        };
        Fixture {
            client: RequestClient::new(config, host),
            transport,
            recorder,
        }
    }

    fn logged_in() -> Fixture {
        let f = fixture();
        f.client.storage().set_item("token", Some("t-1")).unwrap();
        f
    }

    fn reply(status: u16, body: Value) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn get(f: &Fixture, path: &str) -> Result<Envelope, RequestError> {
        f.client.get(path, &json!({}), &RequestOptions::default())
    }

    #[test]
    fn business_ok_returns_envelope() {
        let f = logged_in();
        f.transport.push(reply(200, json!({"status": 200, "data": [1, 2]})));
        let envelope = get(&f, "/api/users").unwrap();
        assert_eq!(envelope.http_status, 200);
        assert_eq!(envelope.data(), Some(&json!([1, 2])));
        assert!(f.recorder.notices().is_empty());
    }

    #[test]
    fn build_get_joins_base_and_encodes_query() {
        let f = logged_in();
        let params = json!({"q": "a b", "page": 2, "skip": null, "ids": [1, 2]});
        let request = f
            .client
            .build_get("/api/users", &params, &RequestOptions::default())
            .unwrap();
        assert_eq!(
            request.url,
            "http://api.test/api/users?ids%5B%5D=1&ids%5B%5D=2&page=2&q=a+b"
        );
        assert_eq!(request.timeout, Duration::from_millis(6000));
        assert!(request
            .headers
            .contains(&("authorization".to_string(), "t-1".to_string())));
    }

    #[test]
    fn build_get_honors_overrides_and_absolute_paths() {
        let f = fixture();
        let options = RequestOptions::default()
            .with_timeout(Duration::from_millis(50))
            .with_base_url("http://other.test");
        let request = f.client.build_get("/x", &(), &options).unwrap();
        assert_eq!(request.url, "http://other.test/x");
        assert_eq!(request.timeout, Duration::from_millis(50));
        assert!(request.headers.iter().all(|(name, _)| name != "authorization"));

        let request = f
            .client
            .build_get("http://localhost:8887/question/41", &(), &options)
            .unwrap();
        assert_eq!(request.url, "http://localhost:8887/question/41");
    }

    #[test]
    fn non_object_params_are_rejected() {
        let f = fixture();
        let err = f
            .client
            .get("/x", &json!([1]), &RequestOptions::silent())
            .unwrap_err();
        assert!(matches!(err, RequestError::InvalidParams(_)));
        assert_eq!(err.code(), -1);
        assert!(f.transport.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn anonymous_protected_path_returns_status_silently() {
        let f = fixture();
        f.transport.push(reply(200, json!({"status": 401})));
        let err = get(&f, "/api/users").unwrap_err();
        assert!(matches!(err, RequestError::Anonymous { status: 401 }));
        assert_eq!(err.code(), 401);
        assert_eq!(f.recorder.prompt_count(), 0);
        assert!(f.recorder.notices().is_empty());
    }

    #[test]
    fn anonymous_check_precedes_success() {
        let f = fixture();
        f.transport.push(reply(200, json!({"status": 200, "data": {}})));
        let err = get(&f, "/api/users").unwrap_err();
        assert_eq!(err.code(), 200);
    }

    #[test]
    fn allow_listed_path_works_without_token() {
        let f = fixture();
        f.transport.push(reply(200, json!({"status": 200, "data": "ok"})));
        assert!(get(&f, "/daas/user/login").is_ok());

        f.transport.push(reply(200, json!({"status": 500, "message": "bad password"})));
        let err = get(&f, "/daas/user/login").unwrap_err();
        assert_eq!(err.code(), 500);
        let notices = f.recorder.notices();
        assert_eq!(notices.len(), 1);
        let shown: Value = serde_json::from_str(&notices[0]).unwrap();
        assert_eq!(shown, json!({"status": 500, "message": "bad password"}));
    }

    #[test]
    fn not_logged_in_opens_one_prompt() {
        let f = logged_in();
        f.transport.push(reply(200, json!({"status": 401})));
        f.transport.push(reply(200, json!({"status": 401})));

        assert!(matches!(get(&f, "/api/users"), Err(RequestError::NotLoggedIn)));
        assert!(matches!(get(&f, "/api/users"), Err(RequestError::NotLoggedIn)));
        assert_eq!(f.recorder.prompt_count(), 1);
        assert_eq!(
            f.client.active_login_prompt().map(|p| p.reason),
            Some(PromptReason::NotLoggedIn)
        );
    }

    #[test]
    fn concurrent_not_logged_in_opens_one_prompt() {
        let f = logged_in();
        f.transport.push(reply(200, json!({"status": 401})));
        f.transport.push(reply(200, json!({"status": 401})));

        let codes: Vec<i64> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..2)
                .map(|_| scope.spawn(|| get(&f, "/api/users").unwrap_err().code()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(codes, vec![401, 401]);
        assert_eq!(f.recorder.prompt_count(), 1);
    }

    #[test]
    fn session_expired_prompt_and_confirmation() {
        let f = logged_in();
        f.transport.push(reply(200, json!({"status": 402})));
        let err = get(&f, "/api/users").unwrap_err();
        assert_eq!(err.code(), 402);
        assert_eq!(f.recorder.prompt_count(), 1);

        assert!(f.client.confirm_login_prompt());
        assert_eq!(f.recorder.navigations(), vec!["/#/user/login"]);
        assert_eq!(f.client.storage().token("token").unwrap(), None);
        assert!(f.client.active_login_prompt().is_none());
        assert!(!f.client.confirm_login_prompt());
    }

    #[test]
    fn dismissed_prompt_can_reopen() {
        let f = logged_in();
        f.transport.push(reply(200, json!({"status": 401})));
        f.transport.push(reply(200, json!({"status": 402})));
        let _ = get(&f, "/api/users");
        assert!(f.client.dismiss_login_prompt().is_some());
        let _ = get(&f, "/api/users");
        assert_eq!(f.recorder.prompt_count(), 2);
        assert!(f.recorder.navigations().is_empty());
    }

    #[test]
    fn silent_request_never_prompts() {
        let f = logged_in();
        f.transport.push(reply(200, json!({"status": 401})));
        let err = f
            .client
            .get("/api/users", &(), &RequestOptions::silent())
            .unwrap_err();
        assert_eq!(err.code(), 401);
        assert_eq!(f.recorder.prompt_count(), 0);
        assert!(f.client.active_login_prompt().is_none());
    }

    #[test]
    fn other_business_status_notifies_with_body() {
        let f = logged_in();
        f.transport.push(reply(200, json!({"status": 500, "data": null})));
        let err = get(&f, "/api/users").unwrap_err();
        assert!(matches!(err, RequestError::Business { status: 500, .. }));
        assert_eq!(f.recorder.notices(), vec![r#"{"data":null,"status":500}"#]);
    }

    #[test]
    fn http_404_notifies_not_found() {
        let f = logged_in();
        f.transport.push(reply(404, json!({})));
        let err = get(&f, "/api/missing").unwrap_err();
        assert_eq!(err.code(), 404);
        assert_eq!(
            f.recorder.notices(),
            vec![NOT_FOUND.to_string(), "Network request error (status 404)".to_string()]
        );
    }

    #[test]
    fn http_401_redirects_with_return_target() {
        let f = logged_in();
        f.transport.push(reply(401, json!({})));
        let err = f
            .client
            .get("/api/users", &(), &RequestOptions::silent())
            .unwrap_err();
        assert!(matches!(err, RequestError::Rejected { status: 401, .. }));
        assert_eq!(err.code(), -1);
        assert_eq!(
            f.recorder.navigations(),
            vec!["/#/user/login?redirect=%2Fdashboard%3Ftab%3D2"]
        );
        assert!(f.recorder.notices().is_empty());
    }

    #[test]
    fn http_403_drops_token_and_redirects() {
        let f = logged_in();
        f.transport.push(reply(403, json!({})));
        let err = f
            .client
            .get("/api/users", &(), &RequestOptions::silent())
            .unwrap_err();
        assert_eq!(err.code(), -1);
        assert_eq!(f.recorder.notices(), vec![LOGIN_EXPIRED]);
        assert_eq!(f.client.storage().token("token").unwrap(), None);
        assert_eq!(f.recorder.navigations().len(), 1);
    }

    #[test]
    fn http_403_redirect_waits_for_delay() {
        let f = fixture_with_delay(Duration::from_millis(100));
        f.client.storage().set_item("token", Some("t-1")).unwrap();
        f.transport.push(reply(403, json!({})));
        let err = get(&f, "/api/users").unwrap_err();
        assert_eq!(err.code(), 403);
        assert!(f.recorder.navigations().is_empty());

        std::thread::sleep(Duration::from_millis(500));
        assert_eq!(
            f.recorder.navigations(),
            vec!["/#/user/login?redirect=%2Fdashboard%3Ftab%3D2"]
        );
    }

    #[test]
    fn silent_404_still_notifies_not_found() {
        let f = logged_in();
        f.transport.push(reply(404, json!({})));
        let err = f
            .client
            .get("/api/missing", &(), &RequestOptions::silent())
            .unwrap_err();
        assert_eq!(err.code(), -1);
        assert_eq!(f.recorder.notices(), vec![NOT_FOUND]);
    }

    #[test]
    fn http_500_is_only_logged_when_silent() {
        let f = logged_in();
        f.transport.push(reply(500, json!({"message": "boom"})));
        let err = f
            .client
            .get("/api/users", &(), &RequestOptions::silent())
            .unwrap_err();
        assert!(matches!(err, RequestError::Rejected { status: 500, .. }));
        assert_eq!(err.code(), -1);
        assert!(f.recorder.notices().is_empty());
        assert!(f.recorder.navigations().is_empty());
    }

    #[test]
    fn timeout_returns_minus_one_with_timeout_notice() {
        let f = logged_in();
        f.transport.push(Err(TransportError::new(
            TransportErrorKind::Timeout,
            "timeout of 6000ms exceeded",
        )));
        let err = get(&f, "/api/users").unwrap_err();
        assert!(matches!(err, RequestError::Timeout(_)));
        assert_eq!(err.code(), -1);
        assert_eq!(f.recorder.notices(), vec![TIMED_OUT]);
    }

    #[test]
    fn network_failure_returns_minus_one_with_generic_notice() {
        let f = logged_in();
        f.transport.push(Err(TransportError::new(
            TransportErrorKind::Connect,
            "connection refused",
        )));
        let err = get(&f, "/api/users").unwrap_err();
        assert_eq!(err.code(), -1);
        assert_eq!(f.recorder.notices(), vec!["request failed: connection refused"]);
    }

    #[test]
    fn malformed_body_is_a_setup_failure() {
        let f = logged_in();
        f.transport.push(Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "<html>".to_string(),
        }));
        let err = f
            .client
            .get("/api/users", &(), &RequestOptions::silent())
            .unwrap_err();
        assert!(matches!(err, RequestError::MalformedBody(_)));
        assert_eq!(err.code(), -1);
    }

    #[test]
    fn corrupt_token_is_a_setup_failure() {
        let f = fixture();
        let store = Arc::new(crate::storage::MemorySessionStore::new());
        crate::storage::SessionStore::set(store.as_ref(), "token", "{oops".to_string());
        let host = Host {
            storage: Storage::new(store),
            ..f.client.host.clone()
        };
        let client = RequestClient::new(f.client.config.clone(), host);
        let err = client
            .get("/api/users", &(), &RequestOptions::silent())
            .unwrap_err();
        assert!(matches!(err, RequestError::Storage(_)));
        assert!(f.transport.seen.lock().unwrap().is_empty());
    }
}

#[cfg(test)]
pub mod mock {
    use crate::api::client::{register_mock, MockResponse, TestResponder};
    use crate::api::ApiError;
    use reqwest::{header::AUTHORIZATION, Method};
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    pub const GET: Method = Method::GET;
    pub const POST: Method = Method::POST;
    pub const PUT: Method = Method::PUT;
    pub const DELETE: Method = Method::DELETE;

    /// In-process stand-in for the backend. Routes are matched newest
    /// first; each route replays its responses in order and then keeps
    /// returning the last one.
    #[derive(Clone)]
    pub struct MockServer {
        inner: Arc<Mutex<Inner>>,
        base: String,
    }

    #[derive(Default)]
    struct Inner {
        routes: Vec<Route>,
        requests: Vec<RecordedRequest>,
    }

    struct Route {
        method: Method,
        path: String,
        authorization: Option<String>,
        responses: Vec<MockResponse>,
        hits: usize,
    }

    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub method: Method,
        pub path: String,
        pub query: Option<String>,
        pub authorization: Option<String>,
    }

    impl MockServer {
        pub async fn start_async() -> Self {
            Self::start()
        }

        pub fn start() -> Self {
            static NEXT_ID: AtomicUsize = AtomicUsize::new(1);
            let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
            Self {
                inner: Arc::new(Mutex::new(Inner::default())),
                base: format!("http://mock-{}", id),
            }
        }

        pub fn url(&self, path: &str) -> String {
            let base_url = format!("{}{}", self.base, path);
            register_mock(base_url.clone(), Arc::new(self.clone()));
            base_url
        }

        pub fn mock<F>(&self, f: F)
        where
            F: FnOnce(&mut When, &mut Then),
        {
            let mut when = When::default();
            let mut then = Then::default();
            f(&mut when, &mut then);

            let method = when.method.clone().expect("mock requires method");
            let path = when.path.clone().expect("mock requires path");
            let pending = then.status.is_some() || then.body.is_some() || then.sequence.is_empty();
            let last = then.current();
            let mut responses = std::mem::take(&mut then.sequence);
            if pending {
                responses.push(last);
            }

            let mut inner = self.inner.lock().expect("mock lock");
            inner.routes.push(Route {
                method,
                path,
                authorization: when.authorization,
                responses,
                hits: 0,
            });
        }

        /// Requests received for `method path`, matched or not.
        pub fn hits(&self, method: Method, path: &str) -> usize {
            self.requests()
                .iter()
                .filter(|request| request.method == method && request.path == path)
                .count()
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.inner.lock().expect("mock lock").requests.clone()
        }

        pub fn total_hits(&self) -> usize {
            self.inner.lock().expect("mock lock").requests.len()
        }
    }

    impl TestResponder for MockServer {
        fn respond(&self, request: &reqwest::Request) -> Result<MockResponse, ApiError> {
            let method = request.method().clone();
            let path = request.url().path().to_string();
            let authorization = request
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);

            let mut inner = self.inner.lock().map_err(|_| ApiError::unknown("mock lock"))?;
            inner.requests.push(RecordedRequest {
                method: method.clone(),
                path: path.clone(),
                query: request.url().query().map(str::to_string),
                authorization: authorization.clone(),
            });

            let route = inner.routes.iter_mut().rev().find(|route| {
                route.method == method
                    && route.path == path
                    && route
                        .authorization
                        .as_ref()
                        .map_or(true, |expected| Some(expected) == authorization.as_ref())
            });

            match route {
                Some(route) => {
                    let index = route.hits.min(route.responses.len() - 1);
                    route.hits += 1;
                    Ok(route.responses[index].clone())
                }
                None => Err(ApiError::request_failed(format!(
                    "No mock for {} {}",
                    method, path
                ))),
            }
        }
    }

    #[derive(Default)]
    pub struct When {
        method: Option<Method>,
        path: Option<String>,
        authorization: Option<String>,
    }

    impl When {
        pub fn method(&mut self, method: Method) -> &mut Self {
            self.method = Some(method);
            self
        }

        pub fn path(&mut self, path: &str) -> &mut Self {
            self.path = Some(path.to_string());
            self
        }

        pub fn bearer(&mut self, token: &str) -> &mut Self {
            self.authorization = Some(format!("Bearer {}", token));
            self
        }
    }

    #[derive(Default)]
    pub struct Then {
        status: Option<u16>,
        body: Option<Value>,
        sequence: Vec<MockResponse>,
    }

    impl Then {
        pub fn status(&mut self, status: u16) -> &mut Self {
            self.status = Some(status);
            self
        }

        pub fn json_body(&mut self, body: Value) -> &mut Self {
            self.body = Some(body);
            self
        }

        /// Queues the response built so far and starts the next one.
        pub fn then(&mut self) -> &mut Self {
            let current = self.current();
            self.sequence.push(current);
            self.status = None;
            self.body = None;
            self
        }

        fn current(&self) -> MockResponse {
            match &self.body {
                Some(body) => MockResponse::json(self.status.unwrap_or(200), body.clone()),
                None => MockResponse::empty(self.status.unwrap_or(200)),
            }
        }
    }
}

use crate::api::{ApiClient, ApiError, VideoResponse};
use std::rc::Rc;
use uuid::Uuid;

#[derive(Clone)]
pub struct VideoDetailRepository {
    client: Rc<ApiClient>,
}

impl VideoDetailRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn load_video(&self, id: Uuid) -> Result<VideoResponse, ApiError> {
        self.client.get_video(id).await
    }

    /// A failed check counts as "not purchased" so the page still offers
    /// the buy button.
    pub async fn has_access(&self, id: Uuid) -> bool {
        match self.client.check_access(id).await {
            Ok(access) => access.has_access,
            Err(err) => {
                log::warn!("Access check for {} failed: {}", id, err);
                false
            }
        }
    }

    /// Starts a checkout session and returns the hosted payment page URL.
    pub async fn start_checkout(&self, id: Uuid) -> Result<String, ApiError> {
        self.client
            .create_checkout(id)
            .await
            .map(|checkout| checkout.checkout_url)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use serde_json::json;

    const ID: &str = "7f1c2f5e-8a43-4c43-9a53-2b8f3f7f6a10";

    fn id() -> Uuid {
        Uuid::parse_str(ID).unwrap()
    }

    #[tokio::test]
    async fn access_check_failure_means_no_access() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path(&format!("/api/videos/{}/access", ID));
            then.status(500);
        });
        let repo = VideoDetailRepository::new(ApiClient::new_with_base_url(server.url("/api")));
        assert!(!repo.has_access(id()).await);
    }

    #[tokio::test]
    async fn access_check_reads_flag() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path(&format!("/api/videos/{}/access", ID));
            then.status(200).json_body(json!({ "hasAccess": true }));
        });
        let repo = VideoDetailRepository::new(ApiClient::new_with_base_url(server.url("/api")));
        assert!(repo.has_access(id()).await);
    }

    #[tokio::test]
    async fn checkout_returns_hosted_url() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/payments/checkout");
            then.status(200).json_body(json!({
                "checkoutUrl": "https://checkout.example/session/cs_1",
                "sessionId": "cs_1"
            }));
        });
        let repo = VideoDetailRepository::new(ApiClient::new_with_base_url(server.url("/api")));
        assert_eq!(
            repo.start_checkout(id()).await.unwrap(),
            "https://checkout.example/session/cs_1"
        );
    }
}

use crate::api::ApiClient;
use crate::config::{PURCHASE_POLL_INTERVAL, PURCHASE_POLL_MAX_ATTEMPTS};
use crate::utils::poll::{poll_until, CancelToken, PollOutcome, PollPolicy};
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;
use uuid::Uuid;

pub const PURCHASE_POLL: PollPolicy =
    PollPolicy::new(PURCHASE_POLL_INTERVAL, PURCHASE_POLL_MAX_ATTEMPTS);

#[derive(Clone)]
pub struct CheckoutRepository {
    client: Rc<ApiClient>,
}

impl CheckoutRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    /// The payment webhook lands asynchronously, so access is polled until
    /// it shows up or the attempts run out. Errors count as "not yet".
    pub async fn await_access<S, SFut>(
        &self,
        video_id: Uuid,
        cancel: &CancelToken,
        sleep: S,
    ) -> PollOutcome<()>
    where
        S: Fn(Duration) -> SFut,
        SFut: Future<Output = ()>,
    {
        let client = self.client.clone();
        poll_until(
            PURCHASE_POLL,
            cancel,
            move |attempt| {
                let client = client.clone();
                async move {
                    match client.check_access(video_id).await {
                        Ok(access) if access.has_access => Some(()),
                        Ok(_) => None,
                        Err(err) => {
                            log::debug!("Access check {} failed: {}", attempt, err);
                            None
                        }
                    }
                }
            },
            sleep,
        )
        .await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use serde_json::json;

    const ID: &str = "7f1c2f5e-8a43-4c43-9a53-2b8f3f7f6a10";

    fn no_wait(_: Duration) -> futures::future::Ready<()> {
        futures::future::ready(())
    }

    fn access_path() -> String {
        format!("/api/videos/{}/access", ID)
    }

    #[tokio::test]
    async fn stops_once_access_appears() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path(&access_path());
            then.status(200)
                .json_body(json!({ "hasAccess": false }))
                .then()
                .status(500)
                .then()
                .status(200)
                .json_body(json!({ "hasAccess": true }));
        });

        let repo = CheckoutRepository::new(ApiClient::new_with_base_url(server.url("/api")));
        let outcome = repo
            .await_access(Uuid::parse_str(ID).unwrap(), &CancelToken::new(), no_wait)
            .await;
        assert_eq!(
            outcome,
            PollOutcome::Satisfied {
                value: (),
                attempts: 3
            }
        );
        assert_eq!(server.hits(GET, &access_path()), 3);
    }

    #[tokio::test]
    async fn gives_up_after_ten_checks() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path(&access_path());
            then.status(200).json_body(json!({ "hasAccess": false }));
        });

        let repo = CheckoutRepository::new(ApiClient::new_with_base_url(server.url("/api")));
        let outcome = repo
            .await_access(Uuid::parse_str(ID).unwrap(), &CancelToken::new(), no_wait)
            .await;
        assert_eq!(outcome, PollOutcome::Exhausted { attempts: 10 });
        assert_eq!(server.hits(GET, &access_path()), 10);
    }

    #[tokio::test]
    async fn cancelled_poll_sends_nothing() {
        let server = MockServer::start_async().await;
        let cancel = CancelToken::new();
        cancel.cancel();
        let repo = CheckoutRepository::new(ApiClient::new_with_base_url(server.url("/api")));
        let outcome = repo
            .await_access(Uuid::parse_str(ID).unwrap(), &cancel, no_wait)
            .await;
        assert_eq!(outcome, PollOutcome::Cancelled);
        assert_eq!(server.total_hits(), 0);
    }
}

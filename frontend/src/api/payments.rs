use uuid::Uuid;

use super::{
    client::{parse_json, ApiClient},
    types::{
        ApiError, CheckoutResponse, CreateCheckoutRequest, CreatorStatsResponse, PageResponse,
        PurchaseResponse, VideoResponse,
    },
};

impl ApiClient {
    /// Starts a hosted checkout. The caller navigates to `checkout_url`.
    pub async fn create_checkout(&self, video_id: Uuid) -> Result<CheckoutResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let payload = CreateCheckoutRequest { video_id };
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .post(format!("{}/payments/checkout", base_url))
                    .json(&payload))
            })
            .await?;
        parse_json(response).await
    }

    pub async fn list_purchases(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<PurchaseResponse>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .get(format!("{}/purchases", base_url))
                    .query(&[("page", page), ("size", size)]))
            })
            .await?;
        parse_json(response).await
    }

    pub async fn creator_stats(&self) -> Result<CreatorStatsResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .get(format!("{}/creator/stats", base_url)))
            })
            .await?;
        parse_json(response).await
    }

    pub async fn creator_videos(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<VideoResponse>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .get(format!("{}/creator/videos", base_url))
                    .query(&[("page", page), ("size", size)]))
            })
            .await?;
        parse_json(response).await
    }
}

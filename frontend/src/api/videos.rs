use uuid::Uuid;

use super::{
    client::{expect_success, parse_json, ApiClient},
    types::{
        ApiError, CreateVideoRequest, PageResponse, StreamResponse, UpdateVideoRequest,
        VideoAccessResponse, VideoResponse,
    },
};

impl ApiClient {
    pub async fn list_videos(
        &self,
        page: u32,
        size: u32,
        search: Option<&str>,
    ) -> Result<PageResponse<VideoResponse>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let mut params = vec![("page", page.to_string()), ("size", size.to_string())];
        if let Some(term) = search.map(str::trim).filter(|term| !term.is_empty()) {
            params.push(("search", term.to_string()));
        }
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .get(format!("{}/videos", base_url))
                    .query(&params))
            })
            .await?;
        parse_json(response).await
    }

    pub async fn get_video(&self, id: Uuid) -> Result<VideoResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .get(format!("{}/videos/{}", base_url, id)))
            })
            .await?;
        parse_json(response).await
    }

    pub async fn create_video(&self, payload: &CreateVideoRequest) -> Result<VideoResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .post(format!("{}/videos", base_url))
                    .json(payload))
            })
            .await?;
        parse_json(response).await
    }

    pub async fn update_video(
        &self,
        id: Uuid,
        payload: &UpdateVideoRequest,
    ) -> Result<VideoResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .put(format!("{}/videos/{}", base_url, id))
                    .json(payload))
            })
            .await?;
        parse_json(response).await
    }

    pub async fn delete_video(&self, id: Uuid) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .delete(format!("{}/videos/{}", base_url, id)))
            })
            .await?;
        expect_success(response).await
    }

    /// Fetches a fresh signed playback URL. Also used to renew an expired
    /// one mid-stream.
    pub async fn stream_url(&self, id: Uuid) -> Result<String, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .get(format!("{}/videos/{}/stream", base_url, id)))
            })
            .await?;
        let stream: StreamResponse = parse_json(response).await?;
        Ok(stream.hls_url)
    }

    pub async fn check_access(&self, id: Uuid) -> Result<VideoAccessResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                Ok(self
                    .http_client()
                    .get(format!("{}/videos/{}/access", base_url, id)))
            })
            .await?;
        parse_json(response).await
    }
}

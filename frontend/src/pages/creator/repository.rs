use crate::api::{
    ApiClient, ApiError, CreateVideoRequest, CreatorStatsResponse, PageResponse,
    ProgressCallback, UpdateVideoRequest, UploadFile, VideoResponse,
};
use crate::config::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub stats: CreatorStatsResponse,
    pub videos: PageResponse<VideoResponse>,
}

#[derive(Clone)]
pub struct CreatorRepository {
    client: Rc<ApiClient>,
}

impl CreatorRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    /// Stats and one page of the creator's videos, fetched together.
    pub async fn dashboard(&self, page: u32) -> Result<DashboardData, ApiError> {
        let (stats, videos) = futures::join!(
            self.client.creator_stats(),
            self.client.creator_videos(page, DEFAULT_PAGE_SIZE)
        );
        Ok(DashboardData {
            stats: stats?,
            videos: videos?,
        })
    }

    pub async fn delete_video(&self, id: Uuid) -> Result<(), ApiError> {
        self.client.delete_video(id).await
    }

    pub async fn create_video(&self, payload: CreateVideoRequest) -> Result<VideoResponse, ApiError> {
        self.client.create_video(&payload).await
    }

    pub async fn upload(
        &self,
        id: Uuid,
        file: &UploadFile,
        on_progress: ProgressCallback,
    ) -> Result<VideoResponse, ApiError> {
        self.client.upload_video(id, file, on_progress).await
    }

    pub async fn load_video(&self, id: Uuid) -> Result<VideoResponse, ApiError> {
        self.client.get_video(id).await
    }

    pub async fn update_video(
        &self,
        id: Uuid,
        payload: UpdateVideoRequest,
    ) -> Result<VideoResponse, ApiError> {
        self.client.update_video(id, &payload).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use crate::test_support::helpers::CREATOR_ID;
    use serde_json::json;

    const ID: &str = "7f1c2f5e-8a43-4c43-9a53-2b8f3f7f6a10";

    fn video_json(status: &str) -> serde_json::Value {
        json!({
            "id": ID,
            "creatorId": CREATOR_ID,
            "title": "Traits",
            "description": "Dispatch",
            "priceCents": 1500,
            "status": status,
            "thumbnailUrl": null,
            "durationSecs": null,
            "createdAt": "2025-01-05T10:00:00Z",
            "updatedAt": "2025-01-05T10:00:00Z"
        })
    }

    fn repo(server: &MockServer) -> CreatorRepository {
        CreatorRepository::new(ApiClient::new_with_base_url(server.url("/api")))
    }

    #[tokio::test]
    async fn dashboard_combines_stats_and_videos() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/creator/stats");
            then.status(200).json_body(json!({
                "totalVideos": 4,
                "totalPurchases": 9,
                "totalEarningsCents": 13500
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/creator/videos");
            then.status(200).json_body(json!({
                "content": [video_json("PROCESSING")],
                "page": 0,
                "size": 12,
                "totalElements": 1,
                "totalPages": 1,
                "last": true
            }));
        });

        let data = repo(&server).dashboard(0).await.unwrap();
        assert_eq!(data.stats.total_purchases, 9);
        assert_eq!(data.videos.content.len(), 1);
    }

    #[tokio::test]
    async fn dashboard_fails_when_stats_fail() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/creator/stats");
            then.status(500);
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/creator/videos");
            then.status(200).json_body(json!({
                "content": [],
                "page": 0,
                "size": 12,
                "totalElements": 0,
                "totalPages": 0,
                "last": true
            }));
        });

        let err = repo(&server).dashboard(0).await.unwrap_err();
        assert_eq!(err.code, "SERVER_ERROR");
    }

    #[tokio::test]
    async fn create_update_and_delete_hit_video_endpoints() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/videos");
            then.status(201).json_body(video_json("DRAFT"));
        });
        server.mock(|when, then| {
            when.method(PUT).path(&format!("/api/videos/{}", ID));
            then.status(200).json_body(video_json("READY"));
        });
        server.mock(|when, then| {
            when.method(DELETE).path(&format!("/api/videos/{}", ID));
            then.status(204);
        });

        let repo = repo(&server);
        let created = repo
            .create_video(CreateVideoRequest {
                title: "Traits".into(),
                description: None,
                price_cents: 1500,
            })
            .await
            .unwrap();
        let updated = repo
            .update_video(
                created.id,
                UpdateVideoRequest {
                    title: Some("Traits".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        repo.delete_video(created.id).await.unwrap();
        assert_eq!(server.hits(DELETE, &format!("/api/videos/{}", ID)), 1);
    }
}

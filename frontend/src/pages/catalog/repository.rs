use super::utils::CatalogQuery;
use crate::api::{ApiClient, ApiError, PageResponse, VideoResponse};
use crate::config::DEFAULT_PAGE_SIZE;
use std::rc::Rc;

#[derive(Clone)]
pub struct CatalogRepository {
    client: Rc<ApiClient>,
}

impl CatalogRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn search(
        &self,
        query: &CatalogQuery,
    ) -> Result<PageResponse<VideoResponse>, ApiError> {
        self.client
            .list_videos(query.page, DEFAULT_PAGE_SIZE, query.search.as_deref())
            .await
    }
}

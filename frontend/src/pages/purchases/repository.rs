use crate::api::{ApiClient, ApiError, PageResponse, PurchaseResponse};
use crate::config::DEFAULT_PAGE_SIZE;
use std::rc::Rc;

#[derive(Clone)]
pub struct PurchasesRepository {
    client: Rc<ApiClient>,
}

impl PurchasesRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn list(&self, page: u32) -> Result<PageResponse<PurchaseResponse>, ApiError> {
        self.client.list_purchases(page, DEFAULT_PAGE_SIZE).await
    }
}

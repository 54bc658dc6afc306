use super::repository::PurchasesRepository;
use crate::api::{ApiClient, ApiError, PageResponse, PurchaseResponse};
use leptos::*;

#[derive(Clone, Copy)]
pub struct PurchasesViewModel {
    pub page: RwSignal<u32>,
    pub purchases: Resource<u32, Result<PageResponse<PurchaseResponse>, ApiError>>,
}

impl PurchasesViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(PurchasesRepository::new(api));
        let page = create_rw_signal(0u32);

        let purchases = create_resource(
            move || page.get(),
            move |page| {
                let repo = repository.get_value();
                async move { repo.list(page).await }
            },
        );

        Self { page, purchases }
    }

    pub fn total_pages(&self) -> Signal<u32> {
        let purchases = self.purchases;
        Signal::derive(move || {
            purchases.with(|result| {
                result
                    .as_ref()
                    .and_then(|result| result.as_ref().ok())
                    .map(|page| page.total_pages)
                    .unwrap_or(0)
            })
        })
    }
}

impl Default for PurchasesViewModel {
    fn default() -> Self {
        Self::new()
    }
}

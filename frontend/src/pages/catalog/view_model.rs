use super::{repository::CatalogRepository, utils::CatalogQuery};
use crate::api::{ApiClient, ApiError, PageResponse, VideoResponse};
use crate::config::SEARCH_DEBOUNCE;
use crate::utils::{debounce::Debouncer, nav};
use leptos::*;

#[derive(Clone, Copy)]
pub struct CatalogViewModel {
    pub search_input: RwSignal<String>,
    pub query: RwSignal<CatalogQuery>,
    pub videos: Resource<CatalogQuery, Result<PageResponse<VideoResponse>, ApiError>>,
    debouncer: StoredValue<Debouncer>,
}

fn initial_query() -> CatalogQuery {
    nav::current_path()
        .and_then(|path| {
            path.split_once('?')
                .map(|(_, search)| CatalogQuery::from_location_search(search))
        })
        .unwrap_or_default()
}

/// A new term always starts again from the first page.
pub(super) fn apply_search_term(query: RwSignal<CatalogQuery>, term: &str) {
    let next = CatalogQuery::new(term, 0);
    if query.with_untracked(|current| current.search != next.search) {
        query.set(next);
    }
}

pub(super) fn apply_page(query: RwSignal<CatalogQuery>, page: u32) {
    if query.with_untracked(|current| current.page != page) {
        query.update(|current| current.page = page);
    }
}

impl CatalogViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(CatalogRepository::new(api));

        let initial = initial_query();
        let search_input = create_rw_signal(initial.search.clone().unwrap_or_default());
        let query = create_rw_signal(initial);
        let debouncer = store_value(Debouncer::new());

        let videos = create_resource(
            move || query.get(),
            move |query| {
                let repo = repository.get_value();
                async move { repo.search(&query).await }
            },
        );

        create_effect(move |_| {
            let href = query.with(CatalogQuery::href);
            nav::replace_path(&href);
        });

        on_cleanup(move || debouncer.with_value(Debouncer::cancel));

        Self {
            search_input,
            query,
            videos,
            debouncer,
        }
    }

    pub fn on_search_input(&self, value: String) {
        self.search_input.set(value.clone());
        let query = self.query;
        self.debouncer.with_value(|debouncer| {
            debouncer.schedule(SEARCH_DEBOUNCE, move || apply_search_term(query, &value))
        });
    }

    pub fn on_page_change(&self, page: u32) {
        apply_page(self.query, page);
    }

    pub fn total_pages(&self) -> Signal<u32> {
        let videos = self.videos;
        Signal::derive(move || {
            videos.with(|result| {
                result
                    .as_ref()
                    .and_then(|result| result.as_ref().ok())
                    .map(|page| page.total_pages)
                    .unwrap_or(0)
            })
        })
    }
}

impl Default for CatalogViewModel {
    fn default() -> Self {
        Self::new()
    }
}

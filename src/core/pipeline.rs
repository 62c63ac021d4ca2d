use crate::core::fetcher::Fetcher;
use crate::core::paginate::paginate;
use crate::core::query::{apply_filters_and_sorting, validate_sort_field};
use crate::domain::model::{PageEnvelope, PageQuery};
use crate::domain::ports::Upstream;
use crate::domain::schema::Entity;
use crate::utils::error::Result;
use crate::utils::logger::LogHandle;
use crate::utils::validation::Validate;

/// Request-scoped read pipeline: fetch, filter and sort, then page.
pub struct PagePipeline<U: Upstream> {
    fetcher: Fetcher<U>,
    log: LogHandle,
}

impl<U: Upstream> PagePipeline<U> {
    pub fn new(upstream: U, log: LogHandle) -> Self {
        Self {
            fetcher: Fetcher::new(upstream, log.clone()),
            log,
        }
    }

    pub fn upstream(&self) -> &U {
        self.fetcher.upstream()
    }

    pub async fn extract<E: Entity>(&self) -> Result<Vec<E>> {
        self.fetcher.fetch().await
    }

    pub fn transform<E: Entity>(&self, data: Vec<E>, query: &PageQuery) -> Result<Vec<E>> {
        apply_filters_and_sorting(
            data,
            query.search.as_deref(),
            query.sort_by.as_deref(),
            query.order,
            &self.log,
        )
    }

    pub fn load<E: Entity>(&self, data: Vec<E>, query: &PageQuery) -> PageEnvelope<E> {
        paginate(data, query.page, query.page_size)
    }

    pub async fn get_page<E: Entity>(&self, query: &PageQuery) -> Result<PageEnvelope<E>> {
        tracing::info!(
            parent: self.log.span(),
            "GET /{} | page={} page_size={} search={:?} sort_by={:?} order={}",
            E::KIND.resource(),
            query.page,
            query.page_size,
            query.search,
            query.sort_by,
            query.order
        );

        // Reject bad parameters before spending an upstream call on them.
        query.validate()?;
        if let Some(field) = query.sort_by.as_deref().filter(|s| !s.is_empty()) {
            validate_sort_field(E::schema(), field)?;
        }

        let data = self.extract::<E>().await?;
        let filtered = self.transform(data, query)?;
        let envelope = self.load(filtered, query);

        tracing::debug!(
            parent: self.log.span(),
            "Returning {} of {} '{}' records",
            envelope.results_count,
            envelope.count,
            E::KIND.resource()
        );
        Ok(envelope)
    }
}

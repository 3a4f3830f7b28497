//! Deferred, chainable queries over a resource collection

use super::fields::{self, Queryable};
use super::filter::{split_keyword, Filter, FilterArg, FilterValue, Sort};
use super::options::{validate_page_size, RequestOptions};
use crate::error::{Error, Result};
use crate::pagination::{Page, PageFetch, Pager};
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

/// A query against one collection, run only when its results are consumed.
///
/// Builder methods take `self` and hand back the updated query, so a pager
/// created earlier keeps the options it was built with.
///
/// ```rust,ignore
/// let recent = server
///     .users()
///     .filter("last_login__gte", "2024-01-01T00:00:00Z")?
///     .order_by(&["-last_login"])?
///     .page_size(200)?
///     .collect()
///     .await?;
/// ```
pub struct QuerySet<'a, T> {
    fetcher: &'a dyn PageFetch<T>,
    options: RequestOptions,
    _item: PhantomData<fn() -> T>,
}

impl<T> Clone for QuerySet<'_, T> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher,
            options: self.options.clone(),
            _item: PhantomData,
        }
    }
}

impl<T> fmt::Debug for QuerySet<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuerySet")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<'a, T: Queryable> QuerySet<'a, T> {
    pub fn new(fetcher: &'a dyn PageFetch<T>) -> Self {
        Self::with_options(fetcher, RequestOptions::default())
    }

    pub fn with_options(fetcher: &'a dyn PageFetch<T>, options: RequestOptions) -> Self {
        Self {
            fetcher,
            options,
            _item: PhantomData,
        }
    }

    /// Add a keyword filter such as `name`, `site_role__in` or `last_login__gte`
    ///
    /// The field must be listed for the resource and allow the operator.
    /// A later filter on the same field replaces an earlier one.
    pub fn filter(mut self, key: &str, value: impl Into<FilterValue>) -> Result<Self> {
        // Unknown fields are reported as such, whatever their suffix
        let field = key.rsplit_once("__").map_or(key, |(field, _)| field);
        if fields::lookup(T::fields(), field).is_none() {
            return Err(Error::InvalidFilterField {
                resource: T::RESOURCE.to_string(),
                field: field.to_string(),
            });
        }
        let (field, operator) = split_keyword(key)?;
        let spec = fields::resolve(T::RESOURCE, T::fields(), field, operator)?;
        self.options
            .set_filter(Filter::new(spec.name, operator, value)?);
        Ok(self)
    }

    /// Apply parsed `key=value` arguments
    ///
    /// Every argument is checked before any is applied; a positional
    /// argument fails the whole call.
    pub fn filter_args(self, args: impl IntoIterator<Item = FilterArg>) -> Result<Self> {
        let mut keywords = Vec::new();
        for arg in args {
            match arg {
                FilterArg::Keyword { key, value } => keywords.push((key, value)),
                FilterArg::Positional(value) => {
                    return Err(Error::PositionalFilterArgument { value })
                }
            }
        }
        keywords
            .into_iter()
            .try_fold(self, |qs, (key, value)| qs.filter(&key, value))
    }

    /// Sort by fields, `-` prefix for descending; replaces any earlier order
    pub fn order_by(mut self, specs: &[&str]) -> Result<Self> {
        let mut sorts = Vec::with_capacity(specs.len());
        for spec in specs {
            let field = spec.strip_prefix('-').unwrap_or(spec);
            if fields::lookup(T::fields(), field).is_none() {
                return Err(Error::InvalidSortField {
                    resource: T::RESOURCE.to_string(),
                    field: field.to_string(),
                });
            }
            sorts.push(Sort::parse(spec));
        }
        self.options.set_sorts(sorts);
        Ok(self)
    }

    /// Items per request, between 1 and 1000
    pub fn page_size(mut self, page_size: i64) -> Result<Self> {
        self.options.set_page_size(validate_page_size(page_size)?);
        Ok(self)
    }

    /// Start at `page_number` with the given page size
    pub fn paginate(self, page_number: u32, page_size: i64) -> Result<Self> {
        let mut qs = self.page_size(page_size)?;
        if page_number == 0 {
            return Err(Error::invalid_argument("page number starts at 1"));
        }
        qs.options.set_page_number(page_number);
        Ok(qs)
    }

    /// Request every field of each item
    #[must_use]
    pub fn all_fields(mut self) -> Self {
        self.options.set_all_fields(true);
        self
    }

    /// Options the query will be sent with
    pub fn request_options(&self) -> &RequestOptions {
        &self.options
    }

    /// A pager over every matching item, with a snapshot of the current options
    pub fn pager(&self) -> Result<Pager<'a, T>> {
        debug!(resource = T::RESOURCE, query = %self.options.to_query_string(), "Running query");
        Pager::with_options(self.fetcher, self.options.clone())
    }

    /// Fetch every matching item
    pub async fn collect(&self) -> Result<Vec<T>> {
        self.pager()?.collect().await
    }

    /// Fetch just the page the options point at
    pub async fn fetch_page(&self) -> Result<Page<T>> {
        self.options.validate()?;
        self.fetcher.fetch(&self.options).await
    }

    /// First matching item, fetched with a page size of 1
    pub async fn first(&self) -> Result<Option<T>> {
        let (items, _) = self.clone().paginate(1, 1)?.fetch_page().await?;
        Ok(items.into_iter().next())
    }

    /// Number of matching items as reported by the server
    pub async fn total_available(&self) -> Result<u64> {
        let (_, pagination) = self.clone().paginate(1, 1)?.fetch_page().await?;
        Ok(pagination.total_available())
    }
}

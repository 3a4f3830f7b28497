//! Query building: request options, the filter DSL and `QuerySet`
//!
//! # Overview
//!
//! - `RequestOptions` - page number/size, filters, sorts, all-fields flag,
//!   rendered into `pageNumber`, `pageSize`, `sort`, `filter`, `fields`
//! - `Filter` / `Sort` - `field:op:value` and `field:dir` clauses
//! - `FieldSpec` tables - per-resource allow-lists of filterable fields
//! - `QuerySet` - deferred query that drives a `Pager` when consumed

mod fields;
mod filter;
mod options;
mod queryset;

pub use fields::{lookup, resolve, FieldSpec, Queryable, GROUP_SET_FIELDS, USER_FIELDS};
pub use filter::{
    split_keyword, to_camel_case, to_snake_case, Direction, Filter, FilterArg, FilterValue,
    Operator, Sort,
};
pub use options::{validate_page_size, RequestOptions, MAX_PAGE_SIZE, MIN_PAGE_SIZE};
pub use queryset::QuerySet;

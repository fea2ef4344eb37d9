//! Pagination module
//!
//! Turns a sequence of paged responses into one lazy stream of items.
//!
//! # Overview
//!
//! A [`Pager`] owns a copy of the caller's [`PageRequest`] and a request
//! function. Each time the consumer drains the current page it calls the
//! request function once with the cursor from the previous [`PageResult`].
//! The stream ends when a page comes back without a cursor.
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use pagewalk::pagination::{paginate, PageRequest};
//!
//! let initial = PageRequest::new().with("per_page", 100);
//! let mut items = Box::pin(paginate(|params| client.fetch(params), &initial));
//! while let Some(item) = items.next().await {
//!     let item = item?;
//! }
//! ```

mod pager;
mod query;
mod types;

pub use pager::{paginate, Pager};
pub use query::encode_query;
pub use types::{PageRequest, PageResult, PagerState, ParamValue, CURSOR_PARAM};

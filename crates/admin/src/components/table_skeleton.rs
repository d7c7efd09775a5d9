//! Loading placeholder for tables filled in by an htmx request.

use askama::Template;

/// A `rows × columns` grid of placeholder cells that replaces itself with
/// the response of `GET src` as soon as it is on the page.
#[derive(Debug, Clone, Template)]
#[template(path = "components/table_skeleton.html")]
pub struct TableSkeleton {
    pub rows: usize,
    pub columns: usize,
    pub src: &'static str,
}

impl TableSkeleton {
    #[must_use]
    pub const fn new(src: &'static str, rows: usize, columns: usize) -> Self {
        Self { rows, columns, src }
    }
}

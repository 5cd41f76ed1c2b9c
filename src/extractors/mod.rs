//! Request extractors shared by the resource handlers.

mod body;
mod pagination;
pub use body::FormBody;
pub use pagination::Pagination;

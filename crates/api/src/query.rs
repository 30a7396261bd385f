//! Shared query parameter types for API handlers.

use coopsite_core::pagination::PageRequest;
use serde::Deserialize;

/// Pagination parameters (`?page=&per_page=`).
///
/// Values are defaulted and clamped by [`PageRequest::new`].
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageParams {
    pub fn to_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }
}

/// Query parameters for the election lookup (`?member_no=`).
#[derive(Debug, Default, Deserialize)]
pub struct MemberLookupParams {
    pub member_no: Option<String>,
}

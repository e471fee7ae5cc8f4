use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

crate::literal_enum! {
    pub enum OperationStatus {
        Success = "success",
        Failed = "failed",
        Pending = "pending",
        Cancelled = "cancelled",
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse {
    pub status: OperationStatus,
    pub message: String,
    pub timestamp: String,
    pub request_id: String,
}

/// Envelope fields shared by every response; the status travels as the tag
/// of [`ApiResponse`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub message: String,
    pub timestamp: String,
    pub request_id: String,
}

impl ResponseMeta {
    pub fn with_status(&self, status: OperationStatus) -> BaseResponse {
        BaseResponse {
            status,
            message: self.message.clone(),
            timestamp: self.timestamp.clone(),
            request_id: self.request_id.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PaginationInfo {
    /// Pages are 1-based. A zero page size yields no pages, whatever the item
    /// count.
    pub fn new(current_page: u64, page_size: u64, total_items: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_items.div_ceil(page_size)
        };
        Self {
            current_page,
            page_size,
            total_items,
            total_pages,
            has_next: current_page < total_pages,
            has_previous: current_page > 1,
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    pub data: T,
    pub pagination: Option<PaginationInfo>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    pub error_code: String,
    pub error_details: Option<BTreeMap<String, Value>>,
    pub stack_trace: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    pub data: Vec<T>,
    pub pagination: PaginationInfo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemResponse<T> {
    #[serde(flatten)]
    pub meta: ResponseMeta,
    pub data: T,
}

impl<T> From<ListResponse<T>> for SuccessResponse<Vec<T>> {
    fn from(value: ListResponse<T>) -> Self {
        Self {
            meta: value.meta,
            data: value.data,
            pagination: Some(value.pagination),
        }
    }
}

impl<T> From<ItemResponse<T>> for SuccessResponse<T> {
    fn from(value: ItemResponse<T>) -> Self {
        Self {
            meta: value.meta,
            data: value.data,
            pagination: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApiResponse<T> {
    Success(SuccessResponse<T>),
    Failed(ErrorResponse),
}

impl<T> ApiResponse<T> {
    pub fn status(&self) -> OperationStatus {
        match self {
            Self::Success(_) => OperationStatus::Success,
            Self::Failed(_) => OperationStatus::Failed,
        }
    }

    pub fn meta(&self) -> &ResponseMeta {
        match self {
            Self::Success(response) => &response.meta,
            Self::Failed(response) => &response.meta,
        }
    }

    pub fn base(&self) -> BaseResponse {
        self.meta().with_status(self.status())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn into_result(self) -> Result<SuccessResponse<T>, ErrorResponse> {
        match self {
            Self::Success(response) => Ok(response),
            Self::Failed(response) => Err(response),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_derives_page_flags() {
        let first = PaginationInfo::new(1, 20, 45);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next);
        assert!(!first.has_previous);

        let last = PaginationInfo::new(3, 20, 45);
        assert!(!last.has_next);
        assert!(last.has_previous);

        let empty = PaginationInfo::new(1, 0, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next);
    }

    #[test]
    fn zero_page_size_has_no_pages() {
        let unpaged = PaginationInfo::new(1, 0, 25);
        assert_eq!(unpaged.total_pages, 0);
        assert_eq!(unpaged.total_items, 25);
        assert!(!unpaged.has_next);
        assert!(!unpaged.has_previous);
    }

    #[test]
    fn list_response_widens_into_success_response() {
        let meta = ResponseMeta {
            message: "ok".to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            request_id: "r-1".to_string(),
        };
        let list = ListResponse {
            meta: meta.clone(),
            data: vec![1, 2, 3],
            pagination: PaginationInfo::new(1, 3, 3),
        };

        let success: SuccessResponse<Vec<i32>> = list.into();

        assert_eq!(success.data, vec![1, 2, 3]);
        assert_eq!(success.pagination.map(|page| page.total_pages), Some(1));
        assert_eq!(success.meta, meta);
    }
}

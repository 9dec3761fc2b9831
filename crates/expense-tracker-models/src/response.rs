use serde::Serialize;
use utoipa::ToSchema;

/// `{ "data": ... }` envelope used by the category and expense endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

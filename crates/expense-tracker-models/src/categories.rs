use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[serde(default)]
    #[validate(
        custom(function = "validate_name_present"),
        length(max = 255, message = "Name must not exceed 255 characters")
    )]
    #[schema(example = "Groceries")]
    pub name: String,
}

fn validate_name_present(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(
            validator::ValidationError::new("required").with_message("Name is required".into()),
        );
    }
    Ok(())
}

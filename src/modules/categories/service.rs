use anyhow::anyhow;
use tracing::{info, instrument};

use expense_tracker_core::AppError;

use crate::repository::RepoError;

use super::model::{Category, CreateCategoryDto};
use super::repository::CategoryRepository;

pub struct CategoryService;

impl CategoryService {
    #[instrument(skip(categories))]
    pub async fn list(categories: &dyn CategoryRepository) -> Result<Vec<Category>, AppError> {
        Ok(categories.list().await?)
    }

    #[instrument(skip(categories))]
    pub async fn create(
        categories: &dyn CategoryRepository,
        dto: CreateCategoryDto,
    ) -> Result<Category, AppError> {
        let category = categories.create(dto.name.trim()).await?;

        info!(category_id = category.id, "Category created");

        Ok(category)
    }

    #[instrument(skip(categories))]
    pub async fn delete(categories: &dyn CategoryRepository, id: i64) -> Result<(), AppError> {
        let not_found = || AppError::not_found(anyhow!("Category not found"));

        if categories.find(id).await?.is_none() {
            return Err(not_found());
        }

        match categories.delete(id).await {
            Ok(true) => {
                info!(category_id = id, "Category deleted");
                Ok(())
            }
            Ok(false) => Err(not_found()),
            Err(RepoError::ForeignKey) => Err(AppError::conflict(anyhow!(
                "Category is in use by existing expenses"
            ))),
            Err(e) => Err(e.into()),
        }
    }
}

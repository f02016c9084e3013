use super::BlogService;
use crate::domain::{Category, CategoryDraft, Location, LocationDraft};
use crate::error::{DomainError, RepoError};
use crate::validation;

/// Choices offered by the post form.
#[derive(Debug, Clone)]
pub struct FormChoices {
    pub categories: Vec<Category>,
    pub locations: Vec<Location>,
}

/// Staff management of categories and locations.
impl BlogService {
    /// Published categories and locations, the ones the post form offers.
    /// Submitted ids are still checked against every entry, so a post filed
    /// under an entry that was later hidden keeps it on edit.
    pub async fn form_choices(&self) -> Result<FormChoices, DomainError> {
        let mut choices = self.catalogue().await?;
        choices.categories.retain(|c| c.is_published);
        choices.locations.retain(|l| l.is_published);
        Ok(choices)
    }

    /// Every category and location, published or not.
    pub async fn catalogue(&self) -> Result<FormChoices, DomainError> {
        Ok(FormChoices {
            categories: self.repos.categories.list_all().await?,
            locations: self.repos.locations.list_all().await?,
        })
    }

    pub async fn create_category(&self, draft: CategoryDraft) -> Result<Category, DomainError> {
        validation::validate_category(&draft)?;
        self.ensure_slug_free(&draft.slug, None).await?;

        let category = self.repos.categories.save(Category::new(draft)).await?;
        tracing::info!(category_id = category.id, slug = %category.slug, "Category created");
        Ok(category)
    }

    pub async fn update_category(
        &self,
        category_id: i64,
        draft: CategoryDraft,
    ) -> Result<Category, DomainError> {
        let mut category = self
            .repos
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| DomainError::not_found("category", category_id))?;
        validation::validate_category(&draft)?;
        self.ensure_slug_free(&draft.slug, Some(category_id)).await?;

        category.apply(draft);
        let category = self.repos.categories.save(category).await?;
        tracing::info!(category_id, "Category updated");
        Ok(category)
    }

    /// Delete a category; its posts lose their category.
    pub async fn delete_category(&self, category_id: i64) -> Result<(), DomainError> {
        self.repos
            .categories
            .delete(category_id)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => DomainError::not_found("category", category_id),
                other => other.into(),
            })?;
        tracing::info!(category_id, "Category deleted");
        Ok(())
    }

    pub async fn create_location(&self, draft: LocationDraft) -> Result<Location, DomainError> {
        validation::validate_location(&draft)?;
        let location = self.repos.locations.save(Location::new(draft)).await?;
        tracing::info!(location_id = location.id, "Location created");
        Ok(location)
    }

    pub async fn update_location(
        &self,
        location_id: i64,
        draft: LocationDraft,
    ) -> Result<Location, DomainError> {
        let mut location = self
            .repos
            .locations
            .find_by_id(location_id)
            .await?
            .ok_or_else(|| DomainError::not_found("location", location_id))?;
        validation::validate_location(&draft)?;

        location.apply(draft);
        Ok(self.repos.locations.save(location).await?)
    }

    /// Delete a location; its posts lose their location.
    pub async fn delete_location(&self, location_id: i64) -> Result<(), DomainError> {
        self.repos
            .locations
            .delete(location_id)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => DomainError::not_found("location", location_id),
                other => other.into(),
            })?;
        tracing::info!(location_id, "Location deleted");
        Ok(())
    }

    async fn ensure_slug_free(&self, slug: &str, own_id: Option<i64>) -> Result<(), DomainError> {
        let taken = self
            .repos
            .categories
            .find_by_slug(slug)
            .await?
            .is_some_and(|existing| Some(existing.id) != own_id);
        if taken {
            return Err(DomainError::invalid(
                "slug",
                "Category with this slug already exists",
            ));
        }
        Ok(())
    }
}

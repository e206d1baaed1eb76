use async_trait::async_trait;

use crate::error::AppError;
use crate::models::activity::{RawActivity, Restaurant};
use crate::services::destination_catalog;

/// Everything one source produced for a destination.
#[derive(Debug, Clone, Default)]
pub struct SourceBundle {
    pub activities: Vec<RawActivity>,
    pub restaurants: Vec<Restaurant>,
    pub local_tips: Vec<String>,
}

impl SourceBundle {
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty() && self.restaurants.is_empty() && self.local_tips.is_empty()
    }

    pub fn merge(&mut self, other: SourceBundle) {
        self.activities.extend(other.activities);
        self.restaurants.extend(other.restaurants);
        self.local_tips.extend(other.local_tips);
    }
}

#[async_trait]
pub trait ActivitySource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, destination: &str, interests: &[String])
        -> Result<SourceBundle, AppError>;
}

/// Curated activities shipped with the destination catalog.
pub struct CatalogSource;

#[async_trait]
impl ActivitySource for CatalogSource {
    fn name(&self) -> &str {
        "catalog"
    }

    async fn fetch(
        &self,
        destination: &str,
        _interests: &[String],
    ) -> Result<SourceBundle, AppError> {
        let Some(entry) = destination_catalog::find_destination(destination) else {
            return Err(AppError::NotFound(format!(
                "'{}' is not in the destination catalog",
                destination
            )));
        };

        Ok(SourceBundle {
            activities: destination_catalog::seed_activities(&entry.key),
            restaurants: Vec::new(),
            local_tips: vec![entry.safety_notes],
        })
    }
}

//! Itinerary persistence and export on top of the generator.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::db::ItineraryStore;
use crate::error::AppError;
use crate::models::itinerary::{
    ExportConfirmation, ExportRequest, Itinerary, ItineraryRequest, ItinerarySummary,
};
use crate::services::itinerary_generation_service::ItineraryGenerator;

pub const SAVED_ITINERARY_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Email,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Pdf => f.write_str("pdf"),
            ExportFormat::Email => f.write_str("email"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "email" => Ok(ExportFormat::Email),
            "" => Err(AppError::validation("Export format is required")),
            other => Err(AppError::validation(format!(
                "Unsupported export format '{}', expected pdf or email",
                other
            ))),
        }
    }
}

pub struct ItineraryService {
    generator: Arc<ItineraryGenerator>,
    store: Arc<dyn ItineraryStore>,
}

impl ItineraryService {
    pub fn new(generator: Arc<ItineraryGenerator>, store: Arc<dyn ItineraryStore>) -> Self {
        Self { generator, store }
    }

    pub fn store(&self) -> &Arc<dyn ItineraryStore> {
        &self.store
    }

    /// Generate and persist. A storage failure is logged; the caller still
    /// gets the itinerary.
    pub async fn generate(&self, request: &ItineraryRequest) -> Result<Itinerary, AppError> {
        let itinerary = self.generator.generate_itinerary(request).await?;

        match self.store.save(&itinerary).await {
            Ok(()) => info!(
                "Stored itinerary {} for {} in {}",
                itinerary.id,
                itinerary.destination,
                self.store.backend()
            ),
            Err(e) => warn!("Failed to store itinerary {}: {}", itinerary.id, e),
        }

        Ok(itinerary)
    }

    pub async fn get(&self, id: &str) -> Result<Itinerary, AppError> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Itinerary {} not found", id)))
    }

    pub async fn saved(&self) -> Result<Vec<ItinerarySummary>, AppError> {
        let itineraries = self.store.recent(SAVED_ITINERARY_LIMIT).await?;
        Ok(itineraries.iter().map(ItinerarySummary::from).collect())
    }

    /// Accept an export job. Rendering and delivery happen elsewhere; this
    /// only checks the request and hands back a confirmation.
    pub async fn export(&self, request: &ExportRequest) -> Result<ExportConfirmation, AppError> {
        let itinerary_id = request.itinerary_id.trim();
        if itinerary_id.is_empty() {
            return Err(AppError::validation("itinerary_id is required"));
        }
        let format: ExportFormat = request.format.parse()?;

        let recipient = match format {
            ExportFormat::Email => {
                let email = request
                    .email
                    .as_deref()
                    .map(str::trim)
                    .filter(|e| e.contains('@'))
                    .ok_or_else(|| {
                        AppError::validation("A valid email address is required for email export")
                    })?;
                Some(email.to_string())
            }
            ExportFormat::Pdf => None,
        };

        let itinerary = self.get(itinerary_id).await?;
        let export_id = Uuid::new_v4().to_string();

        let message = match recipient {
            Some(email) => format!(
                "Itinerary for {} will be emailed to {}",
                itinerary.destination, email
            ),
            None => format!(
                "PDF export of your {} itinerary is being prepared",
                itinerary.destination
            ),
        };
        info!("Export {} ({}) queued for itinerary {}", export_id, format, itinerary.id);

        Ok(ExportConfirmation {
            status: "success".to_string(),
            message,
            export_id,
            itinerary_id: itinerary.id,
            format: format.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryItineraryStore;
    use crate::services::activity_normalizer::ActivityNormalizer;
    use crate::services::activity_sources::{ActivitySource, CatalogSource};

    fn service() -> ItineraryService {
        let sources: Vec<Arc<dyn ActivitySource>> = vec![Arc::new(CatalogSource)];
        let generator = ItineraryGenerator::new(Arc::new(ActivityNormalizer::new(sources)));
        ItineraryService::new(Arc::new(generator), Arc::new(MemoryItineraryStore::new()))
    }

    fn paris_request() -> ItineraryRequest {
        ItineraryRequest {
            destination: "Paris".to_string(),
            interests: vec!["museums".to_string()],
            number_of_days: Some(2),
            ..Default::default()
        }
    }

    #[actix_rt::test]
    async fn generated_itineraries_are_stored() {
        let service = service();
        let itinerary = service.generate(&paris_request()).await.unwrap();

        let stored = service.get(&itinerary.id).await.unwrap();
        assert_eq!(stored, itinerary);
        assert_eq!(service.saved().await.unwrap().len(), 1);
    }

    #[actix_rt::test]
    async fn export_checks_format_and_existence() {
        let service = service();
        let itinerary = service.generate(&paris_request()).await.unwrap();

        let ok = service
            .export(&ExportRequest {
                itinerary_id: itinerary.id.clone(),
                format: "PDF".to_string(),
                email: None,
            })
            .await
            .unwrap();
        assert_eq!(ok.status, "success");
        assert_eq!(ok.format, "pdf");

        let bad_format = service
            .export(&ExportRequest {
                itinerary_id: itinerary.id.clone(),
                format: "docx".to_string(),
                email: None,
            })
            .await;
        assert!(matches!(bad_format, Err(AppError::Validation(_))));

        let no_address = service
            .export(&ExportRequest {
                itinerary_id: itinerary.id.clone(),
                format: "email".to_string(),
                email: None,
            })
            .await;
        assert!(matches!(no_address, Err(AppError::Validation(_))));

        let missing = service
            .export(&ExportRequest {
                itinerary_id: "nope".to_string(),
                format: "pdf".to_string(),
                email: None,
            })
            .await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}

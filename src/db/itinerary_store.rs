//! Storage for generated itineraries.

use async_trait::async_trait;
use dashmap::DashMap;
use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use crate::error::AppError;
use crate::models::itinerary::Itinerary;

pub const ITINERARY_COLLECTION: &str = "Itineraries";

#[async_trait]
pub trait ItineraryStore: Send + Sync {
    /// Short backend name for health reporting.
    fn backend(&self) -> &'static str;

    async fn save(&self, itinerary: &Itinerary) -> Result<(), AppError>;

    async fn find(&self, id: &str) -> Result<Option<Itinerary>, AppError>;

    /// Most recent first.
    async fn recent(&self, limit: usize) -> Result<Vec<Itinerary>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

pub struct MongoItineraryStore {
    client: Client,
    database: String,
}

impl MongoItineraryStore {
    pub fn new(client: Client, database: impl Into<String>) -> Self {
        Self {
            client,
            database: database.into(),
        }
    }

    fn collection(&self) -> Collection<Itinerary> {
        self.client
            .database(&self.database)
            .collection::<Itinerary>(ITINERARY_COLLECTION)
    }
}

#[async_trait]
impl ItineraryStore for MongoItineraryStore {
    fn backend(&self) -> &'static str {
        "mongodb"
    }

    async fn save(&self, itinerary: &Itinerary) -> Result<(), AppError> {
        self.collection().insert_one(itinerary).await?;
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<Itinerary>, AppError> {
        Ok(self.collection().find_one(doc! { "id": id }).await?)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Itinerary>, AppError> {
        let cursor = self
            .collection()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .limit(limit as i64)
            .await?;
        Ok(cursor.try_collect::<Vec<Itinerary>>().await?)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database(&self.database)
            .run_command(doc! {"ping": 1})
            .await?;
        Ok(())
    }
}

/// Process-local store used when no MongoDB URI is configured.
#[derive(Default)]
pub struct MemoryItineraryStore {
    itineraries: DashMap<String, Itinerary>,
}

impl MemoryItineraryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItineraryStore for MemoryItineraryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn save(&self, itinerary: &Itinerary) -> Result<(), AppError> {
        self.itineraries
            .insert(itinerary.id.clone(), itinerary.clone());
        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Option<Itinerary>, AppError> {
        Ok(self.itineraries.get(id).map(|entry| entry.value().clone()))
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Itinerary>, AppError> {
        let mut all: Vec<Itinerary> = self
            .itineraries
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all.truncate(limit);
        Ok(all)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub mod itinerary_store;
pub mod mongo;

pub use itinerary_store::{ItineraryStore, MemoryItineraryStore, MongoItineraryStore};

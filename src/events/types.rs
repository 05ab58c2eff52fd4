// events/types.rs
//
// Domain events of the catalog cache.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Category;
use crate::error::ErrorKind;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! domain_event {
    ($name:ident) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                stringify!($name)
            }
        }
    };
}

// ============================================================================
// CATALOG REFRESH
// ============================================================================

/// Emitted after a category listing replaced its cached rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRefreshed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub category: Category,
    pub item_count: usize,
}

impl CategoryRefreshed {
    pub fn new(category: Category, item_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            category,
            item_count,
        }
    }
}

domain_event!(CategoryRefreshed);

/// Emitted when a refresh failed and the cached rows were left in place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRefreshFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub category: Category,
    pub kind: ErrorKind,
    pub reason: String,
}

impl CategoryRefreshFailed {
    pub fn new(category: Category, kind: ErrorKind, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            category,
            kind,
            reason,
        }
    }
}

domain_event!(CategoryRefreshFailed);

// ============================================================================
// DETAILS
// ============================================================================

/// Emitted when a detail record was fetched and cached on a miss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetailsCached {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: i64,
    pub is_favourite: bool,
}

impl MovieDetailsCached {
    pub fn new(movie_id: i64, is_favourite: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            is_favourite,
        }
    }
}

domain_event!(MovieDetailsCached);

// ============================================================================
// FAVOURITES
// ============================================================================

/// Emitted after a favourite toggle committed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavouriteChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: i64,
    pub is_favourite: bool,
    pub summaries_updated: usize,
    pub details_updated: usize,
}

impl FavouriteChanged {
    pub fn new(
        movie_id: i64,
        is_favourite: bool,
        summaries_updated: usize,
        details_updated: usize,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            is_favourite,
            summaries_updated,
            details_updated,
        }
    }
}

domain_event!(FavouriteChanged);

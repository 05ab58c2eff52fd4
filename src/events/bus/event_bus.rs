// events/bus/event_bus.rs
//
// In-process publish/subscribe keyed by event type.
//
// DESIGN PRINCIPLES:
// 1. Synchronous - handlers run on the emitting task, in subscription order
// 2. Observable - every emission lands in a bounded log
// 3. Isolated - a panicking handler never stops the others

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};

use crate::events::types::DomainEvent;

type ErasedHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

/// Emissions kept in the in-memory log
const EVENT_LOG_CAPACITY: usize = 256;

/// The Event Bus
///
/// Services emit facts here (a category was refreshed, a favourite
/// changed) and anything interested subscribes by event type.
///
/// Key characteristics:
/// - Synchronous execution on the emitting task
/// - Handlers execute in subscription order
/// - Bounded emission log for diagnostics
#[derive(Clone)]
pub struct EventBus {
    /// Handlers per event type, in subscription order
    subscribers: Arc<RwLock<HashMap<TypeId, Vec<ErasedHandler>>>>,

    /// Most recent emissions, oldest first
    event_log: Arc<RwLock<VecDeque<EventLogEntry>>>,
}

/// One emission as recorded in the log
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(HashMap::new())),
            event_log: Arc::new(RwLock::new(VecDeque::with_capacity(EVENT_LOG_CAPACITY))),
        }
    }

    /// Subscribe to a specific event type
    ///
    /// Example:
    /// ```ignore
    /// bus.subscribe::<CategoryRefreshed, _>(|event| {
    ///     log::info!("{} now has {} movies", event.category, event.item_count);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let erased: ErasedHandler = Box::new(move |any: &dyn Any| match any.downcast_ref::<E>() {
            Some(event) => handler(event),
            None => log::error!(
                "Event bus handed a foreign event to a {} handler",
                std::any::type_name::<E>()
            ),
        });

        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(TypeId::of::<E>())
            .or_default()
            .push(erased);
    }

    /// Emit an event to every handler subscribed to its type.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let subscribers = self.subscribers.read().unwrap_or_else(PoisonError::into_inner);
        let handlers = subscribers
            .get(&TypeId::of::<E>())
            .map(Vec::as_slice)
            .unwrap_or_default();

        self.record(&event, handlers.len());

        for (position, handler) in handlers.iter().enumerate() {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler(&event as &dyn Any)
            }));

            if outcome.is_err() {
                log::error!(
                    "Handler #{} for {} panicked; remaining handlers still run",
                    position,
                    event.event_type()
                );
            }
        }
    }

    fn record<E: DomainEvent>(&self, event: &E, handler_count: usize) {
        let entry = EventLogEntry {
            event_type: event.event_type().to_string(),
            event_id: event.event_id().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            handler_count,
        };

        log::debug!(
            "[EVENT] {} (id: {}) -> {} handler(s)",
            entry.event_type,
            entry.event_id,
            entry.handler_count
        );

        let mut log = self.event_log.write().unwrap_or_else(PoisonError::into_inner);
        if log.len() == EVENT_LOG_CAPACITY {
            log.pop_front();
        }
        log.push_back(entry);
    }

    /// Snapshot of the emission log
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        self.event_log
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn clear_event_log(&self) {
        self.event_log
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn subscriber_count<E: 'static>(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

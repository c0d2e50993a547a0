//! In-process registry and click ledger.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use tracing::debug;

use crate::domain::clock::Clock;
use crate::domain::entities::{ClickAggregate, ClickEvent, UrlRecord};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;

/// One registry entry: the immutable record, its activity flag and its
/// ledger, stored side by side so they are inserted and removed together.
#[derive(Debug)]
struct LinkSlot {
    record: UrlRecord,
    active: AtomicBool,
    ledger: Mutex<ClickAggregate>,
}

impl LinkSlot {
    fn new(record: UrlRecord) -> Self {
        let ledger = ClickAggregate::new(record.shortcode.clone());
        Self {
            active: AtomicBool::new(record.is_active),
            record,
            ledger: Mutex::new(ledger),
        }
    }

    fn snapshot(&self) -> UrlRecord {
        UrlRecord {
            is_active: self.active.load(Ordering::Acquire),
            ..self.record.clone()
        }
    }
}

/// Sharded in-memory store implementing both [`LinkRepository`] and
/// [`ClickRepository`].
///
/// Slots are reference counted: a reader that already holds a slot keeps a
/// consistent view even if a concurrent cleanup unlinks it from the map.
/// Each slot's ledger has its own lock, so appends to different shortcodes
/// never contend.
#[derive(Debug, Default)]
pub struct MemoryLinkStore {
    links: DashMap<String, Arc<LinkSlot>>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, code: &str) -> Option<Arc<LinkSlot>> {
        self.links.get(code).map(|entry| Arc::clone(entry.value()))
    }
}

impl LinkRepository for MemoryLinkStore {
    fn insert(&self, record: UrlRecord) -> Result<(), AppError> {
        match self.links.entry(record.shortcode.clone()) {
            Entry::Occupied(_) => Err(AppError::ShortcodeTaken),
            Entry::Vacant(vacant) => {
                vacant.insert(Arc::new(LinkSlot::new(record)));
                Ok(())
            }
        }
    }

    fn find(&self, code: &str) -> Option<UrlRecord> {
        self.slot(code).map(|slot| slot.snapshot())
    }

    fn deactivate(&self, code: &str) -> bool {
        self.slot(code)
            .is_some_and(|slot| slot.active.swap(false, Ordering::AcqRel))
    }

    fn remove_expired(&self, now: DateTime<Utc>) -> Vec<String> {
        let candidates: Vec<String> = self
            .links
            .iter()
            .filter(|entry| entry.value().record.is_expired_at(now))
            .map(|entry| entry.key().clone())
            .collect();

        let removed: Vec<String> = candidates
            .into_iter()
            .filter_map(|code| {
                self.links
                    .remove_if(&code, |_, slot| slot.record.is_expired_at(now))
                    .map(|(code, slot)| {
                        slot.active.store(false, Ordering::Release);
                        code
                    })
            })
            .collect();

        debug!(removed = removed.len(), remaining = self.links.len(), "Expired links swept");
        removed
    }

    fn count(&self) -> usize {
        self.links.len()
    }
}

impl ClickRepository for MemoryLinkStore {
    fn append(&self, code: &str, mut event: ClickEvent, clock: &dyn Clock) -> Result<u64, AppError> {
        let slot = self.slot(code).ok_or(AppError::NotFound)?;
        let mut ledger = slot.ledger.lock();
        event.timestamp = clock.now();
        Ok(ledger.append(event))
    }

    fn snapshot(&self, code: &str) -> Result<ClickAggregate, AppError> {
        let slot = self.slot(code).ok_or(AppError::NotFound)?;
        let ledger = slot.ledger.lock();
        Ok(ledger.clone())
    }
}

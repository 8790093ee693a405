//! In-memory contact message store, used when no database file is configured

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::database::ContactMessageRepository;
use crate::error::Result;
use crate::models::{ContactMessage, NewContactMessage};

#[derive(Default)]
struct StoreInner {
    messages: Vec<ContactMessage>,
    next_id: i64,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactMessageRepository for MemoryStore {
    async fn insert(&self, input: NewContactMessage) -> Result<ContactMessage> {
        let mut inner = self.inner.write();

        inner.next_id += 1;
        let record = ContactMessage {
            id: inner.next_id,
            name: input.name,
            email: input.email,
            message: input.message,
            created_at: Utc::now().trunc_subsecs(6),
        };

        inner.messages.push(record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<ContactMessage>> {
        let inner = self.inner.read();
        // ids are dense and start at 1
        let record = id
            .checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .and_then(|index| inner.messages.get(index))
            .cloned();
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<ContactMessage>> {
        Ok(self.inner.read().messages.clone())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.inner.read().messages.len() as i64)
    }
}

//! The persistence seam and its SQLite adapter.
//!
//! The orchestrator talks to [`ConversationStore`] so tests can inject
//! failures at every persistence step; production wires in
//! [`SqliteConversationStore`] over [`frontdesk_store::ChatStore`].

use std::sync::Arc;

use async_trait::async_trait;
use frontdesk_core::config::BusinessProfile;
use frontdesk_core::{Address, MessageRecord, MessageRole, Sentiment};
use frontdesk_store::{ChatStore, InteractionRecord, StoreError};

/// The persistence operations one orchestration turn needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Upsert the contact and bump its counter; reports first contact.
    async fn record_interaction(&self, address: &Address)
    -> Result<InteractionRecord, StoreError>;

    /// Current continuation tag, creating a null session if absent.
    async fn session_state(&self, address: &Address) -> Result<Option<String>, StoreError>;

    /// Upsert the continuation tag; `None` clears it.
    async fn set_session_state(
        &self,
        address: &Address,
        state: Option<String>,
    ) -> Result<(), StoreError>;

    /// Append one message log record.
    async fn append_message(
        &self,
        address: &Address,
        role: MessageRole,
        content: String,
        sentiment: Sentiment,
    ) -> Result<(), StoreError>;

    /// Last `limit` messages, most recent first.
    async fn last_messages(
        &self,
        address: &Address,
        limit: usize,
    ) -> Result<Vec<MessageRecord>, StoreError>;

    /// Contents of the most recent `limit` messages (topic scan).
    async fn recent_texts(
        &self,
        address: &Address,
        limit: usize,
    ) -> Result<Vec<String>, StoreError>;

    /// Delete the message log for `address`; returns deleted row count.
    async fn clear_messages(&self, address: &Address) -> Result<u64, StoreError>;

    /// The tenant business profile, if configured.
    async fn business_profile(&self) -> Result<Option<BusinessProfile>, StoreError>;
}

/// [`ConversationStore`] over the pooled SQLite [`ChatStore`].
///
/// `ChatStore` operations are short point writes/reads; they run inline on
/// the async worker rather than bouncing through `spawn_blocking`.
pub struct SqliteConversationStore {
    inner: Arc<ChatStore>,
}

impl SqliteConversationStore {
    /// Wrap a shared `ChatStore`.
    pub fn new(inner: Arc<ChatStore>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ConversationStore for SqliteConversationStore {
    async fn record_interaction(
        &self,
        address: &Address,
    ) -> Result<InteractionRecord, StoreError> {
        self.inner.record_interaction(address)
    }

    async fn session_state(&self, address: &Address) -> Result<Option<String>, StoreError> {
        self.inner.session_state(address)
    }

    async fn set_session_state(
        &self,
        address: &Address,
        state: Option<String>,
    ) -> Result<(), StoreError> {
        self.inner.set_session_state(address, state.as_deref())
    }

    async fn append_message(
        &self,
        address: &Address,
        role: MessageRole,
        content: String,
        sentiment: Sentiment,
    ) -> Result<(), StoreError> {
        self.inner.append_message(address, role, &content, sentiment)
    }

    async fn last_messages(
        &self,
        address: &Address,
        limit: usize,
    ) -> Result<Vec<MessageRecord>, StoreError> {
        self.inner.last_messages(address, limit)
    }

    async fn recent_texts(
        &self,
        address: &Address,
        limit: usize,
    ) -> Result<Vec<String>, StoreError> {
        self.inner.recent_texts(address, limit)
    }

    async fn clear_messages(&self, address: &Address) -> Result<u64, StoreError> {
        self.inner.clear_messages(address)
    }

    async fn business_profile(&self) -> Result<Option<BusinessProfile>, StoreError> {
        self.inner.business_profile()
    }
}

//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for every
//! economy operation, plus streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use clicker_core::{
    ClickOutcome, GrantOutcome, ItemId, LootOutcome, MutationOutcome, PromoOutcome,
    UpgradeOutcome,
};

use super::errors::{Result, RuntimeError};
use super::types::{AdminOp, SessionSnapshot};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with a session
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Register one manual click.
    ///
    /// A click from a banned player is not an error: it returns an outcome
    /// with `accepted == false`.
    pub async fn click(&self) -> Result<ClickOutcome> {
        self.request(|reply| Command::Click { reply }).await?
    }

    pub async fn purchase_upgrade(&self) -> Result<UpgradeOutcome> {
        self.request(|reply| Command::PurchaseUpgrade { reply })
            .await?
    }

    /// Open a case.
    ///
    /// The price is debited immediately; the future completes when the item
    /// is revealed after the configured pending window.
    pub async fn open_case(&self) -> Result<LootOutcome> {
        self.request(|reply| Command::OpenCase { reply }).await?
    }

    /// Spend the single mutation attempt of `item`.
    ///
    /// Completes after the pending window, like [`open_case`](Self::open_case).
    pub async fn mutate(&self, item: ItemId) -> Result<MutationOutcome> {
        self.request(|reply| Command::Mutate { item, reply })
            .await?
    }

    pub async fn redeem_promo(&self, code: impl Into<String>) -> Result<PromoOutcome> {
        let code = code.into();
        self.request(|reply| Command::RedeemPromo { code, reply })
            .await?
    }

    pub async fn admin(&self, op: AdminOp) -> Result<GrantOutcome> {
        self.request(|reply| Command::Admin { op, reply }).await?
    }

    pub async fn grant_currency(&self) -> Result<GrantOutcome> {
        self.admin(AdminOp::GrantCurrency).await
    }

    pub async fn grant_click_power(&self) -> Result<GrantOutcome> {
        self.admin(AdminOp::GrantClickPower).await
    }

    pub async fn grant_item(&self) -> Result<GrantOutcome> {
        self.admin(AdminOp::GrantItem).await
    }

    pub async fn reset_progress(&self) -> Result<GrantOutcome> {
        self.admin(AdminOp::ResetProgress).await
    }

    /// Query the current session state (read-only snapshot)
    pub async fn query_state(&self) -> Result<SessionSnapshot> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Ledger` - Click credits, passive income, upgrades
    /// - `Topic::Loot` - Case openings and mutation results
    /// - `Topic::Guard` - Click-guard warnings and bans
    /// - `Topic::Privilege` - Promo redemption and admin grants
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use clicker_runtime::Topic;
    ///
    /// let mut guard_rx = handle.subscribe(Topic::Guard);
    /// while let Ok(event) = guard_rx.recv().await {
    ///     // Render the warning
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}

//! Session worker that owns the authoritative [`PlayerState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), executes
//! them via [`EconomyEngine`], and publishes events to the EventBus. Commands,
//! passive-income ticks and pending-window completions are multiplexed into a
//! single `select!` loop, so no two operations ever interleave.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, trace, warn};

use clicker_core::{
    ClickOutcome, EconomyConfig, EconomyEngine, EconomyEnv, GrantOutcome, GuardVerdict, ItemId,
    LootOutcome, MutationOutcome, MutationResult, PcgRng, PendingCase, PendingMutation,
    PlayerState, PromoOutcome, RarityTable, UpgradeOutcome,
};

use super::pending::{CaseEntry, MutationEntry, PendingOps, Resolution};
use crate::api::{AdminOp, Result, RuntimeError, SessionSnapshot};
use crate::events::{Event, EventBus, GuardEvent, LedgerEvent, LootEvent, PrivilegeEvent};

/// Commands that can be sent to the session worker
pub enum Command {
    /// Register one manual click at the worker's clock.
    Click {
        reply: oneshot::Sender<Result<ClickOutcome>>,
    },
    PurchaseUpgrade {
        reply: oneshot::Sender<Result<UpgradeOutcome>>,
    },
    /// Pay for a case; the reply arrives once the reveal resolves.
    OpenCase {
        reply: oneshot::Sender<Result<LootOutcome>>,
    },
    /// Pay for a mutation; the reply arrives once the coin flip resolves.
    Mutate {
        item: ItemId,
        reply: oneshot::Sender<Result<MutationOutcome>>,
    },
    RedeemPromo {
        code: String,
        reply: oneshot::Sender<Result<PromoOutcome>>,
    },
    Admin {
        op: AdminOp,
        reply: oneshot::Sender<Result<GrantOutcome>>,
    },
    /// Query the current session state (read-only).
    QueryState {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// Static inputs and timing for one session.
pub struct SessionSetup {
    pub username: String,
    pub state: PlayerState,
    pub table: RarityTable,
    pub economy: EconomyConfig,
    pub pending_delay: Duration,
    pub tick_interval: Duration,
}

/// Background task that processes one player's economy commands.
pub struct SessionWorker {
    username: String,
    state: PlayerState,
    table: RarityTable,
    economy: EconomyConfig,
    rng: PcgRng,
    pending: PendingOps,
    pending_delay: Duration,
    tick_interval: Duration,
    started: Instant,
    command_rx: mpsc::Receiver<Command>,
    resolution_tx: mpsc::UnboundedSender<Resolution>,
    resolution_rx: mpsc::UnboundedReceiver<Resolution>,
    event_bus: EventBus,
}

impl SessionWorker {
    /// Creates a new session worker.
    pub fn new(setup: SessionSetup, command_rx: mpsc::Receiver<Command>, event_bus: EventBus) -> Self {
        let (resolution_tx, resolution_rx) = mpsc::unbounded_channel();

        let tick_interval = whole_seconds(setup.tick_interval);
        if tick_interval != setup.tick_interval {
            warn!(
                "Tick interval {:?} rounded to {:?}; passive income accrues per whole second",
                setup.tick_interval, tick_interval
            );
        }

        info!(
            "SessionWorker initialized for '{}' with {} tiers, pending window {:?}",
            setup.username,
            setup.table.len(),
            setup.pending_delay
        );

        Self {
            username: setup.username,
            state: setup.state,
            table: setup.table,
            economy: setup.economy,
            rng: PcgRng,
            pending: PendingOps::default(),
            pending_delay: setup.pending_delay,
            tick_interval,
            started: Instant::now(),
            command_rx,
            resolution_tx,
            resolution_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    ///
    /// Runs until every [`RuntimeHandle`](crate::RuntimeHandle) is dropped.
    pub async fn run(mut self) {
        let mut ticker =
            tokio::time::interval_at(Instant::now() + self.tick_interval, self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

        loop {
            tokio::select! {
                biased;

                Some(resolution) = self.resolution_rx.recv() => {
                    self.handle_resolution(resolution);
                }
                _ = ticker.tick() => {
                    self.handle_tick();
                }
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
            }
        }

        info!(
            "Session for '{}' ended with balance {} and {} items",
            self.username,
            self.state.balance,
            self.state.inventory.len()
        );
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Click { reply } => {
                let result = self.handle_click();
                send_reply(reply, result, "Click");
            }
            Command::PurchaseUpgrade { reply } => {
                let result = self.handle_upgrade();
                send_reply(reply, result, "PurchaseUpgrade");
            }
            Command::OpenCase { reply } => self.handle_open_case(reply),
            Command::Mutate { item, reply } => self.handle_mutate(item, reply),
            Command::RedeemPromo { code, reply } => {
                let result = self.handle_promo(&code);
                send_reply(reply, result, "RedeemPromo");
            }
            Command::Admin { op, reply } => {
                let result = self.handle_admin(op);
                send_reply(reply, result, "Admin");
            }
            Command::QueryState { reply } => {
                send_reply(reply, self.snapshot(), "QueryState");
            }
        }
    }

    fn engine(&mut self) -> EconomyEngine<'_> {
        let env = EconomyEnv::new(&self.table, &self.economy, &self.rng);
        EconomyEngine::new(&mut self.state, env)
    }

    /// Session clock in milliseconds. Starts at 1 because 0 marks "no click yet".
    fn now_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis())
            .unwrap_or(u64::MAX)
            .saturating_add(1)
    }

    fn publish(&self, event: Event) {
        self.event_bus.publish(event);
    }

    fn handle_click(&mut self) -> Result<ClickOutcome> {
        let now_ms = self.now_ms();
        let outcome = self.engine().register_click(now_ms)?;

        match outcome.verdict {
            GuardVerdict::Clean => {}
            GuardVerdict::Warning {
                strike,
                confiscated,
            } => {
                warn!(
                    "Click guard strike {} for '{}' (confiscated {})",
                    strike, self.username, confiscated
                );
                self.publish(Event::Guard(GuardEvent::Warning {
                    strike,
                    confiscated,
                }));
            }
            GuardVerdict::Banned => {
                warn!("'{}' banned by click guard", self.username);
                self.publish(Event::Guard(GuardEvent::Banned));
            }
            GuardVerdict::AlreadyBanned => {
                trace!("Dropped click from banned player '{}'", self.username);
            }
        }

        if outcome.accepted {
            self.publish(Event::Ledger(LedgerEvent::ClickCredited {
                amount: outcome.credited,
                balance: outcome.balance,
            }));
        }
        Ok(outcome)
    }

    fn handle_upgrade(&mut self) -> Result<UpgradeOutcome> {
        let outcome = self.engine().purchase_upgrade()?;
        debug!(
            "Upgrade purchased: click power {} (balance {})",
            outcome.click_power, outcome.balance
        );
        self.publish(Event::Ledger(LedgerEvent::UpgradePurchased {
            price: outcome.price,
            click_power: outcome.click_power,
            balance: outcome.balance,
        }));
        Ok(outcome)
    }

    fn handle_open_case(&mut self, reply: oneshot::Sender<Result<LootOutcome>>) {
        if self.pending.case_pending() {
            debug!("OpenCase rejected: a case is already opening");
            send_reply(reply, Err(RuntimeError::case_in_flight()), "OpenCase");
            return;
        }

        let pending = match self.engine().begin_case() {
            Ok(pending) => pending,
            Err(error) => {
                debug!("OpenCase rejected: {}", error);
                send_reply(reply, Err(error.into()), "OpenCase");
                return;
            }
        };

        self.publish(Event::Loot(LootEvent::CaseOpening {
            price: pending.price(),
            balance: self.state.balance,
        }));

        if self.pending_delay.is_zero() {
            let result = self.resolve_case(pending);
            send_reply(reply, result, "OpenCase");
        } else {
            self.pending.insert_case(CaseEntry { pending, reply });
            self.schedule(Resolution::Case);
        }
    }

    fn handle_mutate(&mut self, item: ItemId, reply: oneshot::Sender<Result<MutationOutcome>>) {
        if self.pending.mutation_pending(item) {
            debug!("Mutate rejected: item {} is already mutating", item);
            send_reply(reply, Err(RuntimeError::mutation_in_flight(item)), "Mutate");
            return;
        }

        let pending = match self.engine().begin_mutation(item) {
            Ok(pending) => pending,
            Err(error) => {
                debug!("Mutate rejected: {}", error);
                send_reply(reply, Err(error.into()), "Mutate");
                return;
            }
        };

        self.publish(Event::Loot(LootEvent::MutationStarted {
            item,
            price: pending.price(),
            balance: self.state.balance,
        }));

        if self.pending_delay.is_zero() {
            let result = self.resolve_mutation(pending);
            send_reply(reply, result, "Mutate");
        } else {
            self.pending.insert_mutation(MutationEntry { pending, reply });
            self.schedule(Resolution::Mutation(item));
        }
    }

    fn handle_promo(&mut self, code: &str) -> Result<PromoOutcome> {
        let outcome = self.engine().redeem_promo(code)?;
        if !outcome.already_admin {
            info!("'{}' redeemed the admin promo code", self.username);
            self.publish(Event::Privilege(PrivilegeEvent::AdminGranted));
        }
        Ok(outcome)
    }

    fn handle_admin(&mut self, op: AdminOp) -> Result<GrantOutcome> {
        // A debited reveal must always complete, so reset waits for it.
        if op == AdminOp::ResetProgress && self.state.is_admin && !self.pending.is_idle() {
            return Err(RuntimeError::reset_in_flight());
        }

        let mut engine = self.engine();
        let outcome = match op {
            AdminOp::GrantCurrency => engine.grant_currency(),
            AdminOp::GrantClickPower => engine.grant_click_power(),
            AdminOp::GrantItem => engine.grant_item(),
            AdminOp::ResetProgress => engine.reset_progress(),
        }?;

        info!("Admin operation {} applied for '{}'", op.kind(), self.username);
        let event = match &outcome {
            GrantOutcome::Currency { amount, balance } => PrivilegeEvent::CurrencyGranted {
                amount: *amount,
                balance: *balance,
            },
            GrantOutcome::ClickPower {
                amount,
                click_power,
            } => PrivilegeEvent::ClickPowerGranted {
                amount: *amount,
                click_power: *click_power,
            },
            GrantOutcome::Item { item } => PrivilegeEvent::ItemGranted { item: item.clone() },
            GrantOutcome::Reset => PrivilegeEvent::ProgressReset,
        };
        self.publish(Event::Privilege(event));
        Ok(outcome)
    }

    fn handle_resolution(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Case => match self.pending.take_case() {
                Some(entry) => {
                    let result = self.resolve_case(entry.pending);
                    send_reply(entry.reply, result, "OpenCase");
                }
                None => error!("Case resolution fired with no pending case"),
            },
            Resolution::Mutation(item) => match self.pending.take_mutation(item) {
                Some(entry) => {
                    let result = self.resolve_mutation(entry.pending);
                    send_reply(entry.reply, result, "Mutate");
                }
                None => error!("Mutation resolution fired for idle item {}", item),
            },
        }
    }

    fn resolve_case(&mut self, pending: PendingCase) -> Result<LootOutcome> {
        let outcome = self.engine().resolve_case(pending).inspect_err(|e| {
            error!("Case resolution failed after payment: {}", e);
        })?;

        debug!(
            "Case revealed {} ({} cps), total cps {}",
            outcome.item.display_name, outcome.item.cps, outcome.total_cps
        );
        self.publish(Event::Loot(LootEvent::LootAcquired {
            item: outcome.item.clone(),
            tier_name: outcome.tier_name.clone(),
            total_cps: outcome.total_cps,
        }));
        Ok(outcome)
    }

    fn resolve_mutation(&mut self, pending: PendingMutation) -> Result<MutationOutcome> {
        let outcome = self.engine().resolve_mutation(pending).inspect_err(|e| {
            error!("Mutation resolution failed after payment: {}", e);
        })?;

        let event = match &outcome.result {
            MutationResult::Upgraded {
                from, previous_cps, ..
            } => LootEvent::MutationSucceeded {
                item: outcome.item.clone(),
                from: from.clone(),
                previous_cps: *previous_cps,
            },
            MutationResult::Failed => LootEvent::MutationFailed {
                item: outcome.item.clone(),
                top_tier: false,
            },
            MutationResult::TopTier => LootEvent::MutationFailed {
                item: outcome.item.clone(),
                top_tier: true,
            },
        };
        debug!("Mutation of item {} resolved: {:?}", outcome.item.id, outcome.result);
        self.publish(Event::Loot(event));
        Ok(outcome)
    }

    /// Passive income: `total_cps` for each second the tick interval covers.
    fn handle_tick(&mut self) {
        if self.state.total_cps() == 0 {
            return;
        }

        let elapsed_secs = self.tick_interval.as_secs();
        match self.engine().tick(elapsed_secs) {
            Ok(outcome) => {
                trace!("Passive income +{} (balance {})", outcome.amount, outcome.balance);
                self.publish(Event::Ledger(LedgerEvent::PassiveIncome {
                    amount: outcome.amount,
                    balance: outcome.balance,
                }));
            }
            Err(error) => error!("Passive tick failed: {}", error),
        }
    }

    /// Posts `resolution` back to this worker once the pending window elapses.
    fn schedule(&self, resolution: Resolution) {
        let tx = self.resolution_tx.clone();
        let delay = self.pending_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(resolution).is_err() {
                trace!("Session ended before {:?} resolved", resolution);
            }
        });
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            username: self.username.clone(),
            state: self.state.view(),
            total_cps: self.state.total_cps(),
            case_pending: self.pending.case_pending(),
            mutations_pending: self.pending.mutation_items(),
        }
    }
}

/// Rounds a tick period to the nearest whole second, never below one.
fn whole_seconds(interval: Duration) -> Duration {
    let secs = interval.as_millis().saturating_add(500) / 1_000;
    Duration::from_secs(u64::try_from(secs).unwrap_or(u64::MAX).max(1))
}

fn send_reply<T>(reply: oneshot::Sender<T>, value: T, command: &str) {
    if reply.send(value).is_err() {
        debug!("{} reply channel closed (caller dropped)", command);
    }
}

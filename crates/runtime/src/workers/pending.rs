//! Bookkeeping for paid operations waiting out the pending window.
//!
//! A case or mutation is debited as soon as it is requested, but the caller's
//! reply is held here until the worker resolves it. At most one case may be
//! pending at a time, and at most one mutation per item.

use std::collections::HashMap;

use tokio::sync::oneshot;

use clicker_core::{ItemId, LootOutcome, MutationOutcome, PendingCase, PendingMutation};

use crate::api::Result;

/// Resolution signal posted back to the worker once a pending window elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Case,
    Mutation(ItemId),
}

pub struct CaseEntry {
    pub pending: PendingCase,
    pub reply: oneshot::Sender<Result<LootOutcome>>,
}

pub struct MutationEntry {
    pub pending: PendingMutation,
    pub reply: oneshot::Sender<Result<MutationOutcome>>,
}

#[derive(Default)]
pub struct PendingOps {
    case: Option<CaseEntry>,
    mutations: HashMap<ItemId, MutationEntry>,
}

impl PendingOps {
    pub fn case_pending(&self) -> bool {
        self.case.is_some()
    }

    pub fn mutation_pending(&self, item: ItemId) -> bool {
        self.mutations.contains_key(&item)
    }

    pub fn is_idle(&self) -> bool {
        self.case.is_none() && self.mutations.is_empty()
    }

    /// Items with a mutation in flight, in ascending id order.
    pub fn mutation_items(&self) -> Vec<ItemId> {
        let mut items: Vec<ItemId> = self.mutations.keys().copied().collect();
        items.sort_unstable();
        items
    }

    pub fn insert_case(&mut self, entry: CaseEntry) {
        debug_assert!(self.case.is_none(), "a case is already pending");
        self.case = Some(entry);
    }

    pub fn insert_mutation(&mut self, entry: MutationEntry) {
        let item = entry.pending.item();
        debug_assert!(!self.mutations.contains_key(&item));
        self.mutations.insert(item, entry);
    }

    pub fn take_case(&mut self) -> Option<CaseEntry> {
        self.case.take()
    }

    pub fn take_mutation(&mut self, item: ItemId) -> Option<MutationEntry> {
        self.mutations.remove(&item)
    }
}

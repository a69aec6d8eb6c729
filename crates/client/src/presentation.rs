//! Text rendering for session notifications and snapshots.
use std::fmt::Write;

use clicker_runtime::{
    Event, GuardEvent, LedgerEvent, LootEvent, PrivilegeEvent, SessionSnapshot,
};

/// Renders one notification, or `None` for events too frequent to print.
///
/// Per-click credits and passive income land in the log file instead.
pub fn render_event(event: &Event) -> Option<String> {
    let text = match event {
        Event::Ledger(LedgerEvent::ClickCredited { .. } | LedgerEvent::PassiveIncome { .. }) => {
            return None;
        }
        Event::Ledger(LedgerEvent::UpgradePurchased {
            price,
            click_power,
            balance,
        }) => format!("Upgrade bought for {price}: click power {click_power} (balance {balance})"),

        Event::Loot(LootEvent::CaseOpening { price, balance }) => {
            format!("Opening case for {price}... (balance {balance})")
        }
        Event::Loot(LootEvent::LootAcquired {
            item,
            tier_name,
            total_cps,
        }) => format!(
            "Got {} [#{}] - {tier_name}, {} cps (total {total_cps} cps)",
            item.display_name, item.id, item.cps
        ),
        Event::Loot(LootEvent::MutationStarted {
            item,
            price,
            balance,
        }) => format!("Mutating item #{item} for {price}... (balance {balance})"),
        Event::Loot(LootEvent::MutationSucceeded {
            item,
            from,
            previous_cps,
        }) => format!(
            "Mutation succeeded: #{} {from} -> {}, {previous_cps} -> {} cps",
            item.id, item.tier, item.cps
        ),
        Event::Loot(LootEvent::MutationFailed { item, top_tier }) => {
            if *top_tier {
                format!("Mutation had nowhere to go: #{} is already top tier", item.id)
            } else {
                format!("Mutation failed: #{} stays {}", item.id, item.tier)
            }
        }

        Event::Guard(GuardEvent::Warning {
            strike,
            confiscated: 0,
        }) => format!("WARNING {strike}: you are clicking too fast"),
        Event::Guard(GuardEvent::Warning {
            strike,
            confiscated,
        }) => format!("WARNING {strike}: clicking too fast, {confiscated} confiscated"),
        Event::Guard(GuardEvent::Banned) => {
            "BANNED: clicks are no longer accepted this session".to_owned()
        }

        Event::Privilege(PrivilegeEvent::AdminGranted) => "Promo accepted: admin unlocked".to_owned(),
        Event::Privilege(PrivilegeEvent::CurrencyGranted { amount, balance }) => {
            format!("Granted {amount} currency (balance {balance})")
        }
        Event::Privilege(PrivilegeEvent::ClickPowerGranted {
            amount,
            click_power,
        }) => format!("Granted {amount} click power (now {click_power})"),
        Event::Privilege(PrivilegeEvent::ItemGranted { item }) => {
            format!("Granted {} [#{}], {} cps", item.display_name, item.id, item.cps)
        }
        Event::Privilege(PrivilegeEvent::ProgressReset) => "Progress reset".to_owned(),
    };

    Some(text)
}

/// Multi-line summary of a session snapshot.
pub fn render_snapshot(snapshot: &SessionSnapshot) -> String {
    let state = &snapshot.state;
    let mut out = String::new();

    let _ = writeln!(out, "{}", snapshot.username);
    let _ = writeln!(
        out,
        "  balance {}  click power {}  income {} cps",
        state.balance, state.click_power, snapshot.total_cps
    );

    let mut flags = Vec::new();
    if state.is_admin {
        flags.push("admin".to_owned());
    }
    if state.banned {
        flags.push("banned".to_owned());
    } else if state.warning_count > 0 {
        flags.push(format!("{} warning(s)", state.warning_count));
    }
    if snapshot.case_pending {
        flags.push("case opening".to_owned());
    }
    if !flags.is_empty() {
        let _ = writeln!(out, "  [{}]", flags.join(", "));
    }

    if state.inventory.is_empty() {
        let _ = write!(out, "  inventory empty");
    } else {
        let _ = write!(out, "  inventory ({} items):", state.inventory.len());
        for item in &state.inventory {
            let marker = if snapshot.mutations_pending.contains(&item.id) {
                " (mutating)"
            } else if item.mutated {
                " (mutated)"
            } else {
                ""
            };
            let _ = write!(
                out,
                "\n    #{:<4} {:<24} {:>5} cps{marker}",
                item.id, item.display_name, item.cps
            );
        }
    }

    out
}

use std::time::Duration;

use clicker_core::{EconomyError, GrantOutcome, GuardVerdict, OperationKind};
use clicker_runtime::{
    Event, GuardEvent, LedgerEvent, LootEvent, PrivilegeEvent, Runtime, RuntimeConfig,
    RuntimeError, Topic,
};

fn config(pending_delay: Duration) -> RuntimeConfig {
    RuntimeConfig {
        pending_delay,
        seed: Some(0xC11C),
        ..RuntimeConfig::default()
    }
}

async fn start(pending_delay: Duration) -> Runtime {
    Runtime::builder()
        .username("tester")
        .config(config(pending_delay))
        .build()
        .await
        .expect("session should start")
}

/// Becomes admin and takes the currency grant so purchases are affordable.
async fn fund(runtime: &Runtime) {
    let handle = runtime.handle();
    handle.redeem_promo("setup").await.unwrap();
    handle.grant_currency().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn second_case_is_rejected_while_first_is_opening() {
    let runtime = start(Duration::from_millis(2_000)).await;
    fund(&runtime).await;
    let handle = runtime.handle();
    let mut loot_rx = handle.subscribe(Topic::Loot);

    let first = tokio::spawn({
        let handle = handle.clone();
        async move { handle.open_case().await }
    });

    let opening = loot_rx.recv().await.unwrap();
    assert!(matches!(
        opening,
        Event::Loot(LootEvent::CaseOpening { price: 100, balance: 9_900 })
    ));

    let snapshot = handle.query_state().await.unwrap();
    assert!(snapshot.case_pending);
    assert_eq!(snapshot.state.balance, 9_900);
    assert!(snapshot.state.inventory.is_empty());

    let second = handle.open_case().await;
    assert!(matches!(
        second,
        Err(RuntimeError::OperationInFlight {
            kind: OperationKind::OpenCase,
            item: None
        })
    ));

    let outcome = first.await.unwrap().unwrap();
    let snapshot = handle.query_state().await.unwrap();
    assert!(!snapshot.case_pending);
    assert_eq!(snapshot.state.inventory, vec![outcome.item.clone()]);

    let acquired = loot_rx.recv().await.unwrap();
    assert!(matches!(
        acquired,
        Event::Loot(LootEvent::LootAcquired { ref item, .. }) if item.id == outcome.item.id
    ));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn same_item_cannot_mutate_twice_concurrently() {
    let runtime = start(Duration::from_millis(2_000)).await;
    fund(&runtime).await;
    let handle = runtime.handle();

    let GrantOutcome::Item { item } = handle.grant_item().await.unwrap() else {
        panic!("expected an item grant");
    };
    // Granted items are pre-mutated; use a drawn one instead.
    let case_item = {
        let h = handle.clone();
        tokio::spawn(async move { h.open_case().await })
            .await
            .unwrap()
            .unwrap()
            .item
    };
    assert!(item.mutated);

    let mut loot_rx = handle.subscribe(Topic::Loot);
    let first = tokio::spawn({
        let handle = handle.clone();
        let id = case_item.id;
        async move { handle.mutate(id).await }
    });
    let started = loot_rx.recv().await.unwrap();
    assert!(matches!(started, Event::Loot(LootEvent::MutationStarted { .. })));

    let second = handle.mutate(case_item.id).await;
    assert!(matches!(
        second,
        Err(RuntimeError::OperationInFlight {
            kind: OperationKind::Mutate,
            item: Some(id)
        }) if id == case_item.id
    ));

    let reset = handle.reset_progress().await;
    assert!(matches!(
        reset,
        Err(RuntimeError::OperationInFlight {
            kind: OperationKind::ResetProgress,
            ..
        })
    ));

    let outcome = first.await.unwrap().unwrap();
    assert!(outcome.item.mutated);

    let again = handle.mutate(case_item.id).await.unwrap_err();
    assert!(matches!(again.economy(), Some(EconomyError::AlreadyMutated { .. })));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn passive_income_accrues_per_second() {
    let runtime = start(Duration::ZERO).await;
    fund(&runtime).await;
    let handle = runtime.handle();
    handle.grant_item().await.unwrap();

    let before = handle.query_state().await.unwrap();
    assert_eq!(before.total_cps, 1_000);

    tokio::time::advance(Duration::from_secs(3)).await;
    let after = handle.query_state().await.unwrap();

    assert_eq!(after.state.balance, before.state.balance + 3_000);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn sub_second_tick_interval_credits_real_time_only() {
    let runtime = Runtime::builder()
        .username("tester")
        .config(RuntimeConfig {
            tick_interval: Duration::from_millis(250),
            ..config(Duration::ZERO)
        })
        .build()
        .await
        .unwrap();
    fund(&runtime).await;
    let handle = runtime.handle();
    handle.grant_item().await.unwrap();
    let before = handle.query_state().await.unwrap();

    tokio::time::advance(Duration::from_secs(2)).await;
    let after = handle.query_state().await.unwrap();

    assert_eq!(after.state.balance, before.state.balance + 2_000);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn no_income_without_items() {
    let runtime = start(Duration::ZERO).await;
    let handle = runtime.handle();
    let mut ledger_rx = handle.subscribe(Topic::Ledger);

    tokio::time::advance(Duration::from_secs(5)).await;
    let snapshot = handle.query_state().await.unwrap();

    assert_eq!(snapshot.state.balance, 0);
    assert!(ledger_rx.try_recv().is_err());

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn rapid_clicks_escalate_to_ban() {
    let runtime = start(Duration::ZERO).await;
    let handle = runtime.handle();
    let mut guard_rx = handle.subscribe(Topic::Guard);

    for i in 0..10 {
        if i > 0 {
            tokio::time::advance(Duration::from_millis(25)).await;
        }
        let outcome = handle.click().await.unwrap();
        assert_eq!(outcome.verdict, GuardVerdict::Clean);
    }
    assert_eq!(handle.query_state().await.unwrap().state.balance, 10);

    // Paused clock: no time passes between these clicks.
    let first = handle.click().await.unwrap();
    let second = handle.click().await.unwrap();
    assert!(matches!(first.verdict, GuardVerdict::Warning { strike: 1, .. }));
    assert!(matches!(second.verdict, GuardVerdict::Warning { strike: 2, .. }));

    // 11 after the first strike, then floor(11 / 2) plus the click itself
    assert_eq!(second.balance, 6);

    let third = handle.click().await.unwrap();
    assert_eq!(third.verdict, GuardVerdict::Banned);
    assert!(!third.accepted);

    tokio::time::advance(Duration::from_secs(1)).await;
    let dropped = handle.click().await.unwrap();
    assert_eq!(dropped.verdict, GuardVerdict::AlreadyBanned);

    let snapshot = handle.query_state().await.unwrap();
    assert!(snapshot.state.banned);
    assert_eq!(snapshot.state.balance, 6);

    let events: Vec<Event> = std::iter::from_fn(|| guard_rx.try_recv().ok()).collect();
    assert_eq!(
        events,
        vec![
            Event::Guard(GuardEvent::Warning {
                strike: 1,
                confiscated: 0
            }),
            Event::Guard(GuardEvent::Warning {
                strike: 2,
                confiscated: 6
            }),
            Event::Guard(GuardEvent::Banned),
        ]
    );

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn privileged_operations_follow_promo() {
    let runtime = start(Duration::ZERO).await;
    let handle = runtime.handle();
    let mut privilege_rx = handle.subscribe(Topic::Privilege);

    let denied = handle.grant_currency().await.unwrap_err();
    assert!(matches!(denied.economy(), Some(EconomyError::NotAdmin { .. })));

    let invalid = handle.redeem_promo("letmein").await.unwrap_err();
    assert!(matches!(invalid.economy(), Some(EconomyError::InvalidCode { .. })));

    let promo = handle.redeem_promo("SETUP").await.unwrap();
    assert!(!promo.already_admin);
    assert!(handle.redeem_promo("setup").await.unwrap().already_admin);

    handle.grant_currency().await.unwrap();
    handle.grant_click_power().await.unwrap();
    handle.grant_item().await.unwrap();
    handle.reset_progress().await.unwrap();

    let snapshot = handle.query_state().await.unwrap();
    assert!(snapshot.state.is_admin);
    assert_eq!(snapshot.state.balance, 0);
    assert_eq!(snapshot.state.click_power, 1);
    assert!(snapshot.state.inventory.is_empty());

    let events: Vec<Event> = std::iter::from_fn(|| privilege_rx.try_recv().ok()).collect();
    assert_eq!(events.len(), 5);
    assert_eq!(events[0], Event::Privilege(PrivilegeEvent::AdminGranted));
    assert_eq!(events[4], Event::Privilege(PrivilegeEvent::ProgressReset));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn upgrade_spends_balance_and_reports_event() {
    let runtime = start(Duration::ZERO).await;
    fund(&runtime).await;
    let handle = runtime.handle();
    let mut ledger_rx = handle.subscribe(Topic::Ledger);

    let outcome = handle.purchase_upgrade().await.unwrap();

    assert_eq!(outcome.click_power, 2);
    assert_eq!(outcome.balance, 9_950);
    assert_eq!(
        ledger_rx.recv().await.unwrap(),
        Event::Ledger(LedgerEvent::UpgradePurchased {
            price: 50,
            click_power: 2,
            balance: 9_950
        })
    );

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn insufficient_funds_leaves_state_untouched() {
    let runtime = start(Duration::ZERO).await;
    let handle = runtime.handle();
    handle.click().await.unwrap();
    let before = handle.query_state().await.unwrap();

    let error = handle.open_case().await.unwrap_err();

    assert!(matches!(
        error.economy(),
        Some(EconomyError::InsufficientFunds {
            required: 100,
            available: 1,
            ..
        })
    ));
    assert_eq!(handle.query_state().await.unwrap(), before);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn snapshot_never_carries_rng_inputs() {
    let runtime = start(Duration::ZERO).await;
    fund(&runtime).await;
    let handle = runtime.handle();
    handle.open_case().await.unwrap();

    let snapshot = handle.query_state().await.unwrap();
    let json = serde_json::to_string(&snapshot).unwrap();

    assert_eq!(snapshot.state.inventory.len(), 1);
    assert!(!json.contains("game_seed"));
    assert!(!json.contains("nonce"));
    assert!(!json.contains(&0xC11C_u64.to_string()));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

//! REPL session glue: login, command dispatch and the notification feed.
use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use clicker_content::ContentFactory;
use clicker_core::{ClickOutcome, EconomyConfig, GuardVerdict, RarityTable};
use clicker_runtime::{Runtime, RuntimeError, RuntimeHandle, Topic};

use crate::config::ClientConfig;
use crate::input::{self, HELP, Input};
use crate::presentation::{render_event, render_snapshot};

type StdinLines = Lines<BufReader<Stdin>>;

pub struct ClientApp {
    config: ClientConfig,
}

impl ClientApp {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Loads content, logs the player in and runs the REPL until quit or EOF.
    pub async fn run(self) -> Result<()> {
        let content = match &self.config.data_dir {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        };
        let table = content
            .load_rarity_table()
            .context("failed to load rarity table")?;
        let economy = content
            .load_economy()
            .context("failed to load economy config")?;
        info!(
            tiers = table.len(),
            data_dir = ?content.data_dir(),
            "Content loaded"
        );

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        let Some(runtime) = self.login(&mut lines, table, economy).await? else {
            return Ok(());
        };
        println!("Welcome, {}. Type 'help' for commands.", runtime.username());

        let handle = runtime.handle();
        let feeds = spawn_event_feeds(&handle);

        prompt();
        while let Some(line) = lines.next_line().await? {
            match input::parse_line(&line) {
                Ok(None) => {}
                Ok(Some(Input::Quit)) => break,
                Ok(Some(input)) => dispatch(&handle, input).await,
                Err(error) => println!("{error}"),
            }
            prompt();
        }

        for feed in feeds {
            feed.abort();
        }
        drop(handle);
        runtime.shutdown().await?;
        println!("Logged out.");
        Ok(())
    }

    /// Starts a session for the configured or prompted username.
    ///
    /// Returns `None` when stdin closes before a usable name is entered.
    async fn login(
        &self,
        lines: &mut StdinLines,
        table: RarityTable,
        economy: EconomyConfig,
    ) -> Result<Option<Runtime>> {
        let mut username = self.config.username.clone();

        loop {
            let name = match username.take() {
                Some(name) => name,
                None => {
                    print!("username: ");
                    flush();
                    match lines.next_line().await? {
                        Some(line) => line,
                        None => return Ok(None),
                    }
                }
            };

            let result = Runtime::builder()
                .username(name)
                .config(self.config.runtime_config(economy.clone()))
                .rarity_table(table.clone())
                .build()
                .await;

            match result {
                Ok(runtime) => return Ok(Some(runtime)),
                Err(RuntimeError::EmptyUsername) => println!("Username must not be empty."),
                Err(error) => return Err(error.into()),
            }
        }
    }
}

async fn dispatch(handle: &RuntimeHandle, input: Input) {
    match input {
        Input::Click => match handle.click().await {
            Ok(outcome) => println!("{}", describe_click(&outcome)),
            Err(error) => report(&error),
        },
        Input::ClickMany(count) => click_many(handle, count).await,
        Input::Upgrade => {
            if let Err(error) = handle.purchase_upgrade().await {
                report(&error);
            }
        }
        // Reveals take the pending window; keep the prompt responsive meanwhile.
        Input::OpenCase => {
            let handle = handle.clone();
            tokio::spawn(async move {
                if let Err(error) = handle.open_case().await {
                    report(&error);
                }
            });
        }
        Input::Mutate(item) => {
            let handle = handle.clone();
            tokio::spawn(async move {
                if let Err(error) = handle.mutate(item).await {
                    report(&error);
                }
            });
        }
        Input::Promo(code) => match handle.redeem_promo(code).await {
            Ok(outcome) if outcome.already_admin => println!("Promo accepted (already admin)."),
            Ok(_) => {}
            Err(error) => report(&error),
        },
        Input::Admin(op) => {
            if let Err(error) = handle.admin(op).await {
                report(&error);
            }
        }
        Input::State => match handle.query_state().await {
            Ok(snapshot) => println!("{}", render_snapshot(&snapshot)),
            Err(error) => report(&error),
        },
        Input::StateJson => match handle.query_state().await {
            Ok(snapshot) => match serde_json::to_string_pretty(&snapshot) {
                Ok(json) => println!("{json}"),
                Err(error) => warn!(%error, "Failed to encode snapshot"),
            },
            Err(error) => report(&error),
        },
        Input::Help => println!("{HELP}"),
        Input::Quit => {}
    }
}

/// Clicks `count` times back to back, stopping once clicks stop counting.
async fn click_many(handle: &RuntimeHandle, count: u32) {
    let mut accepted = 0;
    let mut balance = None;

    for _ in 0..count {
        match handle.click().await {
            Ok(outcome) if outcome.accepted => {
                accepted += 1;
                balance = Some(outcome.balance);
            }
            Ok(outcome) => {
                println!("{}", describe_click(&outcome));
                break;
            }
            Err(error) => {
                report(&error);
                break;
            }
        }
    }

    if let Some(balance) = balance {
        println!("{accepted} click(s) counted (balance {balance})");
    }
}

fn describe_click(outcome: &ClickOutcome) -> String {
    match outcome.verdict {
        GuardVerdict::AlreadyBanned => "Click ignored: you are banned.".to_owned(),
        GuardVerdict::Banned => "Click rejected.".to_owned(),
        _ => format!("+{} (balance {})", outcome.credited, outcome.balance),
    }
}

fn report(error: &RuntimeError) {
    match error {
        RuntimeError::Economy(_) | RuntimeError::OperationInFlight { .. } => {
            debug!(%error, "Operation rejected");
            println!("{error}");
        }
        _ => {
            warn!(%error, "Session error");
            println!("Session error: {error}");
        }
    }
}

/// One task per topic: every event goes to the log, notable ones to stdout.
fn spawn_event_feeds(handle: &RuntimeHandle) -> Vec<JoinHandle<()>> {
    Topic::ALL
        .iter()
        .map(|&topic| {
            let mut rx = handle.subscribe(topic);
            tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(event) => {
                            match serde_json::to_string(&event) {
                                Ok(json) => debug!(?topic, %json, "Event"),
                                Err(error) => warn!(?topic, %error, "Failed to encode event"),
                            }
                            if let Some(text) = render_event(&event) {
                                println!("{text}");
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(?topic, skipped, "Event feed lagged");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            })
        })
        .collect()
}

fn prompt() {
    print!("> ");
    flush();
}

fn flush() {
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(verdict: GuardVerdict, accepted: bool) -> ClickOutcome {
        ClickOutcome {
            accepted,
            credited: if accepted { 3 } else { 0 },
            verdict,
            balance: 12,
        }
    }

    #[test]
    fn accepted_clicks_show_credit_and_balance() {
        assert_eq!(describe_click(&click(GuardVerdict::Clean, true)), "+3 (balance 12)");
        assert_eq!(
            describe_click(&click(
                GuardVerdict::Warning {
                    strike: 1,
                    confiscated: 0
                },
                true
            )),
            "+3 (balance 12)"
        );
    }

    #[test]
    fn banned_clicks_are_called_out() {
        assert_eq!(
            describe_click(&click(GuardVerdict::AlreadyBanned, false)),
            "Click ignored: you are banned."
        );
        assert_eq!(
            describe_click(&click(GuardVerdict::Banned, false)),
            "Click rejected."
        );
    }
}

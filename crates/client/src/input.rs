//! Line-oriented command parsing for the REPL.
//!
//! The first word picks the verb (case-insensitive); the rest is its
//! argument. Parsing is pure so it can be tested without a session.
use std::str::FromStr;

use strum::EnumString;
use thiserror::Error;

use clicker_core::ItemId;
use clicker_runtime::AdminOp;

/// A decoded REPL command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Click,
    /// Click `n` times in a row.
    ClickMany(u32),
    Upgrade,
    OpenCase,
    Mutate(ItemId),
    Promo(String),
    Admin(AdminOp),
    State,
    /// Print the session snapshot as JSON.
    StateJson,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{verb}' needs {expected}")]
    MissingArgument {
        verb: &'static str,
        expected: &'static str,
    },

    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    #[error("'{verb}' takes no argument")]
    UnexpectedArgument { verb: &'static str },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
enum Verb {
    #[strum(to_string = "click", serialize = "c")]
    Click,
    Upgrade,
    #[strum(to_string = "open", serialize = "case")]
    Open,
    Mutate,
    Promo,
    GrantCurrency,
    GrantPower,
    GrantItem,
    Reset,
    #[strum(to_string = "state", serialize = "status")]
    State,
    #[strum(to_string = "help", serialize = "?")]
    Help,
    #[strum(to_string = "quit", serialize = "logout", serialize = "exit")]
    Quit,
}

pub const HELP: &str = "\
commands:
  click [n]        click once, or n times
  upgrade          buy +1 click power
  open             open a case
  mutate <id>      spend an item's one mutation attempt
  promo <code>     redeem a promo code
  grant-currency   (admin) add currency
  grant-power      (admin) add click power
  grant-item       (admin) add a top-tier item
  reset            (admin) wipe balance, click power and inventory
  state [json]     show balance, click power and inventory
  quit | logout    end the session";

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Input>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let verb = Verb::from_str(word).map_err(|_| InputError::UnknownCommand(word.to_owned()))?;
    let name: &'static str = verb.into();

    let input = match (verb, rest) {
        (Verb::Click, "") => Input::Click,
        (Verb::Click, count) => Input::ClickMany(parse_number(count)?),
        (Verb::Mutate, "") => {
            return Err(InputError::MissingArgument {
                verb: name,
                expected: "an item id",
            });
        }
        (Verb::Mutate, id) => Input::Mutate(ItemId(parse_number(id)?)),
        (Verb::Promo, "") => {
            return Err(InputError::MissingArgument {
                verb: name,
                expected: "a code",
            });
        }
        (Verb::Promo, code) => Input::Promo(code.to_owned()),
        (Verb::State, arg) if arg.eq_ignore_ascii_case("json") => Input::StateJson,
        (_, arg) if !arg.is_empty() => return Err(InputError::UnexpectedArgument { verb: name }),
        (Verb::Upgrade, _) => Input::Upgrade,
        (Verb::Open, _) => Input::OpenCase,
        (Verb::GrantCurrency, _) => Input::Admin(AdminOp::GrantCurrency),
        (Verb::GrantPower, _) => Input::Admin(AdminOp::GrantClickPower),
        (Verb::GrantItem, _) => Input::Admin(AdminOp::GrantItem),
        (Verb::Reset, _) => Input::Admin(AdminOp::ResetProgress),
        (Verb::State, _) => Input::State,
        (Verb::Help, _) => Input::Help,
        (Verb::Quit, _) => Input::Quit,
    };

    Ok(Some(input))
}

fn parse_number<T: FromStr>(text: &str) -> Result<T, InputError> {
    text.parse()
        .map_err(|_| InputError::InvalidNumber(text.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   \t"), Ok(None));
    }

    #[test]
    fn verbs_are_case_insensitive() {
        assert_eq!(parse_line("CLICK"), Ok(Some(Input::Click)));
        assert_eq!(parse_line("Open"), Ok(Some(Input::OpenCase)));
        assert_eq!(
            parse_line("Grant-Item"),
            Ok(Some(Input::Admin(AdminOp::GrantItem)))
        );
    }

    #[test]
    fn aliases_map_to_the_same_command() {
        assert_eq!(parse_line("c"), Ok(Some(Input::Click)));
        assert_eq!(parse_line("logout"), Ok(Some(Input::Quit)));
        assert_eq!(parse_line("exit"), Ok(Some(Input::Quit)));
        assert_eq!(parse_line("case"), Ok(Some(Input::OpenCase)));
    }

    #[test]
    fn arguments_are_parsed() {
        assert_eq!(parse_line("mutate 7"), Ok(Some(Input::Mutate(ItemId(7)))));
        assert_eq!(parse_line("click 25"), Ok(Some(Input::ClickMany(25))));
        assert_eq!(
            parse_line("promo  SeTuP "),
            Ok(Some(Input::Promo("SeTuP".into())))
        );
        assert_eq!(parse_line("state json"), Ok(Some(Input::StateJson)));
    }

    #[test]
    fn malformed_lines_are_reported() {
        assert_eq!(
            parse_line("dance"),
            Err(InputError::UnknownCommand("dance".into()))
        );
        assert!(matches!(
            parse_line("mutate"),
            Err(InputError::MissingArgument { verb: "mutate", .. })
        ));
        assert_eq!(
            parse_line("mutate seven"),
            Err(InputError::InvalidNumber("seven".into()))
        );
        assert_eq!(
            parse_line("upgrade twice"),
            Err(InputError::UnexpectedArgument { verb: "upgrade" })
        );
    }
}

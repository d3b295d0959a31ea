//! Interactive shell commands.

use anyhow::{bail, Result};
use reclaim_app::workflows::session::sync_account;
use reclaim_app::workflows::{RevealGate, WriteCoordinator};
use reclaim_app::{AppError, LedgerEntry, SharedApp};
use reclaim_testkit::MockChain;
use std::str::FromStr;

/// Help text printed by `help`
pub const HELP: &str = "\
Commands:
  reveal                 sign and show the numbers list
  name <text>            set the name field
  number <text>          set the number field
  add                    submit the form
  add <name> <number>    submit an entry directly
  show                   print the current state
  connect <addr>         switch the wallet account
  disconnect             disconnect the wallet
  help                   show this message
  quit                   exit";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Request a reveal
    Reveal,
    /// Edit the name field
    Name(String),
    /// Edit the number field
    Number(String),
    /// Submit the form contents
    AddForm,
    /// Submit an explicit entry
    Add(LedgerEntry),
    /// Print state only
    Show,
    /// Connect `address`
    Connect(String),
    /// Disconnect the wallet
    Disconnect,
    /// Print help
    Help,
    /// Leave the shell
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match (word, rest) {
            ("reveal", "") => Self::Reveal,
            ("name", text) => Self::Name(text.to_string()),
            ("number", text) => Self::Number(text.to_string()),
            ("add", "") => Self::AddForm,
            ("add", args) => match args.rsplit_once(char::is_whitespace) {
                Some((name, number)) => Self::Add(LedgerEntry::new(name.trim(), number)),
                None => bail!("usage: add <name> <number>"),
            },
            ("show", "") => Self::Show,
            ("connect", "") => bail!("usage: connect <addr>"),
            ("connect", address) => Self::Connect(address.to_string()),
            ("disconnect", "") => Self::Disconnect,
            ("help", _) => Self::Help,
            ("quit" | "exit", "") => Self::Quit,
            (word, _) => bail!("unknown command `{word}`; try `help`"),
        };
        Ok(command)
    }
}

/// Run `command` against the app.
///
/// Workflow errors are returned for display; the shell keeps running.
pub async fn execute(
    app: &SharedApp,
    chain: &MockChain,
    command: Command,
) -> Result<Option<String>, AppError> {
    match command {
        Command::Reveal => RevealGate::request_reveal(app).await.map(|()| None),
        Command::Name(name) => WriteCoordinator::set_name(app, name).await.map(|()| None),
        Command::Number(value) => WriteCoordinator::set_value(app, value).await.map(|()| None),
        Command::AddForm => WriteCoordinator::submit_form(app)
            .await
            .map(|tx| Some(format!("confirmed {tx}"))),
        Command::Add(entry) => WriteCoordinator::submit(app, entry)
            .await
            .map(|tx| Some(format!("confirmed {tx}"))),
        Command::Connect(address) => {
            chain.connect(&address);
            sync_account(app).await.map(|_| None)
        }
        Command::Disconnect => {
            chain.disconnect();
            sync_account(app).await.map(|_| None)
        }
        Command::Show | Command::Help | Command::Quit => Ok(None),
    }
}

//! Interactive menu loop
//!
//! The shell owns the account registry for the whole session. It is generic
//! over its input and output so tests can drive it with scripted text.

use cashdesk_core::{Account, AccountKind, AccountNumber, AccountRegistry, AccountType};
use cashdesk_persistence::AccountStore;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};

use crate::config::ShellConfig;
use crate::render;

/// Operation chosen in the manage-account menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Deposit(Decimal),
    Withdraw(Decimal),
    ApplyInterest,
    SetCreditLimit(Decimal),
}

/// Interactive console session
pub struct Shell<R, W> {
    input: R,
    output: W,
    registry: AccountRegistry,
    store: AccountStore,
    /// Changes made since the last successful save
    dirty: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Create a shell over an already loaded registry
    pub fn new(input: R, output: W, store: AccountStore, registry: AccountRegistry) -> Self {
        Self {
            input,
            output,
            registry,
            store,
            dirty: false,
        }
    }

    /// Load accounts from the configured file and create the shell.
    ///
    /// A failed load is reported to the operator and the session starts
    /// with an empty registry.
    pub fn open(input: R, mut output: W, config: &ShellConfig) -> io::Result<Self> {
        let store = AccountStore::new(&config.data_file);
        let report = store.load();

        if let Some(error) = &report.error {
            writeln!(
                output,
                "Failed to load accounts: {}. Starting with an empty list.",
                error
            )?;
        } else if !report.registry.is_empty() {
            writeln!(
                output,
                "Loaded {} account(s) from {}.",
                report.registry.len(),
                store.path().display()
            )?;
        }

        Ok(Self::new(input, output, store, report.registry))
    }

    pub fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the main menu until the operator exits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Main menu:")?;
            writeln!(self.output, "1. Create account")?;
            writeln!(self.output, "2. Manage account")?;
            writeln!(self.output, "3. List accounts")?;
            writeln!(self.output, "4. Save & manage accounts")?;
            writeln!(self.output, "5. Exit")?;

            let Some(choice) = self.prompt("> ")? else {
                tracing::debug!("Input closed, leaving shell");
                return Ok(());
            };

            match choice.as_str() {
                "1" => self.create_account()?,
                "2" => self.manage_account()?,
                "3" => self.list_accounts()?,
                "4" => self.save_menu()?,
                "5" => {
                    if self.confirm_exit()? {
                        return Ok(());
                    }
                }
                _ => writeln!(self.output, "Invalid choice.")?,
            }
        }
    }

    fn create_account(&mut self) -> io::Result<()> {
        writeln!(self.output, "Choose account type:")?;
        writeln!(self.output, "1. {}", AccountType::Basic)?;
        writeln!(self.output, "2. {}", AccountType::Savings)?;
        writeln!(self.output, "3. {}", AccountType::Checking)?;

        let Some(choice) = self.prompt("> ")? else {
            return Ok(());
        };
        let account_type = match choice.as_str() {
            "1" => AccountType::Basic,
            "2" => AccountType::Savings,
            "3" => AccountType::Checking,
            _ => return writeln!(self.output, "Invalid choice."),
        };

        let Some(raw_number) = self.prompt("Enter account number (e.g. 123456789): ")? else {
            return Ok(());
        };
        let number = match AccountNumber::parse(&raw_number) {
            Ok(number) => number,
            Err(e) => return writeln!(self.output, "{}", e),
        };
        if self.registry.contains(number.as_str()) {
            return writeln!(self.output, "Account {} already exists.", number);
        }

        let Some(balance) = self.read_amount("Enter initial balance: ")? else {
            return Ok(());
        };
        let kind = match account_type {
            AccountType::Basic => AccountKind::Basic,
            AccountType::Savings => {
                let Some(interest_rate) = self.read_amount("Enter interest rate (%): ")? else {
                    return Ok(());
                };
                AccountKind::Savings { interest_rate }
            }
            AccountType::Checking => {
                let Some(credit_limit) = self.read_amount("Enter credit limit: ")? else {
                    return Ok(());
                };
                AccountKind::Checking { credit_limit }
            }
        };

        let created = Account::new(number.as_str(), balance, kind).and_then(|account| {
            let line = format!("Account created. {}", account);
            self.registry.add(account).map(|_| line)
        });

        match created {
            Ok(line) => {
                self.dirty = true;
                writeln!(self.output, "{}", line)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Account creation rejected");
                writeln!(self.output, "Could not create account: {}", e)
            }
        }
    }

    fn manage_account(&mut self) -> io::Result<()> {
        let Some(number) = self.prompt("Enter account number: ")? else {
            return Ok(());
        };
        let Some(account_type) = self.registry.find(&number).map(Account::account_type) else {
            return writeln!(self.output, "Account not found.");
        };

        writeln!(self.output, "Account actions:")?;
        writeln!(self.output, "1. Deposit")?;
        writeln!(self.output, "2. Withdraw")?;
        if account_type == AccountType::Savings {
            writeln!(self.output, "3. Apply interest")?;
        }
        if account_type == AccountType::Checking {
            writeln!(self.output, "4. Set credit limit")?;
        }

        let Some(choice) = self.prompt("> ")? else {
            return Ok(());
        };
        let action = match (choice.as_str(), account_type) {
            ("1", _) => self.read_amount("Enter deposit amount: ")?.map(Action::Deposit),
            ("2", _) => self.read_amount("Enter withdrawal amount: ")?.map(Action::Withdraw),
            ("3", AccountType::Savings) => Some(Action::ApplyInterest),
            ("4", AccountType::Checking) => self
                .read_amount("Enter new credit limit: ")?
                .map(Action::SetCreditLimit),
            _ => return writeln!(self.output, "Invalid choice."),
        };

        match action {
            Some(action) => self.apply(&number, action),
            None => Ok(()),
        }
    }

    fn apply(&mut self, number: &str, action: Action) -> io::Result<()> {
        let account = match self.registry.get_mut(number) {
            Ok(account) => account,
            Err(e) => return writeln!(self.output, "{}", e),
        };

        let result = match action {
            Action::Deposit(amount) => Ok(account.deposit(amount)),
            Action::Withdraw(amount) => Ok(account.withdraw(amount)),
            Action::ApplyInterest => account.apply_interest(),
            Action::SetCreditLimit(limit) => {
                return match account.set_credit_limit(limit) {
                    Ok(()) => {
                        self.dirty = true;
                        writeln!(self.output, "Credit limit set: {}.", render::amount(limit))
                    }
                    Err(e) => writeln!(self.output, "{}", e),
                };
            }
        };

        let lines = match result {
            Ok(outcome) => {
                if outcome.changed_state() {
                    self.dirty = true;
                }
                render::outcome(&outcome)
            }
            Err(e) => vec![e.to_string()],
        };

        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    fn list_accounts(&mut self) -> io::Result<()> {
        if self.registry.is_empty() {
            return writeln!(self.output, "No accounts available.");
        }
        for account in &self.registry {
            writeln!(self.output, "{}", account)?;
        }
        Ok(())
    }

    fn save_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "Save & manage accounts:")?;
        writeln!(self.output, "1. Save accounts")?;
        writeln!(self.output, "2. Remove account")?;

        let Some(choice) = self.prompt("> ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => self.save().map(|_| ()),
            "2" => {
                let Some(number) = self.prompt("Enter account number to remove: ")? else {
                    return Ok(());
                };
                match self.registry.remove(&number) {
                    Some(account) => {
                        self.dirty = true;
                        writeln!(self.output, "Account {} removed.", account.number())
                    }
                    None => writeln!(self.output, "Account not found."),
                }
            }
            _ => writeln!(self.output, "Invalid choice."),
        }
    }

    /// Write the registry to the account file; returns whether it succeeded
    fn save(&mut self) -> io::Result<bool> {
        match self.store.save(&self.registry) {
            Ok(()) => {
                self.dirty = false;
                writeln!(
                    self.output,
                    "Accounts saved to {}.",
                    self.store.path().display()
                )?;
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save accounts");
                writeln!(self.output, "Failed to save accounts: {}", e)?;
                Ok(false)
            }
        }
    }

    fn confirm_exit(&mut self) -> io::Result<bool> {
        if !self.dirty {
            return Ok(true);
        }

        let answer = self.prompt(
            "Accounts are not saved. Exit anyway? (y = exit, s = save and exit, n = stay): ",
        )?;
        match answer.map(|a| a.to_lowercase()).as_deref() {
            None | Some("y") | Some("yes") => Ok(true),
            Some("s") => self.save(),
            _ => Ok(false),
        }
    }

    /// Prompt and parse a decimal; malformed input is reported and yields `None`
    fn read_amount(&mut self, text: &str) -> io::Result<Option<Decimal>> {
        let Some(raw) = self.prompt(text)? else {
            return Ok(None);
        };
        match raw.parse::<Decimal>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                writeln!(self.output, "Invalid number: {:?}", raw)?;
                Ok(None)
            }
        }
    }

    /// Print `text` and read one trimmed line; `None` at end of input
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

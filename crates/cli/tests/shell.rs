//! Integration tests for the interactive shell
//!
//! These tests drive the menu with scripted input and check both the
//! operator-visible output and the account file on disk.

use cashdesk_cli::{Shell, ShellConfig};
use cashdesk_core::{Account, AccountRegistry};
use cashdesk_persistence::AccountStore;
use rust_decimal_macros::dec;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn data_file(dir: &TempDir) -> PathBuf {
    dir.path().join("accounts.json")
}

/// Run a whole session over `script`, returning the shell and its output
fn run_session(path: &Path, script: &str) -> (AccountRegistry, bool, String) {
    let config = ShellConfig::new(path);
    let mut shell = Shell::open(script.as_bytes(), Vec::new(), &config).unwrap();
    shell.run().unwrap();

    let registry = shell.registry().clone();
    let dirty = shell.is_dirty();
    let output = String::from_utf8(shell.into_output()).unwrap();
    (registry, dirty, output)
}

/// Test: create → deposit → withdraw → list → save → exit
#[test]
fn test_full_session_saves_accounts() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);

    let script = "\
1\n1\n123456789\n100\n\
2\n123-456-789\n1\n50\n\
2\n123456789\n2\n30\n\
3\n\
4\n1\n\
5\n";
    let (registry, dirty, output) = run_session(&path, script);

    let account = registry.find("123-456-789").unwrap();
    assert_eq!(account.balance(), dec!(120));
    assert_eq!(account.cash_on_hand(), dec!(30));
    assert!(!dirty);

    assert!(output.contains("Account created. Type: Basic account, Number: 123-456-789"));
    assert!(output.contains("Deposited 50: cash used 0, external funds added 50."));
    assert!(output.contains("Withdrew 30."));
    assert!(output.contains(
        "Type: Basic account, Number: 123-456-789, Balance: 120, Cash on hand: 30"
    ));
    assert!(output.contains("Accounts saved to"));

    let reloaded = AccountStore::new(&path).try_load().unwrap();
    assert_eq!(reloaded, registry);
}

/// Test: accounts saved in one session are loaded by the next
#[test]
fn test_next_session_loads_saved_accounts() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);

    let mut registry = AccountRegistry::new();
    registry
        .add(Account::savings("1", dec!(1000), dec!(5)).unwrap())
        .unwrap();
    registry
        .add(Account::checking("2", dec!(0), dec!(200)).unwrap())
        .unwrap();
    AccountStore::new(&path).save(&registry).unwrap();

    let (loaded, _, output) = run_session(&path, "3\n5\n");
    assert_eq!(loaded, registry);
    assert!(output.contains("Loaded 2 account(s)"));
    assert!(output.contains("Number: 000-000-001"));
    assert!(output.contains("Interest rate: 5%"));
    assert!(output.contains("Credit limit: 200"));
}

#[test]
fn test_corrupt_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);
    fs::write(&path, "{ not json").unwrap();

    let (registry, _, output) = run_session(&path, "3\n5\n");
    assert!(registry.is_empty());
    assert!(output.contains("Failed to load accounts:"));
    assert!(output.contains("Starting with an empty list."));
    assert!(output.contains("No accounts available."));
}

#[test]
fn test_exit_prompt_when_unsaved() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);

    // First answer "n" stays in the shell, second answer "y" leaves
    let script = "1\n1\n7\n10\n5\nn\n3\n5\ny\n";
    let (registry, dirty, output) = run_session(&path, script);

    assert_eq!(registry.len(), 1);
    assert!(dirty);
    assert_eq!(output.matches("Accounts are not saved.").count(), 2);
    assert!(output.contains("Number: 000-000-007"));
    assert!(!path.exists());
}

#[test]
fn test_exit_with_save() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);

    let (registry, dirty, _) = run_session(&path, "1\n3\n42\n0\n200\n5\ns\n");

    assert!(!dirty);
    let reloaded = AccountStore::new(&path).try_load().unwrap();
    assert_eq!(reloaded, registry);
    assert_eq!(reloaded.find("42").unwrap().credit_limit(), Some(dec!(200)));
}

#[test]
fn test_end_of_input_exits() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);

    // Input ends in the middle of account creation
    let (registry, dirty, _) = run_session(&path, "1\n2\n55\n");
    assert!(registry.is_empty());
    assert!(!dirty);
}

#[test]
fn test_invalid_input_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);

    let script = "\
9\n\
1\n4\n\
1\n1\nabc\n\
1\n1\n5\nlots\n\
1\n1\n5\n-10\n\
2\n404\n\
5\n";
    let (registry, dirty, output) = run_session(&path, script);

    assert!(registry.is_empty());
    assert!(!dirty);
    assert_eq!(output.matches("Invalid choice.").count(), 2);
    assert!(output.contains("Invalid account number: \"abc\""));
    assert!(output.contains("Invalid number: \"lots\""));
    assert!(output.contains("Could not create account: Invalid argument: initial balance cannot be negative"));
    assert!(output.contains("Account not found."));
}

#[test]
fn test_duplicate_account_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);

    let script = "1\n1\n5\n10\n1\n2\n000-000-005\n5\ny\n";
    let (registry, _, output) = run_session(&path, script);

    assert_eq!(registry.len(), 1);
    assert!(output.contains("Account 000-000-005 already exists."));
}

#[test]
fn test_checking_credit_limit_flow() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);

    let script = "\
1\n3\n1\n0\n200\n\
2\n1\n2\n150\n\
2\n1\n2\n60\n\
2\n1\n4\n300\n\
2\n1\n2\n60\n\
2\n1\n3\n\
5\ny\n";
    let (registry, _, output) = run_session(&path, script);

    let account = registry.find("1").unwrap();
    assert_eq!(account.balance(), dec!(-210));
    assert_eq!(account.cash_on_hand(), dec!(210));
    assert_eq!(account.credit_limit(), Some(dec!(300)));

    assert!(output.contains(
        "Credit limit exceeded: requested 60, available 50. Operation cancelled."
    ));
    assert!(output.contains("Credit limit set: 300."));
    // "3" is not offered for checking accounts
    assert!(output.contains("Invalid choice."));
}

#[test]
fn test_savings_interest_flow() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);

    let script = "\
1\n2\n8\n1000\n5\n\
2\n8\n1\n100\n\
2\n8\n3\n\
5\ny\n";
    let (registry, _, output) = run_session(&path, script);

    // 1100 * 1.05 = 1155, then 1155 * 1.05 = 1212.75
    assert_eq!(registry.find("8").unwrap().balance(), dec!(1212.75));
    assert!(output.contains("Interest accrued: 55."));
    assert!(output.contains("Interest accrued: 57.75."));
}

#[test]
fn test_remove_account() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);

    let script = "1\n1\n1\n0\n1\n1\n2\n0\n4\n2\n1\n4\n2\n1\n3\n5\ny\n";
    let (registry, _, output) = run_session(&path, script);

    assert_eq!(registry.len(), 1);
    assert!(registry.find("2").is_some());
    assert!(output.contains("Account 000-000-001 removed."));
    assert!(output.contains("Account not found."));
}

#[test]
fn test_failed_save_keeps_shell_open() {
    let dir = TempDir::new().unwrap();
    // The data file path is a directory, so every save fails
    let path = dir.path().to_path_buf();

    let (registry, dirty, output) = run_session(&path, "1\n1\n3\n10\n5\ns\n5\ny\n");

    assert_eq!(registry.len(), 1);
    assert!(dirty);
    assert!(output.contains("Failed to save accounts:"));
    assert_eq!(output.matches("Accounts are not saved.").count(), 2);
}

#[test]
fn test_overflowing_amounts_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = data_file(&dir);

    let script = "\
1\n1\n1\n79228162514264337593543950335\n\
2\n1\n1\n1\n\
1\n2\n2\n1000000000000000000000\n100000000000000000000\n\
2\n2\n3\n\
5\ny\n";
    let (registry, _, output) = run_session(&path, script);

    assert_eq!(registry.find("1").unwrap().balance(), rust_decimal::Decimal::MAX);
    assert_eq!(
        registry.find("2").unwrap().balance(),
        dec!(1000000000000000000000)
    );
    assert!(output.contains("Amount 1 is too large for this account. Operation cancelled."));
    assert!(output.contains("is too large for this account. No interest accrued."));
}

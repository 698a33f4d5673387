//! JSON Account Store - lưu/đọc toàn bộ registry vào một file
//!
//! File chỉ được mở khi load (lúc khởi động) và khi save, không giữ mở
//! giữa các thao tác.

use crate::error::{PersistenceError, PersistenceResult};
use crate::record::{AccountFile, AccountRecord, FILE_VERSION};
use cashdesk_core::{Account, AccountRegistry};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Kết quả của [`AccountStore::load`].
///
/// Load không bao giờ thất bại: nếu file hỏng, `registry` rỗng và `error`
/// chứa lý do để báo cho người dùng.
#[derive(Debug)]
pub struct LoadReport {
    pub registry: AccountRegistry,
    pub error: Option<PersistenceError>,
}

/// Account Store - ghi registry vào file JSON.
#[derive(Debug, Clone)]
pub struct AccountStore {
    /// Đường dẫn file (e.g., "data/accounts.json")
    path: PathBuf,
}

impl AccountStore {
    /// Tạo AccountStore mới. Không chạm vào filesystem.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Lấy đường dẫn file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ghi toàn bộ registry vào file (ghi đè).
    pub fn save(&self, registry: &AccountRegistry) -> PersistenceResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let document = AccountFile::new(registry.iter().map(AccountRecord::from).collect());

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &document)?;
        writeln!(writer)?;
        writer.flush()?;

        tracing::info!(
            path = %self.path.display(),
            accounts = registry.len(),
            "Accounts saved"
        );
        Ok(())
    }

    /// Đọc registry từ file.
    ///
    /// - File không tồn tại: registry rỗng
    /// - File hỏng / sai version / trùng số tài khoản: lỗi
    pub fn try_load(&self) -> PersistenceResult<AccountRegistry> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No account file, starting empty");
                return Ok(AccountRegistry::new());
            }
            Err(e) => return Err(e.into()),
        };

        let document: AccountFile = serde_json::from_reader(BufReader::new(file))?;
        if document.version != FILE_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: document.version,
                expected: FILE_VERSION,
            });
        }

        let accounts = document
            .accounts
            .into_iter()
            .map(AccountRecord::into_account)
            .collect::<Result<Vec<Account>, _>>()
            .map_err(|source| self.corrupt(source))?;
        let registry =
            AccountRegistry::from_accounts(accounts).map_err(|source| self.corrupt(source))?;

        tracing::info!(
            path = %self.path.display(),
            accounts = registry.len(),
            "Accounts loaded"
        );
        Ok(registry)
    }

    /// Đọc registry, thay bằng registry rỗng nếu thất bại.
    pub fn load(&self) -> LoadReport {
        match self.try_load() {
            Ok(registry) => LoadReport {
                registry,
                error: None,
            },
            Err(error) => {
                let reason = if error.is_corrupt() { "corrupt" } else { "unreadable" };
                tracing::warn!(
                    path = %self.path.display(),
                    reason,
                    %error,
                    "Failed to load accounts, starting with an empty list"
                );
                LoadReport {
                    registry: AccountRegistry::new(),
                    error: Some(error),
                }
            }
        }
    }

    fn corrupt(&self, source: cashdesk_core::CoreError) -> PersistenceError {
        PersistenceError::Corrupt {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn mixed_registry() -> AccountRegistry {
        let mut registry = AccountRegistry::new();

        let mut basic = Account::basic("111", dec!(100)).unwrap();
        basic.withdraw(dec!(30));
        registry.add(basic).unwrap();

        registry
            .add(Account::savings("222-333", dec!(1000), dec!(2.5)).unwrap())
            .unwrap();

        let mut checking = Account::checking("999999999", dec!(0), dec!(200)).unwrap();
        checking.withdraw(dec!(150));
        registry.add(checking).unwrap();

        registry
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = AccountStore::new(dir.path().join("accounts.json"));
        let registry = mixed_registry();

        store.save(&registry).unwrap();
        let loaded = store.try_load().unwrap();

        assert_eq!(loaded, registry);
        let types: Vec<&str> = loaded.iter().map(|a| a.account_type().as_str()).collect();
        assert_eq!(types, vec!["basic", "savings", "checking"]);
        assert_eq!(loaded.find("999-999-999").unwrap().balance(), dec!(-150));
        assert_eq!(loaded.find("111").unwrap().cash_on_hand(), dec!(30));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = AccountStore::new(dir.path().join("missing.json"));

        assert!(!store.path().exists());
        let report = store.load();
        assert!(report.registry.is_empty());
        assert!(report.error.is_none());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = AccountStore::new(dir.path().join("nested/data/accounts.json"));

        store.save(&AccountRegistry::new()).unwrap();
        assert!(store.path().exists());
        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let dir = tempdir().unwrap();
        let store = AccountStore::new(dir.path().join("accounts.json"));

        store.save(&mixed_registry()).unwrap();
        let mut smaller = mixed_registry();
        smaller.remove("111");
        store.save(&smaller).unwrap();

        assert_eq!(store.try_load().unwrap().len(), 2);
    }

    #[test]
    fn test_load_garbage_reports_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        fs::write(&path, "<ArrayOfBankAccount/>").unwrap();

        let report = AccountStore::new(&path).load();
        assert!(report.registry.is_empty());
        assert!(matches!(
            report.error,
            Some(PersistenceError::Serialization(_))
        ));
    }

    #[test]
    fn test_load_unsupported_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        fs::write(&path, r#"{"version": 99, "accounts": []}"#).unwrap();

        let err = AccountStore::new(&path).try_load().unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::UnsupportedVersion { found: 99, expected: 1 }
        ));
    }

    #[test]
    fn test_load_duplicate_numbers_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        fs::write(
            &path,
            r#"{
                "version": 1,
                "accounts": [
                    {"kind": "basic", "number": "1", "balance": "0", "cash_on_hand": "0"},
                    {"kind": "basic", "number": "000-000-001", "balance": "5", "cash_on_hand": "0"}
                ]
            }"#,
        )
        .unwrap();

        let report = AccountStore::new(&path).load();
        assert!(report.registry.is_empty());
        let err = report.error.unwrap();
        assert!(err.is_corrupt());
        assert!(err.to_string().contains("000-000-001"));
    }

    #[test]
    fn test_save_to_directory_path_fails() {
        let dir = tempdir().unwrap();
        let store = AccountStore::new(dir.path());

        let err = store.save(&mixed_registry()).unwrap_err();
        assert!(matches!(err, PersistenceError::Io(_)));
    }
}

//! Concurrent chart-of-accounts registry.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use printfarm_core::accounts::{AccountCode, AccountError, GlAccount, default_chart};

/// The account registry.
///
/// Read-mostly: lookups happen on every posting, mutations only during
/// administrative setup. Accounts are immutable once registered except for
/// renames; removal is guarded by the ledger (an account referenced by any
/// journal line stays).
#[derive(Debug, Default)]
pub struct AccountRegistry {
    accounts: DashMap<AccountCode, GlAccount>,
}

impl AccountRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry seeded with the default print-farm chart.
    #[must_use]
    pub fn with_default_chart() -> Self {
        let registry = Self::new();
        for account in default_chart() {
            registry
                .insert(account.clone())
                .expect("seed chart has unique codes");
        }
        registry
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::DuplicateCode` if the code is taken.
    pub fn insert(&self, account: GlAccount) -> Result<(), AccountError> {
        match self.accounts.entry(account.code) {
            Entry::Occupied(_) => Err(AccountError::DuplicateCode(account.code)),
            Entry::Vacant(slot) => {
                slot.insert(account);
                Ok(())
            }
        }
    }

    /// Renames an account. Code and type are immutable.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Unknown` if no account has this code.
    pub fn rename(
        &self,
        code: AccountCode,
        new_name: impl Into<String>,
    ) -> Result<GlAccount, AccountError> {
        let mut account = self
            .accounts
            .get_mut(&code)
            .ok_or(AccountError::Unknown(code))?;
        account.name = new_name.into();
        Ok(account.clone())
    }

    /// Removes an account. The ledger checks for references first.
    pub(crate) fn remove(&self, code: AccountCode) -> Result<GlAccount, AccountError> {
        self.accounts
            .remove(&code)
            .map(|(_, account)| account)
            .ok_or(AccountError::Unknown(code))
    }

    /// Returns a copy of the account with this code.
    #[must_use]
    pub fn get(&self, code: AccountCode) -> Option<GlAccount> {
        self.accounts.get(&code).map(|a| a.value().clone())
    }

    /// Returns true if an account with this code exists.
    #[must_use]
    pub fn contains(&self, code: AccountCode) -> bool {
        self.accounts.contains_key(&code)
    }

    /// Returns all accounts, sorted by code.
    #[must_use]
    pub fn all(&self) -> Vec<GlAccount> {
        let mut accounts: Vec<GlAccount> =
            self.accounts.iter().map(|a| a.value().clone()).collect();
        accounts.sort_by_key(|a| a.code);
        accounts
    }

    /// Returns the number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if no accounts are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printfarm_core::accounts::AccountType;

    fn account(code: u16, name: &str, account_type: AccountType) -> GlAccount {
        GlAccount::new(AccountCode::new(code).unwrap(), name, account_type).unwrap()
    }

    #[test]
    fn test_default_chart_is_seeded() {
        let registry = AccountRegistry::with_default_chart();
        assert_eq!(registry.len(), default_chart().len());
        assert!(registry.contains(AccountCode::new(1200).unwrap()));
        assert!(registry.contains(AccountCode::new(5020).unwrap()));
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let registry = AccountRegistry::new();
        registry
            .insert(account(1300, "Prepaid Filament", AccountType::Asset))
            .unwrap();
        let err = registry
            .insert(account(1300, "Something Else", AccountType::Asset))
            .unwrap_err();
        assert!(matches!(err, AccountError::DuplicateCode(_)));
    }

    #[test]
    fn test_rename_keeps_code_and_type() {
        let registry = AccountRegistry::with_default_chart();
        let code = AccountCode::new(1200).unwrap();

        let renamed = registry.rename(code, "Filament Stock").unwrap();

        assert_eq!(renamed.name, "Filament Stock");
        assert_eq!(renamed.code, code);
        assert_eq!(renamed.account_type, AccountType::Asset);
        assert_eq!(registry.get(code).unwrap().name, "Filament Stock");
    }

    #[test]
    fn test_rename_unknown_account() {
        let registry = AccountRegistry::new();
        let err = registry
            .rename(AccountCode::new(1999).unwrap(), "Ghost")
            .unwrap_err();
        assert!(matches!(err, AccountError::Unknown(_)));
    }

    #[test]
    fn test_all_is_sorted_by_code() {
        let registry = AccountRegistry::with_default_chart();
        let all = registry.all();
        for pair in all.windows(2) {
            assert!(pair[0].code < pair[1].code);
        }
    }
}

//! Account classification stage.
//!
//! Walks the chart of accounts and corrects every recorded type that
//! disagrees with the name table, one account at a time.

use tracing::info;

use aurum_core::taxonomy::{self, AccountType};
use aurum_db::documents::AccountDoc;
use aurum_db::error::StoreError;
use aurum_db::repositories::AccountRepository;

/// One pending type correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCorrection {
    /// Account to correct.
    pub account_id: String,
    /// Account name, for the log line.
    pub name: String,
    /// Type string currently recorded.
    pub recorded: String,
    /// Canonical type to write.
    pub corrected: AccountType,
}

/// Resolves every account against the name table and returns the
/// corrections that need writing, in input order.
#[must_use]
pub fn plan_corrections(accounts: &[AccountDoc]) -> Vec<TypeCorrection> {
    accounts
        .iter()
        .filter_map(|account| {
            let resolution = taxonomy::resolve(&account.name, &account.account_type);
            resolution.correction().map(|corrected| TypeCorrection {
                account_id: account.id.clone(),
                name: account.name.clone(),
                recorded: account.account_type.clone(),
                corrected,
            })
        })
        .collect()
}

/// Corrects recorded account types across the chart of accounts.
///
/// Returns the number of corrections written.
///
/// # Errors
///
/// Returns an error if the account listing or a type write fails.
pub async fn classify_accounts(accounts: &AccountRepository) -> Result<u64, StoreError> {
    let active = accounts.list_active().await?;
    let corrections = plan_corrections(&active);

    for correction in &corrections {
        accounts
            .set_account_type(&correction.account_id, correction.corrected)
            .await?;
        info!(
            name = %correction.name,
            from = %correction.recorded,
            to = %correction.corrected,
            "corrected account type"
        );
    }

    info!(
        accounts = active.len(),
        corrections = corrections.len(),
        "account classification complete"
    );
    Ok(u64::try_from(corrections.len()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, name: &str, account_type: &str) -> AccountDoc {
        AccountDoc {
            object_id: None,
            id: id.to_string(),
            name: name.to_string(),
            account_type: account_type.to_string(),
            opening_balance: rust_decimal::Decimal::ZERO,
            current_balance: rust_decimal::Decimal::ZERO,
            created_at: None,
            created_by: None,
            is_deleted: false,
        }
    }

    #[test]
    fn test_plan_skips_agreeing_accounts() {
        let accounts = vec![
            account("a1", "Cash", "asset"),
            account("a2", "Sales Income", "income"),
        ];
        assert!(plan_corrections(&accounts).is_empty());
    }

    #[test]
    fn test_plan_corrects_wrong_and_junk_types() {
        let accounts = vec![
            account("a1", "Rent Expense", "asset"),
            account("a2", "Cash", "checking"),
            account("a3", "Misc Adjustments", "equity"),
            account("a4", "Misc Adjustments", "junk"),
        ];
        let plan = plan_corrections(&accounts);

        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].account_id, "a1");
        assert_eq!(plan[0].corrected, AccountType::Expense);
        assert_eq!(plan[1].account_id, "a2");
        assert_eq!(plan[1].corrected, AccountType::Asset);
        // No name match, junk type: falls back to asset.
        assert_eq!(plan[2].account_id, "a4");
        assert_eq!(plan[2].corrected, AccountType::Asset);
    }

    #[test]
    fn test_plan_is_idempotent() {
        let mut accounts = vec![
            account("a1", "Rent Expense", "asset"),
            account("a2", "Downtown Bank Branch", ""),
            account("a3", "Misc Adjustments", "weird"),
        ];
        let plan = plan_corrections(&accounts);
        assert_eq!(plan.len(), 3);

        // Apply the plan, then resolve again: nothing left to fix.
        for correction in &plan {
            let target = accounts
                .iter_mut()
                .find(|a| a.id == correction.account_id)
                .unwrap();
            target.account_type = correction.corrected.as_str().to_string();
        }
        assert!(plan_corrections(&accounts).is_empty());
    }
}

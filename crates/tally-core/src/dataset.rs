//! Transaction dataset files
//!
//! A dataset is a JSON array of already-normalized transactions. Loading
//! validates the invariants the insight engine relies on, so bad records are
//! rejected here rather than producing odd numbers later.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::Transaction;

/// Load and validate a dataset file
pub fn load(path: &Path) -> Result<Vec<Transaction>> {
    if !path.exists() {
        return Err(Error::NotFound(format!(
            "Dataset file {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path)?;
    let transactions = parse(&content)?;

    info!(
        path = %path.display(),
        count = transactions.len(),
        "Loaded transactions"
    );
    Ok(transactions)
}

/// Parse and validate dataset JSON
pub fn parse(content: &str) -> Result<Vec<Transaction>> {
    let transactions: Vec<Transaction> = serde_json::from_str(content)?;
    validate(&transactions)?;
    Ok(transactions)
}

/// Check every record has a usable amount
pub fn validate(transactions: &[Transaction]) -> Result<()> {
    for tx in transactions {
        if !tx.amount.is_finite() || tx.amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Transaction {} has invalid amount {} (amounts must be non-negative)",
                tx.id, tx.amount
            )));
        }
    }
    Ok(())
}

/// Write a dataset as pretty JSON, creating parent directories
pub fn save(path: &Path, transactions: &[Transaction]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(transactions)?;
    fs::write(path, json)?;

    debug!(path = %path.display(), count = transactions.len(), "Saved transactions");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::test_utils::{expense, income};
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("transactions.json");

        let txs = vec![
            income(2500.0),
            expense(12.5, Category::Food).with_description("Bagels"),
        ];
        save(&path, &txs).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, txs);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_rejects_negative_amount() {
        let json = r#"[{
            "id": "neg-1",
            "accountId": "acc",
            "amount": -20.0,
            "description": "Coffee",
            "category": "food",
            "date": "2026-06-01T08:00:00",
            "type": "expense"
        }]"#;

        let err = parse(json).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert!(err.to_string().contains("neg-1"));
    }

    #[test]
    fn test_rejects_unknown_category() {
        let json = r#"[{
            "id": "x",
            "accountId": "acc",
            "amount": 20.0,
            "description": "Coffee",
            "category": "groceries",
            "date": "2026-06-01T08:00:00",
            "type": "expense"
        }]"#;

        assert!(matches!(parse(json), Err(Error::Json(_))));
    }
}

//! Transactions and a line-oriented loader for them.
//!
//! One line is one transaction; its position (0-based) is its transaction id.
//! Blank lines are kept as empty transactions so ids stay aligned with lines.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{MiningError, Result};

pub type Item = usize;

/// Item ids of one transaction, in file order.
pub type Transaction = Vec<Item>;

/// What to do with a field that is not an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// Abort loading with [`MiningError::Parse`].
    #[default]
    Strict,
    /// Drop the field, log it, keep the rest of the line.
    SkipMalformed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// Any run of whitespace.
    #[default]
    Whitespace,
    Char(char),
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    transactions: Vec<Transaction>,
    max_item: Option<Item>,
}

impl Dataset {
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let max_item = transactions.iter().flatten().copied().max();
        Self {
            transactions,
            max_item,
        }
    }

    pub fn open(path: impl AsRef<Path>, delimiter: Delimiter, policy: ParsePolicy) -> Result<Self> {
        let path = path.as_ref();
        let io_err = |source| MiningError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_err)?;
        let dataset = Self::read(BufReader::new(file), delimiter, policy).map_err(|e| match e {
            MiningError::Io { source, .. } => io_err(source),
            other => other,
        })?;
        info!(
            path = %path.display(),
            transactions = dataset.len(),
            max_item = ?dataset.max_item,
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn read<R: BufRead>(reader: R, delimiter: Delimiter, policy: ParsePolicy) -> Result<Self> {
        let mut transactions = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| MiningError::Io {
                path: "<reader>".into(),
                source,
            })?;
            transactions.push(parse_line(&line, idx + 1, delimiter, policy)?);
        }
        Ok(Self::from_transactions(transactions))
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Largest item id seen, `None` when no transaction has items.
    pub fn max_item(&self) -> Option<Item> {
        self.max_item
    }
}

fn parse_line(line: &str, line_no: usize, delimiter: Delimiter, policy: ParsePolicy) -> Result<Transaction> {
    let fields: Box<dyn Iterator<Item = &str> + '_> = match delimiter {
        Delimiter::Whitespace => Box::new(line.split_whitespace()),
        Delimiter::Char(c) => Box::new(line.split(c)),
    };

    let mut transaction = Vec::new();
    for field in fields.map(str::trim).filter(|f| !f.is_empty()) {
        match field.parse::<i64>() {
            Ok(value) if value < 0 => {
                debug!(line = line_no, value, "negative item dropped");
            }
            Ok(value) => match Item::try_from(value) {
                Ok(item) => transaction.push(item),
                Err(_) => debug!(line = line_no, value, "item out of range dropped"),
            },
            Err(_) => match policy {
                ParsePolicy::Strict => {
                    return Err(MiningError::Parse {
                        line: line_no,
                        field: field.to_string(),
                    })
                }
                ParsePolicy::SkipMalformed => {
                    warn!(line = line_no, field, "skipping malformed item");
                }
            },
        }
    }
    Ok(transaction)
}

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::account::{AccountId32, AccountKind, H160};
use crate::network::Network;

/// A labelled account together with its EVM-side address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressEntry {
    pub id: String,
    pub label: String,
    pub network: Network,
    pub account: AccountId32,
    pub evm_address: H160,
    pub kind: AccountKind,
    pub created_at: DateTime<Utc>,
}

/// Labelled accounts indexed by UUID, persisted as a JSON file.
#[derive(Debug, Serialize, Deserialize)]
pub struct AddressBook {
    entries: HashMap<String, AddressEntry>,
}

impl AddressBook {
    /// Create an empty address book.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    fn insert(&mut self, label: String, network: Network, account: AccountId32) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let entry = AddressEntry {
            id: id.clone(),
            label,
            network,
            account,
            evm_address: account.to_chain_address(),
            kind: account.kind(),
            created_at: Utc::now(),
        };
        info!(entry_id = %id, network = ?network, kind = %entry.kind, "address added to book");
        self.entries.insert(id.clone(), entry);
        id
    }

    /// Add a native-side account. Its EVM address is computed on insert.
    /// Returns the generated entry ID.
    pub fn add_account(&mut self, label: String, network: Network, account: AccountId32) -> String {
        self.insert(label, network, account)
    }

    /// Add an EVM address, stored alongside its derived identifier.
    pub fn add_evm(&mut self, label: String, network: Network, address: H160) -> String {
        self.insert(label, network, address.to_account_identifier())
    }

    /// Remove an entry by ID. Returns the removed entry if it existed.
    pub fn remove(&mut self, id: &str) -> Option<AddressEntry> {
        let removed = self.entries.remove(id);
        if removed.is_some() {
            info!(entry_id = %id, "address removed from book");
        }
        removed
    }

    pub fn get(&self, id: &str) -> Option<&AddressEntry> {
        self.entries.get(id)
    }

    /// Find the entry whose EVM address is `address`.
    pub fn find_by_evm(&self, address: &H160) -> Option<&AddressEntry> {
        self.entries.values().find(|e| e.evm_address == *address)
    }

    /// All entries, oldest first.
    pub fn list(&self) -> Vec<&AddressEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persist the address book to a JSON file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("failed to serialize address book")?;
        std::fs::write(path, json).context("failed to write address book file")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .context("failed to set address book file permissions")?;
        }

        info!(path = %path.display(), count = self.entries.len(), "address book saved");
        Ok(())
    }

    /// Load an address book from a JSON file. Returns an empty book if the
    /// file does not exist.
    ///
    /// `evm_address` and `kind` are recomputed from `account`; the stored
    /// values are never trusted.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "address book file not found, starting empty");
            return Ok(Self::new());
        }
        let json = std::fs::read_to_string(path).context("failed to read address book file")?;
        let mut book: Self =
            serde_json::from_str(&json).context("failed to deserialize address book")?;
        for entry in book.entries.values_mut() {
            let evm_address = entry.account.to_chain_address();
            let kind = entry.account.kind();
            if entry.evm_address != evm_address || entry.kind != kind {
                warn!(entry_id = %entry.id, "stored EVM address disagrees with account");
                entry.evm_address = evm_address;
                entry.kind = kind;
            }
        }
        info!(path = %path.display(), count = book.entries.len(), "address book loaded");
        Ok(book)
    }
}

impl Default for AddressBook {
    fn default() -> Self {
        Self::new()
    }
}

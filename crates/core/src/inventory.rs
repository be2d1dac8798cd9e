// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inventory assembly
//!
//! Combines targets and their connection profiles into the inventory handed
//! to the execution engine. Entries are keyed by address: a repeated address
//! replaces the earlier entry but keeps its position.

use crate::credential::{bind, ConnectionProfile, ConnectionType};
use crate::error::ConfigError;
use crate::params::Credentials;
use crate::target::TargetDescriptor;
use indexmap::IndexMap;
use serde_json::{json, Map, Value};

/// Address of the pseudo-target used by commands that run locally
pub const LOCALHOST: &str = "localhost";

pub const VAR_HOST: &str = "ansible_host";
pub const VAR_PORT: &str = "ansible_port";

/// One target with its connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub target: TargetDescriptor,
    pub profile: ConnectionProfile,
}

impl InventoryEntry {
    /// Host variables as the engine expects them
    pub fn host_vars(&self) -> IndexMap<String, String> {
        let mut vars = IndexMap::new();
        if self.profile.connection_type.is_host_based() {
            vars.insert(VAR_HOST.to_string(), self.target.address.clone());
            if let Some(port) = self.target.port {
                vars.insert(VAR_PORT.to_string(), port.to_string());
            }
        }
        for (key, value) in self
            .profile
            .auth_fields
            .iter()
            .chain(self.profile.transport_flags.iter())
        {
            vars.insert(key.clone(), value.clone());
        }
        vars
    }
}

/// Targets of one invocation, keyed by address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    entries: IndexMap<String, InventoryEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single local pseudo-target without credentials
    pub fn local() -> Self {
        let target = TargetDescriptor::new(LOCALHOST);
        let profile = bind(&target, ConnectionType::Local, &Credentials::default());
        let mut inventory = Self::new();
        inventory.insert(InventoryEntry { target, profile });
        inventory
    }

    /// Insert an entry, returning the one it replaced
    pub fn insert(&mut self, entry: InventoryEntry) -> Option<InventoryEntry> {
        self.entries.insert(entry.target.address.clone(), entry)
    }

    pub fn get(&self, address: &str) -> Option<&InventoryEntry> {
        self.entries.get(address)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &InventoryEntry> {
        self.entries.values()
    }

    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Key material shared by the inventory, if any entry carries one
    pub fn ssh_key(&self) -> Option<&str> {
        self.entries
            .values()
            .find_map(|entry| entry.profile.ssh_key.as_deref())
    }

    /// Engine inventory document: `{"all": {"hosts": {address: vars}}}`
    pub fn to_json(&self) -> Value {
        let hosts: Map<String, Value> = self
            .entries
            .iter()
            .map(|(address, entry)| {
                let vars: Map<String, Value> = entry
                    .host_vars()
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect();
                (address.clone(), Value::Object(vars))
            })
            .collect();
        json!({ "all": { "hosts": hosts } })
    }
}

/// Assemble the inventory for one invocation
///
/// Local commands always get the single `localhost` entry; remote commands
/// get one entry per resolved target.
pub fn assemble(
    targets: &[TargetDescriptor],
    connection: ConnectionType,
    creds: &Credentials,
) -> Result<Inventory, ConfigError> {
    if !connection.is_host_based() {
        return Ok(Inventory::local());
    }

    let mut inventory = Inventory::new();
    for target in targets {
        let profile = bind(target, connection, creds);
        if let Some(replaced) = inventory.insert(InventoryEntry {
            target: target.clone(),
            profile,
        }) {
            tracing::debug!(address = %replaced.target.address, "duplicate host replaced");
        }
    }

    if inventory.is_empty() {
        return Err(ConfigError::EmptyInventory);
    }
    Ok(inventory)
}

#[cfg(test)]
#[path = "inventory_tests.rs"]
mod tests;

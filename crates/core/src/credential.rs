// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential binding
//!
//! Produces the connection profile for one target from the command's fixed
//! connection type and the caller's credential bundle. Binding is a pure
//! function; an incomplete profile is not rejected here, the execution engine
//! refuses it at connection time.

use crate::params::{Credentials, StoredCredential};
use crate::target::TargetDescriptor;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const VAR_USER: &str = "ansible_user";
pub const VAR_PASSWORD: &str = "ansible_password";
pub const VAR_CONNECTION: &str = "ansible_connection";
pub const VAR_WINRM_TRANSPORT: &str = "ansible_winrm_transport";
pub const VAR_WINRM_CERT_VALIDATION: &str = "ansible_winrm_server_cert_validation";
pub const VAR_NETWORK_OS: &str = "ansible_network_os";
pub const VAR_BECOME: &str = "ansible_become";
pub const VAR_BECOME_METHOD: &str = "ansible_become_method";

/// Transport and authentication family of a command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionType {
    #[default]
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "ssh")]
    Ssh,
    #[serde(rename = "winrm")]
    WinRm,
    #[serde(rename = "ios")]
    NetworkCliIos,
    #[serde(rename = "nxos")]
    NetworkCliNxos,
}

impl ConnectionType {
    /// Tag used in definition files
    pub fn tag(&self) -> &'static str {
        match self {
            ConnectionType::Local => "local",
            ConnectionType::Ssh => "ssh",
            ConnectionType::WinRm => "winrm",
            ConnectionType::NetworkCliIos => "ios",
            ConnectionType::NetworkCliNxos => "nxos",
        }
    }

    /// Commands with a remote connection take a `host` argument
    pub fn is_host_based(&self) -> bool {
        !matches!(self, ConnectionType::Local)
    }

    /// WinRM has no key authentication
    pub fn supports_key_auth(&self) -> bool {
        matches!(
            self,
            ConnectionType::Ssh | ConnectionType::NetworkCliIos | ConnectionType::NetworkCliNxos
        )
    }
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Connection tag not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown connection type: {0} (expected local, ssh, winrm, ios or nxos)")]
pub struct UnknownConnection(pub String);

impl FromStr for ConnectionType {
    type Err = UnknownConnection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(ConnectionType::Local),
            "ssh" => Ok(ConnectionType::Ssh),
            "winrm" => Ok(ConnectionType::WinRm),
            "ios" => Ok(ConnectionType::NetworkCliIos),
            "nxos" => Ok(ConnectionType::NetworkCliNxos),
            other => Err(UnknownConnection(other.to_string())),
        }
    }
}

/// Which credential branch produced the auth fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Stored credential carrying an SSH key
    SshKey,
    /// Stored credential carrying a password
    StoredPassword,
    /// Separately configured identifier/password pair
    Separate,
    /// Local connections take no credentials
    NotRequired,
}

/// Fully populated connection settings for one target
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionProfile {
    pub connection_type: ConnectionType,
    pub auth_fields: IndexMap<String, String>,
    pub transport_flags: IndexMap<String, String>,
    /// Private key material, handed to the engine separately from host vars
    pub ssh_key: Option<String>,
    pub source: AuthSource,
}

impl ConnectionProfile {
    fn empty(connection_type: ConnectionType, source: AuthSource) -> Self {
        Self {
            connection_type,
            auth_fields: IndexMap::new(),
            transport_flags: IndexMap::new(),
            ssh_key: None,
            source,
        }
    }

    fn auth(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.auth_fields.insert(key.to_string(), value.to_string());
        }
    }

    fn flag(&mut self, key: &str, value: &str) {
        self.transport_flags
            .insert(key.to_string(), value.to_string());
    }

    /// True when no credential branch produced anything
    pub fn has_credentials(&self) -> bool {
        !self.auth_fields.is_empty() || self.ssh_key.is_some()
    }
}

impl fmt::Debug for ConnectionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionProfile")
            .field("connection_type", &self.connection_type)
            .field("auth_fields", &self.auth_fields.keys().collect::<Vec<_>>())
            .field("transport_flags", &self.transport_flags)
            .field("ssh_key", &self.ssh_key.as_ref().map(|_| "<redacted>"))
            .field("source", &self.source)
            .finish()
    }
}

/// Empty strings count as unset, matching how the parameter store reports
/// cleared fields.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn stored_key(stored: Option<&StoredCredential>) -> Option<(&StoredCredential, &str)> {
    let stored = stored?;
    present(&stored.sshkey).map(|key| (stored, key))
}

fn stored_password(stored: Option<&StoredCredential>) -> Option<(&StoredCredential, &str)> {
    let stored = stored?;
    present(&stored.password).map(|password| (stored, password))
}

/// Bind credentials for one target
///
/// Resolution order is fixed: stored SSH key, stored password, then the
/// separate identifier/password pair. WinRM never takes the key branch.
pub fn bind(
    target: &TargetDescriptor,
    connection: ConnectionType,
    creds: &Credentials,
) -> ConnectionProfile {
    if connection == ConnectionType::Local {
        let mut profile = ConnectionProfile::empty(connection, AuthSource::NotRequired);
        profile.flag(VAR_CONNECTION, "local");
        return profile;
    }

    let stored = creds.credentials.as_ref();
    let mut profile = match stored_key(stored).filter(|_| connection.supports_key_auth()) {
        Some((stored, key)) => {
            let mut profile = ConnectionProfile::empty(connection, AuthSource::SshKey);
            profile.auth(VAR_USER, present(&stored.user));
            profile.ssh_key = Some(key.to_string());
            profile
        }
        None => match stored_password(stored) {
            Some((stored, password)) => {
                let mut profile =
                    ConnectionProfile::empty(connection, AuthSource::StoredPassword);
                profile.auth(VAR_USER, present(&stored.user));
                profile.auth(VAR_PASSWORD, Some(password));
                profile
            }
            None => {
                let mut profile = ConnectionProfile::empty(connection, AuthSource::Separate);
                profile.auth(VAR_USER, present(&creds.identifier));
                profile.auth(VAR_PASSWORD, present(&creds.password));
                profile
            }
        },
    };

    match connection {
        ConnectionType::WinRm => {
            profile.flag(VAR_CONNECTION, "winrm");
            profile.flag(VAR_WINRM_TRANSPORT, "ntlm");
            // Certificate validation is off for every WinRM target
            profile.flag(VAR_WINRM_CERT_VALIDATION, "ignore");
            tracing::debug!(host = %target, "winrm certificate validation disabled");
        }
        ConnectionType::NetworkCliIos | ConnectionType::NetworkCliNxos => {
            let os = if connection == ConnectionType::NetworkCliIos {
                "ios"
            } else {
                "nxos"
            };
            profile.flag(VAR_CONNECTION, "network_cli");
            profile.flag(VAR_NETWORK_OS, os);
            profile.flag(VAR_BECOME, "yes");
            profile.flag(VAR_BECOME_METHOD, "enable");
        }
        ConnectionType::Ssh | ConnectionType::Local => {}
    }

    if !profile.has_credentials() {
        tracing::debug!(host = %target, connection = %connection, "no credentials resolved");
    }

    profile
}

#[cfg(test)]
#[path = "credential_tests.rs"]
mod tests;

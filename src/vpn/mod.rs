//! VPN collaborator
//!
//! The register geoblocks some regions, so production runs tunnel through a
//! consumer VPN brought up before the first request and torn down after the
//! export. Connectivity is advisory: every failure path here logs and
//! returns, and the crawl runs either way.

use std::process::Command;
use thiserror::Error;

/// Errors from driving the VPN client
#[derive(Debug, Error)]
pub enum VpnError {
    #[error("Failed to run '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("'{command}' exited with {status}")]
    CommandFailed { command: String, status: String },
}

/// Result type for VPN operations
pub type VpnResult<T> = Result<T, VpnError>;

/// Capability set of the VPN collaborator.
pub trait VpnController {
    fn connect(&self, region: &str) -> VpnResult<()>;
    fn disconnect(&self) -> VpnResult<()>;
    fn is_connected(&self) -> bool;
}

/// Drives a locally installed ExpressVPN client through its CLI.
pub struct ExpressVpnCli {
    binary: String,
}

impl ExpressVpnCli {
    pub fn new() -> Self {
        Self {
            binary: "expressvpn".to_string(),
        }
    }

    /// Points the controller at a different client binary.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run(&self, args: &[&str]) -> VpnResult<String> {
        let command = format!("{} {}", self.binary, args.join(" "));

        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|source| VpnError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(VpnError::CommandFailed {
                command,
                status: output.status.to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for ExpressVpnCli {
    fn default() -> Self {
        Self::new()
    }
}

impl VpnController for ExpressVpnCli {
    fn connect(&self, region: &str) -> VpnResult<()> {
        self.run(&["connect", region]).map(|_| ())
    }

    fn disconnect(&self) -> VpnResult<()> {
        self.run(&["disconnect"]).map(|_| ())
    }

    fn is_connected(&self) -> bool {
        self.run(&["status"])
            .map(|stdout| stdout.contains("Connected"))
            .unwrap_or(false)
    }
}

/// Connects and reports the resulting state.
///
/// Nothing here is enforced: a failed connect or a client that never reaches
/// the connected state is logged and the caller proceeds on the bare
/// connection.
pub fn connect_advisory(vpn: &dyn VpnController, region: &str) {
    tracing::info!("Connecting VPN ({})", region);

    if let Err(e) = vpn.connect(region) {
        tracing::warn!("VPN connect failed: {}; continuing without VPN", e);
        return;
    }

    if vpn.is_connected() {
        tracing::info!("VPN connected");
    } else {
        tracing::warn!("VPN did not reach connected state; continuing anyway");
    }
}

/// Disconnects the VPN if it is still up, logging the outcome.
pub fn disconnect_if_connected(vpn: &dyn VpnController) {
    if !vpn.is_connected() {
        return;
    }

    match vpn.disconnect() {
        Ok(()) => tracing::info!("VPN disconnected"),
        Err(e) => tracing::warn!("VPN disconnect failed: {}", e),
    }
}

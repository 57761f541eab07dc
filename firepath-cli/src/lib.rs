//! Command-line interface over the Firepath remote point list.
#![forbid(unsafe_code)]

use std::time::Duration;

use clap::{Parser, Subcommand};
use firepath_core::DEFAULT_AVOIDANCE_RADIUS_METERS;
use firepath_data::remote::{HttpDocumentTransport, HttpDocumentTransportConfig, RemoteStore};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

mod commands;
mod error;

pub use error::CliError;

use commands::Action;

const ARG_RESOURCE_URL: &str = "resource-url";
const ARG_MASTER_KEY: &str = "master-key";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_TITLE: &str = "title";
const ARG_RADIUS: &str = "radius";
const ARG_EXCLUDE_INDEX: &str = "exclude-index";
const ENV_LIST_RESOURCE_URL: &str = "FIREPATH_CMDS_LIST_RESOURCE_URL";
const ENV_LIST_MASTER_KEY: &str = "FIREPATH_CMDS_LIST_MASTER_KEY";
const ENV_REMOVE_RESOURCE_URL: &str = "FIREPATH_CMDS_REMOVE_RESOURCE_URL";
const ENV_REMOVE_MASTER_KEY: &str = "FIREPATH_CMDS_REMOVE_MASTER_KEY";
const ENV_REMOVE_TITLE: &str = "FIREPATH_CMDS_REMOVE_TITLE";
const ENV_GEOFENCES_RESOURCE_URL: &str = "FIREPATH_CMDS_GEOFENCES_RESOURCE_URL";
const ENV_GEOFENCES_MASTER_KEY: &str = "FIREPATH_CMDS_GEOFENCES_MASTER_KEY";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Run the Firepath CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let command = cli.command.into_config()?;
    let transport = HttpDocumentTransport::with_config(command.remote.transport_config())
        .map_err(|source| CliError::BuildTransport {
            resource_url: command.remote.resource_url.clone(),
            source,
        })?;
    let mut stdout = std::io::stdout().lock();
    commands::execute(command.action, RemoteStore::new(transport), &mut stdout)
}

#[derive(Debug, Parser)]
#[command(
    name = "firepath",
    about = "Inspect and edit the shared hazard point list",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every remote point.
    List(ListArgs),
    /// Remove the first remote point with a given title.
    Remove(RemoveArgs),
    /// Print the avoidance box around every remote hazard.
    Geofences(GeofencesArgs),
}

impl Command {
    fn into_config(self) -> Result<CommandConfig, CliError> {
        match self {
            Self::List(args) => args.into_config(),
            Self::Remove(args) => args.into_config(),
            Self::Geofences(args) => args.into_config(),
        }
    }
}

/// CLI arguments for the `list` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Print every remote point")]
#[ortho_config(prefix = "FIREPATH")]
struct ListArgs {
    /// URL of the remote document.
    #[arg(long = ARG_RESOURCE_URL, value_name = "url")]
    #[serde(default)]
    resource_url: Option<String>,
    /// Access key for the remote document.
    #[arg(long = ARG_MASTER_KEY, value_name = "key")]
    #[serde(default)]
    master_key: Option<String>,
    /// Request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    timeout_secs: Option<u64>,
}

impl ListArgs {
    fn into_config(self) -> Result<CommandConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CommandConfig::try_from(merged)
    }
}

impl TryFrom<ListArgs> for CommandConfig {
    type Error = CliError;

    fn try_from(args: ListArgs) -> Result<Self, Self::Error> {
        let remote = RemoteConfig::resolve(
            args.resource_url,
            args.master_key,
            args.timeout_secs,
            (ENV_LIST_RESOURCE_URL, ENV_LIST_MASTER_KEY),
        )?;
        Ok(Self {
            remote,
            action: Action::List,
        })
    }
}

/// CLI arguments for the `remove` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Remove the first remote point whose title matches exactly. \
                 The removal runs on a background worker; an unmatched title \
                 writes the document back unchanged.",
    about = "Remove the first remote point with a given title"
)]
#[ortho_config(prefix = "FIREPATH")]
struct RemoveArgs {
    /// Exact, case-sensitive title to remove.
    #[arg(value_name = "title")]
    #[serde(default)]
    title: Option<String>,
    /// URL of the remote document.
    #[arg(long = ARG_RESOURCE_URL, value_name = "url")]
    #[serde(default)]
    resource_url: Option<String>,
    /// Access key for the remote document.
    #[arg(long = ARG_MASTER_KEY, value_name = "key")]
    #[serde(default)]
    master_key: Option<String>,
    /// Request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    timeout_secs: Option<u64>,
}

impl RemoveArgs {
    fn into_config(self) -> Result<CommandConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CommandConfig::try_from(merged)
    }
}

impl TryFrom<RemoveArgs> for CommandConfig {
    type Error = CliError;

    fn try_from(args: RemoveArgs) -> Result<Self, Self::Error> {
        let title = args.title.ok_or(CliError::MissingArgument {
            field: ARG_TITLE,
            env: ENV_REMOVE_TITLE,
        })?;
        let remote = RemoteConfig::resolve(
            args.resource_url,
            args.master_key,
            args.timeout_secs,
            (ENV_REMOVE_RESOURCE_URL, ENV_REMOVE_MASTER_KEY),
        )?;
        Ok(Self {
            remote,
            action: Action::Remove { title },
        })
    }
}

/// CLI arguments for the `geofences` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load the remote document into a fresh registry and print \
                 the square avoidance box around every hazard. Optionally \
                 skip one point, as when routing towards that hazard.",
    about = "Print the avoidance box around every remote hazard"
)]
#[ortho_config(prefix = "FIREPATH")]
struct GeofencesArgs {
    /// Half-width of each box in metres.
    #[arg(long = ARG_RADIUS, value_name = "metres")]
    #[serde(default)]
    radius: Option<f64>,
    /// Position in the remote list of a point to leave out.
    #[arg(long = ARG_EXCLUDE_INDEX, value_name = "index")]
    #[serde(default)]
    exclude_index: Option<usize>,
    /// URL of the remote document.
    #[arg(long = ARG_RESOURCE_URL, value_name = "url")]
    #[serde(default)]
    resource_url: Option<String>,
    /// Access key for the remote document.
    #[arg(long = ARG_MASTER_KEY, value_name = "key")]
    #[serde(default)]
    master_key: Option<String>,
    /// Request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    timeout_secs: Option<u64>,
}

impl GeofencesArgs {
    fn into_config(self) -> Result<CommandConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CommandConfig::try_from(merged)
    }
}

impl TryFrom<GeofencesArgs> for CommandConfig {
    type Error = CliError;

    fn try_from(args: GeofencesArgs) -> Result<Self, Self::Error> {
        let remote = RemoteConfig::resolve(
            args.resource_url,
            args.master_key,
            args.timeout_secs,
            (ENV_GEOFENCES_RESOURCE_URL, ENV_GEOFENCES_MASTER_KEY),
        )?;
        Ok(Self {
            remote,
            action: Action::Geofences {
                radius_meters: args.radius.unwrap_or(DEFAULT_AVOIDANCE_RADIUS_METERS),
                exclude_index: args.exclude_index,
            },
        })
    }
}

/// Resolved subcommand configuration.
#[derive(Debug, Clone, PartialEq)]
struct CommandConfig {
    remote: RemoteConfig,
    action: Action,
}

/// Connection settings shared by every subcommand.
#[derive(Clone, PartialEq, Eq)]
struct RemoteConfig {
    resource_url: String,
    master_key: String,
    timeout: Duration,
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("resource_url", &self.resource_url)
            .field("master_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RemoteConfig {
    fn resolve(
        resource_url: Option<String>,
        master_key: Option<String>,
        timeout_secs: Option<u64>,
        (url_env, key_env): (&'static str, &'static str),
    ) -> Result<Self, CliError> {
        let resource_url = resource_url.ok_or(CliError::MissingArgument {
            field: ARG_RESOURCE_URL,
            env: url_env,
        })?;
        let master_key = master_key.ok_or(CliError::MissingArgument {
            field: ARG_MASTER_KEY,
            env: key_env,
        })?;
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        Ok(Self {
            resource_url,
            master_key,
            timeout,
        })
    }

    fn transport_config(&self) -> HttpDocumentTransportConfig {
        HttpDocumentTransportConfig::new(self.resource_url.clone(), self.master_key.clone())
            .with_timeout(self.timeout)
    }
}

#[cfg(test)]
pub(crate) fn remove_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<CommandConfig, CliError> {
    let merged = RemoveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    CommandConfig::try_from(merged)
}

#[cfg(test)]
mod tests;

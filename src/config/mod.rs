//! Settings for the relay, layered from defaults, an optional config file,
//! `SIGRELAY_*` environment variables and finally command-line flags.

mod cli;
mod settings;

use std::path::Path;

use config::{Config, Environment, File};

use crate::utils::RelayError;

pub use cli::Args;
pub use settings::{
    LivenessSettings, LoggingSettings, PartialSettings, ServerSettings, Settings,
};

const DEFAULT_CONFIG_FILE: &str = "config/default";
const ENV_PREFIX: &str = "SIGRELAY";

/// Final settings for a run: file and environment, then `args` on top, then
/// validation of the merged result.
pub fn resolve(args: &Args) -> Result<Settings, RelayError> {
    let settings = args.apply(load_config(args.config.as_deref())?);
    validate(&settings)?;
    Ok(settings)
}

/// Loads the configuration from `path` (or `config/default` when absent) and
/// the environment, merged over [`Settings::default`]. Not validated, since
/// command-line flags may still override it.
///
/// An explicitly named file must exist; the default one is optional.
pub fn load_config(path: Option<&Path>) -> Result<Settings, RelayError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let config = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let partial: PartialSettings = config.try_deserialize()?;
    Ok(partial.merge_into(Settings::default()))
}

/// Rejects values that would leave the relay unable to run.
pub fn validate(settings: &Settings) -> Result<(), RelayError> {
    if settings.server.host.trim().is_empty() {
        return Err(RelayError::InvalidSetting {
            key: "server.host",
            reason: "must not be empty".to_string(),
        });
    }
    if settings.liveness.ping_interval_ms == 0 {
        return Err(RelayError::InvalidSetting {
            key: "liveness.ping_interval_ms",
            reason: "must be greater than 0".to_string(),
        });
    }
    Ok(())
}

//! apikey command - Store the API key in the config file

use ac_core::ConfigManager;
use clap::Args;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Store the API key
#[derive(Args, Debug)]
pub struct ApikeyArgs {
    /// API key generated in the Aikido continuous integration settings
    pub key: String,
}

/// Execute the apikey command
pub async fn execute(args: ApikeyArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let manager = match ConfigManager::new() {
        Ok(m) => m,
        Err(e) => return formatter.fail(&e.to_string(), ExitCode::from(&e)),
    };

    match save_key(&manager, &args.key) {
        Ok(replaced) => {
            if replaced {
                formatter.warning("Replacing the previously stored API key");
            }
            formatter.success(&format!(
                "API key saved to {}",
                manager.config_path().display()
            ));
            ExitCode::Success
        }
        Err(e) => formatter.fail(&format!("Failed to save API key: {e}"), ExitCode::from(&e)),
    }
}

/// Store `key`, returning whether a different key was stored before
fn save_key(manager: &ConfigManager, key: &str) -> ac_core::Result<bool> {
    let key = key.trim();
    if key.is_empty() {
        return Err(ac_core::Error::Config("API key cannot be empty".into()));
    }

    let mut config = manager.load()?;
    let replaced = config.api_key.as_deref().is_some_and(|old| old != key);
    config.api_key = Some(key.to_string());
    manager.save(&config)?;
    Ok(replaced)
}

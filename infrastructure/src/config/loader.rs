//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::Uncased,
};
use std::path::{Path, PathBuf};

/// Project-level config file, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "blueprint.toml";

/// Environment variables and the config keys they override
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("BLUEPRINT_API_KEY", "remote.api_key"),
    ("BLUEPRINT_MCP_URL", "remote.url"),
    ("EVM_PRIVATE_KEY", "evm.private_key"),
    ("BASE_RPC_URL", "evm.rpc_url"),
    ("SOLANA_PRIVATE_KEY", "solana.private_key"),
    ("SOLANA_RPC_URL", "solana.rpc_url"),
];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (see [`ENV_OVERRIDES`])
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./blueprint.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/blueprint-bridge/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path();
        Self::figment(global.as_deref(), config_path.map(PathBuf::as_path))
            .extract()
            .map_err(Box::new)
    }

    /// Defaults plus environment variables (for --no-config)
    pub fn load_env_only() -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Self::env())
            .extract()
            .map_err(Box::new)
    }

    fn figment(global: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let project = PathBuf::from(PROJECT_CONFIG_FILE);
        if project.exists() {
            figment = figment.merge(Toml::file(&project));
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Self::env())
    }

    fn env() -> Env {
        let names: Vec<&str> = ENV_OVERRIDES.iter().map(|(var, _)| *var).collect();
        Env::raw().only(&names).map(|var| {
            ENV_OVERRIDES
                .iter()
                .find(|(name, _)| var.as_str().eq_ignore_ascii_case(name))
                .map(|(_, key)| Uncased::from(*key))
                .unwrap_or_else(|| Uncased::from(var.as_str().to_string()))
        })
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/blueprint-bridge/config.toml if set,
    /// otherwise falls back to ~/.config/blueprint-bridge/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("blueprint-bridge").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }

    /// Describe the config sources in priority order (for --show-config)
    pub fn describe_sources(explicit: Option<&PathBuf>) -> Vec<String> {
        let mut lines = Vec::new();

        for (var, _) in ENV_OVERRIDES {
            let state = if std::env::var_os(var).is_some() {
                "SET  "
            } else {
                "     "
            };
            lines.push(format!("  [{state}] Env:     {var}"));
        }

        if let Some(path) = explicit {
            lines.push(format!("  [FOUND] Explicit: {}", path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push(format!("  [     ] Project: ./{PROJECT_CONFIG_FILE}")),
        }

        if let Some(path) = Self::global_config_path() {
            let state = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{state}] Global:  {}", path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::file_config::{DEFAULT_BASE_RPC_URL, DEFAULT_MCP_URL};
    use figment::Jail;

    #[test]
    fn test_defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let config: FileConfig = ConfigLoader::figment(None, None).extract()?;
            assert_eq!(config, FileConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_files() {
        Jail::expect_with(|jail| {
            jail.create_file(
                PROJECT_CONFIG_FILE,
                r#"
                [evm]
                private_key = "from-file"
                rpc_url = "https://base.example"
                "#,
            )?;
            jail.set_env("EVM_PRIVATE_KEY", "from-env");
            jail.set_env("SOLANA_RPC_URL", "https://sol.example");

            let config: FileConfig = ConfigLoader::figment(None, None).extract()?;
            assert_eq!(config.evm.private_key.as_deref(), Some("from-env"));
            assert_eq!(config.evm.rpc_url, "https://base.example");
            assert_eq!(config.solana.rpc_url, "https://sol.example");
            assert_eq!(config.remote.url, DEFAULT_MCP_URL);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_beats_project_and_global() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "global.toml",
                "[remote]\nurl = \"https://global.example/mcp\"\napi_key = \"g\"\n",
            )?;
            jail.create_file(PROJECT_CONFIG_FILE, "[remote]\nurl = \"https://project.example/mcp\"\n")?;
            jail.create_file("custom.toml", "[remote]\nurl = \"https://custom.example/mcp\"\n")?;

            let config: FileConfig = ConfigLoader::figment(
                Some(Path::new("global.toml")),
                Some(Path::new("custom.toml")),
            )
            .extract()?;
            assert_eq!(config.remote.url, "https://custom.example/mcp");
            // Keys not overridden survive from lower layers
            assert_eq!(config.remote.api_key.as_deref(), Some("g"));
            assert_eq!(config.evm.rpc_url, DEFAULT_BASE_RPC_URL);
            Ok(())
        });
    }

    #[test]
    fn test_unrelated_env_is_ignored() {
        Jail::expect_with(|jail| {
            jail.set_env("EVM", "nope");
            jail.set_env("REMOTE_URL", "https://ignored.example");

            let config: FileConfig = ConfigLoader::figment(None, None).extract()?;
            assert_eq!(config.remote.url, DEFAULT_MCP_URL);
            Ok(())
        });
    }

    #[test]
    fn test_global_config_path_names_the_app() {
        let path = ConfigLoader::global_config_path();
        if let Some(path) = path {
            assert!(path.to_string_lossy().contains("blueprint-bridge"));
        }
    }
}

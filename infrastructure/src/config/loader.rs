//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// File name of the project-level config
pub const PROJECT_CONFIG_FILE: &str = "panel-consensus.toml";
/// Prefix of environment overrides, e.g. `PANEL_PIPELINE__MAX_TOKENS=900`
pub const ENV_PREFIX: &str = "PANEL_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `PANEL_` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./panel-consensus.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/panel-consensus/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        if let Some(path) = config_path
            && !path.exists()
        {
            return Err(Box::new(figment::Error::from(format!(
                "config file not found: {}",
                path.display()
            ))));
        }

        Self::figment(
            Self::global_config_path().as_deref(),
            Some(Path::new(PROJECT_CONFIG_FILE)),
            config_path,
        )
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Layer the file sources over the defaults. Missing files are skipped.
    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project, explicit].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/panel-consensus/config.toml if set,
    /// otherwise falls back to ~/.config/panel-consensus/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("panel-consensus").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        println!("  [     ] Env:     {ENV_PREFIX}* (e.g. {ENV_PREFIX}PIPELINE__MAX_TOKENS)");

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{mark}] Explicit: {}", path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./{PROJECT_CONFIG_FILE}");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use swarm_domain::RunMode;

    fn extract(figment: Figment) -> FileConfig {
        figment.extract().unwrap()
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.pipeline.standard_timeout_secs, 45);
        assert_eq!(config.providers.default, "openrouter");
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("panel-consensus"));
    }

    #[test]
    fn test_no_files_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let config = extract(ConfigLoader::figment(Some(&missing), Some(&missing), None));
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_later_sources_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("project.toml");
        let explicit = dir.path().join("explicit.toml");

        fs::write(
            &global,
            "[pipeline]\nmode = \"fast\"\nmax_tokens = 500\nstandard_timeout_secs = 10\n",
        )
        .unwrap();
        fs::write(&project, "[pipeline]\nmax_tokens = 700\n").unwrap();
        fs::write(&explicit, "[pipeline]\nstandard_timeout_secs = 20\n").unwrap();

        let config = extract(ConfigLoader::figment(
            Some(&global),
            Some(&project),
            Some(&explicit),
        ));

        assert_eq!(config.pipeline.mode, RunMode::Fast);
        assert_eq!(config.pipeline.max_tokens, 700);
        assert_eq!(config.pipeline.standard_timeout_secs, 20);
        assert_eq!(config.pipeline.deep_timeout_secs, 120);
    }

    #[test]
    fn test_partial_provider_table_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("explicit.toml");
        fs::write(&explicit, "[providers.openai]\nbase_url = \"http://localhost:8080\"\n")
            .unwrap();

        let config = extract(ConfigLoader::figment(None, None, Some(&explicit)));

        assert_eq!(config.providers.openai.base_url, "http://localhost:8080");
        assert_eq!(config.providers.openai.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("missing.toml");
        let err = ConfigLoader::load(Some(&explicit)).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("bad.toml");
        fs::write(&explicit, "[pipeline]\nmax_tokens = \"lots\"\n").unwrap();
        let result: Result<FileConfig, _> =
            ConfigLoader::figment(None, None, Some(&explicit)).extract();
        assert!(result.is_err());
    }
}

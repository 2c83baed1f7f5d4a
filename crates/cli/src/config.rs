use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use favicon_core::{
    DEFAULT_FAVICON_DIR, DEFAULT_ICO_SIZES, DEFAULT_SOURCE_NAME, FaviconGenerator, IconSpec,
    SizeTable, default_icon_specs,
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "favicons.yaml";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_source")]
    pub source: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_icon_specs")]
    pub sizes: Vec<IconSpec>,
    #[serde(default = "default_ico_sizes")]
    pub ico_sizes: Vec<u32>,
}

fn default_source() -> PathBuf {
    Path::new(DEFAULT_FAVICON_DIR).join(DEFAULT_SOURCE_NAME)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_FAVICON_DIR)
}

fn default_ico_sizes() -> Vec<u32> {
    DEFAULT_ICO_SIZES.to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: default_source(),
            output_dir: default_output_dir(),
            sizes: default_icon_specs(),
            ico_sizes: default_ico_sizes(),
        }
    }
}

pub fn get_current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

impl Config {
    /// Load `explicit` if given, else `<root>/favicons.yaml` if it exists,
    /// else the built-in layout.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => root.join(path),
            None => {
                let path = root.join(CONFIG_FILE_NAME);
                if !path.is_file() {
                    tracing::debug!("no {CONFIG_FILE_NAME} found, using built-in layout");
                    return Ok(Config::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Self::parse(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        // 空文件视为全部默认
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn into_generator(self, root: &Path) -> Result<FaviconGenerator> {
        let table = SizeTable::new(self.sizes).context("invalid size table")?;

        FaviconGenerator::new(root.join(self.source), root.join(self.output_dir))
            .with_size_table(table)
            .with_ico_sizes(self.ico_sizes)
            .context("invalid ico_sizes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
        assert_eq!(Config::parse("{}").unwrap(), Config::default());
    }

    #[test]
    fn default_config_matches_project_layout() {
        let root = Path::new("/repo");
        let from_config = Config::default().into_generator(root).unwrap();
        let fixed = FaviconGenerator::for_project(root);

        assert_eq!(from_config.source(), fixed.source());
        assert_eq!(from_config.output_dir(), fixed.output_dir());
        assert_eq!(from_config.size_table(), fixed.size_table());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = Config::parse(
            "sizes:\n  - { file: icon-16.png, size: 16 }\n  - { file: icon-64.png, size: 64 }\n",
        )
        .unwrap();

        assert_eq!(
            config.sizes,
            vec![IconSpec::new("icon-16.png", 16), IconSpec::new("icon-64.png", 64)]
        );
        assert_eq!(config.ico_sizes, vec![16, 32, 48]);
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_FAVICON_DIR));
    }

    #[test]
    fn relative_paths_resolve_against_root() {
        let config = Config::parse("source: art/logo.svg\noutput_dir: public\n").unwrap();
        let generator = config.into_generator(Path::new("/repo")).unwrap();

        assert_eq!(generator.source(), Path::new("/repo/art/logo.svg"));
        assert_eq!(generator.output_dir(), Path::new("/repo/public"));
    }

    #[test]
    fn duplicate_sizes_are_rejected() {
        let config = Config::parse(
            "sizes:\n  - { file: a.png, size: 16 }\n  - { file: a.png, size: 32 }\n",
        )
        .unwrap();

        assert!(config.into_generator(Path::new("/repo")).is_err());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(Config::parse("sizes: 12").is_err());
        assert!(Config::parse("ico_sizes: [-1]").is_err());
    }
}

use crate::schema::HeraldConfig;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Jsonc,
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "jsonc" => Some(Self::Jsonc),
            "json" => Some(Self::Json),
            "yml" | "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: HeraldConfig,
    pub path: PathBuf,
    pub format: ConfigFormat,
}

const CONFIG_CANDIDATES: &[&str] = &[
    "herald.jsonc",
    "herald.json",
    "herald.yml",
    "herald.yaml",
    ".herald.jsonc",
    ".herald.json",
    ".herald.yml",
    ".herald.yaml",
];

/// An explicit path must load. Without one, the first discovered file is
/// used, and `None` means no config file exists.
pub fn resolve_config(config_path: Option<&Path>) -> Result<Option<ResolvedConfig>> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => match find_all_config_files().into_iter().next() {
            Some(path) => path,
            None => return Ok(None),
        },
    };

    load_config_from_file(&path).map(Some)
}

pub fn load_config_from_file(path: &Path) -> Result<ResolvedConfig> {
    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| anyhow!("Unknown config format for: {}", path.display()))?;

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config_content(&content, format)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    Ok(ResolvedConfig {
        config: expand_env_vars(config),
        path: path.to_path_buf(),
        format,
    })
}

fn parse_config_content(content: &str, format: ConfigFormat) -> Result<HeraldConfig> {
    match format {
        ConfigFormat::Jsonc => json5::from_str(content).context("Failed to parse JSONC"),
        ConfigFormat::Json => serde_json::from_str(content).context("Failed to parse JSON"),
        ConfigFormat::Yaml => serde_yaml_ng::from_str(content).context("Failed to parse YAML"),
    }
}

fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::new()];
    if let Ok(home) = env::var("HOME") {
        dirs.push(PathBuf::from(home).join(".config").join("herald"));
    }
    dirs
}

/// Every existing config file in priority order: the working directory
/// first, then `~/.config/herald/`.
pub fn find_all_config_files() -> Vec<PathBuf> {
    search_dirs()
        .iter()
        .flat_map(|dir| CONFIG_CANDIDATES.iter().map(move |name| dir.join(name)))
        .filter(|path| path.exists())
        .collect()
}

fn expand_env_vars(mut config: HeraldConfig) -> HeraldConfig {
    config.telemetry.level = expand_env_string(&config.telemetry.level);
    config.telemetry.service_name = config
        .telemetry
        .service_name
        .as_deref()
        .map(expand_env_string);
    config
}

/// Replaces `$VAR` and `${VAR}` with the variable's value. Unset variables
/// are left as written.
fn expand_env_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        if chars.peek() == Some(&'{') {
            chars.next();
            let name: String = chars.by_ref().take_while(|&c| c != '}').collect();
            match env::var(&name) {
                Ok(value) => result.push_str(&value),
                Err(_) => {
                    result.push_str("${");
                    result.push_str(&name);
                    result.push('}');
                }
            }
            continue;
        }

        let mut name = String::new();
        while let Some(&c) = chars.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            name.push(c);
            chars.next();
        }

        result.push('$');
        if name.is_empty() {
            continue;
        }
        match env::var(&name) {
            Ok(value) => {
                result.pop();
                result.push_str(&value);
            }
            Err(_) => result.push_str(&name),
        }
    }

    result
}

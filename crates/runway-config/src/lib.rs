pub mod error;
pub mod params;

pub use error::*;
pub use params::{
    AutoScalingBounds, DeploymentParameters, InstanceSettings, RawParameters, SourceSettings,
    TargetEnvironment, validate_stack_name,
};

use std::path::{Path, PathBuf};

/// 設定ファイルパスを直接指定する環境変数
pub const ENV_CONFIG_PATH: &str = "RUNWAY_CONFIG_PATH";

const CANDIDATES: [&str; 3] = ["runway.local.yaml", "runway.yaml", ".runway.yaml"];

/// 読み込み結果
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub params: DeploymentParameters,
    /// `None` の場合は環境非依存 (environment-agnostic)
    pub environment: Option<TargetEnvironment>,
    /// 読み込んだ設定ファイル (環境変数のみで構成した場合は `None`)
    pub source_path: Option<PathBuf>,
}

/// グローバル設定ディレクトリ (~/.config/runway)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("runway"))
}

/// runway.yaml を探す
///
/// 以下の優先順位で設定ファイルを検索:
/// 1. 環境変数 RUNWAY_CONFIG_PATH (直接パス指定、存在しなければエラー)
/// 2. カレントディレクトリ: runway.local.yaml, runway.yaml, .runway.yaml
/// 3. ./.runway/ ディレクトリ内: 同様の順序
/// 4. ~/.config/runway/runway.yaml (グローバル設定)
///
/// どれも無い場合は `Ok(None)`。全項目を環境変数で渡す運用を許すため。
pub fn find_config_file() -> Result<Option<PathBuf>> {
    if let Ok(config_path) = std::env::var(ENV_CONFIG_PATH) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(ConfigError::ConfigFileNotFound(path.display().to_string()));
    }

    let current_dir = std::env::current_dir()?;

    for filename in &CANDIDATES {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(Some(path));
        }
    }

    let runway_dir = current_dir.join(".runway");
    if runway_dir.is_dir() {
        for filename in &CANDIDATES {
            let path = runway_dir.join(filename);
            if path.exists() {
                return Ok(Some(path));
            }
        }
    }

    if let Some(config_dir) = get_config_dir() {
        let global_config = config_dir.join("runway.yaml");
        if global_config.exists() {
            return Ok(Some(global_config));
        }
    }

    Ok(None)
}

/// 設定ファイルを探索し、環境変数で上書きして検証する
pub fn load() -> Result<LoadedConfig> {
    let path = find_config_file()?;
    load_from(path.as_deref())
}

/// 指定したファイル (または無し) から読み込む
pub fn load_from(path: Option<&Path>) -> Result<LoadedConfig> {
    let mut raw = match path {
        Some(path) => {
            tracing::debug!("Loading parameters from {}", path.display());
            let content = std::fs::read_to_string(path)?;
            parse(&content)?
        }
        None => {
            tracing::debug!("No config file found, using environment only");
            RawParameters::default()
        }
    };

    raw.apply_overrides(|var| std::env::var(var).ok())?;
    let (params, environment) = raw.validate()?;

    Ok(LoadedConfig {
        params,
        environment,
        source_path: path.map(Path::to_path_buf),
    })
}

/// YAML 文字列をパースする (空文字列は空の設定)
pub fn parse(content: &str) -> Result<RawParameters> {
    if content.trim().is_empty() {
        return Ok(RawParameters::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

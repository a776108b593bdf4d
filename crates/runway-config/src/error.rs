use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("必須項目 '{field}' が設定されていません (設定ファイルまたは {env} で指定してください)")]
    MissingField { field: &'static str, env: &'static str },

    #[error("項目 '{field}' の値が不正です: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error(
        "オートスケーリングの範囲が不正です: min_size ({min}) が max_size ({max}) より大きくなっています"
    )]
    InvalidBounds { min: u32, max: u32 },

    #[error("設定ファイルが見つかりません: {0}")]
    ConfigFileNotFound(String),

    #[error("設定ファイルの解析に失敗しました: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

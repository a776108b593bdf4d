//! デプロイパラメータのモデルと検証
//!
//! 設定ファイルと環境変数から読み込んだ未検証の値 ([`RawParameters`]) を
//! 検証済みの [`DeploymentParameters`] に変換する。

use crate::error::{ConfigError, Result};
use serde::Deserialize;

pub const ENV_REPOSITORY_URL: &str = "RUNWAY_REPOSITORY_URL";
pub const ENV_BRANCH: &str = "RUNWAY_BRANCH";
pub const ENV_BUILD_COMMAND: &str = "RUNWAY_BUILD_COMMAND";
pub const ENV_START_COMMAND: &str = "RUNWAY_START_COMMAND";
pub const ENV_PORT: &str = "RUNWAY_PORT";
pub const ENV_CONNECTION_NAME: &str = "RUNWAY_CONNECTION_NAME";
pub const ENV_CPU: &str = "RUNWAY_CPU";
pub const ENV_MEMORY: &str = "RUNWAY_MEMORY";
pub const ENV_MAX_CONCURRENCY: &str = "RUNWAY_MAX_CONCURRENCY";
pub const ENV_MIN_SIZE: &str = "RUNWAY_MIN_SIZE";
pub const ENV_MAX_SIZE: &str = "RUNWAY_MAX_SIZE";
pub const ENV_ACCOUNT: &str = "RUNWAY_ACCOUNT";
pub const ENV_REGION: &str = "RUNWAY_REGION";

/// 検証済みのデプロイパラメータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentParameters {
    pub source: SourceSettings,
    pub instance: InstanceSettings,
    pub auto_scaling: AutoScalingBounds,
}

/// ソースリポジトリとビルド設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    pub repository_url: String,
    pub branch: String,
    pub build_command: String,
    pub start_command: String,
    pub port: u16,
    /// App Runner コンソールで事前に作成した接続の名前
    pub connection_name: String,
}

/// インスタンスサイズ (単位はプロバイダー定義の文字列: "1 vCPU", "2 GB" など)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceSettings {
    pub cpu: String,
    pub memory: String,
}

/// オートスケーリングの範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoScalingBounds {
    max_concurrency: u32,
    min_size: u32,
    max_size: u32,
}

impl AutoScalingBounds {
    /// 全て正の整数かつ `min_size <= max_size` であること
    pub fn new(max_concurrency: u32, min_size: u32, max_size: u32) -> Result<Self> {
        for (field, value) in [
            ("auto_scaling.max_concurrency", max_concurrency),
            ("auto_scaling.min_size", min_size),
            ("auto_scaling.max_size", max_size),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidField {
                    field,
                    reason: "正の整数を指定してください".to_string(),
                });
            }
        }

        if min_size > max_size {
            return Err(ConfigError::InvalidBounds {
                min: min_size,
                max: max_size,
            });
        }

        Ok(Self {
            max_concurrency,
            min_size,
            max_size,
        })
    }

    pub fn max_concurrency(&self) -> u32 {
        self.max_concurrency
    }

    pub fn min_size(&self) -> u32 {
        self.min_size
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

/// デプロイ先のアカウント/リージョン
///
/// 未指定の場合はどの環境にもデプロイ可能なテンプレートになる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetEnvironment {
    pub account: Option<String>,
    pub region: Option<String>,
}

impl TargetEnvironment {
    pub fn is_agnostic(&self) -> bool {
        self.account.is_none() && self.region.is_none()
    }
}

/// 設定ファイルのトップレベル構造
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawParameters {
    pub source: RawSource,
    pub instance: RawInstance,
    pub auto_scaling: RawAutoScaling,
    pub environment: TargetEnvironment,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSource {
    pub repository_url: Option<String>,
    pub branch: Option<String>,
    pub build_command: Option<String>,
    pub start_command: Option<String>,
    pub port: Option<i64>,
    pub connection_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawInstance {
    pub cpu: Option<String>,
    pub memory: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawAutoScaling {
    pub max_concurrency: Option<i64>,
    pub min_size: Option<i64>,
    pub max_size: Option<i64>,
}

impl RawParameters {
    /// 環境変数の値で上書きする
    ///
    /// `lookup` は変数名から値を返す関数。通常は [`std::env::var`] を渡す。
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |slot: &mut Option<String>, var: &str| {
            if let Some(value) = lookup(var) {
                *slot = Some(value);
            }
        };

        text(&mut self.source.repository_url, ENV_REPOSITORY_URL);
        text(&mut self.source.branch, ENV_BRANCH);
        text(&mut self.source.build_command, ENV_BUILD_COMMAND);
        text(&mut self.source.start_command, ENV_START_COMMAND);
        text(&mut self.source.connection_name, ENV_CONNECTION_NAME);
        text(&mut self.instance.cpu, ENV_CPU);
        text(&mut self.instance.memory, ENV_MEMORY);
        text(&mut self.environment.account, ENV_ACCOUNT);
        text(&mut self.environment.region, ENV_REGION);

        for (slot, field, var) in [
            (&mut self.source.port, "source.port", ENV_PORT),
            (
                &mut self.auto_scaling.max_concurrency,
                "auto_scaling.max_concurrency",
                ENV_MAX_CONCURRENCY,
            ),
            (&mut self.auto_scaling.min_size, "auto_scaling.min_size", ENV_MIN_SIZE),
            (&mut self.auto_scaling.max_size, "auto_scaling.max_size", ENV_MAX_SIZE),
        ] {
            if let Some(value) = lookup(var) {
                let parsed = value
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| ConfigError::InvalidField {
                        field,
                        reason: format!("整数ではありません: {:?} ({})", value, var),
                    })?;
                *slot = Some(parsed);
            }
        }

        Ok(())
    }

    /// 検証して [`DeploymentParameters`] とデプロイ先環境を返す
    pub fn validate(self) -> Result<(DeploymentParameters, Option<TargetEnvironment>)> {
        let source = SourceSettings {
            repository_url: required(
                self.source.repository_url,
                "source.repository_url",
                ENV_REPOSITORY_URL,
            )?,
            branch: required(self.source.branch, "source.branch", ENV_BRANCH)?,
            build_command: required(
                self.source.build_command,
                "source.build_command",
                ENV_BUILD_COMMAND,
            )?,
            start_command: required(
                self.source.start_command,
                "source.start_command",
                ENV_START_COMMAND,
            )?,
            port: port(self.source.port)?,
            connection_name: required(
                self.source.connection_name,
                "source.connection_name",
                ENV_CONNECTION_NAME,
            )?,
        };

        let instance = InstanceSettings {
            cpu: required(self.instance.cpu, "instance.cpu", ENV_CPU)?,
            memory: required(self.instance.memory, "instance.memory", ENV_MEMORY)?,
        };

        let auto_scaling = AutoScalingBounds::new(
            positive(
                self.auto_scaling.max_concurrency,
                "auto_scaling.max_concurrency",
                ENV_MAX_CONCURRENCY,
            )?,
            positive(self.auto_scaling.min_size, "auto_scaling.min_size", ENV_MIN_SIZE)?,
            positive(self.auto_scaling.max_size, "auto_scaling.max_size", ENV_MAX_SIZE)?,
        )?;

        let environment = TargetEnvironment {
            account: self.environment.account.filter(|s| !s.trim().is_empty()),
            region: self.environment.region.filter(|s| !s.trim().is_empty()),
        };
        let environment = (!environment.is_agnostic()).then_some(environment);

        Ok((
            DeploymentParameters {
                source,
                instance,
                auto_scaling,
            },
            environment,
        ))
    }
}

/// スタック名の長さの上限 (App Runner のオートスケーリング設定名の制約)
pub const STACK_NAME_MAX_LEN: usize = 32;
const STACK_NAME_MIN_LEN: usize = 4;

/// スタック名を検証する
///
/// CloudFormation のスタック名 (`[A-Za-z][A-Za-z0-9-]*`) であり、かつ
/// オートスケーリング設定名としても使える長さ (4〜32 文字) であること。
/// テンプレートのファイル名にも使われるため、パス区切りは通さない。
pub fn validate_stack_name(name: &str) -> Result<()> {
    let invalid = |reason: String| ConfigError::InvalidField {
        field: "stack_name",
        reason,
    };

    let len = name.chars().count();
    if !(STACK_NAME_MIN_LEN..=STACK_NAME_MAX_LEN).contains(&len) {
        return Err(invalid(format!(
            "{}〜{} 文字で指定してください (値: '{}', {} 文字)",
            STACK_NAME_MIN_LEN, STACK_NAME_MAX_LEN, name, len
        )));
    }

    let mut chars = name.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_with_letter || !chars.all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(invalid(format!(
            "英字で始まり、英数字とハイフンのみを含む名前を指定してください (値: '{}')",
            name
        )));
    }

    Ok(())
}

fn required(value: Option<String>, field: &'static str, env: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingField { field, env }),
    }
}

fn positive(value: Option<i64>, field: &'static str, env: &'static str) -> Result<u32> {
    let value = value.ok_or(ConfigError::MissingField { field, env })?;
    if value <= 0 {
        return Err(ConfigError::InvalidField {
            field,
            reason: format!("正の整数を指定してください (値: {})", value),
        });
    }
    u32::try_from(value).map_err(|_| ConfigError::InvalidField {
        field,
        reason: format!("値が大きすぎます: {}", value),
    })
}

fn port(value: Option<i64>) -> Result<u16> {
    let value = positive(value, "source.port", ENV_PORT)?;
    u16::try_from(value).map_err(|_| ConfigError::InvalidField {
        field: "source.port",
        reason: format!("1〜65535 の範囲で指定してください (値: {})", value),
    })
}

pub mod synth;
pub mod validate;

use colored::Colorize;
use runway_config::LoadedConfig;

/// 読み込んだ設定ファイルの表示用文字列
pub fn config_source_line(loaded: &LoadedConfig) -> String {
    match &loaded.source_path {
        Some(path) => format!("設定ファイル: {}", path.display().to_string().cyan()),
        None => format!("設定ファイル: {}", "(なし、環境変数のみ)".dimmed()),
    }
}

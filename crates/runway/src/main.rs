mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "runway")]
#[command(about = "App Runner のスタックを、設定ひとつで。", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// CloudFormation テンプレートを生成
    /// App Runner の接続 ARN を解決してから、スタックを組み立てて出力する
    Synth {
        /// スタック名 (オートスケーリング設定の名前にも使われる)
        #[arg(
            short = 's',
            long = "stack-name",
            env = "RUNWAY_STACK_NAME",
            default_value = runway_cloud_aws::DEFAULT_STACK_NAME
        )]
        stack_name: String,
        /// 出力ディレクトリ
        #[arg(short, long, env = "RUNWAY_OUTPUT", default_value = "runway.out")]
        output: PathBuf,
        /// 接続 ARN の解決に待つ最大秒数
        #[arg(
            long,
            default_value = "30",
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        timeout_secs: u64,
        /// ファイルに書かず、テンプレートを標準出力に表示
        #[arg(long)]
        stdout: bool,
    },
    /// 設定を検証 (AWS には接続しない)
    Validate,
    /// バージョン情報を表示
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout はテンプレート出力に使うため、ログは stderr に出す
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match cli.command {
        Commands::Synth {
            stack_name,
            output,
            timeout_secs,
            stdout,
        } => {
            commands::synth::handle(
                &stack_name,
                &output,
                std::time::Duration::from_secs(timeout_secs),
                stdout,
            )
            .await?;
        }
        Commands::Validate => {
            commands::validate::handle()?;
        }
        Commands::Version => {
            println!("runway {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

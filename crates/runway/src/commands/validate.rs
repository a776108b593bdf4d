use colored::Colorize;

pub fn handle() -> anyhow::Result<()> {
    println!("{}", "設定を検証中...".blue());

    match runway_config::load() {
        Ok(loaded) => {
            println!("{}", super::config_source_line(&loaded));
            println!("{}", "✓ 設定は正常です！".green().bold());
            println!();

            let params = &loaded.params;
            let source = &params.source;
            let bounds = params.auto_scaling;
            println!("サマリー:");
            println!(
                "  リポジトリ: {} ({})",
                source.repository_url.cyan(),
                source.branch
            );
            println!("  接続: {}", source.connection_name.cyan());
            println!("  ビルド: {}", source.build_command);
            println!("  起動: {} (port {})", source.start_command, source.port);
            println!(
                "  インスタンス: {} / {}",
                params.instance.cpu, params.instance.memory
            );
            println!(
                "  オートスケーリング: {}〜{} 台, 同時リクエスト {}",
                bounds.min_size(),
                bounds.max_size(),
                bounds.max_concurrency()
            );
            println!(
                "  デプロイ先: {}",
                runway_cloud_aws::environment_uri(loaded.environment.as_ref())
            );
        }
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ 設定エラー".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

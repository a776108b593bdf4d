use colored::Colorize;
use runway_cloud::ConnectionResolver;
use runway_cloud_aws::{AppRunnerControlPlane, StackPipeline, write_assembly};
use std::path::Path;
use std::time::Duration;

/// 設定の読み込み → 接続 ARN の解決 → 組み立て → テンプレート出力
///
/// 進捗は stderr に出す (`--stdout` 時に stdout をテンプレート専用にするため)
pub async fn handle(
    stack_name: &str,
    output: &Path,
    timeout: Duration,
    to_stdout: bool,
) -> anyhow::Result<()> {
    eprintln!("{}", "スタックを生成中...".blue().bold());

    // 接続前に検証する (不正な設定で AWS を呼ばない)
    let loaded = runway_config::load()?;
    runway_config::validate_stack_name(stack_name)?;
    eprintln!("{}", super::config_source_line(&loaded));
    eprintln!("スタック: {}", stack_name.cyan());

    let environment = loaded.environment.as_ref();
    let region = environment.and_then(|e| e.region.as_deref());

    let control_plane = AppRunnerControlPlane::connect(region).await;
    eprintln!(
        "接続 {} を検索中 (region: {})",
        loaded.params.source.connection_name.cyan(),
        control_plane.region().unwrap_or("default")
    );

    let pipeline =
        StackPipeline::new(ConnectionResolver::new(control_plane).with_timeout(timeout));
    let stack = pipeline.run(&loaded.params, stack_name).await?;
    eprintln!("  {} {}", "✓".green(), stack.connection);

    if to_stdout {
        println!("{}", stack.template.to_json_pretty()?);
        return Ok(());
    }

    tracing::debug!("Writing assembly to {}", output.display());
    let assembly = write_assembly(&stack.template, environment, output).await?;

    eprintln!();
    eprintln!("{}", "✓ テンプレートを生成しました！".green().bold());
    eprintln!("  {}", assembly.template_path.display().to_string().cyan());
    eprintln!("  {}", assembly.manifest_path.display().to_string().cyan());

    let provider_parameter = runway_cloud_aws::synth::SDK_PROVIDER_PARAMETER;
    if stack.template.body["Parameters"]
        .get(provider_parameter)
        .is_some()
    {
        eprintln!();
        eprintln!(
            "{}",
            format!(
                "デプロイ時にパラメータ {} を指定してください",
                provider_parameter
            )
            .yellow()
        );
    }

    Ok(())
}

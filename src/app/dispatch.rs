use crate::app::render;
use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result, bail};
use futures_util::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use uxaudit::Config;
use uxaudit::audit::{
    AuditSession, AuditSettings, Auditor, RetryPolicy, VisualExample, VisualizationSettings,
    VisualizationTask, Visualizer,
};
use uxaudit::llm::{GeminiClient, ModelClient, build_provider_client_with_timeout};
use uxaudit::ui::style;

/// Shared services built once from config.
struct Services {
    auditor: Auditor,
    visualizer: Visualizer,
}

impl Services {
    fn from_config(config: &Config) -> Self {
        let http = build_provider_client_with_timeout(config.models.request_timeout_secs);
        let client: Arc<dyn ModelClient> = Arc::new(GeminiClient::with_http_client(
            config.api_key.as_deref(),
            &config.base_url,
            http,
        ));
        let retry = RetryPolicy::from_config(&config.reliability);

        Self {
            auditor: Auditor::new(
                Arc::clone(&client),
                AuditSettings::from_config(config),
                retry,
            ),
            visualizer: Visualizer::new(client, VisualizationSettings::from_config(config), retry),
        }
    }
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let services = Services::from_config(&config);

    match cli.command {
        Commands::Audit {
            url,
            json,
            visualize_dir,
        } => run_audit(&services, &url, json, visualize_dir.as_deref()).await,
        Commands::Style { url } => {
            let description = services.visualizer.website_style_description(&url).await?;
            println!("{description}");
            Ok(())
        }
        Commands::Visualize { url, point, output } => {
            let example = services.visualizer.visualize(&url, &point).await?;
            write_image(&output, &example).await?;
            println!("{} {}", style::success("✓"), output.display());
            Ok(())
        }
    }
}

async fn run_audit(
    services: &Services,
    url: &str,
    json: bool,
    visualize_dir: Option<&Path>,
) -> Result<()> {
    let session = AuditSession::new(services.auditor.clone());
    let Some(result) = session.run(url).await else {
        bail!("An audit is already in progress");
    };
    let data = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        render::print_report(url, &data);
    }

    if let Some(dir) = visualize_dir {
        let points: Vec<String> = data
            .audit
            .visualizable_points()
            .map(|(_, item)| item.point.clone())
            .collect();
        visualize_all(&services.visualizer, url, &points, dir).await?;
    }

    Ok(())
}

/// Run one visualization per point concurrently. Individual failures are
/// reported and do not abort the others.
async fn visualize_all(
    visualizer: &Visualizer,
    url: &str,
    points: &[String],
    dir: &Path,
) -> Result<()> {
    if points.is_empty() {
        info!("No visualizable improvement points in this report");
        return Ok(());
    }

    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let tasks: Vec<VisualizationTask> = points.iter().map(VisualizationTask::new).collect();
    info!(count = tasks.len(), "Generating visual examples");
    let results = join_all(tasks.iter().map(|task| task.run(visualizer, url))).await;

    eprintln!();
    let mut failures = 0usize;
    for (index, (task, result)) in tasks.iter().zip(results).enumerate() {
        match result {
            Ok(example) => {
                let path: PathBuf = dir.join(format!("{}.jpg", render::file_stem(index, task.point())));
                write_image(&path, &example).await?;
                eprintln!("{} {}", style::success("✓"), path.display());
            }
            Err(err) => {
                failures += 1;
                eprintln!("{} {}: {err}", style::error("✗"), task.point());
            }
        }
    }

    if failures == tasks.len() {
        bail!("All {failures} visual examples failed");
    }
    Ok(())
}

async fn write_image(path: &Path, example: &VisualExample) -> Result<()> {
    let bytes = example
        .decode()
        .context("Image payload is not valid base64")?;
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

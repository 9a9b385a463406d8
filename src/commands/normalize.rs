use anyhow::{Context, Result};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use rabota::assembler::VacancyAssembler;
use rabota::config::Config;
use rabota::pipeline::{load_payloads, BatchPipeline};
use rabota::utils::truncate_text;

pub async fn normalize(
    config: Config,
    input: PathBuf,
    output: Option<PathBuf>,
    workers: Option<usize>,
    full: bool,
) -> Result<()> {
    let payloads = load_payloads(&input)
        .await
        .with_context(|| format!("Failed to load payloads from {}", input.display()))?;

    let mut pipeline_config = config.pipeline.clone();
    if let Some(workers) = workers {
        anyhow::ensure!(workers > 0, "--workers must be greater than 0");
        pipeline_config.workers = workers;
    }

    let assembler = VacancyAssembler::new(Arc::new(config.normalizer));
    let pipeline = BatchPipeline::new(assembler, pipeline_config);
    let outcome = pipeline.run(payloads).await?;

    let records: Vec<Value> = if full {
        outcome
            .vacancies
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<_, _>>()
            .context("Failed to serialize vacancies")?
    } else {
        outcome.vacancies.iter().map(|v| v.to_dict()).collect()
    };
    let rendered = serde_json::to_string_pretty(&records)?;

    match &output {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => println!("{rendered}"),
    }

    let stats = outcome.stats;
    eprintln!("Normalized {} of {} payloads", stats.assembled, stats.total);
    if stats.rejected > 0 {
        eprintln!("  Rejected: {} (see warnings)", stats.rejected);
    }
    for vacancy in outcome.vacancies.iter().take(5) {
        eprintln!("  {}", truncate_text(&vacancy.to_string(), 100));
    }
    if let Some(path) = output {
        eprintln!("Output: {}", path.display());
    }

    Ok(())
}

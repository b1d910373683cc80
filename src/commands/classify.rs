use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use friendlang::config::AppConfig;
use friendlang::crawler::{ClassificationPipeline, RunReport};
use friendlang::storage::{load_ids, RunLayout};
use friendlang::utils::format_elapsed;

pub async fn classify(config_path: &Path, input: &Path, output_dir: Option<PathBuf>) -> Result<()> {
    let mut config = AppConfig::from_file(config_path)
        .with_context(|| format!("Failed to load config file: {}", config_path.display()))?;
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }

    let ids = load_ids(input)
        .await
        .with_context(|| format!("Failed to load steam ids from {}", input.display()))?;

    let pipeline = ClassificationPipeline::from_config(&config).context("Invalid configuration")?;

    println!("Classifying Steam accounts");
    println!("==========================");
    println!("  Accounts: {}", ids.len());
    println!("  Workers: {}", pipeline.worker_count());
    println!(
        "  Thresholds: ru >= {}, chinese >= {}",
        config.min_ru, config.min_chinese
    );

    let layout = RunLayout::timestamped(&config.output_dir);
    let report = pipeline
        .execute(&ids, &layout)
        .await
        .context("Classification run failed")?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    println!("\nCategories:");
    for (category, count) in report.counts.iter() {
        println!("  {:<18} {count}", category.as_str());
    }

    println!("\nWorkers:");
    for worker in &report.workers {
        match &worker.stats {
            Some(stats) => println!(
                "  [{}] assigned {}, classified {}, no friends {}, failed {}, friends skipped {}",
                worker.worker,
                worker.assigned,
                stats.classified,
                stats.no_friends,
                stats.failed,
                stats.friends_skipped
            ),
            None => println!(
                "  [{}] assigned {}, worker panicked",
                worker.worker, worker.assigned
            ),
        }
    }

    println!("\nTime: {}", format_elapsed(report.elapsed));
}

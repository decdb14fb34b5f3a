use anyhow::Context;
use chrono::Utc;
use metaevo::config::ConfigManager;
use metaevo::engines::evaluation::EvaluationHarness;
use metaevo::engines::generation::{LogProgressCallback, MetaOptimizer};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: metaevo <config-file>")?;

    let manager = ConfigManager::new();
    manager.load_from_file(&path)?;
    let config = manager.get();

    let problem = config.meta.build_problem()?;
    let harness = EvaluationHarness::new(problem, config.meta.num_threads)?;
    log::info!("Evaluating candidates on {} threads", harness.num_threads());

    let mut optimizer = MetaOptimizer::new(config.outer.settings(), harness)?;
    let front = optimizer.run(LogProgressCallback::new(config.outer.generations))?;
    let reports = optimizer.reports(&front)?;

    let run_dir = config
        .outer
        .output_dir
        .join(format!("run_{}", Utc::now().format("%Y%m%d_%H%M%S")));
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create {}", run_dir.display()))?;
    manager.save_to_file(run_dir.join("metaevo.toml"))?;

    for (index, report) in reports.iter().enumerate() {
        let file = run_dir.join(format!("configuration_{:03}.json", index));
        report.save(&file)?;
        log::info!("{}: {}", file.display(), report.arguments);
    }

    log::info!(
        "Exported {} non-dominated configurations to {} after {} evaluations",
        reports.len(),
        run_dir.display(),
        optimizer.harness().evaluations()
    );
    Ok(())
}

//! Run command: read, reconcile and export one configured run.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use fluxrec_io::{JsonSource, to_json, write_json};

use crate::cli::RunArgs;
use crate::config::FluxrecConfig;
use crate::convert;

/// Run the pipeline described by the config file.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();
    // 1. Load run TOML
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: FluxrecConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;
    let pipeline_cfg = convert::build_pipeline_config(&config)?;

    // 2. Resolve the data directory next to the config file
    let data_dir = match args.config.parent() {
        Some(base) if config.run.data_dir.is_relative() => base.join(&config.run.data_dir),
        _ => config.run.data_dir.clone(),
    };
    info!(
        data_dir = %data_dir.display(),
        n_series = pipeline_cfg.series().len(),
        n_groups = pipeline_cfg.aggregate().groups().len(),
        "configuration loaded"
    );
    let source = JsonSource::new(data_dir);

    // 3. Reconcile
    let output = fluxrec_pipeline::run(&pipeline_cfg, &source).map_err(|e| {
        let class = e.class();
        anyhow::Error::new(e).context(class)
    })?;
    info!(
        n_series = output.registry().len(),
        n_groups = output.groups().len(),
        nan_cells = output.tensor().nan_value_cells(),
        "pipeline complete"
    );

    // 4. Export
    let tables = output.export();
    match args.output.as_deref().or(config.output.path.as_deref()) {
        Some(path) => write_json(path, &tables)
            .with_context(|| format!("failed to write export: {}", path.display())),
        None => {
            println!("{}", to_json(&tables)?);
            Ok(())
        }
    }
}

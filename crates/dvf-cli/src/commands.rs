use anyhow::{Result, bail};
use tracing::debug;

use dvf_cli::{RunOptions, RunReport, StageProgress, run_etl, run_transform};
use dvf_model::{DateRendering, OutputFormat, PipelineConfig};

use crate::cli::{FormatArg, RunArgs, TransformArgs};

/// Full run: extract, transform, load.
pub fn run(args: &RunArgs, verbose: bool) -> Result<RunReport> {
    let options = RunOptions {
        skip_extract: args.skip_extract,
        skip_load: args.skip_load,
        keep_imported: args.transform.save,
    };
    let mut config = transform_config(&args.transform).with_replace(args.replace).with_verbose(verbose);

    if !options.skip_load {
        let (Some(database), Some(collection)) = (&args.database, &args.collection) else {
            bail!("--db and --collection are required unless --skip-load is given");
        };
        // The import reads the written file.
        config = config.with_target(database, collection).with_save(true);
    }
    debug!(config = %config_json(&config), "Run configuration");

    let progress = StageProgress::new(options.stage_count());
    Ok(run_etl(&config, options, &progress)?)
}

/// Transform only, from an existing source file.
pub fn transform(args: &TransformArgs) -> Result<RunReport> {
    let config = transform_config(args);
    debug!(config = %config_json(&config), "Transform configuration");

    let progress = StageProgress::new(dvf_cli::Stage::TRANSFORM.len());
    Ok(run_transform(&config, &progress)?)
}

fn transform_config(args: &TransformArgs) -> PipelineConfig {
    let format = match args.format {
        FormatArg::Csv => OutputFormat::Csv,
        FormatArg::Json => OutputFormat::Json,
    };
    let rendering = if args.date_envelope {
        DateRendering::DateEnvelope
    } else {
        DateRendering::Iso
    };
    PipelineConfig::new(args.year)
        .with_data_dir(&args.data_dir)
        .with_save(args.save)
        .with_output_format(format)
        .with_date_rendering(rendering)
}

fn config_json(config: &PipelineConfig) -> String {
    serde_json::to_string(config).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}

use anyhow::{Context, Result};
use tracing::{info, info_span};

use formfill_cli::pipeline::{FillOptions, run_pipeline};
use formfill_cli::types::RunReport;
use formfill_model::MappingProfile;
use formfill_pdf::list_fields;

use crate::cli::{FillArgs, InspectArgs};
use crate::summary::print_fields;

pub fn run_fill(args: &FillArgs) -> Result<RunReport> {
    let span = info_span!("fill", input = %args.input.display());
    let _guard = span.enter();

    let profile = match &args.profile {
        Some(path) => MappingProfile::load(path)
            .with_context(|| format!("load profile {}", path.display()))?,
        None => MappingProfile::default(),
    };
    info!(
        fields = profile.fields.len(),
        checkboxes = profile.checkboxes.len(),
        custom = args.profile.is_some(),
        "mapping profile ready"
    );

    let options = FillOptions {
        input: args.input.clone(),
        sheet: args.sheet.clone(),
        template: args.template.clone(),
        output_dir: args.output_dir.clone(),
        profile,
        fail_fast: args.fail_fast,
        dry_run: args.dry_run,
    };
    run_pipeline(&options)
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let fields = list_fields(&args.template)
        .with_context(|| format!("inspect template {}", args.template.display()))?;
    if args.json {
        let json = serde_json::to_string_pretty(&fields).context("serialize field list")?;
        println!("{json}");
    } else {
        print_fields(&fields);
    }
    Ok(())
}

pub fn run_profile() -> Result<()> {
    let toml = MappingProfile::default()
        .to_toml_string()
        .context("render built-in profile")?;
    print!("{toml}");
    Ok(())
}

//! Implementation of the `layerforge new` command.
//!
//! Responsibility: translate CLI arguments into a `ScaffoldRequest`, call the
//! core scaffold service, and display results. No layering rules live here.

use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use layerforge_adapters::{DotnetToolchain, LocalFilesystem};
use layerforge_core::{
    application::{ScaffoldReport, ScaffoldService},
    domain::{ScaffoldPlan, ScaffoldRequest},
    error::LayerforgeError,
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    progress,
};

/// Execute the `layerforge new` command.
///
/// Dispatch sequence:
/// 1. Build the request (flags OR-ed with config defaults) and plan it
/// 2. Early-exit with the plan if `--dry-run`
/// 3. Confirm with the user on an interactive terminal unless `--yes`
/// 4. Preflight the toolchain
/// 5. Execute the plan with progress reporting
/// 6. Print the summary and next steps
#[instrument(skip_all, fields(solution = %args.solution, project = %args.project))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Request + plan
    let request = build_request(&args, &config)?;
    let output_root = resolve_output_root(&args, &config);
    let plan = ScaffoldService::plan(&request, &output_root)?;
    let toolchain = build_toolchain(&args, &config)?;

    debug!(
        request = %request,
        solution_dir = %plan.solution_dir().display(),
        steps = plan.steps().len(),
        "Plan resolved"
    );

    // 2. Dry run: describe but do not touch disk or the toolchain.
    if args.dry_run {
        return show_plan(&plan, &toolchain, &output);
    }

    // 3. Confirm
    if should_confirm(&args, &global, &output) {
        show_configuration(&request, &plan, &toolchain, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 4. Preflight, before any directory exists.
    let version = toolchain.probe(Path::new("."))?;
    info!(program = toolchain.program(), %version, "Toolchain available");

    // 5. Scaffold
    let program = toolchain.program().to_string();
    let service = ScaffoldService::new(Box::new(toolchain), Box::new(LocalFilesystem::new()))
        .with_progress(progress::reporter_for(&output));

    output.header(&format!("Creating solution '{}'...", request.solution()))?;
    let report = service.execute(&plan)?;

    // 6. Report
    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }
    show_report(&report, &program, &output)
}

// ── Request construction ──────────────────────────────────────────────────────

fn build_request(args: &NewArgs, config: &AppConfig) -> CliResult<ScaffoldRequest> {
    ScaffoldRequest::builder()
        .solution(args.solution.as_str())
        .project(args.project.as_str())
        .infrastructure(args.infrastructure || config.defaults.infrastructure)
        .persistence(args.persistence || config.defaults.persistence)
        .build()
        .map_err(|e| CliError::Core(LayerforgeError::from(e)))
}

fn resolve_output_root(args: &NewArgs, config: &AppConfig) -> PathBuf {
    args.output
        .clone()
        .unwrap_or_else(|| config.defaults.output_dir.clone())
}

fn build_toolchain(args: &NewArgs, config: &AppConfig) -> CliResult<DotnetToolchain> {
    let program = args
        .toolchain
        .clone()
        .unwrap_or_else(|| config.toolchain.program.clone());
    let cwd = std::env::current_dir().map_err(|e| CliError::IoError {
        message: "Failed to read the current directory".into(),
        source: e,
    })?;

    Ok(DotnetToolchain::new()
        .with_program(program)
        .resolve_program(&cwd)
        .with_templates(
            config.toolchain.web_api_template.as_str(),
            config.toolchain.class_library_template.as_str(),
        ))
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_plan(plan: &ScaffoldPlan, toolchain: &DotnetToolchain, out: &OutputManager) -> CliResult<()> {
    if out.is_json() {
        out.json(plan)?;
        return Ok(());
    }

    out.info(&format!(
        "Dry run: would run {} steps for '{}' in {}",
        plan.steps().len(),
        plan.solution(),
        plan.solution_dir().display(),
    ))?;

    let width = plan.steps().len().to_string().len();
    for (i, step) in plan.steps().iter().enumerate() {
        out.print(&format!("  {:>width$}. {step}", i + 1))?;
        if let Some(line) = toolchain.describe(step) {
            out.print(&format!("  {:>width$}  $ {line}", ""))?;
        }
    }
    Ok(())
}

fn should_confirm(args: &NewArgs, global: &GlobalArgs, out: &OutputManager) -> bool {
    !args.yes && !global.quiet && !out.is_json() && std::io::stdin().is_terminal()
}

fn show_configuration(
    request: &ScaffoldRequest,
    plan: &ScaffoldPlan,
    toolchain: &DotnetToolchain,
    out: &OutputManager,
) -> CliResult<()> {
    let projects: Vec<&str> = plan.projects().iter().map(|p| p.name.as_str()).collect();

    out.header("Configuration")?;
    out.print(&format!("  Solution:       {}", request.solution()))?;
    out.print(&format!("  Projects:       {}", projects.join(", ")))?;
    out.print(&format!(
        "  Infrastructure: {}",
        yes_no(request.include_infrastructure())
    ))?;
    out.print(&format!(
        "  Persistence:    {}",
        yes_no(request.include_persistence())
    ))?;
    out.print(&format!("  Location:       {}", plan.solution_dir().display()))?;
    out.print(&format!("  Toolchain:      {}", toolchain.program()))?;
    out.print("")?;
    Ok(())
}

fn show_report(report: &ScaffoldReport, program: &str, out: &OutputManager) -> CliResult<()> {
    out.success(&format!(
        "Solution '{}' created with {} projects and {} references",
        report.solution,
        report.projects.len(),
        report.references.len(),
    ))?;

    out.print("")?;
    out.print("References:")?;
    for reference in &report.references {
        out.print(&format!("  {} -> {}", reference.from, reference.to))?;
    }

    out.print("")?;
    out.print("Next steps:")?;
    out.print(&format!("  cd {}", report.solution_dir.display()))?;
    out.print(&format!("  {program} build"))?;
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt("Create this solution?")
        .default(true)
        .interact()
        .map_err(|e| CliError::InvalidInput {
            message: "could not read confirmation".into(),
            source: Some(Box::new(e)),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    Ok(true)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use xform_core::app::{ExecutorBuilder, ExecutorConfig, TransformSummary, TransformerRegistry};
use xform_core::domain::{FileRef, OperationCategory, OperationId};
use xform_core::impls::{CopyTransformer, SplitLinesTransformer};
use xform_core::observability::init_tracing;
use xform_core::TransformFileOperation;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TransformKind {
    Copy,
    Split,
}

impl TransformKind {
    fn registry_name(self) -> &'static str {
        match self {
            TransformKind::Copy => "copy",
            TransformKind::Split => "split",
        }
    }
}

/// Run one transformation per input file and report what each produced.
#[derive(Debug, Parser)]
#[command(name = "xform", version)]
struct Args {
    /// Input files.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[arg(short, long, value_enum, default_value = "copy")]
    transform: TransformKind,

    /// Directory receiving the output files.
    #[arg(short, long, default_value = "xform-out")]
    out_dir: PathBuf,

    /// Lines per chunk for `--transform split`.
    #[arg(long, default_value_t = 100)]
    lines: usize,

    /// JSON executor config; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short = 'j', long)]
    workers: Option<usize>,

    /// Print the summary and operation log as JSON.
    #[arg(long)]
    json: bool,

    /// Default log level when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Serialize)]
struct Report<'a> {
    summary: &'a TransformSummary,
    operations: Vec<xform_core::app::OperationRecord>,
}

fn registry(args: &Args) -> Result<TransformerRegistry> {
    let mut reg = TransformerRegistry::new();
    reg.register("copy", Arc::new(CopyTransformer::new(&args.out_dir)))?;
    reg.register(
        "split",
        Arc::new(SplitLinesTransformer::new(&args.out_dir, args.lines)),
    )?;
    Ok(reg)
}

async fn run(args: Args) -> Result<bool> {
    init_tracing(&args.log_level).context("invalid --log-level")?;

    let config = match &args.config {
        Some(path) => ExecutorConfig::from_file(path)?,
        None => ExecutorConfig::default(),
    };
    let mut builder = ExecutorBuilder::new().config(config);
    if let Some(n) = args.workers {
        builder = builder.max_workers(n);
    }
    let executor = builder.build()?;

    let reg = registry(&args)?;
    let name = args.transform.registry_name();
    let transformer = reg
        .get(name)
        .ok_or_else(|| anyhow!("unknown transform: {name}"))?;

    let operations: Vec<_> = args
        .files
        .iter()
        .map(|path| {
            TransformFileOperation::new(
                FileRef::new(path),
                Arc::clone(&transformer),
                OperationCategory::Transform,
            )
        })
        .collect();

    let root = OperationId::generate();
    let done = executor
        .run_all(Some(root), operations)
        .await
        .context("executor failed")?;

    for op in &done {
        match (op.result(), op.failure()) {
            (Some(files), _) => {
                println!("ok   {} -> {} file(s)", op.file(), files.len());
                for f in files {
                    println!("       {f}");
                }
            }
            (None, Some(failure)) => println!("FAIL {}: {failure}", op.file()),
            (None, None) => println!("skip {}", op.file()),
        }
    }

    let summary = TransformSummary::from_operations(&done);
    if args.json {
        let report = Report {
            summary: &summary,
            operations: executor.log().children_of(root),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "succeeded={} failed={} outputs={}",
            summary.succeeded, summary.failed, summary.outputs
        );
    }
    tracing::debug!(?summary, "all transforms finished");

    Ok(!summary.has_failures())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("xform: {err:#}");
            ExitCode::from(2)
        }
    }
}

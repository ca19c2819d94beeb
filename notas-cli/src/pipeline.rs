//! Ingestion pipeline: read sources, reconcile, merge, then write reports
//!
//! Sources that fail to read are skipped and recorded. Finding no readable
//! source, or sources with different column counts, ends the run before any
//! output is written.

use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::dataset::{MergedDataset, merge};
use crate::diagnostics::Diagnostics;
use crate::error::PipelineError;
use crate::ingest::{load_source, reader_for, source_label};
use crate::report::{
    artifact_file_name, build_display_rows, render_artifact, workbook_file_name, write_artifact,
    write_workbook,
};

/// Which outputs to produce and where
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub output_dir: PathBuf,
    pub write_artifact: bool,
    pub write_workbook: bool,
}

/// Files written by [`generate_reports`]
#[derive(Debug, Clone, Default)]
pub struct ReportOutputs {
    pub artifact: Option<PathBuf>,
    pub workbook: Option<PathBuf>,
}

/// Read every source and merge the readable ones
pub fn load_dataset(paths: &[PathBuf], diagnostics: &mut Diagnostics) -> Result<MergedDataset, PipelineError> {
    let mut sources = Vec::with_capacity(paths.len());
    let mut skipped = Vec::new();

    for path in paths {
        let label = source_label(path);
        let reader = reader_for(path);

        match load_source(path, reader.as_ref()) {
            Ok(source) => {
                if source.header_skipped {
                    diagnostics.info(Some(&label), "header row detected, first row skipped");
                }
                diagnostics.info(
                    Some(&label),
                    format!(
                        "{} records, {} columns",
                        source.row_count(),
                        source.column_count()
                    ),
                );
                sources.push(source);
            }
            Err(err) => {
                diagnostics.warn(Some(&label), format!("skipped: {}", err.reason));
                skipped.push(err);
            }
        }
    }

    if sources.is_empty() {
        diagnostics.error(None, "no valid spreadsheet files could be read");
        return Err(PipelineError::NoValidSources { skipped });
    }

    let dataset = merge(sources).map_err(|err| {
        for shape in &err.sources {
            diagnostics.error(Some(&shape.label), format!("{} columns", shape.column_count));
        }
        diagnostics.error(None, "all files must have the same number of columns");
        PipelineError::from(err)
    })?;

    diagnostics.info(
        None,
        format!(
            "merged {} records from {} files",
            dataset.len(),
            dataset.sources().len()
        ),
    );
    Ok(dataset)
}

/// Write the search page and the workbook for a merged dataset
pub fn generate_reports(
    dataset: &MergedDataset,
    options: &ReportOptions,
    generated_at: &DateTime<Local>,
    diagnostics: &mut Diagnostics,
) -> Result<ReportOutputs, PipelineError> {
    let mut outputs = ReportOutputs::default();

    if options.write_artifact {
        let rows = build_display_rows(dataset);
        let provenance = dataset.provenance();
        let bytes = render_artifact(&rows, &provenance).map_err(|e| PipelineError::ArtifactWrite {
            path: options.output_dir.clone(),
            reason: format!("failed to serialize rows: {}", e),
        })?;

        let name = artifact_file_name(generated_at, provenance.len());
        let path = write_artifact(&options.output_dir, &name, &bytes)?;
        diagnostics.info(None, format!("search page written with {} rows", rows.len()));
        outputs.artifact = Some(path);
    }

    if options.write_workbook {
        let path = options.output_dir.join(workbook_file_name(generated_at));
        write_workbook(dataset, generated_at, &path).map_err(|e| PipelineError::ArtifactWrite {
            path: path.clone(),
            reason: format!("{:#}", e),
        })?;
        diagnostics.info(None, "workbook report written");
        outputs.workbook = Some(path);
    }

    Ok(outputs)
}

/// Load, merge and write reports in one go
pub fn run(
    paths: &[PathBuf],
    options: &ReportOptions,
    diagnostics: &mut Diagnostics,
) -> Result<(MergedDataset, ReportOutputs), PipelineError> {
    let dataset = load_dataset(paths, diagnostics)?;
    let outputs = generate_reports(&dataset, options, &Local::now(), diagnostics)?;
    Ok((dataset, outputs))
}

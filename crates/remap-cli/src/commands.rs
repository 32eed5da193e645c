use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info, warn};

use remap_client::{ClientSettings, DirectorySink, HttpTransport, run_download};
use remap_core::{
    DownloadOutcome, FileId, FileSession, HeaderMapping, HeaderSource, MappingController,
    MappingMessage, compare_headers, csv_filename,
};

use crate::cli::{CompareArgs, ConfigArgs, MergeArgs};
use crate::summary::{format_toast, print_comparison, print_session};

/// What happened while replaying requested mappings against a session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    /// Pairs that were mapped.
    pub applied: usize,
    /// Pairs whose headers were not available, in request order.
    pub skipped: Vec<(String, String)>,
    /// Mappings reverted afterwards.
    pub undone: usize,
}

pub fn run_compare(args: &CompareArgs) -> Result<()> {
    let comparison = compare_headers(&args.guideline, &args.input);
    if args.json {
        let json = serde_json::to_string_pretty(&comparison).context("serialize comparison")?;
        println!("{json}");
    } else {
        print_comparison(&comparison);
    }
    Ok(())
}

pub fn run_merge(args: &MergeArgs, config: Option<&Path>) -> Result<()> {
    let (mut controller, file_id) = build_controller(args)?;

    let mut pairs = match &args.mapping_file {
        Some(path) => read_mapping_file(path)?,
        None => Vec::new(),
    };
    pairs.extend(args.map.iter().cloned());

    let report = replay(&mut controller, &file_id, &pairs, args.undo);
    let session = controller
        .session(&file_id)
        .ok_or_else(|| anyhow!("session for {file_id} disappeared"))?;
    print_session(session, &report);

    if args.dry_run {
        println!("Download name: {}", csv_filename(session.filename()));
        let json = session.payload().to_json().context("serialize payload")?;
        println!("{json}");
        return Ok(());
    }

    let settings = load_settings(config)?.with_overrides(
        args.server.as_deref(),
        args.output_dir.as_deref(),
        args.timeout_secs,
    );
    debug!(server = %settings.server_url, timeout_secs = settings.timeout_secs, "merge settings");
    let transport = HttpTransport::new(&settings).context("configure merge service")?;
    let sink = DirectorySink::new(settings.output_dir());
    let runtime = tokio::runtime::Runtime::new().context("start async runtime")?;
    let outcome = runtime.block_on(run_download(&mut controller, &transport, &sink, &file_id));

    if let Some(toast) = controller.toast() {
        println!("{}", format_toast(toast));
    }
    match outcome {
        Some(DownloadOutcome::Saved { filename }) => {
            println!("Saved {}", sink.dir().join(filename).display());
            Ok(())
        }
        Some(DownloadOutcome::Failed { message }) => Err(anyhow!(message)),
        None => bail!("download for {file_id} was not started"),
    }
}

/// Apply the given overrides to the stored settings and write them back.
/// Returns the settings file path.
pub fn run_config(args: &ConfigArgs, config: Option<&Path>) -> Result<PathBuf> {
    let path = config.map_or_else(ClientSettings::config_path, Path::to_path_buf);
    let settings = load_settings(Some(&path))?.with_overrides(
        args.server.as_deref(),
        args.output_dir.as_deref(),
        args.timeout_secs,
    );
    settings
        .save_to(&path)
        .with_context(|| format!("save settings to {}", path.display()))?;
    info!(path = %path.display(), "settings saved");
    Ok(path)
}

/// Settings from `config`, or the default location; missing files yield defaults.
fn load_settings(config: Option<&Path>) -> Result<ClientSettings> {
    let settings = match config {
        Some(path) if path.exists() => ClientSettings::load_from(path)?,
        Some(_) => ClientSettings::default(),
        None => ClientSettings::load()?,
    };
    Ok(settings)
}

/// Controller holding a single session built from `args`: either compared
/// from `--guideline`/`--input` or taken from the explicit header lists.
pub fn build_controller(args: &MergeArgs) -> Result<(MappingController, FileId)> {
    let file_id = FileId::new(args.file_id.as_str())?;
    let session = if args.guideline.is_empty() {
        FileSession::new(
            file_id.clone(),
            args.filename.as_str(),
            args.extra.clone(),
            args.missing.clone(),
        )?
        .with_presets(args.matched.clone())?
    } else {
        let comparison = compare_headers(&args.guideline, &args.input);
        FileSession::from_comparison(file_id.clone(), args.filename.as_str(), &comparison)?
    };

    let mut controller = MappingController::new();
    controller.register(session)?;
    Ok((controller, file_id))
}

/// Read a JSON object of extra header to missing header, keeping file order.
pub fn read_mapping_file(path: &Path) -> Result<Vec<(String, String)>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read mapping file {}", path.display()))?;
    let mapping: HeaderMapping = serde_json::from_str(&content)
        .with_context(|| format!("parse mapping file {}", path.display()))?;
    Ok(mapping
        .iter()
        .map(|(extra, missing)| (extra.to_string(), missing.to_string()))
        .collect())
}

/// Apply each pair as a drag from the extra list onto the missing list, then
/// press undo `undo` times.
pub fn replay(
    controller: &mut MappingController,
    file_id: &FileId,
    pairs: &[(String, String)],
    undo: usize,
) -> ReplayReport {
    let mut report = ReplayReport::default();

    for (extra, missing) in pairs {
        let before = mapped_count(controller, file_id);
        controller.update(MappingMessage::DragStarted {
            file_id: file_id.clone(),
            header: extra.clone(),
            source: HeaderSource::Extra,
        });
        controller.update(MappingMessage::Dropped {
            file_id: file_id.clone(),
            target: missing.clone(),
            target_source: HeaderSource::Missing,
        });
        controller.update(MappingMessage::DragEnded);

        if mapped_count(controller, file_id) > before {
            report.applied += 1;
        } else {
            warn!(%file_id, %extra, %missing, "mapping skipped, header not available");
            report.skipped.push((extra.clone(), missing.clone()));
        }
    }

    for _ in 0..undo {
        let before = mapped_count(controller, file_id);
        controller.update(MappingMessage::UndoClicked(file_id.clone()));
        if mapped_count(controller, file_id) == before {
            break;
        }
        report.undone += 1;
    }

    info!(
        %file_id,
        applied = report.applied,
        skipped = report.skipped.len(),
        undone = report.undone,
        "replayed mappings"
    );
    report
}

fn mapped_count(controller: &MappingController, file_id: &FileId) -> usize {
    controller
        .session(file_id)
        .map_or(0, |session| session.mapping().len())
}

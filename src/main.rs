use asset_deps::adapters::outbound::cache::CacheLoadStatus;
use asset_deps::adapters::outbound::console::StderrProgressReporter;
use asset_deps::adapters::outbound::filesystem::ManifestAssetSource;
use asset_deps::application::dto::{default_exclude_kinds, AnalysisRequest, OutputFormat};
use asset_deps::application::factories::{
    CacheFactory, CacheType, FormatterFactory, PresenterFactory, PresenterType,
};
use asset_deps::application::read_models::ReportReadModelBuilder;
use asset_deps::application::session::SessionState;
use asset_deps::application::AnalysisService;
use asset_deps::asset_analysis::domain::AssetIdentity;
use asset_deps::cli::Args;
use asset_deps::config::{discover_config, load_config_from_path, ConfigFile};
use asset_deps::ports::inbound::AssetAnalysisPort;
use asset_deps::ports::outbound::ProgressReporter;
use asset_deps::shared::error::{AnalysisError, ExitCode};
use asset_deps::shared::security::validate_regular_file;
use asset_deps::shared::Result;
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

/// Cache store location used when neither the CLI nor the config names one
const DEFAULT_CACHE_RELATIVE_PATH: &str = ".asset-deps/cache.json";

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(ExitCode::InvalidArguments.as_i32());
    }

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

/// Options after merging CLI flags over config values over defaults
#[derive(Debug)]
struct Settings {
    format: OutputFormat,
    request: AnalysisRequest,
    cache_type: CacheType,
    presenter_type: PresenterType,
}

impl Settings {
    fn resolve(args: &Args, config: ConfigFile, manifest_dir: &Path) -> Result<Self> {
        let format = match (args.format, config.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(configured)) => configured
                .parse()
                .map_err(|message| AnalysisError::Validation { message })?,
            (None, None) => OutputFormat::default(),
        };

        let assets = args
            .assets
            .iter()
            .map(|raw| AssetIdentity::new(raw.as_str()))
            .collect::<Result<Vec<_>>>()?;

        let mut request = AnalysisRequest::new(assets).with_find_references(args.find_references);
        if let Some(top) = args.top.or(config.top_referenced) {
            request = request.with_top_referenced(top);
        }
        if let Some(limit) = args.orphan_limit.or(config.orphan_limit) {
            request = request.with_orphan_limit(limit);
        }
        if let Some(jobs) = args.jobs.or(config.max_concurrency) {
            request = request.with_max_concurrency(jobs);
        }
        let exclude_kinds = if !args.exclude.is_empty() {
            args.exclude.clone()
        } else {
            config.exclude_kinds.unwrap_or_else(default_exclude_kinds)
        };
        request = request.with_exclude_kinds(exclude_kinds);
        request.validate()?;

        let cache_type = if args.no_cache {
            CacheType::InMemory
        } else {
            let path = args
                .cache
                .clone()
                .or(config.cache_path)
                .unwrap_or_else(|| manifest_dir.join(DEFAULT_CACHE_RELATIVE_PATH));
            CacheType::JsonFile(path)
        };

        Ok(Self {
            format,
            request,
            cache_type,
            presenter_type: PresenterType::from_output(args.output.clone()),
        })
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    validate_regular_file(&args.manifest, "asset manifest").map_err(|e| {
        AnalysisError::FileReadError {
            path: args.manifest.clone(),
            details: e.to_string(),
        }
    })?;
    let manifest_dir = parent_dir(&args.manifest);

    let config = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(&manifest_dir)?,
    };
    let settings = Settings::resolve(&args, config.unwrap_or_default(), &manifest_dir)?;

    let reporter = Arc::new(StderrProgressReporter::new());
    reporter.report(&format!(
        "📖 Loading asset manifest from: {}",
        args.manifest.display()
    ));
    let source = Arc::new(ManifestAssetSource::from_path(&args.manifest)?);
    reporter.report(&format!("✅ Found {} asset(s)", source.len()));

    let (cache, load_status) = CacheFactory::create(settings.cache_type.clone());
    report_cache_status(reporter.as_ref(), &settings.cache_type, load_status);

    let service = AnalysisService::new(source.clone(), cache, reporter.clone());

    if args.clear_cache {
        service.clear_cache()?;
        reporter.report_completion("🧹 Dependency cache cleared");
        if args.is_clear_only() {
            return Ok(ExitCode::Success);
        }
    }

    let session = service.start_analysis(settings.request)?;
    let state = tokio::select! {
        state = session.wait() => state,
        _ = tokio::signal::ctrl_c() => {
            reporter.report("⏹️  Interrupt received, cancelling analysis...");
            service.cancel();
            session.wait().await
        }
    };

    match state {
        SessionState::Completed(result) => {
            reporter.report(FormatterFactory::progress_message(settings.format));
            let model = ReportReadModelBuilder::new(source.as_ref())
                .build(&result.report)
                .await;
            let formatted = FormatterFactory::create(settings.format).format(&model)?;
            PresenterFactory::create(settings.presenter_type).present(&formatted)?;
            Ok(ExitCode::Success)
        }
        SessionState::Cancelled => {
            eprintln!("{}", "Analysis cancelled; no report was produced.".yellow());
            Ok(ExitCode::AnalysisCancelled)
        }
        SessionState::Failed(reason) => Err(anyhow::anyhow!(reason)),
        other => Err(anyhow::anyhow!(
            "Analysis ended in unexpected state '{}'",
            other.label()
        )),
    }
}

fn report_cache_status(
    reporter: &dyn ProgressReporter,
    cache_type: &CacheType,
    status: Option<CacheLoadStatus>,
) {
    let CacheType::JsonFile(path) = cache_type else {
        return;
    };
    match status {
        Some(CacheLoadStatus::Loaded(count)) => reporter.report(&format!(
            "💾 Loaded {} cached dependency record(s) from {}",
            count,
            path.display()
        )),
        Some(CacheLoadStatus::Discarded(reason)) => reporter.report_error(&format!(
            "⚠️  Warning: Ignoring dependency cache {} ({}); starting cold",
            path.display(),
            reason
        )),
        Some(CacheLoadStatus::Empty) | None => {}
    }
}

/// Directory containing `path`; `.` for a bare file name
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

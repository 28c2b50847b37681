//! scriptgrade: script readability CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use scriptgrade::analyzer::AnalysisEngine;
use scriptgrade::cache::AnalysisCache;
use scriptgrade::config::{
    build_ignore_set, default_config_json, find_project_root, is_ignored, is_script_file,
    load_config, Config, CONFIG_FILENAME,
};
use scriptgrade::history::{append_run, format_delta, load_history, previous_grade, save_history};
use scriptgrade::reporter::{ConsoleReporter, JsonReporter};
use scriptgrade::watcher::ScriptWatcher;
use scriptgrade::ScriptReport;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

/// Files above which analysis runs in parallel by default
const PARALLEL_THRESHOLD: usize = 10;

/// scriptgrade: readability grader for short-form video scripts
#[derive(Parser, Debug)]
#[command(name = "scriptgrade")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Script file or directory to analyze, or "-" for stdin (omit when using a subcommand)
    path: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Maximum average grade (exit 1 if any script is above it)
    #[arg(long, short = 'm', value_name = "GRADE")]
    max_grade: Option<f64>,

    /// Quiet mode (one line per script)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (recommendations and debug logging)
    #[arg(long, short)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Path to config file (default: search .scriptgraderc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Watch for file changes and re-analyze
    #[arg(long)]
    watch: bool,

    /// Disable caching (re-analyze all scripts even if unchanged)
    #[arg(long)]
    no_cache: bool,

    /// Clear the analysis cache before running
    #[arg(long)]
    clear_cache: bool,

    /// Run analysis in parallel (default for directories with many scripts)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .scriptgraderc.json with sensible defaults
    Init {
        /// Maximum average grade (default 3.5)
        #[arg(long)]
        max_grade: Option<f64>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::new()
        .filter_or("SCRIPTGRADE_LOG", default_level)
        .write_style("SCRIPTGRADE_LOG_STYLE");
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    if let Some(cmd) = args.command {
        match cmd {
            Commands::Init { max_grade, dir } => {
                return run_init(max_grade, dir.as_deref());
            }
        }
    }

    let Some(path) = args.path.clone() else {
        anyhow::bail!("a script path is required when not using a subcommand");
    };

    if path == Path::new("-") {
        return run_stdin(&args);
    }

    if args.watch {
        return run_watch(&args, &path);
    }

    let work_dir = work_dir_for(&path);
    let config = load_config(work_dir, args.config.as_deref())?.merge_with_cli(args.max_grade);

    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let script_patterns = config.get_script_patterns();
    let script_files = collect_script_files(&path, ignore_set.as_ref(), &script_patterns)?;

    if script_files.is_empty() {
        eprintln!("{}: No script files found", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }
    log::debug!("Found {} script files", script_files.len());

    let project_root = find_project_root(work_dir).unwrap_or_else(|| work_dir.to_path_buf());
    let mut cache = if args.no_cache {
        AnalysisCache::disabled()
    } else {
        AnalysisCache::new(&project_root)
    };

    if args.clear_cache {
        cache.clear();
        if !args.quiet {
            eprintln!("{}: Cache cleared", "Info".blue());
        }
    }

    if let Some(jobs) = args.jobs {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
        {
            log::warn!("Could not configure {} threads: {}", jobs, e);
        }
    }

    let engine = AnalysisEngine::new();
    let use_parallel = args.parallel || script_files.len() > PARALLEL_THRESHOLD;
    let (reports, had_errors) =
        analyze_files(&engine, &script_files, &mut cache, use_parallel, args.quiet);

    cache.prune_missing();
    if let Err(e) = cache.save() {
        if !args.quiet {
            eprintln!("{}: Failed to save cache: {}", "Warning".yellow(), e);
        }
    }

    if reports.is_empty() {
        eprintln!("{}: All scripts failed to analyze", "Error".red());
        return Ok(ExitCode::from(2));
    }

    let stats = AnalysisEngine::aggregate_stats(&reports);

    if args.json {
        let reporter = JsonReporter::new().pretty();
        if reports.len() == 1 {
            println!("{}", reporter.report(&reports[0]));
        } else {
            println!("{}", reporter.report_with_summary(&reports, &stats));
        }
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        let history = load_history(&project_root);
        for report in &reports {
            let prev = previous_grade(&history, &report.file_path);
            let delta = format_delta(prev, report.analysis.average_grade());
            println!("{}", reporter.render_quiet(report, &delta));
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }

        if reports.len() == 1 {
            reporter.report(&reports[0]);
        } else {
            reporter.report_many(&reports, &stats);
        }
    }

    record_history(&project_root, &reports);

    if check_max_grade(&config, &reports, args.quiet || args.json) {
        return Ok(ExitCode::from(1));
    }

    if had_errors {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Directory used for config and project root discovery
fn work_dir_for(path: &Path) -> &Path {
    if path.is_file() {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    } else {
        path
    }
}

fn run_stdin(args: &Args) -> Result<ExitCode> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read script from stdin")?;

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_config(&cwd, args.config.as_deref())?.merge_with_cli(args.max_grade);

    let report = AnalysisEngine::new().analyze_stdin_text(&content);

    if args.json {
        println!("{}", JsonReporter::new().pretty().report(&report));
    } else if args.quiet {
        ConsoleReporter::new().report_quiet(&report);
    } else if args.verbose {
        ConsoleReporter::new().verbose().report(&report);
    } else {
        ConsoleReporter::new().report(&report);
    }

    let reports = [report];
    if check_max_grade(&config, &reports, args.quiet || args.json) {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

/// Print scripts above their maximum grade. Returns true if any were found.
fn check_max_grade(config: &Config, reports: &[ScriptReport], quiet: bool) -> bool {
    let mut failed = false;
    for report in reports {
        let effective = config.effective_for_file(&report.file_path);
        let grade = report.analysis.average_grade();
        if !effective.exceeds_max_grade(grade) {
            continue;
        }
        failed = true;
        if !quiet {
            if let Some(max) = effective.max_grade {
                eprintln!(
                    "{}: {} grade {:.1} is above maximum {:.1}",
                    "Failed".red().bold(),
                    report.file_path.display(),
                    grade,
                    max
                );
            }
        }
    }
    failed
}

fn record_history(project_root: &Path, reports: &[ScriptReport]) {
    let mut history = load_history(project_root);
    append_run(&mut history, reports);
    if let Err(e) = save_history(project_root, &history) {
        log::warn!("Failed to save history: {:#}", e);
    }
}

fn run_init(max_grade: Option<f64>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let max_grade = max_grade.unwrap_or(scriptgrade::analyzer::scoring::THIRD_GRADE_THRESHOLD);
    std::fs::write(&config_path, default_config_json(max_grade))
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!(
        "{}: Created {} with maxGrade={:.1}",
        "Done".green().bold(),
        config_path.display(),
        max_grade
    );
    Ok(ExitCode::SUCCESS)
}

fn run_watch(args: &Args, path: &Path) -> Result<ExitCode> {
    let work_dir = work_dir_for(path);
    let config = load_config(work_dir, args.config.as_deref())?.merge_with_cli(args.max_grade);
    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let engine = AnalysisEngine::new();
    let mut reporter = ConsoleReporter::new();
    if args.verbose {
        reporter = reporter.verbose();
    }

    let watcher = ScriptWatcher::watch(path, &config.get_script_patterns())
        .context("Failed to create file watcher")?;
    eprintln!("{}: Watching for changes... (Ctrl+C to stop)", "Info".blue());

    loop {
        let changed = watcher.next_changes();
        for script in changed.iter().filter(|p| {
            ignore_set
                .as_ref()
                .map(|set| !is_ignored(p, set))
                .unwrap_or(true)
        }) {
            match engine.analyze_file(script) {
                Ok(report) if args.quiet => reporter.report_quiet(&report),
                Ok(report) => reporter.report(&report),
                Err(e) => eprintln!("{}: {}", "Error".red(), e),
            }
        }
    }
}

fn collect_script_files(
    path: &Path,
    ignore_set: Option<&globset::GlobSet>,
    script_patterns: &[&str],
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if let Some(set) = ignore_set {
            if is_ignored(path, set) {
                return Ok(vec![]);
            }
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let file_path = entry.path();
        if !entry.file_type().is_file() || !is_script_file(file_path, script_patterns) {
            continue;
        }
        if let Some(set) = ignore_set {
            if is_ignored(file_path, set) {
                continue;
            }
        }
        files.push(file_path.to_path_buf());
    }

    // Sort for consistent output
    files.sort();

    Ok(files)
}

/// Analyze files through the engine, then cache the fresh reports
fn analyze_files(
    engine: &AnalysisEngine,
    files: &[PathBuf],
    cache: &mut AnalysisCache,
    parallel: bool,
    quiet: bool,
) -> (Vec<ScriptReport>, bool) {
    let results = if parallel {
        engine.analyze_parallel(files, cache)
    } else {
        engine.analyze_many(files, cache)
    };

    let mut reports = Vec::with_capacity(results.len());
    let mut had_errors = false;
    let mut cache_hits = 0;
    for result in results {
        match result {
            Ok(analysis) => {
                if analysis.from_cache {
                    cache_hits += 1;
                } else {
                    cache.set(
                        &analysis.report.file_path,
                        &analysis.content,
                        analysis.report.clone(),
                    );
                }
                reports.push(analysis.report);
            }
            Err(e) => {
                had_errors = true;
                if !quiet {
                    eprintln!("{}: {}", "Error".red(), e);
                }
            }
        }
    }

    if !quiet && cache_hits > 0 {
        eprintln!(
            "{}: {} scripts from cache, {} analyzed",
            "Cache".blue(),
            cache_hits,
            reports.len() - cache_hits
        );
    }

    (reports, had_errors)
}

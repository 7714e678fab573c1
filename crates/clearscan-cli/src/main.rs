use clap::{Parser, Subcommand};
use clearscan_cli::{determine_output_path, expand_inputs, parse_profile};
use clearscan_core::settings::{load_settings, resolve_settings_path, save_settings};
use clearscan_core::{run_pipeline_with_stats, verbose_println, FilterSettings, SettingsCell};
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Parser)]
#[command(name = "clearscan")]
#[command(version, about = "Grayscale scan denoising and sharpening filter", long_about = None)]
struct Cli {
    /// Enable verbose per-stage diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter scan image(s) and export them as grayscale PNG
    Convert {
        /// Input files or directories
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (default: the platform pictures directory)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Settings file (default: setting.json next to the working directory)
        #[arg(short, long, value_name = "FILE")]
        settings: Option<PathBuf>,

        /// Pipeline profile: minimal, classic, revised, or dual-path
        #[arg(short, long, value_name = "PROFILE", default_value = "classic")]
        profile: String,

        /// Number of parallel threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,
    },

    /// Write a settings file populated with the built-in defaults
    SettingsInit {
        /// Destination file (default: ./setting.json)
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },

    /// Print the resolved settings as JSON
    SettingsShow {
        /// Settings file (default: the usual resolution order)
        #[arg(short, long, value_name = "FILE")]
        settings: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    clearscan_core::config::set_verbose(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            inputs,
            out,
            settings,
            profile,
            threads,
        } => cmd_convert(inputs, out, settings, profile, threads),
        Commands::SettingsInit { path } => cmd_settings_init(path),
        Commands::SettingsShow { settings } => cmd_settings_show(settings),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    inputs: Vec<PathBuf>,
    out: Option<PathBuf>,
    settings_path: Option<PathBuf>,
    profile: String,
    threads: Option<usize>,
) -> Result<(), String> {
    let profile = parse_profile(&profile)?;
    let settings = load_settings(settings_path.as_deref()).map_err(|e| e.to_string())?;
    let cell = SettingsCell::new(settings);

    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("Using {} threads for parallel processing", num_threads);
    }

    let files = expand_inputs(&inputs)?;
    if files.is_empty() {
        return Err("No supported image files found".to_string());
    }

    let date_tag = chrono::Local::now().format("%Y%m%d").to_string();
    verbose_println!("Profile: {}", profile.name());
    println!("Processing {} file(s)...", files.len());

    // Each worker gets its own settings snapshot.
    let snapshot = cell.snapshot();
    let processed_count = AtomicUsize::new(0);
    let total_files = files.len();

    let process = |input: &PathBuf| -> Result<PathBuf, String> {
        let raster = clearscan_core::decode_raster(input).map_err(|e| e.to_string())?;
        verbose_println!(
            "{}: {}x{} pixels",
            input.display(),
            raster.width(),
            raster.height()
        );

        let (filtered, stats) =
            run_pipeline_with_stats(raster, &snapshot, profile).map_err(|e| e.to_string())?;
        verbose_println!(
            "{}: {} stage(s) applied",
            input.display(),
            stats.stages_applied
        );

        let output_path = determine_output_path(input, &out, &date_tag)?;
        clearscan_core::export_png(&filtered, &output_path).map_err(|e| e.to_string())?;

        let count = processed_count.fetch_add(1, Ordering::SeqCst) + 1;
        println!(
            "[{}/{}] Processed: {} -> {}",
            count,
            total_files,
            input.display(),
            output_path.display()
        );

        Ok(output_path)
    };

    let results: Vec<Result<PathBuf, String>> = if files.len() > 1 {
        files.par_iter().map(process).collect()
    } else {
        files.iter().map(process).collect()
    };

    let errors: Vec<(&PathBuf, &String)> = files
        .iter()
        .zip(results.iter())
        .filter_map(|(input, result)| result.as_ref().err().map(|e| (input, e)))
        .collect();

    if errors.is_empty() {
        println!("Done! {} file(s) processed.", total_files);
        Ok(())
    } else {
        eprintln!("\nErrors:");
        for (path, error) in &errors {
            eprintln!("  {}: {}", path.display(), error);
        }
        Err(format!("{} file(s) failed to process", errors.len()))
    }
}

fn cmd_settings_init(path: Option<PathBuf>) -> Result<(), String> {
    let target = path.unwrap_or_else(|| PathBuf::from("setting.json"));
    if target.exists() {
        return Err(format!("Refusing to overwrite {}", target.display()));
    }

    save_settings(&FilterSettings::default(), &target).map_err(|e| e.to_string())?;
    println!("Default settings written to: {}", target.display());
    Ok(())
}

fn cmd_settings_show(settings_path: Option<PathBuf>) -> Result<(), String> {
    match resolve_settings_path(settings_path.as_deref()) {
        Some(path) => println!("Settings file: {}", path.display()),
        None => println!("Settings file: (none found, using defaults)"),
    }

    let settings = load_settings(settings_path.as_deref()).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(&settings)
        .map_err(|e| format!("Failed to serialize settings: {}", e))?;
    println!("{}", json);
    Ok(())
}

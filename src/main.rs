// main.rs - CLI entry point

use std::io::Write;
use std::time::Instant;

use distprune::cli::{validate_args, Args, Config, Invocation};
use distprune::core::DetectorRegistry;
use distprune::pipeline::{self, PruneRequest};
use distprune::{PruneError, VERSION};
use log::info;

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    if let Err(e) = run_main(&argv) {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

fn run_main(argv: &[String]) -> Result<(), PruneError> {
    let mut args = match Args::parse_from(argv)? {
        Invocation::Run(args) => args,
        Invocation::Help(usage) => {
            println!("{}", usage);
            return Ok(());
        }
        Invocation::GenerateConfig => {
            println!("{}", Config::generate_sample());
            println!("💡 Save this content to a .toml file and use --config /path/to/config.toml");
            return Ok(());
        }
        Invocation::ListStrategies => {
            println!("🔧 Available outlier detection strategies:");
            for (name, description) in DetectorRegistry::new().list_detectors() {
                println!("  {:<8} {}", name, description);
            }
            return Ok(());
        }
    };

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    init_logging(args.quiet);
    let command_line = argv.join(" ");

    info!("🚀 distprune v{}", VERSION);
    if let Some(config_path) = &args.config {
        info!("📄 Loaded configuration from: {}", config_path);
    }

    // Validate all arguments before touching any input
    let validation = validate_args(&args)?;
    info!(
        "🧮 Model: {} | Strategy: {} | Cutoff: {}",
        validation.model.description(),
        validation.strategy,
        validation.cutoff
    );

    let request = PruneRequest {
        alignment: args.alignment.clone(),
        cutoff: validation.cutoff,
        prune_output: args.prune_output.clone(),
        model: validation.model,
        strategy: validation.strategy,
        distances: args.distances.clone(),
        format: validation.format,
        report: args.report.clone(),
        command_line: command_line.clone(),
    };

    let total_start = Instant::now();
    let outcome = pipeline::run(&request)?;

    info!("🎉 === DISTPRUNE COMPLETED SUCCESSFULLY ===");
    info!(
        "⏱️  Total execution time: {:.2}s",
        total_start.elapsed().as_secs_f64()
    );
    info!(
        "📊 Alignment: {} sequences × {} columns",
        outcome.sequences, outcome.columns
    );
    if let Some(reference) = &outcome.reference {
        info!("🎯 Reference sequence: {}", reference);
    }
    if outcome.safeguard_triggered {
        info!("⚠️  All-but-one rule applied: every sequence is pruned");
    }
    info!(
        "✂️  {} sequence(s) to prune written to: {}",
        outcome.outliers.len(),
        request.prune_output
    );
    info!("🔧 Command: {}", command_line);

    Ok(())
}

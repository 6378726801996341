use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sensor_docs::config::BuildConfig;
use sensor_docs::generate;

/// Generates the sensor spec sheet PDFs.
///
/// Images are read from `<base-dir>/sensors/{presence,door}`; missing images are skipped. Fonts
/// must be present under `assets/fonts`, a system font directory, or the directory named by
/// `SENSOR_DOCS_FONTS_DIR`.
#[derive(Parser)]
#[command(author, version, about = "Generate the Zigbee sensor spec sheet PDFs")]
struct Cli {
    /// Directory containing the `sensors/` image folders.
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,

    /// Directory the PDFs are written to [default: <base-dir>/output].
    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the presence sensor sheet.
    Presence,

    /// Render the door/window sensor sheet.
    #[command(aliases = ["door-window", "contact"])]
    Door,

    /// Render both sheets (the default).
    #[command(aliases = ["run-all", "both"])]
    All,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = BuildConfig::new(cli.base_dir);
    if let Some(output_dir) = cli.output_dir {
        config = config.with_output_dir(output_dir);
    }

    println!("Generating PDFs for Smart Home Halacha project...");
    let result = match cli.command.unwrap_or(Commands::All) {
        Commands::Presence => generate::generate_presence_sensor_pdf(&config).map(|path| vec![path]),
        Commands::Door => generate::generate_door_sensor_pdf(&config).map(|path| vec![path]),
        Commands::All => generate::generate_all(&config),
    };

    match result {
        Ok(paths) => {
            for path in paths {
                println!("Generated: {}", path.display());
            }
            println!("Done!");
        }
        Err(err) => {
            log::error!("Build failed: {}", err);
            eprintln!("Error: {}", err);
            print_error_sources(&err);
            std::process::exit(1);
        }
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}

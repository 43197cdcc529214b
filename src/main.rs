mod ui;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use egui::Vec2;
use log::{info, warn};
use turismo_bogota::{
    DashboardData, DataPaths, FormValidator, ProfileGroup, ScoringModel, TurismoError,
    config::AppConfig,
    localidades::KpiSummary,
    writer::{self, AnswerSheet},
};
use ui::DashboardApp;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Directory holding the cleaned CSV files
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the dashboard window
    Gui,
    /// Classify a single JSON answer sheet
    Classify {
        #[arg(short, long)]
        answers: PathBuf,
    },
    /// Classify every answer sheet of a JSON-lines file
    Batch {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Load and validate the data set
    Check,
    /// Print crime and tourism KPIs
    Kpi {
        #[arg(short, long)]
        localidad: Option<String>,
    },
}

fn load_config() -> AppConfig {
    match AppConfig::from_local_file() {
        Ok(Some(config)) => config,
        Ok(None) => AppConfig::default(),
        Err(e) => {
            warn!("Ignoring unreadable config file: {}", e);
            AppConfig::default()
        }
    }
}

fn gui(config: AppConfig, data: &DashboardData) -> Result<(), TurismoError> {
    let model = ScoringModel::new();

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options
        .viewport
        .with_title("Turismo Bogotá")
        .with_inner_size(Vec2::new(
            config.window_size.width,
            config.window_size.height,
        ));

    eframe::run_native(
        "Turismo Bogotá",
        native_options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(data, &model, config, cc)))),
    )
    .map_err(|e| TurismoError::GuiError {
        reason: e.to_string(),
    })
}

fn classify(data: &DashboardData, answers: &Path) -> Result<(), TurismoError> {
    let sheet = AnswerSheet::from_json_file(answers)?;
    let model = ScoringModel::new();
    let validator = FormValidator::new(&model, &data.recommendations);
    let result = writer::classify_sheet(1, &sheet, &validator);

    match result.group.as_deref() {
        Some(label) => {
            let group: ProfileGroup = label.parse()?;
            println!("Perfil {}: {}", label, group);
            for recommendation in &result.recommendations {
                println!("  - {}", recommendation);
            }
        }
        None => {
            let progress = result.progress.as_deref().unwrap_or("-");
            println!(
                "{} ({})",
                result.error.as_deref().unwrap_or_default(),
                progress
            );
        }
    }
    Ok(())
}

fn batch(data: &DashboardData, input: &Path, output: &Path) -> Result<(), TurismoError> {
    let count = writer::classify_batch(input, output, &ScoringModel::new(), &data.recommendations)?;
    info!("Wrote {} results to {:?}", count, output);
    println!("{} answer sheets classified", count);
    Ok(())
}

fn check(data: &DashboardData) {
    println!("Points of interest: {}", data.points.len());
    println!("Localidades: {}", data.localidades.len());
    println!("Crime rows: {}", data.crime.len());
    println!("Attraction rows: {}", data.attractions.len());
    for group in ProfileGroup::ALL {
        println!(
            "Recommendations for {} ({}): {}",
            group.label(),
            group,
            data.recommendations.lookup(group).count()
        );
    }
}

fn kpi(data: &DashboardData, localidad: Option<&str>) {
    let summary = KpiSummary::compute(&data.crime, &data.attractions, &data.points);
    match localidad {
        Some(name) => {
            let kpi = summary.for_localidad(name);
            println!("{}", kpi.localidad);
            println!("  Delitos: {}", kpi.crimes);
            println!("  Atractivos turísticos: {}", kpi.attractions);
            match kpi.average_price {
                Some(price) => println!("  Precio promedio: {:.1}", price),
                None => println!("  Precio promedio: sin datos"),
            }
        }
        None => {
            println!("Delitos: {}", summary.total_crimes);
            println!("Atractivos turísticos: {}", summary.total_attractions);
            for (name, total) in &summary.crimes_by_localidad {
                println!("  {:<24} {}", name, total);
            }
        }
    }
}

fn run(cli: &Args) -> Result<(), TurismoError> {
    let config = load_config();
    let paths = match &cli.data_dir {
        Some(dir) => DataPaths::in_dir(dir),
        None => config.data_paths(),
    };
    let data = DashboardData::load(&paths)?;

    match &cli.command {
        Commands::Gui => gui(config, &data),
        Commands::Classify { answers } => classify(&data, answers),
        Commands::Batch { input, output } => batch(&data, input, output),
        Commands::Check => {
            check(&data);
            Ok(())
        }
        Commands::Kpi { localidad } => {
            kpi(&data, localidad.as_deref());
            Ok(())
        }
    }
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    if let Err(e) = ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    }) {
        warn!("Could not set Ctrl-C handler: {}", e);
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

use clap::{Parser, Subcommand};
use importer::{ImportOptions, RosterFile, RosterImporter, RosterValidator};
use sqlx::postgres::PgPoolOptions;
use std::path::{Path, PathBuf};
use storage::{
    repository::player::PlayerRepository,
    services::duplicates::{DEFAULT_SIMILARITY_THRESHOLD, find_duplicate_pairs},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "handball-import")]
#[command(about = "Handball club roster importer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a single roster JSON file
    Roster {
        file: PathBuf,

        #[arg(long)]
        validate_only: bool,

        #[command(flatten)]
        matching: MatchingArgs,
    },
    /// Import every roster JSON file in a directory and its subdirectories
    Bulk {
        #[arg(long, default_value = "./imports")]
        directory: PathBuf,

        #[arg(long)]
        validate_only: bool,

        #[command(flatten)]
        matching: MatchingArgs,
    },
    /// List stored players that look like the same person
    Duplicates {
        #[arg(long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
        threshold: f64,
    },
}

#[derive(clap::Args)]
struct MatchingArgs {
    /// Reuse existing players with a similar (not identical) name
    #[arg(long)]
    link_similar: bool,

    #[arg(long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    threshold: f64,
}

impl MatchingArgs {
    fn options(&self) -> Result<ImportOptions, String> {
        check_threshold(self.threshold)?;
        Ok(ImportOptions {
            link_similar: self.link_similar,
            similarity_threshold: self.threshold,
        })
    }
}

fn check_threshold(threshold: f64) -> Result<(), String> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(format!("threshold must be between 0 and 1, got {}", threshold))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("import={},importer={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Roster {
            file,
            validate_only,
            matching,
        } => {
            handle_roster_import(&file, validate_only, matching.options()?, &cli.database_url)
                .await?;
        }
        Commands::Bulk {
            directory,
            validate_only,
            matching,
        } => {
            handle_bulk_import(
                &directory,
                validate_only,
                matching.options()?,
                &cli.database_url,
            )
            .await?;
        }
        Commands::Duplicates { threshold } => {
            check_threshold(threshold)?;
            handle_duplicates(threshold, &cli.database_url).await?;
        }
    }

    Ok(())
}

async fn connect(database_url: &str) -> Result<sqlx::PgPool, sqlx::Error> {
    tracing::info!("Connecting to database...");
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

async fn load_roster(file: &Path) -> Result<RosterFile, Box<dyn std::error::Error>> {
    let json_content = tokio::fs::read_to_string(file).await?;
    let roster: RosterFile = serde_json::from_str(&json_content)?;
    Ok(roster)
}

async fn handle_roster_import(
    file: &Path,
    validate_only: bool,
    options: ImportOptions,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Loading roster JSON from: {}", file.display());

    let roster = load_roster(file).await?;

    tracing::info!(
        "Loaded roster: {} / {} ({} teams, {} players)",
        roster.club.name,
        roster.season.name,
        roster.teams.len(),
        roster.player_count()
    );

    tracing::info!("Validating roster...");
    let validation_report = RosterValidator::validate(&roster)?;
    validation_report.log_warnings();
    tracing::info!("Validation successful");

    if validate_only {
        return Ok(());
    }

    let pool = connect(database_url).await?;

    let summary = RosterImporter::new(&pool, options)
        .import_to_database(&roster)
        .await?;
    summary.log();

    tracing::info!("Import completed successfully");

    Ok(())
}

async fn handle_bulk_import(
    directory: &Path,
    validate_only: bool,
    options: ImportOptions,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Scanning directory for roster JSON files: {}", directory.display());

    let json_files = collect_json_files(directory).await?;

    if json_files.is_empty() {
        tracing::warn!("No JSON files found in {}", directory.display());
        return Ok(());
    }

    tracing::info!("Found {} roster JSON file(s)", json_files.len());

    let pool = if validate_only {
        None
    } else {
        Some(connect(database_url).await?)
    };

    let mut success_count = 0;
    let mut error_count = 0;

    for (idx, file_path) in json_files.iter().enumerate() {
        tracing::info!("[{}/{}] Processing: {}", idx + 1, json_files.len(), file_path.display());

        match process_roster_file(file_path, options, pool.as_ref()).await {
            Ok(()) => {
                success_count += 1;
                tracing::info!("  Success");
            }
            Err(e) => {
                error_count += 1;
                tracing::error!("  Error: {}", e);
            }
        }
    }

    tracing::info!("Summary: {} succeeded, {} failed", success_count, error_count);

    if error_count > 0 {
        return Err(format!("{} file(s) failed to import", error_count).into());
    }

    Ok(())
}

async fn collect_json_files(directory: &Path) -> std::io::Result<Vec<PathBuf>> {
    let is_json = |path: &Path| path.extension().is_some_and(|ext| ext == "json");

    let mut json_files = Vec::new();
    let mut entries = tokio::fs::read_dir(directory).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_dir() {
            let mut sub_entries = tokio::fs::read_dir(&path).await?;
            while let Some(sub_entry) = sub_entries.next_entry().await? {
                let sub_path = sub_entry.path();
                if is_json(&sub_path) {
                    json_files.push(sub_path);
                }
            }
        } else if is_json(&path) {
            json_files.push(path);
        }
    }

    json_files.sort();
    Ok(json_files)
}

async fn process_roster_file(
    file_path: &Path,
    options: ImportOptions,
    pool: Option<&sqlx::PgPool>,
) -> Result<(), Box<dyn std::error::Error>> {
    let roster = load_roster(file_path).await?;

    let validation_report = RosterValidator::validate(&roster)?;
    for warning in &validation_report.warnings {
        tracing::warn!("  {}", warning);
    }

    if let Some(pool) = pool {
        let summary = RosterImporter::new(pool, options)
            .import_to_database(&roster)
            .await?;
        summary.log();
    }

    Ok(())
}

async fn handle_duplicates(
    threshold: f64,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect(database_url).await?;

    let players = PlayerRepository::new(&pool).list_all().await?;
    let pairs = find_duplicate_pairs(&players, threshold);

    if pairs.is_empty() {
        tracing::info!(
            "No likely duplicates among {} players (threshold {:.2})",
            players.len(),
            threshold
        );
        return Ok(());
    }

    tracing::info!("{} likely duplicate pair(s):", pairs.len());
    for pair in &pairs {
        tracing::info!(
            "  {:.2}  '{}' (#{}, {})  ~  '{}' (#{}, {}){}",
            pair.similarity,
            pair.first.name,
            pair.first.number,
            pair.first.player_id,
            pair.second.name,
            pair.second.number,
            pair.second.player_id,
            if pair.same_number { "  same number" } else { "" }
        );
    }

    Ok(())
}

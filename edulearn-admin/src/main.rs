//! Admin commands for the training databases.
//!
//! `edulearn-admin seed [--sandbox]` creates the demo accounts and courses.
//! `edulearn-admin sync` rebuilds the sandbox database from the primary one.

use clap::{Parser, Subcommand};
use edulearn::{prepare_primary, sandbox, seed_demo_data, store, sync_sandbox, Settings};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "edulearn-admin", version, about = "Seed and sync the EduLearn databases")]
struct Cli {
    /// Primary store URL.
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    /// Sandbox database file.
    #[arg(long, env = "SANDBOX_DATABASE_PATH", global = true)]
    sandbox_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create demo accounts (admin, john.doe, jane.smith) and courses. Safe to re-run.
    Seed {
        /// Seed the sandbox database's copy of the primary tables as well.
        #[arg(long)]
        sandbox: bool,
    },
    /// Delete the sandbox database, rebuild it, and copy every primary row into it.
    Sync,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("edulearn=info,edulearn_admin=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::from_env()?;
    if let Some(url) = cli.database_url {
        settings.database_url = url;
    }
    if let Some(path) = cli.sandbox_path {
        settings.sandbox_path = path;
    }

    let primary = store::connect(&settings.database_url).await?;
    match cli.command {
        Command::Seed { sandbox: with_sandbox } => {
            prepare_primary(&primary).await?;
            tracing::info!(database = %settings.database_url, "primary database seeded");
            if with_sandbox {
                let pool = sandbox::provision(&settings.sandbox_path).await?;
                seed_demo_data(&pool).await?;
                pool.close().await;
                tracing::info!(path = %settings.sandbox_path.display(), "sandbox database seeded");
            }
            println!("Test accounts:");
            println!("  admin      / admin123   (admin)");
            println!("  john.doe   / john123    (student)");
            println!("  jane.smith / jane456    (instructor)");
        }
        Command::Sync => {
            store::ensure_tables(&primary).await?;
            let report = sync_sandbox(&primary, &settings.sandbox_path).await?;
            println!("Synced into {}:", settings.sandbox_path.display());
            println!("  users:       {}", report.users);
            println!("  courses:     {}", report.courses);
            println!("  enrollments: {}", report.enrollments);
            println!("  assignments: {}", report.assignments);
            println!("  comments:    {}", report.comments);
        }
    }
    primary.close().await;
    Ok(())
}

//! Larder CLI - migrations, account management and offline imports.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! larder migrate
//!
//! # Create a back-office account (password from LARDER_ADMIN_PASSWORD)
//! larder admin create -u priya -e priya@larder.example -r admin
//!
//! # Import a price list and print the report
//! larder import price-list.xlsx
//! larder import price-list.csv --dry-run
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "larder")]
#[command(author, version, about = "Larder CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Import products from a spreadsheet or CSV file
    Import {
        /// File to import (.xlsx, .xls, .ods, .csv, .tsv)
        file: PathBuf,

        /// Map rows against current categories without writing anything
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Contact email address
        #[arg(short, long)]
        email: Option<String>,

        /// Admin role (`admin`, `viewer`)
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                username,
                email,
                role,
            } => {
                commands::admin::create_user(&username, email.as_deref(), &role).await?;
            }
        },
        Commands::Import { file, dry_run } => commands::import::run(&file, dry_run).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_import_dry_run() {
        let cli = Cli::try_parse_from(["larder", "import", "list.csv", "--dry-run"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Import { dry_run: true, .. })
        ));
    }

    #[test]
    fn test_parse_admin_create_defaults_role() {
        let cli = Cli::try_parse_from(["larder", "admin", "create", "-u", "priya"]);
        let Ok(Cli {
            command: Commands::Admin {
                action: AdminAction::Create { username, email, role },
            },
        }) = cli
        else {
            panic!("expected admin create");
        };
        assert_eq!(username, "priya");
        assert_eq!(email, None);
        assert_eq!(role, "admin");
    }
}

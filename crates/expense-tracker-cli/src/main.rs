use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use expense_tracker_cli::create_user;
use expense_tracker_config::DatabaseConfig;
use expense_tracker_db::{PgPool, init_db_pool, migrator};

#[derive(Parser)]
#[command(name = "expense-tracker-cli")]
#[command(about = "Expense Tracker CLI - migrations and account administration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply all pending migrations
    Migrate,
    /// Revert the most recently applied migrations
    Rollback {
        /// Number of migrations to revert
        #[arg(short = 's', long, default_value = "1")]
        steps: usize,
    },
    /// Show every migration and whether it has been applied
    Status,
    /// Create a user account
    CreateUser {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&config)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Migrate => handle_migrate(&pool).await,
        Commands::Rollback { steps } => handle_rollback(&pool, steps).await,
        Commands::Status => handle_status(&pool).await,
        Commands::CreateUser {
            name,
            email,
            password,
        } => handle_create_user(&pool, name, email, password).await,
    }
}

async fn handle_migrate(pool: &PgPool) -> anyhow::Result<()> {
    migrator::run_migrations(pool).await?;
    println!("✅ Migrations applied");
    Ok(())
}

async fn handle_rollback(pool: &PgPool, steps: usize) -> anyhow::Result<()> {
    let reverted = migrator::rollback(pool, steps).await?;

    if reverted.is_empty() {
        println!("Nothing to roll back");
    }
    for version in reverted {
        println!("↩️  Rolled back {}", version);
    }
    Ok(())
}

async fn handle_status(pool: &PgPool) -> anyhow::Result<()> {
    for status in migrator::migration_status(pool).await? {
        let marker = if status.applied { "applied" } else { "pending" };
        println!("{:<16} {:<8} {}", status.version, marker, status.description);
    }
    Ok(())
}

async fn handle_create_user(
    pool: &PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let user = create_user(pool, &name, &email, &password).await?;

    println!("\n✅ User created successfully!");
    println!("   ID: {}", user.id);
    println!("   Email: {}", user.email);
    println!("   Name: {}", user.name);
    Ok(())
}

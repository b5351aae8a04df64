use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use schoolhub_cli::admin::create_admin;
use schoolhub_cli::seeder::{self, SeedConfig};
use schoolhub_db::{PgPool, init_db_pool};

#[derive(Parser)]
#[command(name = "schoolhub-cli")]
#[command(about = "SchoolHub CLI - Administrative tools for SchoolHub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create a new administrator account
    CreateAdmin {
        /// First name of the admin
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name of the admin
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake teachers, parents, classes and students
    Seed {
        /// Number of teachers to create
        #[arg(long, default_value = "8")]
        teachers: usize,

        /// Number of parents to create
        #[arg(long, default_value = "40")]
        parents: usize,

        /// Number of classes to create
        #[arg(short = 'c', long, default_value = "6")]
        classes: usize,

        /// Number of students per class
        #[arg(long, default_value = "20")]
        students: usize,
    },
    /// Clear all seeded data (keeps real accounts)
    ClearSeed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Migrate => handle_migrate(&pool).await,
        Commands::CreateAdmin {
            first_name,
            last_name,
            email,
            password,
        } => handle_create_admin(&pool, first_name, last_name, email, password).await,
        Commands::Seed {
            teachers,
            parents,
            classes,
            students,
        } => {
            let config = SeedConfig {
                teachers,
                parents,
                classes,
                students_per_class: students,
            };
            seeder::seed_all(&pool, config)
                .await
                .context("Error seeding database")
                .map(|_| ())
        }
        Commands::ClearSeed => {
            let removed = seeder::clear_seeded_data(&pool)
                .await
                .context("Error clearing seeded data")?;
            println!("✅ Cleared {} seeded accounts", removed);
            Ok(())
        }
    }
}

async fn handle_migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;

    println!("✅ Migrations applied");
    Ok(())
}

async fn handle_create_admin(
    pool: &PgPool,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let first_name = match first_name {
        Some(v) => v,
        None => Input::<String>::new().with_prompt("First name").interact_text()?,
    };

    let last_name = match last_name {
        Some(v) => v,
        None => Input::<String>::new().with_prompt("Last name").interact_text()?,
    };

    let email = match email {
        Some(v) => v,
        None => Input::<String>::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(v) => v,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    create_admin(pool, &first_name, &last_name, &email, &password)
        .await
        .context("Error creating admin")?;

    println!("\n✅ Admin created successfully!");
    println!("   Email: {}", email);
    println!("   Name: {} {}", first_name, last_name);

    Ok(())
}

use anyhow::Context;
use campusgate_config::AccessConfig;
use campusgate_core::permissions::AccessPermission;
use campusgate_core::{AccessPolicy, PermissionStore, load_allowed_paths};
use campusgate_db::{PgPermissionLookup, grant_permission, init_db_pool};
use clap::{Parser, Subcommand};
use dialoguer::Input;
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "campusgate-cli")]
#[command(about = "Campusgate CLI - Inspect and manage page permissions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Print the allowed page paths derived for a role
    Paths {
        /// Role name or id (prompted if not provided)
        #[arg(short = 'r', long)]
        role: Option<String>,
    },
    /// Check whether a role may open a page path
    Check {
        /// Role name or id (prompted if not provided)
        #[arg(short = 'r', long)]
        role: Option<String>,

        /// Page path, e.g. /admin/daily/attendance
        path: String,
    },
    /// Grant an access_* permission to a role
    Grant {
        /// Role name (prompted if not provided)
        #[arg(short = 'r', long)]
        role: Option<String>,

        /// Permission name, e.g. access_admin_daily_attendance
        #[arg(short = 'p', long)]
        permission: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let pool = init_db_pool().await?;
    let access_config = AccessConfig::from_env();

    match cli.command {
        Commands::Migrate => {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            println!("Migrations applied");
        }
        Commands::Paths { role } => {
            let role = resolve_role(role)?;
            let lookup = PgPermissionLookup::new(pool);
            let paths = load_allowed_paths(&lookup, &role, access_config.fetch_timeout).await?;

            if paths.is_empty() {
                println!("Role '{}' has no page access", role);
            }
            for path in paths {
                println!("{}", path);
            }
        }
        Commands::Check { role, path } => {
            let role = resolve_role(role)?;
            let lookup = PgPermissionLookup::new(pool);
            let paths = load_allowed_paths(&lookup, &role, access_config.fetch_timeout).await?;

            let mut store = PermissionStore::new();
            store.set_permissions(&paths);

            let policy = AccessPolicy::new(access_config.bypass_segments.iter().cloned());
            let state = policy.evaluate(Some(&store), &path);
            println!("{} {} for role '{}'", path, state.as_str(), role);
        }
        Commands::Grant { role, permission } => {
            let role = resolve_role(role)?;

            let Some(parsed) = AccessPermission::parse(&permission) else {
                anyhow::bail!(
                    "'{}' is not a page permission (expected access_<segment>[_<segment>...])",
                    permission
                );
            };

            let inserted = grant_permission(&pool, &role, &permission)
                .await
                .context("Failed to grant permission")?;

            if inserted {
                println!(
                    "Granted {} to '{}' ({} and {})",
                    permission,
                    role,
                    parsed.full_path(),
                    parsed.root_path()
                );
            } else {
                println!("'{}' already has {}", role, permission);
            }
        }
    }

    Ok(())
}

fn resolve_role(role: Option<String>) -> anyhow::Result<String> {
    match role {
        Some(role) => Ok(role),
        None => Input::new()
            .with_prompt("Role")
            .interact_text()
            .context("Failed to read role"),
    }
}

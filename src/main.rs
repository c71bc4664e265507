use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use urlaub::config::Config;
use urlaub::db::init_db;
use urlaub::docs::ApiDoc;
use urlaub::store::mysql::MySqlStore;
use urlaub::{auth, holidays, routes};

use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[derive(Parser)]
#[command(name = "urlaub", version, about = "Vacation and leave management service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Write German states and their public holidays into the database
    SeedHolidays {
        /// First year to generate
        #[arg(long, env = "HOLIDAY_SEED_FROM")]
        from: Option<i32>,
        /// Year to stop before
        #[arg(long, env = "HOLIDAY_SEED_TO")]
        to: Option<i32>,
    },
    /// Print a bearer token for an employee
    IssueToken {
        #[arg(long)]
        employee_id: u64,
        #[arg(long)]
        username: String,
    },
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::SeedHolidays { from, to } => {
            let from = from.unwrap_or(config.holiday_seed_from);
            let to = to.unwrap_or(config.holiday_seed_to);
            seed_holidays(&config, from, to).await
        }
        Command::IssueToken {
            employee_id,
            username,
        } => {
            let token = auth::jwt::generate_access_token(
                employee_id,
                username,
                &config.jwt_secret,
                config.access_token_ttl,
            )
            .context("Failed to sign token")?;
            println!("{token}");
            Ok(())
        }
    }
}

async fn seed_holidays(config: &Config, from: i32, to: i32) -> anyhow::Result<()> {
    if from >= to {
        bail!("empty year range {from}..{to}");
    }

    let store = MySqlStore::new(init_db(&config.database_url).await?);
    info!(from, to, "Seeding holidays");

    let report = holidays::seed_germany(&store, from..to).await?;
    info!(
        subdivisions = report.subdivisions,
        generated = report.generated,
        inserted = report.inserted,
        "Holiday seeding finished"
    );
    println!(
        "{} subdivisions, {} holidays generated, {} new",
        report.subdivisions, report.generated, report.inserted
    );
    Ok(())
}

async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Server starting...");

    let store = MySqlStore::new(init_db(&config.database_url).await?);
    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(store.clone()))
            .app_data(Data::new(config.clone()))
            .configure(|cfg| routes::configure(cfg, &config))
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run()
    .await?;

    Ok(())
}

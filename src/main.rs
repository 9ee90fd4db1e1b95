//! PDI engine boot check
//!
//! Loads configuration, initialises logging, builds an in-memory engine and
//! imports the configured seed templates, printing them as JSON.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pdi_engine::{config::AppConfig, models::TemplateQuery, Engine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("pdi_engine={}", config.logging.level).into());

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting PDI engine v{}", env!("CARGO_PKG_VERSION"));

    let seed_file = config.seed.templates_file.clone();
    let engine = Engine::in_memory(config);

    match seed_file {
        Some(path) => {
            let imported = engine.services.templates.import_file(&path).await?;
            tracing::info!("Imported {} template(s) from {}", imported.len(), path);
        }
        None => tracing::info!("No seed templates configured"),
    }

    let templates = engine.list_templates(&TemplateQuery::default()).await?;
    for template in &templates {
        tracing::info!(
            "Template '{}' v{}: {} section(s), {} item(s), {} required",
            template.name,
            template.version,
            template.sections.len(),
            template.item_count(),
            template.required_item_count()
        );
    }
    println!("{}", serde_json::to_string_pretty(&templates)?);

    Ok(())
}

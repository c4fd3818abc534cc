//! Anatomy Engine - Main entry point.
//!
//! Loads body part content, reports problems, and prints the registry.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use anatomy_engine::infrastructure::settings::EngineConfig;
use anatomy_engine::App;

fn main() -> anyhow::Result<()> {
    // Load environment from repo root, then the working directory.
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anatomy_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Anatomy Engine");

    let config = EngineConfig::from_env();
    let strict = config.strict;
    let mut app = App::new(config).context("failed to set up translations")?;
    let report = app.load_content();

    print_registry(&app);

    if strict && !report.is_clean() {
        anyhow::bail!(
            "content has {} load error(s) and {} consistency issue(s)",
            report.errors.len(),
            report.issues.len()
        );
    }
    Ok(())
}

fn print_registry(app: &App) {
    let tr = app.translator.as_ref();
    println!(
        "{:<10} {:<8} {:<6} {:<10} {:<10} name",
        "id", "token", "side", "main", "opposite"
    );
    for part in app.body_parts.factory().all() {
        println!(
            "{:<10} {:<8} {:<6} {:<10} {:<10} {}",
            part.id.as_str(),
            part.token.to_string(),
            part.part_side.as_str(),
            part.main_part.as_str(),
            part.opposite_part.as_str(),
            tr.translate(&part.name)
        );
    }
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    let _ = dotenvy::dotenv();
}

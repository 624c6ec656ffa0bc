mod app;
use mythos_atlas::*;

use app::AtlasApp;
use config::AtlasConfig;
use database::Database;
use database::repository::load_progress;
use export::json::import_reference_data;
use models::calendar::{Clock, SystemClock};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AtlasConfig::load(&AtlasConfig::default_path())?;
    let db = Database::open(&config.database_path)?;
    log::info!("Opened database at {}", config.database_path.display());

    let reference = match &config.reference_data {
        Some(path) => import_reference_data(path)?,
        None => ReferenceData::builtin(),
    };

    let clock: Box<dyn Clock> = if config.simulated_clock {
        log::info!("Using simulated date {}", db.today());
        Box::new(db.clone())
    } else {
        Box::new(SystemClock)
    };

    let progress = load_progress(&db, &config.progress_storage_key);
    let engine = ReviewEngine::new(
        db.clone(),
        clock,
        reference,
        config.review_storage_key.clone(),
    );
    log::info!(
        "Loaded progress: {} deities viewed, {} stories read",
        progress.deities_viewed.len(),
        progress.stories_read.len()
    );

    let app = AtlasApp::new(db, engine, progress, &config);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([560.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Mythos Atlas",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )?;
    Ok(())
}

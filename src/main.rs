//! Marshmallow Roast entry point
//!
//! Loads settings and assets, opens the audio device and runs the game loop.
//! Any startup failure is fatal and reported with a non-zero exit code.

use anyhow::Context;

use marshmallow_roast::Settings;
use marshmallow_roast::app;
use marshmallow_roast::assets::Assets;
use marshmallow_roast::audio::AudioManager;

fn main() -> anyhow::Result<()> {
    // Allows the setting of the log level through RUST_LOG env var.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Marshmallow Roast starting...");

    let settings = Settings::load();
    log::debug!("Settings: {:?}", settings);

    let assets = Assets::load(&settings.asset_dir, settings.music.as_deref())
        .context("failed to load assets")?;

    let mut audio = AudioManager::new(&settings).context("failed to open audio output")?;
    audio
        .start_music(&assets.sounds)
        .context("failed to start background music")?;

    app::run(settings, assets, audio)?;
    log::info!("Goodbye");
    Ok(())
}

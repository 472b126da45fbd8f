use log::*;

use leveled::config::Config;
use leveled::document::Document;

fn main() {
    // Init logging
    env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting {} v{}.", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    // User config not directly related to the model (device preset,
    // background, current path type).
    let config = Config::load();
    // First run writes the defaults out so the file exists to edit.
    config.save();

    // Start from an old-format level file when one is given, otherwise
    // from an empty session.
    let document = match std::env::args().nth(1) {
        Some(filename) => {
            info!("Importing legacy level data from {:?}.", filename);
            Document::import_legacy(&filename, &config)
        },
        None => Document::empty(&config),
    };

    println!("{}", document.level_text());
}

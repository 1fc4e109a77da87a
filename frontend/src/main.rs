use log::{error, info};

use marketing_site::config;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting site script");
    if let Err(e) = marketing_site::start() {
        error!("site script failed to start: {}", e);
    }
}

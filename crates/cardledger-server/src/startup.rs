//! Server startup utilities.

use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r#"
   ______               ____          __
  / ____/___ __________/ / /__  ____/ /___ ____  _____
 / /   / __ `/ ___/ __  / / _ \/ __  / __ `/ _ \/ ___/
/ /___/ /_/ / /  / /_/ / /  __/ /_/ / /_/ /  __/ /
\____/\__,_/_/   \__,_/_/\___/\__,_/\__, /\___/_/
                                   /____/
    "#
    );
}

/// Prints server startup information.
pub fn print_startup_info(port: u16) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://0.0.0.0:{}", port);
    info!("Health:    http://0.0.0.0:{}/health", port);
    info!("API Docs:  http://0.0.0.0:{}/swagger-ui", port);
    info!("{}", separator);
}

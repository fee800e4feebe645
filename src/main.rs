use anyhow::Result;

use ctf_achievements::config;
use ctf_achievements::runtime;
use ctf_achievements::system;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    config::init_config();
    let app_config = config::get_config();

    // Guard must outlive the server so buffered log lines get flushed.
    let _logging_guard = system::init_logging(&app_config.logging);

    runtime::run_server().await
}

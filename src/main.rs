#[macro_use]
extern crate rocket;

use log::info;
use ssh_keygen_service::config::ServiceConfig;

#[launch]
fn rocket() -> _ {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServiceConfig::from_env().expect("Invalid service configuration");
    info!(
        "Using key generator {} with scratch dir {} and {}s timeout",
        config.keygen_program.display(),
        config.scratch_dir.display(),
        config.keygen_timeout.as_secs()
    );

    ssh_keygen_service::build_rocket(config).expect("Failed to build rocket")
}

use rocket::launch;

use feeder_server::db;
use feeder_server::settings::AppConfig;

#[launch]
fn rocket() -> _ {
    db::init_logger();
    let config = AppConfig::from_env();
    feeder_server::rocket(config)
}

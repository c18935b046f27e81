mod app;
mod simulated;

use rollcall_shared::{FileStore, STORE_SIZE};

use app::App;

const DEFAULT_IMAGE: &str = "rollcall-demo.img";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let image_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_IMAGE.to_string());

    let store = match FileStore::open(&image_path, STORE_SIZE) {
        Ok(store) => store,
        Err(error) => {
            log::error!("Could not open store image {}: {}", image_path, error);
            std::process::exit(1);
        }
    };

    let mut app = match App::new(store) {
        Ok(app) => app,
        Err(error) => {
            log::error!("Device failed to boot: {}", error);
            std::process::exit(1);
        }
    };

    loop {
        app.update();
    }
}

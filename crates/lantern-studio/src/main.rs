mod app;
mod device;
mod input;
mod time;
mod ui;
mod window;

use lantern_gl::logging::{init_logging, LoggingConfig};

use crate::ui::ExampleUi;
use crate::window::{Runtime, RuntimeConfig};

fn main() {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "lantern studio".to_string(),
        ..RuntimeConfig::default()
    };

    if let Err(e) = Runtime::run(config, ExampleUi::default()) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

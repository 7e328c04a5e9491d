mod app;
mod args;
mod counter;
mod geometry;
mod vertex;

#[cfg(test)]
mod testing;

use clap::Parser;
use kiln_engine::logging::{init_logging, LoggingConfig};
use kiln_engine::window::{Runtime, RuntimeConfig};

use crate::app::HelloWorld;
use crate::args::Args;

fn main() {
    let args = Args::parse();

    let logging = match &args.log {
        Some(filter) => LoggingConfig::with_filter(filter.as_str()),
        None => LoggingConfig::default(),
    };
    init_logging(logging);

    let config = RuntimeConfig {
        title: format!("kiln {}", app::TITLE),
        init: args.init(),
        max_frames: args.max_frames,
    };

    match Runtime::run(config, HelloWorld::new()) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            log::error!("{err:#}");
            std::process::exit(1);
        }
    }
}

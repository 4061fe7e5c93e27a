//! Process-wide default logger and convenience forwarders.

use std::io;
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use crate::level::AtomicLevel;
use crate::logger::handle::Logger;
use crate::logger::field::Field;

static DEFAULT: OnceLock<ArcSwap<Logger>> = OnceLock::new();

fn slot() -> &'static ArcSwap<Logger> {
    DEFAULT.get_or_init(|| ArcSwap::from_pointee(Logger::console(AtomicLevel::default())))
}

/// Replace the default logger used by the free functions in this module.
pub fn set_default(logger: Logger) {
    slot().store(Arc::new(logger));
}

pub fn default_logger() -> Arc<Logger> {
    slot().load_full()
}

pub fn debug(msg: &str, fields: &[Field]) {
    slot().load().debug(msg, fields);
}

pub fn info(msg: &str, fields: &[Field]) {
    slot().load().info(msg, fields);
}

pub fn warn(msg: &str, fields: &[Field]) {
    slot().load().warn(msg, fields);
}

pub fn error(msg: &str, fields: &[Field]) {
    slot().load().error(msg, fields);
}

pub fn fatal(msg: &str, fields: &[Field]) {
    slot().load().fatal(msg, fields);
}

pub fn sync() -> io::Result<()> {
    slot().load().sync()
}

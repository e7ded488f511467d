//! Browser console logging.

/// Route `log` records to the browser console and panics to `console.error`.
///
/// Safe to call more than once; later calls keep the first logger.
pub fn init(level: log::Level) {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(level) {
        log::debug!("console logger already installed: {err}");
    }
}

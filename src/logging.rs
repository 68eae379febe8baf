//! Logger setup for host processes loading the library.

use log::LevelFilter;
use std::sync::Once;

/// Environment variable holding the log filter, `env_logger` syntax.
pub const ENV_LOG: &str = "TOF_LOG";

static INIT_LOGGER: Once = Once::new();

/// Install the global logger once.
///
/// Defaults to `warn`; `TOF_LOG` overrides it (e.g. `TOF_LOG=tofrs=debug`).
/// Does nothing if the host already installed a logger.
pub fn init_logging() {
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.filter_level(LevelFilter::Warn);
        if let Ok(filters) = std::env::var(ENV_LOG) {
            builder.parse_filters(&filters);
        }

        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())
        });

        let _ = builder.try_init();
    });
}

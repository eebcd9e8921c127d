use tracing_subscriber::EnvFilter;

use crate::error::ShellError;
use crate::flags::Flags;

/// Diagnostics go to stderr so they never mix with command output.
/// The level comes from the flags alone.
pub fn init(flags: &Flags) -> Result<(), ShellError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter_directive(flags)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| ShellError::Logging(e.to_string()))
}

fn filter_directive(flags: &Flags) -> &'static str {
    if flags.is_set("debug") {
        "fsh=debug"
    } else if flags.is_set("quiet") {
        "off"
    } else {
        "fsh=warn"
    }
}

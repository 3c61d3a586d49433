use aud_api::PROCEDURES;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `aud procedures`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&PROCEDURES, flags.format)
}

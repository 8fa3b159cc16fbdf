use anyhow::Result;

use crate::cli::Output;

pub fn execute(output: &Output) -> Result<()> {
    output.status_indicator(
        "VERSION",
        &format!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        true,
    );
    output.key_value("Description:", env!("CARGO_PKG_DESCRIPTION"), false);
    output.key_value("Repository:", env!("CARGO_PKG_REPOSITORY"), false);
    output.key_value(
        "Profile:",
        if cfg!(debug_assertions) { "debug" } else { "release" },
        false,
    );
    Ok(())
}

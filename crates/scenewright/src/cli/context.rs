//! Context preview command handler.

use scenewright::{ContextBuilder, ScenewrightResult, files::load_script};
use std::path::Path;

/// Print the rendered script context for a script file.
pub fn show_context(script_path: &Path) -> ScenewrightResult<()> {
    let script = load_script(script_path)?;
    let rendered = ContextBuilder::render(&script.scenes);

    if rendered.is_empty() {
        println!("(script has no scenes)");
    } else {
        println!("{}", rendered);
    }
    Ok(())
}

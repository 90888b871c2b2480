// scour/src/commands/dedupe.rs
//
// USE CASE: Reduce a list of paths to their top-level ancestors.

use scour_core::deduplicate_paths;

pub fn execute(paths: Vec<String>) -> anyhow::Result<()> {
    for path in deduplicate_paths(&paths) {
        println!("{}", path);
    }
    Ok(())
}

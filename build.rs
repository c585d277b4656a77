use anyhow::Result;
use vergen::EmitBuilder;

// Exposes VERGEN_GIT_SHA / VERGEN_BUILD_DATE for `frame_geotag --version`.
fn main() -> Result<()> {
    EmitBuilder::builder().git_sha(true).build_date().emit()?;
    Ok(())
}

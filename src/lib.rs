pub mod error;
pub mod frontend;

use std::fs;

use error::SeedError;
use frontend::{
    parser::Parser,
    visualize::{RenderOptions, Visualizer},
};

/// Read the whole file at `path`. Bytes that are not valid UTF-8 are replaced rather than
/// rejected, so any file can be rendered.
pub fn read_source(path: &str) -> Result<String, SeedError> {
    let bytes = fs::read(path).map_err(|err| SeedError::io(path, err))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse `source` and render it as a DOT graph with one cluster per top-level form.
pub fn render_source(source: &str, options: RenderOptions) -> Result<String, SeedError> {
    let ast = Parser::parse_str(source)?;
    Ok(Visualizer::render(&ast, options))
}

//! myst2md: convert MyST markdown to plain markdown, describing equation
//! references by their labels

use anyhow::Result;
use myst2md_core::Variant;

fn main() -> Result<()> {
    myst2md_cli::run(Variant::Enhanced)
}

//! myst2md-baseline: convert MyST markdown to plain markdown, replacing every
//! equation reference with "the equation above"

use anyhow::Result;
use myst2md_core::Variant;

fn main() -> Result<()> {
    myst2md_cli::run(Variant::Baseline)
}

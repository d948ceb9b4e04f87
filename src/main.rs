//! bcup2kpxc: Convert Buttercup CSV exports into KeePassXC CSV imports

use anyhow::Result;

fn main() -> Result<()> {
    bcup2kpxc::cli::run()
}

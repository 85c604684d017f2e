//! funcmap CLI - call template helpers from the shell
//!
//! Thin entry point; argument parsing and command dispatch live in the
//! library so integration tests can exercise them.

fn main() -> anyhow::Result<()> {
    funcmap_cli::run()
}

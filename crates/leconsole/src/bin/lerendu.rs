//! lerendu binary entry point

fn main() -> anyhow::Result<()> {
    leconsole::cli::main()
}

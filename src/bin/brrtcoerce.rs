fn main() -> anyhow::Result<()> {
    brrtcoerce::cli::run_cli()
}

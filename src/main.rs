mod app;
mod cli;

use app::App;
use clap::Parser;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut app = App::new(cli.parse_options(), cli.fail_fast);

    app.load_all(&cli.paths)?;
    app.report();

    if app.failed() == cli.paths.len() {
        anyhow::bail!("None of the {} model(s) could be loaded", cli.paths.len());
    }
    Ok(())
}

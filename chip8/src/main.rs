use clap::Parser;

mod cli;
mod display;
mod keymap;
mod run;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();
    run::run(&args)
}

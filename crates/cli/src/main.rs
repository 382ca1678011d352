//! Entry point for the command-line interface.
//! Delegates to dedicated modules for argument handling,
//! source loading and each command's output.

use refactor_toolbox::args::{parse_cli, Commands};
use refactor_toolbox::config::load_config;
use refactor_toolbox::languages::list_parsers;
use refactor_toolbox::search::run_search;
use refactor_toolbox::terms::run_terms;
use refactor_toolbox::tree::run_tree;
use refactor_toolbox::ui;

fn main() -> anyhow::Result<()> {
    let cli = parse_cli();
    ui::init_tracing(cli.debug, cli.quiet);
    ui::configure_colors(cli.no_color);
    let config = load_config()?;
    match cli.command {
        Commands::Parsers => {
            list_parsers();
            Ok(())
        }
        Commands::Terms(args) => run_terms(args, &config),
        Commands::Search(args) => run_search(args, &config),
        Commands::Tree(args) => run_tree(args, &config),
    }
}

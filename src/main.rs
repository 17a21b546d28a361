use branch_sweep::cli::{execute_command, Cli};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    branch_sweep::logging::init_logging(cli.global.verbose);

    if let Err(e) = execute_command(cli) {
        branch_sweep::ui::prompt::restore_cursor();
        eprintln!("branch-sweep: {}", e);
        std::process::exit(1);
    }
}

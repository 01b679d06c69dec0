use console::style;

fn main() {
    if let Err(err) = zerogen_cli::parse_and_run() {
        eprintln!("{} zerogen: {err:#}", style("✖").red().bold());
        std::process::exit(1);
    }
}

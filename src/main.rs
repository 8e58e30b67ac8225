use anyhow::Result;
use clap::{arg, crate_authors, crate_name, crate_version, ArgAction, ArgMatches, Command};
use sharescan::{
    abort,
    config::Config,
    interface, logger,
    probe::TcpProbe,
    report::{banner, section, Report},
    sweep::Sweeper,
};

fn parse_args(matches: ArgMatches) -> Config {
    let interface = matches.get_one::<String>("interface").cloned();
    let verbose = matches.get_flag("verbose");
    let debug = matches.get_flag("debug");

    Config::new(interface, verbose, debug)
}

fn print_results(report: &Report) {
    print!("\n{}", report.render());
}

fn main() -> Result<()> {
    let arg_matches = Command::new(crate_name!())
        .about("Scan for open SMB shares or FTP sites on a local network")
        .version(crate_version!())
        .author(crate_authors!())
        .args([
            arg!(-i --interface <NAME> "Network interface to use (default: first en*/eth* interface)"),
            arg!(-v --verbose "Display verbose output").action(ArgAction::SetTrue),
            arg!(-d --debug "Turns on debugging information").action(ArgAction::SetTrue),
        ])
        .get_matches();

    // Extract arguments.
    let config = parse_args(arg_matches);

    logger::init(config.debug);

    // Determine the local network range.
    let range = interface::local_range(config.interface.as_deref()).unwrap_or_else(|e| abort(e));

    println!("{}", banner(&range));

    // Start sweeps.
    let sweeper = Sweeper::new(&config)?;
    let report = sweeper.run(&range, &TcpProbe, |service| println!("{}", section(service)));

    // Show result.
    print_results(&report);

    Ok(())
}

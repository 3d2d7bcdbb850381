use anyhow::Result;
use clap::{arg, command};
use codeview::check_config_file;

fn main() -> Result<()> {
    let matches = command!("Codeview Check")
        .about("Checks the configuration file")
        .help_template(codeview::utils::get_help_template())
        .args(&[
            arg!(-v --verbose "Outputs received configuration file."),
            arg!([INPUT] "Sets the input file to use. Uses the XDG config file otherwise."),
        ])
        .get_matches();

    let config_file = matches.get_one::<String>("INPUT").map(String::as_str);
    let verbose = matches.get_flag("verbose");

    println!(
        "\x1b[0;94m::\x1b[0m codeview version: {}",
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "\x1b[0;94m::\x1b[0m codeview git hash: {}",
        git_version::git_version!(fallback = option_env!("GIT_HASH").unwrap_or("NONE"))
    );

    println!("\x1b[0;94m::\x1b[0m Loading configuration . . .");
    match check_config_file(config_file) {
        Ok(config) => {
            println!("\x1b[0;92m    -> Configuration loaded OK \x1b[0m");
            if verbose {
                dbg!(&config);
            }
            println!("\x1b[0;94m::\x1b[0m Checking values . . .");
            if config.check_all(verbose) {
                println!("\x1b[0;92m    -> No problems found \x1b[0m");
            }
        }
        Err(e) => {
            println!("Configuration failed. Reason: {e:?}");
        }
    }

    Ok(())
}

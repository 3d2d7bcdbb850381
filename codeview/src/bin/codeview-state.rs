use anyhow::Result;
use clap::{arg, command};
use codeview_core::models::dto::SessionsState;
use codeview_core::utils::helpers::place_runtime_file;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::net::UnixStream;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let matches = command!("Codeview State")
        .about("Prints out the sessions of a running codeview")
        .help_template(codeview::utils::get_help_template())
        .args(&[
            arg!(-s --summary "Print one line per session instead of raw JSON."),
            arg!(-q --quit "Prints the state once and quits."),
        ])
        .get_matches();

    let summary = matches.get_flag("summary");
    let once = matches.get_flag("quit");

    let mut stream_reader = stream_reader().await?;
    while let Some(line) = stream_reader.next_line().await? {
        if summary {
            let state: SessionsState = serde_json::from_str(&line)?;
            print_summary(&state);
        } else {
            println!("{line}");
        }
        if once {
            break;
        }
    }

    Ok(())
}

fn print_summary(state: &SessionsState) {
    if !state.hack_mode_enabled {
        println!("hack mode off");
        return;
    }
    let sessions: Vec<String> = state.sessions.iter().map(|s| s.summary()).collect();
    println!("{}", sessions.join(" | "));
}

async fn stream_reader() -> Result<Lines<BufReader<UnixStream>>> {
    let socket_file = place_runtime_file("sessions.sock")?;
    let stream = UnixStream::connect(socket_file).await?;
    Ok(BufReader::new(stream).lines())
}

//! # ftpget
//!
//! Command line FTP downloader: give it an `ftp://` URL and it retrieves
//! that one file into the current working directory.

// -- mods
mod args;

use std::path::Path;
use std::process::ExitCode;

use args::Args;
use env_logger::Builder as LogBuilder;
use ftpget::{transfer, FtpUrl};
use log::LevelFilter;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    let args: Args = argh::from_env();
    // print version
    if args.version {
        println!("ftpget {APP_VERSION}");
        return ExitCode::SUCCESS;
    }
    // init logger
    LogBuilder::new()
        .filter_level(if args.debug {
            LevelFilter::Trace
        } else if args.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Off
        })
        .init();

    let Some(url) = args.url else {
        eprintln!("Usage: ftpget <url>");
        return ExitCode::FAILURE;
    };
    let url = match FtpUrl::parse(&url) {
        Ok(url) => url,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Fetching '{}' from {} as user '{}'",
        url.remote_path, url.host, url.user
    );
    match transfer::download(&url, Path::new(".")) {
        Ok(bytes) => {
            println!("Saved {} ({bytes} bytes)", url.file_name);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Download failed: {err}");
            ExitCode::FAILURE
        }
    }
}

#![crate_name = "ftpget"]
#![crate_type = "lib"]

//! # ftpget
//!
//! ftpget is a minimal FTP client library written in Rust. It does one thing:
//! given an `ftp://` URL it logs in, negotiates a passive-mode data
//! connection and retrieves a single file over it.
//!
//! The library exposes the pieces of that pipeline separately, so you can
//! drive the control connection yourself, or hand everything to the
//! [`transfer`] module and get a file on disk:
//!
//! - [`FtpUrl`] — decomposes an `ftp://` URL into credentials, host, path
//!   and file name, with `anonymous`/`anonymous` defaults.
//! - [`FtpStream`] — the control connection: banner, `USER`/`PASS` login,
//!   `PASV` negotiation, `RETR` and the closing `QUIT`. The command
//!   sequence is strictly linear; any reply code other than the one a step
//!   requires aborts the session.
//! - [`transfer`] — the whole pipeline: resolve, connect, authenticate,
//!   stream the file to disk, confirm, disconnect.
//!
//! ## Get started
//!
//! ```toml
//! ftpget = "^0.1"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use ftpget::{transfer, FtpUrl};
//!
//! let url = FtpUrl::parse("ftp://ftp.example.com/pub/readme.txt").unwrap();
//! let bytes = transfer::download(&url, Path::new(".")).unwrap();
//! println!("saved {} as {}", bytes, url.file_name);
//! ```
//!
//! Or with the control connection in your own hands:
//!
//! ```rust,no_run
//! use std::io::Read;
//!
//! use ftpget::FtpStream;
//!
//! let mut ftp = FtpStream::connect("ftp.example.com:21").unwrap();
//! ftp.login("anonymous", "anonymous").unwrap();
//! let mut data = ftp.retr_stream("pub/readme.txt").unwrap();
//! let mut payload = Vec::new();
//! data.read_to_end(&mut payload).unwrap();
//! ftp.finalize_retr_stream(data).unwrap();
//! ftp.quit().unwrap();
//! ```
//!
//! FTPS, active mode, directory listings and resumable transfers are out of
//! scope; the client speaks exactly `USER`, `PASS`, `PASV`, `RETR` and
//! `QUIT`.

// -- common deps
#[macro_use]
extern crate lazy_regex;
#[macro_use]
extern crate log;

// -- private
pub(crate) mod command;
mod regex;
mod reply;
mod status;
mod stream;
#[cfg(test)]
mod test_server;

// -- public
pub mod transfer;
pub mod types;
pub mod url;

pub use status::Status;
pub use stream::FtpStream;
pub use types::{FtpError, FtpResult, Reply};
pub use url::FtpUrl;

// -- test logging
#[cfg(test)]
pub fn log_init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

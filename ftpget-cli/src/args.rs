use argh::FromArgs;

#[derive(FromArgs)]
#[argh(description = "Download a single file from an FTP server.

The URL has the form ftp://[user[:pass]@]host/path/to/file; credentials
default to anonymous. The file is saved in the current working directory.")]
pub struct Args {
    #[argh(switch, short = 'D', description = "enable TRACE log level")]
    pub debug: bool,
    #[argh(switch, short = 'v', description = "verbose mode")]
    pub verbose: bool,
    #[argh(switch, short = 'V', description = "print version")]
    pub version: bool,
    #[argh(positional, description = "ftp:// URL of the file to download")]
    pub url: Option<String>,
}

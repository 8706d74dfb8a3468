//! # Command
//!
//! The set of FTP commands this client emits

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Ftp commands with their arguments. Each stringifies to its wire form,
/// CRLF terminator included.
pub enum Command {
    /// Provide user to login as
    User(String),
    /// Provide login password
    Pass(String),
    /// Passive mode
    Pasv,
    /// Retrieve file
    Retr(String),
    /// Quit
    Quit,
}

// -- stringify

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(u) => write!(f, "USER {u}\r\n"),
            Self::Pass(p) => write!(f, "PASS {p}\r\n"),
            Self::Pasv => write!(f, "PASV\r\n"),
            Self::Retr(p) => write!(f, "RETR {p}\r\n"),
            Self::Quit => write!(f, "QUIT\r\n"),
        }
    }
}

#[cfg(test)]
mod test {

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn should_stringify_command() {
        assert_eq!(
            Command::User(String::from("omar")).to_string().as_str(),
            "USER omar\r\n"
        );
        assert_eq!(
            Command::Pass(String::from("qwerty123"))
                .to_string()
                .as_str(),
            "PASS qwerty123\r\n"
        );
        assert_eq!(Command::Pasv.to_string().as_str(), "PASV\r\n");
        assert_eq!(
            Command::Retr(String::from("pub/a.txt")).to_string().as_str(),
            "RETR pub/a.txt\r\n"
        );
        assert_eq!(Command::Quit.to_string().as_str(), "QUIT\r\n");
    }
}

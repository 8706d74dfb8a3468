//! # Stream
//!
//! This module contains the control-connection implementation. The command
//! sequence is strictly linear: every step sends one command and requires
//! exactly one reply code, and any other code aborts the session.

use std::io::{BufReader, Read, Write};
use std::net::{Ipv4Addr, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::command::Command;
use crate::regex::PASV_PORT_RE;
use crate::reply;
use crate::status::Status;
use crate::types::{FtpError, FtpResult, Reply};

/// Stream to interface with the FTP server. This interface is only for the
/// command stream; the file payload travels on a separate data connection
/// negotiated through [`FtpStream::retr_stream`].
pub struct FtpStream {
    reader: BufReader<TcpStream>,
    welcome_msg: Option<String>,
}

impl FtpStream {
    /// Try to connect to the remote server and read the 220 banner.
    pub fn connect<A: ToSocketAddrs>(addr: A) -> FtpResult<Self> {
        debug!("Connecting to server");
        TcpStream::connect(addr)
            .map_err(FtpError::ConnectionError)
            .and_then(Self::connect_with_stream)
    }

    /// Try to connect to the remote server with the specified timeout.
    ///
    /// This is the one place the client opts out of indefinite blocking; all
    /// subsequent reads and writes still block without a deadline.
    pub fn connect_timeout(addr: SocketAddr, timeout: Duration) -> FtpResult<Self> {
        debug!("Connecting to server {addr}");
        TcpStream::connect_timeout(&addr, timeout)
            .map_err(FtpError::ConnectionError)
            .and_then(Self::connect_with_stream)
    }

    /// Connect using a provided configured tcp stream
    fn connect_with_stream(stream: TcpStream) -> FtpResult<Self> {
        debug!("Established connection with server");
        let mut ftp_stream = Self {
            reader: BufReader::new(stream),
            welcome_msg: None,
        };
        debug!("Reading server banner...");
        let reply = ftp_stream.read_reply_expecting(Status::Ready)?;
        debug!("Server READY; banner: {:?}", reply.text);
        ftp_stream.welcome_msg = Some(reply.text);
        Ok(ftp_stream)
    }

    /// Returns the welcome message retrieved from the server (if available)
    pub fn get_welcome_msg(&self) -> Option<&str> {
        self.welcome_msg.as_deref()
    }

    /// Returns a reference to the underlying [`TcpStream`].
    pub fn get_ref(&self) -> &TcpStream {
        self.reader.get_ref()
    }

    /// Log in to the FTP server.
    ///
    /// `USER` must be answered with 331 and `PASS` with 230; servers that
    /// skip the password step are treated as protocol violations.
    pub fn login<S: AsRef<str>>(&mut self, user: S, password: S) -> FtpResult<()> {
        debug!("Signing in with user '{}'", user.as_ref());
        self.perform(Command::User(user.as_ref().to_string()))?;
        self.read_reply_expecting(Status::NeedPassword)?;
        self.perform(Command::Pass(password.as_ref().to_string()))?;
        self.read_reply_expecting(Status::LoggedIn)?;
        debug!("Login OK");
        Ok(())
    }

    /// Runs the PASV command and parses the endpoint the server listens on.
    pub fn enter_passive_mode(&mut self) -> FtpResult<SocketAddr> {
        debug!("PASV command");
        self.perform(Command::Pasv)?;
        // PASV reply format : 227 Entering Passive Mode (h1,h2,h3,h4,p1,p2).
        let reply = self.read_reply_expecting(Status::PassiveMode)?;
        let addr = Self::parse_passive_address(&reply)?;
        trace!("Passive address: {addr}");
        Ok(addr)
    }

    /// Request `remote_path` from the server and return the data connection
    /// its bytes will arrive on.
    ///
    /// The data connection is opened against the 227 endpoint before `RETR`
    /// is sent. Once the returned stream reaches EOF, call
    /// [`FtpStream::finalize_retr_stream`] to collect the transfer
    /// confirmation.
    pub fn retr_stream<S: AsRef<str>>(&mut self, remote_path: S) -> FtpResult<TcpStream> {
        let addr = self.enter_passive_mode()?;
        debug!("Connecting data channel to {addr}");
        let data_stream = TcpStream::connect(addr).map_err(FtpError::ConnectionError)?;
        debug!("Retrieving '{}'", remote_path.as_ref());
        self.perform(Command::Retr(remote_path.as_ref().to_string()))?;
        self.read_reply_expecting(Status::AboutToSend)?;
        Ok(data_stream)
    }

    /// Finalize a retrieval; must be called once the data stream obtained
    /// with [`FtpStream::retr_stream`] has been drained to EOF.
    ///
    /// Any confirmation other than 226 means the server considers the
    /// transfer broken, even though the payload side already hit EOF.
    pub fn finalize_retr_stream(&mut self, stream: impl Read) -> FtpResult<()> {
        debug!("Finalizing retr stream");
        // Drop stream NOTE: must be done first, otherwise server won't return any response
        drop(stream);
        trace!("dropped stream");
        let reply = self.read_reply()?;
        if reply.status() == Status::ClosingDataConnection {
            Ok(())
        } else {
            Err(FtpError::TransferIncomplete(reply))
        }
    }

    /// Quits the current FTP session.
    pub fn quit(&mut self) -> FtpResult<()> {
        debug!("Quitting stream");
        self.perform(Command::Quit)?;
        self.read_reply_expecting(Status::Closing).map(|_| ())
    }

    /// Parse the passive endpoint out of a 227 reply: dotted quad from the
    /// first four integers of the sextuple, port from `p1 * 256 + p2`.
    pub(crate) fn parse_passive_address(reply: &Reply) -> FtpResult<SocketAddr> {
        trace!("PASV reply: {}", reply.text);
        let caps = PASV_PORT_RE
            .captures(&reply.text)
            .ok_or_else(|| FtpError::MalformedPassiveReply(reply.text.clone()))?;
        // Octets outside 0..=255 are rejected rather than wrapped
        let mut sextuple = [0u8; 6];
        for (i, field) in sextuple.iter_mut().enumerate() {
            *field = caps[i + 1]
                .parse::<u8>()
                .map_err(|_| FtpError::MalformedPassiveReply(reply.text.clone()))?;
        }
        let [oct1, oct2, oct3, oct4, msb, lsb] = sextuple;
        let ip = Ipv4Addr::new(oct1, oct2, oct3, oct4);
        let port = (u16::from(msb) << 8) | u16::from(lsb);
        Ok(SocketAddr::new(ip.into(), port))
    }

    /// Write the command to the control stream
    fn perform(&mut self, command: Command) -> FtpResult<()> {
        let command = command.to_string();
        trace!("CC OUT: {}", command.trim_end_matches("\r\n"));
        self.reader
            .get_mut()
            .write_all(command.as_bytes())
            .map_err(FtpError::ConnectionError)
    }

    /// Read one reply from the control stream
    fn read_reply(&mut self) -> FtpResult<Reply> {
        let reply = reply::read_reply(&mut self.reader)?;
        trace!("CC IN: {reply}");
        Ok(reply)
    }

    /// Read one reply and require exactly `expected`; anything else aborts.
    fn read_reply_expecting(&mut self, expected: Status) -> FtpResult<Reply> {
        let reply = self.read_reply()?;
        if reply.code == expected.code() {
            Ok(reply)
        } else {
            Err(FtpError::UnexpectedReply(reply))
        }
    }
}

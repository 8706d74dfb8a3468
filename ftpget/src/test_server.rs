#![allow(dead_code)]

//! Scripted in-process FTP server used by the integration tests. Binds an
//! ephemeral port on localhost and plays one control session: banner, login,
//! PASV with a fresh data listener, RETR with the configured payload, QUIT.

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

/// What the scripted server should do with its one session.
#[derive(Debug, Clone)]
pub struct Behavior {
    /// Payload served on the data connection for RETR
    pub file_data: Vec<u8>,
    /// Send the 220 banner as a two-line reply
    pub multiline_banner: bool,
    /// Answer USER with 530 instead of 331
    pub reject_user: bool,
    /// Close the data connection after this many payload bytes and confirm
    /// with 426 instead of 226
    pub drop_data_after: Option<usize>,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            file_data: b"ftpget test payload\n".to_vec(),
            multiline_banner: false,
            reject_user: false,
            drop_data_after: None,
        }
    }
}

pub struct MockFtpd {
    addr: SocketAddr,
    handle: Option<JoinHandle<()>>,
}

impl MockFtpd {
    /// Bind an ephemeral localhost port and serve one scripted session on a
    /// background thread.
    pub fn start(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind mock server");
        let addr = listener.local_addr().expect("mock server has no address");
        let handle = thread::spawn(move || serve_session(listener, behavior));
        Self {
            addr,
            handle: Some(handle),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Drop for MockFtpd {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn serve_session(listener: TcpListener, behavior: Behavior) {
    let (stream, _) = listener.accept().expect("mock server accept failed");
    let mut reader = BufReader::new(stream.try_clone().expect("failed to clone control stream"));
    let mut control = stream;

    if behavior.multiline_banner {
        send(&mut control, "220-ftpget mock server\r\n220 Service ready\r\n");
    } else {
        send(&mut control, "220 Service ready\r\n");
    }

    let mut data_listener: Option<TcpListener> = None;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            // client went away without QUIT
            break;
        }
        let line = line.trim_end();
        if line.starts_with("USER") {
            if behavior.reject_user {
                send(&mut control, "530 Not logged in\r\n");
            } else {
                send(&mut control, "331 Password required\r\n");
            }
        } else if line.starts_with("PASS") {
            send(&mut control, "230 User logged in\r\n");
        } else if line == "PASV" {
            let listener =
                TcpListener::bind("127.0.0.1:0").expect("failed to bind data listener");
            let port = listener
                .local_addr()
                .expect("data listener has no address")
                .port();
            data_listener = Some(listener);
            let reply = format!(
                "227 Entering Passive Mode (127,0,0,1,{},{}).\r\n",
                port / 256,
                port % 256
            );
            send(&mut control, &reply);
        } else if line.starts_with("RETR") {
            send(&mut control, "150 Opening BINARY mode data connection\r\n");
            let (mut data, _) = data_listener
                .take()
                .expect("RETR before PASV")
                .accept()
                .expect("data accept failed");
            match behavior.drop_data_after {
                Some(n) => {
                    data.write_all(&behavior.file_data[..n])
                        .expect("data write failed");
                    drop(data);
                    send(&mut control, "426 Connection closed; transfer aborted\r\n");
                }
                None => {
                    data.write_all(&behavior.file_data)
                        .expect("data write failed");
                    drop(data);
                    send(&mut control, "226 Transfer complete\r\n");
                }
            }
        } else if line == "QUIT" {
            send(&mut control, "221 Goodbye\r\n");
            break;
        } else {
            send(&mut control, "502 Command not implemented\r\n");
        }
    }
}

fn send(control: &mut TcpStream, reply: &str) {
    control
        .write_all(reply.as_bytes())
        .expect("control write failed");
}

//! # Reply
//!
//! Reader for control-connection replies. A reply is one or more physical
//! lines; multi-line replies collapse to their final line, which is the one
//! carrying the terminating `code SP text` form per RFC 959.

use std::io::BufRead;

use crate::types::{FtpError, FtpResult, Reply};

/// Reader states. `Init` scans the code digits of the current line and
/// decides, from the first delimiter, whether the line terminates the reply
/// (space) or continues it (hyphen).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    Init,
    SingleLine,
    MultiLine,
    Done,
}

/// Consume exactly one logical reply from `reader`, blocking, and leave the
/// stream positioned at the first byte after the terminating newline.
///
/// Only the final line survives: on every continuation line the accumulation
/// buffer is discarded. The separating space between code and text is
/// consumed by the state transition, so the retained buffer is the code
/// digits and the text fused together; [`parse_retained`] splits them again.
pub(crate) fn read_reply<R: BufRead>(reader: &mut R) -> FtpResult<Reply> {
    let mut state = ReadState::Init;
    let mut buffer: Vec<u8> = Vec::new();

    while state != ReadState::Done {
        let byte = next_byte(reader)?;
        state = match state {
            ReadState::Init => match byte {
                b' ' => ReadState::SingleLine,
                b'-' => ReadState::MultiLine,
                b'\n' => ReadState::Done,
                _ => {
                    buffer.push(byte);
                    ReadState::Init
                }
            },
            ReadState::SingleLine => {
                if byte == b'\n' {
                    ReadState::Done
                } else {
                    buffer.push(byte);
                    ReadState::SingleLine
                }
            }
            ReadState::MultiLine => {
                if byte == b'\n' {
                    // continuation line: only the final line is retained
                    buffer.clear();
                    ReadState::Init
                } else {
                    buffer.push(byte);
                    ReadState::MultiLine
                }
            }
            ReadState::Done => ReadState::Done,
        };
    }

    parse_retained(&buffer)
}

/// Read one byte; EOF before the reply terminates loses the whole reply.
fn next_byte<R: BufRead>(reader: &mut R) -> FtpResult<u8> {
    let mut byte = [0u8; 1];
    match reader.read(&mut byte) {
        Ok(0) => Err(FtpError::ConnectionLost),
        Ok(_) => Ok(byte[0]),
        Err(err) => Err(FtpError::ConnectionError(err)),
    }
}

/// Split the retained buffer into numeric code and text. The code is the
/// leading run of decimal digits; a reply without one is a protocol
/// violation.
fn parse_retained(buffer: &[u8]) -> FtpResult<Reply> {
    let mut line = String::from_utf8_lossy(buffer).to_string();
    if line.ends_with('\r') {
        line.pop();
    }
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return Err(FtpError::BadReply);
    }
    let code: u32 = line[..digits].parse().map_err(|_| FtpError::BadReply)?;
    Ok(Reply::new(code, &line[digits..]))
}

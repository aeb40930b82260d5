//! Test utilities: game drivers and a minimal frontend-side wire codec.

#![allow(dead_code)]

use std::collections::HashMap;

use pgquest::game::{handle_command, World};
use pgquest::pgwire::messages::{PROTOCOL_VERSION_3, SSL_REQUEST_CODE};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Run one command and return the narration it produced.
pub fn run(world: &mut World, line: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    handle_command(world, line, &mut out);
    out
}

/// Run a script of commands, discarding narration.
pub fn run_all(world: &mut World, lines: &[&str]) {
    for line in lines {
        run(world, line);
    }
}

pub fn ssl_request() -> Vec<u8> {
    let mut out = 8i32.to_be_bytes().to_vec();
    out.extend_from_slice(&SSL_REQUEST_CODE.to_be_bytes());
    out
}

pub fn startup(params: &[(&str, &str)]) -> Vec<u8> {
    let mut body = PROTOCOL_VERSION_3.to_be_bytes().to_vec();
    for (k, v) in params {
        body.extend_from_slice(k.as_bytes());
        body.push(0);
        body.extend_from_slice(v.as_bytes());
        body.push(0);
    }
    body.push(0);
    let mut out = ((body.len() + 4) as i32).to_be_bytes().to_vec();
    out.extend_from_slice(&body);
    out
}

pub fn tagged(tag: u8, body: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    out.extend_from_slice(&((body.len() + 4) as i32).to_be_bytes());
    out.extend_from_slice(body);
    out
}

pub fn query(text: &str) -> Vec<u8> {
    let mut body = text.as_bytes().to_vec();
    body.push(0);
    tagged(b'Q', &body)
}

pub fn sync() -> Vec<u8> {
    tagged(b'S', &[])
}

pub fn terminate() -> Vec<u8> {
    tagged(b'X', &[])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub tag: u8,
    pub body: Vec<u8>,
}

impl Frame {
    /// Text of a NoticeResponse's message field.
    pub fn notice(&self) -> Option<String> {
        if self.tag != b'N' {
            return None;
        }
        self.fields().remove(&b'M')
    }

    /// Fields of a NoticeResponse or ErrorResponse keyed by field code.
    pub fn fields(&self) -> HashMap<u8, String> {
        let mut fields = HashMap::new();
        let mut rest = &self.body[..];
        while let Some((&code, tail)) = rest.split_first() {
            if code == 0 {
                break;
            }
            let end = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
            fields.insert(code, String::from_utf8_lossy(&tail[..end]).into_owned());
            rest = &tail[(end + 1).min(tail.len())..];
        }
        fields
    }

    /// First column of a DataRow.
    pub fn first_value(&self) -> Option<String> {
        if self.tag != b'D' || self.body.len() < 6 {
            return None;
        }
        let len = i32::from_be_bytes([self.body[2], self.body[3], self.body[4], self.body[5]]);
        if len < 0 {
            return None;
        }
        let start = 6;
        Some(String::from_utf8_lossy(&self.body[start..start + len as usize]).into_owned())
    }

    /// Tag text of a CommandComplete.
    pub fn command_tag(&self) -> Option<String> {
        if self.tag != b'C' {
            return None;
        }
        let end = self.body.iter().position(|&b| b == 0)?;
        Some(String::from_utf8_lossy(&self.body[..end]).into_owned())
    }
}

/// Read one backend frame, or `None` at EOF.
pub async fn read_frame<R: AsyncRead + Unpin>(r: &mut R) -> Option<Frame> {
    let mut head = [0u8; 5];
    r.read_exact(&mut head).await.ok()?;
    let len = i32::from_be_bytes([head[1], head[2], head[3], head[4]]) as usize;
    let mut body = vec![0u8; len - 4];
    r.read_exact(&mut body).await.ok()?;
    Some(Frame { tag: head[0], body })
}

/// Read frames up to and including the next ReadyForQuery or ErrorResponse.
pub async fn read_turn<R: AsyncRead + Unpin>(r: &mut R) -> Vec<Frame> {
    let mut frames = Vec::new();
    while let Some(frame) = read_frame(r).await {
        let stop = frame.tag == b'Z' || frame.tag == b'E';
        frames.push(frame);
        if stop {
            break;
        }
    }
    frames
}

pub fn notices(frames: &[Frame]) -> Vec<String> {
    frames.iter().filter_map(Frame::notice).collect()
}

pub fn tags(frames: &[Frame]) -> Vec<u8> {
    frames.iter().map(|f| f.tag).collect()
}

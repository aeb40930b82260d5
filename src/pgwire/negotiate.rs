//! Connection setup: the SSLRequest gate before TLS and the startup exchange
//! after it. Authentication always succeeds.

use bytes::BytesMut;
use log::{debug, info, warn};
use rand::Rng;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use super::codec::{FrameReader, FrameWriter};
use super::messages::{
    BackendMessage, ErrorFields, StartupFrame, StartupMessage, PROTOCOL_VERSION_3,
    SQLSTATE_INVALID_AUTHORIZATION, SQLSTATE_PROTOCOL_VIOLATION,
};
use super::{Result, WireError};
use crate::logutil::escape_log;

/// Values reported to the client in ParameterStatus frames.
#[derive(Debug, Clone)]
pub struct ServerParameters {
    pub server_version: String,
}

impl ServerParameters {
    pub fn new(server_version: impl Into<String>) -> Self {
        Self {
            server_version: server_version.into(),
        }
    }

    fn status_messages(&self) -> Vec<BackendMessage> {
        vec![
            BackendMessage::parameter("server_version", &self.server_version),
            BackendMessage::parameter("server_encoding", "UTF8"),
            BackendMessage::parameter("client_encoding", "UTF8"),
            BackendMessage::parameter("DateStyle", "ISO"),
            BackendMessage::parameter("integer_datetimes", "on"),
            BackendMessage::parameter("standard_conforming_strings", "on"),
        ]
    }
}

/// Expect an SSLRequest as the very first frame and answer `S`.
///
/// Anything else gets a plaintext FATAL error and [`WireError::SslRequired`].
pub async fn accept_ssl_request<S>(stream: S, max_frame_len: usize) -> Result<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut reader = FrameReader::new(stream).max_frame_len(max_frame_len);
    match reader.read_startup().await? {
        Some(StartupFrame::SslRequest) => {
            let mut stream = reader.into_inner()?;
            stream.write_all(b"S").await?;
            stream.flush().await?;
            Ok(stream)
        }
        Some(other) => {
            debug!("first frame was {:?}, refusing plaintext session", other);
            let mut buf = BytesMut::new();
            BackendMessage::Error(ErrorFields::fatal(
                SQLSTATE_INVALID_AUTHORIZATION,
                "SSL is required",
            ))
            .encode(&mut buf);
            let stream = reader.get_mut();
            if let Err(e) = stream.write_all(&buf).await {
                warn!("could not deliver SSL refusal: {}", e);
            }
            let _ = stream.flush().await;
            Err(WireError::SslRequired)
        }
        None => Err(WireError::UnexpectedEof),
    }
}

/// Read the StartupMessage and send the authentication and parameter sequence,
/// ending with ReadyForQuery.
pub async fn complete_startup<R, W>(
    reader: &mut FrameReader<R>,
    writer: &mut FrameWriter<W>,
    params: &ServerParameters,
) -> Result<StartupMessage>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let startup = match reader.read_startup().await? {
        Some(StartupFrame::Startup(msg)) if msg.protocol_version == PROTOCOL_VERSION_3 => msg,
        Some(StartupFrame::Startup(msg)) => {
            let reason = format!(
                "unsupported protocol {}.{}",
                msg.protocol_version >> 16,
                msg.protocol_version & 0xffff
            );
            refuse(writer, &reason).await;
            return Err(WireError::Protocol(reason));
        }
        Some(other) => {
            let reason = format!("unexpected {:?} inside TLS", other);
            refuse(writer, &reason).await;
            return Err(WireError::Protocol(reason));
        }
        None => return Err(WireError::UnexpectedEof),
    };

    info!(
        "startup: user='{}' database='{}' application='{}'",
        escape_log(startup.parameter("user").unwrap_or("")),
        escape_log(startup.parameter("database").unwrap_or("")),
        escape_log(startup.parameter("application_name").unwrap_or(""))
    );

    let (process_id, secret_key) = {
        let mut rng = rand::thread_rng();
        (rng.gen_range(1..i32::MAX), rng.gen::<i32>())
    };

    writer.queue(&BackendMessage::AuthenticationOk);
    writer.queue_all(&params.status_messages());
    writer.queue(&BackendMessage::BackendKeyData {
        process_id,
        secret_key,
    });
    writer.queue(&BackendMessage::ReadyForQuery);
    writer.flush().await?;
    Ok(startup)
}

async fn refuse<W: AsyncWrite + Unpin>(writer: &mut FrameWriter<W>, reason: &str) {
    let msg = BackendMessage::Error(ErrorFields::fatal(SQLSTATE_PROTOCOL_VIOLATION, reason));
    if let Err(e) = writer.send(&msg).await {
        debug!("could not report protocol violation: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pgwire::messages::{GSSENC_REQUEST_CODE, SSL_REQUEST_CODE};
    use tokio::io::AsyncReadExt;

    fn startup_bytes(version: i32, params: &[(&str, &str)]) -> Vec<u8> {
        let mut body = version.to_be_bytes().to_vec();
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

    #[tokio::test]
    async fn answers_ssl_request_with_s() {
        let (mut client, server) = tokio::io::duplex(256);
        let mut req = 8i32.to_be_bytes().to_vec();
        req.extend_from_slice(&SSL_REQUEST_CODE.to_be_bytes());
        client.write_all(&req).await.unwrap();

        let task = tokio::spawn(async move { accept_ssl_request(server, 1024).await });
        let mut reply = [0u8; 1];
        client.read_exact(&mut reply).await.unwrap();
        assert_eq!(&reply, b"S");
        assert!(task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn refuses_plaintext_startup() {
        let (mut client, server) = tokio::io::duplex(256);
        client
            .write_all(&startup_bytes(PROTOCOL_VERSION_3, &[("user", "bob")]))
            .await
            .unwrap();

        let result = accept_ssl_request(server, 1024).await;
        assert!(matches!(result, Err(WireError::SslRequired)));

        let mut tag = [0u8; 1];
        client.read_exact(&mut tag).await.unwrap();
        assert_eq!(tag[0], b'E');
    }

    #[tokio::test]
    async fn refuses_gssenc_request() {
        let (mut client, server) = tokio::io::duplex(256);
        let mut req = 8i32.to_be_bytes().to_vec();
        req.extend_from_slice(&GSSENC_REQUEST_CODE.to_be_bytes());
        client.write_all(&req).await.unwrap();
        assert!(matches!(
            accept_ssl_request(server, 1024).await,
            Err(WireError::SslRequired)
        ));
    }

    #[tokio::test]
    async fn startup_sequence_ends_ready() {
        let (mut client, server) = tokio::io::duplex(4096);
        client
            .write_all(&startup_bytes(
                PROTOCOL_VERSION_3,
                &[("user", "alice"), ("database", "quest")],
            ))
            .await
            .unwrap();

        let (r, w) = tokio::io::split(server);
        let mut reader = FrameReader::new(r);
        let mut writer = FrameWriter::new(w);
        let msg = complete_startup(&mut reader, &mut writer, &ServerParameters::new("16.8"))
            .await
            .unwrap();
        assert_eq!(msg.parameter("user"), Some("alice"));

        let mut tags = Vec::new();
        loop {
            let mut head = [0u8; 5];
            client.read_exact(&mut head).await.unwrap();
            let len = i32::from_be_bytes([head[1], head[2], head[3], head[4]]) as usize;
            let mut body = vec![0u8; len - 4];
            client.read_exact(&mut body).await.unwrap();
            tags.push(head[0]);
            if head[0] == b'Z' {
                break;
            }
        }
        assert_eq!(tags, b"RSSSSSSKZ".to_vec());
    }

    #[tokio::test]
    async fn rejects_old_protocol() {
        let (mut client, server) = tokio::io::duplex(1024);
        client
            .write_all(&startup_bytes(2 << 16, &[("user", "x")]))
            .await
            .unwrap();
        let (r, w) = tokio::io::split(server);
        let mut reader = FrameReader::new(r);
        let mut writer = FrameWriter::new(w);
        let result = complete_startup(&mut reader, &mut writer, &ServerParameters::new("16.8")).await;
        assert!(matches!(result, Err(WireError::Protocol(_))));
    }
}

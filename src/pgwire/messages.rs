//! Message types and byte layout.
//!
//! Backend frames are `tag: u8`, `len: i32` (counting itself), then the body.
//! Startup-phase frames have no tag; their first body word is a request code or
//! the protocol version.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{Result, WireError};

pub const SSL_REQUEST_CODE: i32 = 80877103;
pub const GSSENC_REQUEST_CODE: i32 = 80877104;
pub const CANCEL_REQUEST_CODE: i32 = 80877102;
/// Protocol 3.0.
pub const PROTOCOL_VERSION_3: i32 = 196608;

/// `text` type oid.
pub const TEXT_OID: i32 = 25;

pub const SQLSTATE_INVALID_AUTHORIZATION: &str = "28000";
pub const SQLSTATE_ADMIN_SHUTDOWN: &str = "57P01";
pub const SQLSTATE_PROTOCOL_VIOLATION: &str = "08P01";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupMessage {
    pub protocol_version: i32,
    pub parameters: Vec<(String, String)>,
}

impl StartupMessage {
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// An untagged frame sent before the session proper begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupFrame {
    SslRequest,
    GssEncRequest,
    CancelRequest,
    Startup(StartupMessage),
}

impl StartupFrame {
    /// Decode a startup-phase body (length prefix already removed).
    pub fn decode(mut body: Bytes) -> Result<Self> {
        if body.remaining() < 4 {
            return Err(WireError::protocol("startup frame too short"));
        }
        let code = body.get_i32();
        match code {
            SSL_REQUEST_CODE => Ok(StartupFrame::SslRequest),
            GSSENC_REQUEST_CODE => Ok(StartupFrame::GssEncRequest),
            CANCEL_REQUEST_CODE => Ok(StartupFrame::CancelRequest),
            protocol_version => {
                let parameters = decode_parameters(&mut body)?;
                Ok(StartupFrame::Startup(StartupMessage {
                    protocol_version,
                    parameters,
                }))
            }
        }
    }
}

fn decode_parameters(body: &mut Bytes) -> Result<Vec<(String, String)>> {
    let mut parameters = Vec::new();
    loop {
        let key = read_cstr(body)?;
        if key.is_empty() {
            break;
        }
        let value = read_cstr(body)?;
        parameters.push((key, value));
    }
    Ok(parameters)
}

fn read_cstr(body: &mut Bytes) -> Result<String> {
    let Some(end) = body.iter().position(|&b| b == 0) else {
        return Err(WireError::protocol("unterminated string"));
    };
    let raw = body.split_to(end);
    body.advance(1);
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// A tagged frame from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontendMessage {
    Query(String),
    Sync,
    Terminate,
    /// Anything else; the tag is kept for logging.
    Other(u8),
}

impl FrontendMessage {
    pub fn decode(tag: u8, mut body: Bytes) -> Result<Self> {
        match tag {
            b'Q' => Ok(FrontendMessage::Query(read_cstr(&mut body)?)),
            b'S' => Ok(FrontendMessage::Sync),
            b'X' => Ok(FrontendMessage::Terminate),
            other => Ok(FrontendMessage::Other(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Fatal,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorFields {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
}

impl ErrorFields {
    pub fn fatal(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Fatal,
            code,
            message: message.into(),
        }
    }
}

/// One column of a RowDescription. Every column we send is text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescription {
    pub name: String,
}

impl FieldDescription {
    pub fn text(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendMessage {
    AuthenticationOk,
    ParameterStatus { name: String, value: String },
    BackendKeyData { process_id: i32, secret_key: i32 },
    /// Always reports an idle transaction status.
    ReadyForQuery,
    RowDescription(Vec<FieldDescription>),
    DataRow(Vec<Option<String>>),
    CommandComplete(String),
    EmptyQueryResponse,
    /// NoticeResponse carrying only the message field.
    Notice(String),
    Error(ErrorFields),
}

impl BackendMessage {
    pub fn parameter(name: &str, value: &str) -> Self {
        BackendMessage::ParameterStatus {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn tag(&self) -> u8 {
        match self {
            BackendMessage::AuthenticationOk => b'R',
            BackendMessage::ParameterStatus { .. } => b'S',
            BackendMessage::BackendKeyData { .. } => b'K',
            BackendMessage::ReadyForQuery => b'Z',
            BackendMessage::RowDescription(_) => b'T',
            BackendMessage::DataRow(_) => b'D',
            BackendMessage::CommandComplete(_) => b'C',
            BackendMessage::EmptyQueryResponse => b'I',
            BackendMessage::Notice(_) => b'N',
            BackendMessage::Error(_) => b'E',
        }
    }

    /// Append this frame to `buf`.
    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u8(self.tag());
        let len_at = buf.len();
        buf.put_i32(0);

        match self {
            BackendMessage::AuthenticationOk => buf.put_i32(0),
            BackendMessage::ParameterStatus { name, value } => {
                put_cstr(buf, name);
                put_cstr(buf, value);
            }
            BackendMessage::BackendKeyData {
                process_id,
                secret_key,
            } => {
                buf.put_i32(*process_id);
                buf.put_i32(*secret_key);
            }
            BackendMessage::ReadyForQuery => buf.put_u8(b'I'),
            BackendMessage::RowDescription(fields) => {
                buf.put_i16(fields.len() as i16);
                for field in fields {
                    put_cstr(buf, &field.name);
                    buf.put_i32(0); // table oid
                    buf.put_i16(0); // column attnum
                    buf.put_i32(TEXT_OID);
                    buf.put_i16(-1); // typlen
                    buf.put_i32(-1); // typmod
                    buf.put_i16(0); // text format
                }
            }
            BackendMessage::DataRow(values) => {
                buf.put_i16(values.len() as i16);
                for value in values {
                    match value {
                        Some(v) => {
                            buf.put_i32(v.len() as i32);
                            buf.put_slice(v.as_bytes());
                        }
                        None => buf.put_i32(-1),
                    }
                }
            }
            BackendMessage::CommandComplete(tag) => put_cstr(buf, tag),
            BackendMessage::EmptyQueryResponse => {}
            BackendMessage::Notice(message) => {
                buf.put_u8(b'M');
                put_cstr(buf, message);
                buf.put_u8(0);
            }
            BackendMessage::Error(fields) => {
                buf.put_u8(b'S');
                put_cstr(buf, fields.severity.as_str());
                buf.put_u8(b'V');
                put_cstr(buf, fields.severity.as_str());
                buf.put_u8(b'C');
                put_cstr(buf, fields.code);
                buf.put_u8(b'M');
                put_cstr(buf, &fields.message);
                buf.put_u8(0);
            }
        }

        let len = (buf.len() - len_at) as i32;
        buf[len_at..len_at + 4].copy_from_slice(&len.to_be_bytes());
    }
}

/// NUL-terminated string; interior NULs would end the field early, so drop them.
fn put_cstr(buf: &mut BytesMut, s: &str) {
    buf.extend(s.bytes().filter(|&b| b != 0));
    buf.put_u8(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(msg: &BackendMessage) -> Vec<u8> {
        let mut buf = BytesMut::new();
        msg.encode(&mut buf);
        buf.to_vec()
    }

    #[test]
    fn ready_for_query_layout() {
        assert_eq!(encoded(&BackendMessage::ReadyForQuery), b"Z\0\0\0\x05I".to_vec());
    }

    #[test]
    fn notice_carries_only_message_field() {
        let bytes = encoded(&BackendMessage::Notice("hi".into()));
        assert_eq!(bytes, b"N\0\0\0\x09Mhi\0\0".to_vec());
    }

    #[test]
    fn row_description_declares_text_column() {
        let bytes = encoded(&BackendMessage::RowDescription(vec![FieldDescription::text(
            "version",
        )]));
        assert_eq!(bytes[0], b'T');
        let len = i32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]) as usize;
        assert_eq!(len, bytes.len() - 1);
        assert_eq!(&bytes[5..7], &1i16.to_be_bytes());
        assert_eq!(&bytes[7..15], b"version\0");
        // table oid, attnum, then type oid
        assert_eq!(&bytes[21..25], &TEXT_OID.to_be_bytes());
    }

    #[test]
    fn error_response_field_order() {
        let bytes = encoded(&BackendMessage::Error(ErrorFields::fatal(
            SQLSTATE_ADMIN_SHUTDOWN,
            "game over",
        )));
        assert_eq!(bytes[0], b'E');
        assert_eq!(&bytes[5..], b"SFATAL\0VFATAL\0C57P01\0Mgame over\0\0");
    }

    #[test]
    fn decodes_ssl_request_and_startup() {
        let ssl = Bytes::from(SSL_REQUEST_CODE.to_be_bytes().to_vec());
        assert_eq!(StartupFrame::decode(ssl).unwrap(), StartupFrame::SslRequest);

        let mut body = BytesMut::new();
        body.put_i32(PROTOCOL_VERSION_3);
        body.put_slice(b"user\0alice\0database\0quest\0\0");
        match StartupFrame::decode(body.freeze()).unwrap() {
            StartupFrame::Startup(msg) => {
                assert_eq!(msg.protocol_version, PROTOCOL_VERSION_3);
                assert_eq!(msg.parameter("user"), Some("alice"));
                assert_eq!(msg.parameter("database"), Some("quest"));
            }
            other => panic!("unexpected frame {:?}", other),
        }
    }

    #[test]
    fn rejects_unterminated_startup_parameters() {
        let mut body = BytesMut::new();
        body.put_i32(PROTOCOL_VERSION_3);
        body.put_slice(b"user\0alice");
        assert!(matches!(
            StartupFrame::decode(body.freeze()),
            Err(WireError::Protocol(_))
        ));
    }

    #[test]
    fn query_text_stops_at_nul() {
        let msg = FrontendMessage::decode(b'Q', Bytes::from_static(b"look\0")).unwrap();
        assert_eq!(msg, FrontendMessage::Query("look".into()));
        assert_eq!(
            FrontendMessage::decode(b'P', Bytes::new()).unwrap(),
            FrontendMessage::Other(b'P')
        );
    }
}

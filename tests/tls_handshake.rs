//! Full connection lifecycle against a listening server: SSLRequest, TLS, startup, play.

mod common;

use std::net::SocketAddr;
use std::sync::Arc;

use common::{notices, query, read_frame, read_turn, ssl_request, startup, tags, terminate};
use pgquest::config::Config;
use pgquest::server::GameServer;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_rustls::rustls::client::danger::{
    HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier,
};
use tokio_rustls::rustls::crypto::{
    ring, verify_tls12_signature, verify_tls13_signature, CryptoProvider,
};
use tokio_rustls::rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use tokio_rustls::rustls::{self, ClientConfig, DigitallySignedStruct, SignatureScheme};
use tokio_rustls::TlsConnector;

/// Accepts the server's throwaway certificate; signatures are still checked.
#[derive(Debug)]
struct AcceptAnyCert(Arc<CryptoProvider>);

impl ServerCertVerifier for AcceptAnyCert {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(message, cert, dss, &self.0.signature_verification_algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}

fn connector() -> TlsConnector {
    let provider = Arc::new(ring::default_provider());
    let config = ClientConfig::builder_with_provider(Arc::clone(&provider))
        .with_safe_default_protocol_versions()
        .unwrap()
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(AcceptAnyCert(provider)))
        .with_no_client_auth();
    TlsConnector::from(Arc::new(config))
}

async fn start_server() -> (SocketAddr, oneshot::Sender<()>, JoinHandle<anyhow::Result<()>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = GameServer::new(Config::default());
    let handle = tokio::spawn(server.serve(listener, async move {
        let _ = stop_rx.await;
    }));
    (addr, stop_tx, handle)
}

#[tokio::test]
async fn play_over_tls() {
    let (addr, stop, server) = start_server().await;

    let mut tcp = TcpStream::connect(addr).await.unwrap();
    tcp.write_all(&ssl_request()).await.unwrap();
    let mut answer = [0u8; 1];
    tcp.read_exact(&mut answer).await.unwrap();
    assert_eq!(&answer, b"S");

    let name = ServerName::try_from("localhost").unwrap();
    let mut tls = connector().connect(name, tcp).await.unwrap();

    tls.write_all(&startup(&[
        ("user", "adventurer"),
        ("database", "forest"),
        ("application_name", "psql"),
    ]))
    .await
    .unwrap();

    // Handshake: auth ok, parameters, key data, ready.
    let frames = read_turn(&mut tls).await;
    assert_eq!(tags(&frames), b"RSSSSSSKZ".to_vec());
    assert_eq!(frames[0].body, 0i32.to_be_bytes().to_vec());

    // Banner, then ready again.
    let frames = read_turn(&mut tls).await;
    assert_eq!(frames.last().unwrap().tag, b'Z');
    assert!(notices(&frames)
        .iter()
        .any(|l| l.contains("Text-Based Adventure")));

    tls.write_all(&query("look;")).await.unwrap();
    let frames = read_turn(&mut tls).await;
    assert!(notices(&frames)[0].starts_with("You are in a small room"));

    tls.write_all(&terminate()).await.unwrap();
    tls.shutdown().await.ok();

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn plaintext_startup_is_refused() {
    let (addr, stop, server) = start_server().await;

    let mut tcp = TcpStream::connect(addr).await.unwrap();
    tcp.write_all(&startup(&[("user", "adventurer")]))
        .await
        .unwrap();

    let frame = read_frame(&mut tcp).await.unwrap();
    assert_eq!(frame.tag, b'E');
    let fields = frame.fields();
    assert_eq!(fields.get(&b'S').map(String::as_str), Some("FATAL"));
    assert_eq!(fields.get(&b'C').map(String::as_str), Some("28000"));
    assert!(read_frame(&mut tcp).await.is_none());

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn every_connection_gets_its_own_world() {
    let (addr, stop, server) = start_server().await;

    let mut clients = Vec::new();
    for _ in 0..2 {
        let mut tcp = TcpStream::connect(addr).await.unwrap();
        tcp.write_all(&ssl_request()).await.unwrap();
        let mut answer = [0u8; 1];
        tcp.read_exact(&mut answer).await.unwrap();
        let name = ServerName::try_from("localhost").unwrap();
        let mut tls = connector().connect(name, tcp).await.unwrap();
        tls.write_all(&startup(&[("user", "adventurer")]))
            .await
            .unwrap();
        read_turn(&mut tls).await;
        read_turn(&mut tls).await;
        clients.push(tls);
    }

    clients[0].write_all(&query("take key")).await.unwrap();
    let frames = read_turn(&mut clients[0]).await;
    assert_eq!(notices(&frames), vec!["You take the key.".to_string()]);

    clients[1].write_all(&query("take key")).await.unwrap();
    let frames = read_turn(&mut clients[1]).await;
    assert_eq!(notices(&frames), vec!["You take the key.".to_string()]);

    clients[0].write_all(&query("inventory")).await.unwrap();
    let frames = read_turn(&mut clients[0]).await;
    assert_eq!(
        notices(&frames),
        vec!["You have the following items in your inventory: key".to_string()]
    );

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}

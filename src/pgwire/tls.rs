//! Server identity for the SSL upgrade.
//!
//! Each connection gets a freshly generated self-signed certificate for
//! `localhost`. Nothing is written to disk and no CA is involved, so clients have
//! to run with `sslmode=require` (encryption without verification).

use std::sync::Arc;

use log::debug;
use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio_rustls::rustls::{self, ServerConfig};
use tokio_rustls::TlsAcceptor;

use super::Result;

pub const CERT_SUBJECT: &str = "localhost";

/// Generate a throwaway certificate and key and wrap them in an acceptor.
pub fn ephemeral_acceptor() -> Result<TlsAcceptor> {
    let rcgen::CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(vec![CERT_SUBJECT.to_string()])?;
    let cert_der: CertificateDer<'static> = cert.der().clone();
    let key_der = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der()));

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_no_client_auth()
        .with_single_cert(vec![cert_der], key_der)?;
    debug!("generated ephemeral certificate for {}", CERT_SUBJECT);
    Ok(TlsAcceptor::from(Arc::new(config)))
}

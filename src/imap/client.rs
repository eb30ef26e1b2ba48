// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::config::ImapSettings;
use crate::imap::error::ImapError;
use crate::imap::session::{AsyncImapSessionWrapper, MailboxSession};
use async_imap::{Client as AsyncImapClient, Session as AsyncImapSession};
use async_trait::async_trait;
use futures_util::io::{AsyncRead, AsyncWrite};
use rustls::pki_types::ServerName as PkiServerName;
use rustls::{ClientConfig, RootCertStore};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream as TokioTcpStream;
use tokio::time::timeout;
use tokio_rustls::{client::TlsStream as TokioTlsStreamClient, TlsConnector};
use tokio_util::compat::{Compat, TokioAsyncReadCompatExt};

// --- Type Aliases ---

type BaseTcpStream = TokioTcpStream;
type BaseTlsStream = TokioTlsStreamClient<BaseTcpStream>;

// Compatibility wrappers for async_imap
type CompatTlsStream = Compat<BaseTlsStream>;
type CompatPlainStream = Compat<BaseTcpStream>;

/// Opens authenticated mailbox sessions.
///
/// The mail poller asks for one session per poll loop and owns it until logout.
#[async_trait]
pub trait MailboxConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn MailboxSession>, ImapError>;
}

/// Connects to a real IMAP server using async-imap.
///
/// TLS uses rustls with the platform's native root certificates.
#[derive(Debug, Clone)]
pub struct ImapConnector {
    settings: ImapSettings,
}

impl ImapConnector {
    pub fn new(settings: ImapSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl MailboxConnector for ImapConnector {
    async fn connect(&self) -> Result<Box<dyn MailboxSession>, ImapError> {
        let s = &self.settings;
        let auth_timeout = s.auth_timeout();
        log::info!("Connecting to IMAP server {}:{} as '{}' (tls: {})", s.host, s.port, s.user, s.tls);

        let tcp_stream = timeout(auth_timeout, BaseTcpStream::connect((s.host.as_str(), s.port)))
            .await
            .map_err(|_| ImapError::Timeout(format!("TCP connect to {}:{}", s.host, s.port)))??;
        log::debug!("TCP connected to {}:{}", s.host, s.port);

        if s.tls {
            let tls_stream = setup_tls_stream(&s.host, tcp_stream, auth_timeout).await?;
            let session = perform_imap_login(tls_stream.compat(), &s.user, &s.password, auth_timeout).await?;
            Ok(Box::new(AsyncImapSessionWrapper::<CompatTlsStream>::new(session)))
        } else {
            log::warn!("IMAP connection to {} is not encrypted", s.host);
            let session = perform_imap_login(tcp_stream.compat(), &s.user, &s.password, auth_timeout).await?;
            Ok(Box::new(AsyncImapSessionWrapper::<CompatPlainStream>::new(session)))
        }
    }
}

// --- Internal Connection Logic ---

fn build_tls_connector() -> Result<TlsConnector, ImapError> {
    let mut root_cert_store = RootCertStore::empty();
    let certs = rustls_native_certs::load_native_certs()?;
    let (added, ignored) = root_cert_store.add_parsable_certificates(certs);
    log::debug!("Loaded {} native certs, ignored {}.", added, ignored);
    if root_cert_store.is_empty() {
        log::warn!("Root certificate store is empty after loading native certs.");
    }

    let config = ClientConfig::builder()
        .with_root_certificates(root_cert_store)
        .with_no_client_auth();
    Ok(TlsConnector::from(Arc::new(config)))
}

/// Performs the TLS handshake on an established TCP stream.
async fn setup_tls_stream(
    host: &str,
    tcp_stream: BaseTcpStream,
    timeout_duration: Duration,
) -> Result<BaseTlsStream, ImapError> {
    let server_name: PkiServerName<'static> = PkiServerName::try_from(host.to_string())
        .map_err(|_| ImapError::Tls(format!("Invalid server name format: {}", host)))?;
    let connector = build_tls_connector()?;

    match timeout(timeout_duration, connector.connect(server_name, tcp_stream)).await {
        Ok(Ok(stream)) => {
            log::debug!("TLS handshake with {} successful.", host);
            Ok(stream)
        }
        Ok(Err(e)) => Err(ImapError::Tls(e.to_string())),
        Err(_) => Err(ImapError::Timeout(format!("TLS handshake with {}", host))),
    }
}

/// Reads the server greeting and logs in.
async fn perform_imap_login<T>(
    stream: T,
    username: &str,
    password: &str,
    timeout_duration: Duration,
) -> Result<AsyncImapSession<T>, ImapError>
where
    T: AsyncRead + AsyncWrite + Unpin + Debug + Send,
{
    let mut client = AsyncImapClient::new(stream);
    match timeout(timeout_duration, client.read_response()).await {
        Ok(Some(Ok(_greeting))) => log::debug!("IMAP greeting received"),
        Ok(Some(Err(e))) => return Err(ImapError::Connection(format!("Reading greeting failed: {}", e))),
        Ok(None) => return Err(ImapError::Connection("Server closed the connection before greeting".to_string())),
        Err(_) => {
            log::error!("No IMAP greeting within {:?}", timeout_duration);
            return Err(ImapError::Timeout("Server greeting".to_string()));
        }
    }
    log::debug!("IMAP client created. Attempting login for user '{}'...", username);

    match timeout(timeout_duration, client.login(username, password)).await {
        Ok(Ok(session)) => {
            log::info!("IMAP login successful for user: {}", username);
            Ok(session)
        }
        Ok(Err((e, _client))) => {
            log::error!("IMAP login failed for user {}: {:?}", username, e);
            Err(ImapError::Auth(e.to_string()))
        }
        Err(_) => {
            log::error!("IMAP login timed out for user {} after {:?}", username, timeout_duration);
            Err(ImapError::Timeout("Login timed out".to_string()))
        }
    }
}

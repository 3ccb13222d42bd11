//! Production transport: blocking HTTPS with a client certificate and basic authentication.

use std::{fs, path::Path, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use bon::bon;
use serde_json::Value;
use ureq::{
    Agent,
    tls::{Certificate, ClientCert, PemItem, PrivateKey, TlsConfig, parse_pem},
};

use crate::{
    api::transport::{Response, Transport},
    prelude::*,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client certificate chain and its private key, used for mutual TLS.
#[derive(Clone)]
pub struct ClientIdentity(ClientCert);

impl ClientIdentity {
    /// Parse the PEM-encoded certificate chain and private key.
    pub fn from_pem(certificate_pem: &[u8], key_pem: &[u8]) -> Result<Self> {
        let mut chain = parse_pem(certificate_pem)
            .filter_map(|item| match item {
                Ok(PemItem::Certificate(certificate)) => Some(Ok(certificate)),
                Ok(_) => None,
                Err(error) => Some(Err(error)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(Error::Identity)?;
        if chain.is_empty() {
            // Let `ureq` report why there is no certificate in there:
            chain.push(Certificate::from_pem(certificate_pem).map_err(Error::Identity)?);
        }
        let key = PrivateKey::from_pem(key_pem).map_err(Error::Identity)?;
        debug!(n_certificates = chain.len(), "loaded the client identity");
        Ok(Self(ClientCert::new_with_certs(&chain, key)))
    }

    #[instrument(skip_all, fields(certificate_path = %certificate_path.display(), key_path = %key_path.display()))]
    pub fn from_pem_files(certificate_path: &Path, key_path: &Path) -> Result<Self> {
        let read = |path: &Path| {
            fs::read(path).map_err(|source| Error::ReadIdentity { path: path.to_owned(), source })
        };
        Self::from_pem(&read(certificate_path)?, &read(key_path)?)
    }
}

/// Blocking [`Transport`] over `ureq`.
pub struct HttpsTransport {
    agent: Agent,
    authorization: String,
}

#[bon]
impl HttpsTransport {
    #[builder]
    pub fn new(
        #[builder(into)] username: String,
        #[builder(into)] password: String,
        identity: ClientIdentity,
        #[builder(default = DEFAULT_TIMEOUT)] timeout: Duration,
    ) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .tls_config(TlsConfig::builder().client_cert(Some(identity.0)).build())
            .build()
            .into();
        Self { agent, authorization: basic_authorization(&username, &password) }
    }
}

impl Transport for HttpsTransport {
    #[instrument(skip_all, level = Level::DEBUG, fields(url = url))]
    fn post(&self, url: &str, body: &Value) -> Result<Response> {
        let mut response =
            self.agent.post(url).header("Authorization", &self.authorization).send_json(body)?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string()?;
        debug!(status, n_bytes = body.len(), "received");
        Ok(Response { status, body })
    }
}

fn basic_authorization(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

//! Blocking XML-RPC client over HTTP(S)

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use super::Value;
use super::codec::{self, Response};
use crate::config::ServerConfig;
use crate::error::{Result, SyncError, rpc_fault, rpc_malformed, rpc_transport};

/// XML-RPC client bound to one endpoint
pub struct RpcClient {
    client: Client,
    endpoint: String,
}

impl RpcClient {
    /// Create a client for the server's `/rpc/api` endpoint
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|e| SyncError::RpcTransport {
                method: "client setup".to_string(),
                reason: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Invoke a remote method and return its single result value
    ///
    /// Faults become [`SyncError::RpcFault`]; anything that is not a
    /// well-formed `<methodResponse>` becomes [`SyncError::RpcMalformed`].
    pub fn call(&self, method: &str, params: &[Value]) -> Result<Value> {
        debug!(method, endpoint = %self.endpoint, "XML-RPC call");

        let body = codec::encode_call(method, params);
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml")
            .body(body)
            .send()
            .map_err(|e| rpc_transport(method, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(rpc_transport(method, format!("HTTP {status}")));
        }

        let text = response
            .text()
            .map_err(|e| rpc_transport(method, format!("Failed to read response: {e}")))?;

        match codec::decode_response(&text).map_err(|reason| rpc_malformed(method, reason))? {
            Response::Success(value) => Ok(value),
            Response::Fault { code, message } => {
                debug!(method, code, %message, "XML-RPC fault");
                Err(rpc_fault(method, code, message))
            }
        }
    }
}

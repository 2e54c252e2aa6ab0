use std::result::Result;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as B64_STANDARD;
use base64::Engine;
use hyper::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use hyper::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::ser::Serialize;
use tokio_native_tls::TlsConnector;

use crate::logging::AppLogContext;

use super::super::super::base_client::{BaseClient, BaseClientErrorReason};
use super::super::AppCarrierErrorReason;
use super::resources::EasyPostErrorBody;

const API_VERSION: &str = "v2";

pub(super) struct AppEasyPostClient {
    api_key: String,
    _base_client: BaseClient,
}

impl AppEasyPostClient {
    pub(super) async fn try_build(
        logctx: Arc<AppLogContext>,
        secure_connector: &TlsConnector,
        host: String,
        port: u16,
        api_key: String,
    ) -> Result<Self, AppCarrierErrorReason> {
        let _base_client = BaseClient::try_build(logctx, secure_connector, host, port).await?;
        Ok(Self {
            api_key,
            _base_client,
        })
    }

    pub(super) async fn execute_json<D, S>(
        &mut self,
        resource_path: &str,
        method: Method,
        body_obj: &S,
    ) -> Result<D, AppCarrierErrorReason>
    where
        D: DeserializeOwned + Send + 'static,
        S: Serialize,
    {
        let rawbody = serde_json::to_vec(body_obj).map_err(|e| {
            AppCarrierErrorReason::LowLvlNet(
                BaseClientErrorReason::SerialiseFailure(e.to_string()).into(),
            )
        })?;
        self._execute(resource_path, method, Some(rawbody)).await
    }

    pub(super) async fn execute_get<D>(&mut self, resource_path: &str) -> Result<D, AppCarrierErrorReason>
    where
        D: DeserializeOwned + Send + 'static,
    {
        self._execute(resource_path, Method::GET, None).await
    }

    async fn _execute<D>(
        &mut self,
        resource_path: &str,
        method: Method,
        rawbody: Option<Vec<u8>>,
    ) -> Result<D, AppCarrierErrorReason>
    where
        D: DeserializeOwned + Send + 'static,
    {
        // the API key is the username of basic authentication, with empty password
        let auth_val = {
            let encoded = B64_STANDARD.encode(format!("{}:", self.api_key.as_str()));
            HeaderValue::from_str(format!("Basic {encoded}").as_str())
                .map_err(|_e| AppCarrierErrorReason::CredentialCorrupted)?
        };
        let mut headers = vec![
            (AUTHORIZATION, auth_val),
            (ACCEPT, HeaderValue::from_static("application/json")),
        ];
        if rawbody.is_some() {
            headers.push((CONTENT_TYPE, HeaderValue::from_static("application/json")));
        }
        let uri = format!("/{API_VERSION}{resource_path}");
        let (rawresp, status) = self
            ._base_client
            .execute(uri.as_str(), method, headers, rawbody)
            .await?;
        if status.is_success() {
            return serde_json::from_slice::<D>(&rawresp)
                .map_err(|e| AppCarrierErrorReason::CorruptedResponse(e.to_string()));
        }
        let detail = serde_json::from_slice::<EasyPostErrorBody>(&rawresp)
            .map(|e| e.to_string())
            .unwrap_or_else(|_e| String::from_utf8_lossy(&rawresp).to_string());
        if status == StatusCode::NOT_FOUND {
            Err(AppCarrierErrorReason::NotFound(detail))
        } else {
            Err(AppCarrierErrorReason::RemoteRejected(status.as_u16(), detail))
        }
    } // end of fn _execute
} // end of impl AppEasyPostClient

use std::result::Result;
use std::sync::Arc;

use hyper::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use hyper::Method;
use serde::de::DeserializeOwned;
use serde::ser::Serialize;
use tokio_native_tls::TlsConnector;

use crate::logging::AppLogContext;

use super::super::super::base_client::{BaseClient, BaseClientErrorReason};
use super::super::AppCatalogErrorReason;
use super::resources::StripeErrorBody;

const API_VERSION: &str = "v1";

pub(super) struct AppStripeClient {
    secret_key: String,
    _base_client: BaseClient,
}

impl AppStripeClient {
    pub(super) async fn try_build(
        logctx: Arc<AppLogContext>,
        secure_connector: &TlsConnector,
        host: String,
        port: u16,
        secret_key: String,
    ) -> Result<Self, AppCatalogErrorReason> {
        let _base_client = BaseClient::try_build(logctx, secure_connector, host, port).await?;
        Ok(Self {
            secret_key,
            _base_client,
        })
    }

    /// GET request with query parameters serialised in form-urlencoded
    /// format, which is the only format accepted by Stripe list APIs
    pub(super) async fn execute_query<D, Q>(
        &mut self,
        resource_path: &str,
        query: &Q,
    ) -> Result<D, AppCatalogErrorReason>
    where
        D: DeserializeOwned + Send + 'static,
        Q: Serialize,
    {
        let qstr = serde_qs::to_string(query).map_err(|e| {
            AppCatalogErrorReason::LowLvlNet(
                BaseClientErrorReason::SerialiseFailure(e.to_string()).into(),
            )
        })?;
        let auth_val = {
            let s = format!("Bearer {}", self.secret_key.as_str());
            HeaderValue::from_str(s.as_str())
                .map_err(|_e| AppCatalogErrorReason::CredentialCorrupted)?
        };
        let headers = vec![
            (AUTHORIZATION, auth_val),
            (ACCEPT, HeaderValue::from_static("application/json")),
        ];
        let uri = format!("/{API_VERSION}{resource_path}?{qstr}");
        let (rawbody, status) = self
            ._base_client
            .execute(uri.as_str(), Method::GET, headers, None)
            .await?;
        if status.is_success() {
            serde_json::from_slice::<D>(&rawbody)
                .map_err(|e| AppCatalogErrorReason::CorruptedResponse(e.to_string()))
        } else {
            let detail = serde_json::from_slice::<StripeErrorBody>(&rawbody)
                .map(|e| e.to_string())
                .unwrap_or_else(|_e| String::from_utf8_lossy(&rawbody).to_string());
            Err(AppCatalogErrorReason::RemoteRejected(status.as_u16(), detail))
        }
    }
} // end of impl AppStripeClient

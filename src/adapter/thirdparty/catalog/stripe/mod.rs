mod client;
mod resources;

use std::boxed::Box;
use std::result::Result;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio_native_tls::TlsConnector;

use crate::confidentiality::AbstractConfidentiality;
use crate::config::App3rdPartyCfg;
use crate::constant::hard_limit::CATALOG_LIST_LIMIT;
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::{CatalogPriceModel, CatalogSkuModel};

use self::client::AppStripeClient;
use self::resources::{ListByProductQuery, ListObject, Price, Sku};
use super::super::base_client::build_secure_connector;
use super::{AbstractCatalogService, AppCatalogError, AppCatalogErrorReason, AppCatalogFnLabel};

pub(super) struct AppCatalogStripeCtx {
    cfg: Arc<App3rdPartyCfg>,
    secure_connector: TlsConnector,
    api_key: String,
    logctx: Arc<AppLogContext>,
}

impl AppCatalogStripeCtx {
    pub(super) fn try_build(
        cfg: Arc<App3rdPartyCfg>,
        cfdntl: Arc<Box<dyn AbstractConfidentiality>>,
        logctx: Arc<AppLogContext>,
    ) -> Result<Self, AppCatalogErrorReason> {
        let serial = cfdntl
            .try_get_payload(cfg.confidentiality_path.as_str())
            .map_err(|_e| AppCatalogErrorReason::MissingCredential)?;
        let api_key = serde_json::from_str::<String>(serial.as_str())
            .map_err(|_e| AppCatalogErrorReason::CredentialCorrupted)?;
        let secure_connector = build_secure_connector()?;
        Ok(Self {
            cfg,
            secure_connector,
            api_key,
            logctx,
        })
    }

    async fn list_by_product<T>(
        &self,
        path: &str,
        product_id: &str,
    ) -> Result<Vec<T>, AppCatalogErrorReason>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let mut _client = AppStripeClient::try_build(
            self.logctx.clone(),
            &self.secure_connector,
            self.cfg.host.clone(),
            self.cfg.port,
            self.api_key.clone(),
        )
        .await?;
        let query = ListByProductQuery {
            product: product_id,
            active: true,
            limit: CATALOG_LIST_LIMIT,
        };
        let resp = _client
            .execute_query::<ListObject<T>, _>(path, &query)
            .await?;
        let logctx = &self.logctx;
        app_log_event!(
            logctx,
            AppLogLevel::DEBUG,
            "path:{path}, product:{product_id}, num-found:{}",
            resp.data.len()
        );
        Ok(resp.data)
    }
} // end of impl AppCatalogStripeCtx

#[async_trait]
impl AbstractCatalogService for AppCatalogStripeCtx {
    async fn list_active_skus(
        &self,
        product_id: &str,
    ) -> Result<Vec<CatalogSkuModel>, AppCatalogError> {
        self.list_by_product::<Sku>("/skus", product_id)
            .await
            .map(|v| v.into_iter().map(CatalogSkuModel::from).collect())
            .map_err(|reason| AppCatalogError {
                reason,
                fn_label: AppCatalogFnLabel::ListSkus,
            })
    }

    async fn list_active_prices(
        &self,
        product_id: &str,
    ) -> Result<Vec<CatalogPriceModel>, AppCatalogError> {
        self.list_by_product::<Price>("/prices", product_id)
            .await
            .map(|v| v.into_iter().map(CatalogPriceModel::from).collect())
            .map_err(|reason| AppCatalogError {
                reason,
                fn_label: AppCatalogFnLabel::ListPrices,
            })
    }
}

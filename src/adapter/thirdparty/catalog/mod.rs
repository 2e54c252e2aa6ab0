mod stripe;

use std::boxed::Box;
use std::marker::{Send, Sync};
use std::result::Result;
use std::sync::Arc;

use async_trait::async_trait;

use crate::confidentiality::AbstractConfidentiality;
use crate::config::App3rdPartyCfg;
use crate::constant::thirdparty::CATALOG_STRIPE;
use crate::logging::AppLogContext;
use crate::model::{CatalogPriceModel, CatalogSkuModel};

use self::stripe::AppCatalogStripeCtx;
use super::BaseClientError;

/// read-only access to pricing records of products in the catalog
#[async_trait]
pub trait AbstractCatalogService: Send + Sync {
    async fn list_active_skus(
        &self,
        product_id: &str,
    ) -> Result<Vec<CatalogSkuModel>, AppCatalogError>;

    async fn list_active_prices(
        &self,
        product_id: &str,
    ) -> Result<Vec<CatalogPriceModel>, AppCatalogError>;
}

#[derive(Debug)]
pub enum AppCatalogErrorReason {
    InvalidConfig,
    MissingCredential,
    CredentialCorrupted,
    LowLvlNet(BaseClientError),
    RemoteRejected(u16, String), // http status code, error detail from remote server
    CorruptedResponse(String),
}

#[derive(Debug)]
pub enum AppCatalogFnLabel {
    TryBuild,
    ListSkus,
    ListPrices,
}

#[derive(Debug)]
pub struct AppCatalogError {
    pub reason: AppCatalogErrorReason,
    pub fn_label: AppCatalogFnLabel,
}

impl From<BaseClientError> for AppCatalogErrorReason {
    fn from(value: BaseClientError) -> Self {
        Self::LowLvlNet(value)
    }
}

pub(crate) fn app_catalog_context(
    cfgs: &[Arc<App3rdPartyCfg>],
    cfdntl: Arc<Box<dyn AbstractConfidentiality>>,
    logctx: Arc<AppLogContext>,
) -> Result<Box<dyn AbstractCatalogService>, AppCatalogError> {
    let cfg = cfgs
        .iter()
        .find(|c| c.name.to_lowercase().as_str() == CATALOG_STRIPE)
        .cloned()
        .ok_or(AppCatalogError {
            reason: AppCatalogErrorReason::InvalidConfig,
            fn_label: AppCatalogFnLabel::TryBuild,
        })?;
    let obj = AppCatalogStripeCtx::try_build(cfg, cfdntl, logctx).map_err(|reason| {
        AppCatalogError {
            reason,
            fn_label: AppCatalogFnLabel::TryBuild,
        }
    })?;
    Ok(Box::new(obj))
}

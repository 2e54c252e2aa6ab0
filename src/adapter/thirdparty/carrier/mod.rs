mod easypost;

use std::boxed::Box;
use std::marker::{Send, Sync};
use std::result::Result;
use std::sync::Arc;

use async_trait::async_trait;

use crate::confidentiality::AbstractConfidentiality;
use crate::config::App3rdPartyCfg;
use crate::constant::thirdparty::CARRIER_EASYPOST;
use crate::logging::AppLogContext;
use crate::model::{CustomsInfoModel, CustomsItemModel, ShipmentModel, ShipmentReqModel};

use self::easypost::AppCarrierEasyPostCtx;
use super::BaseClientError;

/// The carrier service is the system of record of shipments, this
/// application does not keep any shipment locally.
#[async_trait]
pub trait AbstractCarrierService: Send + Sync {
    /// return identifier of the newly created customs item
    async fn create_customs_item(&self, item: &CustomsItemModel) -> Result<String, AppCarrierError>;

    /// return identifier of the newly created customs info
    async fn create_customs_info(&self, info: &CustomsInfoModel) -> Result<String, AppCarrierError>;

    async fn create_shipment(&self, req: &ShipmentReqModel)
        -> Result<ShipmentModel, AppCarrierError>;

    async fn retrieve_shipment(&self, shipment_id: &str) -> Result<ShipmentModel, AppCarrierError>;

    async fn buy_shipment(
        &self,
        shipment_id: &str,
        rate_id: &str,
    ) -> Result<ShipmentModel, AppCarrierError>;
}

#[derive(Debug)]
pub enum AppCarrierErrorReason {
    InvalidConfig,
    MissingCredential,
    CredentialCorrupted,
    LowLvlNet(BaseClientError),
    InvalidIdentifier(String),
    NotFound(String),
    RemoteRejected(u16, String), // http status code, error detail from remote server
    CorruptedResponse(String),
}

#[derive(Debug)]
pub enum AppCarrierFnLabel {
    TryBuild,
    CreateCustomsItem,
    CreateCustomsInfo,
    CreateShipment,
    RetrieveShipment,
    BuyShipment,
}

#[derive(Debug)]
pub struct AppCarrierError {
    pub reason: AppCarrierErrorReason,
    pub fn_label: AppCarrierFnLabel,
}

impl From<BaseClientError> for AppCarrierErrorReason {
    fn from(value: BaseClientError) -> Self {
        Self::LowLvlNet(value)
    }
}

pub(crate) fn app_carrier_context(
    cfgs: &[Arc<App3rdPartyCfg>],
    cfdntl: Arc<Box<dyn AbstractConfidentiality>>,
    logctx: Arc<AppLogContext>,
) -> Result<Box<dyn AbstractCarrierService>, AppCarrierError> {
    let cfg = cfgs
        .iter()
        .find(|c| c.name.to_lowercase().as_str() == CARRIER_EASYPOST)
        .cloned()
        .ok_or(AppCarrierError {
            reason: AppCarrierErrorReason::InvalidConfig,
            fn_label: AppCarrierFnLabel::TryBuild,
        })?;
    let obj = AppCarrierEasyPostCtx::try_build(cfg, cfdntl, logctx).map_err(|reason| {
        AppCarrierError {
            reason,
            fn_label: AppCarrierFnLabel::TryBuild,
        }
    })?;
    Ok(Box::new(obj))
}

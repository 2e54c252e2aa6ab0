mod client;
mod resources;

use std::boxed::Box;
use std::result::Result;
use std::sync::Arc;

use async_trait::async_trait;
use hyper::Method;
use tokio_native_tls::TlsConnector;

use crate::confidentiality::AbstractConfidentiality;
use crate::config::App3rdPartyCfg;
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::{CustomsInfoModel, CustomsItemModel, ShipmentModel, ShipmentReqModel};

use self::client::AppEasyPostClient;
use self::resources::{
    BuyShipment, CreateCustomsInfo, CreateCustomsItem, CreateShipment, CreatedObject, ObjectRef,
    Shipment,
};
use super::super::base_client::build_secure_connector;
use super::{AbstractCarrierService, AppCarrierError, AppCarrierErrorReason, AppCarrierFnLabel};

// object IDs are embedded in request path, e.g. `shp_0a1b2c`
fn check_object_id(id_: &str) -> Result<(), AppCarrierErrorReason> {
    let valid = !id_.is_empty() && id_.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppCarrierErrorReason::InvalidIdentifier(id_.to_string()))
    }
}

pub(super) struct AppCarrierEasyPostCtx {
    cfg: Arc<App3rdPartyCfg>,
    secure_connector: TlsConnector,
    api_key: String,
    logctx: Arc<AppLogContext>,
}

impl AppCarrierEasyPostCtx {
    pub(super) fn try_build(
        cfg: Arc<App3rdPartyCfg>,
        cfdntl: Arc<Box<dyn AbstractConfidentiality>>,
        logctx: Arc<AppLogContext>,
    ) -> Result<Self, AppCarrierErrorReason> {
        let serial = cfdntl
            .try_get_payload(cfg.confidentiality_path.as_str())
            .map_err(|_e| AppCarrierErrorReason::MissingCredential)?;
        let api_key = serde_json::from_str::<String>(serial.as_str())
            .map_err(|_e| AppCarrierErrorReason::CredentialCorrupted)?;
        let secure_connector = build_secure_connector()?;
        Ok(Self {
            cfg,
            secure_connector,
            api_key,
            logctx,
        })
    }

    async fn build_client(&self) -> Result<AppEasyPostClient, AppCarrierErrorReason> {
        AppEasyPostClient::try_build(
            self.logctx.clone(),
            &self.secure_connector,
            self.cfg.host.clone(),
            self.cfg.port,
            self.api_key.clone(),
        )
        .await
    }

    async fn _create_customs_item(
        &self,
        item: &CustomsItemModel,
    ) -> Result<String, AppCarrierErrorReason> {
        let body = CreateCustomsItem::from(item);
        let mut _client = self.build_client().await?;
        let created = _client
            .execute_json::<CreatedObject, _>("/customs_items", Method::POST, &body)
            .await?;
        Ok(created.id)
    }

    async fn _create_customs_info(
        &self,
        info: &CustomsInfoModel,
    ) -> Result<String, AppCarrierErrorReason> {
        let body = CreateCustomsInfo::from(info);
        let mut _client = self.build_client().await?;
        let created = _client
            .execute_json::<CreatedObject, _>("/customs_infos", Method::POST, &body)
            .await?;
        Ok(created.id)
    }

    async fn _create_shipment(
        &self,
        req: &ShipmentReqModel,
    ) -> Result<ShipmentModel, AppCarrierErrorReason> {
        let body = CreateShipment::from(req);
        let mut _client = self.build_client().await?;
        let shipment = _client
            .execute_json::<Shipment, _>("/shipments", Method::POST, &body)
            .await?;
        let logctx = &self.logctx;
        app_log_event!(
            logctx,
            AppLogLevel::DEBUG,
            "shipment:{}, num-rates:{}",
            shipment.id.as_str(),
            shipment.rates.len()
        );
        Ok(shipment.into())
    }

    async fn _retrieve_shipment(
        &self,
        shipment_id: &str,
    ) -> Result<ShipmentModel, AppCarrierErrorReason> {
        check_object_id(shipment_id)?;
        let path = format!("/shipments/{shipment_id}");
        let mut _client = self.build_client().await?;
        let shipment = _client.execute_get::<Shipment>(path.as_str()).await?;
        Ok(shipment.into())
    }

    async fn _buy_shipment(
        &self,
        shipment_id: &str,
        rate_id: &str,
    ) -> Result<ShipmentModel, AppCarrierErrorReason> {
        check_object_id(shipment_id)?;
        let path = format!("/shipments/{shipment_id}/buy");
        let body = BuyShipment {
            rate: ObjectRef { id: rate_id },
        };
        let mut _client = self.build_client().await?;
        let shipment = _client
            .execute_json::<Shipment, _>(path.as_str(), Method::POST, &body)
            .await?;
        let logctx = &self.logctx;
        app_log_event!(
            logctx,
            AppLogLevel::INFO,
            "shipment:{shipment_id}, rate:{rate_id}, tracking-code:{:?}",
            shipment.tracking_code.as_ref()
        );
        Ok(shipment.into())
    }
} // end of impl AppCarrierEasyPostCtx

#[async_trait]
impl AbstractCarrierService for AppCarrierEasyPostCtx {
    async fn create_customs_item(&self, item: &CustomsItemModel) -> Result<String, AppCarrierError> {
        self._create_customs_item(item)
            .await
            .map_err(|reason| AppCarrierError {
                reason,
                fn_label: AppCarrierFnLabel::CreateCustomsItem,
            })
    }

    async fn create_customs_info(&self, info: &CustomsInfoModel) -> Result<String, AppCarrierError> {
        self._create_customs_info(info)
            .await
            .map_err(|reason| AppCarrierError {
                reason,
                fn_label: AppCarrierFnLabel::CreateCustomsInfo,
            })
    }

    async fn create_shipment(
        &self,
        req: &ShipmentReqModel,
    ) -> Result<ShipmentModel, AppCarrierError> {
        self._create_shipment(req)
            .await
            .map_err(|reason| AppCarrierError {
                reason,
                fn_label: AppCarrierFnLabel::CreateShipment,
            })
    }

    async fn retrieve_shipment(&self, shipment_id: &str) -> Result<ShipmentModel, AppCarrierError> {
        self._retrieve_shipment(shipment_id)
            .await
            .map_err(|reason| AppCarrierError {
                reason,
                fn_label: AppCarrierFnLabel::RetrieveShipment,
            })
    }

    async fn buy_shipment(
        &self,
        shipment_id: &str,
        rate_id: &str,
    ) -> Result<ShipmentModel, AppCarrierError> {
        self._buy_shipment(shipment_id, rate_id)
            .await
            .map_err(|reason| AppCarrierError {
                reason,
                fn_label: AppCarrierFnLabel::BuyShipment,
            })
    }
} // end of impl AppCarrierEasyPostCtx

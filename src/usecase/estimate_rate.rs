use std::boxed::Box;
use std::result::Result;
use std::sync::Arc;

use crate::adapter::notification::{AbstractNotificationContext, AppAdminEmailMsg};
use crate::adapter::thirdparty::{
    AbstractCarrierService, AbstractCatalogService, AppCarrierError, AppCatalogError,
};
use crate::config::{AppCustomsCfg, AppShippingCfg};
use crate::constant::shipping::{NOTIFY_SUBJECT_MISSING_METADATA, NOTIFY_TEMPLATE_ADMIN};
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::{
    AddressModel, CarrierAddressModel, CustomsInfoModel, CustomsItemModel, OrderLineModel,
    ParcelModel, ParcelModelError, ShipmentModelError, ShipmentReqModel, ShippingQuoteModel,
    UnitPriceModel,
};

#[derive(Debug)]
pub enum EstimateUcError {
    EmptyOrderLines,
    InvalidQuantity(String), // product ID
    InvalidDimension { product_id: String, field: String },
    MissingUnitPrice(String), // product ID
    NoRateAvailable(String),  // shipment ID
    CorruptedRate(ShipmentModelError),
    Catalog(AppCatalogError),
    Carrier(AppCarrierError),
}

impl From<ParcelModelError> for EstimateUcError {
    fn from(value: ParcelModelError) -> Self {
        match value {
            ParcelModelError::MissingField(product_id, field)
            | ParcelModelError::InvalidNumber(product_id, field, _) => Self::InvalidDimension {
                product_id,
                field: field.to_string(),
            },
            ParcelModelError::EmptyLines => Self::EmptyOrderLines,
        }
    }
}

impl From<ShipmentModelError> for EstimateUcError {
    fn from(value: ShipmentModelError) -> Self {
        match value {
            ShipmentModelError::NoRateAvailable(shipment_id) => Self::NoRateAvailable(shipment_id),
            others => Self::CorruptedRate(others),
        }
    }
}

pub struct ShippingRateEstimateUseCase {
    pub catalog: Arc<Box<dyn AbstractCatalogService>>,
    pub carrier: Arc<Box<dyn AbstractCarrierService>>,
    pub notifier: Arc<Box<dyn AbstractNotificationContext>>,
    pub shipping_cfg: Arc<AppShippingCfg>,
    pub recipients: Arc<Vec<String>>,
    pub logctx: Arc<AppLogContext>,
}

impl ShippingRateEstimateUseCase {
    pub async fn execute(
        self,
        lines: Vec<OrderLineModel>,
        address: AddressModel,
    ) -> Result<ShippingQuoteModel, EstimateUcError> {
        if lines.is_empty() {
            return Err(EstimateUcError::EmptyOrderLines);
        }
        if let Some(l) = lines.iter().find(|l| l.quantity == 0) {
            return Err(EstimateUcError::InvalidQuantity(l.product.id.clone()));
        }
        // administrators are alerted of every incomplete product before
        // any conversion error is reported to the caller
        for line in lines.iter() {
            self.report_missing_metadata(line).await;
        }
        let parcels = lines
            .iter()
            .map(|l| ParcelModel::try_from(&l.product))
            .collect::<Result<Vec<_>, ParcelModelError>>()?;
        let mut req = ShipmentReqModel {
            from: CarrierAddressModel::from(&self.shipping_cfg.origin),
            to: CarrierAddressModel::from(&address),
            parcel: ParcelModel::representative(&parcels)?,
            customs_info_id: None,
        };
        if !address.is_domestic() {
            if let Some(customs_cfg) = self.shipping_cfg.customs.as_ref() {
                let id_ = self.declare_customs(&lines, &parcels, customs_cfg).await?;
                req.customs_info_id = Some(id_);
            }
        }
        let shipment = self
            .carrier
            .create_shipment(&req)
            .await
            .map_err(EstimateUcError::Carrier)?;
        let logctx = &self.logctx;
        for r in shipment.corrupted_rates() {
            app_log_event!(
                logctx,
                AppLogLevel::WARNING,
                "shipment:{}, rate:{}, skip corrupted amount:{}",
                shipment.id.as_str(),
                r.id.as_str(),
                r.rate.as_str()
            );
        }
        let quote = ShippingQuoteModel::try_from_lowest(&shipment)?;
        app_log_event!(
            logctx,
            AppLogLevel::INFO,
            "shipment:{}, rate:{}, amount:{}",
            quote.shipment_id.as_str(),
            quote.rate_id.as_str(),
            quote.amount
        );
        Ok(quote)
    } // end of fn execute

    async fn report_missing_metadata(&self, line: &OrderLineModel) {
        let missing = line.product.missing_dimension_fields();
        if missing.is_empty() {
            return;
        }
        let message = format!(
            "Product {} is missing metadata fields in the catalog: {}",
            line.product.name.as_str(),
            missing.join(", ")
        );
        let msg = AppAdminEmailMsg::new(
            self.recipients.as_slice(),
            NOTIFY_SUBJECT_MISSING_METADATA,
            NOTIFY_TEMPLATE_ADMIN,
        )
        .with_param("message", message);
        if let Err(e) = self.notifier.send_email(msg).await {
            let logctx = &self.logctx;
            app_log_event!(
                logctx,
                AppLogLevel::WARNING,
                "product:{}, notify-error:{:?}",
                line.product.id.as_str(),
                e
            );
        }
    }

    async fn declare_customs(
        &self,
        lines: &[OrderLineModel],
        parcels: &[ParcelModel],
        customs_cfg: &AppCustomsCfg,
    ) -> Result<String, EstimateUcError> {
        let mut item_ids = Vec::with_capacity(lines.len());
        for (line, parcel) in lines.iter().zip(parcels.iter()) {
            let price = self.resolve_unit_price(line).await?;
            let item = CustomsItemModel::new(line, parcel, price);
            let id_ = self
                .carrier
                .create_customs_item(&item)
                .await
                .map_err(EstimateUcError::Carrier)?;
            item_ids.push(id_);
        }
        let info = CustomsInfoModel {
            item_ids,
            defaults: customs_cfg.clone(),
        };
        self.carrier
            .create_customs_info(&info)
            .await
            .map_err(EstimateUcError::Carrier)
    }

    async fn resolve_unit_price(
        &self,
        line: &OrderLineModel,
    ) -> Result<UnitPriceModel, EstimateUcError> {
        let product_id = line.product.id.as_str();
        if UnitPriceModel::should_lookup_sku(&line.product.kind) {
            let skus = self
                .catalog
                .list_active_skus(product_id)
                .await
                .map_err(EstimateUcError::Catalog)?;
            if let Some(p) = UnitPriceModel::from_first_sku(&skus) {
                return Ok(p);
            }
        }
        let prices = self
            .catalog
            .list_active_prices(product_id)
            .await
            .map_err(EstimateUcError::Catalog)?;
        UnitPriceModel::from_first_price(&prices)
            .ok_or(EstimateUcError::MissingUnitPrice(product_id.to_string()))
    }
} // end of impl ShippingRateEstimateUseCase

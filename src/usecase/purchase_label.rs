use std::boxed::Box;
use std::result::Result;
use std::sync::Arc;

use crate::adapter::thirdparty::{AbstractCarrierService, AppCarrierError};
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};
use crate::model::{ShipmentLabelModel, ShipmentModel, ShipmentModelError};

#[derive(Debug)]
pub enum PurchaseUcError {
    QuotedRateUnavailable(String), // rate ID
    NoRateAvailable(String),       // shipment ID
    CorruptedShipment(String),     // shipment ID
    CorruptedRate(ShipmentModelError),
    Carrier(AppCarrierError),
}

pub struct ShipmentPurchaseUseCase {
    pub carrier: Arc<Box<dyn AbstractCarrierService>>,
    pub logctx: Arc<AppLogContext>,
}

impl ShipmentPurchaseUseCase {
    /// Each call issues a new purchase request to the carrier. With a quoted
    /// rate, exactly that rate is bought, otherwise the current lowest rate
    /// of the shipment is chosen.
    pub async fn execute(
        self,
        shipment_id: String,
        rate_id: Option<String>,
    ) -> Result<ShipmentLabelModel, PurchaseUcError> {
        let shipment = self
            .carrier
            .retrieve_shipment(shipment_id.as_str())
            .await
            .map_err(PurchaseUcError::Carrier)?;
        let logctx = &self.logctx;
        for r in shipment.corrupted_rates() {
            app_log_event!(
                logctx,
                AppLogLevel::WARNING,
                "shipment:{shipment_id}, rate:{}, skip corrupted amount:{}",
                r.id.as_str(),
                r.rate.as_str()
            );
        }
        let chosen_rate_id = Self::choose_rate(&shipment, rate_id)?;
        let purchased = self
            .carrier
            .buy_shipment(shipment_id.as_str(), chosen_rate_id.as_str())
            .await
            .map_err(PurchaseUcError::Carrier)?;
        let (label_url, tracking_url) = match (purchased.label_url, purchased.tracker_url) {
            (Some(l), Some(t)) => (l, t),
            _others => {
                app_log_event!(
                    logctx,
                    AppLogLevel::ERROR,
                    "shipment:{shipment_id}, rate:{chosen_rate_id}, label or tracker missing"
                );
                return Err(PurchaseUcError::CorruptedShipment(shipment_id));
            }
        };
        Ok(ShipmentLabelModel {
            label_url,
            tracking_url,
        })
    }

    fn choose_rate(
        shipment: &ShipmentModel,
        quoted: Option<String>,
    ) -> Result<String, PurchaseUcError> {
        if let Some(rate_id) = quoted {
            shipment
                .find_rate(rate_id.as_str())
                .map(|r| r.id.clone())
                .map_err(|_e| PurchaseUcError::QuotedRateUnavailable(rate_id))
        } else {
            shipment
                .lowest_rate()
                .map(|r| r.id.clone())
                .map_err(|e| match e {
                    ShipmentModelError::NoRateAvailable(id_) => PurchaseUcError::NoRateAvailable(id_),
                    others => PurchaseUcError::CorruptedRate(others),
                })
        }
    }
} // end of impl ShipmentPurchaseUseCase

use std::boxed::Box;
use std::result::Result;
use std::sync::Arc;

use crate::adapter::thirdparty::{AbstractCarrierService, AppCarrierError};

#[derive(Debug)]
pub enum TrackUcError {
    Carrier(AppCarrierError),
}

pub struct ShipmentTrackUseCase {
    pub carrier: Arc<Box<dyn AbstractCarrierService>>,
}

impl ShipmentTrackUseCase {
    /// returns `(true, tracking-url)` once the carrier assigned a tracking code
    /// to the shipment, `(false, None)` otherwise
    pub async fn execute(self, shipment_id: String) -> Result<(bool, Option<String>), TrackUcError> {
        let shipment = self
            .carrier
            .retrieve_shipment(shipment_id.as_str())
            .await
            .map_err(TrackUcError::Carrier)?;
        Ok(shipment.tracking_state())
    }
}

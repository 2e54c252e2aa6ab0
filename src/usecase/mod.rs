mod estimate_rate;
mod purchase_label;
mod track_shipment;

pub use estimate_rate::{EstimateUcError, ShippingRateEstimateUseCase};
pub use purchase_label::{PurchaseUcError, ShipmentPurchaseUseCase};
pub use track_shipment::{ShipmentTrackUseCase, TrackUcError};

mod address;
mod customs;
mod parcel;
mod product;
mod shipment;

pub use address::{AddressModel, CarrierAddressModel, PostalAddressModel};
pub use customs::{
    CatalogPriceModel, CatalogSkuModel, CustomsInfoModel, CustomsItemModel, UnitPriceModel,
};
pub use parcel::{ParcelModel, ParcelModelError};
pub use product::{OrderLineModel, ProductKind, ProductModel};
pub use shipment::{
    RateModel, ShipmentLabelModel, ShipmentModel, ShipmentModelError, ShipmentReqModel,
    ShippingQuoteModel,
};

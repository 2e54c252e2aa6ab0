mod base_client;
mod catalog;
mod carrier;

pub use self::base_client::{BaseClientError, BaseClientErrorReason};
pub use self::catalog::{
    AbstractCatalogService, AppCatalogError, AppCatalogErrorReason, AppCatalogFnLabel,
};
pub use self::carrier::{
    AbstractCarrierService, AppCarrierError, AppCarrierErrorReason, AppCarrierFnLabel,
};

pub(crate) use self::catalog::app_catalog_context;
pub(crate) use self::carrier::app_carrier_context;

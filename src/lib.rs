pub mod adapter;
pub mod confidentiality;
pub mod config;
pub mod constant;
pub mod error;
pub mod logging;
pub mod model;
pub mod usecase;

use std::boxed::Box;
use std::result::Result;
use std::sync::Arc;

use crate::adapter::notification::{
    app_notify_context, AbstractNotificationContext, AppNotifyError,
};
use crate::adapter::thirdparty::{
    app_carrier_context, app_catalog_context, AbstractCarrierService, AbstractCatalogService,
    AppCarrierError, AppCatalogError,
};
use crate::confidentiality::AbstractConfidentiality;
use crate::config::{AppConfig, AppShippingCfg};
use crate::error::AppConfidentialityError;
use crate::logging::AppLogContext;
use crate::usecase::{ShipmentPurchaseUseCase, ShipmentTrackUseCase, ShippingRateEstimateUseCase};

pub type AppLogAlias = Arc<String>;

pub struct AppSharedState {
    _config: Arc<AppConfig>,
    _log_ctx: Arc<AppLogContext>,
    _cfdntl: Arc<Box<dyn AbstractConfidentiality>>,
    _catalog: Arc<Box<dyn AbstractCatalogService>>,
    _carrier: Arc<Box<dyn AbstractCarrierService>>,
    _notifier: Arc<Box<dyn AbstractNotificationContext>>,
    _recipients: Arc<Vec<String>>,
}

#[derive(Debug)]
pub enum ShrStateInitProgress {
    Confidentiality,
    Notification,
    Catalog,
    Carrier,
}

#[derive(Debug)]
pub struct ShrStateInitError {
    pub progress: ShrStateInitProgress,
}
impl From<AppConfidentialityError> for ShrStateInitError {
    fn from(_value: AppConfidentialityError) -> Self {
        Self {
            progress: ShrStateInitProgress::Confidentiality,
        }
    }
}
impl From<AppNotifyError> for ShrStateInitError {
    fn from(_value: AppNotifyError) -> Self {
        Self {
            progress: ShrStateInitProgress::Notification,
        }
    }
}
impl From<AppCatalogError> for ShrStateInitError {
    fn from(_value: AppCatalogError) -> Self {
        Self {
            progress: ShrStateInitProgress::Catalog,
        }
    }
}
impl From<AppCarrierError> for ShrStateInitError {
    fn from(_value: AppCarrierError) -> Self {
        Self {
            progress: ShrStateInitProgress::Carrier,
        }
    }
}

impl AppSharedState {
    pub fn new(cfg: AppConfig) -> Result<Self, ShrStateInitError> {
        let logctx = {
            let lc = AppLogContext::new(&cfg.basepath, &cfg.api_server.logging);
            Arc::new(lc)
        };
        let _cfdntl = {
            let c = confidentiality::build_context(&cfg)?;
            Arc::new(c)
        };
        let tp_cfgs = cfg.api_server.third_parties.as_slice();
        let _catalog = {
            let c = app_catalog_context(tp_cfgs, _cfdntl.clone(), logctx.clone())?;
            Arc::new(c)
        };
        let _carrier = {
            let c = app_carrier_context(tp_cfgs, _cfdntl.clone(), logctx.clone())?;
            Arc::new(c)
        };
        let notify_cfg = &cfg.api_server.notification;
        let _notifier = {
            let n = app_notify_context(notify_cfg, _cfdntl.clone(), logctx.clone())?;
            Arc::new(n)
        };
        let _recipients = Arc::new(notify_cfg.recipients.clone());
        Ok(Self {
            _config: Arc::new(cfg),
            _log_ctx: logctx,
            _cfdntl,
            _catalog,
            _carrier,
            _notifier,
            _recipients,
        })
    }

    pub fn catalog_context(&self) -> Arc<Box<dyn AbstractCatalogService>> {
        self._catalog.clone()
    }
    pub fn carrier_context(&self) -> Arc<Box<dyn AbstractCarrierService>> {
        self._carrier.clone()
    }
    pub fn notify_context(&self) -> Arc<Box<dyn AbstractNotificationContext>> {
        self._notifier.clone()
    }
    pub fn log_context(&self) -> Arc<AppLogContext> {
        self._log_ctx.clone()
    }
    pub fn config(&self) -> Arc<AppConfig> {
        self._config.clone()
    }
    pub fn shipping_config(&self) -> Arc<AppShippingCfg> {
        self._config.api_server.shipping.clone()
    }

    pub fn estimate_usecase(&self) -> ShippingRateEstimateUseCase {
        ShippingRateEstimateUseCase {
            catalog: self.catalog_context(),
            carrier: self.carrier_context(),
            notifier: self.notify_context(),
            shipping_cfg: self.shipping_config(),
            recipients: self._recipients.clone(),
            logctx: self.log_context(),
        }
    }
    pub fn purchase_usecase(&self) -> ShipmentPurchaseUseCase {
        ShipmentPurchaseUseCase {
            carrier: self.carrier_context(),
            logctx: self.log_context(),
        }
    }
    pub fn track_usecase(&self) -> ShipmentTrackUseCase {
        ShipmentTrackUseCase {
            carrier: self.carrier_context(),
        }
    }
} // end of impl AppSharedState

impl Clone for AppSharedState {
    fn clone(&self) -> Self {
        Self {
            _config: self._config.clone(),
            _log_ctx: self._log_ctx.clone(),
            _cfdntl: self._cfdntl.clone(),
            _catalog: self._catalog.clone(),
            _carrier: self._carrier.clone(),
            _notifier: self._notifier.clone(),
            _recipients: self._recipients.clone(),
        }
    }
}

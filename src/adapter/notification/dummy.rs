use std::result::Result;
use std::sync::Arc;

use async_trait::async_trait;

use crate::logging::{app_log_event, AppLogContext, AppLogLevel};

use super::{AbstractNotificationContext, AppAdminEmailMsg, AppNotifyError};

pub(super) struct AppDummyNotifyContext {
    _logctx: Arc<AppLogContext>,
}

impl AppDummyNotifyContext {
    pub(super) fn new(_logctx: Arc<AppLogContext>) -> Self {
        Self { _logctx }
    }
}

#[async_trait]
impl AbstractNotificationContext for AppDummyNotifyContext {
    async fn send_email(&self, msg: AppAdminEmailMsg) -> Result<(), AppNotifyError> {
        let logctx = &self._logctx;
        app_log_event!(
            logctx,
            AppLogLevel::INFO,
            "recipients:{:?}, subject:{}, template:{}, params:{:?}",
            msg.recipients,
            msg.subject.as_str(),
            msg.template.as_str(),
            msg.params
        );
        Ok(())
    }
}

mod amqp;
mod celery;
mod dummy;

use std::boxed::Box;
use std::collections::HashMap;
use std::marker::{Send, Sync};
use std::result::Result;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::confidentiality::AbstractConfidentiality;
use crate::config::{AppNotifyCfg, AppNotifyHandlerCfg};
use crate::logging::AppLogContext;

use self::amqp::AppAmqpNotifyContext;
use self::dummy::AppDummyNotifyContext;

/// keyword arguments of the remote e-mail task, the task renders
/// `template` with `params` then sends it to all the `recipients`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppAdminEmailMsg {
    pub recipients: Vec<String>,
    pub subject: String,
    pub template: String,
    pub params: HashMap<String, String>,
}

#[derive(Debug)]
pub enum AppNotifyErrorReason {
    InvalidCredential,
    CorruptedCredential,
    CorruptedPayload(String),
    LowLevelConn(String),
    SysIo(std::io::ErrorKind, String),
    InternalConfig(String),
    RequestConfirm(String),
    NotSupport,
}

#[derive(Debug)]
pub enum AppNotifyFnLabel {
    InitCtx,
    AcquireConn,
    SendEmail,
}

#[derive(Debug)]
pub struct AppNotifyError {
    pub fn_label: AppNotifyFnLabel,
    pub reason: AppNotifyErrorReason,
}

#[async_trait]
pub trait AbstractNotificationContext: Send + Sync {
    async fn send_email(&self, msg: AppAdminEmailMsg) -> Result<(), AppNotifyError>;
}

pub(crate) fn app_notify_context(
    cfg: &AppNotifyCfg,
    cfdntl: Arc<Box<dyn AbstractConfidentiality>>,
    logctx: Arc<AppLogContext>,
) -> Result<Box<dyn AbstractNotificationContext>, AppNotifyError> {
    match &cfg.handler {
        AppNotifyHandlerCfg::dummy => {
            let obj = AppDummyNotifyContext::new(logctx);
            Ok(Box::new(obj))
        }
        AppNotifyHandlerCfg::AMQP(c) => {
            let obj = AppAmqpNotifyContext::try_build(c, cfdntl, logctx)?;
            Ok(Box::new(obj))
        }
    }
}

impl AppAdminEmailMsg {
    pub fn new(recipients: &[String], subject: &str, template: &str) -> Self {
        Self {
            recipients: recipients.to_vec(),
            subject: subject.to_string(),
            template: template.to_string(),
            params: HashMap::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: String) -> Self {
        let _discarded = self.params.insert(key.to_string(), value);
        self
    }
}

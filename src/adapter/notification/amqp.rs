use std::boxed::Box;
use std::result::Result;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, Utc};
use deadpool_lapin::{Config as DeadpConfig, Pool, PoolConfig, Runtime, Timeouts as DeadpTimeouts};
use lapin::options::{BasicPublishOptions, ConfirmSelectOptions};
use lapin::protocol::basic::AMQPProperties;
use lapin::publisher_confirm::Confirmation;
use lapin::types::{AMQPValue, FieldTable, LongString};
use lapin::{ConnectionProperties, Error as LapinError};
use serde::Deserialize;

use crate::confidentiality::AbstractConfidentiality;
use crate::config::AppNotifyAmqpCfg;
use crate::constant::{app_meta, hard_limit};
use crate::logging::{app_log_event, AppLogContext, AppLogLevel};

use super::celery::serialize_msg_body;
use super::{
    AbstractNotificationContext, AppAdminEmailMsg, AppNotifyError, AppNotifyErrorReason,
    AppNotifyFnLabel,
};

#[allow(clippy::upper_case_acronyms)]
#[derive(Deserialize)]
struct SECRET {
    host: String,
    port: u16,
    username: String,
    password: String,
}

struct InnerBinding {
    exchange: String,
    routing_key: String,
    durable: bool,
    task_name: String,
}

pub(super) struct AppAmqpNotifyContext {
    _logctx: Arc<AppLogContext>,
    _pool: Pool,
    _binding: InnerBinding,
}

impl From<LapinError> for AppNotifyErrorReason {
    fn from(value: LapinError) -> Self {
        match value {
            LapinError::IOError(ioe) => Self::SysIo(ioe.kind(), ioe.to_string()),
            LapinError::ParsingError(e) => Self::CorruptedPayload(e.to_string()),
            LapinError::SerialisationError(e) => Self::CorruptedPayload(e.to_string()),
            LapinError::ChannelsLimitReached => Self::InternalConfig("channel-limit".to_string()),
            LapinError::InvalidChannel(num) => {
                Self::InternalConfig(format!("invalid-channel: {num}"))
            }
            LapinError::InvalidConnectionState(state) => {
                Self::LowLevelConn(format!("conn-state: {:?}", state))
            }
            LapinError::InvalidChannelState(state) => {
                Self::LowLevelConn(format!("channel-state: {:?}", state))
            }
            LapinError::ProtocolError(e) => Self::LowLevelConn(e.to_string()),
            LapinError::MissingHeartbeatError => {
                Self::LowLevelConn("amqp-no-heartbeat".to_string())
            }
            LapinError::InvalidProtocolVersion(ver) => {
                Self::LowLevelConn(format!("amqp-version: {ver}"))
            }
            _ => Self::NotSupport,
        }
    }
} // end of AppNotifyErrorReason

fn generate_task_id() -> String {
    let thread_id = std::thread::current().id();
    let (timefmt, nsecs) = {
        let now = Local::now().fixed_offset();
        (now.format("%Y%m%d.%H%M%S").to_string(), now.timestamp_subsec_nanos())
    };
    format!("{}.{:?}.{}.{}", app_meta::LABAL, thread_id, timefmt, nsecs)
}

impl AppAmqpNotifyContext {
    pub(super) fn try_build(
        app_cfg: &AppNotifyAmqpCfg,
        cfdntl: Arc<Box<dyn AbstractConfidentiality>>,
        _logctx: Arc<AppLogContext>,
    ) -> Result<Self, AppNotifyError> {
        if app_cfg.max_connections > hard_limit::MAX_AMQP_CONNECTIONS {
            let detail = format!("max-conns: {}", app_cfg.max_connections);
            return Err(Self::_map_err_init(AppNotifyErrorReason::InternalConfig(
                detail,
            )));
        }
        let uri = Self::_setup_broker_uri(app_cfg, cfdntl)?;
        let cfg = Self::_setup_lapin_config(app_cfg, uri);
        let _pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| Self::_map_err_init(AppNotifyErrorReason::LowLevelConn(e.to_string())))?;
        let b = &app_cfg.binding;
        let _binding = InnerBinding {
            exchange: b.exchange.clone(),
            routing_key: b.routing_key.clone(),
            durable: b.durable,
            task_name: b.python_celery_task.clone(),
        };
        Ok(Self {
            _logctx,
            _pool,
            _binding,
        })
    }

    /// `deadpool-lapin` accepts broker URI only in string format
    fn _setup_broker_uri(
        app_cfg: &AppNotifyAmqpCfg,
        cfdntl: Arc<Box<dyn AbstractConfidentiality>>,
    ) -> Result<String, AppNotifyError> {
        let serial = cfdntl
            .try_get_payload(app_cfg.confidential_path.as_str())
            .map_err(|_e| Self::_map_err_init(AppNotifyErrorReason::InvalidCredential))?;
        let secret = serde_json::from_str::<SECRET>(serial.as_str())
            .map_err(|_e| Self::_map_err_init(AppNotifyErrorReason::CorruptedCredential))?;
        let out = format!(
            "amqp://{}:{}@{}:{}/{}?channel_max={}&heartbeat={}",
            secret.username,
            secret.password,
            secret.host,
            secret.port,
            app_cfg.attributes.vhost.as_str(),
            app_cfg.attributes.max_channels,
            app_cfg.attributes.timeout_secs,
        );
        Ok(out)
    }

    fn _setup_lapin_config(app_cfg: &AppNotifyAmqpCfg, uri: String) -> DeadpConfig {
        let timeout_secs = (app_cfg.attributes.timeout_secs as u64) << 2;
        let timeouts = DeadpTimeouts {
            wait: Some(std::time::Duration::new(timeout_secs, 0)),
            create: Some(std::time::Duration::new(timeout_secs, 0)),
            recycle: None,
        };
        let mut poolcfg = PoolConfig::new(app_cfg.max_connections as usize);
        poolcfg.timeouts = timeouts;
        DeadpConfig {
            connection_properties: ConnectionProperties::default(),
            url: Some(uri),
            pool: Some(poolcfg),
        }
    }

    /// headers required by Celery consumer to locate the task function
    fn celery_headers(task_name: &str, task_id: &str) -> FieldTable {
        let mut headers = FieldTable::default();
        let pairs = [
            ("lang", "py"),
            ("task", task_name),
            ("id", task_id),
            ("root_id", task_id),
            ("origin", app_meta::LABAL),
        ];
        for (k, v) in pairs {
            let v = AMQPValue::LongString(LongString::from(v.to_string()));
            headers.insert(k.into(), v);
        }
        headers
    }

    async fn publish(&self, payload: Vec<u8>) -> Result<Confirmation, AppNotifyError> {
        let conn = self._pool.get().await.map_err(|e| {
            Self::_map_err_acquire(AppNotifyErrorReason::LowLevelConn(e.to_string()))
        })?;
        let chn = conn
            .create_channel()
            .await
            .map_err(|e| Self::_map_err_acquire(e.into()))?;
        chn.confirm_select(ConfirmSelectOptions { nowait: false })
            .await
            .map_err(|e| Self::_map_err_acquire(e.into()))?;
        let bind = &self._binding;
        let task_id = generate_task_id();
        let properties = AMQPProperties::default()
            .with_correlation_id(task_id.as_str().into())
            .with_app_id(app_meta::LABAL.into())
            .with_content_encoding("utf-8".into())
            .with_content_type("application/json".into())
            .with_delivery_mode(if bind.durable { 2 } else { 1 })
            .with_timestamp(Utc::now().timestamp() as u64)
            .with_headers(Self::celery_headers(bind.task_name.as_str(), task_id.as_str()));
        // broker has to return unroutable message whenever the routing key goes wrong
        let confirm = chn
            .basic_publish(
                bind.exchange.as_str(),
                bind.routing_key.as_str(),
                BasicPublishOptions {
                    mandatory: true,
                    immediate: false,
                },
                &payload,
                properties,
            )
            .await
            .map_err(|e| Self::_map_err_send(e.into()))?
            .await
            .map_err(|e| Self::_map_err_send(e.into()))?;
        Ok(confirm)
    } // end of fn publish

    fn convert_confirm_to_error(value: Confirmation) -> Result<(), AppNotifyErrorReason> {
        let detail = match value {
            Confirmation::NotRequested => {
                // implicitly mean `confirm-select` does not take effect
                Some("amqp-confirm-failure".to_string())
            }
            Confirmation::Nack(_msg) => Some("amqp-unexpected-nack".to_string()),
            Confirmation::Ack(msg) => msg.map(|r| {
                format!(
                    "acker: {:?}, reply-code: {:?}, reply-detail: {:?}",
                    r.acker, r.reply_code, r.reply_text
                )
            }),
        };
        detail.map_or_else(|| Ok(()), |d| Err(AppNotifyErrorReason::RequestConfirm(d)))
    }

    fn _map_err_init(reason: AppNotifyErrorReason) -> AppNotifyError {
        AppNotifyError {
            fn_label: AppNotifyFnLabel::InitCtx,
            reason,
        }
    }
    fn _map_err_acquire(reason: AppNotifyErrorReason) -> AppNotifyError {
        AppNotifyError {
            fn_label: AppNotifyFnLabel::AcquireConn,
            reason,
        }
    }
    fn _map_err_send(reason: AppNotifyErrorReason) -> AppNotifyError {
        AppNotifyError {
            fn_label: AppNotifyFnLabel::SendEmail,
            reason,
        }
    }
} // end of impl AppAmqpNotifyContext

#[async_trait]
impl AbstractNotificationContext for AppAmqpNotifyContext {
    async fn send_email(&self, msg: AppAdminEmailMsg) -> Result<(), AppNotifyError> {
        let payload = serialize_msg_body(&msg).map_err(Self::_map_err_send)?;
        let confirm = self.publish(payload).await?;
        let logctx = &self._logctx;
        app_log_event!(
            logctx,
            AppLogLevel::DEBUG,
            "subject:{}, publish-confirm: {:?}",
            msg.subject.as_str(),
            confirm
        );
        Self::convert_confirm_to_error(confirm).map_err(Self::_map_err_send)
    }
}

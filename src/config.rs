use std::collections::hash_map::RandomState;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use serde::de::{Error as DeserializeError, Expected};
use serde::Deserialize;

use crate::constant::{env_vars, logging as const_log, thirdparty as const_3pty};
use crate::error::{AppCfgError, AppErrorCode};
use crate::AppLogAlias;

#[derive(Deserialize)]
pub struct AppLogHandlerCfg {
    pub min_level: const_log::Level,
    pub destination: const_log::Destination,
    pub alias: AppLogAlias,
    pub path: Option<String>,
}

#[derive(Deserialize)]
pub struct AppLoggerCfg {
    pub alias: AppLogAlias,
    pub handlers: Vec<String>,
    pub level: Option<const_log::Level>,
}

#[derive(Deserialize)]
pub struct AppLoggingCfg {
    pub handlers: Vec<AppLogHandlerCfg>,
    pub loggers: Vec<AppLoggerCfg>,
}

#[derive(Deserialize, Debug)]
pub struct App3rdPartyCfg {
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub name: String,
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub host: String,
    pub port: u16,
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub confidentiality_path: String,
}

#[derive(Deserialize)]
pub struct AppAmqpAttriCfg {
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub vhost: String,
    pub max_channels: u16,
    pub timeout_secs: u16,
}

#[derive(Deserialize)]
pub struct AppAmqpBindingCfg {
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub exchange: String,
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub routing_key: String,
    pub durable: bool,
    // full path of the task function in remote Celery consumer
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub python_celery_task: String,
}

#[derive(Deserialize)]
pub struct AppNotifyAmqpCfg {
    pub binding: AppAmqpBindingCfg,
    pub attributes: AppAmqpAttriCfg,
    pub max_connections: u16,
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub confidential_path: String,
}

#[allow(non_camel_case_types)]
#[derive(Deserialize)]
#[serde(tag = "handler_type")]
pub enum AppNotifyHandlerCfg {
    dummy,
    AMQP(AppNotifyAmqpCfg),
}

#[derive(Deserialize)]
pub struct AppNotifyCfg {
    // administrators who receive alerts e.g. incomplete product metadata
    pub recipients: Vec<String>,
    pub handler: AppNotifyHandlerCfg,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppShippingOriginCfg {
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub name: String,
    pub company: Option<String>,
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub street1: String,
    pub street2: Option<String>,
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub city: String,
    pub state: String,
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub zip: String,
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub country: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppCustomsCfg {
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub contents_type: String,
    pub contents_explanation: Option<String>,
    pub customs_certify: bool,
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub customs_signer: String,
    pub eel_pfc: Option<String>,
    pub non_delivery_option: Option<String>,
    pub restriction_type: Option<String>,
    pub restriction_comments: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct AppShippingCfg {
    pub origin: AppShippingOriginCfg,
    // customs declaration is skipped for international shipment
    // if this field is omitted
    pub customs: Option<AppCustomsCfg>,
}

#[derive(Deserialize)]
#[serde(tag = "source")]
pub enum AppConfidentialCfg {
    UserSpace {
        #[serde(deserialize_with = "jsn_deny_empty_string")]
        sys_path: String,
    },
}

#[derive(Deserialize)]
pub struct ApiServerCfg {
    pub logging: AppLoggingCfg,
    pub third_parties: Vec<Arc<App3rdPartyCfg>>,
    pub notification: AppNotifyCfg,
    pub shipping: Arc<AppShippingCfg>,
    pub confidentiality: AppConfidentialCfg,
}

pub struct AppBasepathCfg {
    pub system: String,
    pub service: String,
}

pub struct AppConfig {
    pub basepath: AppBasepathCfg,
    pub api_server: ApiServerCfg,
}

pub struct AppCfgInitArgs {
    pub env_var_map: HashMap<String, String, RandomState>,
}

impl AppCfgInitArgs {
    /// collect only the variables this service cares about
    pub fn from_env() -> Self {
        let env_var_map = std::env::vars()
            .filter(|(k, _v)| env_vars::EXPECTED_LABELS.contains(&k.as_str()))
            .collect();
        Self { env_var_map }
    }
}

impl AppConfig {
    pub fn new(args: AppCfgInitArgs) -> DefaultResult<Self, AppCfgError> {
        let mut env_var_map = args.env_var_map;
        let sys_basepath = if let Some(s) = env_var_map.remove(env_vars::SYS_BASEPATH) {
            s + "/"
        } else {
            return Err(AppCfgError {
                detail: None,
                code: AppErrorCode::MissingSysBasePath,
            });
        };
        let app_basepath = if let Some(a) = env_var_map.remove(env_vars::SERVICE_BASEPATH) {
            a + "/"
        } else {
            return Err(AppCfgError {
                detail: None,
                code: AppErrorCode::MissingAppBasePath,
            });
        };
        let api_srv_cfg = if let Some(cfg_path) = env_var_map.remove(env_vars::CFG_FILEPATH) {
            let fullpath = app_basepath.clone() + &cfg_path;
            Self::parse_from_file(fullpath)?
        } else {
            return Err(AppCfgError {
                detail: None,
                code: AppErrorCode::MissingConfigPath,
            });
        };
        Ok(Self {
            api_server: api_srv_cfg,
            basepath: AppBasepathCfg {
                system: sys_basepath,
                service: app_basepath,
            },
        })
    } // end of new

    pub fn parse_from_file(filepath: String) -> DefaultResult<ApiServerCfg, AppCfgError> {
        let fileobj = File::open(filepath).map_err(|e| AppCfgError {
            detail: Some(e.to_string()),
            code: AppErrorCode::IOerror(e.kind()),
        })?;
        let reader = BufReader::new(fileobj);
        let jsnobj = serde_json::from_reader::<BufReader<File>, ApiServerCfg>(reader).map_err(
            |e| AppCfgError {
                detail: Some(e.to_string()),
                code: AppErrorCode::InvalidJsonFormat,
            },
        )?;
        Self::_check_logging(&jsnobj.logging)?;
        Self::_check_third_parties(&jsnobj.third_parties)?;
        Self::_check_notification(&jsnobj.notification)?;
        Self::_check_shipping(&jsnobj.shipping)?;
        Ok(jsnobj)
    }

    fn _check_logging(obj: &AppLoggingCfg) -> DefaultResult<(), AppCfgError> {
        if obj.handlers.is_empty() {
            return Err(AppCfgError {
                detail: None,
                code: AppErrorCode::NoLogHandlerCfg,
            });
        } else if obj.loggers.is_empty() {
            return Err(AppCfgError {
                detail: None,
                code: AppErrorCode::NoLoggerCfg,
            });
        }
        if obj.handlers.iter().any(|h| h.alias.is_empty()) {
            return Err(AppCfgError {
                detail: None,
                code: AppErrorCode::MissingAliasLogHdlerCfg,
            });
        }
        if obj.loggers.iter().any(|l| l.alias.is_empty()) {
            return Err(AppCfgError {
                detail: None,
                code: AppErrorCode::MissingAliasLoggerCfg,
            });
        }
        if let Some(alogger) = obj.loggers.iter().find(|l| l.handlers.is_empty()) {
            let msg = format!("the logger does not have handler: {}", alogger.alias);
            return Err(AppCfgError {
                detail: Some(msg),
                code: AppErrorCode::NoHandlerInLoggerCfg,
            });
        }
        // for file-type handler, the field `path` has to be provided
        let no_path = obj.handlers.iter().find(|h| {
            matches!(h.destination, const_log::Destination::LOCALFS) && h.path.is_none()
        });
        if let Some(hdlr) = no_path {
            let msg = format!("file-type handler does not contain path: {}", hdlr.alias);
            return Err(AppCfgError {
                detail: Some(msg),
                code: AppErrorCode::InvalidHandlerLoggerCfg,
            });
        }
        let hdlr_aliases: HashSet<&str> = obj.handlers.iter().map(|h| h.alias.as_str()).collect();
        let invalid = obj.loggers.iter().find(|l| {
            l.handlers
                .iter()
                .any(|a| !hdlr_aliases.contains(a.as_str()))
        });
        if let Some(alogger) = invalid {
            let msg = format!(
                "the logger contains invalid handler alias: {}",
                alogger.alias
            );
            Err(AppCfgError {
                detail: Some(msg),
                code: AppErrorCode::InvalidHandlerLoggerCfg,
            })
        } else {
            Ok(())
        }
    } // end of _check_logging

    fn _check_third_parties(obj: &[Arc<App3rdPartyCfg>]) -> DefaultResult<(), AppCfgError> {
        let required = [const_3pty::CATALOG_STRIPE, const_3pty::CARRIER_EASYPOST];
        let missing = required
            .into_iter()
            .filter(|label| {
                !obj.iter()
                    .any(|c| c.name.to_lowercase().as_str() == *label)
            })
            .collect::<Vec<_>>();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppCfgError {
                detail: Some(missing.join(",")),
                code: AppErrorCode::MissingThirdPartyCfg,
            })
        }
    }

    fn _check_notification(obj: &AppNotifyCfg) -> DefaultResult<(), AppCfgError> {
        if obj.recipients.is_empty() || obj.recipients.iter().any(|r| r.is_empty()) {
            Err(AppCfgError {
                detail: Some("notification".to_string()),
                code: AppErrorCode::EmptyRecipientCfg,
            })
        } else {
            Ok(())
        }
    }

    fn _check_shipping(obj: &AppShippingCfg) -> DefaultResult<(), AppCfgError> {
        // ISO 3166 alpha-2 country code
        let country = obj.origin.country.as_str();
        let valid = country.len() == 2 && country.chars().all(|c| c.is_ascii_uppercase());
        if valid {
            Ok(())
        } else {
            Err(AppCfgError {
                detail: Some(format!("origin-country: {country}")),
                code: AppErrorCode::InvalidShippingCfg,
            })
        }
    }
} // end of impl AppConfig

struct ExpectNonEmptyString {
    min_len: u32,
}

impl Expected for ExpectNonEmptyString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        let msg = format!("minimum string length >= {}", self.min_len);
        formatter.write_str(msg.as_str())
    }
}

fn jsn_deny_empty_string<'de, D>(raw: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(raw)?;
    if s.is_empty() {
        let exp = ExpectNonEmptyString { min_len: 1 };
        Err(DeserializeError::invalid_length(0, &exp))
    } else {
        Ok(s)
    }
}

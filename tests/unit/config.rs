use std::collections::HashMap;

use shipping::config::{AppCfgInitArgs, AppConfig, AppNotifyHandlerCfg};
use shipping::constant::env_vars::{CFG_FILEPATH, SYS_BASEPATH};
use shipping::error::AppErrorCode;
use shipping::AppSharedState;

use super::{ut_setup_config, ut_try_setup_config};

#[test]
fn parse_ok() {
    let cfg = ut_setup_config("config_ok.json");
    let apisrv = &cfg.api_server;
    assert_eq!(apisrv.third_parties.len(), 2);
    assert_eq!(apisrv.notification.recipients.len(), 2);
    assert!(matches!(
        apisrv.notification.handler,
        AppNotifyHandlerCfg::dummy
    ));
    let origin = &apisrv.shipping.origin;
    assert_eq!(origin.country.as_str(), "US");
    assert_eq!(origin.street2.as_deref(), Some("Floor 5"));
    let customs = apisrv.shipping.customs.as_ref().unwrap();
    assert!(customs.customs_certify);
    assert_eq!(customs.contents_type.as_str(), "merchandise");
    assert!(customs.contents_explanation.is_none());
    assert!(cfg.basepath.system.ends_with('/'));
}

#[test]
fn parse_amqp_notify_handler() {
    let cfg = ut_setup_config("config_amqp_notify.json");
    let apisrv = &cfg.api_server;
    assert!(apisrv.shipping.customs.is_none());
    if let AppNotifyHandlerCfg::AMQP(c) = &apisrv.notification.handler {
        assert_eq!(c.binding.routing_key.as_str(), "notify.admin.email");
        assert!(c.binding.durable);
        assert_eq!(c.attributes.max_channels, 16);
        assert_eq!(c.max_connections, 2);
    } else {
        assert!(false);
    }
}

#[test]
fn missing_env_var() {
    let env_var_map = HashMap::from([
        (SYS_BASEPATH.to_string(), "/tmp".to_string()),
        (CFG_FILEPATH.to_string(), "whatever.json".to_string()),
    ]);
    let result = AppConfig::new(AppCfgInitArgs { env_var_map });
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.code, AppErrorCode::MissingAppBasePath);
    }
}

#[test]
fn config_file_not_exist() {
    let result = ut_try_setup_config("config_nonexist.json");
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.code, AppErrorCode::IOerror(std::io::ErrorKind::NotFound));
    }
}

#[test]
fn invalid_content() {
    let cases = [
        ("config_missing_carrier.json", AppErrorCode::MissingThirdPartyCfg),
        ("config_empty_recipient.json", AppErrorCode::EmptyRecipientCfg),
        ("config_logfile_nopath.json", AppErrorCode::InvalidHandlerLoggerCfg),
        ("config_logger_bad_handler.json", AppErrorCode::InvalidHandlerLoggerCfg),
        ("config_bad_origin_country.json", AppErrorCode::InvalidShippingCfg),
        ("config_empty_host.json", AppErrorCode::InvalidJsonFormat),
    ];
    for (fname, expect_code) in cases {
        let result = ut_try_setup_config(fname);
        assert!(result.is_err());
        if let Err(e) = result {
            assert_eq!(e.code, expect_code);
        }
    }
}

#[test]
fn missing_thirdparty_detail() {
    let result = ut_try_setup_config("config_missing_carrier.json");
    if let Err(e) = result {
        assert_eq!(e.detail.as_deref(), Some("easypost"));
    } else {
        assert!(false);
    }
}

#[test]
fn init_shared_state_ok() {
    let cfg = ut_setup_config("config_ok.json");
    let result = AppSharedState::new(cfg);
    assert!(result.is_ok());
    let shr_state = result.unwrap();
    assert_eq!(shr_state.shipping_config().origin.zip.as_str(), "94104");
    let cloned = shr_state.clone();
    assert_eq!(cloned.config().api_server.third_parties.len(), 2);
}

#[tokio::test]
async fn init_shared_state_amqp() {
    // connections are established lazily in the pool, the broker is
    // never contacted during initialization
    let cfg = ut_setup_config("config_amqp_notify.json");
    let result = AppSharedState::new(cfg);
    assert!(result.is_ok());
}

#[test]
fn init_args_from_env() {
    // variables unrelated to this service are never collected
    let args = AppCfgInitArgs::from_env();
    assert!(args
        .env_var_map
        .keys()
        .all(|k| [SYS_BASEPATH, CFG_FILEPATH, "SERVICE_BASE_PATH"].contains(&k.as_str())));
}

use std::fmt::Debug;

#[derive(Debug, Clone, PartialEq)]
pub enum AppErrorCode {
    MissingSysBasePath,
    MissingAppBasePath,
    MissingConfigPath,
    InvalidJsonFormat,
    MissingAliasLogHdlerCfg,
    MissingAliasLoggerCfg,
    NoLogHandlerCfg,
    NoLoggerCfg,
    NoHandlerInLoggerCfg,
    InvalidHandlerLoggerCfg,
    MissingThirdPartyCfg,
    EmptyRecipientCfg,
    InvalidShippingCfg,
    NoConfidentialityCfg,
    ExceedingMaxLimit,
    AcquireLockFailure,
    IOerror(std::io::ErrorKind),
} // end of AppErrorCode

#[derive(Debug)]
pub struct AppCfgError {
    pub code: AppErrorCode,
    pub detail: Option<String>,
}

#[derive(Debug)]
pub struct AppConfidentialityError {
    pub code: AppErrorCode,
    pub detail: String,
}

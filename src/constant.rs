pub mod env_vars {
    pub const SYS_BASEPATH: &str = "SYS_BASE_PATH";
    pub const SERVICE_BASEPATH: &str = "SERVICE_BASE_PATH";
    // relative path starting from app / service home folder
    pub const CFG_FILEPATH: &str = "CONFIG_FILE_PATH";
    pub const EXPECTED_LABELS: [&str; 3] = [SYS_BASEPATH, SERVICE_BASEPATH, CFG_FILEPATH];
}

pub mod app_meta {
    pub const LABAL: &str = "shipping";
}

pub mod hard_limit {
    pub const CONFIDENTIAL_SRC_NBYTES: u64 = 8196;
    // maximum number of items returned by a single list operation in
    // the catalog service
    pub const CATALOG_LIST_LIMIT: u16 = 100;
    pub const MAX_AMQP_CONNECTIONS: u16 = 32;
}

pub mod thirdparty {
    // label of each 3rd-party service in `third_parties` configuration
    pub const CATALOG_STRIPE: &str = "stripe";
    pub const CARRIER_EASYPOST: &str = "easypost";
}

pub mod shipping {
    pub const DOMESTIC_COUNTRY: &str = "US";
    // every declared item is assumed to be manufactured domestically
    pub const CUSTOMS_ORIGIN_COUNTRY: &str = "US";
    pub const METADATA_DIMENSION_FIELDS: [&str; 4] = ["height", "weight", "length", "width"];
    pub const METADATA_TARIFF_NUMBER: &str = "hs_tariff_number";
    pub const PRODUCT_TYPE_GOOD: &str = "good";
    pub const NOTIFY_SUBJECT_MISSING_METADATA: &str = "Missing product metadata";
    pub const NOTIFY_TEMPLATE_ADMIN: &str = "admin_msg";
}

pub mod logging {
    use serde::Deserialize;

    #[allow(clippy::upper_case_acronyms)]
    #[derive(Deserialize)]
    pub enum Level {
        TRACE,
        DEBUG,
        INFO,
        WARNING,
        ERROR,
        FATAL,
    }

    #[allow(clippy::upper_case_acronyms)]
    #[derive(Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Destination {
        CONSOLE,
        LOCALFS,
    } // TODO, Fluentd
}

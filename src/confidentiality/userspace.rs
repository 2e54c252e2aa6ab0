use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::result::Result as DefaultResult;
use std::sync::RwLock;

use serde_json::Value as JsnVal;

use super::AbstractConfidentiality;
use crate::constant::hard_limit::CONFIDENTIAL_SRC_NBYTES;
use crate::error::{AppConfidentialityError, AppErrorCode};

pub struct UserSpaceConfidentiality {
    _src_fullpath: String,
    // only a few credentials are looked up by this service :
    // catalog API key, carrier API key, message broker
    _cached: RwLock<HashMap<String, String>>,
}

impl UserSpaceConfidentiality {
    pub fn build(fullpath: String) -> Self {
        Self {
            _cached: RwLock::new(HashMap::new()),
            _src_fullpath: fullpath,
        }
    }

    fn rawdata_from_source(&self) -> DefaultResult<Vec<u8>, AppConfidentialityError> {
        let map_io_err = |e: std::io::Error| AppConfidentialityError {
            code: AppErrorCode::IOerror(e.kind()),
            detail: e.to_string(),
        };
        let mut file = File::open(self._src_fullpath.as_str()).map_err(map_io_err)?;
        let actual_f_sz = file.metadata().map_err(map_io_err)?.len();
        if actual_f_sz >= CONFIDENTIAL_SRC_NBYTES {
            return Err(AppConfidentialityError {
                code: AppErrorCode::ExceedingMaxLimit,
                detail: "source-file".to_string(),
            });
        }
        let mut rawbuf = Vec::new();
        let _sz = file.read_to_end(&mut rawbuf).map_err(map_io_err)?;
        Ok(rawbuf)
    }

    fn search_json_payload<'a>(
        toplvl: &'a JsnVal,
        id_: &str,
    ) -> DefaultResult<&'a JsnVal, AppConfidentialityError> {
        let mut curr_lvl = toplvl;
        for tok in id_.split('/') {
            let found = match curr_lvl {
                JsnVal::Object(o) => o.get(tok),
                JsnVal::Array(a) => tok.parse::<usize>().ok().and_then(|idx| a.get(idx)),
                _others => None,
            };
            curr_lvl = found.ok_or(AppConfidentialityError {
                code: AppErrorCode::NoConfidentialityCfg,
                detail: format!("id:{id_}, token:{tok}"),
            })?;
        }
        Ok(curr_lvl)
    }

    fn lock_error(detail: String) -> AppConfidentialityError {
        AppConfidentialityError {
            code: AppErrorCode::AcquireLockFailure,
            detail: detail + ", source: UserSpaceConfidentiality",
        }
    }
} // end of impl UserSpaceConfidentiality

impl AbstractConfidentiality for UserSpaceConfidentiality {
    fn try_get_payload(&self, id_: &str) -> DefaultResult<String, AppConfidentialityError> {
        {
            let rguard = self
                ._cached
                .read()
                .map_err(|e| Self::lock_error(e.to_string()))?;
            if let Some(v) = rguard.get(id_) {
                return Ok(v.clone());
            }
        }
        let rawdata = self.rawdata_from_source()?;
        let toplvl =
            serde_json::from_slice::<JsnVal>(&rawdata).map_err(|e| AppConfidentialityError {
                code: AppErrorCode::InvalidJsonFormat,
                detail: e.to_string(),
            })?;
        let found = Self::search_json_payload(&toplvl, id_)?.to_string();
        let mut wguard = self
            ._cached
            .write()
            .map_err(|e| Self::lock_error(e.to_string()))?;
        let _old = wguard.insert(id_.to_string(), found.clone());
        Ok(found)
    }
}

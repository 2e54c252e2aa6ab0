use std::result::Result;
use std::vec::Vec;

use serde::Serialize;
use serde_json::Value as JsnVal;

use super::AppNotifyErrorReason;

#[derive(Default, Serialize)]
struct PyCeleryReqMetadata {
    callbacks: Option<Vec<String>>,
    errbacks: Option<Vec<String>>,
    chain: Option<Vec<String>>,
    chord: Option<String>,
}

/// message body in Celery protocol version 2, which is a JSON array
/// `[args, kwargs, embed]`, all arguments of the task are passed
/// as keyword arguments
pub(super) fn serialize_msg_body<T: Serialize>(inner: &T) -> Result<Vec<u8>, AppNotifyErrorReason> {
    let args = JsnVal::Array(Vec::new());
    let kwargs = serde_json::to_value(inner).map_err(|e| {
        let detail = e.to_string() + ", src: py-celery-serialize";
        AppNotifyErrorReason::CorruptedPayload(detail)
    })?;
    let metadata = serde_json::to_value(PyCeleryReqMetadata::default())
        .map_err(|e| AppNotifyErrorReason::CorruptedPayload(e.to_string()))?;
    let top = JsnVal::Array(vec![args, kwargs, metadata]);
    Ok(top.to_string().into_bytes())
}

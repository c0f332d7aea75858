//! JSON payloads exchanged with the rc endpoints.

use ferry_core::OptionMap;
use serde::{Deserialize, Serialize};

pub(crate) const MOVE_PATH: &str = "sync/move";
pub(crate) const DELETE_PATH: &str = "operations/delete";
pub(crate) const STATUS_PATH: &str = "job/status";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MoveBody<'a> {
    pub(crate) src_fs: String,
    pub(crate) dst_fs: String,
    pub(crate) create_empty_src_dirs: bool,
    pub(crate) delete_empty_dst_dirs: bool,
    #[serde(rename = "_config")]
    pub(crate) config: &'a OptionMap,
    #[serde(rename = "_filter")]
    pub(crate) filter: &'a OptionMap,
    #[serde(rename = "_async")]
    pub(crate) run_async: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeleteBody<'a> {
    pub(crate) fs: &'a str,
    pub(crate) rm_dirs: bool,
    #[serde(rename = "_config")]
    pub(crate) config: &'a OptionMap,
    #[serde(rename = "_filter")]
    pub(crate) filter: &'a OptionMap,
    #[serde(rename = "_async")]
    pub(crate) run_async: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusQuery {
    pub(crate) jobid: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobHandle {
    pub(crate) jobid: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusBody {
    #[serde(default)]
    pub(crate) finished: bool,
    #[serde(default)]
    pub(crate) success: bool,
    #[serde(default)]
    pub(crate) error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) error: String,
}

//! Command handlers grouped by concern.

pub(crate) mod schedule;
pub(crate) mod transfer;

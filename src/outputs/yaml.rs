//! YAML rendering: `caption` plus a `words` list with suppressed keys omitted.

use super::Report;
use crate::errors::Result;

pub fn to_yaml(report: &Report) -> Result<String> {
    Ok(serde_yaml::to_string(report)?)
}

//! DTOs for API responses.

use serde::{Deserialize, Serialize};

/// Response for rig creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRigResponse {
    /// Word identifier the rig can be fetched under
    #[serde(rename = "RigId")]
    pub rig_id: String,
}

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use campusgate_core::AccessState;

pub use campusgate_core::PermissionSnapshot;

#[derive(Debug, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CheckAccessParams {
    /// Page path to check, e.g. `/admin/daily/attendance`
    #[validate(length(
        min = 1,
        max = 2048,
        message = "path must be between 1 and 2048 characters"
    ))]
    pub path: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccessCheckResponse {
    pub path: String,
    pub state: AccessState,
}

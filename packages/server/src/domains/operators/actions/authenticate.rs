use tracing::{debug, info};

use crate::common::utils::hash_api_key;
use crate::common::{ReviewError, ReviewResult};
use crate::domains::operators::models::Operator;
use crate::kernel::BaseOperatorStore;

/// Resolve an API key to an operator.
///
/// A missing key and a key matching no operator both yield
/// `AuthenticationRequired`; store failures propagate as `Store`.
pub async fn authenticate(
    api_key: Option<&str>,
    operators: &dyn BaseOperatorStore,
) -> ReviewResult<Operator> {
    let api_key = api_key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or(ReviewError::AuthenticationRequired)?;

    let operator = operators
        .find_by_key_hash(hash_api_key(api_key))
        .await
        .map_err(ReviewError::Store)?
        .ok_or(ReviewError::AuthenticationRequired)?;

    debug!(operator_id = %operator.id, level = ?operator.permission_level, "Authenticated operator");
    Ok(operator)
}

/// Gate for admin routes: the key must belong to a moderator
pub async fn require_moderator(
    api_key: Option<&str>,
    operators: &dyn BaseOperatorStore,
) -> ReviewResult<Operator> {
    let operator = authenticate(api_key, operators).await?;
    if !operator.is_moderator() {
        return Err(ReviewError::PermissionDenied);
    }
    Ok(operator)
}

/// Soft authentication for submissions: unknown keys are accepted unattributed
pub async fn attribute_submitter(
    api_key: Option<&str>,
    operators: &dyn BaseOperatorStore,
) -> ReviewResult<Option<Operator>> {
    match authenticate(api_key, operators).await {
        Ok(operator) => Ok(Some(operator)),
        Err(ReviewError::AuthenticationRequired) => {
            info!("Accepting unattributed submission");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

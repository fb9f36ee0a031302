use tracing::info;

use crate::common::utils::{generate_api_key, hash_api_key};
use crate::common::{ReviewError, ReviewResult};
use crate::domains::operators::models::{Operator, PermissionLevel};
use crate::kernel::BaseOperatorStore;

pub const API_KEY_LENGTH: usize = 32;

/// Create an operator and return it with its plaintext API key.
///
/// Only the key's hash is persisted.
pub async fn provision_operator(
    name: &str,
    contact_handle: &str,
    permission_level: PermissionLevel,
    operators: &dyn BaseOperatorStore,
) -> ReviewResult<(Operator, String)> {
    if name.trim().is_empty() {
        return Err(ReviewError::Validation("operator name is required".to_string()));
    }

    let api_key = generate_api_key(API_KEY_LENGTH);
    let operator = Operator::new(
        name.trim(),
        contact_handle.trim(),
        hash_api_key(&api_key),
        permission_level,
    );

    operators
        .insert_operator(&operator)
        .await
        .map_err(ReviewError::Store)?;

    info!(operator_id = %operator.id, level = ?permission_level, "Provisioned operator");
    Ok((operator, api_key))
}

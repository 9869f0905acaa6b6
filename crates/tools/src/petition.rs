use cosmos_common::{CosmosError, MAX_PETITION_LENGTH, Result};
use cosmos_kernel::Entity;

/// Compose the standard petition an entity sends: a request for guidance.
pub fn form_petition(entity: &Entity) -> Result<String> {
    let message = format!("Petition from {}: Please guide me.", entity.name());
    if message.len() >= MAX_PETITION_LENGTH {
        return Err(CosmosError::invalid(format!(
            "petition from {} does not fit in {} bytes",
            entity.id(),
            MAX_PETITION_LENGTH
        )));
    }
    tracing::trace!(entity = %entity.id(), "petition formed");
    Ok(message)
}

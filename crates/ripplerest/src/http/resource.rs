/*
[INPUT]:  Requests for a fresh idempotency token
[OUTPUT]: client_resource_id values for payment submissions
[POS]:    HTTP layer - idempotency token generation
[UPDATE]: When changing token format or generation strategy
*/

use std::fmt::Debug;

use uuid::Uuid;

/// Source of `client_resource_id` tokens.
///
/// The gateway rejects a second payment carrying a token it has already
/// seen, so every generated token must be unique.
pub trait ResourceIdGenerator: Debug + Send + Sync {
    fn next_id(&self) -> String;
}

/// Random UUID v4 tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl ResourceIdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

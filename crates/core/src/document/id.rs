/// Document ID parsing utilities.
///
/// Documents are keyed by UUIDv7 ids generated at insert time.
/// Path segments arrive as raw strings and are checked here.
use uuid::Uuid;

use super::validate::ValidationError;

/// Parse a document id from a path segment.
pub fn parse_document_id(raw: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ValidationError::InvalidId(raw.to_string()))
}

/// Fresh id for a document being inserted.
pub fn new_document_id() -> Uuid {
    Uuid::now_v7()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_id() {
        let id = new_document_id();
        assert_eq!(parse_document_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn parse_rejects_mongo_style_ids() {
        let err = parse_document_id("65a1f0c2e4b0a1b2c3d4e5f6").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidId("65a1f0c2e4b0a1b2c3d4e5f6".to_string())
        );
    }
}

//! Shared key generation for storage backends.
//!
//! Key format: `{store_name}/{collection}/{file_id}-{file_name}`, matching
//! the path segment of direct-access URLs.

use uuid::Uuid;

/// Generate the object key for one file in one store.
///
/// All backends must use this format for consistency; the URL resolver
/// appends the same path to the bucket base URL.
pub fn object_key(store_name: &str, collection: &str, file_id: Uuid, file_name: &str) -> String {
    format!("{}/{}/{}-{}", store_name, collection, file_id, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_layout() {
        let id = Uuid::nil();
        assert_eq!(
            object_key("avatars-thumb", "avatars", id, "photo.jpg"),
            format!("avatars-thumb/avatars/{}-photo.jpg", id)
        );
    }
}

use std::fmt;

/// Object key inside a storage bucket, e.g. `"{work_room_id}/{timestamp}_{file_name}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn parse(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err("storage key must not be empty".to_string());
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Public object path relative to the storage API root.
    pub fn public_object_path(&self, bucket: &str) -> String {
        format!(
            "storage/v1/object/public/{}/{}",
            bucket,
            self.0.trim_start_matches('/')
        )
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

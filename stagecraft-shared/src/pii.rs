use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wrapper for contact PII (emails, phone numbers) that masks the value in
/// Debug and Display output so it cannot leak through tracing macros.
/// Serialization passes the real value through, since API responses and the
/// database need it.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct Masked<T>(pub T);

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }

    pub fn inner(&self) -> &T {
        &self.0
    }
}

impl<T> From<T> for Masked<T> {
    fn from(value: T) -> Self {
        Masked(value)
    }
}

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_are_masked() {
        let value = Masked("secret@example.com".to_string());
        assert_eq!(format!("{:?}", value), "********");
        assert_eq!(format!("{}", value), "********");
    }

    #[test]
    fn test_serialize_passes_through() {
        let value = Masked("secret@example.com".to_string());
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"secret@example.com\"");
    }
}

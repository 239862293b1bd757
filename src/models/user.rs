use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Stored shape of a `users` document
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub id: String,  // caller-supplied, not unique
    pub password: String,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, password: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            _id: None,
            id: id.into(),
            password: password.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_new_user_serializes_without_object_id() {
        let user = User::new("alice", "secret", "Alice");
        let doc = bson::to_document(&user).unwrap();

        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("id").unwrap(), "alice");
        assert_eq!(doc.get_str("password").unwrap(), "secret");
        assert_eq!(doc.get_str("name").unwrap(), "Alice");
    }
}

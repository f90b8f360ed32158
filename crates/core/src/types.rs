/// Project ids and user ids are opaque GUID strings issued by Azure AD /
/// the Teams client; they are never parsed, only compared.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

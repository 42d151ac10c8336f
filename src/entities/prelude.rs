pub use super::api_keys::Entity as ApiKeys;
pub use super::records::Entity as Records;
pub use super::users::Entity as Users;

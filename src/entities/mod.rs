pub mod prelude;

pub mod api_keys;
pub mod records;
pub mod users;

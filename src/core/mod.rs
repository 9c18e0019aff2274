pub mod db;
pub mod mapping;
pub mod security;
pub mod sqlx_utils;
pub mod test_utils;

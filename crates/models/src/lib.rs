pub mod db;
pub mod cake;

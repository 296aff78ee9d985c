pub mod constants;
pub mod nutrition;
pub mod synthesis;

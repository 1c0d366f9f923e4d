pub mod composite;
pub mod encode;

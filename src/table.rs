pub mod csv;
pub mod row;

pub mod combinations;
pub mod people;

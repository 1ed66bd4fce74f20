pub mod codes;
pub mod envelope;
pub mod health;

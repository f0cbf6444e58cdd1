pub mod company;
pub mod hierarchy;
pub mod letter;

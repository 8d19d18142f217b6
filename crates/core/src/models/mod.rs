pub mod cart;
pub mod catalog;
pub mod command;
pub mod pagination;
pub mod product;
pub mod receipt;
pub mod settings;
pub mod view;

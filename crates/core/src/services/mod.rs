pub mod cart_store;
pub mod catalog_service;
pub mod detail_service;
pub mod pagination_service;
pub mod presentation_service;

pub mod export;
pub mod product;

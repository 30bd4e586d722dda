pub mod product;
pub mod promo_code;

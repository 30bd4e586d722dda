pub mod csv;
pub mod discount;
pub mod export_queue;
pub mod exporter;
pub mod flash;
pub mod mailer;
pub mod promo;

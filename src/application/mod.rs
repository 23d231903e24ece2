pub mod feed;
pub mod ports;
pub mod services;

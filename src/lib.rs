pub mod aggregate;
pub mod config;
pub mod data;
pub mod figure;
pub mod humanize;
pub mod server;
pub mod view;

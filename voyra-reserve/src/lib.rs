pub mod app_config;
pub mod client;
pub mod dto;
pub mod payment_gateway;

pub use client::HttpReserveClient;
pub use payment_gateway::HostedPageGateway;

pub mod commands;
pub mod config;
pub mod reporter;
pub mod utils;

pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub struct Data {
    pub config: config::Config,
    pub http: reqwest::Client,
}

pub mod anthropic_client;
pub mod html_scrape;
pub mod http;
pub mod markup;
pub mod official_api;
pub mod pacer;
pub mod third_party_api;

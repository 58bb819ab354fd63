pub mod config;
pub mod downloader;
pub mod fetcher;
pub mod naming;
pub mod organize;
pub mod submissions;

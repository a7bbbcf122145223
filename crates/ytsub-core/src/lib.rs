pub mod config;
pub mod logging;

pub mod document;
pub mod downloader;
pub mod interval;
pub mod organizer;
pub mod rules;
pub mod scheduler;
pub mod subscription;

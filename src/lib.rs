pub mod capability;
pub mod config;
pub mod http;
pub mod i18n;
pub mod prober;
pub mod report;
pub mod retry;
pub mod sequencer;

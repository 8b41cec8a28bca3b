//! AgriPulse backend.
//!
//! A thin proxy in front of three third-party services (mandi prices,
//! Open-Meteo weather and geocoding, Gemini) plus the static dashboard.
//! The only real decision logic lives in [`location`]: a geocoding cascade
//! that falls back to a built-in table of major Indian cities.

pub mod config;
pub mod location;
pub mod prompts;
pub mod server;
pub mod upstream;

// src/gps/mod.rs
//! NMEA sentence handling for GPS receivers

pub mod data;
pub mod sentence;

pub use data::{Fix, SentenceKind};
pub use sentence::{parse_sentence, ParsedSentence};

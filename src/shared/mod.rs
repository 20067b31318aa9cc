//! Modules with generic logic used by several modules.
//!
//! - [`bit_torrent`]: `BitTorrent` protocol related logic.
pub mod bit_torrent;

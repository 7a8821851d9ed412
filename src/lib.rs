//! Radiative forcing of 1 Mt pulse emissions: integrated forcing, Global
//! Warming Potential, and the frame-indexed reveal loop that animates them.
//!
//! The numeric pipeline lives in [`table`], [`integration`] and [`horizon`];
//! the animation side in [`frames`], [`reveal`] and [`render`]. A
//! [`pipeline::Pipeline`] ties the two together: load a forcing table once,
//! derive the series once, then replay frames into a [`render::RenderAdapter`].

pub mod config;
pub mod errors;
pub mod frames;
pub mod horizon;
pub mod integration;
pub mod pipeline;
pub mod render;
pub mod reveal;
pub mod substance;
pub mod table;
pub mod timeseries;

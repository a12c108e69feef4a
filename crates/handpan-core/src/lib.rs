pub mod camera;
pub mod config;
pub mod consts;
pub mod detector;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod io;
pub mod library;
pub mod tracking;
pub mod viewport;

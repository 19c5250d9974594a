//! Desktop front end for hand navigation: OpenCV camera and preview,
//! enigo scroll injection, command-line and file configuration.

pub mod camera;
pub mod config;
pub mod controls;
pub mod injector;
pub mod preview;
pub mod tone;

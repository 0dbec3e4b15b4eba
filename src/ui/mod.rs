//! UI module - leaf widgets shared by the app panels

pub mod components;

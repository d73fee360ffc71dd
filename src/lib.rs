//! Embeddable frame-rate overlay: a sample ring, a pointer-driven drag/resize surface and a
//! throttled raster renderer. See [`gauge::Overlay`] for the entry point.
pub mod gauge;

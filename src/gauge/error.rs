use thiserror::Error;
#[derive(Debug, Error)]
pub enum GaugeError {
    #[error("max rate must be finite and greater than zero")]
    InvalidMaxRate,
    #[error("minimum sampling interval must be finite and greater than zero")]
    InvalidInterval,
    #[error("could not acquire a {width}x{height} raster surface")]
    SurfaceUnavailable { width: u32, height: u32 },
    #[error("failed to render overlay: {0}")]
    Render(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for GaugeError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        GaugeError::Render(format!("{value:?}"))
    }
}
impl From<image::ImageError> for GaugeError {
    fn from(value: image::ImageError) -> Self {
        GaugeError::Render(value.to_string())
    }
}
impl From<serde_json::Error> for GaugeError {
    fn from(value: serde_json::Error) -> Self {
        GaugeError::Config(value.to_string())
    }
}

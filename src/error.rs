use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid range for {scale} axis '{axis_id}': min={min}, max={max}")]
    InvalidRange {
        axis_id: String,
        scale: &'static str,
        min: f64,
        max: f64,
    },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("unknown axis id '{0}'")]
    UnknownAxis(String),

    #[error("unknown series id '{0}'")]
    UnknownSeries(String),

    #[error("axis with id '{0}' already exists")]
    DuplicateAxis(String),

    #[error("axis '{0}' is still referenced by bound series")]
    AxisInUse(String),

    #[error("the default axis '{0}' cannot be removed")]
    DefaultAxisRemoval(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

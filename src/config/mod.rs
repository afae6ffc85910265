pub mod chart_config;
pub mod editor;
pub mod path;

pub use chart_config::{
    AxisRange, ChartConfig, DEFAULT_BACKGROUND_COLOR, DEFAULT_GRID_COLOR, DEFAULT_PALETTE,
    DEFAULT_TITLE, DEFAULT_X_RANGE, DEFAULT_Y_RANGE, DisplaySettings, SeriesKind, SeriesSource,
    SeriesSpec, default_series_name, palette_color,
};
pub use editor::{ConfigChangedEvent, ConfigEditor, ConfigListener, FieldInput, SERIES_KEY};
pub use path::{ConfigPath, PathError, PathSegment, get_path, set_path};

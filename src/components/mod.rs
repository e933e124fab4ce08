pub mod air_quality_panel;
pub mod current_conditions;
pub mod daily_list;
pub mod hourly_strip;
pub mod palette;
pub mod search_overlay;
pub mod weather_display;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use air_quality_panel::{AirQualityPanel, AirQualityPanelProps};
pub use current_conditions::{CurrentConditions, CurrentConditionsProps};
pub use daily_list::{DailyList, DailyListProps};
pub use hourly_strip::{HourlyStrip, HourlyStripProps};
pub use palette::Palette;
pub use search_overlay::{SearchOverlay, SearchOverlayProps};
pub use weather_display::{ERROR_ICON, WeatherDisplay, WeatherDisplayProps};

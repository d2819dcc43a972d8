pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{ConfigError, KontrolError};
pub use events::{EventBus, WidgetEvent};
pub use id::{new_id, MessageId, WidgetId};
pub use types::{PanelVisibility, Role, Section, Theme};

pub type Result<T> = std::result::Result<T, KontrolError>;

//! Responder implementations.

mod canned;
mod http;
mod timeout;

pub use canned::CannedResponder;
pub use http::HttpResponder;
pub use timeout::TimeoutResponder;

use std::sync::Arc;
use std::time::Duration;

use kontrol_common::Section;
use kontrol_config::schema::{ResponderConfig, ResponderKind};

use crate::{Responder, ResponderError};

/// Pause before a canned reply, so the loading state is visible.
const CANNED_DELAY: Duration = Duration::from_millis(400);

/// Build the responder selected in config for a widget in `section`.
///
/// HTTP answers are bounded by `timeout_secs`; expiry reaches the widget as
/// an ordinary failure.
pub fn from_config(
    config: &ResponderConfig,
    section: Section,
) -> Result<Arc<dyn Responder>, ResponderError> {
    match config.kind {
        ResponderKind::Http => {
            let http = HttpResponder::new(config, section)?;
            let deadline = Duration::from_secs(u64::from(config.timeout_secs));
            Ok(Arc::new(TimeoutResponder::new(http, deadline)))
        }
        ResponderKind::Canned => Ok(Arc::new(
            CannedResponder::new(section).with_delay(CANNED_DELAY),
        )),
    }
}

//! Web UI for M-Sight.
//!
//! Serves one page that walks a single session through its four steps, plus
//! a JSON view of the session and a health check.
//!
//! | Route | Action |
//! |---|---|
//! | `GET /` | Render the page |
//! | `POST /scrape` | Load website data (`url` form field) |
//! | `POST /draft` | Generate the draft prompt |
//! | `POST /feedback` | Refine the draft (`feedback` form field) |
//! | `POST /video` | Request the video |
//! | `POST /cancel` | Cancel the step in flight |
//! | `GET /api/session` | Session snapshot as JSON |
//! | `GET /health` | `{"status":"ok"}` |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod page;
mod routes;
mod state;

pub use error::{banner_for, status_for};
pub use page::{escape_html, render};
pub use routes::{FeedbackForm, UrlForm, create_router};
pub use state::{AppState, SharedDriver};

use msight_core::ServerSettings;
use msight_error::{MsightResult, ServerError, ServerErrorKind};
use tracing::{info, instrument};

/// Bind the configured address and serve until the process stops.
///
/// # Errors
///
/// `ServerError` if the address cannot be bound or the server loop fails.
#[instrument(skip_all, fields(bind = %settings.bind()))]
pub async fn serve(settings: &ServerSettings, state: AppState) -> MsightResult<()> {
    let addr = settings.bind();
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            addr: addr.clone(),
            message: e.to_string(),
        })
    })?;

    let local = listener
        .local_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| addr.clone());
    info!(addr = %local, "M-Sight web UI listening");

    axum::serve(listener, create_router(state))
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;
    Ok(())
}

//! Hands a packaged draft to the create action and reports the outcome.

use std::future::Future;

use crate::types::{EtlDatasource, EtlRequest};

/// Page listing ETL data sources, opened in a new tab after a successful create
pub const ETL_LIST_ROUTE: &str = "/etltableview/list/";

pub const CREATED_NOTICE: &str = "Creating a ETL data source and popping a new tab";

/// Side effects the dialog performs once the action settles
pub trait SubmitEffects {
    fn notify_info(&self, message: &str);
    fn notify_error(&self, message: &str);
    fn open_tab(&self, url: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(EtlDatasource),
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, SubmitOutcome::Created(_))
    }
}

/// Run the create `action` for `request`.
///
/// On success an informational notice is shown and the list page is opened in a
/// new tab. On failure `error_message` is shown, or the action's own error when no
/// message was injected. There is no retry.
pub async fn submit<A, Fut, E>(
    request: EtlRequest,
    action: A,
    effects: &E,
    error_message: Option<&str>,
) -> SubmitOutcome
where
    A: FnOnce(EtlRequest) -> Fut,
    Fut: Future<Output = Result<EtlDatasource, String>>,
    E: SubmitEffects + ?Sized,
{
    log::debug!("Submitting ETL data source '{}'", request.name);
    match action(request).await {
        Ok(datasource) => {
            log::info!("Created ETL data source '{}' ({})", datasource.name, datasource.id);
            effects.notify_info(CREATED_NOTICE);
            effects.open_tab(ETL_LIST_ROUTE);
            SubmitOutcome::Created(datasource)
        }
        Err(e) => {
            log::warn!("Failed to create ETL data source: {}", e);
            let message = error_message
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .unwrap_or(e);
            effects.notify_error(&message);
            SubmitOutcome::Failed(message)
        }
    }
}

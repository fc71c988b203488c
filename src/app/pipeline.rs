use std::cell::RefCell;
use std::rc::Rc;

use super::state::{AppState, UiEvent};
use crate::catalog::ChapterId;

/// Dispatch summary generation on the tokio runtime.
///
/// The tracker shows the loading state immediately; the result is delivered
/// back as `UiEvent::SummaryReady` and dropped there if superseded.
pub fn dispatch_summary(state: &Rc<RefCell<AppState>>, id: ChapterId) {
    let mut s = state.borrow_mut();
    let Some(name) = s.catalog.get(id).map(|c| c.name) else {
        return;
    };
    let ticket = s.summaries.begin(id);
    let provider = s.summary_provider.clone();
    let sender = s.ui_sender.clone();

    s.tokio_rt.spawn(async move {
        let text = crate::summary::fetch_summary(provider.as_ref(), name).await;
        let _ = sender.send(UiEvent::SummaryReady(ticket, text)).await;
    });
}

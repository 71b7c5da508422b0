use std::sync::Arc;

use anyhow::{Result, bail};
use log::{debug, info, warn};
use nestview::entities::Layout;
use nestview::sequencing::{RequestSequencer, Resolution};
use tokio::sync::Mutex;

use crate::api::{LayoutRequest, NestingApi};

/// What became of a layout request
#[derive(Clone, Debug)]
pub enum LoadOutcome {
    /// The layout is now the current one
    Applied(Arc<Layout>),
    /// A more recent request already resolved, the response was discarded
    Stale,
    /// The request failed, the previous layout stays current
    Failed(String),
}

#[derive(Default)]
struct LoaderState {
    sequencer: RequestSequencer,
    current: Option<Arc<Layout>>,
    last_error: Option<String>,
    last_request: Option<LayoutRequest>,
}

/// Fetches layouts through a [`NestingApi`], making sure the layout shown always answers the most
/// recently issued request that has resolved.
/// Several refreshes may be in flight at the same time, the loader can be shared behind an [`Arc`].
pub struct LayoutLoader<A: NestingApi> {
    api: A,
    state: Mutex<LoaderState>,
}

impl<A: NestingApi> LayoutLoader<A> {
    pub fn new(api: A) -> Self {
        LayoutLoader {
            api,
            state: Mutex::new(LoaderState::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Requests a new layout and applies it unless a newer request resolved first.
    pub async fn refresh(&self, request: LayoutRequest) -> LoadOutcome {
        let ticket = {
            let mut state = self.state.lock().await;
            state.last_request = Some(request.clone());
            state.sequencer.issue()
        };
        info!(
            "layout request #{} for autoclave {}",
            ticket.sequence(),
            request.autoclave_id
        );

        //the lock is not held while waiting for the backend
        let result = self.api.fetch_layout(&request).await;

        let mut state = self.state.lock().await;
        if state.sequencer.resolve(ticket) == Resolution::Stale {
            debug!("layout request #{} resolved late, ignored", ticket.sequence());
            return LoadOutcome::Stale;
        }
        match result {
            Ok(layout) => {
                let layout = Arc::new(layout);
                state.current = Some(layout.clone());
                state.last_error = None;
                LoadOutcome::Applied(layout)
            }
            Err(err) => {
                let message = format!("{err:#}");
                warn!("layout request #{} failed: {message}", ticket.sequence());
                state.last_error = Some(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }

    /// Re-issues the most recent request.
    pub async fn retry(&self) -> Result<LoadOutcome> {
        let last_request = self.state.lock().await.last_request.clone();
        match last_request {
            Some(request) => Ok(self.refresh(request).await),
            None => bail!("no layout has been requested yet"),
        }
    }

    /// The most recently applied layout
    pub async fn current(&self) -> Option<Arc<Layout>> {
        self.state.lock().await.current.clone()
    }

    /// Error of the latest resolved request, cleared by the next successful one
    pub async fn last_error(&self) -> Option<String> {
        self.state.lock().await.last_error.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockNestingApi;
    use anyhow::anyhow;
    use mockall::Sequence;
    use nestview::entities::{Container, PlacedItem};

    fn layout(n_items: u64) -> Layout {
        let container =
            Container::try_new(1, "autoclave", 3000.0, 1500.0, None, 10, 300.0).unwrap();
        let items = (0..n_items)
            .map(|i| {
                PlacedItem::try_new(i, i as f32 * 200.0, 0.0, 150.0, 150.0, format!("T-{i}"))
                    .unwrap()
            })
            .collect();
        Layout::try_new(container, items).unwrap()
    }

    fn request() -> LayoutRequest {
        LayoutRequest {
            autoclave_id: 1,
            work_order_ids: vec![5, 6],
            parameters: None,
        }
    }

    #[tokio::test]
    async fn failure_keeps_last_layout() {
        let mut api = MockNestingApi::new();
        let mut seq = Sequence::new();
        api.expect_fetch_layout()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(layout(3)));
        api.expect_fetch_layout()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(anyhow!("503 Service Unavailable")));
        api.expect_fetch_layout()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|r| r.work_order_ids == vec![5, 6])
            .returning(|_| Ok(layout(4)));

        let loader = LayoutLoader::new(api);
        assert!(matches!(loader.refresh(request()).await, LoadOutcome::Applied(_)));

        let outcome = loader.refresh(request()).await;
        assert!(matches!(outcome, LoadOutcome::Failed(ref m) if m.contains("503")));
        assert_eq!(loader.current().await.map(|l| l.len()), Some(3));
        assert!(loader.last_error().await.is_some());

        let outcome = loader.retry().await.unwrap();
        assert!(matches!(outcome, LoadOutcome::Applied(ref l) if l.len() == 4));
        assert!(loader.last_error().await.is_none());
    }

    #[tokio::test]
    async fn retry_needs_a_previous_request() {
        let loader = LayoutLoader::new(MockNestingApi::new());
        assert!(loader.retry().await.is_err());
        assert!(loader.current().await.is_none());
    }
}

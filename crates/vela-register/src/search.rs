//! # Debounced Order Search
//!
//! The order-history search box: filters apply immediately on selection,
//! free-text queries wait out a quiet period before hitting the ledger.
//!
//! ## Staleness Guard
//! A generation counter stamps every scheduled query; a result is only
//! delivered when its generation is still the latest at completion time.
//! An aborted timer never queries at all, but a query already in flight
//! when the user types again would otherwise deliver stale results.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use vela_ledger::{LedgerResult, OrderLedger, OrderListFilter, OrderPage};

use crate::debounce::Debouncer;

/// One delivered search result.
#[derive(Debug)]
pub struct SearchUpdate {
    pub filter: OrderListFilter,
    pub result: LedgerResult<OrderPage>,
}

/// Debounced, staleness-guarded order listing.
pub struct OrderSearch {
    ledger: Arc<dyn OrderLedger>,
    debouncer: Debouncer,
    generation: Arc<AtomicU64>,
    tx: mpsc::UnboundedSender<SearchUpdate>,
}

impl OrderSearch {
    /// Returns the search driver and the receiver the UI renders from.
    pub fn new(
        ledger: Arc<dyn OrderLedger>,
        quiet: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<SearchUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            OrderSearch {
                ledger,
                debouncer: Debouncer::new(quiet),
                generation: Arc::new(AtomicU64::new(0)),
                tx,
            },
            rx,
        )
    }

    /// A free-text keystroke: schedules the query after the quiet period.
    pub fn query_text(&self, filter: OrderListFilter) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let task = self.run_query(filter, generation);
        self.debouncer.trigger(task);
    }

    /// A structural filter change (status dropdown, date range): applies
    /// immediately, cancelling any pending text query.
    pub fn query_now(&self, filter: OrderListFilter) {
        self.debouncer.cancel();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::spawn(self.run_query(filter, generation));
    }

    fn run_query(
        &self,
        filter: OrderListFilter,
        generation: u64,
    ) -> impl std::future::Future<Output = ()> + Send + 'static {
        let ledger = Arc::clone(&self.ledger);
        let latest = Arc::clone(&self.generation);
        let tx = self.tx.clone();
        async move {
            let result = ledger.list(filter.clone()).await;
            if latest.load(Ordering::SeqCst) != generation {
                debug!(generation, "dropping stale search result");
                return;
            }
            // Receiver dropped means the screen is gone; nothing to do.
            let _ = tx.send(SearchUpdate { filter, result });
        }
    }
}

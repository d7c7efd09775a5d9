//! Shipping rate lookup for checkout.
//!
//! [`lookup_shipping_rates`] never fails: an unknown wilaya, a malformed
//! code or a backend outage all degrade to zero rates so checkout can
//! continue. [`ShippingRateTracker`] follows the customer's wilaya selection
//! and publishes `{loading, rates}` as lookups complete, dropping responses
//! that arrive after a newer selection.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use souk_core::{ShippingRates, ShippingZoneStore, WilayaCode};
use tokio::sync::watch;
use tracing::instrument;

/// Look up the delivery prices for a wilaya.
///
/// Returns `None` without touching the store when no wilaya is selected
/// (absent or empty). Every failure yields [`ShippingRates::ZERO`].
#[instrument(skip(store))]
pub async fn lookup_shipping_rates<S>(store: &S, wilaya: Option<&str>) -> Option<ShippingRates>
where
    S: ShippingZoneStore + ?Sized,
{
    let raw = wilaya.filter(|w| !w.is_empty())?;

    let result = match WilayaCode::parse(raw) {
        Ok(code) => store
            .shipping_zone(code)
            .await
            .map(|zone| zone.rates())
            .map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match result {
        Ok(rates) => Some(rates),
        Err(error) => {
            tracing::warn!(
                wilaya = %raw,
                error = %error,
                "Shipping rate lookup failed, using zero rates"
            );
            Some(ShippingRates::ZERO)
        }
    }
}

/// Observable shipping rate state for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShippingRatesState {
    /// A lookup for the current selection is in flight.
    pub loading: bool,
    /// Rates for the current selection; `None` when nothing is selected.
    pub rates: Option<ShippingRates>,
}

/// Tracks the selected wilaya and the rates that go with it.
///
/// Each [`set_wilaya`](Self::set_wilaya) call takes a new generation; a
/// lookup only publishes if its generation is still the latest when it
/// completes.
pub struct ShippingRateTracker<S: ?Sized> {
    store: Arc<S>,
    generation: AtomicU64,
    state: watch::Sender<ShippingRatesState>,
}

impl<S> ShippingRateTracker<S>
where
    S: ShippingZoneStore + ?Sized,
{
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            generation: AtomicU64::new(0),
            state: watch::Sender::new(ShippingRatesState::default()),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ShippingRatesState {
        *self.state.borrow()
    }

    /// Receiver notified on every published state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ShippingRatesState> {
        self.state.subscribe()
    }

    /// Select a wilaya (or clear the selection) and look up its rates.
    pub async fn set_wilaya(&self, wilaya: Option<String>) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(wilaya) = wilaya.filter(|w| !w.is_empty()) else {
            self.state.send_replace(ShippingRatesState::default());
            return;
        };

        self.publish(generation, ShippingRatesState {
            loading: true,
            rates: self.state().rates,
        });

        let rates = lookup_shipping_rates(self.store.as_ref(), Some(&wilaya)).await;

        if !self.publish(generation, ShippingRatesState {
            loading: false,
            rates,
        }) {
            tracing::debug!(wilaya = %wilaya, "Discarding superseded shipping rate lookup");
        }
    }

    /// Publish `next` if `generation` is still current.
    fn publish(&self, generation: u64, next: ShippingRatesState) -> bool {
        let mut published = false;
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            published = true;
            if *state == next {
                return false;
            }
            *state = next;
            true
        });
        published
    }
}

//! In-memory backend for tests.
//!
//! [`MemoryBackend`] implements every store port plus [`SessionResolver`]
//! and [`StoreFactory`]. It counts calls so tests can assert that a code
//! path never reached the backend, and each table can be switched into a
//! failing mode to exercise error branches.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Map;

use crate::store::{
    AccessToken, AuthSession, BrandSettingsStore, CategoryStore, OrderStore,
    PasswordAuthenticator, SessionResolver, SessionUser, ShippingZoneStore, StoreError,
    StoreFactory, Stores,
};
use crate::types::{
    BrandSettings, Category, CategoryId, NewCategory, Order, ShippingZone, WilayaCode,
};

/// Which table operations should fail.
#[derive(Debug, Clone, Default)]
pub struct Failures {
    pub categories: Option<StoreError>,
    pub orders: Option<StoreError>,
    pub shipping_zones: Option<StoreError>,
    pub sessions: Option<StoreError>,
}

#[derive(Debug, Default)]
struct Tables {
    categories: Vec<Category>,
    orders: Vec<Order>,
    shipping_zones: Vec<ShippingZone>,
    brand_settings: Vec<BrandSettings>,
    sessions: HashMap<String, SessionUser>,
    logins: HashMap<(String, String), String>,
    failures: Failures,
    bound_tokens: Vec<Option<String>>,
}

/// Call counters, per operation.
#[derive(Debug, Default)]
pub struct Calls {
    pub category_inserts: AtomicUsize,
    pub category_lists: AtomicUsize,
    pub order_lists: AtomicUsize,
    pub zone_lookups: AtomicUsize,
    pub zone_lists: AtomicUsize,
    pub brand_lookups: AtomicUsize,
    pub session_lookups: AtomicUsize,
    pub sign_ins: AtomicUsize,
    pub sign_outs: AtomicUsize,
}

/// In-memory implementation of the store ports.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    tables: Arc<Mutex<Tables>>,
    calls: Arc<Calls>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        // A panicking test thread poisons the lock; the data is still usable.
        self.tables.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Call counters.
    #[must_use]
    pub fn calls(&self) -> &Calls {
        &self.calls
    }

    /// Number of calls recorded by a counter.
    #[must_use]
    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    /// Add a shipping zone row (duplicates allowed, to test single-row fetches).
    #[must_use]
    pub fn with_zone(self, zone: ShippingZone) -> Self {
        self.tables().shipping_zones.push(zone);
        self
    }

    /// Add an order row.
    #[must_use]
    pub fn with_order(self, order: Order) -> Self {
        self.tables().orders.push(order);
        self
    }

    /// Add a category row.
    #[must_use]
    pub fn with_category(self, category: Category) -> Self {
        self.tables().categories.push(category);
        self
    }

    /// Add a brand settings row.
    #[must_use]
    pub fn with_brand_settings(self, settings: BrandSettings) -> Self {
        self.tables().brand_settings.push(settings);
        self
    }

    /// Register a valid session token.
    #[must_use]
    pub fn with_session(self, token: &str, user: SessionUser) -> Self {
        self.tables().sessions.insert(token.to_owned(), user);
        self
    }

    /// Accept `email`/`password` and hand out `token`.
    ///
    /// The token must also be registered with [`Self::with_session`].
    #[must_use]
    pub fn with_login(self, email: &str, password: &str, token: &str) -> Self {
        self.tables()
            .logins
            .insert((email.to_owned(), password.to_owned()), token.to_owned());
        self
    }

    /// Whether a session token is currently valid.
    #[must_use]
    pub fn has_session(&self, token: &str) -> bool {
        self.tables().sessions.contains_key(token)
    }

    /// Configure failing operations.
    #[must_use]
    pub fn failing(self, failures: Failures) -> Self {
        self.tables().failures = failures;
        self
    }

    /// Categories currently stored.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        self.tables().categories.clone()
    }

    /// Tokens passed to [`StoreFactory::bind`], in call order.
    #[must_use]
    pub fn bound_tokens(&self) -> Vec<Option<String>> {
        self.tables().bound_tokens.clone()
    }
}

#[async_trait]
impl CategoryStore for MemoryBackend {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.calls.category_lists.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables();
        if let Some(err) = &tables.failures.categories {
            return Err(err.clone());
        }
        let mut categories = tables.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn insert_category(&self, category: &NewCategory) -> Result<Category, StoreError> {
        self.calls.category_inserts.fetch_add(1, Ordering::SeqCst);
        let mut tables = self.tables();
        if let Some(err) = &tables.failures.categories {
            return Err(err.clone());
        }
        if tables.categories.iter().any(|c| c.slug == category.slug()) {
            return Err(StoreError::Backend {
                code: "23505".to_string(),
                message: "duplicate key value violates unique constraint \"categories_slug_key\""
                    .to_string(),
            });
        }

        let next_id = tables
            .categories
            .iter()
            .map(|c| c.id.as_i64())
            .max()
            .unwrap_or(0)
            + 1;
        let created = Category {
            id: CategoryId::new(next_id),
            name: category.name().to_owned(),
            slug: category.slug().to_owned(),
            extra: Map::new(),
        };
        tables.categories.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl OrderStore for MemoryBackend {
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        self.calls.order_lists.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables();
        if let Some(err) = &tables.failures.orders {
            return Err(err.clone());
        }
        let mut orders = tables.orders.clone();
        // RFC 3339 timestamps in one offset sort lexicographically.
        orders.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(orders)
    }
}

#[async_trait]
impl ShippingZoneStore for MemoryBackend {
    async fn list_shipping_zones(&self) -> Result<Vec<ShippingZone>, StoreError> {
        self.calls.zone_lists.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables();
        if let Some(err) = &tables.failures.shipping_zones {
            return Err(err.clone());
        }
        let mut zones = tables.shipping_zones.clone();
        zones.sort_by_key(|z| z.wilaya_code);
        Ok(zones)
    }

    async fn shipping_zone(&self, wilaya: WilayaCode) -> Result<ShippingZone, StoreError> {
        self.calls.zone_lookups.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables();
        if let Some(err) = &tables.failures.shipping_zones {
            return Err(err.clone());
        }
        let mut matches = tables
            .shipping_zones
            .iter()
            .filter(|z| z.wilaya_code == wilaya);
        match (matches.next(), matches.next()) {
            (Some(zone), None) => Ok(zone.clone()),
            (None, _) => Err(StoreError::NotFound),
            (Some(_), Some(_)) => Err(StoreError::MultipleRows),
        }
    }

    async fn upsert_shipping_zone(&self, zone: &ShippingZone) -> Result<ShippingZone, StoreError> {
        let mut tables = self.tables();
        if let Some(err) = &tables.failures.shipping_zones {
            return Err(err.clone());
        }
        tables
            .shipping_zones
            .retain(|z| z.wilaya_code != zone.wilaya_code);
        tables.shipping_zones.push(zone.clone());
        Ok(zone.clone())
    }
}

#[async_trait]
impl BrandSettingsStore for MemoryBackend {
    async fn brand_settings(&self) -> Result<BrandSettings, StoreError> {
        self.calls.brand_lookups.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables();
        match tables.brand_settings.as_slice() {
            [settings] => Ok(settings.clone()),
            [] => Err(StoreError::NotFound),
            _ => Err(StoreError::MultipleRows),
        }
    }
}

#[async_trait]
impl SessionResolver for MemoryBackend {
    async fn resolve(&self, token: &AccessToken) -> Result<Option<SessionUser>, StoreError> {
        self.calls.session_lookups.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables();
        if let Some(err) = &tables.failures.sessions {
            return Err(err.clone());
        }
        Ok(tables.sessions.get(token.expose()).cloned())
    }
}

#[async_trait]
impl PasswordAuthenticator for MemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<AuthSession>, StoreError> {
        self.calls.sign_ins.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables();
        if let Some(err) = &tables.failures.sessions {
            return Err(err.clone());
        }
        let Some(token) = tables
            .logins
            .get(&(email.to_owned(), password.to_owned()))
        else {
            return Ok(None);
        };
        let user = tables
            .sessions
            .get(token)
            .cloned()
            .ok_or(StoreError::Unauthorized)?;

        Ok(Some(AuthSession {
            access_token: AccessToken::new(token.clone()),
            refresh_token: None,
            expires_in: Some(3600),
            user,
        }))
    }

    async fn sign_out(&self, token: &AccessToken) -> Result<(), StoreError> {
        self.calls.sign_outs.fetch_add(1, Ordering::SeqCst);
        self.tables().sessions.remove(token.expose());
        Ok(())
    }
}

impl StoreFactory for MemoryBackend {
    fn bind(&self, token: Option<&AccessToken>) -> Arc<dyn Stores> {
        self.tables()
            .bound_tokens
            .push(token.map(|t| t.expose().to_owned()));
        Arc::new(self.clone())
    }
}

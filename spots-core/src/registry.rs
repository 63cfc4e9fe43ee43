//! Kind-to-view resolution service
//!
//! A [`RegistryService`] maps `(family, kind)` pairs to view factories and
//! carries the handful of process-wide hooks (default kinds, default
//! factories, grid default sizes, the post-layout configure callback).
//!
//! The service is an explicit object shared by `Arc` into every spot at
//! construction. There is no ambient global table, so tests get isolated
//! registries by building a fresh service per case. Interior locks keep
//! registration safe when it happens off the UI thread, e.g. during
//! asynchronous asset loading.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::geometry::SizeF;
use crate::surface::Surface;
use crate::view::{FallbackView, ViewFactory, ViewInstance};

/// The spot families a component kind can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpotFamily {
    Grid,
    List,
    Carousel,
}

impl SpotFamily {
    /// Canonical kind string for the family.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpotFamily::Grid => "grid",
            SpotFamily::List => "list",
            SpotFamily::Carousel => "carousel",
        }
    }
}

/// Post-layout customization callback, invoked with the bound surface on
/// every layout pass.
pub type ConfigureHook = Box<dyn Fn(&mut dyn Surface) + Send + Sync>;

/// Resolution table from kind strings to view factories, plus global
/// configuration hooks.
pub struct RegistryService {
    views: RwLock<HashMap<(SpotFamily, String), ViewFactory>>,
    default_views: RwLock<HashMap<SpotFamily, ViewFactory>>,
    default_kinds: RwLock<HashMap<SpotFamily, String>>,
    /// Default item sizes per kind, used when an item carries none.
    default_sizes: RwLock<HashMap<String, SizeF>>,
    configure: RwLock<Option<ConfigureHook>>,
}

impl std::fmt::Debug for RegistryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryService")
            .field("views", &self.views.read().map(|v| v.len()).unwrap_or(0))
            .finish_non_exhaustive()
    }
}

impl Default for RegistryService {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryService {
    /// Create a service with the built-in fallback view as every family's
    /// default and each family's canonical kind as its default kind.
    pub fn new() -> Self {
        let mut default_views = HashMap::new();
        let mut default_kinds = HashMap::new();
        for family in [SpotFamily::Grid, SpotFamily::List, SpotFamily::Carousel] {
            default_views.insert(family, FallbackView::factory());
            default_kinds.insert(family, family.as_str().to_string());
        }
        Self {
            views: RwLock::new(HashMap::new()),
            default_views: RwLock::new(default_views),
            default_kinds: RwLock::new(default_kinds),
            default_sizes: RwLock::new(HashMap::new()),
            configure: RwLock::new(None),
        }
    }

    /// Register a factory for a kind. Registering the same kind twice
    /// overwrites the earlier entry.
    pub fn register(&self, family: SpotFamily, kind: impl Into<String>, factory: ViewFactory) {
        if let Ok(mut views) = self.views.write() {
            views.insert((family, kind.into()), factory);
        }
    }

    /// Exact-match resolution; no fuzzy fallback.
    pub fn resolve(&self, family: SpotFamily, kind: &str) -> Option<ViewFactory> {
        self.views
            .read()
            .ok()
            .and_then(|views| views.get(&(family, kind.to_string())).cloned())
    }

    /// Whether a kind has an exact registration.
    pub fn is_registered(&self, family: SpotFamily, kind: &str) -> bool {
        self.views
            .read()
            .map(|views| views.contains_key(&(family, kind.to_string())))
            .unwrap_or(false)
    }

    /// Resolve a kind, falling back to the family default factory.
    /// Never empty: unregistered kinds degrade to a renderable default.
    pub fn view_or_default(&self, family: SpotFamily, kind: &str) -> ViewFactory {
        if let Some(factory) = self.resolve(family, kind) {
            return factory;
        }
        debug!(family = family.as_str(), kind, "unregistered kind, using family default");
        self.default_views
            .read()
            .ok()
            .and_then(|defaults| defaults.get(&family).cloned())
            .unwrap_or_else(FallbackView::factory)
    }

    /// Instantiate the view for a kind.
    pub fn make_view(&self, family: SpotFamily, kind: &str) -> ViewInstance {
        self.view_or_default(family, kind).make()
    }

    /// Replace the default factory for a family.
    pub fn set_default_view(&self, family: SpotFamily, factory: ViewFactory) {
        if let Ok(mut defaults) = self.default_views.write() {
            defaults.insert(family, factory);
        }
    }

    /// Replace the default kind string for a family.
    pub fn set_default_kind(&self, family: SpotFamily, kind: impl Into<String>) {
        if let Ok(mut kinds) = self.default_kinds.write() {
            kinds.insert(family, kind.into());
        }
    }

    /// The kind used when a component declares none.
    pub fn default_kind(&self, family: SpotFamily) -> String {
        self.default_kinds
            .read()
            .ok()
            .and_then(|kinds| kinds.get(&family).cloned())
            .unwrap_or_else(|| family.as_str().to_string())
    }

    /// Register the default item size for a kind.
    pub fn register_default_size(&self, kind: impl Into<String>, size: SizeF) {
        if let Ok(mut sizes) = self.default_sizes.write() {
            sizes.insert(kind.into(), size);
        }
    }

    /// Default item size for a kind; zero when none is registered (the
    /// layout engine then clamps to its own bounds).
    pub fn default_size(&self, kind: &str) -> SizeF {
        self.default_sizes
            .read()
            .ok()
            .and_then(|sizes| sizes.get(kind).copied())
            .unwrap_or(SizeF::ZERO)
    }

    /// Install the post-layout configure hook. Intended to be set once at
    /// startup; later calls replace the hook.
    pub fn set_configure_hook(&self, hook: ConfigureHook) {
        if let Ok(mut configure) = self.configure.write() {
            *configure = Some(hook);
        }
    }

    /// Run the configure hook against a surface, if one is installed.
    pub fn run_configure(&self, surface: &mut dyn Surface) {
        if let Ok(configure) = self.configure.read() {
            if let Some(hook) = configure.as_ref() {
                hook(surface);
            }
        }
    }
}

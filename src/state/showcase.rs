use tracing::{debug, info, warn};

use super::catalog::Catalog;
use super::data::Item;
use super::filter::{self, CategoryFilter};
use super::gallery::Gallery;
use super::overlay::{apply_overlay, OverlayStore};
use crate::error::{CatalogError, Result};

/// Where the catalog is in its load cycle
#[derive(Debug, Default)]
pub enum CatalogState {
    /// The document read is in flight; nothing is drawn yet
    #[default]
    Loading,
    Ready(Catalog),
    Failed(CatalogError),
}

/// The Showcase owns everything the window displays: the catalog, the
/// active filter, the gallery and the description store.
///
/// Every user action maps to one method here, so the whole application can
/// be driven without a window.
#[derive(Debug)]
pub struct Showcase {
    catalog: CatalogState,
    filter: CategoryFilter,
    gallery: Gallery,
    store: OverlayStore,
}

impl Showcase {
    pub fn new(store: OverlayStore) -> Self {
        Showcase {
            catalog: CatalogState::Loading,
            filter: CategoryFilter::All,
            gallery: Gallery::Closed,
            store,
        }
    }

    /// Forget the current catalog before reading a document again
    pub fn begin_loading(&mut self) {
        self.gallery.close();
        self.catalog = CatalogState::Loading;
    }

    /// Install a freshly read catalog, merging saved descriptions first.
    /// Returns how many saved descriptions were applied.
    pub fn install(&mut self, mut catalog: Catalog) -> usize {
        let applied = match self.store.load_overlay() {
            Ok(overlay) => apply_overlay(&mut catalog, &overlay),
            Err(err) => {
                warn!("⚠️  Ignoring saved descriptions: {}", err);
                0
            }
        };

        if let Ok(Some(saved_at)) = self.store.saved_at() {
            debug!("Saved descriptions date from {}", saved_at.to_rfc3339());
        }
        info!(
            "✅ Catalog ready: {} items, {} saved descriptions applied",
            catalog.len(),
            applied
        );

        self.filter = CategoryFilter::All;
        self.gallery.close();
        self.catalog = CatalogState::Ready(catalog);
        applied
    }

    /// Record a failed load; the grid shows an empty state instead
    pub fn fail(&mut self, err: CatalogError) {
        warn!("⚠️  {}", err);
        self.gallery.close();
        self.catalog = CatalogState::Failed(err);
    }

    pub fn state(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.catalog {
            CatalogState::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }

    // ========== Filtering ==========

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn select_filter(&mut self, filter: CategoryFilter) {
        debug!("Filter: {}", filter.tag());
        self.filter = filter;
    }

    pub fn filter_options(&self) -> Vec<CategoryFilter> {
        self.catalog()
            .map(filter::filter_options)
            .unwrap_or_default()
    }

    pub fn visible_keys(&self) -> Vec<&str> {
        self.catalog()
            .map(|catalog| filter::visible_keys(catalog, &self.filter))
            .unwrap_or_default()
    }

    // ========== Gallery ==========

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Open the gallery on `key`. Unknown keys leave the gallery as it is.
    pub fn open_item(&mut self, key: &str) -> bool {
        let Some(item) = self.catalog().and_then(|catalog| catalog.get(key)) else {
            return false;
        };
        let item = item.clone();
        self.gallery.open(key, &item);
        true
    }

    /// The item the gallery is showing
    pub fn current_item(&self) -> Option<(&str, &Item)> {
        let open = self.gallery.as_open()?;
        let item = self.catalog()?.get(open.key())?;
        Some((open.key(), item))
    }

    pub fn show_image(&mut self, index: usize) {
        self.gallery.show_index(index);
    }

    pub fn next_image(&mut self) {
        self.gallery.next();
    }

    pub fn previous_image(&mut self) {
        self.gallery.previous();
    }

    pub fn close_gallery(&mut self) {
        self.gallery.close();
    }

    /// Store the trimmed description on the open item and save the catalog.
    ///
    /// Returns `Ok(false)` when there is nothing to save to (gallery closed
    /// or the item is gone). A storage error leaves the in-memory edit in place.
    pub fn save_description(&mut self, text: &str) -> Result<bool> {
        let Some(open) = self.gallery.as_open() else {
            return Ok(false);
        };
        let CatalogState::Ready(catalog) = &mut self.catalog else {
            return Ok(false);
        };

        if !catalog.set_description(open.key(), text.trim()) {
            return Ok(false);
        }
        info!("💾 Saved description for {}", open.key());

        self.store.persist(catalog)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::tests::{sample, SAMPLE};
    use crate::state::overlay::SNAPSHOT_KEY;

    fn ready() -> Showcase {
        let mut showcase = Showcase::new(OverlayStore::open_in_memory().unwrap());
        showcase.install(sample());
        showcase
    }

    fn description(showcase: &Showcase, key: &str) -> String {
        showcase.catalog().unwrap().get(key).unwrap().description.clone()
    }

    #[test]
    fn test_loading_shows_nothing() {
        let showcase = Showcase::new(OverlayStore::open_in_memory().unwrap());
        assert!(matches!(showcase.state(), CatalogState::Loading));
        assert!(showcase.visible_keys().is_empty());
        assert!(showcase.filter_options().is_empty());
    }

    #[test]
    fn test_failed_load_stays_interactive() {
        let mut showcase = Showcase::new(OverlayStore::open_in_memory().unwrap());
        showcase.fail(CatalogError::DataLoad {
            path: "items_data.json".to_string(),
            reason: "not found".to_string(),
        });

        assert!(matches!(showcase.state(), CatalogState::Failed(_)));
        assert!(!showcase.open_item("sofa"));
        assert!(!showcase.save_description("x").unwrap());
        showcase.select_filter(CategoryFilter::from("moveis"));
        assert!(showcase.visible_keys().is_empty());
    }

    #[test]
    fn test_select_filter_is_single_select() {
        let mut showcase = ready();
        showcase.select_filter(CategoryFilter::from("moveis"));
        showcase.select_filter(CategoryFilter::from("eletronicos"));

        assert_eq!(showcase.filter(), &CategoryFilter::from("eletronicos"));
        assert_eq!(showcase.visible_keys(), vec!["tv"]);
    }

    #[test]
    fn test_open_unknown_key_is_noop() {
        let mut showcase = ready();
        assert!(!showcase.open_item("geladeira"));
        assert!(!showcase.gallery().is_open());
    }

    #[test]
    fn test_gallery_end_to_end() {
        let mut showcase = Showcase::new(OverlayStore::open_in_memory().unwrap());
        let catalog = Catalog::from_json(
            r#"{
                "sofa": {"category": "moveis", "original_name": "Sofa", "images": ["a.jpg", "b.jpg", "c.jpg"]},
                "tv": {"category": "eletronicos", "original_name": "TV", "images": []}
            }"#,
        )
        .unwrap();
        showcase.install(catalog);

        // Three images: cover first, navigation shown, previous wraps to the end
        assert!(showcase.open_item("sofa"));
        let open = showcase.gallery().as_open().unwrap();
        assert_eq!(open.index(), 0);
        assert!(open.nav_visible());

        showcase.previous_image();
        assert_eq!(showcase.gallery().as_open().unwrap().index(), 2);

        showcase.close_gallery();
        assert_eq!(showcase.gallery(), &Gallery::Closed);

        // No images: placeholder, navigation hidden
        assert!(showcase.open_item("tv"));
        let open = showcase.gallery().as_open().unwrap();
        assert_eq!(open.current_image(), None);
        assert!(!open.nav_visible());

        showcase.close_gallery();
        assert_eq!(showcase.gallery(), &Gallery::Closed);
        assert!(showcase.current_item().is_none());
    }

    #[test]
    fn test_save_description_trims_and_persists() {
        let mut showcase = ready();
        showcase.open_item("tv");

        assert!(showcase.save_description("   Smart TV 4K \n").unwrap());
        assert_eq!(description(&showcase, "tv"), "Smart TV 4K");

        // Gallery state is untouched by a save
        assert_eq!(showcase.current_item().unwrap().0, "tv");

        let overlay = showcase.store.load_overlay().unwrap();
        assert_eq!(overlay["tv"], "Smart TV 4K");
        assert_eq!(overlay.len(), 3);
    }

    #[test]
    fn test_save_empty_description_clears_it() {
        let mut showcase = ready();
        showcase.open_item("sofa");

        assert!(showcase.save_description("   ").unwrap());
        assert_eq!(description(&showcase, "sofa"), "");
    }

    #[test]
    fn test_save_reaches_the_card_listing() {
        let mut showcase = ready();
        showcase.select_filter(CategoryFilter::from("moveis"));
        showcase.open_item("mesa");
        showcase.save_description("Madeira macica").unwrap();

        let catalog = showcase.catalog().unwrap();
        let visible: Vec<&str> = showcase
            .visible_keys()
            .into_iter()
            .map(|key| catalog.get(key).unwrap().description.as_str())
            .collect();
        assert_eq!(visible, vec!["Retratil", "Madeira macica"]);
    }

    #[test]
    fn test_save_while_closed_is_noop() {
        let mut showcase = ready();
        assert!(!showcase.save_description("nada").unwrap());
        assert!(showcase.store.saved_at().unwrap().is_none());
    }

    #[test]
    fn test_saved_descriptions_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vitrine.db");

        {
            let mut showcase = Showcase::new(OverlayStore::open(&path).unwrap());
            showcase.install(sample());
            showcase.open_item("tv");
            showcase.save_description("Smart TV").unwrap();
        }

        let mut showcase = Showcase::new(OverlayStore::open(&path).unwrap());
        let applied = showcase.install(Catalog::from_json(SAMPLE).unwrap());
        assert_eq!(applied, 2);
        assert_eq!(description(&showcase, "tv"), "Smart TV");
        assert_eq!(description(&showcase, "sofa"), "Retratil");
    }

    #[test]
    fn test_corrupt_overlay_is_ignored() {
        let store = OverlayStore::open_in_memory().unwrap();
        store.write(SNAPSHOT_KEY, "{\"sofa\": [").unwrap();

        let mut showcase = Showcase::new(store);
        let applied = showcase.install(sample());

        assert_eq!(applied, 0);
        assert!(showcase.catalog().is_some());
        assert_eq!(description(&showcase, "sofa"), "Retratil");
    }

    #[test]
    fn test_reload_closes_gallery() {
        let mut showcase = ready();
        showcase.open_item("sofa");
        showcase.begin_loading();

        assert!(!showcase.gallery().is_open());
        assert!(matches!(showcase.state(), CatalogState::Loading));
    }
}

/// One application run's worth of state
///
/// The session owns the catalog, the key-value store and every store
/// built on top of it. The UI reads from it and calls the operations
/// below; after each selection change the comparison view is
/// reconciled so it never shows fewer than two products or points past
/// the end of the selection.

use super::catalog::Catalog;
use super::comparison::{self, ComparisonView, SpecRow, Step};
use super::data::{Product, SpecKey};
use super::filter::{self, FilterCriteria, ResultCount};
use super::preferences::{PreferenceStore, ThemeMode};
use super::selection::{SelectionChange, SelectionStore};
use super::store::KeyValueStore;

pub struct Session {
    catalog: Catalog,
    store: Box<dyn KeyValueStore>,
    selection: SelectionStore,
    preferences: PreferenceStore,
    comparison: ComparisonView,
    criteria: FilterCriteria,
}

impl Session {
    /// Rehydrate selection and theme from `store` and start with the
    /// comparison closed and no filters.
    pub fn start(
        catalog: Catalog,
        store: Box<dyn KeyValueStore>,
        capacity: usize,
        system_prefers_dark: impl FnOnce() -> bool,
    ) -> Self {
        let selection = SelectionStore::rehydrate(&catalog, store.as_ref(), capacity);
        let preferences = PreferenceStore::load(store.as_ref(), system_prefers_dark);

        Self {
            catalog,
            store,
            selection,
            preferences,
            comparison: ComparisonView::new(),
            criteria: FilterCriteria::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn comparison(&self) -> &ComparisonView {
        &self.comparison
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn theme(&self) -> ThemeMode {
        self.preferences.theme()
    }

    // ========== Filtering ==========

    /// Catalog products matching the current filters
    pub fn visible_products(&self) -> Vec<&Product> {
        filter::filter(&self.catalog, &self.criteria)
    }

    pub fn result_count(&self) -> ResultCount {
        ResultCount {
            shown: self.visible_products().len(),
            total: self.catalog.len(),
        }
    }

    pub fn brands(&self) -> Vec<&str> {
        self.catalog.brands()
    }

    pub fn set_search_query(&mut self, query: String) {
        self.criteria.search_query = query;
    }

    /// `None` removes the brand constraint
    pub fn set_brand_filter(&mut self, brand: Option<String>) {
        self.criteria.brand_filter = brand;
    }

    pub fn clear_filters(&mut self) {
        self.criteria.clear();
    }

    // ========== Selection ==========

    /// Toggle the catalog product with `id`. Unknown ids are ignored.
    pub fn toggle_select(&mut self, id: &str) -> SelectionChange {
        let change = match self.catalog.get(id) {
            Some(product) => self.selection.toggle(product, self.store.as_mut()),
            None => {
                log::debug!("Ignoring toggle for unknown product '{}'", id);
                SelectionChange::Unchanged
            }
        };
        self.sync_comparison();
        change
    }

    pub fn remove(&mut self, id: &str) -> SelectionChange {
        let change = self.selection.remove(id, self.store.as_mut());
        self.sync_comparison();
        change
    }

    /// Empty the selection and close the comparison
    pub fn clear_all(&mut self) -> SelectionChange {
        let change = self.selection.clear(self.store.as_mut());
        self.comparison.close();
        change
    }

    fn sync_comparison(&mut self) {
        if self.comparison.sync(self.selection.len()) {
            log::debug!("Comparison closed: fewer than two products selected");
        }
    }

    // ========== Comparison ==========

    /// Open the comparison if at least two products are selected
    pub fn open_comparison(&mut self) -> bool {
        self.comparison.open(self.selection.len())
    }

    pub fn close_comparison(&mut self) {
        self.comparison.close();
    }

    pub fn select_active(&mut self, index: usize) {
        self.comparison.select(index, self.selection.len());
    }

    pub fn step_active(&mut self, step: Step) {
        self.comparison.step(step, self.selection.len());
    }

    pub fn active_product(&self) -> Option<&Product> {
        self.comparison.active_product(self.selection.products())
    }

    /// Comparison table for every spec key, empty while fewer than two
    /// products are selected
    pub fn comparison_rows(&self) -> Vec<SpecRow<'_>> {
        comparison::compare(self.selection.products(), &SpecKey::ALL)
    }

    // ========== Preferences ==========

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.preferences.toggle_theme(self.store.as_mut())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("products", &self.catalog.len())
            .field("selection", &self.selection.ids())
            .field("comparison", &self.comparison.state())
            .field("theme", &self.preferences.theme())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::comparison::ViewState;
    use crate::state::data::fixtures::product;
    use crate::state::library::Library;
    use crate::state::preferences::THEME_KEY;
    use crate::state::selection::{DEFAULT_CAPACITY, SELECTION_KEY};
    use crate::state::store::MemoryStore;

    fn catalog() -> Catalog {
        Catalog::from_products(vec![
            product("a", "Acme"),
            product("b", "Zeta"),
            product("c", "Acme"),
            product("d", "Mono"),
        ])
        .unwrap()
    }

    fn session() -> Session {
        Session::start(catalog(), Box::new(MemoryStore::new()), DEFAULT_CAPACITY, || false)
    }

    fn session_with(ids: &[&str]) -> Session {
        let mut session = session();
        for id in ids {
            session.toggle_select(id);
        }
        session
    }

    #[test]
    fn test_auto_close_when_selection_drops_below_two() {
        let mut session = session_with(&["a", "b", "c"]);
        assert!(session.open_comparison());

        session.remove("a");
        assert!(session.comparison().is_open());

        session.remove("b");
        assert_eq!(session.comparison().state(), ViewState::Closed);
    }

    #[test]
    fn test_toggle_off_inside_comparison_auto_closes() {
        let mut session = session_with(&["a", "b"]);
        session.open_comparison();

        session.toggle_select("b");

        assert!(!session.comparison().is_open());
    }

    #[test]
    fn test_active_index_clamped_after_removal() {
        let mut session = session_with(&["a", "b", "c"]);
        session.open_comparison();
        session.select_active(2);

        session.remove("c");

        assert_eq!(session.comparison().active_index(), Some(1));
        assert_eq!(session.active_product().map(|p| p.id.as_str()), Some("b"));
    }

    #[test]
    fn test_open_needs_two_selected() {
        let mut session = session_with(&["a"]);
        assert!(!session.open_comparison());
        assert!(session.comparison_rows().is_empty());

        session.toggle_select("b");
        assert!(session.open_comparison());
        assert_eq!(session.comparison_rows().len(), SpecKey::ALL.len());
    }

    #[test]
    fn test_clear_all_closes_comparison() {
        let mut session = session_with(&["a", "b"]);
        session.open_comparison();

        assert_eq!(session.clear_all(), SelectionChange::Cleared);

        assert!(session.selection().is_empty());
        assert!(!session.comparison().is_open());
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut session = session_with(&["a"]);
        assert_eq!(session.toggle_select("nope"), SelectionChange::Unchanged);
        assert_eq!(session.selection().ids(), vec!["a"]);
    }

    #[test]
    fn test_step_navigation() {
        let mut session = session_with(&["a", "b", "c"]);
        session.step_active(Step::Next);
        assert_eq!(session.comparison().active_index(), None);

        session.open_comparison();
        session.step_active(Step::Next);
        session.step_active(Step::Next);
        session.step_active(Step::Next);
        assert_eq!(session.comparison().active_index(), Some(2));

        session.step_active(Step::Previous);
        assert_eq!(session.active_product().map(|p| p.id.as_str()), Some("b"));
    }

    #[test]
    fn test_filters() {
        let mut session = session();
        session.set_brand_filter(Some("Acme".to_string()));

        let visible: Vec<&str> = session.visible_products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(visible, vec!["a", "c"]);
        assert_eq!(session.result_count().to_string(), "2 of 4");
        assert_eq!(session.brands(), vec!["Acme", "Zeta", "Mono"]);

        session.set_search_query("zzz".to_string());
        assert!(session.visible_products().is_empty());

        session.clear_filters();
        assert_eq!(session.visible_products().len(), 4);
    }

    #[test]
    fn test_state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("prefs.db");

        {
            let library = Library::open(db_path.clone()).unwrap();
            let mut session = Session::start(catalog(), Box::new(library), DEFAULT_CAPACITY, || false);
            session.toggle_select("c");
            session.toggle_select("a");
            session.toggle_theme();
        }

        let library = Library::open(db_path).unwrap();
        let session = Session::start(catalog(), Box::new(library), DEFAULT_CAPACITY, || false);

        assert_eq!(session.selection().ids(), vec!["c", "a"]);
        assert_eq!(session.theme(), ThemeMode::Dark);
        assert!(!session.comparison().is_open());
    }

    #[test]
    fn test_rehydrates_against_current_catalog() {
        let mut store = MemoryStore::new();
        store.set(SELECTION_KEY, r#"["a","gone","d"]"#).unwrap();
        store.set(THEME_KEY, "dark").unwrap();

        let session = Session::start(catalog(), Box::new(store), DEFAULT_CAPACITY, || false);

        assert_eq!(session.selection().ids(), vec!["a", "d"]);
        assert_eq!(session.theme(), ThemeMode::Dark);
    }
}

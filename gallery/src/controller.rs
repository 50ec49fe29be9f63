//! Session state for one gallery window.

use crate::filter::{self, FilterCriteria};
use api_client::{FetchError, Photo, PhotoId, PhotoSource};
use favorites::{FavoriteSet, FavoriteSnapshot, FavoritesStore, SnapshotMap};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    /// The last fetch failed. Photos from an earlier success are kept.
    LoadError(String),
}

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("Photo not found: {0}")]
    NotFound(PhotoId),
}

pub struct GalleryController {
    state: LoadState,
    photos: Vec<Photo>,
    criteria: FilterCriteria,
    selected: Option<Photo>,
    favorites: FavoriteSet,
    snapshots: SnapshotMap,
    store: FavoritesStore,
}

impl GalleryController {
    /// An idle controller with nothing loaded. Most callers want [`Self::start`].
    pub fn new(store: FavoritesStore) -> Self {
        GalleryController {
            state: LoadState::Idle,
            photos: Vec::new(),
            criteria: FilterCriteria::default(),
            selected: None,
            favorites: FavoriteSet::new(),
            snapshots: SnapshotMap::new(),
            store,
        }
    }

    /// Build a controller and run the startup fetch and favorites load side by side.
    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip(source, store)))]
    pub async fn start<S: PhotoSource>(source: &S, store: FavoritesStore) -> Self {
        let mut gallery = Self::new(store);
        gallery.begin_fetch();
        let (result, (favorites, snapshots)) = tokio::join!(source.fetch_page(), async {
            (gallery.store.load(), gallery.store.load_snapshots())
        });
        gallery.set_favorites(favorites, snapshots);
        gallery.finish_fetch(result);
        gallery
    }

    /// Reload favorites from storage, replacing the cached copy.
    pub fn load_favorites(&mut self) {
        let favorites = self.store.load();
        let snapshots = self.store.load_snapshots();
        self.set_favorites(favorites, snapshots);
    }

    fn set_favorites(&mut self, favorites: FavoriteSet, snapshots: SnapshotMap) {
        tracing::debug!("Favorites cache holds {} ids", favorites.len());
        self.favorites = favorites;
        self.snapshots = snapshots;
    }

    /// Mark a fetch as in flight. Returns false, changing nothing, if one already is.
    pub fn begin_fetch(&mut self) -> bool {
        if self.state == LoadState::Loading {
            tracing::debug!("Fetch already in flight, ignoring");
            return false;
        }
        self.state = LoadState::Loading;
        true
    }

    /// Land the outcome of the fetch started by [`Self::begin_fetch`].
    pub fn finish_fetch(&mut self, result: Result<Vec<Photo>, FetchError>) {
        if self.state != LoadState::Loading {
            tracing::warn!("Dropping fetch result that arrived while {:?}", self.state);
            return;
        }
        match result {
            Ok(photos) => {
                tracing::info!("Gallery loaded {} photos", photos.len());
                let selected_id = self.selected.take().map(|p| p.id);
                self.selected =
                    selected_id.and_then(|id| photos.iter().find(|p| p.id == id).cloned());
                self.photos = photos;
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                tracing::error!("Failed to fetch photos: {}", e);
                self.state = LoadState::LoadError(e.to_string());
            }
        }
    }

    /// Fetch the page again. Returns false if a fetch was already running.
    pub async fn refresh<S: PhotoSource>(&mut self, source: &S) -> bool {
        if !self.begin_fetch() {
            return false;
        }
        let result = source.fetch_page().await;
        self.finish_fetch(result);
        true
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::LoadError(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.criteria.query = text.into();
    }

    pub fn set_category_filter(&mut self, value: impl Into<String>) {
        self.criteria.category = value.into();
    }

    pub fn set_color_filter(&mut self, value: impl Into<String>) {
        self.criteria.color = value.into();
    }

    /// The view already follows every criteria change; kept for callers that
    /// wire up a search button.
    pub fn search(&self) {}

    /// Photos currently eligible for display, in fetch order.
    pub fn view(&self) -> Vec<&Photo> {
        filter::apply(&self.photos, &self.criteria)
    }

    pub fn select_photo(&mut self, id: &PhotoId) -> Result<&Photo, GalleryError> {
        let photo = self
            .photos
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| GalleryError::NotFound(id.clone()))?;
        let selected: &Photo = self.selected.insert(photo.clone());
        Ok(selected)
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn selected_photo(&self) -> Option<&Photo> {
        self.selected.as_ref()
    }

    /// Flip favorite membership and persist it. Returns the new membership.
    #[cfg_attr(feature = "trace-spans", tracing::instrument(skip(self)))]
    pub fn toggle_favorite(&mut self, id: &PhotoId) -> bool {
        let next = favorites::toggle(&self.favorites, id);
        let member = next.contains(id);
        if member {
            if let Some(photo) = self.photos.iter().find(|p| &p.id == id) {
                self.snapshots.insert(id.clone(), FavoriteSnapshot::from(photo));
            }
        } else {
            self.snapshots.remove(id);
        }
        self.store.save(&next);
        self.store.save_snapshots(&self.snapshots);
        self.favorites = next;
        tracing::debug!("Photo {} favorite: {}", id, member);
        member
    }

    pub fn is_favorite(&self, id: &PhotoId) -> bool {
        self.favorites.contains(id)
    }

    pub fn favorite_ids(&self) -> &FavoriteSet {
        &self.favorites
    }

    /// Every favorite with whatever display data is known for it, numeric
    /// ids in numeric order.
    pub fn favorites(&self) -> Vec<FavoriteSnapshot> {
        let mut ids: Vec<&PhotoId> = self.favorites.iter().collect();
        ids.sort_by_cached_key(|id| numeric_order(id));
        ids.into_iter()
            .map(|id| {
                self.snapshots
                    .get(id)
                    .cloned()
                    .or_else(|| {
                        self.photos
                            .iter()
                            .find(|p| &p.id == id)
                            .map(FavoriteSnapshot::from)
                    })
                    .unwrap_or_else(|| FavoriteSnapshot::id_only(id.clone()))
            })
            .collect()
    }
}

// Integer ids first by value, anything else after them by text.
fn numeric_order(id: &PhotoId) -> (bool, u64, String) {
    match id.as_str().parse::<u64>() {
        Ok(n) => (false, n, String::new()),
        Err(_) => (true, 0, id.as_str().to_string()),
    }
}

//! Photo collection store: cached listing, album filter, derived view.

use crate::api::{self, AlbumId, Photo, PhotoTransport};
use crate::storage::KeyValueStorage;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Storage key holding the persisted album filter (JSON array of ids).
const FILTER_KEY: &str = "albumFilter";

#[derive(Default)]
struct StoreState {
    photos: Vec<Photo>,
    loading: bool,
    error: Option<String>,
    album_filter: Vec<AlbumId>,
    /// Generation of the most recent fetch call. A completing fetch applies
    /// its result only while its own token is still the latest.
    generation: u64,
}

/// Client-side container for the photo listing.
///
/// Holds the last-fetched collection, a loading flag, the error from the
/// most recent failed fetch, and the user's album filter. The filtered view
/// is derived on read, never cached. Cloning shares the underlying state,
/// so one handle can run a fetch while another observes `loading()`.
#[derive(Clone)]
pub struct PhotoStore {
    state: Arc<Mutex<StoreState>>,
    transport: Arc<dyn PhotoTransport>,
    storage: Arc<dyn KeyValueStorage>,
    endpoint: String,
}

impl PhotoStore {
    /// Store talking to the default endpoint over HTTP.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_transport(
            Arc::new(api::HttpTransport::new()),
            storage,
            api::endpoint_url(),
        )
    }

    /// Store with an explicit transport and endpoint.
    pub fn with_transport(
        transport: Arc<dyn PhotoTransport>,
        storage: Arc<dyn KeyValueStorage>,
        endpoint: String,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::default())),
            transport,
            storage,
            endpoint,
        }
    }

    /// Fetch the photo listing, optionally narrowed to `album_ids` on the
    /// remote side, and replace the cached collection wholesale on success.
    /// On failure the collection is left untouched and `last_error` is set.
    ///
    /// Overlapping calls are resolved by generation token: only the latest
    /// call applies its outcome, earlier in-flight results are dropped.
    /// No retries, no timeout, no cancellation.
    pub async fn fetch_photos(&self, album_ids: &[AlbumId]) {
        let token = {
            let mut state = self.state.lock().unwrap();
            state.generation += 1;
            state.loading = true;
            state.error = None;
            state.generation
        };

        let result =
            api::fetch_photo_list(self.transport.as_ref(), &self.endpoint, album_ids).await;

        let mut state = self.state.lock().unwrap();
        if state.generation != token {
            // A newer fetch owns the state now, including the loading flag.
            debug!("discarding stale fetch result (generation {token})");
            return;
        }
        match result {
            Ok(photos) => {
                info!("fetched {} photos", photos.len());
                state.photos = photos;
            }
            Err(e) => {
                warn!("photo fetch failed: {e}");
                state.error = Some(e.to_string());
            }
        }
        state.loading = false;
    }

    /// Replace the album filter and persist it immediately.
    pub fn set_album_filter(&self, ids: Vec<AlbumId>) {
        let mut state = self.state.lock().unwrap();
        if let Ok(encoded) = serde_json::to_string(&ids) {
            self.storage.set_item(FILTER_KEY, &encoded);
        }
        state.album_filter = ids;
    }

    /// Restore the album filter from storage.
    ///
    /// Best-effort: a missing key or undecodable value leaves the current
    /// filter in place. Restoring the filter is a convenience, not a
    /// correctness requirement, so failures stay silent.
    pub fn load_album_filter(&self) {
        let Some(saved) = self.storage.get_item(FILTER_KEY) else {
            return;
        };
        match serde_json::from_str::<Vec<AlbumId>>(&saved) {
            Ok(ids) => self.state.lock().unwrap().album_filter = ids,
            Err(e) => debug!("ignoring unreadable saved album filter: {e}"),
        }
    }

    /// The photos visible under the current filter, in listing order.
    /// An empty filter shows everything.
    pub fn filtered_photos(&self) -> Vec<Photo> {
        let state = self.state.lock().unwrap();
        if state.album_filter.is_empty() {
            return state.photos.clone();
        }
        state
            .photos
            .iter()
            .filter(|p| state.album_filter.contains(&p.album_id))
            .cloned()
            .collect()
    }

    /// The full cached listing, unfiltered.
    pub fn photos(&self) -> Vec<Photo> {
        self.state.lock().unwrap().photos.clone()
    }

    /// True while a fetch is outstanding.
    pub fn loading(&self) -> bool {
        self.state.lock().unwrap().loading
    }

    /// Rendered error from the most recent failed fetch, if any.
    /// Cleared when the next fetch starts.
    pub fn last_error(&self) -> Option<String> {
        self.state.lock().unwrap().error.clone()
    }

    /// The current album filter.
    pub fn album_filter(&self) -> Vec<AlbumId> {
        self.state.lock().unwrap().album_filter.clone()
    }
}

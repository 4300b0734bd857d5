use settle_core::compose::remember_with_key;
use settle_core::signal::{Signal, signal};

/// Page cursor over `0..total_pages`. Movement past either edge is a
/// clamped no-op, never an error — pagination controls just stop advancing.
///
/// Hosts that mirror the page elsewhere (a URL, saved state) subscribe to
/// [`page_signal`](Pager::page_signal) and supply the restored page back as
/// the initial page on the next mount.
pub struct Pager {
    page: Signal<usize>,
    total_pages: usize,
}

impl Pager {
    /// An out-of-range `initial_page` is clamped to the last page.
    pub fn new(initial_page: usize, total_pages: usize) -> Self {
        let last = total_pages.saturating_sub(1);
        Self {
            page: signal(initial_page.min(last)),
            total_pages,
        }
    }

    pub fn page(&self) -> usize {
        self.page.get()
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn page_signal(&self) -> Signal<usize> {
        self.page.clone()
    }

    pub fn is_first_page(&self) -> bool {
        self.page() == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.page() + 1 >= self.total_pages
    }

    pub fn next_page(&self) {
        if !self.is_last_page() {
            self.page.update(|p| *p += 1);
        }
    }

    pub fn previous_page(&self) {
        if !self.is_first_page() {
            self.page.update(|p| *p -= 1);
        }
    }
}

impl Clone for Pager {
    fn clone(&self) -> Self {
        Self {
            page: self.page.clone(),
            total_pages: self.total_pages,
        }
    }
}

/// Remembers one [`Pager`] per key. `total_pages` is fixed at first mount;
/// a data-set size change warrants a new key.
pub fn use_pagination(key: impl Into<String>, initial_page: usize, total_pages: usize) -> Pager {
    let key = key.into();
    let slot = remember_with_key(format!("pagination:{key}"), || {
        Pager::new(initial_page, total_pages)
    });
    (*slot).clone()
}

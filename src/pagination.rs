//! Cursor pagination state machine.
//!
//! ```text
//! Idle ──begin_initial──▶ Loading ──complete──▶ Loaded ◀──complete── LoadingMore
//!                                         │        └──begin_more──────────▲
//!                                         └──(short page)──▶ Exhausted
//! ```
//!
//! A page shorter than the requested limit ends pagination. Otherwise the
//! cursor is taken from the last item actually received. Every initial
//! load and every reset bumps a generation counter; results carrying an
//! older generation are discarded. A failed request restores the state
//! that preceded it.

/// Where a list is in its pagination lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Idle,
    Loading,
    Loaded,
    LoadingMore,
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Initial,
    More,
}

/// Ticket for one in-flight page fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest<C> {
    pub generation: u64,
    pub kind: PageKind,
    pub cursor: Option<C>,
    pub limit: u32,
}

#[derive(Debug, Clone)]
pub struct Paginator<C> {
    page_size: u32,
    state: PageState,
    cursor: Option<C>,
    generation: u64,
    /// State to restore if the in-flight request fails.
    before_request: PageState,
}

impl<C: Clone> Paginator<C> {
    /// A page size of zero is treated as one.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            state: PageState::Idle,
            cursor: None,
            generation: 0,
            before_request: PageState::Idle,
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Cursor for the next page, if one has been derived.
    pub fn cursor(&self) -> Option<&C> {
        self.cursor.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_more(&self) -> bool {
        matches!(self.state, PageState::Loaded | PageState::LoadingMore)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PageState::Loading | PageState::LoadingMore)
    }

    /// Start a first-page load. Always allowed; supersedes whatever is in
    /// flight.
    pub fn begin_initial(&mut self) -> PageRequest<C> {
        if !self.is_loading() {
            self.before_request = self.state;
        }
        self.generation += 1;
        self.state = PageState::Loading;
        PageRequest {
            generation: self.generation,
            kind: PageKind::Initial,
            cursor: None,
            limit: self.page_size,
        }
    }

    /// Start a next-page load, or `None` if a load is in flight, the list
    /// is exhausted, or nothing has been loaded yet.
    pub fn begin_more(&mut self) -> Option<PageRequest<C>> {
        if self.state != PageState::Loaded {
            return None;
        }
        self.before_request = self.state;
        self.state = PageState::LoadingMore;
        Some(PageRequest {
            generation: self.generation,
            kind: PageKind::More,
            cursor: self.cursor.clone(),
            limit: self.page_size,
        })
    }

    /// Record a received page. Returns `false` (and changes nothing) if the
    /// request is stale and its items must be discarded.
    pub fn complete<T>(
        &mut self,
        request: &PageRequest<C>,
        items: &[T],
        cursor_of: impl Fn(&T) -> C,
    ) -> bool {
        if !self.is_current(request) {
            return false;
        }

        match items.last() {
            Some(last) => self.cursor = Some(cursor_of(last)),
            None if request.kind == PageKind::Initial => self.cursor = None,
            None => {}
        }

        self.state = if (items.len() as u64) < request.limit as u64 {
            PageState::Exhausted
        } else {
            PageState::Loaded
        };
        true
    }

    /// Record a failed fetch. The state returns to what it was before the
    /// attempt; the cursor is untouched.
    pub fn fail(&mut self, request: &PageRequest<C>) -> bool {
        if !self.is_current(request) {
            return false;
        }
        self.state = self.before_request;
        true
    }

    /// Drop the cursor and return to `Idle`. In-flight results become stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = PageState::Idle;
        self.before_request = PageState::Idle;
        self.cursor = None;
    }

    fn is_current(&self, request: &PageRequest<C>) -> bool {
        request.generation == self.generation
            && match request.kind {
                PageKind::Initial => self.state == PageState::Loading,
                PageKind::More => self.state == PageState::LoadingMore,
            }
    }
}

/// Identifier handed out for every request the app sends to the network worker.
pub type RequestId = u64;

/// Where a screen's resource stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

/// A fetched resource plus the id of the request that is allowed to fill it.
///
/// Only the most recent request may resolve or fail the slot. Anything else is
/// a late answer to a superseded request and is rejected.
#[derive(Debug, Clone)]
pub struct Tracked<T> {
    state: FetchState<T>,
    pending: Option<RequestId>,
}

impl<T> Default for Tracked<T> {
    fn default() -> Self {
        Self { state: FetchState::Idle, pending: None }
    }
}

impl<T> Tracked<T> {
    pub fn begin(&mut self, id: RequestId) {
        self.state = FetchState::Loading;
        self.pending = Some(id);
    }

    pub fn is_pending(&self, id: RequestId) -> bool {
        self.pending == Some(id)
    }

    /// Returns false, leaving the slot untouched, when `id` is not the latest request.
    pub fn resolve(&mut self, id: RequestId, data: T) -> bool {
        if !self.is_pending(id) {
            return false;
        }
        self.pending = None;
        self.state = FetchState::Loaded(data);
        true
    }

    /// Same id rule as [`Tracked::resolve`]. Previously loaded data is dropped.
    pub fn fail(&mut self, id: RequestId, message: String) -> bool {
        if !self.is_pending(id) {
            return false;
        }
        self.pending = None;
        self.state = FetchState::Failed(message);
        true
    }

    /// Back to idle; any in-flight answer will be rejected.
    pub fn reset(&mut self) {
        self.state = FetchState::Idle;
        self.pending = None;
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        match &self.state {
            FetchState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    /// Idle or failed slots are the ones worth fetching on screen open.
    pub fn needs_fetch(&self) -> bool {
        matches!(self.state, FetchState::Idle | FetchState::Failed(_))
    }
}

/// Monotonic source of request ids, shared by every screen.
#[derive(Debug, Default)]
pub struct RequestCounter {
    last: RequestId,
}

impl RequestCounter {
    pub fn next_id(&mut self) -> RequestId {
        self.last += 1;
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_request_wins() {
        let mut slot: Tracked<Vec<u32>> = Tracked::default();
        slot.begin(1);
        slot.begin(2);

        assert!(!slot.resolve(1, vec![1]));
        assert!(slot.is_loading());

        assert!(slot.resolve(2, vec![2]));
        assert_eq!(slot.data(), Some(&vec![2]));

        // already answered
        assert!(!slot.resolve(2, vec![3]));
        assert_eq!(slot.data(), Some(&vec![2]));
    }

    #[test]
    fn test_failure_clears_data() {
        let mut slot: Tracked<&str> = Tracked::default();
        slot.begin(1);
        slot.resolve(1, "table");
        slot.begin(2);
        assert!(slot.fail(2, "HTTP 500".into()));
        assert_eq!(slot.state(), &FetchState::Failed("HTTP 500".into()));
        assert_eq!(slot.data(), None);
        assert!(slot.needs_fetch());
    }

    #[test]
    fn test_stale_failure_is_rejected() {
        let mut slot: Tracked<u8> = Tracked::default();
        slot.begin(4);
        assert!(!slot.fail(3, "late".into()));
        assert!(slot.is_loading());
    }

    #[test]
    fn test_reset_rejects_in_flight_answer() {
        let mut slot: Tracked<u8> = Tracked::default();
        slot.begin(9);
        slot.reset();
        assert!(!slot.resolve(9, 1));
        assert_eq!(slot.state(), &FetchState::Idle);
    }

    #[test]
    fn test_request_ids_increase() {
        let mut counter = RequestCounter::default();
        let a = counter.next_id();
        let b = counter.next_id();
        assert!(b > a);
    }
}

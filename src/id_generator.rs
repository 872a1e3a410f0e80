use std::sync::atomic::{AtomicUsize, Ordering};

use crate::element::ElementId;

// One counter for the whole process, so handles are never reused even
// across rebuilds of the model
static NEXT_HANDLE: AtomicUsize = AtomicUsize::new(1);

pub fn generate_id() -> ElementId {
    ElementId::from_raw(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
}

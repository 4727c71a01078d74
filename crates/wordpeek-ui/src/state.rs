use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wordpeek_types::RequestId;

use crate::{ConfirmWindow, NoticeWindow};

/// Windows the presenter keeps alive on its own: open prompts and notices.
/// Result windows are owned by the router's registry instead.
pub struct UiState {
    pub confirmations: Rc<RefCell<HashMap<RequestId, ConfirmWindow>>>,
    pub notices: Rc<RefCell<HashMap<u64, NoticeWindow>>>,
    next_notice: Cell<u64>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            confirmations: Rc::new(RefCell::new(HashMap::new())),
            notices: Rc::new(RefCell::new(HashMap::new())),
            next_notice: Cell::new(1),
        }
    }

    pub fn next_notice_id(&self) -> u64 {
        let id = self.next_notice.get();
        self.next_notice.set(id + 1);
        id
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

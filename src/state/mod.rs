// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> / Rc<Cell>
// ============================================================================

pub mod submission;
pub mod app_state;

pub use submission::{InFlightGuard, SubmitState, MSG_BUSY};
pub use app_state::AppState;

// ============================================================================
// SUBMIT STATE - un envío en curso por control
// ============================================================================
// El botón queda deshabilitado mientras exista el guard. Al soltarlo (éxito,
// error o panic del future) el control se habilita de nuevo.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use crate::error::ClientError;

pub const MSG_BUSY: &str = "Ya hay una solicitud en curso";

#[derive(Clone, Default, Debug)]
pub struct SubmitState {
    in_flight: Rc<Cell<bool>>,
}

impl SubmitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` si ya hay un envío en curso
    pub fn try_begin(&self) -> Option<InFlightGuard> {
        if self.in_flight.replace(true) {
            log::warn!("⏳ [SUBMIT] Envío duplicado ignorado");
            return None;
        }
        Some(InFlightGuard {
            in_flight: Rc::clone(&self.in_flight),
        })
    }

    /// Igual que `try_begin`, con el error que ve el usuario si está ocupado
    pub fn begin(&self) -> Result<InFlightGuard, ClientError> {
        self.try_begin().ok_or_else(|| ClientError::validation(MSG_BUSY))
    }

    /// El control debe mostrarse deshabilitado
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }
}

#[derive(Debug)]
pub struct InFlightGuard {
    in_flight: Rc<Cell<bool>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_submit_is_rejected_while_in_flight() {
        let state = SubmitState::new();
        let guard = state.try_begin();
        assert!(guard.is_some());
        assert!(state.is_in_flight());
        assert!(state.try_begin().is_none());

        drop(guard);
        assert!(!state.is_in_flight());
        assert!(state.try_begin().is_some());
    }

    #[test]
    fn busy_control_reports_request_in_progress() {
        let state = SubmitState::new();
        let _guard = state.begin().unwrap();
        assert_eq!(state.begin().unwrap_err(), ClientError::Validation(MSG_BUSY.to_string()));
    }

    #[test]
    fn clones_share_the_flag() {
        let state = SubmitState::new();
        let button = state.clone();
        let _guard = state.try_begin().unwrap();
        assert!(button.is_in_flight());
    }

    #[test]
    fn flag_is_released_on_early_error_return() {
        fn submit(state: &SubmitState) -> Result<(), String> {
            let _guard = state.try_begin().ok_or("busy")?;
            Err("Error de conexión".to_string())
        }
        let state = SubmitState::new();
        assert!(submit(&state).is_err());
        assert!(!state.is_in_flight());
    }
}

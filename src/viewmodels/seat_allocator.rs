// ============================================================================
// SEAT PICKUP ALLOCATOR - un punto de recogida por cupo
// ============================================================================

use crate::error::AllocationError;
use crate::models::PickupSlot;

/// `seat_count` cupos sin asignar. `available` son los puntos intermedios
/// del viaje; se reciben para validar contra ellos al asignar.
pub fn allocate(seat_count: u32, available: &[String]) -> Result<Vec<PickupSlot>, AllocationError> {
    if seat_count == 0 {
        return Err(AllocationError::NoSeatCount);
    }
    log::debug!("🎫 [BOOKING] {} cupos, {} puntos disponibles", seat_count, available.len());
    Ok((0..seat_count as usize).map(PickupSlot::unassigned).collect())
}

/// Asigna al cupo `seat_index` el punto `available[choice_index]`
pub fn assign(
    slots: &mut [PickupSlot],
    seat_index: usize,
    choice_index: usize,
    available: &[String],
) -> Result<(), AllocationError> {
    let label = available.get(choice_index).ok_or(AllocationError::InvalidIndex {
        seat: seat_index + 1,
        index: choice_index,
    })?;
    let slot = slots
        .get_mut(seat_index)
        .ok_or(AllocationError::InvalidSeat { seat: seat_index + 1 })?;
    slot.waypoint = Some(label.clone());
    Ok(())
}

/// Quita la asignación de un cupo (el selector vuelve a "Selecciona...")
pub fn unassign(slots: &mut [PickupSlot], seat_index: usize) -> Result<(), AllocationError> {
    let slot = slots
        .get_mut(seat_index)
        .ok_or(AllocationError::InvalidSeat { seat: seat_index + 1 })?;
    slot.waypoint = None;
    Ok(())
}

pub fn validate_complete(slots: &[PickupSlot]) -> bool {
    !slots.is_empty() && slots.iter().all(PickupSlot::is_assigned)
}

pub fn assigned_count(slots: &[PickupSlot]) -> usize {
    slots.iter().filter(|slot| slot.is_assigned()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|label| label.to_string()).collect()
    }

    #[test]
    fn allocate_returns_exactly_n_unassigned_slots() {
        let available = points(&["B", "C"]);
        for n in 1..=4 {
            let slots = allocate(n, &available).unwrap();
            assert_eq!(slots.len(), n as usize);
            assert!(slots.iter().all(|slot| slot.waypoint.is_none()));
            assert!(!validate_complete(&slots));
        }
        assert_eq!(allocate(0, &available), Err(AllocationError::NoSeatCount));
    }

    #[test]
    fn index_zero_is_a_real_choice() {
        let available = points(&["B", "C"]);
        let mut slots = allocate(2, &available).unwrap();

        assign(&mut slots, 0, 0, &available).unwrap();
        assert_eq!(slots[0].waypoint.as_deref(), Some("B"));
        assert!(!validate_complete(&slots));

        assign(&mut slots, 1, 1, &available).unwrap();
        assert!(validate_complete(&slots));
        assert_eq!(assigned_count(&slots), 2);
    }

    #[test]
    fn out_of_bounds_choices_are_rejected() {
        let available = points(&["B"]);
        let mut slots = allocate(1, &available).unwrap();
        assert_eq!(
            assign(&mut slots, 0, 3, &available),
            Err(AllocationError::InvalidIndex { seat: 1, index: 3 })
        );
        assert_eq!(
            assign(&mut slots, 2, 0, &available),
            Err(AllocationError::InvalidSeat { seat: 3 })
        );
        assert!(!validate_complete(&slots));
    }

    #[test]
    fn unassign_makes_the_booking_incomplete_again() {
        let available = points(&["B"]);
        let mut slots = allocate(1, &available).unwrap();
        assign(&mut slots, 0, 0, &available).unwrap();
        unassign(&mut slots, 0).unwrap();
        assert!(!validate_complete(&slots));
    }
}

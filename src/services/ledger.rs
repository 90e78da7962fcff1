// src/services/ledger.rs
//
// The pure core of the inventory ledger: movement arithmetic and stock
// health. `plan_movement` validates a movement against the current stock
// level and produces the bookkeeping figures; `InventoryService` is
// responsible for applying a plan atomically.

use crate::{
    common::error::AppError,
    models::inventory::{CriticalityTier, MovementType, StockStatus},
};

// A validated movement, ready to be applied. `new_stock` is guaranteed
// non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementPlan {
    pub quantity: i32,
    pub previous_stock: i32,
    pub new_stock: i32,
}

// The stock delta implied by a movement. Inward and outward take a strictly
// positive quantity (the sign comes from the type); adjustment takes a
// non-zero signed quantity.
pub fn signed_delta(movement_type: MovementType, quantity: i32) -> Result<i32, AppError> {
    match movement_type {
        MovementType::Inward => {
            if quantity <= 0 {
                return Err(AppError::InvalidInput(
                    "Inward quantity must be positive.".into(),
                ));
            }
            Ok(quantity)
        }
        MovementType::Outward => {
            if quantity <= 0 {
                return Err(AppError::InvalidInput(
                    "Outward quantity must be positive.".into(),
                ));
            }
            Ok(-quantity)
        }
        MovementType::Adjustment => {
            if quantity == 0 {
                return Err(AppError::InvalidInput(
                    "Adjustment quantity cannot be zero.".into(),
                ));
            }
            Ok(quantity)
        }
    }
}

// Validates and prices out a movement without touching any state. Rejects
// with `InsufficientStock` whenever the resulting stock would go negative;
// the products table carries the matching CHECK constraint.
pub fn plan_movement(
    current_stock: i32,
    movement_type: MovementType,
    quantity: i32,
    reason: &str,
) -> Result<MovementPlan, AppError> {
    if reason.trim().is_empty() {
        return Err(AppError::InvalidInput("A reason is required.".into()));
    }

    let delta = signed_delta(movement_type, quantity)?;
    let new_stock = current_stock + delta;
    if new_stock < 0 {
        return Err(AppError::InsufficientStock {
            requested: -delta,
            available: current_stock,
        });
    }

    Ok(MovementPlan {
        quantity,
        previous_stock: current_stock,
        new_stock,
    })
}

// Low wins over high when a degenerate configuration makes both true.
// The 0.8 * max_stock boundary is kept in integers: current >= 0.8 * max
// iff 5 * current >= 4 * max. Widened to i64 so the multiplication cannot
// overflow near i32::MAX.
pub fn stock_status(current_stock: i32, min_stock: i32, max_stock: i32) -> StockStatus {
    if current_stock <= min_stock {
        StockStatus::Low
    } else if 5 * i64::from(current_stock) >= 4 * i64::from(max_stock) {
        StockStatus::High
    } else {
        StockStatus::Normal
    }
}

// critical iff current <= 0.5 * min (2 * current <= min in integers).
pub fn criticality_tier(current_stock: i32, min_stock: i32) -> CriticalityTier {
    if 2 * i64::from(current_stock) <= i64::from(min_stock) {
        CriticalityTier::Critical
    } else if current_stock <= min_stock {
        CriticalityTier::Warning
    } else {
        CriticalityTier::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn inward_adds() {
        let plan = plan_movement(5, MovementType::Inward, 50, "PO-1").unwrap();
        assert_eq!(plan.previous_stock, 5);
        assert_eq!(plan.new_stock, 55);
        assert_eq!(plan.quantity, 50);
    }

    #[test]
    fn outward_subtracts() {
        let plan = plan_movement(10, MovementType::Outward, 4, "order fulfillment").unwrap();
        assert_eq!(plan.previous_stock, 10);
        assert_eq!(plan.new_stock, 6);
    }

    #[test]
    fn outward_beyond_stock_is_rejected() {
        let err = plan_movement(5, MovementType::Outward, 8, "order fulfillment").unwrap_err();
        match err {
            AppError::InsufficientStock { requested, available } => {
                assert_eq!(requested, 8);
                assert_eq!(available, 5);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    #[test]
    fn outward_to_exactly_zero_is_allowed() {
        let plan = plan_movement(5, MovementType::Outward, 5, "clearance").unwrap();
        assert_eq!(plan.new_stock, 0);
    }

    #[test]
    fn signed_adjustment() {
        let plan = plan_movement(5, MovementType::Adjustment, -3, "damaged").unwrap();
        assert_eq!(plan.new_stock, 2);
        assert_eq!(plan.quantity, -3);

        let plan = plan_movement(5, MovementType::Adjustment, 7, "recount").unwrap();
        assert_eq!(plan.new_stock, 12);
    }

    #[test]
    fn adjustment_below_zero_is_rejected() {
        let err = plan_movement(2, MovementType::Adjustment, -3, "damaged").unwrap_err();
        assert!(matches!(err, AppError::InsufficientStock { .. }));
    }

    #[rstest]
    #[case(MovementType::Inward, 0)]
    #[case(MovementType::Inward, -5)]
    #[case(MovementType::Outward, 0)]
    #[case(MovementType::Outward, -5)]
    #[case(MovementType::Adjustment, 0)]
    fn invalid_quantities(#[case] movement_type: MovementType, #[case] quantity: i32) {
        assert!(matches!(
            signed_delta(movement_type, quantity),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn empty_reason_is_rejected() {
        assert!(matches!(
            plan_movement(10, MovementType::Inward, 5, "  "),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn bookkeeping_matches_signed_delta() {
        for (ty, qty) in [
            (MovementType::Inward, 7),
            (MovementType::Outward, 3),
            (MovementType::Adjustment, -2),
            (MovementType::Adjustment, 9),
        ] {
            let plan = plan_movement(20, ty, qty, "check").unwrap();
            let delta = signed_delta(ty, qty).unwrap();
            assert_eq!(plan.new_stock - plan.previous_stock, delta);
        }
    }

    #[rstest]
    // at min_stock is low (inclusive)
    #[case(10, 10, 100, StockStatus::Low)]
    #[case(5, 10, 100, StockStatus::Low)]
    // exactly 0.8 * max is high (inclusive)
    #[case(80, 10, 100, StockStatus::High)]
    #[case(95, 10, 100, StockStatus::High)]
    #[case(79, 10, 100, StockStatus::Normal)]
    #[case(55, 10, 100, StockStatus::Normal)]
    // degenerate config: low takes precedence
    #[case(85, 90, 100, StockStatus::Low)]
    // near i32::MAX the 5x/4x comparison must not wrap
    #[case(2_000_000_000, 10, 2_100_000_000, StockStatus::High)]
    #[case(1_000_000_000, 10, 2_100_000_000, StockStatus::Normal)]
    fn stock_status_boundaries(
        #[case] current: i32,
        #[case] min: i32,
        #[case] max: i32,
        #[case] expected: StockStatus,
    ) {
        assert_eq!(stock_status(current, min, max), expected);
    }

    #[rstest]
    // exactly half of min is critical (inclusive)
    #[case(5, 10, CriticalityTier::Critical)]
    #[case(0, 10, CriticalityTier::Critical)]
    #[case(6, 10, CriticalityTier::Warning)]
    #[case(10, 10, CriticalityTier::Warning)]
    #[case(11, 10, CriticalityTier::None)]
    // the 2x comparison must not wrap for huge stock levels
    #[case(2_000_000_000, 10, CriticalityTier::None)]
    fn criticality_boundaries(
        #[case] current: i32,
        #[case] min: i32,
        #[case] expected: CriticalityTier,
    ) {
        assert_eq!(criticality_tier(current, min), expected);
    }

    #[test]
    fn status_queries_are_pure() {
        assert_eq!(stock_status(42, 10, 100), stock_status(42, 10, 100));
        assert_eq!(criticality_tier(42, 10), criticality_tier(42, 10));
    }

    // Scenario from the stock screens: a low product replenished past its
    // minimum but below the 0.8 * max band reads normal again.
    #[test]
    fn replenishment_scenario() {
        assert_eq!(stock_status(5, 10, 100), StockStatus::Low);
        let plan = plan_movement(5, MovementType::Inward, 50, "PO-1").unwrap();
        assert_eq!(plan.new_stock, 55);
        assert_eq!(stock_status(plan.new_stock, 10, 100), StockStatus::Normal);
    }
}

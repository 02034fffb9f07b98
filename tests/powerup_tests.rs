use battleships9k::{
    apply_shield, area_scan, area_strike, resolve_shot, Coord, Deployment, EngineError, Fleet,
    Grid, Orientation, PowerUp, ShipKind, ShotResult,
};

/// Ships stacked in rows 0..5 starting at column 0.
fn row_fleet() -> (Grid, Fleet) {
    let mut deployment = Deployment::new();
    for row in 0..5 {
        deployment.place(Coord::new(0, row), Orientation::Horizontal).unwrap();
    }
    deployment.finish().unwrap()
}

#[test]
fn test_costs_and_charge() {
    assert_eq!(PowerUp::Shield.cost(), 50);
    assert_eq!(PowerUp::Scan.cost(), 75);
    assert_eq!(PowerUp::Strike.cost(), 120);
    assert_eq!(PowerUp::Scan.charge(80), Ok(5));
    assert_eq!(
        PowerUp::Scan.charge(74),
        Err(EngineError::InsufficientCp { cost: 75, balance: 74 })
    );
    assert_eq!(PowerUp::Strike.to_string(), "Trident Missile");
}

#[test]
fn test_shield_rules() -> Result<(), EngineError> {
    let (grid, fleet) = row_fleet();

    // balance is checked before the target
    assert_eq!(
        apply_shield(&grid, &fleet, Coord::new(20, 20), 49).unwrap_err(),
        EngineError::InsufficientCp { cost: 50, balance: 49 }
    );
    assert_eq!(
        apply_shield(&grid, &fleet, Coord::new(20, 20), 50).unwrap_err(),
        EngineError::OutOfBounds { x: 20, y: 20 }
    );
    assert_eq!(
        apply_shield(&grid, &fleet, Coord::new(9, 9), 50).unwrap_err(),
        EngineError::NoShipAtTarget
    );

    let shield = apply_shield(&grid, &fleet, Coord::new(2, 1), 60)?;
    assert_eq!(shield.kind, ShipKind::Battleship);
    assert_eq!(shield.balance, 10);
    assert!(shield.fleet.ship(ShipKind::Battleship).unwrap().is_shielded());
    assert!(!fleet.ship(ShipKind::Battleship).unwrap().is_shielded());
    assert_eq!(
        apply_shield(&grid, &shield.fleet, Coord::new(0, 1), 100).unwrap_err(),
        EngineError::AlreadyShielded(ShipKind::Battleship)
    );
    Ok(())
}

#[test]
fn test_shield_damaged_and_sunk_ships() -> Result<(), EngineError> {
    let (grid, fleet) = row_fleet();
    let first = resolve_shot(&grid, &fleet, Coord::new(0, 4))?;
    // a hit cell of a damaged ship still selects the ship
    let shield = apply_shield(&first.grid, &first.fleet, Coord::new(0, 4), 50)?;
    assert_eq!(shield.kind, ShipKind::PatrolBoat);

    let second = resolve_shot(&first.grid, &first.fleet, Coord::new(1, 4))?;
    assert_eq!(second.result, ShotResult::Sunk(ShipKind::PatrolBoat));
    assert_eq!(
        apply_shield(&second.grid, &second.fleet, Coord::new(1, 4), 50).unwrap_err(),
        EngineError::ShipSunk(ShipKind::PatrolBoat)
    );
    Ok(())
}

#[test]
fn test_area_scan() -> Result<(), EngineError> {
    let (grid, _) = row_fleet();
    assert_eq!(
        area_scan(&grid, Coord::new(0, 0), 10).unwrap_err(),
        EngineError::InsufficientCp { cost: 75, balance: 10 }
    );

    let corner = area_scan(&grid, Coord::new(0, 0), 100)?;
    assert_eq!(corner.cells.len(), 4);
    assert_eq!(corner.contacts(), 4);
    assert_eq!(corner.balance, 25);
    assert_eq!(corner.display_ms, 3_000);

    let open_water = area_scan(&grid, Coord::new(8, 8), 75)?;
    assert_eq!(open_water.cells.len(), 9);
    assert_eq!(open_water.contacts(), 0);
    assert!(open_water.cells.iter().all(|c| !c.resolved));
    Ok(())
}

#[test]
fn test_area_strike_aggregates() -> Result<(), EngineError> {
    let (grid, fleet) = row_fleet();
    assert_eq!(
        area_strike(&grid, &fleet, Coord::new(1, 1), 119).unwrap_err(),
        EngineError::InsufficientCp { cost: 120, balance: 119 }
    );

    let outcome = area_strike(&grid, &fleet, Coord::new(1, 1), 130)?;
    assert_eq!(outcome.shots.len(), 9);
    assert!(outcome.shots.iter().all(|(_, r)| r.is_hit()));
    // the destroyer in row 2 is exactly covered by the block
    assert_eq!(outcome.shots.last(), Some(&(Coord::new(2, 2), ShotResult::Sunk(ShipKind::Destroyer))));
    assert_eq!(outcome.cp_awarded, 9 * 5 + 20);
    assert_eq!(outcome.balance, 10 + 65);
    assert!(outcome.continue_turn);
    assert!(!outcome.fleet_destroyed);
    assert_eq!(outcome.grid.hit_count(), 9);
    Ok(())
}

#[test]
fn test_area_strike_skips_resolved_cells() -> Result<(), EngineError> {
    let (grid, fleet) = row_fleet();
    let earlier = resolve_shot(&grid, &fleet, Coord::new(8, 8))?;
    let outcome = area_strike(&earlier.grid, &earlier.fleet, Coord::new(8, 8), 120)?;
    assert_eq!(outcome.shots.len(), 8);
    assert!(outcome.shots.iter().all(|(at, r)| *at != Coord::new(8, 8) && *r == ShotResult::Miss));
    assert!(!outcome.continue_turn);
    assert_eq!(outcome.balance, 0);
    Ok(())
}

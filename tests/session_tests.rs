use battleships9k::{
    Action, Commander, Coord, Deployment, Difficulty, EngineError, Fleet, Grid, LogKind, Mode,
    Orientation, Session, ShipKind, ShotResult, Side, COMPUTER_NAME,
};
use rand::{rngs::SmallRng, SeedableRng};

fn row_fleet() -> (Grid, Fleet) {
    let mut deployment = Deployment::new();
    for row in 0..5 {
        deployment.place(Coord::new(0, row), Orientation::Horizontal).unwrap();
    }
    deployment.finish().unwrap()
}

fn duel() -> Session {
    let (g1, f1) = row_fleet();
    let (g2, f2) = row_fleet();
    Session::new(Mode::Duel, Commander::new("Ada", g1, f1), Commander::new("Grace", g2, f2)).unwrap()
}

/// Every ship cell of the row fleet.
fn ship_cells() -> Vec<Coord> {
    let (_, fleet) = row_fleet();
    fleet.ships().iter().flat_map(|s| s.cells().collect::<Vec<_>>()).collect()
}

fn sink_carrier(session: &mut Session) {
    for x in 0..5 {
        session.strike(Coord::new(x, 0)).unwrap();
    }
}

#[test]
fn test_new_session() {
    let session = duel();
    assert_eq!(session.turn(), Side::Player);
    assert_eq!(session.winner(), None);
    assert!(!session.is_computer(Side::Opponent));
    let messages: Vec<_> = session.log().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["INITIALIZING DUAL OPS PROTOCOL...", "ALL VESSELS DEPLOYED. READY FOR ENGAGEMENT."]
    );
    assert_eq!(session.last_event(), Some("ALL VESSELS DEPLOYED. READY FOR ENGAGEMENT."));
}

#[test]
fn test_incomplete_fleet_rejected() {
    let mut deployment = Deployment::new();
    deployment.place(Coord::new(0, 0), Orientation::Horizontal).unwrap();
    let partial = Commander::new("Ada", *deployment.grid(), deployment.fleet().clone());
    let (g, f) = row_fleet();
    assert_eq!(
        Session::new(Mode::Duel, partial, Commander::new("Grace", g, f)).unwrap_err(),
        EngineError::IncompleteFleet { placed: 1 }
    );
}

#[test]
fn test_miss_passes_turn() -> Result<(), EngineError> {
    let mut session = duel();
    let report = session.strike(Coord::new(9, 9))?;
    assert_eq!(report.action, Action::Strike { at: Coord::new(9, 9), result: ShotResult::Miss });
    assert!(!report.continue_turn);
    assert_eq!(report.next_turn, Side::Opponent);
    assert_eq!(session.turn(), Side::Opponent);
    assert_eq!(session.last_event(), Some("Ada strikes J-10... MISS. Strike failed."));
    assert_eq!(session.log().last().map(|e| e.kind), Some(LogKind::Player));
    Ok(())
}

#[test]
fn test_hit_keeps_turn_and_awards_cp() -> Result<(), EngineError> {
    let mut session = duel();
    let report = session.strike(Coord::new(0, 0))?;
    assert!(report.continue_turn);
    assert_eq!(report.cp_awarded, 5);
    assert_eq!(session.turn(), Side::Player);
    assert_eq!(session.commander(Side::Player).cp(), 5);
    assert_eq!(session.last_event(), Some("Ada strikes A-1... DIRECT HIT!"));

    for x in 1..5 {
        session.strike(Coord::new(x, 0))?;
    }
    assert_eq!(session.commander(Side::Player).cp(), 5 * 5 + 40);
    assert_eq!(session.commander(Side::Opponent).ships_afloat(), 4);
    let last = session.log().last().unwrap();
    assert_eq!(last.kind, LogKind::Success);
    assert_eq!(last.message, "Ada strikes E-1... CONFIRMED! CARRIER neutralised.");
    assert_eq!(session.accuracy(Side::Player), 100);
    Ok(())
}

#[test]
fn test_rejected_strike_changes_nothing() {
    let mut session = duel();
    session.strike(Coord::new(0, 0)).unwrap();
    let before = session.clone();
    assert_eq!(
        session.strike(Coord::new(0, 0)).unwrap_err(),
        EngineError::AlreadyResolved { x: 0, y: 0 }
    );
    assert_eq!(
        session.strike(Coord::new(0, 10)).unwrap_err(),
        EngineError::OutOfBounds { x: 0, y: 10 }
    );
    assert_eq!(session, before);
}

#[test]
fn test_win_takes_precedence_and_freezes() -> Result<(), EngineError> {
    let mut session = duel();
    let cells = ship_cells();
    let (last, rest) = cells.split_last().unwrap();
    for &at in rest {
        let report = session.strike(at)?;
        assert!(report.continue_turn);
    }
    let report = session.strike(*last)?;
    assert_eq!(report.winner, Some(Side::Player));
    assert!(!report.continue_turn);
    assert_eq!(report.next_turn, Side::Player);
    assert!(session.is_over());
    assert!(session.commander(Side::Opponent).fleet().all_sunk());
    assert_eq!(session.last_event(), Some("GRACE FLEET NEUTRALIZED. ADA WINS."));

    assert_eq!(session.strike(Coord::new(9, 9)).unwrap_err(), EngineError::GameOver);
    assert_eq!(session.deploy_shield(Coord::new(0, 0)).unwrap_err(), EngineError::GameOver);
    assert_eq!(session.sonar_scan(Coord::new(5, 5)).unwrap_err(), EngineError::GameOver);
    assert_eq!(session.area_strike(Coord::new(5, 5)).unwrap_err(), EngineError::GameOver);
    Ok(())
}

#[test]
fn test_shield_uses_turn_and_absorbs() -> Result<(), EngineError> {
    let mut session = duel();
    sink_carrier(&mut session);
    assert_eq!(session.commander(Side::Player).cp(), 65);

    let report = session.deploy_shield(Coord::new(2, 1))?;
    assert_eq!(report.action, Action::Shield { kind: ShipKind::Battleship });
    assert_eq!(session.turn(), Side::Opponent);
    assert_eq!(session.commander(Side::Player).cp(), 15);
    assert_eq!(session.last_event(), Some("Ada deploys AEGIS SHIELD on BATTLESHIP."));

    let report = session.strike(Coord::new(0, 1))?;
    assert_eq!(
        report.action,
        Action::Strike { at: Coord::new(0, 1), result: ShotResult::Absorbed(ShipKind::Battleship) }
    );
    assert_eq!(report.next_turn, Side::Player);
    let battleship = session.commander(Side::Player).fleet().ship(ShipKind::Battleship).unwrap();
    assert_eq!(battleship.hits(), 0);
    assert!(!battleship.is_shielded());
    // absorbed strikes stay out of the stats
    assert_eq!(session.commander(Side::Player).grid().shots_fired(), 0);
    assert_eq!(session.accuracy(Side::Opponent), 0);
    Ok(())
}

#[test]
fn test_sonar_scan_keeps_turn() -> Result<(), EngineError> {
    let mut session = duel();
    assert_eq!(
        session.sonar_scan(Coord::new(5, 5)).unwrap_err(),
        EngineError::InsufficientCp { cost: 75, balance: 0 }
    );
    sink_carrier(&mut session);
    session.strike(Coord::new(0, 1))?;
    session.strike(Coord::new(1, 1))?;
    assert_eq!(session.commander(Side::Player).cp(), 75);

    let report = session.sonar_scan(Coord::new(1, 3))?;
    assert_eq!(report.contacts(), 8);
    assert_eq!(session.turn(), Side::Player);
    assert_eq!(session.commander(Side::Player).cp(), 0);
    Ok(())
}

#[test]
fn test_area_strike_through_session() -> Result<(), EngineError> {
    let mut session = duel();
    let before = session.clone();
    assert_eq!(
        session.area_strike(Coord::new(1, 1)).unwrap_err(),
        EngineError::InsufficientCp { cost: 120, balance: 0 }
    );
    assert_eq!(session, before);

    // carrier (65) + battleship (50) + one destroyer hit (5) = 120
    sink_carrier(&mut session);
    for x in 0..4 {
        session.strike(Coord::new(x, 1))?;
    }
    session.strike(Coord::new(0, 2))?;
    assert_eq!(session.commander(Side::Player).cp(), 120);

    // submarine and patrol boat stay partly afloat
    let report = session.area_strike(Coord::new(2, 3))?;
    match &report.action {
        Action::AreaStrike { shots, .. } => {
            assert_eq!(shots.len(), 9);
            assert!(shots.contains(&(Coord::new(2, 2), ShotResult::Sunk(ShipKind::Destroyer))));
        }
        other => panic!("unexpected action {:?}", other),
    }
    assert!(report.continue_turn);
    assert_eq!(report.winner, None);
    assert_eq!(session.turn(), Side::Player);
    assert_eq!(session.commander(Side::Opponent).ships_afloat(), 2);
    Ok(())
}

#[test]
fn test_area_strike_can_win() -> Result<(), EngineError> {
    let mut session = duel();
    sink_carrier(&mut session);
    for x in 0..4 {
        session.strike(Coord::new(x, 1))?;
    }
    session.strike(Coord::new(0, 2))?;

    // the block covers every remaining ship cell
    let report = session.area_strike(Coord::new(1, 3))?;
    match &report.action {
        Action::AreaStrike { shots, .. } => assert_eq!(shots.len(), 8),
        other => panic!("unexpected action {:?}", other),
    }
    assert_eq!(report.winner, Some(Side::Player));
    assert!(!report.continue_turn);
    assert!(session.is_over());
    Ok(())
}

#[test]
fn test_fleet_must_match_grid() {
    let (grid, fleet) = row_fleet();
    let copy = Fleet::from_ships(fleet.ships().to_vec()).unwrap();
    assert_eq!(
        Session::new(
            Mode::Duel,
            Commander::new("Ada", Grid::new(), copy),
            Commander::new("Grace", grid, fleet.clone()),
        )
        .unwrap_err(),
        EngineError::FleetGridMismatch { x: 0, y: 0 }
    );

    // a grid carrying an extra ship the fleet does not know about
    let (bigger, _) = battleships9k::place_ship(&grid, ShipKind::Carrier, Coord::new(0, 9), Orientation::Horizontal).unwrap();
    assert_eq!(
        Session::new(
            Mode::Duel,
            Commander::new("Ada", bigger, fleet.clone()),
            Commander::new("Grace", grid, fleet),
        )
        .unwrap_err(),
        EngineError::FleetGridMismatch { x: 0, y: 9 }
    );
}

#[test]
fn test_stacked_fleet_rejected() {
    let stacked: Vec<_> = battleships9k::SHIP_ORDER
        .iter()
        .map(|&kind| battleships9k::PlacedShip::new(kind, Coord::new(0, 0), Orientation::Horizontal))
        .collect();
    assert_eq!(Fleet::from_ships(stacked).unwrap_err(), EngineError::ShipOverlaps);
}

#[test]
fn test_computer_turn_rules() -> Result<(), EngineError> {
    let mut session = duel();
    let mut rng = SmallRng::seed_from_u64(4);
    assert_eq!(session.computer_turn(&mut rng).unwrap_err(), EngineError::NotComputerTurn);

    let (grid, fleet) = row_fleet();
    let mut solo = Session::solo(Difficulty::Hard, "Ada", grid, fleet, &mut rng)?;
    assert_eq!(solo.commander(Side::Opponent).name(), COMPUTER_NAME);
    assert!(solo.is_computer(Side::Opponent));
    assert_eq!(solo.computer_turn(&mut rng).unwrap_err(), EngineError::NotComputerTurn);

    // find open water on the computer's board
    let miss = Grid::coords()
        .find(|&at| solo.defender().grid().cell(at).and_then(|c| c.occupant).is_none())
        .unwrap();
    solo.strike(miss)?;
    assert_eq!(solo.turn(), Side::Opponent);
    let report = solo.computer_turn(&mut rng)?;
    assert_eq!(report.side, Side::Opponent);
    assert!(solo.last_event().unwrap().starts_with("Enemy fires at "));
    Ok(())
}

#[test]
fn test_full_duel_autopilot() {
    let mut rng = SmallRng::seed_from_u64(2024);
    let (g1, f1) = battleships9k::generate_fleet(&mut rng);
    let (g2, f2) = battleships9k::generate_fleet(&mut rng);
    let mut session =
        Session::new(Mode::Duel, Commander::new("A", g1, f1), Commander::new("B", g2, f2)).unwrap();
    let mut actions = 0;
    while !session.is_over() {
        session.autopilot_turn(Difficulty::Medium, &mut rng).unwrap();
        actions += 1;
        assert!(actions <= 200);
    }
    let winner = session.winner().unwrap();
    assert!(session.commander(winner.other()).fleet().all_sunk());
    assert!(!session.commander(winner).fleet().all_sunk());
    let seqs: Vec<_> = session.log().iter().map(|e| e.seq).collect();
    assert!(seqs.windows(2).all(|w| w[1] == w[0] + 1));
}

#[test]
fn test_full_solo_game() {
    let mut rng = SmallRng::seed_from_u64(77);
    let (grid, fleet) = battleships9k::generate_fleet(&mut rng);
    let mut session = Session::solo(Difficulty::Easy, "Ada", grid, fleet, &mut rng).unwrap();
    let mut actions = 0;
    while !session.is_over() {
        if session.is_computer(session.turn()) {
            session.computer_turn(&mut rng).unwrap();
        } else {
            session.autopilot_turn(Difficulty::Hard, &mut rng).unwrap();
        }
        actions += 1;
        assert!(actions <= 200);
    }
    assert!(session.winner().is_some());
    assert_eq!(session.recent(1).next().map(|e| e.kind), Some(LogKind::Success));
}

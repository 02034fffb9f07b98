use crate::ship::ShipKind;

pub const GRID_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;

/// Catalog order: fleets are generated and deployed in this sequence.
pub const SHIP_ORDER: [ShipKind; NUM_SHIPS] = [
    ShipKind::Carrier,
    ShipKind::Battleship,
    ShipKind::Destroyer,
    ShipKind::Submarine,
    ShipKind::PatrolBoat,
];

/// Total number of ship segments in a complete fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Command points credited for every damaging hit.
pub const HIT_REWARD: u32 = 5;

/// Extra command points for sinking a ship, smallest to largest.
pub const SINK_BONUS_PATROL_BOAT: u32 = 15;
pub const SINK_BONUS_SUBMARINE: u32 = 20;
pub const SINK_BONUS_DESTROYER: u32 = 20;
pub const SINK_BONUS_BATTLESHIP: u32 = 30;
pub const SINK_BONUS_CARRIER: u32 = 40;

pub const SHIELD_COST: u32 = 50;
pub const SCAN_COST: u32 = 75;
pub const STRIKE_COST: u32 = 120;

/// How long a presentation layer should keep a sonar reveal on screen.
pub const SCAN_DISPLAY_MS: u64 = 3_000;

/// Random parity samples tried before the search phase goes uniform.
pub const HARD_PARITY_ATTEMPTS: usize = 200;
pub const MEDIUM_PARITY_ATTEMPTS: usize = 50;

/// Default callsign for the computer side in solo matches.
pub const COMPUTER_NAME: &str = "AI OVERLORD";

/// Convert a ship name string to its catalog entry. Matching ignores ASCII
/// case so that CLI input like `patrol boat` resolves.
pub fn ship_kind_named(name: &str) -> Option<ShipKind> {
    SHIP_ORDER
        .iter()
        .copied()
        .find(|kind| kind.name().eq_ignore_ascii_case(name))
}

//! Deterministic in-process engine stand-in.
//!
//! A tiny board with one army per power and a hand-rolled adjacency
//! table. It honors the [`Adjudicator`] contract (opaque phase tokens,
//! legal-order maps keyed by location, one `process()` per phase) but
//! makes no claim to real adjudication: moves succeed unless the
//! destination is occupied or contested, everything else holds. The
//! binary and the tests run against this until a real adjudicator is
//! wired in.

use std::collections::BTreeMap;

use crate::domain::Power;

use super::{Adjudicator, EngineError, EngineFactory, PublicState};

const START_YEAR: u32 = 1901;

/// Starting unit per power. One army each keeps resolution trivial
/// while still giving every power a non-empty legal-order set.
const STARTING_UNITS: [(Power, &str); 7] = [
    (Power::Austria, "A VIE"),
    (Power::England, "A LON"),
    (Power::France, "A PAR"),
    (Power::Germany, "A BER"),
    (Power::Italy, "A ROM"),
    (Power::Russia, "A MOS"),
    (Power::Turkey, "A CON"),
];

const HOME_CENTERS: [(Power, &str); 7] = [
    (Power::Austria, "VIE"),
    (Power::England, "LON"),
    (Power::France, "PAR"),
    (Power::Germany, "BER"),
    (Power::Italy, "ROM"),
    (Power::Russia, "MOS"),
    (Power::Turkey, "CON"),
];

fn neighbors(loc: &str) -> &'static [&'static str] {
    match loc {
        "PAR" => &["BUR", "PIC"],
        "BUR" => &["PAR", "PIC", "MUN"],
        "PIC" => &["PAR", "BUR"],
        "LON" => &["WAL", "YOR"],
        "WAL" => &["LON", "YOR"],
        "YOR" => &["LON", "WAL"],
        "BER" => &["KIE", "MUN"],
        "KIE" => &["BER", "MUN"],
        "MUN" => &["BER", "KIE", "BUR", "TYR", "BOH"],
        "VIE" => &["TYR", "BOH"],
        "TYR" => &["VIE", "MUN", "BOH", "VEN"],
        "BOH" => &["VIE", "MUN", "TYR"],
        "ROM" => &["TUS", "VEN"],
        "TUS" => &["ROM", "VEN"],
        "VEN" => &["ROM", "TUS", "TYR"],
        "MOS" => &["STP", "UKR", "WAR"],
        "STP" => &["MOS"],
        "UKR" => &["MOS", "WAR"],
        "WAR" => &["MOS", "UKR"],
        "CON" => &["BUL", "ANK", "SMY"],
        "BUL" => &["CON"],
        "ANK" => &["CON", "SMY"],
        "SMY" => &["CON", "ANK"],
        _ => &[],
    }
}

fn location_of(unit: &str) -> &str {
    unit.rsplit(' ').next().unwrap_or(unit)
}

pub struct ScriptedEngine {
    #[allow(dead_code)]
    rules: Vec<String>,
    units: BTreeMap<Power, Vec<String>>,
    staged: BTreeMap<Power, Vec<String>>,
    /// Number of phases processed so far.
    turn: u32,
    /// Phases to process before `is_done()` reports completion.
    turn_limit: u32,
}

impl ScriptedEngine {
    pub const DEFAULT_TURN_LIMIT: u32 = 10;

    pub fn new(rules: Vec<String>) -> Self {
        Self::with_turn_limit(rules, Self::DEFAULT_TURN_LIMIT)
    }

    pub fn with_turn_limit(rules: Vec<String>, turn_limit: u32) -> Self {
        let units = STARTING_UNITS
            .iter()
            .map(|(power, unit)| (*power, vec![unit.to_string()]))
            .collect();
        Self {
            rules,
            units,
            staged: BTreeMap::new(),
            turn: 0,
            turn_limit,
        }
    }

    fn owner_at(&self, loc: &str) -> Option<Power> {
        for (power, units) in &self.units {
            if units.iter().any(|u| location_of(u) == loc) {
                return Some(*power);
            }
        }
        None
    }

    /// Parse "A PAR - BUR" into (unit, destination). Anything else is a hold.
    fn parse_move(order: &str) -> Option<(String, String)> {
        let (unit, dst) = order.split_once(" - ")?;
        Some((unit.trim().to_string(), dst.trim().to_string()))
    }
}

impl Adjudicator for ScriptedEngine {
    fn current_phase(&self) -> String {
        let season = if self.turn % 2 == 0 { 'S' } else { 'F' };
        let year = START_YEAR + self.turn / 2;
        format!("{season}{year}M")
    }

    fn units_of(&self, power: Power) -> Vec<String> {
        self.units.get(&power).cloned().unwrap_or_default()
    }

    fn legal_orders(&self) -> BTreeMap<String, Vec<String>> {
        let mut map = BTreeMap::new();
        for units in self.units.values() {
            for unit in units {
                let loc = location_of(unit);
                let mut orders = vec![format!("{unit} H")];
                for n in neighbors(loc) {
                    orders.push(format!("{unit} - {n}"));
                }
                map.insert(loc.to_string(), orders);
            }
        }
        map
    }

    fn set_orders(&mut self, power: Power, orders: &[String]) -> Result<(), EngineError> {
        // Permissive staging (IGNORE_ERRORS): illegal strings are kept
        // and later treated as holds.
        self.staged.insert(power, orders.to_vec());
        Ok(())
    }

    fn process(&mut self) -> Result<(), EngineError> {
        if self.is_done() {
            return Err(EngineError::Adjudication(
                "process() called on a finished game".into(),
            ));
        }

        // Collect movement attempts: (power, unit, destination).
        let mut moves: Vec<(Power, String, String)> = Vec::new();
        for (power, orders) in &self.staged {
            for order in orders {
                if let Some((unit, dst)) = Self::parse_move(order) {
                    let owns = self
                        .units
                        .get(power)
                        .is_some_and(|us| us.contains(&unit));
                    let reachable = neighbors(location_of(&unit)).contains(&dst.as_str());
                    if owns && reachable {
                        moves.push((*power, unit, dst));
                    }
                }
            }
        }

        // A move succeeds only into an empty, uncontested destination;
        // contested or blocked moves become holds. Crude, but stable.
        for (power, unit, dst) in &moves {
            let contested = moves
                .iter()
                .filter(|(_, u, d)| d == dst && u != unit)
                .count()
                > 0;
            if contested || self.owner_at(dst).is_some() {
                continue;
            }
            let unit_type = unit.split(' ').next().unwrap_or("A").to_string();
            if let Some(units) = self.units.get_mut(power) {
                if let Some(slot) = units.iter_mut().find(|u| *u == unit) {
                    *slot = format!("{unit_type} {dst}");
                }
            }
        }

        self.staged.clear();
        self.turn += 1;
        Ok(())
    }

    fn is_done(&self) -> bool {
        self.turn >= self.turn_limit
    }

    fn public_state(&self) -> PublicState {
        let units: BTreeMap<String, Vec<String>> = self
            .units
            .iter()
            .map(|(power, units)| (power.to_string(), units.clone()))
            .collect();
        let centers: BTreeMap<String, Vec<String>> = HOME_CENTERS
            .iter()
            .map(|(power, center)| (power.to_string(), vec![center.to_string()]))
            .collect();
        let controlled_powers = self
            .units
            .iter()
            .filter(|(_, units)| !units.is_empty())
            .map(|(power, _)| power.to_string())
            .collect();
        PublicState {
            phase: self.current_phase(),
            units,
            centers,
            controlled_powers,
        }
    }
}

/// Factory for [`ScriptedEngine`] instances.
#[derive(Debug, Clone)]
pub struct ScriptedFactory {
    pub turn_limit: u32,
}

impl ScriptedFactory {
    pub fn new(turn_limit: u32) -> Self {
        Self { turn_limit }
    }
}

impl Default for ScriptedFactory {
    fn default() -> Self {
        Self::new(ScriptedEngine::DEFAULT_TURN_LIMIT)
    }
}

impl EngineFactory for ScriptedFactory {
    fn create(
        &self,
        _session_id: &str,
        rules: &[String],
    ) -> Result<Box<dyn Adjudicator>, EngineError> {
        Ok(Box::new(ScriptedEngine::with_turn_limit(
            rules.to_vec(),
            self.turn_limit,
        )))
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::Power;
    use crate::engine::{default_rules, Adjudicator};

    use super::ScriptedEngine;

    fn engine() -> ScriptedEngine {
        ScriptedEngine::with_turn_limit(default_rules(), 2)
    }

    #[test]
    fn phase_tokens_alternate_seasons() {
        let mut e = engine();
        assert_eq!(e.current_phase(), "S1901M");
        e.process().unwrap();
        assert_eq!(e.current_phase(), "F1901M");
    }

    #[test]
    fn every_power_starts_with_a_unit_and_legal_orders() {
        let e = engine();
        let legal = e.legal_orders();
        for power in Power::ALL {
            let units = e.units_of(power);
            assert_eq!(units.len(), 1);
            let loc: &str = units[0].rsplit(' ').next().unwrap();
            let orders = legal.get(loc).unwrap();
            assert!(orders.contains(&format!("{} H", units[0])));
            assert!(orders.len() > 1, "expected at least one move for {power}");
        }
    }

    #[test]
    fn uncontested_move_relocates_the_unit() {
        let mut e = engine();
        e.set_orders(Power::France, &["A PAR - BUR".to_string()])
            .unwrap();
        e.process().unwrap();
        assert_eq!(e.units_of(Power::France), vec!["A BUR".to_string()]);
    }

    #[test]
    fn move_into_an_occupied_province_becomes_a_hold() {
        let mut e = ScriptedEngine::with_turn_limit(default_rules(), 4);
        // Walk Austria to TYR first, then Germany through MUN into TYR.
        e.set_orders(Power::Austria, &["A VIE - TYR".to_string()])
            .unwrap();
        e.process().unwrap();
        assert_eq!(e.units_of(Power::Austria), vec!["A TYR".to_string()]);

        e.set_orders(Power::Germany, &["A BER - MUN".to_string()])
            .unwrap();
        e.process().unwrap();

        e.set_orders(Power::Germany, &["A MUN - TYR".to_string()])
            .unwrap();
        e.process().unwrap();
        assert_eq!(e.units_of(Power::Germany), vec!["A MUN".to_string()]);
    }

    #[test]
    fn contested_destination_bounces_both_movers() {
        let mut e = ScriptedEngine::with_turn_limit(default_rules(), 4);
        e.set_orders(Power::Germany, &["A BER - MUN".to_string()])
            .unwrap();
        e.process().unwrap();

        // MUN and VIE are both adjacent to TYR.
        e.set_orders(Power::Germany, &["A MUN - TYR".to_string()])
            .unwrap();
        e.set_orders(Power::Austria, &["A VIE - TYR".to_string()])
            .unwrap();
        e.process().unwrap();
        assert_eq!(e.units_of(Power::Germany), vec!["A MUN".to_string()]);
        assert_eq!(e.units_of(Power::Austria), vec!["A VIE".to_string()]);
    }

    #[test]
    fn done_after_turn_limit_and_process_refuses_afterwards() {
        let mut e = engine();
        assert!(!e.is_done());
        e.process().unwrap();
        e.process().unwrap();
        assert!(e.is_done());
        assert!(e.process().is_err());
    }

    #[test]
    fn public_state_lists_all_controlled_powers() {
        let e = engine();
        let state = e.public_state();
        assert_eq!(state.phase, "S1901M");
        assert_eq!(state.controlled_powers.len(), 7);
        assert_eq!(state.units["FRANCE"], vec!["A PAR".to_string()]);
        assert_eq!(state.centers["FRANCE"], vec!["PAR".to_string()]);
    }
}

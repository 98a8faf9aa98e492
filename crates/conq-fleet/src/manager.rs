use std::collections::BTreeMap;

use conq_core::{AiError, AiResult, IdAllocator, TickContext, UnitId, Vec2};
use conq_tools::{TraceEvent, TraceLog, TraceSink, Tracer};
use tracing::{debug, error, info};

use crate::config::FleetConfig;
use crate::movement::{Locomotion, SharedNavigator};
use crate::strategy::{GroupStrategy, RandomTargets, UnitSnapshot};
use crate::unit::{UnitAi, UnitState};

/// Owns every unit controller and drives them in lockstep.
///
/// Ids are allocated from 1 upward and never reused, even after [`AiManager::remove_unit`].
/// Units are always visited in ascending id order, so a run is reproducible from its config
/// and call sequence.
pub struct AiManager {
    config: FleetConfig,
    locomotion: Locomotion,
    ids: IdAllocator,
    units: BTreeMap<UnitId, UnitAi>,
    strategy: Box<dyn GroupStrategy>,
    ctx: TickContext,
    tracer: Tracer,
}

impl Default for AiManager {
    fn default() -> Self {
        let config = FleetConfig::default();
        let locomotion = Locomotion::default();
        Self::from_parts(config, locomotion)
    }
}

impl AiManager {
    /// Validates `config` and builds its movement strategy.
    ///
    /// Path-following movement needs a navigator; use [`AiManager::with_navigator`] for it.
    pub fn new(config: FleetConfig) -> AiResult<Self> {
        config.validate()?;
        let locomotion = Locomotion::from_config(&config, None)?;
        Ok(Self::from_parts(config, locomotion))
    }

    pub fn with_navigator(config: FleetConfig, navigator: SharedNavigator) -> AiResult<Self> {
        config.validate()?;
        let locomotion = Locomotion::from_config(&config, Some(navigator))?;
        Ok(Self::from_parts(config, locomotion))
    }

    /// Uses `locomotion` as given; the movement fields of `config` are not consulted.
    pub fn with_locomotion(config: FleetConfig, locomotion: Locomotion) -> AiResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, locomotion))
    }

    fn from_parts(config: FleetConfig, locomotion: Locomotion) -> Self {
        let strategy = RandomTargets::new(config.bounds, config.seed);
        Self {
            ctx: TickContext::new(0, config.seed),
            config,
            locomotion,
            ids: IdAllocator::new(),
            units: BTreeMap::new(),
            strategy: Box::new(strategy),
            tracer: Tracer::new(),
        }
    }

    /// Record trace events into an in-memory [`TraceLog`].
    pub fn with_trace_log(mut self) -> Self {
        self.tracer.enable_log();
        self
    }

    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.tracer.set_sink(sink);
    }

    pub fn trace_log(&self) -> Option<&TraceLog> {
        self.tracer.log()
    }

    pub fn with_strategy(mut self, strategy: impl GroupStrategy) -> Self {
        self.set_strategy(Box::new(strategy));
        self
    }

    pub fn set_strategy(&mut self, strategy: Box<dyn GroupStrategy>) {
        debug!(strategy = strategy.name(), "group strategy replaced");
        self.strategy = strategy;
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    /// Completed updates so far.
    pub fn tick(&self) -> u64 {
        self.ctx.tick
    }

    pub fn register_unit(&mut self, position: impl Into<Vec2>) -> UnitId {
        let position = position.into();
        let id = self.ids.allocate();
        self.units
            .insert(id, UnitAi::new(id, position, self.locomotion.clone()));
        debug!(unit = %id, x = position.x, y = position.y, "unit registered");
        self.tracer
            .emit(TraceEvent::for_unit(self.ctx.tick, "fleet.register", id));
        id
    }

    /// Drops a unit. Its id is not handed out again.
    pub fn remove_unit(&mut self, id: UnitId) -> Option<UnitAi> {
        let removed = self.units.remove(&id);
        if removed.is_some() {
            debug!(unit = %id, "unit removed");
            self.tracer
                .emit(TraceEvent::for_unit(self.ctx.tick, "fleet.remove", id));
        }
        removed
    }

    /// Points a unit at `target`, replacing any target it had.
    ///
    /// An unknown id is reported and leaves every unit untouched.
    pub fn assign_target_to_unit(&mut self, id: UnitId, target: impl Into<Vec2>) -> AiResult<()> {
        let target = target.into();
        let Some(unit) = self.units.get_mut(&id) else {
            error!(unit = %id, "cannot assign target to unknown unit");
            self.tracer
                .emit(TraceEvent::for_unit(self.ctx.tick, "fleet.unknown_unit", id));
            return Err(AiError::UnknownUnit(id));
        };
        unit.set_target(target);
        debug!(unit = %id, x = target.x, y = target.y, "target assigned");
        self.tracer
            .emit(TraceEvent::for_unit(self.ctx.tick, "fleet.target", id));
        Ok(())
    }

    /// Updates every unit once, in ascending id order, then advances the tick counter.
    pub fn update(&mut self) {
        let tick = self.ctx.tick;
        let mut arrived = 0u64;
        for (id, unit) in self.units.iter_mut() {
            let before = unit.target();
            unit.update();
            if let Some(target) = before {
                if unit.target().is_none() && unit.position() == target {
                    arrived += 1;
                    self.tracer
                        .emit(TraceEvent::for_unit(tick, "unit.arrived", *id));
                }
            }
        }
        self.tracer.emit(
            TraceEvent::new(tick, "fleet.tick")
                .with_a(self.units.len() as u64)
                .with_b(arrived),
        );
        self.ctx = self.ctx.next();
    }

    /// Asks the group strategy for targets and assigns them.
    ///
    /// Does not update any unit.
    pub fn plan_group_strategy(&mut self) {
        let snapshots = self.snapshots();
        let targets = self.strategy.choose_targets(&self.ctx, &snapshots);
        info!(
            strategy = self.strategy.name(),
            units = snapshots.len(),
            assigned = targets.len(),
            "group strategy planned"
        );
        self.tracer.emit(
            TraceEvent::new(self.ctx.tick, "fleet.strategy").with_a(targets.len() as u64),
        );
        // Unknown ids are already reported by `assign_target_to_unit`.
        for (id, target) in targets {
            let _ = self.assign_target_to_unit(id, target);
        }
    }

    /// Resets node-local memory in every unit's tree. Unit state is kept.
    pub fn reset_all(&mut self) {
        for unit in self.units.values_mut() {
            unit.reset_tree();
        }
        debug!(units = self.units.len(), "all trees reset");
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitAi> {
        self.units.get(&id)
    }

    /// Units in ascending id order.
    pub fn units(&self) -> impl Iterator<Item = &UnitAi> + '_ {
        self.units.values()
    }

    pub fn unit_ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.units.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn state_of(&self, id: UnitId) -> Option<UnitState> {
        self.units.get(&id).map(UnitAi::state)
    }

    pub fn position_of(&self, id: UnitId) -> Option<Vec2> {
        self.units.get(&id).map(UnitAi::position)
    }

    pub fn snapshots(&self) -> Vec<UnitSnapshot> {
        self.units.values().map(UnitSnapshot::from).collect()
    }
}

impl core::fmt::Debug for AiManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AiManager")
            .field("tick", &self.ctx.tick)
            .field("units", &self.units.len())
            .field("strategy", &self.strategy.name())
            .field("locomotion", &self.locomotion)
            .finish_non_exhaustive()
    }
}

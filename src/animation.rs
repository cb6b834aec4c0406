// Animations are explicit state objects advanced by `AnimationScheduler::tick`. Whoever owns the
// scheduler decides how ticks map to wall time: the browser binding runs one interval timer,
// tests and the console client call `tick` directly.

use std::collections::BTreeMap;
use std::time::Duration;

use enum_map::{Enum, EnumMap};

use crate::board::BoardView;
use crate::coord::{PlayerId, Position, TileId};


// Period between animation frames in the browser.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(5);

// Opacity lost by a dissolving tile on every tick.
pub const DISSOLVE_STEP: f64 = 0.05;

// Absorbs float drift from repeated subtraction, so that 1.0 reaches zero in exactly
// `ceil(1.0 / DISSOLVE_STEP)` ticks.
const OPACITY_EPSILON: f64 = 1e-9;


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum)]
pub enum AnimationKind {
    Dissolve,
    Move,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum AnimatedElement {
    Tile(TileId),
    Player(PlayerId),
}

// At most one task per key is in flight.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct AnimationKey {
    pub element: AnimatedElement,
    pub kind: AnimationKind,
}

#[must_use]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TaskStatus {
    Running,
    Finished,
}


// Fades a tile out and then hides it.
#[derive(Clone, Debug)]
pub struct DissolveTask {
    tile: TileId,
    opacity: f64,
}

impl DissolveTask {
    pub fn new(tile: TileId) -> Self { DissolveTask { tile, opacity: 1.0 } }

    pub fn tick(&mut self, board: &mut impl BoardView) -> TaskStatus {
        self.opacity -= DISSOLVE_STEP;
        if self.opacity <= OPACITY_EPSILON {
            self.opacity = 0.0;
            board.set_tile_opacity(self.tile, 0.0);
            board.hide_tile(self.tile);
            TaskStatus::Finished
        } else {
            board.set_tile_opacity(self.tile, self.opacity);
            TaskStatus::Running
        }
    }
}


// Slides a player one pixel per axis per tick until it covers the target tile. Both endpoints are
// sampled once, when the task is created.
#[derive(Clone, Debug)]
pub struct MoveTask {
    player: PlayerId,
    current: Position,
    target: Position,
}

impl MoveTask {
    pub fn new(player: PlayerId, from: Position, to: Position) -> Self {
        MoveTask { player, current: from, target: to }
    }

    pub fn is_done(&self) -> bool { self.current == self.target }
    pub fn ticks_left(&self) -> u32 { self.current.chebyshev_distance(self.target) }

    pub fn tick(&mut self, board: &mut impl BoardView) -> TaskStatus {
        if self.is_done() {
            return TaskStatus::Finished;
        }
        self.current = self.current.step_towards(self.target);
        board.set_player_position(self.player, self.current);
        if self.is_done() { TaskStatus::Finished } else { TaskStatus::Running }
    }
}


#[derive(Clone, Debug)]
pub enum AnimationTask {
    Dissolve(DissolveTask),
    Move(MoveTask),
}

impl AnimationTask {
    pub fn key(&self) -> AnimationKey {
        match self {
            AnimationTask::Dissolve(task) => AnimationKey {
                element: AnimatedElement::Tile(task.tile),
                kind: AnimationKind::Dissolve,
            },
            AnimationTask::Move(task) => AnimationKey {
                element: AnimatedElement::Player(task.player),
                kind: AnimationKind::Move,
            },
        }
    }

    fn tick(&mut self, board: &mut impl BoardView) -> TaskStatus {
        match self {
            AnimationTask::Dissolve(task) => task.tick(board),
            AnimationTask::Move(task) => task.tick(board),
        }
    }
}


#[derive(Clone, Debug, Default)]
pub struct AnimationScheduler {
    tasks: BTreeMap<AnimationKey, AnimationTask>,
}

impl AnimationScheduler {
    pub fn new() -> Self { Self::default() }

    pub fn is_idle(&self) -> bool { self.tasks.is_empty() }
    pub fn num_tasks(&self) -> usize { self.tasks.len() }
    pub fn num_tasks_by_kind(&self) -> EnumMap<AnimationKind, usize> {
        let mut counts = EnumMap::default();
        for key in self.tasks.keys() {
            counts[key.kind] += 1;
        }
        counts
    }

    // Returns whether a task was scheduled. A tile that is already gone or fading needs no new
    // animation: the fade in flight keeps its progress.
    pub fn start_dissolve(&mut self, board: &mut impl BoardView, tile: TileId) -> bool {
        if !board.has_tile(tile) {
            log::warn!("Cannot remove tile {}: no such tile", tile);
            return false;
        }
        if !board.is_tile_visible(tile) {
            log::debug!("Tile {} is already removed", tile);
            return false;
        }
        let key = AnimationKey { element: AnimatedElement::Tile(tile), kind: AnimationKind::Dissolve };
        if self.tasks.contains_key(&key) {
            log::debug!("Tile {} is already being removed", tile);
            return false;
        }
        log::debug!("Removing tile {}", tile);
        self.insert(AnimationTask::Dissolve(DissolveTask::new(tile)));
        true
    }

    // Returns whether a task was scheduled. A newer move of the same player replaces the older
    // one and continues from wherever the player currently is.
    pub fn start_move(
        &mut self, board: &mut impl BoardView, player: PlayerId, target: TileId,
    ) -> bool {
        let Some(from) = board.player_position(player) else {
            log::warn!("Cannot move {}: no such player", player);
            return false;
        };
        let Some(to) = board.tile_position(target) else {
            log::warn!("Cannot move {} to {}: no such tile", player, target);
            return false;
        };
        log::debug!("Moving {} to {}", player, target);
        board.detach_player(player);
        board.set_player_position(player, from);
        let task = MoveTask::new(player, from, to);
        if task.is_done() {
            self.tasks.remove(&AnimationTask::Move(task).key());
            return false;
        }
        self.insert(AnimationTask::Move(task));
        true
    }

    // Advances every task by one frame. Returns the number of tasks still running.
    pub fn tick(&mut self, board: &mut impl BoardView) -> usize {
        self.tasks.retain(|_, task| task.tick(board) == TaskStatus::Running);
        self.tasks.len()
    }

    // Ticks until idle or until `max_ticks` frames have passed. Returns the number of frames.
    pub fn run_to_completion(&mut self, board: &mut impl BoardView, max_ticks: usize) -> usize {
        let mut ticks = 0;
        while !self.is_idle() && ticks < max_ticks {
            self.tick(board);
            ticks += 1;
        }
        ticks
    }

    // Drops every task, leaving elements wherever the last tick put them.
    pub fn cancel_all(&mut self) { self.tasks.clear(); }

    fn insert(&mut self, task: AnimationTask) {
        if self.tasks.insert(task.key(), task).is_some() {
            log::debug!("Replaced an animation that was still in flight");
        }
    }
}

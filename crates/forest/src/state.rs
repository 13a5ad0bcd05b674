//! Game state: legal actions, transitions and scoring.
//!
//! A [`GameState`] is an immutable value. Equality and hashing cover the
//! day, nutrients, trees and both players; the occupancy mask and the
//! `(owner, size)` count table are caches rebuilt on construction.

use std::hash::{Hash, Hasher};

use sunforest_core::{Joint, Result, Side, SunforestError};

use crate::hex::sun_direction;
use crate::{Action, Board, CellId, CellSet, PlayerState, Tree, MAX_TREE_SIZE};

/// Base cost of growing a tree of size 0, 1, 2. The owner's number of trees
/// of the target size is added on top.
pub const GROW_COST: [u32; 3] = [1, 3, 7];

/// Sun spent to harvest a fully grown tree.
pub const COMPLETE_COST: u32 = 4;

/// The game ends when the day counter reaches this value.
pub const MAX_DAY: u8 = 24;

/// Nutrients at the start of a standard game.
pub const STARTING_NUTRIENTS: u8 = 20;

/// Per-owner, per-size tree counts.
type TreeCounts = [[u8; MAX_TREE_SIZE as usize + 1]; 2];

/// A complete game state.
#[derive(Clone, Debug)]
pub struct GameState {
    day: u8,
    nutrients: u8,
    /// Sorted by cell, at most one tree per cell.
    trees: Vec<Tree>,
    players: Joint<PlayerState>,
    occupied: CellSet,
    counts: TreeCounts,
}

impl GameState {
    /// Create a state on `board` from parsed turn data.
    ///
    /// # Errors
    /// Returns `SunforestError::InvalidCell` if a tree stands off the board,
    /// and `SunforestError::InvalidState` if two trees share a cell, a tree
    /// is larger than `MAX_TREE_SIZE`, or the day is past `MAX_DAY`.
    pub fn new(
        day: u8,
        nutrients: u8,
        trees: impl IntoIterator<Item = Tree>,
        player: PlayerState,
        opponent: PlayerState,
        board: &Board,
    ) -> Result<Self> {
        if day > MAX_DAY {
            return Err(SunforestError::InvalidState(format!(
                "day {} is past the last day {}",
                day, MAX_DAY
            )));
        }

        let mut trees: Vec<Tree> = trees.into_iter().collect();
        for tree in &trees {
            board.cell(tree.cell.index())?;
        }
        trees.sort_unstable();
        for pair in trees.windows(2) {
            if pair[0].cell == pair[1].cell {
                return Err(SunforestError::InvalidState(format!(
                    "two trees on cell {}",
                    pair[0].cell
                )));
            }
        }
        if let Some(tree) = trees.iter().find(|t| t.size > MAX_TREE_SIZE) {
            return Err(SunforestError::InvalidState(format!(
                "tree on cell {} has size {}",
                tree.cell, tree.size
            )));
        }

        Ok(Self::from_sorted(
            day,
            nutrients,
            trees,
            Joint::new(player, opponent),
        ))
    }

    /// Standard opening: two size-1 trees per side on mirrored cells of the
    /// outermost ring where all four are usable, 20 nutrients, and the day-0
    /// sun already collected. A board with no such ring starts empty.
    pub fn standard_start(board: &Board) -> Self {
        let usable = |cell: CellId| board.richness(cell) > 0;
        let opening = (1..=board.radius()).rev().find_map(|ring| {
            let ring_start = Board::cell_count(ring - 1) as u8;
            let cells = [ring_start, ring_start + ring].map(CellId::new_unchecked);
            let pairs = cells.map(|cell| (cell, board.mirror(cell)));
            pairs
                .iter()
                .all(|&(cell, mirrored)| usable(cell) && mirrored.is_some_and(usable))
                .then_some(pairs)
        });

        let mut trees = Vec::with_capacity(4);
        for (cell, mirrored) in opening.into_iter().flatten() {
            trees.push(Tree::new(cell, 1, Side::Player, false));
            if let Some(mirrored) = mirrored {
                trees.push(Tree::new(mirrored, 1, Side::Opponent, false));
            }
        }
        trees.sort_unstable();

        let state = Self::from_sorted(
            0,
            STARTING_NUTRIENTS,
            trees,
            Joint::new(PlayerState::default(), PlayerState::default()),
        );
        let income = state.sun_production(board, 0);
        let mut players = state.players;
        for side in Side::BOTH {
            players[side].sun += income[side];
        }
        Self { players, ..state }
    }

    /// Build a state from trees already in canonical order.
    fn from_sorted(day: u8, nutrients: u8, trees: Vec<Tree>, players: Joint<PlayerState>) -> Self {
        let mut occupied = CellSet::EMPTY;
        let mut counts: TreeCounts = [[0; MAX_TREE_SIZE as usize + 1]; 2];
        for tree in &trees {
            occupied.insert(tree.cell);
            counts[tree.owner.index()][tree.size as usize] += 1;
        }
        Self {
            day,
            nutrients,
            trees,
            players,
            occupied,
            counts,
        }
    }

    /// Current day (0-based; `MAX_DAY` once the game is over)
    #[inline]
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Shared nutrient pool
    #[inline]
    pub fn nutrients(&self) -> u8 {
        self.nutrients
    }

    /// All trees, sorted by cell
    #[inline]
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// Resources of one side
    #[inline]
    pub fn player(&self, side: Side) -> &PlayerState {
        &self.players[side]
    }

    /// Resources of both sides
    #[inline]
    pub fn players(&self) -> &Joint<PlayerState> {
        &self.players
    }

    /// Cells holding a tree
    #[inline]
    pub fn occupied(&self) -> CellSet {
        self.occupied
    }

    /// The tree on a cell, if any
    #[inline]
    pub fn tree_at(&self, cell: CellId) -> Option<&Tree> {
        if !self.occupied.contains(cell) {
            return None;
        }
        self.trees
            .binary_search_by_key(&cell, |t| t.cell)
            .ok()
            .map(|i| &self.trees[i])
    }

    /// Number of trees of `size` owned by `side`
    #[inline]
    pub fn count(&self, side: Side, size: u8) -> u32 {
        self.counts[side.index()][size as usize] as u32
    }

    /// True once the last day is over
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.day >= MAX_DAY
    }

    /// Sun needed to grow `tree` one size.
    #[inline]
    pub fn grow_cost(&self, tree: &Tree) -> u32 {
        GROW_COST[tree.size as usize] + self.count(tree.owner, tree.size + 1)
    }

    /// Sun needed to plant a seed: one per seed the side already owns.
    #[inline]
    pub fn seed_cost(&self, side: Side) -> u32 {
        self.count(side, 0)
    }

    /// Sun `side` would spend on `action`, or `None` if it names no tree.
    pub fn action_cost(&self, side: Side, action: Action) -> Option<u32> {
        match action {
            Action::Wait => Some(0),
            Action::Complete { .. } => Some(COMPLETE_COST),
            Action::Seed { .. } => Some(self.seed_cost(side)),
            Action::Grow { target } => self.tree_at(target).map(|t| self.grow_cost(t)),
        }
    }

    /// Legal actions of both sides. WAIT is always legal; a side that has
    /// already waited today can only wait.
    pub fn legal_actions(&self, board: &Board) -> Joint<Vec<Action>> {
        let mut actions = Joint::new(vec![Action::Wait], vec![Action::Wait]);
        let free = !self.occupied;

        for tree in &self.trees {
            let player = &self.players[tree.owner];
            if tree.dormant || player.is_waiting {
                continue;
            }
            let list = &mut actions[tree.owner];

            if tree.size < MAX_TREE_SIZE {
                if player.sun >= self.grow_cost(tree) {
                    list.push(Action::Grow { target: tree.cell });
                }
            } else if player.sun >= COMPLETE_COST {
                list.push(Action::Complete { target: tree.cell });
            }

            if player.sun >= self.seed_cost(tree.owner) {
                let targets = board.seed_targets(tree.cell, tree.size as usize) & free;
                list.extend(targets.iter().map(|target| Action::Seed {
                    origin: tree.cell,
                    target,
                }));
            }
        }

        actions
    }

    /// The tree `side` acts with on `cell`, checked for ownership and
    /// dormancy.
    fn acting_tree(&self, side: Side, cell: CellId) -> Result<Tree> {
        let tree = *self.tree_at(cell).ok_or(SunforestError::NoTreeAt(cell.raw()))?;
        if tree.owner != side {
            return Err(SunforestError::IllegalAction(format!(
                "{} does not own the tree on cell {}",
                side, cell
            )));
        }
        if tree.dormant {
            return Err(SunforestError::IllegalAction(format!(
                "tree on cell {} is dormant",
                cell
            )));
        }
        Ok(tree)
    }

    /// Resolve one tick where both sides act.
    ///
    /// Costs are computed from this state's tree counts, so the order in
    /// which the two actions are applied does not matter. Two seeds aimed
    /// at the same cell cancel: nothing is planted or paid and both parent
    /// trees turn dormant.
    ///
    /// # Errors
    /// Returns `SunforestError::InvalidCell` if an action names a cell off
    /// `board`. Otherwise returns an error if an action names a missing,
    /// foreign or dormant tree, is unaffordable, or comes from a side that
    /// already waited.
    pub fn apply_actions(&self, actions: Joint<Action>, board: &Board) -> Result<GameState> {
        for side in Side::BOTH {
            let action = actions[side];
            if self.players[side].is_waiting && action != Action::Wait {
                return Err(SunforestError::IllegalAction(format!(
                    "{} is waiting and cannot {}",
                    side, action
                )));
            }
            for cell in [action.actor(), action.target()].into_iter().flatten() {
                board.cell(cell.index())?;
            }
        }

        if let (
            Action::Seed {
                origin: player_origin,
                target: player_target,
            },
            Action::Seed {
                origin: opponent_origin,
                target: opponent_target,
            },
        ) = (actions.player, actions.opponent)
        {
            if player_target == opponent_target {
                let mut trees = self.trees.clone();
                for (side, origin) in [
                    (Side::Player, player_origin),
                    (Side::Opponent, opponent_origin),
                ] {
                    self.acting_tree(side, origin)?;
                    set_tree(&mut trees, origin, |t| t.with_dormant(true));
                }
                return Ok(Self::from_sorted(
                    self.day,
                    self.nutrients,
                    trees,
                    self.players,
                ));
            }
        }

        let mut trees = self.trees.clone();
        let mut players = self.players;
        let mut completed = 0u8;

        for side in Side::BOTH {
            let player = &mut players[side];
            match actions[side] {
                Action::Wait => player.is_waiting = true,
                Action::Grow { target } => {
                    let tree = self.acting_tree(side, target)?;
                    if tree.size >= MAX_TREE_SIZE {
                        return Err(SunforestError::IllegalAction(format!(
                            "tree on cell {} is fully grown",
                            target
                        )));
                    }
                    pay(player, self.grow_cost(&tree), actions[side])?;
                    set_tree(&mut trees, target, Tree::grown);
                }
                Action::Seed { origin, target } => {
                    let tree = self.acting_tree(side, origin)?;
                    let reachable = board.seed_targets(origin, tree.size as usize);
                    if !reachable.contains(target) || self.occupied.contains(target) {
                        return Err(SunforestError::IllegalAction(format!(
                            "cell {} cannot be seeded from cell {}",
                            target, origin
                        )));
                    }
                    pay(player, self.seed_cost(side), actions[side])?;
                    set_tree(&mut trees, origin, |t| t.with_dormant(true));
                    let slot = trees.partition_point(|t| t.cell < target);
                    trees.insert(slot, Tree::seed(target, side));
                }
                Action::Complete { target } => {
                    let tree = self.acting_tree(side, target)?;
                    if tree.size != MAX_TREE_SIZE {
                        return Err(SunforestError::IllegalAction(format!(
                            "tree on cell {} is not fully grown",
                            target
                        )));
                    }
                    pay(player, COMPLETE_COST, actions[side])?;
                    player.score += self.nutrients as u32 + board.richness(target) as u32;
                    trees.retain(|t| t.cell != target);
                    completed += 1;
                }
            }
        }

        let nutrients = self.nutrients.saturating_sub(completed);
        let mut day = self.day;

        if players.player.is_waiting && players.opponent.is_waiting {
            day += 1;
            if day < MAX_DAY {
                let settled = Self::from_sorted(day, nutrients, trees, players);
                let income = settled.sun_production(board, day);
                let mut trees = settled.trees;
                for tree in &mut trees {
                    tree.dormant = false;
                }
                for side in Side::BOTH {
                    players[side].sun += income[side];
                    players[side].is_waiting = false;
                }
                return Ok(Self::from_sorted(day, nutrients, trees, players));
            }
        }

        Ok(Self::from_sorted(day, nutrients, trees, players))
    }

    /// Shadow height on every cell with the sun in `day`'s direction. Each
    /// tree shades as many cells as its size, with its own size.
    pub fn shadows(&self, board: &Board, day: u8) -> Vec<u8> {
        let dir = sun_direction(day);
        let mut shadow = vec![0u8; board.len()];
        for tree in &self.trees {
            let mut cell = tree.cell;
            for _ in 0..tree.size {
                match board.neighbor(cell, dir) {
                    Some(next) => {
                        let s = &mut shadow[next.index()];
                        *s = (*s).max(tree.size);
                        cell = next;
                    }
                    None => break,
                }
            }
        }
        shadow
    }

    /// Sun each side would collect on `day`: the sizes of its trees that
    /// stand strictly taller than the shadow on their cell.
    pub fn sun_production(&self, board: &Board, day: u8) -> Joint<u32> {
        let shadow = self.shadows(board, day);
        let mut income = Joint::new(0u32, 0u32);
        for tree in &self.trees {
            if tree.size > shadow[tree.cell.index()] {
                income[tree.owner] += tree.size as u32;
            }
        }
        income
    }

    /// Signed score margin for the player.
    ///
    /// Exact once the game is over. Before that, each side's sun is
    /// projected as `production * days_left / 2` more, spent 4 at a time on
    /// harvesting its most valuable grown trees, and the rest converted at
    /// 3 sun per point.
    pub fn score(&self, board: &Board) -> i32 {
        if self.is_terminal() {
            return self.players.player.final_score() as i32
                - self.players.opponent.final_score() as i32;
        }

        let days_left = (MAX_DAY - 1 - self.day) as u32;
        let projected = Joint::from_fn(|side| {
            let player = &self.players[side];
            let production: u32 = self
                .trees
                .iter()
                .filter(|t| t.owner == side)
                .map(|t| t.size as u32)
                .sum();
            let mut sun = player.sun + production * days_left / 2;

            let mut harvests: Vec<(u32, CellId)> = self
                .trees
                .iter()
                .filter(|t| t.owner == side && t.size == MAX_TREE_SIZE)
                .map(|t| (self.nutrients as u32 + board.richness(t.cell) as u32, t.cell))
                .collect();
            harvests.sort_unstable();

            let mut score = player.score;
            while sun >= COMPLETE_COST {
                let Some((value, _)) = harvests.pop() else {
                    break;
                };
                sun -= COMPLETE_COST;
                score += value;
            }
            (score + sun / 3) as i32
        });

        projected.player - projected.opponent
    }

    /// The same position seen from the other seat: owners and players
    /// exchanged.
    pub fn swapped(&self) -> GameState {
        let trees = self
            .trees
            .iter()
            .map(|t| Tree {
                owner: t.owner.opposite(),
                ..*t
            })
            .collect();
        Self::from_sorted(self.day, self.nutrients, trees, self.players.swapped())
    }
}

/// Replace the tree on `cell` (which must exist) with `f(tree)`.
fn set_tree(trees: &mut [Tree], cell: CellId, f: impl FnOnce(Tree) -> Tree) {
    if let Ok(i) = trees.binary_search_by_key(&cell, |t| t.cell) {
        trees[i] = f(trees[i]);
    }
}

/// Charge `cost` sun for `action`.
fn pay(player: &mut PlayerState, cost: u32, action: Action) -> Result<()> {
    player.sun = player.sun.checked_sub(cost).ok_or_else(|| {
        SunforestError::IllegalAction(format!(
            "{} costs {} sun, only {} available",
            action, cost, player.sun
        ))
    })?;
    Ok(())
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.day == other.day
            && self.nutrients == other.nutrients
            && self.players == other.players
            && self.trees == other.trees
    }
}

impl Eq for GameState {}

impl Hash for GameState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.day.hash(state);
        self.nutrients.hash(state);
        self.trees.hash(state);
        self.players.hash(state);
    }
}

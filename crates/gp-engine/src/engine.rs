//! The game engine: command and query surface over sessions, graph, and
//! ledger.

use std::collections::HashMap;

use gp_graph::{DeathChance, NodeId, PathGraph, PathNode};
use gp_ledger::{AccountId, AssetKind, ItemBundle, ItemLedger};

use crate::entropy::Entropy;
use crate::error::{EngineError, EngineResult};
use crate::session::{Session, Status, VisitRecord};
use crate::snapshot::Snapshot;

/// The adventure controller.
///
/// Owns the path graph, the item ledger it controls, and every player
/// session — the single "world" value whose lifetime is the deployment.
/// All commands take `&mut self`, so mutating commands are serialized
/// structurally: no two can interleave, for the same player or otherwise.
/// Queries take `&self` and never change state.
pub struct GameEngine {
    graph: PathGraph,
    ledger: ItemLedger,
    sessions: HashMap<AccountId, Session>,
    controller: AccountId,
    entropy: Box<dyn Entropy>,
    treasure_payout: ItemBundle,
}

impl GameEngine {
    /// Create an engine over `graph`, drawing death rolls from `entropy`.
    ///
    /// A fresh ledger is created with the engine's own identity as its
    /// controller; nothing else can ever mint or burn on it.
    pub fn new(graph: PathGraph, entropy: Box<dyn Entropy>) -> Self {
        let controller = AccountId::new();
        Self {
            graph,
            ledger: ItemLedger::new(controller),
            sessions: HashMap::new(),
            controller,
            entropy,
            treasure_payout: ItemBundle::NONE,
        }
    }

    /// Set the bundle minted on a successful `open_treasure_with_key`.
    ///
    /// The payout beyond the pair burn is integrator policy; it defaults
    /// to nothing.
    pub fn with_treasure_payout(mut self, payout: ItemBundle) -> Self {
        self.treasure_payout = payout;
        self
    }

    /// The path graph being played.
    pub fn graph(&self) -> &PathGraph {
        &self.graph
    }

    /// The item ledger, for read-only inspection.
    pub fn ledger(&self) -> &ItemLedger {
        &self.ledger
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Start (or restart) a game for `player`.
    ///
    /// Valid from any status. A dead or victorious player starts over, and
    /// a player mid-run simply abandons that run; neither is an error.
    /// The player is placed on the initial node with an empty history, and
    /// no reward is minted for the initial node itself.
    pub fn start_game(&mut self, player: AccountId) {
        let initial = self.graph.initial_node().id;
        self.sessions.entry(player).or_default().restart(initial);
        tracing::info!(player = %player, node = %initial, "game started");
    }

    /// Take the choice at `choice_index` from the player's current node.
    ///
    /// Requires status [`Status::InProgress`] and an in-range index. The
    /// target's death chance is rolled on arrival: a fatal roll ends the
    /// run with no rewards; a surviving arrival mints the target's full
    /// reward and, if the target is the winning node, ends the run as won.
    ///
    /// Every fallible step runs before the first mutation, so a failed call
    /// leaves no observable change.
    pub fn choose_path(
        &mut self,
        player: AccountId,
        choice_index: usize,
    ) -> EngineResult<VisitRecord> {
        let status = self.status(player);
        if status != Status::InProgress {
            return Err(EngineError::InvalidState { status });
        }
        let current = self
            .sessions
            .get(&player)
            .and_then(Session::current)
            .ok_or(EngineError::InvalidState { status })?;

        let targets = self.graph.choice_targets(current)?;
        let available = targets.len();
        let target = targets
            .get(choice_index)
            .ok_or(EngineError::InvalidChoice {
                index: choice_index,
                available,
            })?;
        let target_id = target.id;
        let chance = target.death_chance;
        let reward = target.reward;
        let winning = target.is_winning;

        if self.roll_death(chance) {
            let record = VisitRecord::fatal(target_id);
            self.sessions.entry(player).or_default().kill(record);
            tracing::info!(player = %player, node = %target_id, "player died");
            return Ok(record);
        }

        // Minting is the last fallible step; the session is untouched if
        // the reserve cannot cover the reward.
        self.ledger.mint_bundle(self.controller, player, &reward)?;
        let record = VisitRecord::survived(target_id, reward);
        self.sessions.entry(player).or_default().advance(record, winning);
        if winning {
            tracing::info!(player = %player, node = %target_id, "player won");
        } else {
            tracing::debug!(player = %player, node = %target_id, "path chosen");
        }
        Ok(record)
    }

    /// Consume one key and one treasure together.
    ///
    /// Requires at least one of each, else [`EngineError::InsufficientItems`]
    /// and nothing is burned. On success exactly one key and one treasure
    /// are burned and the configured payout, if any, is minted.
    pub fn open_treasure_with_key(&mut self, player: AccountId) -> EngineResult<()> {
        if self.ledger.balance_of(player, AssetKind::Key) < 1
            || self.ledger.balance_of(player, AssetKind::Treasure) < 1
        {
            return Err(EngineError::InsufficientItems);
        }
        // Payout first: a reserve failure must leave the pair unburned.
        // The burns cannot fail after the precondition check above.
        let payout = self.treasure_payout;
        self.ledger.mint_bundle(self.controller, player, &payout)?;
        self.ledger.burn(self.controller, player, AssetKind::Key, 1)?;
        self.ledger
            .burn(self.controller, player, AssetKind::Treasure, 1)?;
        tracing::info!(player = %player, "treasure opened");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The player's status. [`Status::NotStarted`] for unknown players.
    pub fn status(&self, player: AccountId) -> Status {
        self.sessions
            .get(&player)
            .map(Session::status)
            .unwrap_or_default()
    }

    /// True while a run is underway.
    pub fn is_in_game(&self, player: AccountId) -> bool {
        self.status(player) == Status::InProgress
    }

    /// True if the player's last run ended in death.
    pub fn is_dead(&self, player: AccountId) -> bool {
        self.status(player) == Status::Dead
    }

    /// True if the player's last run reached the winning node.
    pub fn has_won(&self, player: AccountId) -> bool {
        self.status(player) == Status::Won
    }

    /// The node the player currently stands on.
    ///
    /// Fails with [`EngineError::InvalidState`] when no game has ever been
    /// started.
    pub fn current_path(&self, player: AccountId) -> EngineResult<&PathNode> {
        let id = self.current_node_id(player)?;
        Ok(self.graph.node(id)?)
    }

    /// The nodes reachable from the player's current node, in choice
    /// order. Empty when the current node is terminal.
    ///
    /// Fails with [`EngineError::InvalidState`] when no game has ever been
    /// started.
    pub fn next_choices(&self, player: AccountId) -> EngineResult<Vec<&PathNode>> {
        let id = self.current_node_id(player)?;
        Ok(self.graph.choice_targets(id)?)
    }

    /// The player's visit history, oldest first. Empty for unknown players.
    pub fn path_history(&self, player: AccountId) -> &[VisitRecord] {
        self.sessions
            .get(&player)
            .map(Session::history)
            .unwrap_or(&[])
    }

    /// The player's gold balance.
    pub fn balance_of_gold(&self, player: AccountId) -> u64 {
        self.ledger.balance_of(player, AssetKind::Gold)
    }

    /// The player's key balance.
    pub fn balance_of_key(&self, player: AccountId) -> u64 {
        self.ledger.balance_of(player, AssetKind::Key)
    }

    /// The player's treasure balance.
    pub fn balance_of_treasure(&self, player: AccountId) -> u64 {
        self.ledger.balance_of(player, AssetKind::Treasure)
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Capture the durable state: every session and the ledger.
    ///
    /// The graph is static data and is not part of the snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.sessions.clone(), self.ledger.clone())
    }

    /// Rebuild an engine from a snapshot, a graph, and a fresh entropy
    /// source. The ledger's recorded controller identity is kept.
    pub fn restore(graph: PathGraph, snapshot: Snapshot, entropy: Box<dyn Entropy>) -> Self {
        let controller = snapshot.ledger.controller();
        Self {
            graph,
            ledger: snapshot.ledger,
            sessions: snapshot.sessions,
            controller,
            entropy,
            treasure_payout: ItemBundle::NONE,
        }
    }

    fn current_node_id(&self, player: AccountId) -> EngineResult<NodeId> {
        self.sessions
            .get(&player)
            .and_then(Session::current)
            .ok_or(EngineError::InvalidState {
                status: self.status(player),
            })
    }

    fn roll_death(&mut self, chance: DeathChance) -> bool {
        if chance.is_harmless() {
            return false;
        }
        self.entropy.uniform(chance.denominator) < chance.numerator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::SequenceEntropy;

    fn engine() -> GameEngine {
        // Out-of-script draws are high, so every roll survives by default.
        GameEngine::new(
            PathGraph::standard(),
            Box::new(SequenceEntropy::new([])),
        )
    }

    #[test]
    fn fresh_player_is_not_in_game() {
        let engine = engine();
        let player = AccountId::new();
        assert!(!engine.is_in_game(player));
        assert!(!engine.is_dead(player));
        assert!(!engine.has_won(player));
        assert!(engine.path_history(player).is_empty());
        assert!(matches!(
            engine.current_path(player),
            Err(EngineError::InvalidState { .. })
        ));
    }

    #[test]
    fn start_places_player_on_the_initial_node() {
        let mut engine = engine();
        let player = AccountId::new();
        engine.start_game(player);

        assert!(engine.is_in_game(player));
        let current = engine.current_path(player).unwrap();
        assert_eq!(current.id, engine.graph().initial_node().id);
        assert!(engine.path_history(player).is_empty());
        assert_eq!(engine.balance_of_gold(player), 0);
    }

    #[test]
    fn next_choices_follow_edge_order() {
        let mut engine = engine();
        let player = AccountId::new();
        engine.start_game(player);

        let choices = engine.next_choices(player).unwrap();
        let ids: Vec<NodeId> = choices.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![NodeId(0), NodeId(1), NodeId(2)]);
    }

    #[test]
    fn choose_path_requires_a_running_game() {
        let mut engine = engine();
        let player = AccountId::new();
        assert_eq!(
            engine.choose_path(player, 0),
            Err(EngineError::InvalidState {
                status: Status::NotStarted
            })
        );
    }

    #[test]
    fn out_of_range_choice_is_rejected() {
        let mut engine = engine();
        let player = AccountId::new();
        engine.start_game(player);

        assert_eq!(
            engine.choose_path(player, 3),
            Err(EngineError::InvalidChoice {
                index: 3,
                available: 3
            })
        );
        // The failed command left no trace.
        assert!(engine.path_history(player).is_empty());
        assert!(engine.is_in_game(player));
    }

    #[test]
    fn surviving_arrival_mints_the_reward() {
        let mut engine = engine();
        let player = AccountId::new();
        engine.start_game(player);

        // Sunlit Trail: zero death chance, 5 gold.
        let record = engine.choose_path(player, 0).unwrap();
        assert_eq!(record.node, NodeId(0));
        assert!(!record.died);
        assert_eq!(record.gold, 5);
        assert_eq!(engine.balance_of_gold(player), 5);
        assert!(engine.is_in_game(player));
    }

    #[test]
    fn fatal_roll_kills_and_mints_nothing() {
        let mut engine = GameEngine::new(
            PathGraph::standard(),
            Box::new(SequenceEntropy::always_lowest()),
        );
        let player = AccountId::new();
        engine.start_game(player);

        // River Ford kills on a draw of 0.
        let record = engine.choose_path(player, 1).unwrap();
        assert!(record.died);
        assert_eq!(record.node, NodeId(1));
        assert!(engine.is_dead(player));
        assert_eq!(engine.balance_of_gold(player), 0);
        assert_eq!(engine.path_history(player), &[VisitRecord::fatal(NodeId(1))]);
    }

    #[test]
    fn dead_player_cannot_choose_until_restart() {
        let mut engine = GameEngine::new(
            PathGraph::standard(),
            Box::new(SequenceEntropy::always_lowest()),
        );
        let player = AccountId::new();
        engine.start_game(player);
        engine.choose_path(player, 1).unwrap();
        assert!(engine.is_dead(player));

        assert_eq!(
            engine.choose_path(player, 0),
            Err(EngineError::InvalidState {
                status: Status::Dead
            })
        );

        engine.start_game(player);
        assert!(engine.is_in_game(player));
        assert!(engine.path_history(player).is_empty());
    }

    #[test]
    fn restart_while_in_progress_is_allowed() {
        let mut engine = engine();
        let player = AccountId::new();
        engine.start_game(player);
        engine.choose_path(player, 0).unwrap();
        assert_eq!(engine.path_history(player).len(), 1);

        // Not an error: the run is simply abandoned.
        engine.start_game(player);
        assert!(engine.is_in_game(player));
        assert!(engine.path_history(player).is_empty());
        assert_eq!(
            engine.current_path(player).unwrap().id,
            engine.graph().initial_node().id
        );
        // Earlier rewards are kept; only the run resets.
        assert_eq!(engine.balance_of_gold(player), 5);
    }

    #[test]
    fn winning_route_ends_the_run_as_won() {
        let mut engine = engine();
        let player = AccountId::new();
        engine.start_game(player);

        // Crossroads -> Rope Bridge -> Dark Hollow -> Wyrm's Den ->
        // Vault Antechamber -> Sunward Gate.
        for index in [2, 1, 1, 0, 1] {
            engine.choose_path(player, index).unwrap();
        }

        assert!(engine.has_won(player));
        assert!(!engine.is_in_game(player));
        let last = engine.path_history(player).last().copied().unwrap();
        assert_eq!(last.node, NodeId(12));
        // The winning node's reward is still minted.
        assert_eq!(last.gold, 100);

        // Terminal: no further choices.
        assert!(engine.next_choices(player).unwrap().is_empty());
        assert_eq!(
            engine.choose_path(player, 0),
            Err(EngineError::InvalidState {
                status: Status::Won
            })
        );
    }

    #[test]
    fn choosing_from_a_terminal_node_is_invalid_state_not_choice() {
        // A won player is blocked by status before the choice bounds are
        // ever consulted.
        let mut engine = engine();
        let player = AccountId::new();
        engine.start_game(player);
        for index in [2, 1, 1, 0, 1] {
            engine.choose_path(player, index).unwrap();
        }
        assert!(matches!(
            engine.choose_path(player, 0),
            Err(EngineError::InvalidState { .. })
        ));
    }

    #[test]
    fn dead_end_node_rejects_any_choice_index() {
        // A non-winning terminal node leaves the run in progress but offers
        // no choices.
        let graph = PathGraph::new(
            vec![
                gp_graph::PathNode::new(NodeId(0), "Start").leads_to([1]),
                gp_graph::PathNode::new(NodeId(1), "Dead End"),
                gp_graph::PathNode::new(NodeId(2), "Exit").winning(),
            ],
            NodeId(0),
        )
        .unwrap();
        let mut engine = GameEngine::new(graph, Box::new(SequenceEntropy::new([])));
        let player = AccountId::new();
        engine.start_game(player);
        engine.choose_path(player, 0).unwrap();

        assert!(engine.is_in_game(player));
        assert_eq!(
            engine.choose_path(player, 0),
            Err(EngineError::InvalidChoice {
                index: 0,
                available: 0
            })
        );
    }

    #[test]
    fn history_records_each_transition_in_order() {
        let mut engine = engine();
        let player = AccountId::new();
        engine.start_game(player);

        engine.choose_path(player, 0).unwrap(); // Sunlit Trail
        engine.choose_path(player, 0).unwrap(); // Cave Mouth
        engine.choose_path(player, 0).unwrap(); // Crypt Stair

        let nodes: Vec<NodeId> = engine
            .path_history(player)
            .iter()
            .map(|r| r.node)
            .collect();
        assert_eq!(nodes, vec![NodeId(0), NodeId(3), NodeId(6)]);
        assert_eq!(engine.path_history(player)[2].gold, 20);
    }

    #[test]
    fn treasure_requires_both_key_and_treasure() {
        let mut engine = engine();
        let player = AccountId::new();

        assert_eq!(
            engine.open_treasure_with_key(player),
            Err(EngineError::InsufficientItems)
        );

        // A key alone is not enough.
        engine.start_game(player);
        engine.choose_path(player, 2).unwrap(); // Rope Bridge: 1 key
        assert_eq!(engine.balance_of_key(player), 1);
        assert_eq!(
            engine.open_treasure_with_key(player),
            Err(EngineError::InsufficientItems)
        );
        assert_eq!(engine.balance_of_key(player), 1);
    }

    #[test]
    fn opening_a_treasure_burns_exactly_one_pair() {
        let mut engine = engine();
        let player = AccountId::new();
        engine.start_game(player);

        // Rope Bridge (key), Dark Hollow (key), Wyrm's Den (treasure).
        for index in [2, 1, 1] {
            engine.choose_path(player, index).unwrap();
        }
        assert_eq!(engine.balance_of_key(player), 2);
        assert_eq!(engine.balance_of_treasure(player), 1);
        let gold_before = engine.balance_of_gold(player);

        engine.open_treasure_with_key(player).unwrap();
        assert_eq!(engine.balance_of_key(player), 1);
        assert_eq!(engine.balance_of_treasure(player), 0);
        // No payout configured: no other balance changes.
        assert_eq!(engine.balance_of_gold(player), gold_before);
    }

    #[test]
    fn configured_payout_is_minted_on_open() {
        let mut engine = GameEngine::new(
            PathGraph::standard(),
            Box::new(SequenceEntropy::new([])),
        )
        .with_treasure_payout(ItemBundle::new(500, 0, 0));
        let player = AccountId::new();
        engine.start_game(player);
        for index in [2, 1, 1] {
            engine.choose_path(player, index).unwrap();
        }
        let gold_before = engine.balance_of_gold(player);

        engine.open_treasure_with_key(player).unwrap();
        assert_eq!(engine.balance_of_gold(player), gold_before + 500);
    }

    #[test]
    fn players_are_independent() {
        let mut engine = engine();
        let alice = AccountId::new();
        let bob = AccountId::new();

        engine.start_game(alice);
        engine.choose_path(alice, 0).unwrap();

        assert!(engine.is_in_game(alice));
        assert!(!engine.is_in_game(bob));
        assert!(engine.path_history(bob).is_empty());
        assert_eq!(engine.balance_of_gold(bob), 0);
    }
}

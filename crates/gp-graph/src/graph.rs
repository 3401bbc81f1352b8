use std::collections::HashMap;

use crate::error::{GraphError, GraphResult};
use crate::node::{NodeId, PathNode};

/// Maximum outgoing edges per node, matching the three-way choice UI limit.
pub const MAX_CHOICES: usize = 3;

/// The validated, read-only adventure graph.
///
/// Built once and never mutated; all accessors take `&self`, so unlimited
/// concurrent reads are safe.
#[derive(Debug, Clone)]
pub struct PathGraph {
    nodes: HashMap<NodeId, PathNode>,
    initial: NodeId,
}

impl PathGraph {
    /// Build a graph from a node set and a designated initial node.
    ///
    /// Validates well-formedness: unique ids, every edge references an
    /// existing node, at most [`MAX_CHOICES`] edges per node, exactly one
    /// winning node and it is terminal, no death chance above certainty,
    /// and at least one zero-death node directly reachable from the initial
    /// node so a new player can always survive their first choice.
    pub fn new(nodes: Vec<PathNode>, initial: NodeId) -> GraphResult<Self> {
        if nodes.is_empty() {
            return Err(GraphError::Malformed("graph has no nodes".into()));
        }

        let mut table = HashMap::with_capacity(nodes.len());
        for node in nodes {
            let id = node.id;
            if table.insert(id, node).is_some() {
                return Err(GraphError::Malformed(format!("duplicate node id {id}")));
            }
        }

        let mut winners = 0;
        for node in table.values() {
            if node.next.len() > MAX_CHOICES {
                return Err(GraphError::Malformed(format!(
                    "node {} has {} edges, limit is {MAX_CHOICES}",
                    node.id,
                    node.next.len()
                )));
            }
            for target in &node.next {
                if !table.contains_key(target) {
                    return Err(GraphError::Malformed(format!(
                        "node {} has an edge to unknown node {target}",
                        node.id
                    )));
                }
            }
            let chance = node.death_chance;
            if chance.denominator > 0 && chance.numerator > chance.denominator {
                return Err(GraphError::Malformed(format!(
                    "node {} has death chance {} above certainty",
                    node.id, chance
                )));
            }
            if node.is_winning {
                winners += 1;
                if !node.is_terminal() {
                    return Err(GraphError::Malformed(format!(
                        "winning node {} must be terminal",
                        node.id
                    )));
                }
            }
        }
        if winners != 1 {
            return Err(GraphError::Malformed(format!(
                "expected exactly one winning node, found {winners}"
            )));
        }

        let start = table
            .get(&initial)
            .ok_or(GraphError::NodeNotFound(initial))?;
        let survivable = start.next.iter().any(|id| {
            table
                .get(id)
                .is_some_and(|n| n.death_chance.is_harmless())
        });
        if !survivable {
            return Err(GraphError::Malformed(
                "no zero-death node reachable from the initial node".into(),
            ));
        }

        Ok(Self {
            nodes: table,
            initial,
        })
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> GraphResult<&PathNode> {
        self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))
    }

    /// The designated initial node.
    pub fn initial_node(&self) -> &PathNode {
        // The initial id is validated at construction.
        &self.nodes[&self.initial]
    }

    /// The nodes reachable from `id`, in choice order. Empty for terminals.
    pub fn choice_targets(&self, id: NodeId) -> GraphResult<Vec<&PathNode>> {
        let node = self.node(id)?;
        node.next.iter().map(|t| self.node(*t)).collect()
    }

    /// Number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the graph has no nodes. Never true for a validated graph.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = &PathNode> {
        self.nodes.values()
    }

    /// The built-in 14-node adventure world.
    ///
    /// The crossroads (node 13) is the starting point; its three trails are
    /// nodes 0, 1, and 2. The sunward gate (node 12) is the only ending
    /// besides death. The sunlit trail never kills, so the first choice is
    /// always survivable, and the foxglove meadow loops back to the
    /// crossroads.
    pub fn standard() -> Self {
        let nodes = vec![
            PathNode::new(NodeId(13), "Crossroads")
                .describe("Three trails fan out from a weathered waystone.")
                .leads_to([0, 1, 2]),
            PathNode::new(NodeId(0), "Sunlit Trail")
                .describe("A broad, easy path through birch and fern.")
                .leads_to([3, 4, 5])
                .rewards(5, 0, 0),
            PathNode::new(NodeId(1), "River Ford")
                .describe("Cold water tugs at your knees as you wade across.")
                .death_text("The current takes your footing, and then the rest of you.")
                .leads_to([3, 4])
                .deadly(1, 6)
                .rewards(10, 0, 0),
            PathNode::new(NodeId(2), "Old Rope Bridge")
                .describe("Frayed ropes creak over a dry ravine.")
                .death_text("A plank gives way. The ravine is deeper than it looked.")
                .leads_to([4, 5])
                .deadly(1, 4)
                .rewards(15, 1, 0),
            PathNode::new(NodeId(3), "Cave Mouth")
                .describe("A dark opening breathes cool air from below.")
                .leads_to([6, 7])
                .rewards(5, 0, 0),
            PathNode::new(NodeId(4), "Foxglove Meadow")
                .describe("Bees drone over purple flowers. The crossroads lie beyond.")
                .leads_to([13, 6])
                .rewards(10, 0, 0),
            PathNode::new(NodeId(5), "Dark Hollow")
                .describe("Something rustles in the leaf-choked pit ahead.")
                .death_text("The rustling was not the wind.")
                .leads_to([7, 8])
                .deadly(1, 3)
                .rewards(0, 1, 0),
            PathNode::new(NodeId(6), "Crypt Stair")
                .describe("Worn steps spiral down past empty niches.")
                .death_text("The stair ends sooner than your stride does.")
                .leads_to([8, 9])
                .deadly(1, 5)
                .rewards(20, 0, 0),
            PathNode::new(NodeId(7), "Flooded Gallery")
                .describe("Black water mirrors your torch between drowned pillars.")
                .death_text("The water is patient, and you ran out of breath first.")
                .leads_to([9, 10])
                .deadly(1, 6)
                .rewards(15, 1, 0),
            PathNode::new(NodeId(8), "Wyrm's Den")
                .describe("Coins shift underfoot. Something vast is sleeping here.")
                .death_text("It was not sleeping.")
                .leads_to([10, 11])
                .deadly(1, 2)
                .rewards(50, 0, 1),
            PathNode::new(NodeId(9), "Collapsed Adit")
                .describe("You squeeze past fallen timbers and settling stone.")
                .death_text("The mountain finishes what the miners started.")
                .leads_to([10])
                .deadly(1, 4)
                .rewards(0, 0, 1),
            PathNode::new(NodeId(10), "Vault Antechamber")
                .describe("Iron doors stand ajar before a strongroom of old kings.")
                .death_text("The doors were ajar for a reason.")
                .leads_to([11, 12])
                .deadly(1, 8)
                .rewards(25, 0, 1),
            PathNode::new(NodeId(11), "Chasm Ledge")
                .describe("A thin shelf of rock skirts a lightless drop.")
                .death_text("The ledge holds. Your nerve does not.")
                .leads_to([12])
                .deadly(1, 3)
                .rewards(30, 0, 0),
            PathNode::new(NodeId(12), "Sunward Gate")
                .describe("Daylight pours through a carved arch. You made it out.")
                .rewards(100, 0, 0)
                .winning(),
        ];

        match Self::new(nodes, NodeId(13)) {
            Ok(graph) => graph,
            // The standard world is validated by tests; a failure here is a
            // bug in the table above, not a runtime condition.
            Err(err) => unreachable!("standard world failed validation: {err}"),
        }
    }
}

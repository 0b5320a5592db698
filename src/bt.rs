use anyhow::Result;
use serde::{Deserialize, Serialize};
use simple_xml_builder::XMLElement;
use tokio::time::{interval, Duration, Instant, MissedTickBehavior};

use arena::TreeArena;
use executor::TreeExecutor;
use handle::NodeHandle;
use node::{NodeError, NodeKind, TreeStatus};

pub mod action;
pub mod arena;
pub mod branch;
pub mod builder;
pub mod condition;
pub mod executor;
pub mod handle;
pub mod multiplexer;
pub mod node;
pub(crate) mod stack;
pub mod timer;

/// Settings of [`BehaviorTree::run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Period between two ticks, the logical clock counts milliseconds.
    pub tick_millis: u64,
    /// Stop after this many ticks, whatever the tree status.
    pub max_ticks: Option<u64>,
    /// Start over from the root after the tree resolved instead of returning.
    pub restart: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tick_millis: 100,
            max_ticks: None,
            restart: false,
        }
    }
}

impl RunConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

pub struct BehaviorTree<'a, C, LM = (), DM = LM> {
    pub name: String,
    arena: &'a TreeArena<C, LM, DM>,
    executor: TreeExecutor<'a, C, LM, DM>,
}

impl<'a, C, LM, DM> BehaviorTree<'a, C, LM, DM>
where
    LM: Default,
    DM: Default,
{
    pub fn new<S: Into<String>>(
        name: S,
        arena: &'a TreeArena<C, LM, DM>,
        root: NodeHandle,
    ) -> Result<Self, NodeError> {
        Ok(Self {
            name: name.into(),
            arena,
            executor: TreeExecutor::new(arena, root)?,
        })
    }

    pub fn executor(&self) -> &TreeExecutor<'a, C, LM, DM> {
        &self.executor
    }

    pub fn tick(&mut self, ctx: &mut C, now: u64) -> TreeStatus {
        self.executor.update(ctx, now)
    }

    /// Ticks the tree on the tokio clock until it resolves, or forever when
    /// `restart` is set and no tick limit is given.
    pub async fn run(&mut self, ctx: &mut C, config: &RunConfig) -> TreeStatus {
        log::debug!("Starting BT {:?} with {:?}", self.name, config);
        let started = Instant::now();
        let mut ticker = interval(Duration::from_millis(config.tick_millis.max(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut ticks = 0;
        let mut status = TreeStatus::Running;
        loop {
            if config.max_ticks.is_some_and(|max_ticks| ticks >= max_ticks) {
                log::debug!("BT {:?} - tick limit reached with {:?}", self.name, status);
                return status;
            }
            ticker.tick().await;
            let now = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            status = self.tick(ctx, now);
            ticks += 1;

            if !status.is_running() {
                if !config.restart {
                    log::debug!("Exited BT {:?} with status: {:?}", self.name, status);
                    return status;
                }
                log::debug!("Exited BT {:?} with status: {:?} - restarting again", self.name, status);
            }
        }
    }

    pub fn export_xml(&self) -> String {
        // Groot format. See https://github.com/BehaviorTree/Groot
        let mut root = XMLElement::new("root");
        root.add_attribute("main_tree_to_execute", "MainTree");
        let mut tree = XMLElement::new("BehaviorTree");
        tree.add_attribute("ID", "MainTree");

        tree.add_child(self.xml_element(self.executor.root())); // Insert custom BT logic
        root.add_child(tree); // Insert in boilerplate
        root.to_string()
    }

    fn xml_element(&self, handle: NodeHandle) -> XMLElement {
        let node = self.arena.node(handle);
        let mut element = XMLElement::new(node.element());
        element.add_attribute("name", node.label());
        if let NodeKind::Branch(branch) = node.kind() {
            if branch.loops() > 1 {
                element.add_attribute("loops", branch.loops());
            }
            if branch.attempts() > 1 {
                element.add_attribute("attempts", branch.attempts());
            }
        }
        for child in node.children() {
            element.add_child(self.xml_element(*child));
        }

        // Groot sees guards as decorators wrapping the node, the first declared outermost
        (0..node.decorators().len()).rev().fold(element, |inner, index| {
            let mut decorator = XMLElement::new("Decorator");
            decorator.add_attribute("name", format!("{}_guard_{}", node.label(), index));
            decorator.add_child(inner);
            decorator
        })
    }

    pub fn export_json(&self) -> Result<String> {
        let root = self.executor.root();
        let nodes = self
            .arena
            .reachable(root)
            .into_iter()
            .map(|handle| {
                let node = self.arena.node(handle);
                let (loops, attempts) = match node.kind() {
                    NodeKind::Branch(branch) => (Some(branch.loops()), Some(branch.attempts())),
                    _ => (None, None),
                };
                NodeDescription {
                    id: handle.index(),
                    name: node.label(),
                    element: node.element(),
                    children: node.children().iter().map(NodeHandle::index).collect(),
                    decorators: node.decorators().len(),
                    loops,
                    attempts,
                }
            })
            .collect();

        let bt = TreeDescription {
            name: &self.name,
            arena: self.arena.id().to_string(),
            root_node: root.index(),
            nodes,
        };
        Ok(serde_json::to_string(&bt)?)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TreeDescription<'n> {
    name: &'n str,
    arena: String,
    root_node: usize,
    nodes: Vec<NodeDescription<'n>>,
}

#[derive(Serialize)]
struct NodeDescription<'n> {
    id: usize,
    name: &'n str,
    #[serde(rename = "type")]
    element: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<usize>,
    decorators: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    loops: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attempts: Option<u64>,
}

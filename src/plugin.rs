//! Plugin registry: sticky instances attached to their nodes.
//!
//! `Stickies` plays the role of per-element instance data. Applying the
//! behavior to a node that already has an instance is a no-op, named commands
//! are dispatched to the instance on a node, and destroyed instances are
//! unregistered so the node can be initialized again.

use std::str::FromStr;
use std::time::Instant;

use slotmap::SecondaryMap;
use tracing::debug;

use crate::dom::node::NodeId;
use crate::host::Host;
use crate::sticky::{Sticky, StickyConfig, StickySettings};

/// Errors from parsing a named command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("command `{0}` requires arguments")]
    MissingArguments(&'static str),
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}

/// A public operation invoked by name on an existing instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Calculate,
    Setting(StickySettings),
    Destroy,
}

impl Command {
    /// Build a command from a name and its (JSON) argument, as in
    /// `sticky('setting', { topOffset: 10 })`.
    pub fn from_call(name: &str, args: serde_json::Value) -> Result<Self, CommandError> {
        match name {
            "setting" => Ok(Command::Setting(serde_json::from_value(args)?)),
            other => other.parse(),
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "calculate" => Ok(Command::Calculate),
            "destroy" => Ok(Command::Destroy),
            "setting" => Err(CommandError::MissingArguments("setting")),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}

/// All sticky instances on a page, keyed by element.
#[derive(Debug, Default)]
pub struct Stickies {
    instances: SecondaryMap<NodeId, Sticky>,
    next_id: u64,
}

impl Stickies {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the behavior to `node` unless it already has an instance.
    pub fn apply<H: Host + ?Sized>(
        &mut self,
        host: &H,
        node: NodeId,
        config: impl Into<StickyConfig>,
    ) -> &mut Sticky {
        if !self.instances.contains_key(node) {
            self.next_id += 1;
            let sticky = Sticky::new(host, node, config.into(), self.next_id);
            debug!(instance = %sticky.namespace(), ?node, "sticky applied");
            self.instances.insert(node, sticky);
        }
        &mut self.instances[node]
    }

    /// Run a command on the instance attached to `node`. Returns `false` when
    /// the node has no instance.
    pub fn invoke<H: Host + ?Sized>(&mut self, host: &mut H, node: NodeId, command: Command) -> bool {
        let Some(sticky) = self.instances.get_mut(node) else {
            return false;
        };
        match command {
            Command::Calculate => sticky.calculate(host),
            Command::Setting(settings) => sticky.setting(settings),
            Command::Destroy => sticky.destroy(host),
        }
        self.sweep();
        true
    }

    pub fn get(&self, node: NodeId) -> Option<&Sticky> {
        self.instances.get(node)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Sticky> {
        self.instances.get_mut(node)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Sticky)> {
        self.instances.iter()
    }

    // ── Fan-out ──────────────────────────────────────────────────────

    /// Page load: initialize every pending instance.
    pub fn load<H: Host + ?Sized>(&mut self, host: &mut H) {
        for (_, sticky) in self.instances.iter_mut() {
            sticky.on_load(host);
        }
        self.sweep();
    }

    pub fn scroll(&mut self) {
        for (_, sticky) in self.instances.iter_mut() {
            sticky.on_scroll();
        }
    }

    pub fn resize(&mut self, now: Instant) {
        for (_, sticky) in self.instances.iter_mut() {
            sticky.on_resize(now);
        }
    }

    pub fn mutation<H: Host + ?Sized>(&mut self, target: NodeId, now: Instant, host: &H) {
        for (_, sticky) in self.instances.iter_mut() {
            sticky.on_mutation(target, now, host);
        }
    }

    /// Frame tick for every instance.
    pub fn tick<H: Host + ?Sized>(&mut self, now: Instant, host: &mut H) {
        for (_, sticky) in self.instances.iter_mut() {
            sticky.tick(now, host);
        }
        self.sweep();
    }

    /// The earliest armed recalculation across instances.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.instances.values().filter_map(Sticky::next_deadline).min()
    }

    /// Unregister destroyed instances.
    fn sweep(&mut self) {
        self.instances.retain(|_, sticky| !sticky.is_destroyed());
    }
}

use crate::animation::interp::RangeMap;
use crate::animation::spring::{Spring, SpringConfig};
use crate::animation::style::StyleValue;
use crate::foundation::core::Progress;
use crate::foundation::error::{ScuderiaError, ScuderiaResult};
use crate::scroll::source::TrackId;

/// Dense index of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

#[derive(Clone, Debug)]
enum NodeKind {
    Progress(TrackId),
    Clock,
    Map {
        input: NodeId,
        map: RangeMap<StyleValue>,
    },
    // One spring per numeric slot of the input; empty until the first evaluation.
    Spring {
        input: NodeId,
        rest: Spring,
        slots: Vec<Spring>,
    },
    Affine {
        input: NodeId,
        factor: f64,
        offset: f64,
    },
}

/// Per-frame inputs to [`MotionGraph::evaluate`].
#[derive(Clone, Copy, Debug)]
pub struct GraphInputs<'a> {
    /// Progress of every scroll track, indexed by [`TrackId`].
    pub progress: &'a [Progress],
    /// Milliseconds since the session's first frame.
    pub clock_ms: f64,
    /// Milliseconds since the previous frame.
    pub dt_ms: f64,
}

/// Directed acyclic graph of derived presentation values.
///
/// A node may only read nodes added before it, so insertion order is a topological order and
/// evaluation is a single forward pass. Springs are the only stateful nodes.
#[derive(Clone, Debug, Default)]
pub struct MotionGraph {
    nodes: Vec<NodeKind>,
    values: Vec<StyleValue>,
    exports: Vec<(String, NodeId)>,
}

impl MotionGraph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, node: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        self.values.push(StyleValue::number(0.0));
        id
    }

    fn check_input(&self, input: NodeId) -> ScuderiaResult<()> {
        if (input.0 as usize) < self.nodes.len() {
            Ok(())
        } else {
            Err(ScuderiaError::validation(format!(
                "graph node {} does not exist yet",
                input.0
            )))
        }
    }

    /// Source node reading a scroll track.
    pub fn progress(&mut self, track: TrackId) -> NodeId {
        self.push(NodeKind::Progress(track))
    }

    /// Source node reading session time in milliseconds.
    pub fn clock(&mut self) -> NodeId {
        self.push(NodeKind::Clock)
    }

    /// Breakpoint interpolation of `input`'s scalar.
    pub fn map(&mut self, input: NodeId, map: RangeMap<StyleValue>) -> ScuderiaResult<NodeId> {
        self.check_input(input)?;
        Ok(self.push(NodeKind::Map { input, map }))
    }

    /// Spring-smoothed copy of `input`; the template of `input` is preserved and every numeric
    /// slot is smoothed independently.
    pub fn spring(&mut self, input: NodeId, config: SpringConfig) -> ScuderiaResult<NodeId> {
        self.check_input(input)?;
        let rest = Spring::new(config, 0.0)?;
        Ok(self.push(NodeKind::Spring {
            input,
            rest,
            slots: Vec::new(),
        }))
    }

    /// `input * factor + offset`.
    pub fn affine(&mut self, input: NodeId, factor: f64, offset: f64) -> ScuderiaResult<NodeId> {
        self.check_input(input)?;
        if !(factor.is_finite() && offset.is_finite()) {
            return Err(ScuderiaError::validation("affine factor/offset must be finite"));
        }
        Ok(self.push(NodeKind::Affine {
            input,
            factor,
            offset,
        }))
    }

    /// Publish `id` under `name`.
    pub fn export(&mut self, name: impl Into<String>, id: NodeId) -> ScuderiaResult<()> {
        let name = name.into();
        self.check_input(id)?;
        if self.exports.iter().any(|(n, _)| *n == name) {
            return Err(ScuderiaError::validation(format!(
                "graph output '{name}' is already exported"
            )));
        }
        self.exports.push((name, id));
        Ok(())
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when no nodes were added.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Recompute every node from `inputs`.
    pub fn evaluate(&mut self, inputs: &GraphInputs<'_>) {
        let Self { nodes, values, .. } = self;
        for (i, node) in nodes.iter_mut().enumerate() {
            let (done, rest) = values.split_at_mut(i);
            let done: &[StyleValue] = done;

            rest[0] = match node {
                NodeKind::Progress(track) => StyleValue::number(
                    inputs
                        .progress
                        .get(track.0 as usize)
                        .copied()
                        .unwrap_or(Progress::ZERO)
                        .get(),
                ),
                NodeKind::Clock => StyleValue::number(inputs.clock_ms),
                NodeKind::Map { input, map } => map.map(done[input.0 as usize].scalar().unwrap_or(0.0)),
                NodeKind::Spring { input, rest, slots } => {
                    let src = &done[input.0 as usize];
                    let targets = src.slots();
                    if slots.len() == targets.len() {
                        for (spring, &target) in slots.iter_mut().zip(targets) {
                            spring.set_target(target);
                            spring.step(inputs.dt_ms);
                        }
                    } else {
                        // First frame, or the source template changed shape.
                        *slots = targets
                            .iter()
                            .map(|&v| {
                                let mut s = rest.clone();
                                s.jump(v);
                                s
                            })
                            .collect();
                    }
                    src.with_slots(slots.iter().map(Spring::value))
                }
                NodeKind::Affine {
                    input,
                    factor,
                    offset,
                } => {
                    let src = &done[input.0 as usize];
                    src.with_scalar(src.scalar().unwrap_or(0.0) * *factor + *offset)
                }
            };
        }
    }

    /// Value of `id` from the last evaluation.
    pub fn value(&self, id: NodeId) -> Option<&StyleValue> {
        self.values.get(id.0 as usize)
    }

    /// Value of the exported output `name`.
    pub fn output(&self, name: &str) -> Option<&StyleValue> {
        self.exports
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, id)| self.value(*id))
    }

    /// Exported outputs in export order.
    pub fn outputs(&self) -> impl Iterator<Item = (&str, &StyleValue)> + '_ {
        self.exports
            .iter()
            .filter_map(|(n, id)| self.value(*id).map(|v| (n.as_str(), v)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/dag.rs"]
mod tests;

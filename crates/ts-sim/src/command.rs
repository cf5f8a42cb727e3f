//! Commands applied to live elements between ticks.
//!
//! A command names the kind of element it targets.  The driver calls
//! [`Command::execute`] once for every live element of that kind and writes
//! each returned line to the console.

use std::fmt;

use ts_mobility::Agent;
use ts_spatial::{Edge, Junction, Lane};

/// Kinds of element a command can target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Junction,
    Edge,
    Lane,
    Agent,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Junction => "junction",
            ElementKind::Edge => "edge",
            ElementKind::Lane => "lane",
            ElementKind::Agent => "agent",
        };
        f.write_str(name)
    }
}

/// One live element handed to a command.
///
/// Topology is read-only.  Agents are mutable through their validated
/// setters only; their lane cannot be changed from here.
pub enum Element<'a> {
    Junction(&'a Junction),
    Edge(&'a Edge),
    Lane(&'a Lane),
    Agent(&'a mut Agent),
}

impl Element<'_> {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Junction(_) => ElementKind::Junction,
            Element::Edge(_) => ElementKind::Edge,
            Element::Lane(_) => ElementKind::Lane,
            Element::Agent(_) => ElementKind::Agent,
        }
    }
}

/// An externally issued command.
pub trait Command: Send {
    /// The element kind this command applies to.
    fn target(&self) -> ElementKind;

    /// Apply to one element and return a line for the console.
    fn execute(&mut self, element: Element<'_>) -> String;
}

// ── Built-ins ─────────────────────────────────────────────────────────────────

/// Print one line per element of the given kind.
#[derive(Copy, Clone, Debug)]
pub struct Describe(pub ElementKind);

impl Command for Describe {
    fn target(&self) -> ElementKind {
        self.0
    }

    fn execute(&mut self, element: Element<'_>) -> String {
        match element {
            Element::Junction(j) => format!("{} at {} with {} edges", j.id(), j.pos(), j.edges().len()),
            Element::Edge(e) => format!(
                "{}: {} -> {}, priority {}, {} lanes",
                e.id(),
                e.start(),
                e.end(),
                e.priority(),
                e.lanes().len()
            ),
            Element::Lane(l) => format!(
                "{} on {}: {:.3} m, {} agents",
                l.id(),
                l.edge(),
                l.length(),
                l.occupants().len()
            ),
            Element::Agent(a) => format!(
                "{} on {} at {:.3}, {:.3} m/s, decision {}",
                a.id(),
                a.lane(),
                a.position(),
                a.velocity(),
                a.decision()
            ),
        }
    }
}

/// Set the velocity of every agent.  Agents whose vehicle cannot reach the
/// velocity keep their old one and report why.
#[derive(Copy, Clone, Debug)]
pub struct SetVelocity(pub f64);

impl Command for SetVelocity {
    fn target(&self) -> ElementKind {
        ElementKind::Agent
    }

    fn execute(&mut self, element: Element<'_>) -> String {
        match element {
            Element::Agent(a) => match a.set_velocity(self.0) {
                Ok(()) => format!("{} velocity set to {} m/s", a.id(), self.0),
                Err(err) => format!("{}: {err}", a.id()),
            },
            other => format!("velocity cannot be set on a {}", other.kind()),
        }
    }
}

//! Advisory checks over a built factory.
//!
//! [`audit`] looks for definitions that build fine but probably do not do
//! what their author meant. It uses `Validation` to accumulate every finding
//! instead of stopping at the first, so a single run reports them all.
//!
//! Findings never block a factory; callers decide what to do with them.

use crate::core::State;
use crate::graph::Graph;
use crate::lifecycle::{HandlerMap, Phase, Step};
use crate::machine::MachineFactory;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A suspicious spot in a machine definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Finding {
    #[error("handler {hook} is never invoked by any transition")]
    OrphanHandler { hook: String },

    #[error("edge {from} -> {to} is realized by several transitions: {transitions:?}")]
    AmbiguousEdge {
        from: String,
        to: String,
        transitions: Vec<String>,
    },

    #[error("handler {hook} runs twice when {transition} enters {state}")]
    HookCollision {
        hook: String,
        transition: String,
        state: String,
    },
}

pub type AuditResult = Validation<(), NonEmptyVec<Finding>>;

/// Run every check against `factory`.
pub fn audit<S: State, C: Send + 'static>(factory: &MachineFactory<S, C>) -> AuditResult {
    let graph = factory.graph();
    let handlers = factory.handlers();

    let mut checks: Vec<AuditResult> = Vec::new();
    checks.extend(orphan_handlers(graph, handlers));
    checks.extend(ambiguous_edges(graph));
    checks.extend(hook_collisions(graph, handlers));

    Validation::all_vec(checks).map(|_| ())
}

/// Every key some pipeline of `graph` looks up.
fn reachable_keys<S: State>(graph: &Graph<S>) -> HashSet<String> {
    let mut keys = HashSet::new();
    for transition in graph.transitions() {
        for &(from, to) in &transition.edges {
            let (from, to) = (graph.state(from).name(), graph.state(to).name());
            let step = Step {
                transition: &transition.name,
                from: &from,
                to: &to,
            };
            for phase in Phase::PRE_COMMIT.into_iter().chain(Phase::POST_COMMIT) {
                keys.insert(phase.key(&step));
            }
        }
    }
    keys
}

fn orphan_handlers<S: State, C: 'static>(
    graph: &Graph<S>,
    handlers: &HandlerMap<C>,
) -> Vec<AuditResult> {
    let reachable = reachable_keys(graph);
    handlers
        .keys()
        .into_iter()
        .filter(|key| !reachable.contains(*key))
        .map(|key| {
            Validation::fail(Finding::OrphanHandler {
                hook: key.to_string(),
            })
        })
        .collect()
}

fn ambiguous_edges<S: State>(graph: &Graph<S>) -> Vec<AuditResult> {
    graph
        .edges()
        .iter()
        .map(|&(from, to)| {
            let names: Vec<String> = graph
                .resolve((from, to))
                .map(|t| graph.transition_name(t).to_string())
                .collect();
            if names.len() > 1 {
                Validation::fail(Finding::AmbiguousEdge {
                    from: graph.state(from).name().into_owned(),
                    to: graph.state(to).name().into_owned(),
                    transitions: names,
                })
            } else {
                Validation::success(())
            }
        })
        .collect()
}

fn hook_collisions<S: State, C: 'static>(
    graph: &Graph<S>,
    handlers: &HandlerMap<C>,
) -> Vec<AuditResult> {
    let mut checks = Vec::new();
    for transition in graph.transitions() {
        // every edge of a transition shares its target
        let Some(&(_, target)) = transition.edges.first() else {
            continue;
        };

        let state = graph.state(target).name();
        let step = Step {
            transition: &transition.name,
            from: "",
            to: &state,
        };
        let hook = Phase::Transition.key(&step);
        if hook == Phase::State.key(&step) && handlers.contains(&hook) {
            checks.push(Validation::fail(Finding::HookCollision {
                hook,
                transition: transition.name.clone(),
                state: state.into_owned(),
            }));
        }
    }
    checks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MachineFactoryBuilder;

    #[test]
    fn clean_definition_passes() {
        let factory = MachineFactoryBuilder::<&str, ()>::new()
            .transition("init", ["A", "B"], "C")
            .transition("reset", ["B", "C"], "A")
            .on("onEnterC", |_| Ok(()))
            .on("onBeforeReset", |_| Ok(()))
            .on("onLeaveB", |_| Ok(()))
            .build()
            .unwrap();

        assert!(audit(&factory).is_success());
    }

    #[test]
    fn reports_every_finding() {
        let factory = MachineFactoryBuilder::<&str, ()>::new()
            .transition("init", ["A", "B"], "C")
            .transition("skip", "A", "C")
            .transition("done", "C", "done")
            .on("onEnterZ", |_| Ok(()))
            .on("onDone", |_| Ok(()))
            .build()
            .unwrap();

        match audit(&factory) {
            Validation::Failure(findings) => {
                assert_eq!(findings.len(), 3);
                assert!(findings.iter().any(|f| matches!(
                    f,
                    Finding::OrphanHandler { hook } if hook == "onEnterZ"
                )));
                assert!(findings.iter().any(|f| matches!(
                    f,
                    Finding::AmbiguousEdge { from, to, transitions }
                        if from == "A" && to == "C" && transitions == &["init", "skip"]
                )));
                assert!(findings.iter().any(|f| matches!(
                    f,
                    Finding::HookCollision { hook, .. } if hook == "onDone"
                )));
            }
            Validation::Success(_) => panic!("Expected findings, got success"),
        }
    }

    #[test]
    fn collision_is_reported_once_per_transition() {
        let factory = MachineFactoryBuilder::<&str, ()>::new()
            .transition("done", ["A", "B", "C"], "done")
            .on("onDone", |_| Ok(()))
            .build()
            .unwrap();

        match audit(&factory) {
            Validation::Failure(findings) => {
                assert_eq!(findings.len(), 1);
                assert!(matches!(
                    findings.iter().next(),
                    Some(Finding::HookCollision { hook, transition, state })
                        if hook == "onDone" && transition == "done" && state == "done"
                ));
            }
            Validation::Success(_) => panic!("Expected a collision, got success"),
        }
    }

    #[test]
    fn finding_messages_name_the_problem() {
        let finding = Finding::OrphanHandler {
            hook: "onEnterZ".into(),
        };
        assert_eq!(
            finding.to_string(),
            "handler onEnterZ is never invoked by any transition"
        );
    }
}

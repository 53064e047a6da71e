use std::fmt::Debug;
use std::str::FromStr;

use log::debug;
use num_traits::Float;

use crate::algorithm::report::{RunState, StepResult};
use crate::algorithm::{FrontierMode, StepEngine};
use crate::graph::Graph;
use crate::{Error, Result};

/// One line of shell input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin a run with the selected mode
    Start,
    Step,
    /// Abandon the run and return to `Idle`
    Reset,
    /// Select the strategy for the next run; only accepted while `Idle`
    Mode(FrontierMode),
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    /// An empty line steps
    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let command = match words.next() {
            None | Some("s") | Some("step") => Command::Step,
            Some("start") | Some("b") | Some("begin") => Command::Start,
            Some("r") | Some("reset") => Command::Reset,
            Some("m") | Some("mode") => match words.next() {
                Some(mode) => Command::Mode(mode.parse()?),
                None => return Err(Error::InvalidArgument("usage: m <heap|lin>".to_string())),
            },
            Some("q") | Some("quit") => Command::Quit,
            Some(other) => {
                return Err(Error::InvalidArgument(format!("unknown command: {}", other)))
            }
        };

        match words.next() {
            Some(extra) => Err(Error::InvalidArgument(format!("unexpected argument: {}", extra))),
            None => Ok(command),
        }
    }
}

/// An engine plus the strategy picked for its next run
///
/// Mirrors the button panel of a visualizer: a mode is chosen while idle,
/// `Start` begins the run, and `Reset` goes back to choosing. Every command
/// answers with a [`StepResult`], so text and JSON output share one shape.
#[derive(Debug)]
pub struct Session<'g, W, G>
where
    W: Float + Debug + Copy + Ord + 'static,
    G: Graph<W>,
{
    engine: StepEngine<'g, W, G>,
    mode: FrontierMode,
}

impl<'g, W, G> Session<'g, W, G>
where
    W: Float + Debug + Copy + Ord + 'static,
    G: Graph<W>,
{
    /// Wraps an engine, normally fresh from `StepEngine::new`
    pub fn new(engine: StepEngine<'g, W, G>, mode: FrontierMode) -> Self {
        Session { engine, mode }
    }

    pub fn engine(&self) -> &StepEngine<'g, W, G> {
        &self.engine
    }

    /// Strategy the next `Start` will use
    pub fn mode(&self) -> FrontierMode {
        self.mode
    }

    /// Applies a command and reports the engine state afterwards
    ///
    /// `Start` on a running or finished engine and `Mode` outside `Idle` fail
    /// with [`Error::InvalidState`] and change nothing. `Quit` only observes.
    pub fn execute(&mut self, command: Command) -> Result<StepResult<W>> {
        match command {
            Command::Start => {
                self.engine.begin(self.mode)?;
                Ok(self.engine.observe())
            }
            Command::Step => Ok(self.engine.step()),
            Command::Reset => {
                self.engine.reset();
                Ok(self.engine.observe())
            }
            Command::Mode(mode) => {
                let state = self.engine.state();
                if state != RunState::Idle {
                    return Err(Error::InvalidState {
                        expected: RunState::Idle,
                        actual: state,
                    });
                }
                debug!("selected {} for the next run", mode);
                self.mode = mode;
                Ok(self.engine.observe())
            }
            Command::Quit => Ok(self.engine.observe()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::report::StepStatus;
    use crate::graph::generators::{demo_graph, DEMO_END, DEMO_START};
    use crate::graph::UndirectedGraph;
    use crate::shell::Renderer;
    use crate::Weight;

    fn session(graph: &UndirectedGraph<Weight>) -> Session<'_, Weight, UndirectedGraph<Weight>> {
        let engine = StepEngine::new(graph, DEMO_START, DEMO_END).unwrap();
        Session::new(engine, FrontierMode::PriorityQueue)
    }

    #[test]
    fn parses_commands() {
        assert_eq!("".parse::<Command>().unwrap(), Command::Step);
        assert_eq!("s".parse::<Command>().unwrap(), Command::Step);
        assert_eq!("start".parse::<Command>().unwrap(), Command::Start);
        assert_eq!("r".parse::<Command>().unwrap(), Command::Reset);
        assert_eq!(
            "m lin".parse::<Command>().unwrap(),
            Command::Mode(FrontierMode::LinearScan)
        );
        assert_eq!("quit".parse::<Command>().unwrap(), Command::Quit);

        assert!(matches!("m".parse::<Command>(), Err(Error::InvalidArgument(_))));
        assert!(matches!("m bfs".parse::<Command>(), Err(Error::InvalidMode(_))));
        assert!(matches!("jump".parse::<Command>(), Err(Error::InvalidArgument(_))));
        assert!(matches!("s 3".parse::<Command>(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn opens_idle_until_started() {
        let graph = demo_graph().unwrap();
        let mut session = session(&graph);
        assert_eq!(session.engine().state(), RunState::Idle);

        let text = Renderer::new(false).render(&session.engine().snapshot(), None, None);
        assert!(text.contains("Select an algorithm and press Start"));

        // Stepping before Start does nothing
        let result = session.execute(Command::Step).unwrap();
        assert!(result.is_inactive());
        assert_eq!(result.snapshot.state, RunState::Idle);

        let started = session.execute(Command::Start).unwrap();
        assert_eq!(started.snapshot.state, RunState::Running);
        assert_eq!(started.snapshot.mode, Some(FrontierMode::PriorityQueue));
        assert_eq!(session.execute(Command::Step).unwrap().status, StepStatus::Settled);
    }

    #[test]
    fn reset_returns_to_idle_without_starting() {
        let graph = demo_graph().unwrap();
        let mut session = session(&graph);
        session.execute(Command::Start).unwrap();
        session.execute(Command::Step).unwrap();

        let result = session.execute(Command::Reset).unwrap();
        assert_eq!(result.status, StepStatus::Inactive);
        assert_eq!(result.snapshot.state, RunState::Idle);
        assert_eq!(result.snapshot.mode, None);
        assert!(result.snapshot.visited.is_empty());
    }

    #[test]
    fn start_twice_reports_invalid_state() {
        let graph = demo_graph().unwrap();
        let mut session = session(&graph);
        session.execute(Command::Start).unwrap();

        let err = session.execute(Command::Start).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidState {
                expected: RunState::Idle,
                actual: RunState::Running
            }
        );
        assert_eq!(session.engine().state(), RunState::Running);
    }

    #[test]
    fn mode_switch_only_while_idle() {
        let graph = demo_graph().unwrap();
        let mut session = session(&graph);

        session.execute(Command::Mode(FrontierMode::LinearScan)).unwrap();
        assert_eq!(session.mode(), FrontierMode::LinearScan);
        assert_eq!(session.engine().state(), RunState::Idle);

        session.execute(Command::Start).unwrap();
        session.execute(Command::Step).unwrap();
        let err = session
            .execute(Command::Mode(FrontierMode::PriorityQueue))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidState { actual: RunState::Running, .. }));
        assert_eq!(session.mode(), FrontierMode::LinearScan);
        assert_eq!(session.engine().mode(), Some(FrontierMode::LinearScan));
        assert_eq!(session.engine().visited().len(), 1);
    }

    #[test]
    fn every_reply_serialises_as_step_result() {
        let graph = demo_graph().unwrap();
        let mut session = session(&graph);

        for command in [Command::Reset, Command::Start, Command::Step] {
            let result = session.execute(command).unwrap();
            let json = serde_json::to_value(&result).unwrap();
            assert!(json.get("status").is_some());
            assert!(json.get("settled").is_some());
            assert!(json.get("summary").is_some());
            assert!(json["snapshot"].get("distances").is_some());
        }
    }
}

use dijkstra_stepper::graph::generators::{demo_graph, demo_graph_without_target_edges};
use dijkstra_stepper::graph::Graph;
use dijkstra_stepper::shell::{Command, OutputFormat, Renderer, Session, ShellConfig};
use dijkstra_stepper::{RunState, StepEngine, StepResult, Weight};
use std::io::{self, BufRead, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let config = ShellConfig::from_env()?;
    let graph = if config.unreachable {
        demo_graph_without_target_edges()?
    } else {
        demo_graph()?
    };
    let renderer = Renderer::new(config.color);
    let engine = StepEngine::new(&graph, &config.start, &config.end)?;
    let mut session = Session::new(engine, config.mode);

    if config.format == OutputFormat::Text {
        println!("{}", renderer.describe_graph(&graph));
        println!(
            "Commands: start, <enter>/s = step, r = reset, m <heap|lin> = select mode, q = quit"
        );
        println!("Selected mode: {}", session.mode().label());
        println!();
    }

    emit(&config, &renderer, &session, &session.engine().observe())?;

    if config.auto_run {
        let started = session.execute(Command::Start)?;
        emit(&config, &renderer, &session, &started)?;
        loop {
            let result = session.execute(Command::Step)?;
            emit(&config, &renderer, &session, &result)?;
            if result.finished() || result.is_inactive() {
                break;
            }
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        let command = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(err) => {
                eprintln!("{}", err);
                continue;
            }
        };
        match session.execute(command) {
            Ok(result) => {
                emit(&config, &renderer, &session, &result)?;
                if config.format == OutputFormat::Text {
                    hint(&session, command, &result);
                }
            }
            Err(err) => eprintln!("{}", err),
        }
    }

    Ok(())
}

fn hint<G>(session: &Session<'_, Weight, G>, command: Command, result: &StepResult<Weight>)
where
    G: Graph<Weight>,
{
    match (command, result.snapshot.state) {
        (Command::Mode(_), _) => println!("Selected mode: {}", session.mode().label()),
        (Command::Step, RunState::Idle) if result.is_inactive() => {
            println!("Run has not started; enter start.")
        }
        (Command::Step, RunState::Finished) if result.is_inactive() => {
            println!("Run is finished; enter r to reset.")
        }
        _ => {}
    }
}

fn emit<G>(
    config: &ShellConfig,
    renderer: &Renderer,
    session: &Session<'_, Weight, G>,
    result: &StepResult<Weight>,
) -> Result<(), Box<dyn std::error::Error>>
where
    G: Graph<Weight>,
{
    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string(result)?),
        OutputFormat::Text => {
            let engine = session.engine();
            let path = engine.current_path();
            println!(
                "{}",
                renderer.render(&result.snapshot, path.as_deref(), engine.summary())
            );
        }
    }
    Ok(())
}
